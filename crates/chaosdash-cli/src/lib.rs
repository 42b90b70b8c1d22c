//! chaosdash CLI: terminal client for the chaos experiment API.

pub mod output;
pub mod transport;

use std::io::{self, BufRead, Write};
use std::path::Path;

use chaosdash_core::{ApiClient, DashboardConfig, Outcome, Result};

pub use transport::ReqwestTransport;

/// Flag beats file beats default.
pub fn resolve_config(api_root: Option<&str>, file: Option<&Path>) -> Result<DashboardConfig> {
    let mut config = match file {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(root) = api_root {
        config.api_root = root.trim().to_string();
    }
    config.validate()?;
    Ok(config)
}

pub fn client(config: &DashboardConfig) -> Result<ApiClient<ReqwestTransport>> {
    Ok(ApiClient::new(ReqwestTransport::new(config)?, config))
}

/// Ask on the terminal. Anything but `y`/`yes` declines.
pub fn confirm_on_terminal(message: &str) -> bool {
    print!("{} [y/N] ", message);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

/// Print a handler outcome. Failures become the command's error.
pub fn report(outcome: &Outcome) -> anyhow::Result<()> {
    match &outcome.notice {
        Some(notice) if !outcome.succeeded => anyhow::bail!("{}", notice.message),
        Some(notice) => println!("✓ {}", notice.message),
        None if !outcome.succeeded => println!("Cancelled."),
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaosdash_core::config::DEFAULT_API_ROOT;
    use std::io::Write as _;

    #[test]
    fn default_when_nothing_given() {
        let config = resolve_config(None, None).unwrap();
        assert_eq!(config.api_root, DEFAULT_API_ROOT);
    }

    #[test]
    fn flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_root: http://from-file:8080\ntimeout_secs: 5").unwrap();

        let from_file = resolve_config(None, Some(file.path())).unwrap();
        assert_eq!(from_file.api_root, "http://from-file:8080");
        assert_eq!(from_file.timeout_secs, Some(5));

        let flagged = resolve_config(Some("https://flag:9000"), Some(file.path())).unwrap();
        assert_eq!(flagged.api_root, "https://flag:9000");
        assert_eq!(flagged.timeout_secs, Some(5));
    }

    #[test]
    fn client_carries_configured_timeout_only() {
        let plain = client(&resolve_config(None, None).unwrap()).unwrap();
        assert_eq!(plain.transport().timeout(), None);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_root: http://from-file:8080\ntimeout_secs: 7").unwrap();
        let timed = client(&resolve_config(None, Some(file.path())).unwrap()).unwrap();
        assert_eq!(timed.base(), "http://from-file:8080/api/v1");
        assert_eq!(
            timed.transport().timeout(),
            Some(std::time::Duration::from_secs(7))
        );
    }

    #[test]
    fn rejects_non_http_root() {
        assert!(resolve_config(Some("chaos-api:8080"), None).is_err());
    }

    #[test]
    fn report_turns_failure_into_error() {
        let failed = Outcome {
            notice: Some(chaosdash_core::Notice::from_error(
                "Error executing experiment",
                &chaosdash_core::DashError::http(500, "Internal Server Error"),
            )),
            ..Default::default()
        };
        let err = report(&failed).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error executing experiment: 500 Internal Server Error"
        );
        assert!(report(&Outcome::cancelled()).is_ok());
    }
}

//! Creation forms and their modal state.
//!
//! Forms hold raw input exactly as typed. `to_request` validates at the
//! boundary and builds the typed payload; nothing is sent when it fails.

use crate::error::{DashError, Result};
use crate::models::{
    ExperimentKind, ExperimentParameters, ExternalParameters, NewExperiment, NewTarget,
    WorkloadParameters,
};

pub const REQUIRED_FIELDS: &str = "Please fill in all required fields";
pub const DEFAULT_PERCENTAGE: u8 = 50;
pub const DEFAULT_DURATION_SECS: u64 = 60;

/// Target types offered by the target form.
pub const TARGET_KINDS: &[&str] = &["pod", "deployment", "service", "node", "external"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalFields {
    pub endpoint: String,
    pub auth_token: String,
    pub cleanup_endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadFields {
    pub namespace: String,
    pub percentage: u8,
}

impl Default for WorkloadFields {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
            percentage: DEFAULT_PERCENTAGE,
        }
    }
}

/// New-experiment form. Both parameter sub-forms keep their values while
/// hidden; the kind alone decides which one is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentForm {
    pub name: String,
    pub description: String,
    /// Raw select value, e.g. `external-target` or `pod-failure`.
    pub kind: String,
    /// Selector of the chosen target.
    pub target: String,
    pub duration: String,
    pub external: ExternalFields,
    pub workload: WorkloadFields,
}

impl Default for ExperimentForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            kind: ExperimentKind::ExternalTarget.to_string(),
            target: String::new(),
            duration: DEFAULT_DURATION_SECS.to_string(),
            external: ExternalFields::default(),
            workload: WorkloadFields::default(),
        }
    }
}

impl ExperimentForm {
    pub fn parsed_kind(&self) -> Option<ExperimentKind> {
        let kind = self.kind.trim();
        (!kind.is_empty()).then(|| ExperimentKind::from(kind))
    }

    /// Which parameter sub-form is visible.
    pub fn shows_external(&self) -> bool {
        self.parsed_kind().is_some_and(|k| k.is_external())
    }

    /// Switch kind without touching either sub-form.
    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.kind = kind.into();
    }

    pub fn to_request(&self) -> Result<NewExperiment> {
        let name = self.name.trim();
        let target = self.target.trim();
        let kind = self.parsed_kind();
        let duration = parse_duration(&self.duration);

        let (Some(kind), Some(duration)) = (kind, duration) else {
            return Err(DashError::Validation(REQUIRED_FIELDS.to_string()));
        };
        if name.is_empty() || target.is_empty() {
            return Err(DashError::Validation(REQUIRED_FIELDS.to_string()));
        }

        let parameters = if kind.is_external() {
            // The endpoint is required by the UI but the server has the last word.
            ExperimentParameters::External(ExternalParameters {
                endpoint: self.external.endpoint.trim().to_string(),
                auth_token: non_blank(&self.external.auth_token),
                cleanup_endpoint: non_blank(&self.external.cleanup_endpoint),
            })
        } else {
            if self.workload.percentage > 100 {
                return Err(DashError::Validation(
                    "Percentage must be between 0 and 100".to_string(),
                ));
            }
            ExperimentParameters::Workload(WorkloadParameters {
                namespace: self.workload.namespace.trim().to_string(),
                percentage: self.workload.percentage,
            })
        };

        Ok(NewExperiment {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            kind,
            target: target.to_string(),
            parameters,
            duration,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetForm {
    pub name: String,
    pub description: String,
    pub kind: String,
    pub namespace: String,
    pub selector: String,
}

impl Default for TargetForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            kind: TARGET_KINDS[0].to_string(),
            namespace: "default".to_string(),
            selector: String::new(),
        }
    }
}

impl TargetForm {
    pub fn to_request(&self) -> Result<NewTarget> {
        let required = [&self.name, &self.kind, &self.namespace, &self.selector];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err(DashError::Validation(REQUIRED_FIELDS.to_string()));
        }
        Ok(NewTarget {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            kind: self.kind.trim().to_string(),
            namespace: self.namespace.trim().to_string(),
            selector: self.selector.trim().to_string(),
        })
    }
}

/// A creation modal: open flag plus the form it hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modal<F> {
    pub open: bool,
    pub form: F,
}

impl<F: Default> Modal<F> {
    pub fn show(&mut self) {
        self.open = true;
    }

    pub fn hide(&mut self) {
        self.open = false;
    }

    /// Close and reset after a successful submission. On failure the modal
    /// stays open with the input intact so the user can retry.
    pub fn settle(&mut self, succeeded: bool) {
        if succeeded {
            self.open = false;
            self.form = F::default();
        }
    }
}

/// Whole positive seconds; anything else counts as missing.
fn parse_duration(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|d| *d > 0)
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ExperimentForm {
        ExperimentForm {
            name: "payments outage".into(),
            target: "app=payments".into(),
            duration: "120".into(),
            external: ExternalFields {
                endpoint: "http://payments/chaos".into(),
                auth_token: "  ".into(),
                cleanup_endpoint: "http://payments/cleanup".into(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn external_kind_builds_external_variant() {
        let req = filled().to_request().unwrap();
        assert_eq!(req.kind, ExperimentKind::ExternalTarget);
        assert_eq!(
            req.parameters,
            ExperimentParameters::External(ExternalParameters {
                endpoint: "http://payments/chaos".into(),
                auth_token: None,
                cleanup_endpoint: Some("http://payments/cleanup".into()),
            })
        );
    }

    #[test]
    fn hidden_subform_is_kept_but_not_sent() {
        let mut form = filled();
        form.set_kind("pod-failure");
        assert!(!form.shows_external());
        assert_eq!(form.external.endpoint, "http://payments/chaos");

        let req = form.to_request().unwrap();
        assert_eq!(
            req.parameters,
            ExperimentParameters::Workload(WorkloadParameters {
                namespace: "default".into(),
                percentage: DEFAULT_PERCENTAGE,
            })
        );

        form.set_kind("external-target");
        assert!(form.shows_external());
        assert_eq!(form.external.cleanup_endpoint, "http://payments/cleanup");
    }

    #[test]
    fn empty_endpoint_passes_through() {
        let mut form = filled();
        form.external.endpoint.clear();
        assert!(form.to_request().is_ok());
    }

    #[test]
    fn missing_required_fields() {
        for mutate in [
            (|f: &mut ExperimentForm| f.name.clear()) as fn(&mut ExperimentForm),
            |f: &mut ExperimentForm| f.kind.clear(),
            |f: &mut ExperimentForm| f.target.clear(),
            |f: &mut ExperimentForm| f.duration = "0".into(),
            |f: &mut ExperimentForm| f.duration = "soon".into(),
        ] {
            let mut form = filled();
            mutate(&mut form);
            assert_eq!(
                form.to_request(),
                Err(DashError::Validation(REQUIRED_FIELDS.into()))
            );
        }
    }

    #[test]
    fn percentage_out_of_range() {
        let mut form = filled();
        form.set_kind("cpu-stress");
        form.workload.percentage = 101;
        assert!(matches!(form.to_request(), Err(DashError::Validation(_))));
    }

    #[test]
    fn target_form_requires_selector() {
        let mut form = TargetForm {
            name: "web".into(),
            selector: "app=web".into(),
            ..Default::default()
        };
        assert!(form.to_request().is_ok());
        form.selector = " ".into();
        assert!(form.to_request().is_err());
    }

    #[test]
    fn modal_settles_only_on_success() {
        let mut modal = Modal {
            open: true,
            form: filled(),
        };
        modal.settle(false);
        assert!(modal.open);
        assert_eq!(modal.form, filled());

        modal.settle(true);
        assert!(!modal.open);
        assert_eq!(modal.form, ExperimentForm::default());
    }
}

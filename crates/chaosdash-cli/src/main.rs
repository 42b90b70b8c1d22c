//! chaosdash CLI: run the dashboard or drive the experiment API from a terminal.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chaosdash_cli::{client, confirm_on_terminal, output, report, resolve_config};
use chaosdash_core::actions::{self, Detail};
use chaosdash_core::forms::{
    ExperimentForm, ExternalFields, TargetForm, WorkloadFields, DEFAULT_PERCENTAGE,
};
use chaosdash_core::render::{self, ExperimentTable, Summary};
use chaosdash_core::DashboardConfig;
use chaosdash_server::{serve, ServerConfig};

#[derive(Parser)]
#[command(
    name = "chaosdash",
    about = "🔥 chaosdash: dashboard and CLI for chaos experiments",
    version,
    author
)]
struct Cli {
    /// Root URL of the experiment API (without /api/v1)
    #[arg(long, global = true, env = "CHAOSDASH_API_ROOT")]
    api_root: Option<String>,
    /// YAML file with `api_root` and `timeout_secs`
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web dashboard server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(long, short, default_value_t = 8000)]
        port: u16,
    },
    /// Manage experiments
    #[command(subcommand)]
    Experiments(ExperimentCommand),
    /// Manage targets
    #[command(subcommand)]
    Targets(TargetCommand),
    /// Experiment counts and the most recent experiments
    Summary,
}

#[derive(Subcommand)]
enum ExperimentCommand {
    /// List experiments, newest first
    List {
        /// Only the five most recent
        #[arg(long)]
        recent: bool,
    },
    /// Show one experiment with its parameters
    Show { id: String },
    /// Create an experiment
    Create(CreateExperimentArgs),
    /// Start a pending experiment
    Execute { id: String },
    /// Stop a running experiment
    Stop { id: String },
    /// Delete an experiment
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(clap::Args)]
struct CreateExperimentArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    /// external-target, pod-failure, network-delay, cpu-stress, ...
    #[arg(long = "type", default_value = "external-target")]
    kind: String,
    /// Selector of the target
    #[arg(long, default_value = "")]
    target: String,
    /// Seconds
    #[arg(long, default_value = "60")]
    duration: String,
    /// External target: chaos endpoint
    #[arg(long, default_value = "")]
    endpoint: String,
    /// External target: bearer token
    #[arg(long, default_value = "")]
    auth_token: String,
    /// External target: cleanup endpoint
    #[arg(long, default_value = "")]
    cleanup_endpoint: String,
    /// Workload kinds: namespace
    #[arg(long, default_value = "default")]
    namespace: String,
    /// Workload kinds: share of pods affected
    #[arg(long, default_value_t = DEFAULT_PERCENTAGE)]
    percentage: u8,
}

impl From<CreateExperimentArgs> for ExperimentForm {
    fn from(args: CreateExperimentArgs) -> Self {
        ExperimentForm {
            name: args.name,
            description: args.description,
            kind: args.kind,
            target: args.target,
            duration: args.duration,
            external: ExternalFields {
                endpoint: args.endpoint,
                auth_token: args.auth_token,
                cleanup_endpoint: args.cleanup_endpoint,
            },
            workload: WorkloadFields {
                namespace: args.namespace,
                percentage: args.percentage,
            },
        }
    }
}

#[derive(Subcommand)]
enum TargetCommand {
    /// List targets, newest first
    List,
    /// Show one target
    Show { id: String },
    /// Register a target
    Create {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// pod, deployment, service, node or external
        #[arg(long = "type", default_value = "pod")]
        kind: String,
        #[arg(long, default_value = "default")]
        namespace: String,
        /// Label selector, e.g. app=web
        #[arg(long, default_value = "")]
        selector: String,
    },
    /// Delete a target
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.api_root.as_deref(), cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => cmd_serve(&config, host, port).await?,
        Commands::Experiments(cmd) => cmd_experiments(&config, cmd).await?,
        Commands::Targets(cmd) => cmd_targets(&config, cmd).await?,
        Commands::Summary => cmd_summary(&config).await?,
    }

    Ok(())
}

// ─── Command implementations ──────────────────────────────────────────────────

async fn cmd_serve(config: &DashboardConfig, host: String, port: u16) -> Result<()> {
    println!("🔥 chaosdash");
    println!("   API:         {}", config.api_base());
    println!("   URL:         http://{}:{}", host, port);
    println!();

    serve(ServerConfig {
        host,
        port,
        api_root: config.api_root.clone(),
    })
    .await
}

async fn cmd_experiments(config: &DashboardConfig, cmd: ExperimentCommand) -> Result<()> {
    let client = client(config)?;
    match cmd {
        ExperimentCommand::List { recent } => {
            let experiments = client.list_experiments().await?;
            let kind = if recent {
                ExperimentTable::Recent
            } else {
                ExperimentTable::Full
            };
            println!("Experiments at: {}", client.base());
            println!("{}", output::experiments_table(&experiments, kind));
        }
        ExperimentCommand::Show { id } => {
            let outcome = actions::view_experiment(&client, &id).await;
            report(&outcome)?;
            if let Some(Detail::Experiment(e)) = outcome.detail {
                println!("{}", output::fields_table(&render::experiment_fields(&e)));
                let parameters = render::parameter_fields(&e.parameters);
                if !parameters.is_empty() {
                    println!("── Parameters ──────────────────────────");
                    println!("{}", output::fields_table(&parameters));
                }
            }
        }
        ExperimentCommand::Create(args) => {
            let form = ExperimentForm::from(args);
            report(&actions::create_experiment(&client, form.to_request()).await)?;
        }
        ExperimentCommand::Execute { id } => {
            report(&actions::execute_experiment(&client, &id).await)?;
        }
        ExperimentCommand::Stop { id } => {
            report(&actions::stop_experiment(&client, &id).await)?;
        }
        ExperimentCommand::Delete { id, yes } => {
            let prompt = |msg: &str| yes || confirm_on_terminal(msg);
            report(&actions::delete_experiment(&client, &prompt, &id).await)?;
        }
    }
    Ok(())
}

async fn cmd_targets(config: &DashboardConfig, cmd: TargetCommand) -> Result<()> {
    let client = client(config)?;
    match cmd {
        TargetCommand::List => {
            let targets = client.list_targets().await?;
            println!("Targets at: {}", client.base());
            println!("{}", output::targets_table(&targets));
        }
        TargetCommand::Show { id } => {
            let outcome = actions::view_target(&client, &id).await;
            report(&outcome)?;
            if let Some(Detail::Target(t)) = outcome.detail {
                println!("{}", output::fields_table(&render::target_fields(&t)));
            }
        }
        TargetCommand::Create {
            name,
            description,
            kind,
            namespace,
            selector,
        } => {
            let form = TargetForm {
                name,
                description,
                kind,
                namespace,
                selector,
            };
            report(&actions::create_target(&client, form.to_request()).await)?;
        }
        TargetCommand::Delete { id, yes } => {
            let prompt = |msg: &str| yes || confirm_on_terminal(msg);
            report(&actions::delete_target(&client, &prompt, &id).await)?;
        }
    }
    Ok(())
}

async fn cmd_summary(config: &DashboardConfig) -> Result<()> {
    let client = client(config)?;
    let experiments = client.list_experiments().await?;
    println!("{}", output::summary_line(&Summary::from_experiments(&experiments)));
    println!("Recent experiments:");
    println!(
        "{}",
        output::experiments_table(&experiments, ExperimentTable::Recent)
    );
    Ok(())
}

use clap::{Parser, Subcommand};
use urbanplan::proposals::ProposalStatus;

pub mod config;
pub mod context;
pub mod init;
pub mod list;
pub mod mnemonic;
pub mod review;
pub mod reveal;
pub mod stats;
pub mod submit;
pub mod version;

#[derive(Parser)]
#[command(name = "urbanplan")]
#[command(author = "UrbanPlan Project")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Urban development proposals with obscured vote counts", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.local/share/urbanplan/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log level override (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a configuration and a signing identity
    Init {
        /// Path to the JSON ledger (default: next to the config file)
        #[arg(long)]
        ledger: Option<String>,

        /// Chain id announced in disclosure challenges
        #[arg(long)]
        chain_id: Option<u64>,

        /// Overwrite an existing configuration and mnemonic
        #[arg(long)]
        force: bool,
    },

    /// List proposals, newest first
    List {
        /// Only show proposals with this status (pending, approved, rejected)
        #[arg(long)]
        status: Option<String>,

        /// Only show proposals in this district (e.g. "District 3" or 3)
        #[arg(long)]
        district: Option<String>,
    },

    /// Submit a new proposal
    Submit {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// District 1-16
        #[arg(long)]
        district: String,

        /// Vote count, stored obscured
        #[arg(long)]
        votes: f64,
    },

    /// Approve one of your pending proposals
    Approve { id: String },

    /// Reject one of your pending proposals
    Reject { id: String },

    /// Sign a disclosure challenge and show a proposal's vote count
    Reveal {
        id: String,

        /// Sign without the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Show status counts and the district map
    Stats,

    /// Display version information
    Version,
}

pub async fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        config,
        log_level,
        command,
    } = cli;

    match command {
        Commands::Init {
            ledger,
            chain_id,
            force,
        } => init::execute(config, ledger, chain_id, force).await,
        Commands::List { status, district } => {
            list::execute(config, log_level, status, district).await
        }
        Commands::Submit {
            title,
            description,
            district,
            votes,
        } => submit::execute(config, log_level, title, description, district, votes).await,
        Commands::Approve { id } => {
            review::execute(config, log_level, id, ProposalStatus::Approved).await
        }
        Commands::Reject { id } => {
            review::execute(config, log_level, id, ProposalStatus::Rejected).await
        }
        Commands::Reveal { id, yes } => reveal::execute(config, log_level, id, yes).await,
        Commands::Stats => stats::execute(config, log_level).await,
        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

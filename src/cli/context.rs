//! Everything a proposal command needs: configuration, the ledger-backed
//! repository, the local identity, and the notice board.

use super::config::{resolve_config_path, UrbanPlanConfig};
use super::mnemonic::{determine_mnemonic_source, read_mnemonic};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use urbanplan::directory::FileDirectory;
use urbanplan::identity::local::ConfirmFn;
use urbanplan::identity::{IdentityKeyring, LocalIdentity};
use urbanplan::notice::{Notice, NoticeBoard, NoticeKind};
use urbanplan::proposals::ProposalRepository;

pub struct AppContext {
    pub config: UrbanPlanConfig,
    pub repository: ProposalRepository<FileDirectory>,
    pub identity: LocalIdentity,
    pub notices: NoticeBoard,
}

impl AppContext {
    /// Load config, start logging, open the ledger, and unlock the identity.
    ///
    /// `confirm` is consulted before every signature; commands that never
    /// sign pass `None`.
    pub fn load(
        config: Option<&str>,
        log_level: Option<&str>,
        confirm: Option<ConfirmFn>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = resolve_config_path(config);
        if !config_path.exists() {
            return Err(format!(
                "Config not found at: {}\nRun 'urbanplan init' first.",
                config_path.display()
            )
            .into());
        }

        let config = UrbanPlanConfig::load(&config_path)?;
        init_logging(log_level.unwrap_or(&config.logging.level));

        let notices = NoticeBoard::new(config.notices.ttls()?);
        let directory = FileDirectory::new(
            config.directory.ledger_path.clone(),
            config.directory.address.clone(),
        );

        let source = determine_mnemonic_source(config.identity.mnemonic_file.as_deref());
        let mnemonic = read_mnemonic(source)?;
        let keyring = IdentityKeyring::from_mnemonic(&mnemonic)?;
        let chain_id = config.identity.chain_id;
        let identity = match confirm {
            Some(confirm) => LocalIdentity::with_confirmation(&keyring, chain_id, confirm)?,
            None => LocalIdentity::new(&keyring, chain_id)?,
        };

        Ok(Self {
            config,
            repository: ProposalRepository::new(directory),
            identity,
            notices,
        })
    }

    /// Print the current notice, if any.
    pub fn show_notice(&self) {
        if let Some(notice) = self.notices.current() {
            eprintln!("{}", render_notice(&notice));
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (tests, repeated calls) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .try_init();
}

pub fn render_notice(notice: &Notice) -> String {
    let icon = match notice.kind {
        NoticeKind::Pending => "⏳",
        NoticeKind::Success => "✅",
        NoticeKind::Error => "❌",
    };
    format!("{} {}", icon, notice.message)
}

/// Terminal confirmation hook: show the challenge and ask y/N.
pub fn terminal_confirmation() -> ConfirmFn {
    Arc::new(|message: &str| {
        eprintln!();
        eprintln!("Signature request:");
        eprintln!("{}", summarize_challenge(message));
        eprint!("Sign this message? [y/N]: ");
        let _ = io::stderr().flush();

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(_) => parse_yes(&input),
            Err(_) => false,
        }
    })
}

/// Accepts `y`/`yes` in any case.
pub fn parse_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Shorten the 2000-digit key line so the prompt stays readable.
pub fn summarize_challenge(message: &str) -> String {
    message
        .lines()
        .map(|line| match line.split_once(':') {
            Some((label, value)) if value.chars().count() > 24 => {
                let chars: Vec<char> = value.chars().collect();
                let head: String = chars[..14].iter().collect();
                let tail: String = chars[chars.len() - 8..].iter().collect();
                format!("  {}:{}…{}", label, head, tail)
            }
            _ => format!("  {}", line),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

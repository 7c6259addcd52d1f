use super::context::{terminal_confirmation, AppContext};
use urbanplan::disclosure::{DisclosureContext, DisclosureSession, DisclosureState};

/// Sign a disclosure challenge and print the decoded vote count
///
/// Nothing is written back; the value exists only in this process.
pub async fn execute(
    config: Option<String>,
    log_level: Option<String>,
    id: String,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let confirm = if yes { None } else { Some(terminal_confirmation()) };
    let ctx = AppContext::load(config.as_deref(), log_level.as_deref(), confirm)?;

    let proposal = ctx.repository.get(&id).await?;
    let disclosure = DisclosureContext::establish(
        ctx.repository.directory(),
        &ctx.identity,
        ctx.config.disclosure.validity_days,
    )
    .await?;

    ctx.notices.pending("Awaiting signature…");
    ctx.show_notice();

    let mut session = DisclosureSession::new();
    match session
        .toggle(&disclosure, &ctx.identity, &proposal.encoded_votes)
        .await
    {
        DisclosureState::Revealed(value) => {
            ctx.notices.success("Vote count revealed");
            ctx.show_notice();
            println!("{}: {}", proposal.title, value);
            Ok(())
        }
        DisclosureState::Failed(e) => {
            let e = e.clone();
            ctx.notices.error(format!("Disclosure failed: {}", e));
            ctx.show_notice();
            Err(e.into())
        }
        DisclosureState::Idle | DisclosureState::AwaitingSignature => {
            Err("Disclosure did not complete".into())
        }
    }
}

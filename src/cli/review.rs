use super::context::AppContext;
use urbanplan::identity::IdentityProvider;
use urbanplan::proposals::{transition, ProposalStatus};

/// Approve or reject one of the local identity's proposals
pub async fn execute(
    config: Option<String>,
    log_level: Option<String>,
    id: String,
    target: ProposalStatus,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = AppContext::load(config.as_deref(), log_level.as_deref(), None)?;
    let action = action_label(target);

    ctx.notices.pending(format!("Recording {}…", action));
    ctx.show_notice();

    match transition(&ctx.repository, ctx.identity.address(), &id, target).await {
        Ok(()) => {
            ctx.notices.success(format!("Proposal {} {}", id, target));
            ctx.show_notice();
            Ok(())
        }
        Err(e) => {
            ctx.notices.error(format!("{} failed: {}", capitalize(action), e));
            ctx.show_notice();
            Err(e.into())
        }
    }
}

fn action_label(target: ProposalStatus) -> &'static str {
    match target {
        ProposalStatus::Approved => "approval",
        ProposalStatus::Rejected => "rejection",
        ProposalStatus::Pending => "reset",
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

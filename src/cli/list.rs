use super::context::AppContext;
use urbanplan::codec;
use urbanplan::identity::IdentityProvider;
use urbanplan::proposals::{is_owner, District, Proposal, ProposalStatus};

/// List proposals, newest first
pub async fn execute(
    config: Option<String>,
    log_level: Option<String>,
    status: Option<String>,
    district: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = status.as_deref().map(parse_status).transpose()?;
    let district = district
        .as_deref()
        .map(str::parse::<District>)
        .transpose()?;

    let ctx = AppContext::load(config.as_deref(), log_level.as_deref(), None)?;
    let proposals = ctx.repository.list_all().await?;
    let viewer = ctx.identity.address();

    let shown: Vec<&Proposal> = proposals
        .iter()
        .filter(|p| status.map_or(true, |s| p.status == s))
        .filter(|p| district.map_or(true, |d| p.location == d))
        .collect();

    if shown.is_empty() {
        println!("No proposals found.");
        return Ok(());
    }

    println!(
        "{:<24} {:<9} {:<12} {:<14} TITLE",
        "ID", "STATUS", "DISTRICT", "VOTES"
    );
    for proposal in shown {
        println!("{}", format_row(proposal, viewer));
    }

    Ok(())
}

pub fn parse_status(value: &str) -> Result<ProposalStatus, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pending" => Ok(ProposalStatus::Pending),
        "approved" => Ok(ProposalStatus::Approved),
        "rejected" => Ok(ProposalStatus::Rejected),
        other => Err(format!(
            "unknown status '{}' (expected pending, approved or rejected)",
            other
        )),
    }
}

/// One table row. Vote counts stay obscured; owned proposals are starred.
pub fn format_row(proposal: &Proposal, viewer: &str) -> String {
    let marker = if is_owner(viewer, proposal) { " *" } else { "" };
    format!(
        "{:<24} {:<9} {:<12} {:<14} {}{}",
        proposal.id,
        proposal.status.as_str(),
        proposal.location.label(),
        obscured(&proposal.encoded_votes),
        proposal.title,
        marker
    )
}

/// Short form of a vote token, never the decoded value.
pub fn obscured(token: &str) -> String {
    if !codec::is_encoded(token) {
        return "🔒 (raw)".to_string();
    }
    let preview: String = token.chars().take(10).collect();
    format!("🔒 {}…", preview)
}

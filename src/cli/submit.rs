use super::context::AppContext;
use urbanplan::identity::IdentityProvider;
use urbanplan::proposals::{District, ProposalDraft};

/// Submit a new proposal owned by the local identity
pub async fn execute(
    config: Option<String>,
    log_level: Option<String>,
    title: String,
    description: String,
    district: String,
    votes: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let district: District = district.parse()?;
    let draft = ProposalDraft {
        title,
        description,
        district,
        votes,
    };
    draft.validate()?;

    let ctx = AppContext::load(config.as_deref(), log_level.as_deref(), None)?;

    ctx.notices.pending("Submitting proposal with obscured vote count…");
    ctx.show_notice();

    match ctx.repository.create(ctx.identity.address(), draft).await {
        Ok(id) => {
            ctx.notices.success("Proposal submitted");
            ctx.show_notice();
            println!("{}", id);
            Ok(())
        }
        Err(e) => {
            ctx.notices.error(format!("Submission failed: {}", e));
            ctx.show_notice();
            Err(e.into())
        }
    }
}

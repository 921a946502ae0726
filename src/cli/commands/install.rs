//! Install command - capture and replay the install offer

use crate::cli::args::InstallArgs;
use crate::error::DraftpadResult;
use crate::session::{InstallDecision, InstallFlow, InstallHost, InstallOffer};
use crate::ui::{self, UiContext};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Presents the install dialog as a terminal confirmation
struct PromptInstallHost {
    ctx: UiContext,
}

#[async_trait]
impl InstallHost for PromptInstallHost {
    async fn prompt(&self, offer: &InstallOffer) -> DraftpadResult<InstallDecision> {
        debug!("Replaying install offer {}", offer.id);
        let accepted =
            ui::confirm(&self.ctx, "Install draftpad for offline use?", false).await?;
        Ok(if accepted {
            InstallDecision::Accepted
        } else {
            InstallDecision::Dismissed
        })
    }
}

/// Execute the install command
pub async fn execute(args: InstallArgs) -> DraftpadResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);

    let host = Arc::new(PromptInstallHost { ctx: ctx.clone() });
    let mut flow = InstallFlow::new(host);

    ui::status_line(&ctx, flow.capture(), true);

    if let Some(signal) = flow.consume().await? {
        ui::status_line(&ctx, signal, true);
    }

    // The offer is single-use whatever the outcome
    debug_assert!(!flow.has_offer());
    Ok(())
}

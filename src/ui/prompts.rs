//! Interactive prompts with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{DraftpadError, DraftpadResult};

/// Prompt for confirmation, returns default if non-interactive or auto-yes.
///
/// Used for the destructive-action guard on `new` and `clear`.
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> DraftpadResult<bool> {
    // Auto-yes mode bypasses prompts
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    // Non-interactive mode returns default
    if !ctx.is_interactive() {
        return Ok(default);
    }

    // Run blocking cliclack prompt in spawn_blocking
    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| DraftpadError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| DraftpadError::User(format!("Prompt failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn confirm_auto_yes() {
        let ctx = UiContext::non_interactive().with_auto_yes(true);
        let result = confirm(&ctx, "Discard the document?", false).await.unwrap();
        assert!(result);
    }

    #[tokio::test]
    async fn confirm_non_interactive_default() {
        let ctx = UiContext::non_interactive();
        assert!(confirm(&ctx, "Proceed?", true).await.unwrap());
        assert!(!confirm(&ctx, "Proceed?", false).await.unwrap());
    }
}

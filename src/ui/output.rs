//! Output functions for consistent CLI formatting

use super::context::UiContext;
use crate::session::status::StatusSignal;
use console::style;

/// Display intro banner
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).cyan().bold()).ok();
    } else {
        println!("{}", style(title).cyan().bold());
        println!();
    }
}

/// Display success outro
pub fn outro_success(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(style(message).green().bold()).ok();
    } else {
        println!();
        println!("{} {}", style("[OK]").green(), message);
    }
}

/// Display error outro
pub fn outro_error(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(style(message).red().bold()).ok();
    } else {
        println!();
        println!("{} {}", style("[ERROR]").red(), message);
    }
}

/// Display a success step
pub fn step_ok(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(message).ok();
    } else {
        println!("  {} {}", style("[OK]").green(), message);
    }
}

/// Display a warning step
pub fn step_warn(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::warning(message).ok();
    } else {
        println!("  {} {}", style("[WARN]").yellow(), message);
    }
}

/// Display an info step
pub fn step_info(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::info(message).ok();
    } else {
        println!("  {} {}", style("[INFO]").cyan(), message);
    }
}

/// Print styled key-value pair
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    if ctx.use_fancy_output() {
        println!("  {}: {}", style(key).dim(), value);
    } else {
        println!("  {}: {}", key, value);
    }
}

/// Render a status signal the way the page's status bar would:
/// emphasized signals are bold, warnings are yellow.
pub fn status_line(ctx: &UiContext, signal: StatusSignal, emphasized: bool) {
    let message = signal.message();

    if !ctx.use_fancy_output() {
        println!("{}", message);
        return;
    }

    let styled = match (signal.is_warning(), emphasized) {
        (true, true) => style(message).yellow().bold(),
        (true, false) => style(message).yellow(),
        (false, true) => style(message).green().bold(),
        (false, false) => style(message).dim(),
    };
    println!("{}", styled);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_non_interactive() {
        let ctx = UiContext::non_interactive();
        // These should not panic
        intro(&ctx, "draftpad");
        outro_success(&ctx, "Done");
        step_ok(&ctx, "Saved");
        step_warn(&ctx, "Unsaved changes");
        step_info(&ctx, "Cache warmed");
        key_value(&ctx, "Document", "42 bytes");
        status_line(&ctx, StatusSignal::Saved, true);
    }
}

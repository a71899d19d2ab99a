//! Build step reporting with plain text fallback

use super::context::UiContext;
use crate::cache::{CacheEntry, CacheOutcome};
use console::style;
use std::path::Path;

fn success(ctx: &UiContext, message: &str, detail: Option<&str>) {
    match (ctx.use_fancy_output(), detail) {
        (true, Some(detail)) => {
            cliclack::log::success(format!("{} ({})", message, style(detail).dim())).ok();
        }
        (true, None) => {
            cliclack::log::success(message).ok();
        }
        (false, Some(detail)) => println!("  {} {} ({})", style("[OK]").green(), message, detail),
        (false, None) => println!("  {} {}", style("[OK]").green(), message),
    }
}

/// Report a build image fetched from the registry
pub fn image_pulled(ctx: &UiContext, image: &str) {
    success(ctx, &format!("Pulled {}", image), None);
}

/// Report a dependency archive settled in the cache
pub fn dependency_settled(ctx: &UiContext, entry: &CacheEntry) {
    let message = match entry.outcome {
        CacheOutcome::Cached => "New dependency cached",
        CacheOutcome::AlreadyCached => "Dependency already cached",
    };
    success(ctx, message, Some(&entry.path.display().to_string()));
}

/// Announce the cross compilation and the engine command driving it
pub fn build_started(ctx: &UiContext, package: &str, command_line: &str) {
    let message = format!("Cross compiling {}...", package);
    if ctx.use_fancy_output() {
        cliclack::log::info(message).ok();
        cliclack::log::remark(command_line).ok();
    } else {
        println!("  {} {}", style("[INFO]").cyan(), message);
        println!("  {}", style(command_line).dim());
    }
}

/// Report binaries written to the output directory
pub fn build_finished(ctx: &UiContext, dest: &Path) {
    success(
        ctx,
        "Cross compilation finished",
        Some(&dest.display().to_string()),
    );
}

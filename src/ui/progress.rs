//! Availability check spinner with CI fallback

use super::context::UiContext;
use console::style;

/// Spinner for the engine and image checks that gate a build
pub struct CheckSpinner {
    spinner: Option<cliclack::ProgressBar>,
    interactive: bool,
}

impl CheckSpinner {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    /// Start checking `subject`
    pub fn check(&mut self, subject: &str) {
        let message = format!("Checking {}...", subject);
        if self.interactive {
            let spinner = cliclack::spinner();
            spinner.start(message);
            self.spinner = Some(spinner);
        } else {
            println!("{} {}", style("...").dim(), message);
        }
    }

    /// The check passed
    pub fn passed(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        } else {
            println!("{} {}", style("[OK]").green(), message);
        }
    }

    /// The image is missing; clear the spinner before the engine's pull
    /// output takes over the terminal
    pub fn pulling(&mut self, image: &str) {
        let message = format!("Image {} not found, pulling from registry", image);
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        } else {
            println!("{} {}", style("[WARN]").yellow(), message);
        }
    }

    /// The check failed
    pub fn failed(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.error(message);
        } else {
            println!("{} {}", style("[FAIL]").red(), message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_non_interactive() {
        let ctx = UiContext::non_interactive();
        let mut spinner = CheckSpinner::new(&ctx);
        spinner.check("docker installation");
        spinner.passed("docker available");
        spinner.check("for required image karalabe/xgo-latest");
        spinner.pulling("karalabe/xgo-latest");
        spinner.check("for required image karalabe/xgo-1.4.2");
        spinner.failed("Image karalabe/xgo-1.4.2 unavailable");
        // Should not panic
    }
}

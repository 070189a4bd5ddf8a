use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a blocking AWS call is in flight. Callers clear it
/// before printing the instance table so alignment is not disturbed.
pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

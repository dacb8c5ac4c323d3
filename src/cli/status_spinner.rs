use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use reqwest::StatusCode;

use std::time::Duration;

/// spinner shown while one request is in flight
pub struct StatusSpinner<'a> {
    multi: &'a MultiProgress,
    bar: ProgressBar,
}

impl<'a> StatusSpinner<'a> {
    pub fn new(loading: &str, multi: &'a MultiProgress) -> Self {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(style(loading).yellow().bright().to_string());
        Self { bar, multi }
    }

    /// finish with an HTTP status: 2xx renders green, anything else
    /// red, but either way it is only a report
    pub fn finish_status(&self, message: &str, status: StatusCode) {
        self.finish(message, status.is_success());
    }

    pub fn finish(&self, message: &str, success: bool) {
        let (prefix, styled) = if success {
            (style("✓").green(), style(message).green())
        } else {
            (style("✕").red(), style(message).red())
        };

        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template("{prefix} {msg}")
                .unwrap(),
        );
        self.bar.set_prefix(prefix.bold().to_string());
        self.bar.finish_with_message(styled.bright().to_string());

        self.multi.remove(&self.bar);
    }
}

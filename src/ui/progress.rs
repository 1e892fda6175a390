use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use indicatif::{HumanDuration, ProgressBar};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Steady-tick spinner, hidden when stdout is not a terminal or output is quiet.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if is_quiet() || !console::Term::stdout().is_term() {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        pb.set_message(message.to_string());
        Self { pb }
    }

    pub fn set_message(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
    }

    pub fn finish_with_message(&self, msg: &str) {
        self.pb.finish_with_message(msg.to_string());
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}

/// Closing line of an analysis run
pub fn finish_with_summary(duration: Duration, files: usize, nodes: usize, relationships: usize) {
    if is_quiet() {
        return;
    }
    println!();
    println!(
        "{} {}",
        Icons::CHECK.style(theme().success.clone()),
        format!("Complete in {}", HumanDuration(duration)).style(theme().success.clone())
    );
    println!(
        "  {} {}  {} {}  {} {}",
        Icons::FILE.style(theme().info.clone()),
        files,
        Icons::PACKAGE.style(theme().info.clone()),
        nodes,
        Icons::LINK.style(theme().info.clone()),
        relationships
    );
}

use indicatif::{HumanDuration, ProgressBar};
use std::time::{Duration, Instant};

use crate::output::is_quiet;

/// Spinner for blocking steps (schema creation, population)
pub struct Spinner {
    pb: ProgressBar,
    started: Instant,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if is_quiet() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        pb.set_message(message.to_string());
        if console::Term::stdout().is_term() {
            pb.enable_steady_tick(Duration::from_millis(100));
        }
        Self {
            pb,
            started: Instant::now(),
        }
    }

    pub fn finish_with_message(&self, msg: &str) {
        self.pb.finish_with_message(format!(
            "{} ({})",
            msg,
            HumanDuration(self.started.elapsed())
        ));
    }

    /// Remove the spinner line, e.g. before printing an error
    pub fn abandon(&self) {
        self.pb.finish_and_clear();
    }
}

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::viewer::LoadingIndicator;

#[derive(Default)]
struct SpinnerState {
    outstanding: usize,
    bar: Option<ProgressBar>,
}

/// Reference-counted spinner: visible while any `show` is outstanding.
#[derive(Default)]
pub struct SpinnerLoading {
    state: Mutex<SpinnerState>,
}

impl SpinnerLoading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `show` calls not yet matched by `hide`.
    pub fn outstanding(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .outstanding
    }
}

impl LoadingIndicator for SpinnerLoading {
    fn show(&self, message: &str) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.outstanding += 1;

        let bar = state.bar.get_or_insert_with(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });
        bar.set_message(message.to_string());
    }

    fn hide(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.outstanding = state.outstanding.saturating_sub(1);
        if state.outstanding == 0 {
            if let Some(bar) = state.bar.take() {
                bar.finish_and_clear();
            }
        }
    }
}

//! Load progress sinks. A sink sees `start(total)`, then one `update` per completed
//! write with the running count, then `stop` once every write has completed.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;

use crate::conf::ProgressKind;

pub trait Progress: Send + Sync {
    fn start(&self, total: usize);
    fn update(&self, completed: usize);
    fn stop(&self);
}

pub fn create_progress(kind: ProgressKind) -> Arc<dyn Progress> {
    match kind {
        ProgressKind::Bar => Arc::new(BarProgress::new()),
        ProgressKind::Log => Arc::new(LogProgress::default()),
        ProgressKind::None => Arc::new(NoProgress),
    }
}

/// Console bar on stderr.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::hidden();
        if let Ok(style) =
            ProgressStyle::with_template("{prefix:8} [{bar:40}] {percent:>3}% | {pos}/{len}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }
        bar.set_prefix("Loading");
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn start(&self, total: usize) {
        self.bar.reset();
        self.bar.set_length(total as u64);
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
    }

    fn update(&self, completed: usize) {
        self.bar.set_position(completed as u64);
    }

    fn stop(&self) {
        self.bar.finish();
        self.bar.set_draw_target(ProgressDrawTarget::hidden());
    }
}

/// Logs every tenth of the way.
#[derive(Default)]
pub struct LogProgress {
    total: AtomicUsize,
    last_decile: AtomicUsize,
}

impl Progress for LogProgress {
    fn start(&self, total: usize) {
        self.total.store(total, Ordering::SeqCst);
        self.last_decile.store(0, Ordering::SeqCst);
        info!("Loading {} movies", total);
    }

    fn update(&self, completed: usize) {
        let total = self.total.load(Ordering::SeqCst);
        if total == 0 {
            return;
        }
        let decile = completed * 10 / total;
        if decile > self.last_decile.fetch_max(decile, Ordering::SeqCst) {
            info!("Loaded {}/{} movies ({}%)", completed, total, decile * 10);
        }
    }

    fn stop(&self) {
        info!("Load finished");
    }
}

pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _total: usize) {}

    fn update(&self, _completed: usize) {}

    fn stop(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_progress_tracks_deciles() {
        let progress = LogProgress::default();
        progress.start(20);
        progress.update(1);
        assert_eq!(progress.last_decile.load(Ordering::SeqCst), 0);
        progress.update(4);
        assert_eq!(progress.last_decile.load(Ordering::SeqCst), 2);
        progress.update(3);
        assert_eq!(progress.last_decile.load(Ordering::SeqCst), 2);
        progress.update(20);
        assert_eq!(progress.last_decile.load(Ordering::SeqCst), 10);
        progress.stop();
    }

    #[test]
    fn test_log_progress_empty_load() {
        let progress = LogProgress::default();
        progress.start(0);
        progress.update(0);
        progress.stop();
        assert_eq!(progress.last_decile.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_bar_progress_position() {
        let progress = BarProgress::new();
        progress.start(3);
        progress.update(2);
        assert_eq!(progress.bar.position(), 2);
        assert_eq!(progress.bar.length(), Some(3));
        progress.stop();
        assert!(progress.bar.is_finished());
    }
}

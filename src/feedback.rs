//! User feedback during an export: progress reporting and error notices.
//!
//! The exporter is UI-agnostic. It reports through two capabilities:
//!
//! - [`Progress`]: a step counter with `begin`/`advance`/`end`. Always
//!   wrapped in a [`ProgressScope`] so `end` runs on every exit path,
//!   including early failure returns. Advancing is feedback only; it cannot
//!   abort or reorder the run.
//! - [`Notifier`]: `notify_error` surfaces a user-visible message without
//!   raising.
//!
//! [`ConsoleFeedback`] implements both for the CLI (indicatif bar + stderr);
//! [`Silent`] implements both as no-ops for tests and `--quiet` runs.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Step-counting progress capability.
pub trait Progress {
    fn begin(&self, title: &str, label: &str, total: usize);

    fn advance(&self);

    fn end(&self);
}

/// User-visible error reporting that does not abort anything by itself.
pub trait Notifier {
    fn notify_error(&self, message: &str);
}

/// RAII wrapper guaranteeing `end` on every exit path.
pub struct ProgressScope<'a> {
    sink: &'a dyn Progress,
}

impl<'a> ProgressScope<'a> {
    pub fn begin(sink: &'a dyn Progress, title: &str, label: &str, total: usize) -> Self {
        sink.begin(title, label, total);
        Self { sink }
    }

    pub fn advance(&self) {
        self.sink.advance();
    }
}

impl Drop for ProgressScope<'_> {
    fn drop(&mut self) {
        self.sink.end();
    }
}

/// Console implementation: a progress bar on stdout, errors on stderr.
#[derive(Default)]
pub struct ConsoleFeedback {
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleFeedback {
    pub fn new() -> Self {
        Self::default()
    }
}

fn bar_style() -> ProgressStyle {
    match ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        Ok(style) => style.progress_chars("##-"),
        Err(_) => ProgressStyle::default_bar(),
    }
}

impl Progress for ConsoleFeedback {
    fn begin(&self, title: &str, label: &str, total: usize) {
        println!("==> {}", title);
        let bar = ProgressBar::new(total as u64);
        bar.set_style(bar_style());
        bar.set_message(label.to_string());
        *self.bar.lock().unwrap() = Some(bar);
    }

    fn advance(&self) {
        if let Some(bar) = self.bar.lock().unwrap().as_ref() {
            bar.inc(1);
        }
    }

    fn end(&self) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }
}

impl Notifier for ConsoleFeedback {
    fn notify_error(&self, message: &str) {
        // Route around an active bar so the message is not overdrawn.
        let guard = self.bar.lock().unwrap();
        match guard.as_ref() {
            Some(bar) => bar.println(format!("Error: {}", message)),
            None => eprintln!("Error: {}", message),
        }
    }
}

/// No-op implementation of both capabilities.
pub struct Silent;

impl Progress for Silent {
    fn begin(&self, _title: &str, _label: &str, _total: usize) {}

    fn advance(&self) {}

    fn end(&self) {}
}

impl Notifier for Silent {
    fn notify_error(&self, _message: &str) {}
}

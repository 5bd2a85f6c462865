//! Threshold watchers over a single scroll metric.
//!
//! A [`ScrollWatcher`] is fed the current metric on every (throttled) scroll
//! event and reports a state only when it flips, so the DOM is touched once
//! per crossing instead of once per event.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Event;

use crate::context::Context;
use crate::dom::{self, Throttled};
use crate::error::{EffectError, EffectResult};

/// Which scroll metric a watcher compares against, and where it flips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Raw vertical offset of the window in CSS pixels.
    Pixels(f64),
    /// Normalized 0..1 progress reported by a page-wide ScrollTrigger.
    Progress(f64),
}

impl Threshold {
    pub fn limit(&self) -> f64 {
        match *self {
            Threshold::Pixels(limit) | Threshold::Progress(limit) => limit,
        }
    }

    pub fn is_progress(&self) -> bool {
        matches!(self, Threshold::Progress(_))
    }

    /// Strictly past the limit; sitting exactly on it does not count.
    pub fn is_past(&self, metric: f64) -> bool {
        metric > self.limit()
    }
}

#[derive(Debug, Clone)]
pub struct ScrollWatcher {
    threshold: Threshold,
    applied: Option<bool>,
}

impl ScrollWatcher {
    pub fn new(threshold: Threshold) -> Self {
        Self {
            threshold,
            applied: None,
        }
    }

    /// Returns the new state when it differs from the last one applied.
    /// The first observation always reports.
    pub fn observe(&mut self, metric: f64) -> Option<bool> {
        let past = self.threshold.is_past(metric);
        if self.applied == Some(past) {
            return None;
        }
        self.applied = Some(past);
        Some(past)
    }

    pub fn current(&self) -> Option<bool> {
        self.applied
    }
}

/// Calls `on_change` with the current state right away and then whenever the
/// threshold is crossed. Pixel thresholds listen to the throttled window
/// scroll; progress thresholds ride on a page-wide ScrollTrigger.
pub fn watch(
    ctx: &Rc<Context>,
    threshold: Threshold,
    mut on_change: impl FnMut(bool) + 'static,
) -> EffectResult {
    let watcher = RefCell::new(ScrollWatcher::new(threshold));
    match threshold {
        Threshold::Progress(_) => {
            let gsap = ctx.gsap().ok_or(EffectError::NeedsGsap("progress threshold"))?;
            gsap.watch_progress(move |progress| {
                if let Some(past) = watcher.borrow_mut().observe(progress) {
                    on_change(past);
                }
            })
        }
        Threshold::Pixels(_) => {
            let window = ctx.window.clone();
            let check = Throttled::new(ctx.config.throttle_ms, move || {
                if let Some(past) = watcher.borrow_mut().observe(dom::scroll_y(&window)) {
                    on_change(past);
                }
            });
            check.fire();
            dom::listen(&ctx.window, "scroll", move |_: Event| check.fire())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_threshold_is_strict() {
        let navbar = Threshold::Pixels(60.0);
        assert!(!navbar.is_past(0.0));
        assert!(!navbar.is_past(60.0));
        assert!(navbar.is_past(60.5));
        assert!(navbar.is_past(4000.0));
    }

    #[test]
    fn scroll_top_visibility_follows_offset_without_sticking() {
        let mut watcher = ScrollWatcher::new(Threshold::Pixels(300.0));
        assert_eq!(watcher.observe(250.0), Some(false));
        assert_eq!(watcher.observe(301.0), Some(true));
        assert_eq!(watcher.observe(100.0), Some(false));
        assert_eq!(watcher.current(), Some(false));
    }

    #[test]
    fn repeated_metrics_on_same_side_do_not_report() {
        let mut watcher = ScrollWatcher::new(Threshold::Pixels(60.0));
        assert_eq!(watcher.observe(70.0), Some(true));
        assert_eq!(watcher.observe(80.0), None);
        assert_eq!(watcher.observe(61.0), None);
        assert_eq!(watcher.observe(60.0), Some(false));
        assert_eq!(watcher.observe(10.0), None);
    }

    #[test]
    fn progress_mode_is_kept_apart_from_pixels() {
        let progress = Threshold::Progress(0.05);
        assert!(progress.is_progress());
        assert!(!Threshold::Pixels(0.05).is_progress());
        assert!(progress.is_past(0.06));
        assert!(!progress.is_past(0.05));
    }
}

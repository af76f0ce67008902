use serde::{Deserialize, Serialize};

/// One visibility notification for a watched target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEvent {
    /// Index of the watched target, assigned by the caller at watch time.
    pub target: usize,
    /// Fraction of the target currently visible, 0.0..=1.0.
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Strategy for learning when watched targets cross a visibility threshold.
///
/// Push implementations deliver [`IntersectionEvent`] batches to the sink
/// supplied at construction; the fallback variant reports synchronously from
/// `watch`. The sink returns the targets it is done with, which the watcher
/// should stop watching. Non-browser tests can substitute a manual or
/// polling watcher behind the same interface.
pub trait VisibilityWatcher {
    fn watch(&mut self, target: usize);
    fn unwatch(&mut self, target: usize);
    /// Stop watching everything and release any underlying resources.
    fn detach(&mut self);
}

/// Fallback for environments without intersection notifications: every
/// watched target is reported fully visible the moment it is watched.
pub struct ImmediateWatcher<F: FnMut(&[IntersectionEvent]) -> Vec<usize>> {
    sink: F,
}

impl<F: FnMut(&[IntersectionEvent]) -> Vec<usize>> ImmediateWatcher<F> {
    pub fn new(sink: F) -> Self {
        Self { sink }
    }
}

impl<F: FnMut(&[IntersectionEvent]) -> Vec<usize>> VisibilityWatcher for ImmediateWatcher<F> {
    fn watch(&mut self, target: usize) {
        // Nothing is actually being observed, so the unwatch list is moot.
        let _ = (self.sink)(&[IntersectionEvent {
            target,
            ratio: 1.0,
            is_intersecting: true,
        }]);
    }

    fn unwatch(&mut self, _target: usize) {}

    fn detach(&mut self) {}
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn immediate_watcher_reports_full_visibility_on_watch() {
        let seen: Rc<RefCell<Vec<IntersectionEvent>>> = Rc::default();
        let sink_seen = Rc::clone(&seen);
        let mut watcher = ImmediateWatcher::new(move |events: &[IntersectionEvent]| {
            sink_seen.borrow_mut().extend_from_slice(events);
            Vec::new()
        });

        watcher.watch(0);
        watcher.watch(3);
        watcher.unwatch(0);
        watcher.detach();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].target, 0);
        assert_eq!(seen[1].target, 3);
        assert!(seen.iter().all(|e| e.is_intersecting && e.ratio == 1.0));
    }
}

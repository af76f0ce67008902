use serde::Serialize;

use crate::command::{ClassToken, DomPatch, NodeRef};
use crate::watch::IntersectionEvent;

/// Visibility fraction a section must reach before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.12;

/// What a batch of intersection events asks the page to do.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevealOutcome {
    pub patches: Vec<DomPatch>,
    /// Targets whose reveal is done; the caller should stop watching them.
    pub unwatch: Vec<usize>,
}

/// One-shot reveal state for the page's content sections.
///
/// A section is revealed the first time it intersects past the watcher's
/// threshold and never un-revealed, however often it scrolls back out of
/// view afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Reveal {
    revealed: Vec<bool>,
}

impl Reveal {
    pub fn new(section_count: usize) -> Self {
        Self {
            revealed: vec![false; section_count],
        }
    }

    pub fn section_count(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_revealed(&self, section: usize) -> bool {
        self.revealed.get(section).copied().unwrap_or(false)
    }

    /// Process one observer batch. Already-revealed and unknown targets are
    /// skipped, so the `in-view` patch is emitted at most once per section.
    pub fn on_events(&mut self, events: &[IntersectionEvent]) -> RevealOutcome {
        let mut outcome = RevealOutcome::default();
        for event in events {
            if !event.is_intersecting {
                continue;
            }
            let Some(flag) = self.revealed.get_mut(event.target) else {
                continue;
            };
            if *flag {
                continue;
            }
            *flag = true;
            outcome.patches.push(DomPatch::AddClass {
                node: NodeRef::Section(event.target),
                class: ClassToken::InView,
            });
            outcome.unwatch.push(event.target);
        }
        outcome
    }

    /// Reveal every section at once, regardless of viewport state. Used by
    /// the no-observer fallback and the external debug surface.
    pub fn reveal_all(&mut self) -> Vec<DomPatch> {
        let mut patches = Vec::new();
        for (section, flag) in self.revealed.iter_mut().enumerate() {
            if !*flag {
                *flag = true;
                patches.push(DomPatch::AddClass {
                    node: NodeRef::Section(section),
                    class: ClassToken::InView,
                });
            }
        }
        patches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intersecting(target: usize) -> IntersectionEvent {
        IntersectionEvent {
            target,
            ratio: 0.5,
            is_intersecting: true,
        }
    }

    #[test]
    fn first_intersection_reveals_and_unwatches() {
        let mut reveal = Reveal::new(3);
        let outcome = reveal.on_events(&[intersecting(1)]);
        assert_eq!(
            outcome.patches,
            vec![DomPatch::AddClass {
                node: NodeRef::Section(1),
                class: ClassToken::InView,
            }]
        );
        assert_eq!(outcome.unwatch, vec![1]);
        assert!(reveal.is_revealed(1));
        assert!(!reveal.is_revealed(0));
    }

    #[test]
    fn re_entry_after_reveal_emits_nothing() {
        let mut reveal = Reveal::new(2);
        let first = reveal.on_events(&[intersecting(0)]);
        assert_eq!(first.patches.len(), 1);

        let second = reveal.on_events(&[intersecting(0)]);
        assert_eq!(second, RevealOutcome::default());
    }

    #[test]
    fn leaving_the_viewport_is_ignored() {
        let mut reveal = Reveal::new(1);
        let outcome = reveal.on_events(&[IntersectionEvent {
            target: 0,
            ratio: 0.0,
            is_intersecting: false,
        }]);
        assert_eq!(outcome, RevealOutcome::default());
        assert!(!reveal.is_revealed(0));
    }

    #[test]
    fn unknown_targets_are_skipped() {
        let mut reveal = Reveal::new(1);
        let outcome = reveal.on_events(&[intersecting(7)]);
        assert_eq!(outcome, RevealOutcome::default());
    }

    #[test]
    fn reveal_all_covers_only_unrevealed_sections() {
        let mut reveal = Reveal::new(3);
        let _ = reveal.on_events(&[intersecting(1)]);

        let patches = reveal.reveal_all();
        assert_eq!(patches.len(), 2);
        assert!((0..3).all(|s| reveal.is_revealed(s)));

        // Second invocation has nothing left to do.
        assert!(reveal.reveal_all().is_empty());
    }
}

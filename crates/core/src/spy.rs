use std::collections::HashMap;

use serde::Serialize;

use crate::anchor::fragment_id;
use crate::command::{ClassToken, DomPatch, NodeRef};

/// Visibility fraction a section must reach to claim the active nav link.
pub const SPY_THRESHOLD: f64 = 0.56;

/// One observer notification for the scrollspy, keyed by section id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpyEvent<'a> {
    pub section_id: &'a str,
    pub is_intersecting: bool,
}

/// Highlights the navigation link matching the section currently in view.
#[derive(Debug, Clone, Serialize)]
pub struct Scrollspy {
    link_count: usize,
    id_to_link: HashMap<String, usize>,
    active: Option<usize>,
}

impl Scrollspy {
    /// Build the section-id → link-index mapping from the nav links'
    /// fragment hrefs. `link_hrefs` must be in document order, one entry per
    /// link (non-fragment hrefs get no mapping but keep their slot).
    ///
    /// Returns `None` when there is nothing to spy on — no sections or no
    /// links — and the whole component should stay unwired.
    pub fn new(section_count: usize, link_hrefs: &[impl AsRef<str>]) -> Option<Self> {
        if section_count == 0 || link_hrefs.is_empty() {
            return None;
        }
        let mut id_to_link = HashMap::new();
        for (link, href) in link_hrefs.iter().enumerate() {
            if let Some(id) = fragment_id(href.as_ref()) {
                id_to_link.insert(id.to_owned(), link);
            }
        }
        Some(Self {
            link_count: link_hrefs.len(),
            id_to_link,
            active: None,
        })
    }

    pub fn active_link(&self) -> Option<usize> {
        self.active
    }

    /// Process one observer batch in delivery order.
    ///
    /// Each intersecting event clears the active class from every link and
    /// then marks the mapped link, so the last intersecting entry in the
    /// batch wins. That last-writer-wins behavior is inherited from the
    /// page's previous implementation and preserved deliberately.
    pub fn on_events(&mut self, events: &[SpyEvent<'_>]) -> Vec<DomPatch> {
        let mut patches = Vec::new();
        for event in events {
            if !event.is_intersecting {
                continue;
            }
            for link in 0..self.link_count {
                patches.push(DomPatch::RemoveClass {
                    node: NodeRef::NavLink(link),
                    class: ClassToken::Active,
                });
            }
            self.active = self.id_to_link.get(event.section_id).copied();
            if let Some(link) = self.active {
                patches.push(DomPatch::AddClass {
                    node: NodeRef::NavLink(link),
                    class: ClassToken::Active,
                });
            }
        }
        patches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spy() -> Scrollspy {
        Scrollspy::new(3, &["#home", "#work", "#contact"]).expect("non-empty inputs")
    }

    /// Fold patches into per-link active flags, the way the DOM would.
    fn apply(patches: &[DomPatch], link_count: usize) -> Vec<bool> {
        let mut active = vec![false; link_count];
        for patch in patches {
            match patch {
                DomPatch::AddClass {
                    node: NodeRef::NavLink(link),
                    class: ClassToken::Active,
                } => active[*link] = true,
                DomPatch::RemoveClass {
                    node: NodeRef::NavLink(link),
                    class: ClassToken::Active,
                } => active[*link] = false,
                other => panic!("unexpected patch {other:?}"),
            }
        }
        active
    }

    #[test]
    fn empty_inputs_disable_the_component() {
        assert!(Scrollspy::new(0, &["#home"]).is_none());
        let no_links: &[&str] = &[];
        assert!(Scrollspy::new(3, no_links).is_none());
    }

    #[test]
    fn intersecting_section_activates_its_link() {
        let mut spy = spy();
        let patches = spy.on_events(&[SpyEvent {
            section_id: "work",
            is_intersecting: true,
        }]);
        assert_eq!(apply(&patches, 3), vec![false, true, false]);
        assert_eq!(spy.active_link(), Some(1));
    }

    #[test]
    fn last_intersecting_entry_in_a_batch_wins() {
        let mut spy = spy();
        let patches = spy.on_events(&[
            SpyEvent {
                section_id: "home",
                is_intersecting: true,
            },
            SpyEvent {
                section_id: "contact",
                is_intersecting: true,
            },
        ]);
        assert_eq!(apply(&patches, 3), vec![false, false, true]);
        assert_eq!(spy.active_link(), Some(2));
    }

    #[test]
    fn non_intersecting_entries_change_nothing() {
        let mut spy = spy();
        let _ = spy.on_events(&[SpyEvent {
            section_id: "home",
            is_intersecting: true,
        }]);
        let patches = spy.on_events(&[SpyEvent {
            section_id: "work",
            is_intersecting: false,
        }]);
        assert!(patches.is_empty());
        assert_eq!(spy.active_link(), Some(0));
    }

    #[test]
    fn unmapped_section_clears_every_link() {
        let mut spy = spy();
        let _ = spy.on_events(&[SpyEvent {
            section_id: "home",
            is_intersecting: true,
        }]);
        let patches = spy.on_events(&[SpyEvent {
            section_id: "no-such-link",
            is_intersecting: true,
        }]);
        assert_eq!(apply(&patches, 3), vec![false, false, false]);
        assert_eq!(spy.active_link(), None);
    }

    #[test]
    fn non_fragment_hrefs_keep_link_slots_aligned() {
        // An external link in the nav must not shift later mappings.
        let mut spy =
            Scrollspy::new(2, &["https://example.com", "#work"]).expect("non-empty inputs");
        let patches = spy.on_events(&[SpyEvent {
            section_id: "work",
            is_intersecting: true,
        }]);
        assert_eq!(apply(&patches, 2), vec![false, true]);
    }
}

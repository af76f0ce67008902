use crate::command::{ClassToken, DomPatch, NodeRef};

/// Scroll offset above which the nav bar gets its scrolled styling.
pub const NAV_SCROLL_THRESHOLD_PX: f64 = 24.0;

/// Patch for the current vertical scroll offset. Strictly above the
/// threshold adds the class; at or below removes it. Emitted on every
/// scroll event and once at startup.
pub fn nav_patch(offset_px: f64) -> DomPatch {
    if offset_px > NAV_SCROLL_THRESHOLD_PX {
        DomPatch::AddClass {
            node: NodeRef::NavBar,
            class: ClassToken::Scrolled,
        }
    } else {
        DomPatch::RemoveClass {
            node: NodeRef::NavBar,
            class: ClassToken::Scrolled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_add(patch: &DomPatch) -> bool {
        matches!(
            patch,
            DomPatch::AddClass {
                node: NodeRef::NavBar,
                class: ClassToken::Scrolled,
            }
        )
    }

    #[test]
    fn crossing_the_threshold_adds_then_removes() {
        assert!(!is_add(&nav_patch(10.0)));
        assert!(is_add(&nav_patch(30.0)));
        assert!(!is_add(&nav_patch(10.0)));
    }

    #[test]
    fn threshold_itself_is_not_scrolled() {
        assert!(!is_add(&nav_patch(24.0)));
        assert!(is_add(&nav_patch(24.5)));
        assert!(!is_add(&nav_patch(0.0)));
    }
}

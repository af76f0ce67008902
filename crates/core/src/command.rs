use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Addressable parts of the page's DOM contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRef {
    /// The document root element (`<html>`).
    Root,
    Body,
    NavBar,
    ThemeToggle,
    /// Content section by index, in document order.
    Section(usize),
    /// Navigation link by index, in document order.
    NavLink(usize),
}

/// Semantic class names toggled by the components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassToken {
    InView,
    Scrolled,
    Active,
    UserIsTabbing,
}

impl ClassToken {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassToken::InView => "in-view",
            ClassToken::Scrolled => "scrolled",
            ClassToken::Active => "active",
            ClassToken::UserIsTabbing => "user-is-tabbing",
        }
    }
}

/// A single, stateless DOM mutation.
///
/// Components emit a `Vec<DomPatch>` per event; the web layer applies the
/// list sequentially. Every patch is idempotent, so re-applying a batch is
/// harmless, but order within a batch is significant (the scrollspy relies
/// on a trailing `AddClass` winning over earlier `RemoveClass` entries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomPatch {
    AddClass { node: NodeRef, class: ClassToken },
    RemoveClass { node: NodeRef, class: ClassToken },
    /// Set the root theme marker attribute to the given theme.
    SetThemeAttribute { value: Theme },
    /// Remove the root theme marker attribute entirely.
    ClearThemeAttribute,
    /// Replace the toggle control's displayed glyph.
    SetToggleGlyph { glyph: char },
    /// Write the theme preference to durable storage.
    PersistTheme { theme: Theme },
}

//! DOM-free behavior logic for pagefx.
//!
//! Each page behavior is a small component that consumes plain-data events
//! (clicks, scroll offsets, intersection batches) and emits [`DomPatch`]
//! commands. The `pagefx-web` crate owns the actual DOM: it feeds events in
//! and applies the patches that come back, which keeps everything here
//! testable without a browser.

pub mod anchor;
pub mod command;
pub mod focus;
pub mod navbar;
pub mod reveal;
pub mod spy;
pub mod theme;
pub mod watch;

pub use command::{ClassToken, DomPatch, NodeRef};
pub use theme::{Theme, ThemeController};
pub use watch::{ImmediateWatcher, IntersectionEvent, VisibilityWatcher};

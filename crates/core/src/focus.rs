use crate::command::{ClassToken, DomPatch, NodeRef};

/// Marks the body on the first Tab press so CSS can scope focus outlines to
/// keyboard users. The class is never removed.
pub fn tab_patch(key: &str) -> Option<DomPatch> {
    (key == "Tab").then_some(DomPatch::AddClass {
        node: NodeRef::Body,
        class: ClassToken::UserIsTabbing,
    })
}

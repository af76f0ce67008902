use pagefx_core::theme;
use pagefx_core::{DomPatch, NodeRef, Theme};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

/// Selectors and names making up the page's DOM contract.
pub const SECTION_SELECTOR: &str = ".content-section";
pub const SPY_SECTION_SELECTOR: &str = "main .content-section[id]";
pub const NAV_SELECTOR: &str = ".top-nav";
pub const NAV_LINK_SELECTOR: &str = ".nav-links a";
pub const TOGGLE_ID: &str = "theme-toggle";
pub const THEME_ATTR: &str = "data-theme";

/// Element handles resolved once at startup.
///
/// Every optional handle reflects a part of the contract the page is
/// allowed to omit; patches addressed at an absent node are skipped.
pub struct PageDom {
    window: Window,
    document: Document,
    root: Element,
    body: Option<Element>,
    nav_bar: Option<Element>,
    theme_toggle: Option<Element>,
    sections: Vec<Element>,
    spy_sections: Vec<Element>,
    nav_links: Vec<Element>,
}

impl PageDom {
    pub fn resolve() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| JsValue::from_str("no document element"))?;
        let body = document.body().map(Element::from);
        let nav_bar = document.query_selector(NAV_SELECTOR)?;
        let theme_toggle = document.get_element_by_id(TOGGLE_ID);
        let sections = query_all(&document, SECTION_SELECTOR)?;
        let spy_sections = query_all(&document, SPY_SECTION_SELECTOR)?;
        let nav_links = query_all(&document, NAV_LINK_SELECTOR)?;
        Ok(Self {
            window,
            document,
            root,
            body,
            nav_bar,
            theme_toggle,
            sections,
            spy_sections,
            nav_links,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn nav_bar(&self) -> Option<&Element> {
        self.nav_bar.as_ref()
    }

    pub fn theme_toggle(&self) -> Option<&Element> {
        self.theme_toggle.as_ref()
    }

    /// Sections watched for the one-shot reveal, in document order.
    pub fn sections(&self) -> &[Element] {
        &self.sections
    }

    /// Sections watched by the scrollspy; a subset carrying ids inside
    /// `main`, so indices differ from [`Self::sections`].
    pub fn spy_sections(&self) -> &[Element] {
        &self.spy_sections
    }

    pub fn nav_links(&self) -> &[Element] {
        &self.nav_links
    }

    /// Current vertical scroll offset in CSS pixels.
    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    /// Previously persisted theme, if storage is reachable and the stored
    /// value parses. Anything else reads as "no preference".
    pub fn persisted_theme(&self) -> Option<Theme> {
        let storage = self.window.local_storage().ok().flatten()?;
        let value = storage.get_item(theme::STORAGE_KEY).ok().flatten()?;
        value.parse().ok()
    }

    /// OS-level dark-scheme preference via `matchMedia`.
    pub fn os_prefers_dark(&self) -> bool {
        self.window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    /// Apply a batch of patches in order.
    pub fn apply(&self, patches: &[DomPatch]) {
        for patch in patches {
            self.apply_one(patch);
        }
    }

    fn apply_one(&self, patch: &DomPatch) {
        match patch {
            DomPatch::AddClass { node, class } => {
                if let Some(element) = self.node(*node) {
                    let _ = element.class_list().add_1(class.as_str());
                }
            }
            DomPatch::RemoveClass { node, class } => {
                if let Some(element) = self.node(*node) {
                    let _ = element.class_list().remove_1(class.as_str());
                }
            }
            DomPatch::SetThemeAttribute { value } => {
                let _ = self.root.set_attribute(THEME_ATTR, value.as_str());
            }
            DomPatch::ClearThemeAttribute => {
                let _ = self.root.remove_attribute(THEME_ATTR);
            }
            DomPatch::SetToggleGlyph { glyph } => {
                if let Some(toggle) = &self.theme_toggle {
                    toggle.set_text_content(Some(&glyph.to_string()));
                }
            }
            DomPatch::PersistTheme { theme } => {
                if let Ok(Some(storage)) = self.window.local_storage() {
                    let _ = storage.set_item(theme::STORAGE_KEY, theme.as_str());
                }
            }
        }
    }

    fn node(&self, node: NodeRef) -> Option<&Element> {
        match node {
            NodeRef::Root => Some(&self.root),
            NodeRef::Body => self.body.as_ref(),
            NodeRef::NavBar => self.nav_bar.as_ref(),
            NodeRef::ThemeToggle => self.theme_toggle.as_ref(),
            NodeRef::Section(index) => self.sections.get(index),
            NodeRef::NavLink(index) => self.nav_links.get(index),
        }
    }
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    let mut elements = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        if let Some(node) = list.item(index)
            && let Ok(element) = node.dyn_into::<Element>()
        {
            elements.push(element);
        }
    }
    Ok(elements)
}

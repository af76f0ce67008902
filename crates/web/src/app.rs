use std::cell::RefCell;
use std::rc::Rc;

use pagefx_core::reveal::{REVEAL_THRESHOLD, Reveal};
use pagefx_core::spy::{SPY_THRESHOLD, Scrollspy, SpyEvent};
use pagefx_core::{
    ImmediateWatcher, IntersectionEvent, Theme, ThemeController, VisibilityWatcher, anchor, focus,
    navbar,
};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::dom::PageDom;
use crate::listen::Subscription;
use crate::observe::{self, ObserverWatcher};

/// Component state exported through the debug surface.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub theme: Option<Theme>,
    pub revealed: Vec<bool>,
    pub active_link: Option<usize>,
}

/// All page behaviors, wired and live.
///
/// Construction queries the DOM contract once and registers every listener
/// and observer; `detach` tears all of it down again. Components whose
/// contract elements are missing stay unwired, leaving the rest intact.
pub struct Enhancements {
    dom: Rc<PageDom>,
    theme: Option<Rc<RefCell<ThemeController>>>,
    reveal: Rc<RefCell<Reveal>>,
    reveal_watcher: Box<dyn VisibilityWatcher>,
    spy: Option<Rc<RefCell<Scrollspy>>>,
    spy_watcher: Option<Box<dyn VisibilityWatcher>>,
    subscriptions: Vec<Subscription>,
}

impl Enhancements {
    pub fn attach() -> Result<Self, JsValue> {
        let dom = Rc::new(PageDom::resolve()?);
        let mut subscriptions = Vec::new();

        subscriptions.push(anchor_subscription(&dom)?);

        let theme = theme_component(&dom, &mut subscriptions)?;

        if dom.nav_bar().is_some() {
            subscriptions.push(nav_subscription(&dom)?);
            dom.apply(&[navbar::nav_patch(dom.scroll_y())]);
        }

        let reveal = Rc::new(RefCell::new(Reveal::new(dom.sections().len())));
        let reveal_watcher = reveal_watcher(&dom, &reveal)?;

        let (spy, spy_watcher) = spy_component(&dom)?;

        subscriptions.push(tab_subscription(&dom)?);

        Ok(Self {
            dom,
            theme,
            reveal,
            reveal_watcher,
            spy,
            spy_watcher,
            subscriptions,
        })
    }

    /// Force-reveal every section immediately, bypassing the observer.
    pub fn reveal_now(&mut self) {
        let patches = self.reveal.borrow_mut().reveal_all();
        self.dom.apply(&patches);
        for section in 0..self.dom.sections().len() {
            self.reveal_watcher.unwatch(section);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let reveal = self.reveal.borrow();
        Snapshot {
            theme: self.theme.as_ref().map(|t| t.borrow().active()),
            revealed: (0..reveal.section_count())
                .map(|s| reveal.is_revealed(s))
                .collect(),
            active_link: self.spy.as_ref().and_then(|s| s.borrow().active_link()),
        }
    }

    /// Remove every listener and disconnect both observers.
    pub fn detach(mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.detach();
        }
        self.reveal_watcher.detach();
        if let Some(watcher) = self.spy_watcher.as_mut() {
            watcher.detach();
        }
    }
}

/// Document-level click listener for same-page fragment links. Clicks whose
/// nearest enclosing anchor has no usable fragment, or whose target id does
/// not exist, fall through to the browser default.
fn anchor_subscription(dom: &Rc<PageDom>) -> Result<Subscription, JsValue> {
    let cb_dom = Rc::clone(dom);
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(target) = event.target() else { return };
        let Ok(element) = target.dyn_into::<Element>() else {
            return;
        };
        let Ok(Some(link)) = element.closest("a") else {
            return;
        };
        let Some(href) = link.get_attribute("href") else {
            return;
        };
        let Some(id) = anchor::fragment_id(&href) else {
            return;
        };
        let Some(destination) = cb_dom.document().get_element_by_id(id) else {
            return;
        };
        event.prevent_default();
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        destination.scroll_into_view_with_scroll_into_view_options(&options);
        // Update the visible fragment without a navigation jump.
        if let Ok(history) = cb_dom.window().history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&href));
        }
    });
    Subscription::new(dom.document().as_ref(), "click", callback)
}

/// Theme toggle wiring. The whole component stays unwired when the toggle
/// control is absent from the page.
fn theme_component(
    dom: &Rc<PageDom>,
    subscriptions: &mut Vec<Subscription>,
) -> Result<Option<Rc<RefCell<ThemeController>>>, JsValue> {
    let Some(toggle) = dom.theme_toggle() else {
        return Ok(None);
    };

    let (controller, patches) = ThemeController::init(dom.persisted_theme(), dom.os_prefers_dark());
    dom.apply(&patches);

    let controller = Rc::new(RefCell::new(controller));
    let cb_dom = Rc::clone(dom);
    let cb_controller = Rc::clone(&controller);
    let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        let patches = cb_controller.borrow_mut().toggle();
        cb_dom.apply(&patches);
    });
    subscriptions.push(Subscription::new(toggle.as_ref(), "click", callback)?);
    Ok(Some(controller))
}

/// Passive scroll listener keeping the nav bar's scrolled class in sync.
fn nav_subscription(dom: &Rc<PageDom>) -> Result<Subscription, JsValue> {
    let cb_dom = Rc::clone(dom);
    let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        cb_dom.apply(&[navbar::nav_patch(cb_dom.scroll_y())]);
    });
    Subscription::new_passive(dom.window().as_ref(), "scroll", callback)
}

/// Keydown listener marking the body on the first Tab press.
fn tab_subscription(dom: &Rc<PageDom>) -> Result<Subscription, JsValue> {
    let cb_dom = Rc::clone(dom);
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if let Some(patch) = focus::tab_patch(&key_event.key()) {
            cb_dom.apply(&[patch]);
        }
    });
    Subscription::new(dom.document().as_ref(), "keydown", callback)
}

/// One-shot reveal wiring: an observer at the reveal threshold, or the
/// immediate fallback when the browser has no `IntersectionObserver`.
fn reveal_watcher(
    dom: &Rc<PageDom>,
    reveal: &Rc<RefCell<Reveal>>,
) -> Result<Box<dyn VisibilityWatcher>, JsValue> {
    let cb_dom = Rc::clone(dom);
    let cb_reveal = Rc::clone(reveal);
    let sink = move |events: &[IntersectionEvent]| {
        let outcome = cb_reveal.borrow_mut().on_events(events);
        cb_dom.apply(&outcome.patches);
        outcome.unwatch
    };

    let mut watcher: Box<dyn VisibilityWatcher> = if observe::observer_supported() {
        Box::new(ObserverWatcher::new(
            dom.sections(),
            REVEAL_THRESHOLD,
            sink,
        )?)
    } else {
        Box::new(ImmediateWatcher::new(sink))
    };
    for section in 0..dom.sections().len() {
        watcher.watch(section);
    }
    Ok(watcher)
}

/// Scrollspy wiring. Unwired entirely when the page has no spy sections or
/// no nav links; without observer support it stays constructed but inert,
/// never highlighting anything.
#[allow(clippy::type_complexity)]
fn spy_component(
    dom: &Rc<PageDom>,
) -> Result<(Option<Rc<RefCell<Scrollspy>>>, Option<Box<dyn VisibilityWatcher>>), JsValue> {
    let section_ids: Vec<String> = dom.spy_sections().iter().map(|el| el.id()).collect();
    let hrefs: Vec<String> = dom
        .nav_links()
        .iter()
        .map(|link| link.get_attribute("href").unwrap_or_default())
        .collect();

    let Some(spy) = Scrollspy::new(section_ids.len(), &hrefs) else {
        return Ok((None, None));
    };
    let spy = Rc::new(RefCell::new(spy));

    if !observe::observer_supported() {
        return Ok((Some(spy), None));
    }

    let cb_dom = Rc::clone(dom);
    let cb_spy = Rc::clone(&spy);
    let sink = move |events: &[IntersectionEvent]| {
        let batch: Vec<SpyEvent<'_>> = events
            .iter()
            .filter_map(|event| {
                section_ids.get(event.target).map(|id| SpyEvent {
                    section_id: id.as_str(),
                    is_intersecting: event.is_intersecting,
                })
            })
            .collect();
        let patches = cb_spy.borrow_mut().on_events(&batch);
        cb_dom.apply(&patches);
        Vec::new()
    };

    let mut watcher = ObserverWatcher::new(dom.spy_sections(), SPY_THRESHOLD, sink)?;
    for section in 0..dom.spy_sections().len() {
        watcher.watch(section);
    }
    Ok((Some(spy), Some(Box::new(watcher))))
}

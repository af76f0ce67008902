use pagefx_core::{IntersectionEvent, VisibilityWatcher};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

/// Whether the browser exposes `IntersectionObserver` at all. When it does
/// not, callers fall back to [`pagefx_core::ImmediateWatcher`].
pub fn observer_supported() -> bool {
    web_sys::window().is_some_and(|window| {
        js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false)
    })
}

/// Threshold-push watcher over the browser's `IntersectionObserver`.
///
/// Targets are element handles supplied up front; `watch`/`unwatch` take an
/// index into that list, and the observer callback translates entries back
/// to indices before handing the batch to the sink. Targets the sink
/// reports as done are unobserved right away, using the observer handle the
/// browser passes into the callback.
pub struct ObserverWatcher {
    observer: IntersectionObserver,
    targets: Vec<Element>,
    // Keeps the JS-side callback alive for the observer's lifetime.
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl ObserverWatcher {
    pub fn new(
        targets: &[Element],
        threshold: f64,
        mut sink: impl FnMut(&[IntersectionEvent]) -> Vec<usize> + 'static,
    ) -> Result<Self, JsValue> {
        let lookup: Vec<Element> = targets.to_vec();
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let mut batch = Vec::new();
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let element = entry.target();
                    let Some(target) = lookup
                        .iter()
                        .position(|t| js_sys::Object::is(t.as_ref(), element.as_ref()))
                    else {
                        continue;
                    };
                    batch.push(IntersectionEvent {
                        target,
                        ratio: entry.intersection_ratio(),
                        is_intersecting: entry.is_intersecting(),
                    });
                }
                if batch.is_empty() {
                    return;
                }
                for done in sink(&batch) {
                    if let Some(element) = lookup.get(done) {
                        observer.unobserve(element);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Self {
            observer,
            targets: targets.to_vec(),
            _callback: callback,
        })
    }
}

impl VisibilityWatcher for ObserverWatcher {
    fn watch(&mut self, target: usize) {
        if let Some(element) = self.targets.get(target) {
            self.observer.observe(element);
        }
    }

    fn unwatch(&mut self, target: usize) {
        if let Some(element) = self.targets.get(target) {
            self.observer.unobserve(element);
        }
    }

    fn detach(&mut self) {
        self.observer.disconnect();
    }
}

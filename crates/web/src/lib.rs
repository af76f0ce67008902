//! WASM bridge for pagefx.
//!
//! `start()` runs when the module is instantiated: it resolves the page's
//! DOM contract once, builds the behavior components, and wires them to
//! browser events. All decision logic lives in `pagefx-core`; this crate
//! only moves events in and applies the patches that come back.

mod app;
mod dom;
mod listen;
mod observe;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::Enhancements;

thread_local! {
    static INSTANCE: RefCell<Option<Enhancements>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    match Enhancements::attach() {
        Ok(enhancements) => {
            INSTANCE.with(|slot| {
                *slot.borrow_mut() = Some(enhancements);
            });
        }
        Err(error) => {
            // A missing contract never breaks the page, so only broken
            // startup (no window/document) lands here. Log and carry on.
            web_sys::console::error_1(&format!("pagefx failed to start: {error:?}").into());
        }
    }
    Ok(())
}

/// Debug surface: reveal every content section immediately, bypassing the
/// intersection observer.
#[wasm_bindgen]
pub fn reveal_now() {
    INSTANCE.with(|slot| {
        if let Some(enhancements) = slot.borrow_mut().as_mut() {
            enhancements.reveal_now();
        }
    });
}

/// Debug surface: current component state (active theme, per-section reveal
/// flags, active nav link) as JSON.
#[wasm_bindgen]
pub fn debug_snapshot() -> Result<String, JsError> {
    INSTANCE.with(|slot| match slot.borrow().as_ref() {
        Some(enhancements) => serde_json::to_string(&enhancements.snapshot())
            .map_err(|error| JsError::new(&error.to_string())),
        None => Err(JsError::new("pagefx is not running")),
    })
}

/// Remove every listener and observer. Useful for harnesses that mount and
/// unmount the page repeatedly; never called in a normal page lifetime.
#[wasm_bindgen]
pub fn detach() {
    INSTANCE.with(|slot| {
        if let Some(enhancements) = slot.borrow_mut().take() {
            enhancements.detach();
        }
    });
}

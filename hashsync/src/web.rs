use crate::{
    context::{HashChange, NavigationContext, Subscription},
    error::JsErrorExt,
    Callback, Error,
};
use log::{trace, warn};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{HashChangeEvent, Window};

const HASH_CHANGE: &str = "hashchange";

/// [`NavigationContext`] backed by the browser's `window.location` and
/// `window.history`.
///
/// Browser exceptions are logged and otherwise ignored, so navigation stays
/// infallible.
#[derive(Debug, Clone)]
pub struct WebNavigation {
    window: Window,
}

impl WebNavigation {
    /// Uses the global `window`.
    pub fn new() -> Result<Self, Error> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        Ok(Self { window })
    }

    /// Uses the given window, e.g. one of an iframe.
    pub fn from_window(window: Window) -> Self {
        Self { window }
    }
}

impl NavigationContext for WebNavigation {
    fn hash(&self) -> String {
        self.window.location().hash().efix().unwrap_or_else(|err| {
            warn!("failed to read location.hash: {err}");
            String::new()
        })
    }

    fn set_hash(&self, fragment: &str) {
        if let Err(err) = self.window.location().set_hash(fragment).efix() {
            warn!("failed to set location.hash to {fragment:?}: {err}");
        }
    }

    fn go_back(&self) {
        let result = self
            .window
            .history()
            .efix()
            .and_then(|history| history.back().efix());
        if let Err(err) = result {
            warn!("failed to go back in history: {err}");
        }
    }

    fn subscribe(&self, listener: Callback<HashChange>) -> Subscription {
        let closure: Closure<dyn FnMut(HashChangeEvent)> =
            Closure::wrap(Box::new(move |event: HashChangeEvent| {
                let change = HashChange {
                    old_hash: hash_of(&event.old_url()),
                    new_hash: hash_of(&event.new_url()),
                };
                trace!("hashchange event: {change:?}");
                listener.emit(change);
            }));

        let function: &js_sys::Function = closure.as_ref().unchecked_ref();
        if let Err(err) = self
            .window
            .add_event_listener_with_callback(HASH_CHANGE, function)
            .efix()
        {
            warn!("failed to add hashchange listener: {err}");
        }

        let window = self.window.clone();
        Subscription::new(move || {
            let function: &js_sys::Function = closure.as_ref().unchecked_ref();
            if let Err(err) = window
                .remove_event_listener_with_callback(HASH_CHANGE, function)
                .efix()
            {
                warn!("failed to remove hashchange listener: {err}");
            }
            // the listener is gone, so the closure can be freed
            drop(closure);
        })
    }
}

/// The `location.hash` a url would have.
fn hash_of(url: &str) -> String {
    match url.find('#') {
        Some(index) if index + 1 < url.len() => url[index..].to_owned(),
        _ => String::new(),
    }
}

//! Browser environment facade: `localStorage` and full-page navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists the legacy bearer token and starts OAuth by
//! leaving the SPA. Both go through [`Browser`] so the store can be tested
//! without a DOM. Outside the browser `WebBrowser` reads nothing and no-ops.

/// Durable storage plus top-level navigation.
pub trait Browser {
    fn storage_get(&self, key: &str) -> Option<String>;
    fn storage_set(&self, key: &str, value: &str);
    fn storage_remove(&self, key: &str);
    /// Replace the whole document with `url` (leaves the SPA).
    fn redirect(&self, url: &str);
}

/// The real `window`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebBrowser;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl Browser for WebBrowser {
    fn storage_get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn storage_set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("browser: localStorage unavailable, {key} not saved");
                return;
            };
            if storage.set_item(key, value).is_err() {
                log::warn!("browser: failed to write {key}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn storage_remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }

    fn redirect(&self, url: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(url);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = url;
        }
    }
}

/// IANA zone reported by `Intl.DateTimeFormat`, if the runtime exposes one.
pub fn local_time_zone() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let format = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new());
        let options = format.resolved_options();
        js_sys::Reflect::get(&options, &wasm_bindgen::JsValue::from_str("timeZone"))
            .ok()
            .and_then(|value| value.as_string())
            .filter(|zone| !zone.is_empty())
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

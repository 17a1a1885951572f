// Console logging and browser storage helpers shared by the UI and the run loop.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
pub fn clog(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clog(msg: &str) {
    eprintln!("{msg}");
}

#[cfg(target_arch = "wasm32")]
pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn cwarn(msg: &str) {
    eprintln!("warning: {msg}");
}

/// Formats a simulated duration as `12.5s` or `1:05`.
pub fn format_time(ms: u64) -> String {
    let secs = ms / 1000;
    let m = secs / 60;
    let s = secs % 60;
    if m > 0 {
        format!("{}:{:02}", m, s)
    } else {
        format!("{}.{}s", s, (ms % 1000) / 100)
    }
}

pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|win| win.local_storage().ok().flatten())
}

pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = local_storage()?.get_item(key).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            cwarn(&format!("ignoring stored {key}: {e}"));
            None
        }
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    let Some(store) = local_storage() else { return false };
    match serde_json::to_string(value) {
        Ok(s) => store.set_item(key, &s).is_ok(),
        Err(e) => {
            cwarn(&format!("could not serialize {key}: {e}"));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_short_and_long_runs() {
        assert_eq!(format_time(0), "0.0s");
        assert_eq!(format_time(2500), "2.5s");
        assert_eq!(format_time(65_000), "1:05");
    }
}

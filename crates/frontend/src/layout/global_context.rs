use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::BTreeMap;
use web_sys::window;

const TAB_QUERY_KEY: &str = "tab";
const TAB_STORAGE_KEY: &str = "booking-form-tab";

/// App-wide UI state: the active tab of the booking form survives reloads
/// through the `?tab=` query and localStorage.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active_tab: RwSignal<Option<String>>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active_tab: RwSignal::new(None),
        }
    }

    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let stored = window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(TAB_STORAGE_KEY).ok().flatten());

        if let Some(tab) = restore_tab(&search, stored) {
            log::debug!("restoring tab '{}'", tab);
            self.active_tab.set(Some(tab));
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(tab) = this.active_tab.get() else {
                return;
            };

            if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
                let _ = storage.set_item(TAB_STORAGE_KEY, &tab);
            }

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            let new_url = tab_query(&current_search, &tab);

            // Only update URL if it actually changed
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn activate_tab(&self, key: &str) {
        self.active_tab.set(Some(key.to_string()));
    }

    /// Active tab when it is one of `known`, else `default`
    pub fn active_or(&self, known: &[&'static str], default: &'static str) -> &'static str {
        self.active_tab.with(|active| {
            active
                .as_deref()
                .and_then(|a| known.iter().copied().find(|k| *k == a))
                .unwrap_or(default)
        })
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_query(search: &str) -> BTreeMap<String, String> {
    serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
}

/// `?tab=` wins over the stored value; blanks are ignored.
fn restore_tab(search: &str, stored: Option<String>) -> Option<String> {
    parse_query(search)
        .remove(TAB_QUERY_KEY)
        .filter(|t| !t.trim().is_empty())
        .or_else(|| stored.filter(|t| !t.trim().is_empty()))
}

/// Query string with `tab` set, other parameters kept.
fn tab_query(search: &str, tab: &str) -> String {
    let mut params = parse_query(search);
    params.insert(TAB_QUERY_KEY.to_string(), tab.to_string());
    format!("?{}", serde_qs::to_string(&params).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_prefers_query() {
        assert_eq!(
            restore_tab("?tab=materials", Some("route".into())),
            Some("materials".to_string())
        );
        assert_eq!(restore_tab("", Some("route".into())), Some("route".to_string()));
        assert_eq!(restore_tab("?tab=", Some(" ".into())), None);
        assert_eq!(restore_tab("?other=1", None), None);
    }

    #[test]
    fn test_tab_query_keeps_other_params() {
        assert_eq!(tab_query("", "review"), "?tab=review");
        assert_eq!(tab_query("?booking=7&tab=route", "materials"), "?booking=7&tab=materials");
    }
}

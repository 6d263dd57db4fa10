//! Light/dark theme switching.
//!
//! The choice is persisted in localStorage and applied as `data-theme` on
//! `<html>` plus the matching stylesheet link.

use leptos::prelude::*;
use web_sys::window;

/// Available themes in the application.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the theme name as a string (used for CSS and localStorage).
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn css_path(&self) -> &'static str {
        match self {
            Theme::Light => "/static/themes/light.css",
            Theme::Dark => "/static/themes/dark.css",
        }
    }

    /// Unknown values fall back to the default theme.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

const THEME_STORAGE_KEY: &str = "app-theme";

fn load_theme_from_storage() -> Theme {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(THEME_STORAGE_KEY).ok().flatten())
        .map(|s| Theme::parse(&s))
        .unwrap_or_default()
}

fn save_theme_to_storage(theme: Theme) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(THEME_STORAGE_KEY, theme.as_str());
    }
}

fn apply_theme_css(theme: Theme) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }

    match document.get_element_by_id("theme-stylesheet") {
        Some(link) => {
            let _ = link.set_attribute("href", theme.css_path());
        }
        None => {
            let Some(head) = document.head() else {
                return;
            };
            if let Ok(link) = document.create_element("link") {
                let _ = link.set_attribute("id", "theme-stylesheet");
                let _ = link.set_attribute("rel", "stylesheet");
                let _ = link.set_attribute("href", theme.css_path());
                let _ = head.append_child(&link);
            }
        }
    }
}

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: RwSignal<Theme>,
}

impl ThemeContext {
    /// Set the theme and persist to storage.
    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        save_theme_to_storage(theme);
        apply_theme_css(theme);
        log::debug!("theme switched to {}", theme.as_str());
    }

    pub fn toggle(&self) {
        self.set_theme(self.theme.get_untracked().toggled());
    }
}

/// Provides theme context to children components.
#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let initial_theme = load_theme_from_storage();
    apply_theme_css(initial_theme);

    provide_context(ThemeContext {
        theme: RwSignal::new(initial_theme),
    });

    children()
}

pub fn use_theme() -> Option<ThemeContext> {
    use_context::<ThemeContext>()
}

/// Top bar button switching between light and dark.
#[component]
pub fn ThemeSelector() -> impl IntoView {
    let Some(ctx) = use_theme() else {
        log::warn!("ThemeSelector rendered outside ThemeProvider");
        return ().into_any();
    };

    view! {
        <button
            type="button"
            class="top-header-icon-btn"
            title=move || format!("Switch to {} theme", ctx.theme.get().toggled().display_name())
            on:click=move |_| ctx.toggle()
        >
            {move || match ctx.theme.get() {
                Theme::Light => crate::shared::icons::icon("moon"),
                Theme::Dark => crate::shared::icons::icon("sun"),
            }}
        </button>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_toggle() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("forest"), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }
}

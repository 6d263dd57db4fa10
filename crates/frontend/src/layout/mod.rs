pub mod global_context;

use crate::shared::theme::ThemeSelector;
use leptos::prelude::*;

/// Page frame: top bar with the app title and theme switch, content below.
#[component]
pub fn Shell(
    /// Title shown in the top bar
    #[prop(into)]
    title: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="app-layout">
            <header class="top-header">
                <a class="top-header__brand" href="/bookings/new">"Transport bookings"</a>
                <span class="top-header__title">{title}</span>
                <div class="top-header__actions">
                    <ThemeSelector />
                </div>
            </header>
            <main class="app-main">
                {children()}
            </main>
        </div>
    }
}

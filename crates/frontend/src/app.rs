use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::theme::ThemeProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Active form tab, restored from the URL or localStorage.
    let ctx = AppGlobalContext::new();
    ctx.init_router_integration();
    provide_context(ctx);

    view! {
        <ThemeProvider>
            <AppRoutes />
        </ThemeProvider>
    }
}

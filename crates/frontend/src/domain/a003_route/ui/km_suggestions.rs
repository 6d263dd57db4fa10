use contracts::domain::a003_route::{route_code_and_name, KmSuggestion};
use leptos::prelude::*;
use thaw::Spinner;

/// Clickable distances from earlier bookings of the same route.
#[component]
pub fn KmSuggestionsList(
    #[prop(into)]
    suggestions: Signal<Vec<KmSuggestion>>,
    #[prop(into)]
    loading: Signal<bool>,
    on_pick: Callback<KmSuggestion>,
) -> impl IntoView {
    view! {
        <div class="km-suggestions">
            <Show when=move || loading.get()>
                <Spinner />
            </Show>
            <Show when=move || !loading.get() && !suggestions.with(|s| s.is_empty())>
                <span class="km-suggestions__caption">"Used before:"</span>
            </Show>
            <For
                each=move || suggestions.get()
                key=|s| (s.km, s.route_code.clone())
                children=move |suggestion| {
                    let label = suggestion.label();
                    let title = suggestion.route_code.clone().unwrap_or_default();
                    view! {
                        <button
                            type="button"
                            class="km-suggestions__item"
                            title=title
                            on:click=move |_| on_pick.run(suggestion.clone())
                        >
                            {label}
                        </button>
                    }
                }
            />
        </div>
    }
}

/// Code and name the booked route will be stored under.
#[component]
pub fn RoutePreview(
    #[prop(into)]
    from_codes: Signal<Vec<String>>,
    #[prop(into)]
    to_codes: Signal<Vec<String>>,
    #[prop(into)]
    km: Signal<Option<i64>>,
) -> impl IntoView {
    let preview = move || {
        let km = km.get()?;
        from_codes.with(|from| to_codes.with(|to| route_code_and_name(from, &[], to, km)))
    };

    view! {
        {move || preview().map(|(code, name)| view! {
            <div class="route-preview">
                <span class="route-preview__name">{name}</span>
                <code class="route-preview__code">{code}</code>
            </div>
        })}
    }
}

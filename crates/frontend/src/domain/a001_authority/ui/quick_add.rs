use crate::domain::a001_authority::api;
use crate::shared::icons::icon;
use contracts::domain::a001_authority::{Authority, QuickAddAuthorityRequest};
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, ButtonSize, ButtonType, Input};

/// Inline form creating an authority at the given location.
/// Failures are shown next to the form; nothing is retried.
#[component]
pub fn QuickAddAuthority(
    #[prop(into)]
    location_code: String,
    on_added: Callback<Authority>,
) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let location_code = StoredValue::new(location_code);

    let submit = move || {
        if saving.get_untracked() {
            return;
        }
        let request = QuickAddAuthorityRequest::new(
            &location_code.get_value(),
            &title.get_untracked(),
            &address.get_untracked(),
        );
        if let Err(e) = request.validate() {
            error.set(Some(e));
            return;
        }

        error.set(None);
        saving.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api::quick_add_authority(&request).await {
                Ok(authority) => {
                    log::debug!("authority {} added at {}", authority.id, request.location_code);
                    title.set(String::new());
                    address.set(String::new());
                    on_added.run(authority);
                }
                Err(e) => {
                    log::warn!("quick add failed: {}", e);
                    error.set(Some(e));
                }
            }
            saving.set(false);
        });
    };

    view! {
        <div class="quick-add">
            <div class="quick-add__fields">
                <label class="form__label">"New authority"</label>
                <Input value=title placeholder="Title" />
                <label class="form__label">"Address"</label>
                <Input value=address placeholder="Optional" />
            </div>
            {move || error.get().map(|e| view! {
                <div class="quick-add__error">{icon("alert")}" "{e}</div>
            })}
            <Button
                appearance=ButtonAppearance::Secondary
                size=ButtonSize::Small
                button_type=ButtonType::Button
                disabled=Signal::derive(move || saving.get())
                on_click=move |_| submit()
            >
                {icon("plus")}
                {move || if saving.get() { " Adding…" } else { " Add" }}
            </Button>
        </div>
    }
}

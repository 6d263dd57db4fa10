use super::quick_add::QuickAddAuthority;
use crate::domain::a001_authority::api;
use crate::shared::modal::Modal;
use contracts::domain::a001_authority::{Authority, AuthorityId, LocationChip};
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, ButtonType, Flex, FlexGap, Spinner};

/// Lists the authorities of one location and lets the user tick the ones
/// taking part in the booking. Confirm returns the ticked authorities in
/// list order.
#[component]
pub fn AuthoritySelectModal(
    chip: LocationChip,
    on_confirm: Callback<Vec<Authority>>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let authorities = RwSignal::new(Vec::<Authority>::new());
    let selected = RwSignal::new(chip.authority_ids.clone());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    let code = chip.code.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match api::fetch_authorities(&code).await {
            Ok(list) => {
                log::debug!("{} authorities at {}", list.len(), code);
                authorities.try_set(list);
            }
            Err(e) => {
                log::warn!("loading authorities for {} failed: {}", code, e);
                error.try_set(Some(e));
            }
        }
        loading.try_set(false);
    });

    let toggle = move |id: AuthorityId, checked: bool| {
        selected.update(|ids| {
            if checked {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            } else {
                ids.retain(|i| *i != id);
            }
        });
    };

    let on_added = Callback::new(move |authority: Authority| {
        selected.update(|ids| ids.push(authority.id));
        authorities.update(|list| list.push(authority));
    });

    let confirm = move || {
        let ids = selected.get_untracked();
        let chosen: Vec<Authority> = authorities
            .get_untracked()
            .into_iter()
            .filter(|a| ids.contains(&a.id))
            .collect();
        on_confirm.run(chosen);
    };

    let footer = move || {
        view! {
            <Button
                appearance=ButtonAppearance::Subtle
                button_type=ButtonType::Button
                on_click=move |_| on_cancel.run(())
            >
                "Cancel"
            </Button>
            <Button
                appearance=ButtonAppearance::Primary
                button_type=ButtonType::Button
                on_click=move |_| confirm()
            >
                {move || format!("Select ({})", selected.get().len())}
            </Button>
        }
    };

    view! {
        <Modal
            title=format!("Authorities at {}", chip.label())
            on_close=on_cancel
            footer=ChildrenFn::to_children(footer)
        >
            <Show when=move || loading.get()>
                <Flex gap=FlexGap::Small>
                    <Spinner />
                    <span>"Loading authorities…"</span>
                </Flex>
            </Show>
            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
            <Show when=move || !loading.get() && authorities.with(|a| a.is_empty()) && error.get().is_none()>
                <div class="authority-list__empty">"No authorities registered at this location yet."</div>
            </Show>
            <ul class="authority-list">
                <For
                    each=move || authorities.get()
                    key=|a| a.id
                    children=move |authority| {
                        let id = authority.id;
                        let input_id = format!("authority-{}", id);
                        view! {
                            <li class="authority-list__item">
                                <input
                                    type="checkbox"
                                    id=input_id.clone()
                                    class="form__checkbox"
                                    prop:checked=move || selected.with(|ids| ids.contains(&id))
                                    on:change=move |ev| toggle(id, event_target_checked(&ev))
                                />
                                <label class="form__checkbox-label" for=input_id>
                                    <span class="authority-list__title">{authority.title.clone()}</span>
                                    {authority.address.clone().map(|a| view! {
                                        <span class="authority-list__address">{a}</span>
                                    })}
                                </label>
                            </li>
                        }
                    }
                />
            </ul>
            <QuickAddAuthority location_code=chip.code.clone() on_added=on_added />
        </Modal>
    }
}

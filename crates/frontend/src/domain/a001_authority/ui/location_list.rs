use super::select_modal::AuthoritySelectModal;
use crate::shared::icons::icon;
use contracts::domain::a001_authority::{
    parse_location_input, Authority, AuthorityId, AuthorityRole, LocationChip, LocationSelection,
};
use leptos::ev;
use leptos::prelude::*;
use std::collections::HashMap;
use thaw::{Button, ButtonAppearance, ButtonType};

/// Builds the location list of one trip end: "Name [CODE]" entries become
/// chips, each chip carries the authorities picked in the modal. The
/// selection is mirrored into hidden inputs for the native form post.
#[component]
pub fn LocationListBuilder(
    role: AuthorityRole,
    selection: RwSignal<LocationSelection>,
    /// Authority titles collected from the modal, used for scope labels
    titles: RwSignal<HashMap<AuthorityId, String>>,
) -> impl IntoView {
    let draft = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let picking = RwSignal::new(None::<LocationChip>);

    let add_location = move || {
        let Some(location) = parse_location_input(&draft.get_untracked()) else {
            error.set(Some("Enter a location as \"Name [CODE]\"".to_string()));
            return;
        };
        error.set(None);
        draft.set(String::new());

        let code = location.code.clone();
        selection.update(|s| {
            if s.add_chip(LocationChip::new(location)) {
                log::debug!("{} location {} added", role.as_str(), code);
            }
        });
        let chip = selection.with_untracked(|s| s.chips.iter().find(|c| c.code == code).cloned());
        picking.set(chip);
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            // Enter must not submit the surrounding booking form.
            ev.prevent_default();
            add_location();
        }
    };

    let on_confirm = Callback::new(move |chosen: Vec<Authority>| {
        let Some(chip) = picking.get_untracked() else {
            return;
        };
        titles.update(|t| {
            for a in &chosen {
                t.insert(a.id, a.title.clone());
            }
        });
        let ids: Vec<AuthorityId> = chosen.iter().map(|a| a.id).collect();
        log::debug!("{} authorities picked at {}", ids.len(), chip.code);
        selection.update(|s| {
            s.set_authorities(&chip.code, ids);
        });
        picking.set(None);
    });

    let on_cancel = Callback::new(move |_| picking.set(None));

    let authority_names = move |chip: &LocationChip| -> String {
        titles.with(|t| {
            chip.authority_ids
                .iter()
                .map(|id| t.get(id).cloned().unwrap_or_else(|| format!("#{}", id)))
                .collect::<Vec<_>>()
                .join(", ")
        })
    };

    view! {
        <div class=format!("location-list location-list--{}", role.as_str())>
            <label class="form__label">{format!("{} locations", role.display_name())}</label>
            <div class="location-list__input">
                <input
                    type="text"
                    class="form__input"
                    placeholder="Chennai Central [MAS]"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <Button
                    appearance=ButtonAppearance::Secondary
                    button_type=ButtonType::Button
                    on_click=move |_| add_location()
                >
                    {icon("plus")}" Add"
                </Button>
            </div>
            {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}

            <ul class="location-list__chips">
                <For
                    each=move || selection.get().chips
                    key=|chip| (chip.code.clone(), chip.authority_ids.clone())
                    children=move |chip| {
                        let code = chip.code.clone();
                        let names = authority_names(&chip);
                        let edit_chip = chip.clone();
                        view! {
                            <li class="chip">
                                {icon("map-pin")}
                                <span class="chip__label">{chip.label()}</span>
                                <button
                                    type="button"
                                    class="chip__authorities"
                                    title="Choose authorities"
                                    on:click=move |_| picking.set(Some(edit_chip.clone()))
                                >
                                    {icon("users")}
                                    {if names.is_empty() { " none".to_string() } else { format!(" {}", names) }}
                                </button>
                                <button
                                    type="button"
                                    class="chip__remove"
                                    title="Remove location"
                                    on:click=move |_| {
                                        let code = code.clone();
                                        selection.update(|s| {
                                            s.remove_chip(&code);
                                        });
                                    }
                                >
                                    {icon("x")}
                                </button>
                            </li>
                        }
                    }
                />
            </ul>

            {move || {
                selection
                    .get()
                    .hidden_fields(role)
                    .into_iter()
                    .map(|(name, value)| view! { <input type="hidden" name=name value=value /> })
                    .collect_view()
            }}

            {move || picking.get().map(|chip| view! {
                <AuthoritySelectModal chip=chip on_confirm=on_confirm on_cancel=on_cancel />
            })}
        </div>
    }
}

use super::view_model::MaterialsEditorViewModel;
use crate::shared::icons::icon;
use contracts::domain::a002_booking_material::validation::ScopeValidationError;
use contracts::domain::a002_booking_material::{HeaderField, LineField, MaterialMode, ScopeKey};
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, ButtonSize, ButtonType};
use uuid::Uuid;

/// Accordion with one materials block per scope.
#[component]
pub fn MaterialsEditor(
    vm: MaterialsEditorViewModel,
    /// Errors of the last submit attempt, matched to panels by position
    #[prop(into)]
    errors: Signal<Vec<ScopeValidationError>>,
) -> impl IntoView {
    view! {
        <div class="materials-editor">
            <For
                each=move || vm.keys()
                key=|key| key.dom_key()
                children=move |key| view! { <ScopePanel vm=vm scope_key=key errors=errors /> }
            />
        </div>
    }
}

#[component]
fn ScopePanel(
    vm: MaterialsEditorViewModel,
    scope_key: ScopeKey,
    errors: Signal<Vec<ScopeValidationError>>,
) -> impl IntoView {
    let key = scope_key;
    let error = move || {
        let position = vm.position(key);
        errors.with(|list| {
            list.iter()
                .find(|e| e.index == position)
                .map(|e| e.error.to_string())
        })
    };

    view! {
        <section
            id=key.dom_key()
            class=move || {
                if error().is_some() { "scope-panel scope-panel--invalid" } else { "scope-panel" }
            }
        >
            <button type="button" class="scope-panel__header" on:click=move |_| vm.toggle(key)>
                {move || if vm.is_expanded(key) { icon("chevron-down") } else { icon("chevron-right") }}
                <span class="scope-panel__index">{move || format!("Materials #{}", vm.position(key))}</span>
                <span class="scope-panel__label">{move || vm.label(key)}</span>
                <span class="scope-panel__mode">
                    {move || vm.mode(key).map(|m| m.display_name()).unwrap_or("Mode not set")}
                </span>
            </button>

            {move || error().map(|e| view! {
                <div class="scope-panel__error">{icon("alert")}" "{e}</div>
            })}

            <Show when=move || vm.is_expanded(key)>
                <div class="scope-panel__body">
                    <ModeSelect vm=vm scope_key=key />
                    <HeaderFields vm=vm scope_key=key />
                    <LinesTable vm=vm scope_key=key />
                </div>
            </Show>
        </section>
    }
}

#[component]
fn ModeSelect(vm: MaterialsEditorViewModel, scope_key: ScopeKey) -> impl IntoView {
    let key = scope_key;

    view! {
        <div class="form__group">
            <label class="form__label">"Material mode"</label>
            <select
                class="form__select"
                on:change=move |ev| vm.set_mode(key, MaterialMode::parse(&event_target_value(&ev)))
            >
                <option value="" prop:selected=move || vm.mode(key).is_none()>"Select mode"</option>
                {MaterialMode::all()
                    .into_iter()
                    .map(|m| view! {
                        <option value=m.code() prop:selected=move || vm.mode(key) == Some(m)>
                            {m.display_name()}
                        </option>
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
fn HeaderFields(vm: MaterialsEditorViewModel, scope_key: ScopeKey) -> impl IntoView {
    let key = scope_key;
    let field = move |label: &'static str, field: HeaderField, placeholder: &'static str| {
        view! {
            <div class="form__group">
                <label class="form__label">{label}</label>
                <input
                    type="text"
                    inputmode="decimal"
                    class="form__input"
                    placeholder=placeholder
                    prop:value=move || vm.header_value(key, field)
                    disabled=move || !vm.header_enabled(key, field)
                    on:input=move |ev| vm.set_header(key, field, event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <div class="scope-panel__header-fields">
            {field("Total quantity", HeaderField::TotalQuantity, "0")}
            {field("Unit", HeaderField::TotalQuantityUnit, "MT")}
            {field("Total amount (Rs.)", HeaderField::TotalAmount, "0.00")}
        </div>
    }
}

#[component]
fn LinesTable(vm: MaterialsEditorViewModel, scope_key: ScopeKey) -> impl IntoView {
    let key = scope_key;

    view! {
        <table class="table materials-lines">
            <thead>
                <tr>
                    <th>"Sl"</th>
                    <th>"Description"</th>
                    <th>"Unit"</th>
                    <th>"Quantity"</th>
                    <th>"Rate (Rs.)"</th>
                    <th>"Amount (Rs.)"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || vm.line_keys(key)
                    key=|line| *line
                    children=move |line| view! { <LineRow vm=vm scope_key=key line=line /> }
                />
            </tbody>
        </table>
        <Button
            appearance=ButtonAppearance::Secondary
            size=ButtonSize::Small
            button_type=ButtonType::Button
            disabled=Signal::derive(move || !vm.can_add_line(key))
            on_click=move |_| vm.add_line(key)
        >
            {icon("plus")}" Add row"
        </Button>
    }
}

#[component]
fn LineRow(vm: MaterialsEditorViewModel, scope_key: ScopeKey, line: Uuid) -> impl IntoView {
    let key = scope_key;
    let cell = move |field: LineField, numeric: bool| {
        view! {
            <td>
                <input
                    type="text"
                    inputmode={if numeric { "decimal" } else { "text" }}
                    class="form__input form__input--cell"
                    prop:value=move || vm.line_value(key, line, field)
                    disabled=move || !vm.line_enabled(key, field)
                    on:input=move |ev| vm.set_line(key, line, field, event_target_value(&ev))
                />
            </td>
        }
    };

    view! {
        <tr>
            <td class="materials-lines__sl">{move || vm.sequence(key, line)}</td>
            {cell(LineField::Description, false)}
            {cell(LineField::Unit, false)}
            {cell(LineField::Quantity, true)}
            {cell(LineField::Rate, true)}
            {cell(LineField::Amount, true)}
            <td>
                <button
                    type="button"
                    class="button button--icon"
                    title="Remove row"
                    disabled=move || !vm.can_remove_line(key)
                    on:click=move |_| vm.remove_line(key, line)
                >
                    {icon("trash")}
                </button>
            </td>
        </tr>
    }
}

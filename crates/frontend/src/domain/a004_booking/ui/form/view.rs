use super::view_model::BookingFormViewModel;
use crate::domain::a001_authority::ui::LocationListBuilder;
use crate::domain::a002_booking_material::ui::editor::{MaterialsEditor, MaterialsEditorViewModel};
use crate::domain::a002_booking_material::ui::summary::MaterialSummaryTable;
use crate::domain::a003_route::ui::{KmSuggestionsList, RoutePreview};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use contracts::domain::a001_authority::AuthorityRole;
use contracts::domain::a002_booking_material::detail::{LabelledBlock, MaterialBlockDto};
use contracts::domain::a002_booking_material::payload::{serialize_scope, MATERIALS_FIELD_NAME};
use contracts::domain::a002_booking_material::scopes::scope_label;
use contracts::domain::a003_route::KmSuggestion;
use leptos::ev;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, ButtonType, Input, InputType};

/// Where the native form post goes
const BOOKING_SUBMIT_PATH: &str = "/admin/booking/add";

const TAB_ROUTE: &str = "route";
const TAB_MATERIALS: &str = "materials";
const TAB_REVIEW: &str = "review";
const TAB_KEYS: [&str; 3] = [TAB_ROUTE, TAB_MATERIALS, TAB_REVIEW];
const TABS: [(&str, &str); 3] = [
    (TAB_ROUTE, "Route"),
    (TAB_MATERIALS, "Materials"),
    (TAB_REVIEW, "Review"),
];

/// New booking: route and authorities, per-pair materials, review.
///
/// The page is a plain HTML form posted to the backend; the client only
/// fills hidden inputs and blocks the post while materials are invalid.
#[component]
pub fn BookingFormPage() -> impl IntoView {
    let vm = BookingFormViewModel::new();
    vm.init();
    let editor = MaterialsEditorViewModel::new(vm.scopes, vm.titles);

    let tabs = use_context::<AppGlobalContext>().unwrap_or_default();
    let active = move || tabs.active_or(&TAB_KEYS, TAB_ROUTE);
    let panel_display = move |tab: &'static str| move || if active() == tab { "block" } else { "none" };

    let on_submit = move |ev: ev::SubmitEvent| {
        if vm.validate() {
            log::info!("posting booking with {} material scopes", vm.scopes.with_untracked(|s| s.len()));
            return;
        }
        ev.prevent_default();
        // Open every failing panel so the messages are next to the fields.
        let failing: Vec<_> = vm.errors.with_untracked(|errors| {
            vm.scopes.with_untracked(|scopes| {
                errors
                    .iter()
                    .filter_map(|e| scopes.get(e.index - 1).map(|s| s.key))
                    .collect()
            })
        });
        editor.expanded.update(|expanded| expanded.extend(failing));
        tabs.activate_tab(TAB_MATERIALS);
    };

    let review_blocks = move || {
        vm.scopes.with(|scopes| {
            scopes
                .iter()
                .filter(|s| !s.is_blank() || s.mode.is_some())
                .map(|s| LabelledBlock {
                    label: vm.titles.with(|t| scope_label(&s.key, t)),
                    block: MaterialBlockDto::from(&serialize_scope(s)),
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <form method="post" action=BOOKING_SUBMIT_PATH class="booking-form" on:submit=on_submit>
            <nav class="tabs">
                {TABS
                    .into_iter()
                    .map(|(key, title)| {
                        view! {
                            <button
                                type="button"
                                class=move || if active() == key { "tabs__tab tabs__tab--active" } else { "tabs__tab" }
                                on:click=move |_| tabs.activate_tab(key)
                            >
                                {title}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <div class="tab-panel" style:display=panel_display(TAB_ROUTE)>
                <div class="booking-form__locations">
                    <LocationListBuilder role=AuthorityRole::Loading selection=vm.loading titles=vm.titles />
                    <LocationListBuilder role=AuthorityRole::Unloading selection=vm.unloading titles=vm.titles />
                </div>
                <div class="form__group">
                    <label class="form__label">"Trip distance (km)"</label>
                    <Input
                        input_type=InputType::Number
                        value=vm.trip_km
                        placeholder="0"
                    />
                    <input type="hidden" name="trip_km" prop:value=move || vm.trip_km.get() />
                </div>
                <KmSuggestionsList
                    suggestions=vm.km_suggestions
                    loading=vm.km_loading
                    on_pick=Callback::new(move |s: KmSuggestion| vm.pick_km(&s))
                />
                <RoutePreview
                    from_codes=BookingFormViewModel::location_codes(vm.loading)
                    to_codes=BookingFormViewModel::location_codes(vm.unloading)
                    km=Signal::derive(move || vm.km_value())
                />
            </div>

            <div class="tab-panel" style:display=panel_display(TAB_MATERIALS)>
                <MaterialsEditor vm=editor errors=vm.errors />
            </div>

            <div class="tab-panel" style:display=panel_display(TAB_REVIEW)>
                {move || {
                    let blocks = review_blocks();
                    if blocks.is_empty() {
                        view! { <p class="booking-form__empty">"No materials entered."</p> }.into_any()
                    } else {
                        blocks
                            .into_iter()
                            .map(|block| view! { <MaterialSummaryTable block=block /> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>

            <input type="hidden" name=MATERIALS_FIELD_NAME prop:value=move || vm.payload_json() />

            {move || {
                let errors = vm.errors.get();
                (!errors.is_empty()).then(|| view! {
                    <div class="booking-form__errors">
                        {icon("alert")}
                        <ul>
                            {errors.into_iter().map(|e| view! { <li>{e.to_string()}</li> }).collect_view()}
                        </ul>
                    </div>
                })
            }}

            <div class="booking-form__actions">
                <Button appearance=ButtonAppearance::Primary button_type=ButtonType::Submit>
                    {icon("save")}" Save booking"
                </Button>
            </div>
        </form>
    }
}

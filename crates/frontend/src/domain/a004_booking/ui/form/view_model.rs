use crate::domain::a003_route::api as route_api;
use crate::shared::task::TaskSlot;
use contracts::domain::a001_authority::{AuthorityId, LocationSelection};
use contracts::domain::a002_booking_material::payload::build_submission;
use contracts::domain::a002_booking_material::scopes::{build_scopes, scope_label};
use contracts::domain::a002_booking_material::validation::{
    validate_submission, ScopeValidationError,
};
use contracts::domain::a002_booking_material::MaterialScope;
use contracts::domain::a003_route::KmSuggestion;
use contracts::shared::number_format::parse_number;
use leptos::prelude::*;
use std::collections::HashMap;

/// Delay before the scope accordion follows an authority change
const REBUILD_DEBOUNCE_MS: u32 = 60;

/// ViewModel of the booking form: both location lists, the per-scope
/// materials and the route distance.
#[derive(Clone, Copy)]
pub struct BookingFormViewModel {
    pub loading: RwSignal<LocationSelection>,
    pub unloading: RwSignal<LocationSelection>,
    pub titles: RwSignal<HashMap<AuthorityId, String>>,
    pub scopes: RwSignal<Vec<MaterialScope>>,
    pub errors: RwSignal<Vec<ScopeValidationError>>,
    pub trip_km: RwSignal<String>,
    pub km_suggestions: RwSignal<Vec<KmSuggestion>>,
    pub km_loading: RwSignal<bool>,
    rebuild_task: TaskSlot,
    km_task: TaskSlot,
}

impl BookingFormViewModel {
    pub fn new() -> Self {
        Self {
            loading: RwSignal::new(LocationSelection::new()),
            unloading: RwSignal::new(LocationSelection::new()),
            titles: RwSignal::new(HashMap::new()),
            scopes: RwSignal::new(vec![MaterialScope::base()]),
            errors: RwSignal::new(Vec::new()),
            trip_km: RwSignal::new(String::new()),
            km_suggestions: RwSignal::new(Vec::new()),
            km_loading: RwSignal::new(false),
            rebuild_task: TaskSlot::new("scope-rebuild"),
            km_task: TaskSlot::new("km-suggestions"),
        }
    }

    /// Wires the reactions to selection changes. Call once per page.
    pub fn init(&self) {
        let vm = *self;

        let authority_ids = Memo::new(move |_| {
            (
                vm.loading.with(|s| s.authority_ids()),
                vm.unloading.with(|s| s.authority_ids()),
            )
        });
        Effect::new(move |_| {
            authority_ids.track();
            vm.schedule_rebuild();
        });

        let route_ends = Memo::new(move |_| {
            (
                vm.loading.with(|s| s.chips.first().map(|c| c.code.clone())),
                vm.unloading.with(|s| s.chips.last().map(|c| c.code.clone())),
            )
        });
        Effect::new(move |_| {
            let (from, to) = route_ends.get();
            vm.refresh_km_suggestions(from, to);
        });
    }

    /// Rebuilds the scopes once authority edits settle; a newer change
    /// cancels the pending rebuild.
    pub fn schedule_rebuild(&self) {
        let vm = *self;
        self.rebuild_task.debounce(REBUILD_DEBOUNCE_MS, move || {
            let loading = vm.loading.with_untracked(|s| s.authority_ids());
            let unloading = vm.unloading.with_untracked(|s| s.authority_ids());
            vm.scopes.update(|scopes| {
                *scopes = build_scopes(&loading, &unloading, std::mem::take(scopes));
            });
            vm.errors.set(Vec::new());
            log::debug!(
                "scopes rebuilt: {} loading x {} unloading",
                loading.len(),
                unloading.len()
            );
        });
    }

    /// Looks up distances used before between the two route ends.
    /// Failures only empty the list.
    pub fn refresh_km_suggestions(&self, from: Option<String>, to: Option<String>) {
        let ticket = self.km_task.start();
        let (Some(from), Some(to)) = (from, to) else {
            self.km_suggestions.set(Vec::new());
            self.km_loading.set(false);
            return;
        };

        let vm = *self;
        vm.km_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = route_api::fetch_km_suggestions(&from, &to, ticket.signal()).await;
            if !vm.km_task.is_current(&ticket) {
                log::debug!("km suggestions for {} -> {} superseded", from, to);
                return;
            }
            match result {
                Ok(list) => {
                    vm.km_suggestions.set(list);
                }
                Err(e) => {
                    log::warn!("km suggestions for {} -> {} failed: {}", from, to, e);
                    vm.km_suggestions.set(Vec::new());
                }
            }
            vm.km_loading.set(false);
        });
    }

    pub fn pick_km(&self, suggestion: &KmSuggestion) {
        self.trip_km.set(suggestion.km.to_string());
    }

    /// Entered distance, whole kilometres
    pub fn km_value(&self) -> Option<i64> {
        self.trip_km
            .with(|v| parse_number(v))
            .filter(|km| *km > 0.0)
            .map(|km| km.round() as i64)
    }

    pub fn location_codes(selection: RwSignal<LocationSelection>) -> Signal<Vec<String>> {
        Signal::derive(move || selection.with(|s| s.chips.iter().map(|c| c.code.clone()).collect()))
    }

    pub fn scope_label(&self, scope: &MaterialScope) -> String {
        self.titles.with_untracked(|t| scope_label(&scope.key, t))
    }

    /// JSON for the `materials_json` field, kept in sync with the scopes.
    pub fn payload_json(&self) -> String {
        self.scopes.with(|scopes| {
            build_submission(scopes).to_json().unwrap_or_else(|e| {
                log::error!("materials payload could not be encoded: {}", e);
                String::new()
            })
        })
    }

    /// Runs the pre-submit checks and keeps the errors for the view.
    /// Returns `true` when the form may be posted.
    pub fn validate(&self) -> bool {
        let vm = *self;
        let errors = self
            .scopes
            .with_untracked(|scopes| validate_submission(scopes, |s| vm.scope_label(s)));
        for e in &errors {
            log::debug!("blocked submit: {}", e);
        }
        let ok = errors.is_empty();
        self.errors.set(errors);
        ok
    }
}

impl Default for BookingFormViewModel {
    fn default() -> Self {
        Self::new()
    }
}

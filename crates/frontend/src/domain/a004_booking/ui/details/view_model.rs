use crate::domain::a002_booking_material::api;
use contracts::domain::a002_booking_material::detail::LabelledBlock;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;

/// ViewModel of the saved-materials viewer
#[derive(Clone, Copy)]
pub struct BookingMaterialsViewModel {
    pub blocks: RwSignal<Vec<LabelledBlock>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl BookingMaterialsViewModel {
    pub fn new() -> Self {
        Self {
            blocks: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// Accepts the raw route parameter; anything but a number is reported
    /// without a request.
    pub fn load(&self, id: Option<String>) {
        let booking_id = match id.as_deref().map(i64::from_string) {
            Some(Ok(id)) => id,
            Some(Err(e)) => {
                self.error.set(Some(e));
                return;
            }
            None => {
                self.error.set(Some("Booking id is missing".to_string()));
                return;
            }
        };

        let vm = *self;
        vm.loading.set(true);
        vm.error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_booking_materials(booking_id).await {
                Ok(response) => {
                    let blocks = response.blocks();
                    log::debug!("booking {}: {} material blocks", booking_id, blocks.len());
                    vm.blocks.try_set(blocks);
                }
                Err(e) => {
                    log::warn!("booking {} materials failed: {}", booking_id, e);
                    vm.error.try_set(Some(e));
                }
            }
            vm.loading.try_set(false);
        });
    }
}

impl Default for BookingMaterialsViewModel {
    fn default() -> Self {
        Self::new()
    }
}

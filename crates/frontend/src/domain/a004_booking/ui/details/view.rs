use super::view_model::BookingMaterialsViewModel;
use crate::domain::a002_booking_material::ui::summary::MaterialSummaryTable;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use thaw::{Card, Flex, FlexGap, Spinner};

/// Materials saved with a booking, one table per scope.
#[component]
pub fn BookingMaterialsPage() -> impl IntoView {
    let params = use_params_map();
    let vm = BookingMaterialsViewModel::new();

    Effect::new(move |_| {
        let id = params.with(|p| p.get("id"));
        vm.load(id);
    });

    view! {
        <div class="booking-materials">
            <Show when=move || vm.loading.get()>
                <Flex gap=FlexGap::Small>
                    <Spinner />
                    <span>"Loading materials…"</span>
                </Flex>
            </Show>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <Show when=move || !vm.loading.get() && vm.error.get().is_none()>
                {move || {
                    let blocks = vm.blocks.get();
                    if blocks.is_empty() {
                        view! { <p class="booking-materials__empty">"No materials recorded for this booking."</p> }
                            .into_any()
                    } else {
                        blocks
                            .into_iter()
                            .map(|block| view! { <Card><MaterialSummaryTable block=block /></Card> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </Show>
        </div>
    }
}

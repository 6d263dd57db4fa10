use crate::domain::a004_booking::ui::details::BookingMaterialsPage;
use crate::domain::a004_booking::ui::form::BookingFormPage;
use crate::layout::Shell;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <Shell title="Not found">
            <p class="not-found">"This page does not exist."</p>
        </Shell>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=NotFound>
                <Route path=path!("/") view=|| view! { <Redirect path="/bookings/new" /> } />
                <Route
                    path=path!("/bookings/new")
                    view=|| view! { <Shell title="New booking"><BookingFormPage /></Shell> }
                />
                <Route
                    path=path!("/bookings/:id")
                    view=|| view! { <Shell title="Booking materials"><BookingMaterialsPage /></Shell> }
                />
            </Routes>
        </Router>
    }
}

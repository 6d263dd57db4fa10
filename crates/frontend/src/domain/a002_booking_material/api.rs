use crate::shared::api_utils::{api_url, http_error};
use contracts::domain::a002_booking_material::detail::BookingMaterialsResponse;
use gloo_net::http::Request;

const BOOKINGS_PATH: &str = "/api/bookings";

/// Saved materials of a booking, legacy or multi-scope shape
pub async fn fetch_booking_materials(booking_id: i64) -> Result<BookingMaterialsResponse, String> {
    let url = api_url(&format!("{}/{}/materials", BOOKINGS_PATH, booking_id));

    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(http_error("Load materials", response.status()));
    }

    let body: BookingMaterialsResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;
    body.into_result()
}

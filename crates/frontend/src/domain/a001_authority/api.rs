use crate::shared::api_utils::{api_url, http_error};
use contracts::domain::a001_authority::{
    Authority, QuickAddAuthorityRequest, QuickAddAuthorityResponse,
};
use gloo_net::http::Request;

const LOCATION_AUTHORITIES_PATH: &str = "/api/locations";
const QUICK_ADD_PATH: &str = "/api/authorities/quick_add";

/// Authorities registered at a location
pub async fn fetch_authorities(location_code: &str) -> Result<Vec<Authority>, String> {
    let url = api_url(&format!(
        "{}/{}/authorities",
        LOCATION_AUTHORITIES_PATH,
        urlencoding::encode(location_code)
    ));

    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(http_error("Load authorities", response.status()));
    }

    response
        .json::<Vec<Authority>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Creates an authority at a location; the backend answers
/// `{success:false, error}` for rejected input.
pub async fn quick_add_authority(request: &QuickAddAuthorityRequest) -> Result<Authority, String> {
    request.validate()?;

    let response = Request::post(&api_url(QUICK_ADD_PATH))
        .json(request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    // Validation failures come back with a JSON body and a 4xx status.
    let body: QuickAddAuthorityResponse = match response.json().await {
        Ok(body) => body,
        Err(_) if !response.ok() => return Err(http_error("Add authority", response.status())),
        Err(e) => return Err(format!("Failed to parse response: {}", e)),
    };

    let added = body.into_result()?;
    Ok(Authority {
        id: added.id,
        title: added.title,
        location_code: Some(request.location_code.clone()),
        address: Some(request.address.clone()).filter(|a| !a.is_empty()),
    })
}

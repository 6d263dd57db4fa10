use crate::shared::api_utils::{api_url, http_error};
use contracts::domain::a003_route::{KmSuggestion, KmSuggestionsResponse};
use gloo_net::http::Request;
use serde::Serialize;
use web_sys::AbortSignal;

const KM_SUGGESTIONS_PATH: &str = "/api/routes/km_suggestions";

#[derive(Serialize)]
struct KmSuggestionsQuery<'a> {
    from: &'a str,
    to: &'a str,
}

fn km_suggestions_url(from: &str, to: &str) -> Result<String, String> {
    let query = serde_qs::to_string(&KmSuggestionsQuery { from, to })
        .map_err(|e| format!("Failed to build query: {}", e))?;
    Ok(format!("{}?{}", KM_SUGGESTIONS_PATH, query))
}

/// Distances of earlier bookings between two location codes.
/// `signal` aborts the request when a newer lookup starts.
pub async fn fetch_km_suggestions(
    from: &str,
    to: &str,
    signal: Option<&AbortSignal>,
) -> Result<Vec<KmSuggestion>, String> {
    let url = api_url(&km_suggestions_url(from, to)?);

    let response = Request::get(&url)
        .header("Accept", "application/json")
        .abort_signal(signal)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(http_error("Load km suggestions", response.status()));
    }

    let body: KmSuggestionsResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;
    Ok(body.suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_km_suggestions_url() {
        assert_eq!(
            km_suggestions_url("MAS", "SBC").unwrap(),
            "/api/routes/km_suggestions?from=MAS&to=SBC"
        );
    }
}

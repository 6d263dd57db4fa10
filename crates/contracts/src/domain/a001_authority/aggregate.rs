use crate::domain::common::AggregateId;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ID Type
// ============================================================================

/// Backend id of a loading/unloading authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorityId(pub i64);

impl AggregateId for AuthorityId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(AuthorityId)
    }
}

impl fmt::Display for AuthorityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Authority (party) that loads or unloads at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authority {
    pub id: AuthorityId,
    pub title: String,
    #[serde(default)]
    pub location_code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

// ============================================================================
// Quick add
// ============================================================================

/// Body of `POST /api/authorities/quick_add`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAddAuthorityRequest {
    pub location_code: String,
    pub title: String,
    pub address: String,
}

impl QuickAddAuthorityRequest {
    /// Trims every field and upper-cases the location code.
    pub fn new(location_code: &str, title: &str, address: &str) -> Self {
        Self {
            location_code: location_code.trim().to_uppercase(),
            title: title.trim().to_string(),
            address: address.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.location_code.is_empty() {
            return Err("Location code is required".to_string());
        }
        if self.title.is_empty() {
            return Err("Authority title is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAddedAuthority {
    pub id: AuthorityId,
    pub title: String,
}

/// Response of the quick-add endpoint:
/// `{success, authority:{id,title}}` or `{success:false, error}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAddAuthorityResponse {
    pub success: bool,
    #[serde(default)]
    pub authority: Option<QuickAddedAuthority>,
    #[serde(default)]
    pub error: Option<String>,
}

impl QuickAddAuthorityResponse {
    pub fn into_result(self) -> Result<QuickAddedAuthority, String> {
        match (self.success, self.authority) {
            (true, Some(authority)) => Ok(authority),
            _ => Err(self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "Could not add authority".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authority_id_from_string() {
        assert_eq!(AuthorityId::from_string(" 42 "), Ok(AuthorityId(42)));
        assert!(AuthorityId::from_string("x").is_err());
        assert_eq!(AuthorityId(7).as_string(), "7");
    }

    #[test]
    fn test_quick_add_request_normalizes() {
        let req = QuickAddAuthorityRequest::new(" mas ", " Chennai Port ", "");
        assert_eq!(req.location_code, "MAS");
        assert_eq!(req.title, "Chennai Port");
        assert!(req.validate().is_ok());
        assert!(QuickAddAuthorityRequest::new("MAS", " ", "").validate().is_err());
    }

    #[test]
    fn test_quick_add_response_success() {
        let json = r#"{"success":true,"authority":{"id":12,"title":"Depot"}}"#;
        let resp: QuickAddAuthorityResponse = serde_json::from_str(json).unwrap();
        let authority = resp.into_result().unwrap();
        assert_eq!(authority.id, AuthorityId(12));
        assert_eq!(authority.title, "Depot");
    }

    #[test]
    fn test_quick_add_response_failure() {
        let json = r#"{"success":false,"error":"Duplicate title"}"#;
        let resp: QuickAddAuthorityResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_result(), Err("Duplicate title".to_string()));

        let resp: QuickAddAuthorityResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(resp.into_result(), Err("Could not add authority".to_string()));
    }
}

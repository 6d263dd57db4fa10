use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Previously used route between the selected locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KmSuggestion {
    pub km: i64,
    #[serde(default)]
    pub route_code: Option<String>,
    #[serde(default)]
    pub route_name: Option<String>,
}

impl KmSuggestion {
    pub fn label(&self) -> String {
        match self.route_name.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(name) => format!("{} km — {}", self.km, name),
            None => format!("{} km", self.km),
        }
    }
}

/// `GET /api/routes/km_suggestions?from=..&to=..`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KmSuggestionsResponse {
    #[serde(default)]
    pub suggestions: Vec<KmSuggestion>,
}

/// Deterministic route code and display name for an ordered list of
/// location codes.
///
/// Code: `R_{FIRST}_{LAST}_{HASH8}` where `HASH8` is the first 8 upper-case
/// hex digits of SHA-256 over `"A|B|C|km=N"`. Returns `None` when either end
/// is missing.
pub fn route_code_and_name(
    from_codes: &[String],
    mid_codes: &[String],
    to_codes: &[String],
    total_km: i64,
) -> Option<(String, String)> {
    let first = from_codes.first()?;
    let last = to_codes.last()?;

    let canonical = format!(
        "{}|km={}",
        from_codes
            .iter()
            .chain(mid_codes)
            .chain(to_codes)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("|"),
        total_km
    );
    let digest = Sha256::digest(canonical.as_bytes());
    let short: String = digest
        .iter()
        .take(4)
        .map(|b| format!("{:02X}", b))
        .collect();

    let code = format!("R_{}_{}_{}", first, last, short);
    let name = if mid_codes.is_empty() {
        format!("{} – {}", first, last)
    } else {
        format!("{} – {} via {}", first, last, mid_codes.join(", "))
    };
    Some((code, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_route_name() {
        let (_, name) = route_code_and_name(&codes(&["MAS"]), &[], &codes(&["SBC"]), 350).unwrap();
        assert_eq!(name, "MAS – SBC");
        let (_, name) =
            route_code_and_name(&codes(&["MAS"]), &codes(&["AJJ", "KPD"]), &codes(&["SBC"]), 350)
                .unwrap();
        assert_eq!(name, "MAS – SBC via AJJ, KPD");
    }

    #[test]
    fn test_route_code_is_deterministic() {
        let (a, _) = route_code_and_name(&codes(&["MAS"]), &[], &codes(&["SBC"]), 350).unwrap();
        let (b, _) = route_code_and_name(&codes(&["MAS"]), &[], &codes(&["SBC"]), 350).unwrap();
        let (c, _) = route_code_and_name(&codes(&["MAS"]), &[], &codes(&["SBC"]), 351).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("R_MAS_SBC_"));
        let hash = a.trim_start_matches("R_MAS_SBC_");
        assert_eq!(hash.len(), 8);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn test_route_code_known_value() {
        let (code, name) =
            route_code_and_name(&codes(&["MAS"]), &codes(&["AJJ"]), &codes(&["SBC"]), 350)
                .unwrap();
        assert_eq!(code, "R_MAS_SBC_6C8CDA84");
        assert_eq!(name, "MAS – SBC via AJJ");
    }

    #[test]
    fn test_route_needs_both_ends() {
        assert!(route_code_and_name(&[], &[], &codes(&["SBC"]), 1).is_none());
        assert!(route_code_and_name(&codes(&["MAS"]), &[], &[], 1).is_none());
    }

    #[test]
    fn test_suggestions_parse() {
        let resp: KmSuggestionsResponse = serde_json::from_str(
            r#"{"suggestions":[{"km":350,"route_name":"MAS – SBC"},{"km":12}]}"#,
        )
        .unwrap();
        assert_eq!(resp.suggestions[0].label(), "350 km — MAS – SBC");
        assert_eq!(resp.suggestions[1].label(), "12 km");
        let empty: KmSuggestionsResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.suggestions.is_empty());
    }
}

//! Location chips: free-text "Name [CODE]" input turned into a selected
//! location with the authorities chosen for it.

use super::aggregate::AuthorityId;
use serde::{Deserialize, Serialize};

/// Which end of the trip a location list describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorityRole {
    Loading,
    Unloading,
}

impl AuthorityRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorityRole::Loading => "loading",
            AuthorityRole::Unloading => "unloading",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AuthorityRole::Loading => "Loading",
            AuthorityRole::Unloading => "Unloading",
        }
    }
}

/// Parsed location input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRef {
    pub name: String,
    pub code: String,
}

/// Parses `"Chennai Central [MAS]"` into name and upper-cased code.
///
/// The code is taken from the last bracket pair. Without brackets a single
/// word is accepted as a bare code; anything else is rejected.
pub fn parse_location_input(input: &str) -> Option<LocationRef> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }

    if let (Some(open), true) = (text.rfind('['), text.ends_with(']')) {
        let code = text[open + 1..text.len() - 1].trim().to_uppercase();
        if code.is_empty() || code.contains(char::is_whitespace) {
            return None;
        }
        let name = text[..open].trim();
        return Some(LocationRef {
            name: if name.is_empty() { code.clone() } else { name.to_string() },
            code,
        });
    }

    if text.contains(char::is_whitespace) || text.contains('[') || text.contains(']') {
        return None;
    }
    let code = text.to_uppercase();
    Some(LocationRef {
        name: code.clone(),
        code,
    })
}

/// One selected location and the authorities picked for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationChip {
    pub code: String,
    pub name: String,
    pub authority_ids: Vec<AuthorityId>,
}

impl LocationChip {
    pub fn new(location: LocationRef) -> Self {
        Self {
            code: location.code,
            name: location.name,
            authority_ids: Vec::new(),
        }
    }

    pub fn label(&self) -> String {
        if self.name == self.code {
            self.code.clone()
        } else {
            format!("{} [{}]", self.name, self.code)
        }
    }
}

/// Ordered chips of one role, unique by location code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSelection {
    pub chips: Vec<LocationChip>,
}

impl LocationSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.chips.iter().any(|c| c.code == code)
    }

    /// Adds a chip, or merges its authority ids into the existing chip with
    /// the same code. Returns `true` when a new chip was created.
    pub fn add_chip(&mut self, chip: LocationChip) -> bool {
        if let Some(existing) = self.chips.iter_mut().find(|c| c.code == chip.code) {
            for id in chip.authority_ids {
                if !existing.authority_ids.contains(&id) {
                    existing.authority_ids.push(id);
                }
            }
            return false;
        }
        let mut chip = chip;
        let mut seen = Vec::with_capacity(chip.authority_ids.len());
        chip.authority_ids.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
        self.chips.push(chip);
        true
    }

    pub fn remove_chip(&mut self, code: &str) -> bool {
        let before = self.chips.len();
        self.chips.retain(|c| c.code != code);
        self.chips.len() != before
    }

    /// Replaces the authority ids of a chip with the modal's result.
    pub fn set_authorities(&mut self, code: &str, ids: Vec<AuthorityId>) -> bool {
        match self.chips.iter_mut().find(|c| c.code == code) {
            Some(chip) => {
                chip.authority_ids.clear();
                for id in ids {
                    if !chip.authority_ids.contains(&id) {
                        chip.authority_ids.push(id);
                    }
                }
                true
            }
            None => false,
        }
    }

    /// All selected authority ids in chip order, without duplicates
    pub fn authority_ids(&self) -> Vec<AuthorityId> {
        let mut ids = Vec::new();
        for id in self.chips.iter().flat_map(|c| c.authority_ids.iter()) {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }

    /// `(name, value)` pairs for the hidden inputs of the native form post
    pub fn hidden_fields(&self, role: AuthorityRole) -> Vec<(String, String)> {
        let code_field = format!("{}_location_codes[]", role.as_str());
        let id_field = format!("{}_authority_ids[]", role.as_str());
        let mut fields: Vec<(String, String)> = self
            .chips
            .iter()
            .map(|c| (code_field.clone(), c.code.clone()))
            .collect();
        fields.extend(
            self.authority_ids()
                .into_iter()
                .map(|id| (id_field.clone(), id.to_string())),
        );
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chip(code: &str, ids: &[i64]) -> LocationChip {
        LocationChip {
            code: code.to_string(),
            name: code.to_string(),
            authority_ids: ids.iter().copied().map(AuthorityId).collect(),
        }
    }

    #[test]
    fn test_parse_location_with_code() {
        let loc = parse_location_input("  Chennai Central [mas] ").unwrap();
        assert_eq!(loc.name, "Chennai Central");
        assert_eq!(loc.code, "MAS");
    }

    #[test]
    fn test_parse_location_uses_last_brackets() {
        let loc = parse_location_input("Yard [North] [NYD]").unwrap();
        assert_eq!(loc.name, "Yard [North]");
        assert_eq!(loc.code, "NYD");
    }

    #[test]
    fn test_parse_location_bare_code() {
        let loc = parse_location_input("sbc").unwrap();
        assert_eq!(loc.code, "SBC");
        assert_eq!(loc.name, "SBC");
    }

    #[test]
    fn test_parse_location_rejects_garbage() {
        assert_eq!(parse_location_input(""), None);
        assert_eq!(parse_location_input("   "), None);
        assert_eq!(parse_location_input("Chennai Central"), None);
        assert_eq!(parse_location_input("Depot []"), None);
        assert_eq!(parse_location_input("Depot [A B]"), None);
    }

    #[test]
    fn test_add_chip_merges_same_code() {
        let mut sel = LocationSelection::new();
        assert!(sel.add_chip(chip("MAS", &[1, 2, 2])));
        assert!(!sel.add_chip(chip("MAS", &[2, 3])));
        assert_eq!(sel.chips.len(), 1);
        assert_eq!(
            sel.chips[0].authority_ids,
            vec![AuthorityId(1), AuthorityId(2), AuthorityId(3)]
        );
    }

    #[test]
    fn test_authority_ids_flattened_in_order() {
        let mut sel = LocationSelection::new();
        sel.add_chip(chip("MAS", &[5, 1]));
        sel.add_chip(chip("SBC", &[1, 9]));
        assert_eq!(
            sel.authority_ids(),
            vec![AuthorityId(5), AuthorityId(1), AuthorityId(9)]
        );
        assert!(sel.remove_chip("MAS"));
        assert!(!sel.remove_chip("MAS"));
        assert_eq!(sel.authority_ids(), vec![AuthorityId(1), AuthorityId(9)]);
    }

    #[test]
    fn test_set_authorities_replaces() {
        let mut sel = LocationSelection::new();
        sel.add_chip(chip("MAS", &[5]));
        assert!(sel.set_authorities("MAS", vec![AuthorityId(7), AuthorityId(7)]));
        assert_eq!(sel.chips[0].authority_ids, vec![AuthorityId(7)]);
        assert!(!sel.set_authorities("XXX", vec![]));
    }

    #[test]
    fn test_hidden_fields() {
        let mut sel = LocationSelection::new();
        sel.add_chip(chip("MAS", &[3]));
        let fields = sel.hidden_fields(AuthorityRole::Loading);
        assert_eq!(
            fields,
            vec![
                ("loading_location_codes[]".to_string(), "MAS".to_string()),
                ("loading_authority_ids[]".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_chip_label() {
        let mut c = chip("MAS", &[]);
        assert_eq!(c.label(), "MAS");
        c.name = "Chennai".to_string();
        assert_eq!(c.label(), "Chennai [MAS]");
    }
}

use serde::{Deserialize, Serialize};

/// Pricing mode of one materials scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaterialMode {
    /// Per-line quantity × rate with derived totals
    Item,
    /// One quantity and one amount, on the header or on the lines
    Lumpsum,
    /// Priced in an attached document, only the total amount is recorded
    Attached,
}

impl MaterialMode {
    pub fn code(&self) -> &'static str {
        match self {
            MaterialMode::Item => "ITEM",
            MaterialMode::Lumpsum => "LUMPSUM",
            MaterialMode::Attached => "ATTACHED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialMode::Item => "Item-wise",
            MaterialMode::Lumpsum => "Lumpsum",
            MaterialMode::Attached => "As per list attached",
        }
    }

    /// Case-insensitive; blank or unknown text is "unset".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ITEM" => Some(MaterialMode::Item),
            "LUMPSUM" => Some(MaterialMode::Lumpsum),
            "ATTACHED" => Some(MaterialMode::Attached),
            _ => None,
        }
    }

    pub fn all() -> [MaterialMode; 3] {
        [MaterialMode::Item, MaterialMode::Lumpsum, MaterialMode::Attached]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(MaterialMode::parse("item"), Some(MaterialMode::Item));
        assert_eq!(MaterialMode::parse(" LumpSum "), Some(MaterialMode::Lumpsum));
        assert_eq!(MaterialMode::parse("ATTACHED"), Some(MaterialMode::Attached));
        assert_eq!(MaterialMode::parse(""), None);
        assert_eq!(MaterialMode::parse("other"), None);
    }

    #[test]
    fn test_serde_uses_upper_case_codes() {
        for mode in MaterialMode::all() {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.code()));
        }
    }
}

use super::mode::MaterialMode;
use crate::domain::a001_authority::AuthorityId;
use crate::shared::number_format::parse_nonzero;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed description of the only line of an ATTACHED scope
pub const ATTACHED_DESCRIPTION: &str = "As per list attached.";

// ============================================================================
// Scope key
// ============================================================================

/// Loading/unloading authority pair a scope is priced for.
/// Both sides `None` is the booking-level base scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScopeKey {
    pub from: Option<AuthorityId>,
    pub to: Option<AuthorityId>,
}

impl ScopeKey {
    pub fn base() -> Self {
        Self::default()
    }

    pub fn pair(from: AuthorityId, to: AuthorityId) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn is_base(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Stable DOM-safe key, e.g. `scope-3-8` or `scope-base`
    pub fn dom_key(&self) -> String {
        match (self.from, self.to) {
            (None, None) => "scope-base".to_string(),
            (from, to) => format!(
                "scope-{}-{}",
                from.map(|a| a.to_string()).unwrap_or_else(|| "x".into()),
                to.map(|a| a.to_string()).unwrap_or_else(|| "x".into())
            ),
        }
    }
}

// ============================================================================
// Header and lines
// ============================================================================

/// Header totals, held as the text typed into the form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialHeader {
    pub total_quantity: String,
    pub total_quantity_unit: String,
    pub total_amount: String,
}

impl MaterialHeader {
    pub fn clear_quantity(&mut self) {
        self.total_quantity.clear();
        self.total_quantity_unit.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.total_quantity.trim().is_empty()
            && self.total_quantity_unit.trim().is_empty()
            && self.total_amount.trim().is_empty()
    }

    pub fn get(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::TotalQuantity => &self.total_quantity,
            HeaderField::TotalQuantityUnit => &self.total_quantity_unit,
            HeaderField::TotalAmount => &self.total_amount,
        }
    }

    fn slot(&mut self, field: HeaderField) -> &mut String {
        match field {
            HeaderField::TotalQuantity => &mut self.total_quantity,
            HeaderField::TotalQuantityUnit => &mut self.total_quantity_unit,
            HeaderField::TotalAmount => &mut self.total_amount,
        }
    }

    pub(crate) fn set(&mut self, field: HeaderField, value: String) {
        *self.slot(field) = value;
    }
}

/// One row of the materials table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    /// Client-side identity for keyed rendering; never sent to the backend
    pub key: Uuid,
    /// Display number, always 1..N in table order
    pub sequence: usize,
    pub description: String,
    pub unit: String,
    pub quantity: String,
    pub rate: String,
    pub amount: String,
}

impl MaterialLine {
    pub fn blank(sequence: usize) -> Self {
        Self {
            key: Uuid::new_v4(),
            sequence,
            description: String::new(),
            unit: String::new(),
            quantity: String::new(),
            rate: String::new(),
            amount: String::new(),
        }
    }

    /// All five user fields are blank
    pub fn is_empty(&self) -> bool {
        [
            &self.description,
            &self.unit,
            &self.quantity,
            &self.rate,
            &self.amount,
        ]
        .iter()
        .all(|v| v.trim().is_empty())
    }

    /// Quantity present and non-zero
    pub fn has_quantity(&self) -> bool {
        parse_nonzero(&self.quantity).is_some()
    }

    pub fn clear_pricing(&mut self) {
        self.rate.clear();
        self.amount.clear();
    }

    pub fn clear_all(&mut self) {
        self.description.clear();
        self.unit.clear();
        self.quantity.clear();
        self.rate.clear();
        self.amount.clear();
    }

    pub fn get(&self, field: LineField) -> &str {
        match field {
            LineField::Description => &self.description,
            LineField::Unit => &self.unit,
            LineField::Quantity => &self.quantity,
            LineField::Rate => &self.rate,
            LineField::Amount => &self.amount,
        }
    }

    pub(crate) fn set(&mut self, field: LineField, value: String) {
        let slot = match field {
            LineField::Description => &mut self.description,
            LineField::Unit => &mut self.unit,
            LineField::Quantity => &mut self.quantity,
            LineField::Rate => &mut self.rate,
            LineField::Amount => &mut self.amount,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    TotalQuantity,
    TotalQuantityUnit,
    TotalAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineField {
    Description,
    Unit,
    Quantity,
    Rate,
    Amount,
}

// ============================================================================
// Field access
// ============================================================================

/// Enabled flags of every editor field. The view renders `disabled` from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAccess {
    /// Header total quantity and its unit
    pub header_quantity: bool,
    pub header_amount: bool,
    /// Line description and unit
    pub line_text: bool,
    pub line_quantity: bool,
    pub line_rate: bool,
    pub line_amount: bool,
    pub add_row: bool,
}

impl Default for FieldAccess {
    fn default() -> Self {
        Self {
            header_quantity: true,
            header_amount: true,
            line_text: true,
            line_quantity: true,
            line_rate: true,
            line_amount: true,
            add_row: true,
        }
    }
}

impl FieldAccess {
    pub fn header_allows(&self, field: HeaderField) -> bool {
        match field {
            HeaderField::TotalQuantity | HeaderField::TotalQuantityUnit => self.header_quantity,
            HeaderField::TotalAmount => self.header_amount,
        }
    }

    pub fn line_allows(&self, field: LineField) -> bool {
        match field {
            LineField::Description | LineField::Unit => self.line_text,
            LineField::Quantity => self.line_quantity,
            LineField::Rate => self.line_rate,
            LineField::Amount => self.line_amount,
        }
    }
}

// ============================================================================
// Scope
// ============================================================================

/// Editor state of one materials block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialScope {
    pub key: ScopeKey,
    pub mode: Option<MaterialMode>,
    pub header: MaterialHeader,
    pub lines: Vec<MaterialLine>,
    pub fields: FieldAccess,
}

impl MaterialScope {
    /// Unset mode with a single blank line
    pub fn new(key: ScopeKey) -> Self {
        Self {
            key,
            mode: None,
            header: MaterialHeader::default(),
            lines: vec![MaterialLine::blank(1)],
            fields: FieldAccess::default(),
        }
    }

    pub fn base() -> Self {
        Self::new(ScopeKey::base())
    }

    /// Nothing entered anywhere
    pub fn is_blank(&self) -> bool {
        self.header.is_empty() && self.lines.iter().all(MaterialLine::is_empty)
    }

    pub fn any_line_quantity(&self) -> bool {
        self.lines.iter().any(MaterialLine::has_quantity)
    }

    /// Header total quantity present and non-zero
    pub fn header_quantity_set(&self) -> bool {
        parse_nonzero(&self.header.total_quantity).is_some()
    }

    pub fn line_index(&self, key: Uuid) -> Option<usize> {
        self.lines.iter().position(|l| l.key == key)
    }

    pub fn renumber(&mut self) {
        for (i, line) in self.lines.iter_mut().enumerate() {
            line.sequence = i + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scope_has_one_blank_line() {
        let scope = MaterialScope::base();
        assert!(scope.key.is_base());
        assert_eq!(scope.mode, None);
        assert_eq!(scope.lines.len(), 1);
        assert_eq!(scope.lines[0].sequence, 1);
        assert!(scope.is_blank());
    }

    #[test]
    fn test_line_quantity_zero_is_absent() {
        let mut line = MaterialLine::blank(1);
        line.quantity = "0".into();
        assert!(!line.has_quantity());
        line.quantity = "abc".into();
        assert!(!line.has_quantity());
        line.quantity = "0.5".into();
        assert!(line.has_quantity());
    }

    #[test]
    fn test_is_empty_ignores_whitespace() {
        let mut line = MaterialLine::blank(1);
        line.description = "   ".into();
        assert!(line.is_empty());
        line.unit = "MT".into();
        assert!(!line.is_empty());
    }

    #[test]
    fn test_dom_key() {
        assert_eq!(ScopeKey::base().dom_key(), "scope-base");
        assert_eq!(
            ScopeKey::pair(AuthorityId(3), AuthorityId(8)).dom_key(),
            "scope-3-8"
        );
    }
}

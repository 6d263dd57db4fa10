use contracts::domain::a001_authority::AuthorityId;
use contracts::domain::a002_booking_material::rules;
use contracts::domain::a002_booking_material::scopes::scope_label;
use contracts::domain::a002_booking_material::{
    HeaderField, LineField, MaterialMode, MaterialScope, ScopeKey,
};
use leptos::prelude::*;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// ViewModel of the per-scope materials accordion.
///
/// Scope state lives in the booking form; every command runs the matching
/// rule from `contracts` on one scope so the signal always holds a state
/// the view can render as is.
#[derive(Clone, Copy)]
pub struct MaterialsEditorViewModel {
    pub scopes: RwSignal<Vec<MaterialScope>>,
    pub titles: RwSignal<HashMap<AuthorityId, String>>,
    pub expanded: RwSignal<HashSet<ScopeKey>>,
}

impl MaterialsEditorViewModel {
    pub fn new(
        scopes: RwSignal<Vec<MaterialScope>>,
        titles: RwSignal<HashMap<AuthorityId, String>>,
    ) -> Self {
        Self {
            scopes,
            titles,
            expanded: RwSignal::new(HashSet::from([ScopeKey::base()])),
        }
    }

    // ------------------------------------------------------------------
    // Queries (tracked)
    // ------------------------------------------------------------------

    pub fn keys(&self) -> Vec<ScopeKey> {
        self.scopes.with(|s| s.iter().map(|scope| scope.key).collect())
    }

    fn read<R>(&self, key: ScopeKey, f: impl FnOnce(&MaterialScope) -> R) -> Option<R> {
        self.scopes
            .with(|s| s.iter().find(|scope| scope.key == key).map(f))
    }

    /// 1-based position shown as "Materials #n"
    pub fn position(&self, key: ScopeKey) -> usize {
        self.scopes
            .with(|s| s.iter().position(|scope| scope.key == key))
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    pub fn label(&self, key: ScopeKey) -> String {
        self.titles.with(|t| scope_label(&key, t))
    }

    pub fn mode(&self, key: ScopeKey) -> Option<MaterialMode> {
        self.read(key, |s| s.mode).flatten()
    }

    pub fn line_keys(&self, key: ScopeKey) -> Vec<Uuid> {
        self.read(key, |s| s.lines.iter().map(|l| l.key).collect())
            .unwrap_or_default()
    }

    pub fn sequence(&self, key: ScopeKey, line: Uuid) -> usize {
        self.read(key, |s| s.lines.iter().find(|l| l.key == line).map(|l| l.sequence))
            .flatten()
            .unwrap_or(0)
    }

    pub fn header_value(&self, key: ScopeKey, field: HeaderField) -> String {
        self.read(key, |s| s.header.get(field).to_string())
            .unwrap_or_default()
    }

    pub fn line_value(&self, key: ScopeKey, line: Uuid, field: LineField) -> String {
        self.read(key, |s| {
            s.lines
                .iter()
                .find(|l| l.key == line)
                .map(|l| l.get(field).to_string())
        })
        .flatten()
        .unwrap_or_default()
    }

    pub fn header_enabled(&self, key: ScopeKey, field: HeaderField) -> bool {
        self.read(key, |s| s.fields.header_allows(field))
            .unwrap_or(false)
    }

    pub fn line_enabled(&self, key: ScopeKey, field: LineField) -> bool {
        self.read(key, |s| s.fields.line_allows(field))
            .unwrap_or(false)
    }

    pub fn can_add_line(&self, key: ScopeKey) -> bool {
        self.read(key, |s| s.fields.add_row).unwrap_or(false)
    }

    /// Removing is offered outside ATTACHED; the last line is replaced by a
    /// blank one.
    pub fn can_remove_line(&self, key: ScopeKey) -> bool {
        self.mode(key) != Some(MaterialMode::Attached)
    }

    pub fn is_expanded(&self, key: ScopeKey) -> bool {
        self.expanded.with(|e| e.contains(&key))
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    fn update(&self, key: ScopeKey, f: impl FnOnce(&mut MaterialScope) -> bool) -> bool {
        let mut applied = false;
        self.scopes.update(|s| {
            if let Some(scope) = s.iter_mut().find(|scope| scope.key == key) {
                applied = f(scope);
            }
        });
        applied
    }

    pub fn toggle(&self, key: ScopeKey) {
        self.expanded.update(|e| {
            if !e.remove(&key) {
                e.insert(key);
            }
        });
    }

    pub fn set_mode(&self, key: ScopeKey, mode: Option<MaterialMode>) {
        self.update(key, |scope| {
            log::debug!(
                "{}: mode {:?} -> {:?}",
                key.dom_key(),
                scope.mode.map(|m| m.code()),
                mode.map(|m| m.code())
            );
            rules::set_mode(scope, mode);
            true
        });
    }

    pub fn set_header(&self, key: ScopeKey, field: HeaderField, value: String) {
        if !self.update(key, |scope| rules::set_header_field(scope, field, value)) {
            log::debug!("{}: edit of disabled header field {:?} refused", key.dom_key(), field);
        }
    }

    pub fn set_line(&self, key: ScopeKey, line: Uuid, field: LineField, value: String) {
        let applied = self.update(key, |scope| match scope.line_index(line) {
            Some(index) => rules::set_line_field(scope, index, field, value),
            None => false,
        });
        if !applied {
            log::debug!("{}: edit of line field {:?} refused", key.dom_key(), field);
        }
    }

    pub fn add_line(&self, key: ScopeKey) {
        if !self.update(key, rules::add_line) {
            log::debug!("{}: add row refused", key.dom_key());
        }
    }

    pub fn remove_line(&self, key: ScopeKey, line: Uuid) {
        let applied = self.update(key, |scope| match scope.line_index(line) {
            Some(index) => rules::remove_line(scope, index),
            None => false,
        });
        if !applied {
            log::debug!("{}: remove row refused", key.dom_key());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> MaterialsEditorViewModel {
        MaterialsEditorViewModel::new(
            RwSignal::new(vec![MaterialScope::base()]),
            RwSignal::new(HashMap::new()),
        )
    }

    #[test]
    fn test_item_line_edits_update_scope() {
        let owner = Owner::new();
        owner.set();

        let vm = editor();
        let key = ScopeKey::base();
        vm.set_mode(key, Some(MaterialMode::Item));
        assert_eq!(vm.mode(key), Some(MaterialMode::Item));

        let line = vm.line_keys(key)[0];
        vm.set_line(key, line, LineField::Quantity, "10".to_string());
        vm.set_line(key, line, LineField::Rate, "2.5".to_string());

        vm.scopes.with_untracked(|scopes| {
            assert_eq!(scopes[0].lines[0].amount, "25.00");
            assert_eq!(scopes[0].header.total_amount, "25.00");
        });

        vm.set_line(key, line, LineField::Amount, "99".to_string());
        assert_eq!(vm.line_value(key, line, LineField::Amount), "25.00");

        vm.set_header(key, HeaderField::TotalQuantity, "5".to_string());
        assert_eq!(vm.header_value(key, HeaderField::TotalQuantity), "");
    }

    #[test]
    fn test_remove_last_line_leaves_blank_row() {
        let owner = Owner::new();
        owner.set();

        let vm = editor();
        let key = ScopeKey::base();
        vm.set_mode(key, Some(MaterialMode::Lumpsum));
        let line = vm.line_keys(key)[0];
        vm.set_line(key, line, LineField::Description, "Steel".to_string());

        vm.remove_line(key, line);
        let lines = vm.line_keys(key);
        assert_eq!(lines.len(), 1);
        assert_ne!(lines[0], line);
        assert_eq!(vm.line_value(key, lines[0], LineField::Description), "");
        assert_eq!(vm.sequence(key, lines[0]), 1);
    }
}

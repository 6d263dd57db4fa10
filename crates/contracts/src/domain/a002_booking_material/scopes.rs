//! One materials scope per loading × unloading authority pair.

use super::aggregate::{MaterialScope, ScopeKey};
use crate::domain::a001_authority::AuthorityId;
use std::collections::HashMap;

fn dedup(ids: &[AuthorityId]) -> Vec<AuthorityId> {
    let mut out: Vec<AuthorityId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}

/// Scope keys for the current selection, loading-major.
/// Either side empty gives the single booking-level scope.
pub fn scope_keys(loading: &[AuthorityId], unloading: &[AuthorityId]) -> Vec<ScopeKey> {
    let loading = dedup(loading);
    let unloading = dedup(unloading);
    if loading.is_empty() || unloading.is_empty() {
        return vec![ScopeKey::base()];
    }
    loading
        .iter()
        .flat_map(|from| unloading.iter().map(move |to| ScopeKey::pair(*from, *to)))
        .collect()
}

/// Rebuilds the scope list for a new selection. Scopes whose pair is still
/// selected keep their state; new pairs start blank.
pub fn build_scopes(
    loading: &[AuthorityId],
    unloading: &[AuthorityId],
    existing: Vec<MaterialScope>,
) -> Vec<MaterialScope> {
    let mut by_key: HashMap<ScopeKey, MaterialScope> =
        existing.into_iter().map(|s| (s.key, s)).collect();
    scope_keys(loading, unloading)
        .into_iter()
        .map(|key| by_key.remove(&key).unwrap_or_else(|| MaterialScope::new(key)))
        .collect()
}

/// `"FROM → TO"` using authority titles, falling back to `#id`.
pub fn scope_label(key: &ScopeKey, titles: &HashMap<AuthorityId, String>) -> String {
    let name = |id: AuthorityId| {
        titles
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("#{}", id))
    };
    match (key.from, key.to) {
        (None, None) => "Booking level".to_string(),
        (Some(from), Some(to)) => format!("{} → {}", name(from), name(to)),
        (Some(from), None) => format!("{} → …", name(from)),
        (None, Some(to)) => format!("… → {}", name(to)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_booking_material::mode::MaterialMode;

    fn ids(values: &[i64]) -> Vec<AuthorityId> {
        values.iter().copied().map(AuthorityId).collect()
    }

    #[test]
    fn test_cartesian_product_loading_major() {
        let keys = scope_keys(&ids(&[1, 2]), &ids(&[10, 20, 30]));
        let pairs: Vec<(i64, i64)> = keys
            .iter()
            .map(|k| (k.from.unwrap().0, k.to.unwrap().0))
            .collect();
        assert_eq!(
            pairs,
            vec![(1, 10), (1, 20), (1, 30), (2, 10), (2, 20), (2, 30)]
        );
    }

    #[test]
    fn test_empty_side_gives_base_scope() {
        assert_eq!(scope_keys(&[], &ids(&[1])), vec![ScopeKey::base()]);
        assert_eq!(scope_keys(&ids(&[1]), &[]), vec![ScopeKey::base()]);
        assert_eq!(scope_keys(&[], &[]), vec![ScopeKey::base()]);
    }

    #[test]
    fn test_duplicates_are_ignored() {
        let keys = scope_keys(&ids(&[1, 1]), &ids(&[2, 2]));
        assert_eq!(keys, vec![ScopeKey::pair(AuthorityId(1), AuthorityId(2))]);
    }

    #[test]
    fn test_rebuild_preserves_surviving_scopes() {
        let mut scopes = build_scopes(&ids(&[1]), &ids(&[2]), Vec::new());
        scopes[0].mode = Some(MaterialMode::Lumpsum);
        scopes[0].header.total_amount = "100".into();

        let rebuilt = build_scopes(&ids(&[1, 3]), &ids(&[2]), scopes);
        assert_eq!(rebuilt.len(), 2);
        assert_eq!(rebuilt[0].mode, Some(MaterialMode::Lumpsum));
        assert_eq!(rebuilt[0].header.total_amount, "100");
        assert_eq!(rebuilt[1].key, ScopeKey::pair(AuthorityId(3), AuthorityId(2)));
        assert_eq!(rebuilt[1].mode, None);

        let dropped = build_scopes(&ids(&[3]), &ids(&[2]), rebuilt);
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].key.from, Some(AuthorityId(3)));
    }

    #[test]
    fn test_scope_label() {
        let titles = HashMap::from([(AuthorityId(1), "Port".to_string())]);
        assert_eq!(scope_label(&ScopeKey::base(), &titles), "Booking level");
        assert_eq!(
            scope_label(&ScopeKey::pair(AuthorityId(1), AuthorityId(9)), &titles),
            "Port → #9"
        );
    }
}

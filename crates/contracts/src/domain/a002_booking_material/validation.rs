//! Advisory checks run before the booking form is submitted.
//! The backend repeats them; passing here is not a guarantee.

use super::aggregate::MaterialScope;
use super::mode::MaterialMode;
use crate::shared::number_format::{parse_nonzero, parse_number};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterialValidationError {
    #[error("select a material mode")]
    ModeNotSelected,
    #[error("item-wise pricing needs at least one line with quantity and rate")]
    ItemWithoutAmounts,
    #[error("lumpsum quantity can be given on the header or on the lines, not both")]
    LumpsumQuantityConflict,
    #[error("lumpsum needs a total amount")]
    LumpsumWithoutAmount,
    #[error("enter the total amount of the attached list")]
    AttachedWithoutAmount,
}

/// Error of one scope; `index` is 1-based as shown in the accordion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Materials #{index} ({label}): {error}")]
pub struct ScopeValidationError {
    pub index: usize,
    pub label: String,
    pub error: MaterialValidationError,
}

pub fn validate_scope(scope: &MaterialScope) -> Result<(), MaterialValidationError> {
    match scope.mode {
        None if scope.is_blank() => Ok(()),
        None => Err(MaterialValidationError::ModeNotSelected),
        Some(MaterialMode::Item) => {
            if scope.lines.iter().any(|l| parse_number(&l.amount).is_some()) {
                Ok(())
            } else {
                Err(MaterialValidationError::ItemWithoutAmounts)
            }
        }
        Some(MaterialMode::Lumpsum) => {
            if scope.header_quantity_set() && scope.any_line_quantity() {
                Err(MaterialValidationError::LumpsumQuantityConflict)
            } else if parse_nonzero(&scope.header.total_amount).is_none() {
                Err(MaterialValidationError::LumpsumWithoutAmount)
            } else {
                Ok(())
            }
        }
        Some(MaterialMode::Attached) => {
            if parse_nonzero(&scope.header.total_amount).is_none() {
                Err(MaterialValidationError::AttachedWithoutAmount)
            } else {
                Ok(())
            }
        }
    }
}

/// Validates every scope; `label` names a scope for the message.
pub fn validate_submission<F>(scopes: &[MaterialScope], label: F) -> Vec<ScopeValidationError>
where
    F: Fn(&MaterialScope) -> String,
{
    scopes
        .iter()
        .enumerate()
        .filter_map(|(i, scope)| {
            validate_scope(scope).err().map(|error| ScopeValidationError {
                index: i + 1,
                label: label(scope),
                error,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_booking_material::rules::{apply_mode_rules, set_mode};

    fn scope(mode: Option<MaterialMode>) -> MaterialScope {
        let mut s = MaterialScope::base();
        s.mode = mode;
        s
    }

    #[test]
    fn test_blank_unset_scope_is_valid() {
        assert_eq!(validate_scope(&scope(None)), Ok(()));
    }

    #[test]
    fn test_unset_scope_with_data_needs_mode() {
        let mut s = scope(None);
        s.lines[0].description = "Coal".into();
        assert_eq!(validate_scope(&s), Err(MaterialValidationError::ModeNotSelected));
    }

    #[test]
    fn test_item_needs_amounts() {
        let mut s = scope(Some(MaterialMode::Item));
        s.lines[0].description = "Coal".into();
        apply_mode_rules(&mut s);
        assert_eq!(validate_scope(&s), Err(MaterialValidationError::ItemWithoutAmounts));

        s.lines[0].quantity = "2".into();
        s.lines[0].rate = "3".into();
        apply_mode_rules(&mut s);
        assert_eq!(validate_scope(&s), Ok(()));
    }

    #[test]
    fn test_lumpsum_conflict_and_amount() {
        let mut s = scope(Some(MaterialMode::Lumpsum));
        s.header.total_quantity = "10".into();
        s.lines[0].quantity = "4".into();
        s.header.total_amount = "100".into();
        assert_eq!(
            validate_scope(&s),
            Err(MaterialValidationError::LumpsumQuantityConflict)
        );

        apply_mode_rules(&mut s);
        assert_eq!(validate_scope(&s), Ok(()));

        s.header.total_amount.clear();
        assert_eq!(validate_scope(&s), Err(MaterialValidationError::LumpsumWithoutAmount));
    }

    #[test]
    fn test_attached_needs_total() {
        let mut s = MaterialScope::base();
        set_mode(&mut s, Some(MaterialMode::Attached));
        assert_eq!(validate_scope(&s), Err(MaterialValidationError::AttachedWithoutAmount));
        s.header.total_amount = "2500".into();
        assert_eq!(validate_scope(&s), Ok(()));
    }

    #[test]
    fn test_submission_errors_are_scope_indexed() {
        let ok = MaterialScope::base();
        let mut bad = MaterialScope::base();
        set_mode(&mut bad, Some(MaterialMode::Attached));

        let errors = validate_submission(&[ok, bad], |_| "Booking level".to_string());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].index, 2);
        assert_eq!(
            errors[0].to_string(),
            "Materials #2 (Booking level): enter the total amount of the attached list"
        );
    }
}

//! Materials carried on a booking and the rules of the materials editor.
//!
//! - `aggregate`: per-scope editor state (header, lines, field access)
//! - `rules`: mode rules, mode-switch cleanup, derived totals, row commands
//! - `payload`: submission payload written into the booking form
//! - `validation`: advisory checks run before submit
//! - `scopes`: one scope per loading × unloading authority pair
//! - `detail`: read-endpoint DTOs and the mode-aware summary for the viewer

pub mod aggregate;
pub mod detail;
pub mod mode;
pub mod payload;
pub mod rules;
pub mod scopes;
pub mod validation;

pub use aggregate::{
    FieldAccess, HeaderField, LineField, MaterialHeader, MaterialLine, MaterialScope, ScopeKey,
    ATTACHED_DESCRIPTION,
};
pub use mode::MaterialMode;

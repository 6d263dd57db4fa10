//! Materials mode rules.
//!
//! Every command mutates a [`MaterialScope`] and leaves it in a state the
//! view can render directly: field access flags are recomputed and derived
//! values (ITEM amounts and totals) are refreshed. Nothing here fails;
//! malformed numbers are treated as absent.

use super::aggregate::{
    FieldAccess, HeaderField, LineField, MaterialLine, MaterialScope, ATTACHED_DESCRIPTION,
};
use super::mode::MaterialMode;
use crate::shared::number_format::{format_decimal2, parse_number, round2};

/// Recomputes field access and derived values for the current mode.
/// An unset mode leaves the scope untouched.
pub fn apply_mode_rules(scope: &mut MaterialScope) {
    match scope.mode {
        None => {}
        Some(MaterialMode::Item) => apply_item_rules(scope),
        Some(MaterialMode::Lumpsum) => apply_lumpsum_rules(scope),
        Some(MaterialMode::Attached) => apply_attached_rules(scope),
    }
}

fn apply_item_rules(scope: &mut MaterialScope) {
    scope.header.clear_quantity();
    scope.fields = FieldAccess {
        header_quantity: false,
        header_amount: false,
        line_text: true,
        line_quantity: true,
        line_rate: true,
        line_amount: false,
        add_row: true,
    };
    compute_item_totals(scope);
}

fn apply_lumpsum_rules(scope: &mut MaterialScope) {
    for line in &mut scope.lines {
        line.clear_pricing();
    }

    let mut fields = FieldAccess {
        header_quantity: true,
        header_amount: true,
        line_text: true,
        line_quantity: true,
        line_rate: false,
        line_amount: false,
        add_row: true,
    };

    // Line quantities win when both sides carry one (e.g. loaded data).
    if scope.any_line_quantity() {
        fields.header_quantity = false;
        scope.header.clear_quantity();
    } else if scope.header_quantity_set() {
        fields.line_quantity = false;
        for line in &mut scope.lines {
            line.quantity.clear();
        }
    }

    scope.fields = fields;
}

fn apply_attached_rules(scope: &mut MaterialScope) {
    normalize_attached(scope);
    scope.header.clear_quantity();
    scope.fields = FieldAccess {
        header_quantity: false,
        header_amount: true,
        line_text: false,
        line_quantity: false,
        line_rate: false,
        line_amount: false,
        add_row: false,
    };
}

/// Cleanup run when the mode changes from `previous` to `next`, before
/// [`apply_mode_rules`]. Pairs without a rule (including unset modes and
/// `previous == next`) leave the scope unchanged.
pub fn on_mode_change(
    scope: &mut MaterialScope,
    previous: Option<MaterialMode>,
    next: Option<MaterialMode>,
) {
    let (Some(previous), Some(next)) = (previous, next) else {
        return;
    };

    match (previous, next) {
        (MaterialMode::Item, MaterialMode::Lumpsum)
        | (MaterialMode::Attached, MaterialMode::Lumpsum) => {
            for line in &mut scope.lines {
                line.clear_pricing();
            }
        }
        (MaterialMode::Item, MaterialMode::Attached)
        | (MaterialMode::Lumpsum, MaterialMode::Attached) => {
            for line in &mut scope.lines {
                line.clear_all();
            }
            scope.header.clear_quantity();
        }
        (MaterialMode::Attached, MaterialMode::Item)
        | (MaterialMode::Lumpsum, MaterialMode::Item) => {
            scope.header.clear_quantity();
            for line in &mut scope.lines {
                line.amount.clear();
            }
        }
        _ => {}
    }
}

/// Switches the scope to `next`: cleanup from the remembered mode, then rules.
pub fn set_mode(scope: &mut MaterialScope, next: Option<MaterialMode>) {
    let previous = scope.mode;
    if previous != next {
        on_mode_change(scope, previous, next);
        scope.mode = next;
    }
    apply_mode_rules(scope);
}

/// ITEM only: `amount = round(quantity × rate, 2)` per line and the header
/// total as the sum of line amounts. Blank when inputs are missing or the
/// total is zero.
pub fn compute_item_totals(scope: &mut MaterialScope) {
    if scope.mode != Some(MaterialMode::Item) {
        return;
    }

    let mut total = 0.0;
    for line in &mut scope.lines {
        match (parse_number(&line.quantity), parse_number(&line.rate)) {
            (Some(quantity), Some(rate)) => {
                let amount = round2(quantity * rate);
                total += amount;
                line.amount = format_decimal2(amount);
            }
            _ => line.amount.clear(),
        }
    }

    let total = round2(total);
    scope.header.total_amount = if total == 0.0 {
        String::new()
    } else {
        format_decimal2(total)
    };
}

/// Leaves exactly one line carrying the fixed ATTACHED description.
pub fn normalize_attached(scope: &mut MaterialScope) {
    let mut line = scope
        .lines
        .drain(..)
        .next()
        .unwrap_or_else(|| MaterialLine::blank(1));
    line.clear_all();
    line.description = ATTACHED_DESCRIPTION.to_string();
    line.sequence = 1;
    scope.lines = vec![line];
}

/// Appends a blank line. Refused in ATTACHED mode.
pub fn add_line(scope: &mut MaterialScope) -> bool {
    if scope.mode == Some(MaterialMode::Attached) {
        return false;
    }
    scope.lines.push(MaterialLine::blank(scope.lines.len() + 1));
    scope.renumber();
    apply_mode_rules(scope);
    true
}

/// Removes the line at `index`; the table never ends up empty.
/// Refused in ATTACHED mode or for an unknown index.
pub fn remove_line(scope: &mut MaterialScope, index: usize) -> bool {
    if scope.mode == Some(MaterialMode::Attached) || index >= scope.lines.len() {
        return false;
    }
    scope.lines.remove(index);
    if scope.lines.is_empty() {
        scope.lines.push(MaterialLine::blank(1));
    }
    scope.renumber();
    apply_mode_rules(scope);
    true
}

/// Writes user input into a header field. Disabled fields reject the edit.
pub fn set_header_field(scope: &mut MaterialScope, field: HeaderField, value: String) -> bool {
    if !scope.fields.header_allows(field) {
        return false;
    }
    scope.header.set(field, value);
    apply_mode_rules(scope);
    true
}

/// Writes user input into a line field. Disabled fields and unknown rows
/// reject the edit.
pub fn set_line_field(
    scope: &mut MaterialScope,
    index: usize,
    field: LineField,
    value: String,
) -> bool {
    if !scope.fields.line_allows(field) {
        return false;
    }
    let Some(line) = scope.lines.get_mut(index) else {
        return false;
    };
    line.set(field, value);
    apply_mode_rules(scope);
    true
}

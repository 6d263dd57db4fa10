use contracts::domain::a002_booking_material::detail::{summarize, LabelledBlock, SummaryRow};
use contracts::domain::a002_booking_material::MaterialMode;
use contracts::shared::number_format::fmt_money;
use leptos::prelude::*;

fn row_cells(mode: MaterialMode, row: SummaryRow) -> Vec<String> {
    let sl = row.sl.to_string();
    match mode {
        MaterialMode::Item => vec![sl, row.description, row.qty_unit, row.rate, row.amount],
        MaterialMode::Lumpsum => vec![sl, row.description, row.qty_unit, row.amount],
        MaterialMode::Attached => vec![sl, row.description, row.amount],
    }
}

/// Read-only materials table of one saved block, laid out by its mode.
#[component]
pub fn MaterialSummaryTable(block: LabelledBlock) -> impl IntoView {
    let summary = summarize(&block.block);
    let mode = summary.mode;
    let columns = summary.columns();
    let span = columns.len() - 1;
    let total = fmt_money(summary.total_amount);

    let header = columns
        .iter()
        .map(|c| view! { <th>{*c}</th> })
        .collect_view();

    let rows = summary
        .rows
        .into_iter()
        .map(|row| {
            let cells = row_cells(mode, row)
                .into_iter()
                .map(|c| view! { <td>{c}</td> })
                .collect_view();
            view! { <tr>{cells}</tr> }
        })
        .collect_view();

    view! {
        <section class="material-summary">
            <h4 class="material-summary__title">
                {block.label}
                <span class="material-summary__mode">{mode.display_name()}</span>
            </h4>
            <table class="table material-summary__table">
                <thead>
                    <tr>{header}</tr>
                </thead>
                <tbody>{rows}</tbody>
                <tfoot>
                    <tr class="table__totals-row">
                        <td colspan=span.to_string()>"Total"</td>
                        <td>{total}</td>
                    </tr>
                </tfoot>
            </table>
        </section>
    }
}

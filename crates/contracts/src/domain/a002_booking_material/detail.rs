//! Read side: `GET /api/bookings/{id}/materials` and the mode-aware summary
//! used by the booking-detail viewer.

use super::mode::MaterialMode;
use super::payload::MaterialPayload;
use crate::shared::number_format::{fmt_money, fmt_qty_unit, parse_number, round2};
use serde::{Deserialize, Deserializer, Serialize};

/// Description printed on the single row of an ATTACHED summary
pub const ATTACHED_SUMMARY_DESCRIPTION: &str = "As per list attached";

// ============================================================================
// Lenient field decoding
// ============================================================================

/// Numbers may arrive as JSON numbers, numeric strings, blanks or null.
fn de_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(serde_json::Value::String(s)) => parse_number(&s),
        _ => None,
    })
}

fn de_lenient_mode<'de, D>(deserializer: D) -> Result<Option<MaterialMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(MaterialMode::parse))
}

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialHeaderDto {
    #[serde(default, deserialize_with = "de_lenient_number")]
    pub total_quantity: Option<f64>,
    #[serde(default)]
    pub total_quantity_unit: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_number")]
    pub total_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialLineDto {
    #[serde(default)]
    pub sequence_index: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_number")]
    pub rate: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_number")]
    pub amount: Option<f64>,
}

/// One `{mode, header, lines}` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialBlockDto {
    #[serde(default, deserialize_with = "de_lenient_mode")]
    pub mode: Option<MaterialMode>,
    #[serde(default)]
    pub header: MaterialHeaderDto,
    #[serde(default)]
    pub lines: Vec<MaterialLineDto>,
    #[serde(default)]
    pub from_title: Option<String>,
    #[serde(default)]
    pub to_title: Option<String>,
    #[serde(default)]
    pub authority_title: Option<String>,
}

impl MaterialBlockDto {
    fn has_content(&self) -> bool {
        self.mode.is_some()
            || !self.lines.is_empty()
            || self.header.total_amount.is_some()
            || self.header.total_quantity.is_some()
    }
}

/// Block of a payload that has not been saved yet (review before submit)
impl From<&MaterialPayload> for MaterialBlockDto {
    fn from(payload: &MaterialPayload) -> Self {
        Self {
            mode: payload.mode,
            header: MaterialHeaderDto {
                total_quantity: payload.total_quantity,
                total_quantity_unit: payload.total_quantity_unit.clone(),
                total_amount: payload.total_amount,
            },
            lines: payload
                .lines
                .iter()
                .enumerate()
                .map(|(i, l)| MaterialLineDto {
                    sequence_index: Some(i as i64 + 1),
                    description: Some(l.description.clone()),
                    unit: l.unit.clone(),
                    quantity: l.quantity,
                    rate: l.rate,
                    amount: l.amount,
                })
                .collect(),
            ..Default::default()
        }
    }
}

/// Either the legacy single-scope shape or the multi-scope shape.
/// Multi-scope is recognised by any of its arrays being present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingMaterialsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,

    // legacy
    #[serde(default)]
    pub has_materials: Option<bool>,
    #[serde(default, deserialize_with = "de_lenient_mode")]
    pub mode: Option<MaterialMode>,
    #[serde(default)]
    pub header: MaterialHeaderDto,
    #[serde(default)]
    pub lines: Vec<MaterialLineDto>,

    // multi-scope
    #[serde(default)]
    pub from_to: Option<Vec<MaterialBlockDto>>,
    #[serde(default)]
    pub loading: Option<Vec<MaterialBlockDto>>,
    #[serde(default)]
    pub unloading: Option<Vec<MaterialBlockDto>>,
    #[serde(default)]
    pub booking_level: Option<Vec<MaterialBlockDto>>,
}

/// Block with the caption shown above its table
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledBlock {
    pub label: String,
    pub block: MaterialBlockDto,
}

fn title_or(value: &Option<String>, fallback: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

impl BookingMaterialsResponse {
    pub fn is_multi_scope(&self) -> bool {
        self.from_to.is_some()
            || self.loading.is_some()
            || self.unloading.is_some()
            || self.booking_level.is_some()
    }

    pub fn into_result(self) -> Result<Self, String> {
        if self.success {
            Ok(self)
        } else {
            Err(self
                .error
                .unwrap_or_else(|| "Materials could not be loaded".to_string()))
        }
    }

    /// Flattens both shapes into captioned blocks, skipping empty ones.
    pub fn blocks(&self) -> Vec<LabelledBlock> {
        if !self.is_multi_scope() {
            let block = MaterialBlockDto {
                mode: self.mode,
                header: self.header.clone(),
                lines: self.lines.clone(),
                ..Default::default()
            };
            if self.has_materials == Some(false) || !block.has_content() {
                return Vec::new();
            }
            return vec![LabelledBlock {
                label: "Materials".to_string(),
                block,
            }];
        }

        let mut out = Vec::new();
        for block in self.from_to.iter().flatten() {
            out.push(LabelledBlock {
                label: format!(
                    "{} → {}",
                    title_or(&block.from_title, "?"),
                    title_or(&block.to_title, "?")
                ),
                block: block.clone(),
            });
        }
        for block in self.loading.iter().flatten() {
            out.push(LabelledBlock {
                label: format!("Loading: {}", title_or(&block.authority_title, "?")),
                block: block.clone(),
            });
        }
        for block in self.unloading.iter().flatten() {
            out.push(LabelledBlock {
                label: format!("Unloading: {}", title_or(&block.authority_title, "?")),
                block: block.clone(),
            });
        }
        for block in self.booking_level.iter().flatten() {
            out.push(LabelledBlock {
                label: "Booking level".to_string(),
                block: block.clone(),
            });
        }
        out.retain(|b| b.block.has_content());
        out
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Where a LUMPSUM block's quantity is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantitySource {
    Header,
    Lines,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub sl: usize,
    pub description: String,
    pub qty_unit: String,
    pub rate: String,
    pub amount: String,
}

/// Table-ready projection of a block
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSummary {
    pub mode: MaterialMode,
    pub rows: Vec<SummaryRow>,
    pub total_amount: Option<f64>,
    pub quantity_source: QuantitySource,
}

impl MaterialSummary {
    /// Column headers for the mode
    pub fn columns(&self) -> &'static [&'static str] {
        match self.mode {
            MaterialMode::Item => &[
                "Sl no",
                "Description",
                "Qty/Unit",
                "Value of each item (Rs.)",
                "Total value (Rs.)",
            ],
            MaterialMode::Lumpsum => &["Sl no", "Description", "Qty/Unit", "Amount (Rs.)"],
            MaterialMode::Attached => &["Sl no", "Description", "Amount (Rs.)"],
        }
    }
}

fn sorted_lines(block: &MaterialBlockDto) -> Vec<&MaterialLineDto> {
    let mut lines: Vec<&MaterialLineDto> = block.lines.iter().collect();
    lines.sort_by_key(|l| l.sequence_index.unwrap_or(0));
    lines
}

fn description(line: &MaterialLineDto) -> String {
    line.description.clone().unwrap_or_default()
}

/// Mode-aware summary. A missing mode is read as ITEM.
pub fn summarize(block: &MaterialBlockDto) -> MaterialSummary {
    match block.mode.unwrap_or(MaterialMode::Item) {
        MaterialMode::Item => summarize_item(block),
        MaterialMode::Lumpsum => summarize_lumpsum(block),
        MaterialMode::Attached => summarize_attached(block),
    }
}

fn summarize_item(block: &MaterialBlockDto) -> MaterialSummary {
    let lines = sorted_lines(block);
    let total: f64 = lines.iter().filter_map(|l| l.amount).sum();

    let rows = if lines.is_empty() {
        vec![SummaryRow {
            sl: 1,
            description: "-".to_string(),
            qty_unit: String::new(),
            rate: String::new(),
            amount: String::new(),
        }]
    } else {
        lines
            .iter()
            .enumerate()
            .map(|(i, l)| SummaryRow {
                sl: i + 1,
                description: description(l),
                qty_unit: fmt_qty_unit(l.quantity, l.unit.as_deref()),
                rate: fmt_money(l.rate),
                amount: fmt_money(l.amount),
            })
            .collect()
    };

    MaterialSummary {
        mode: MaterialMode::Item,
        rows,
        total_amount: Some(round2(total)),
        quantity_source: QuantitySource::Lines,
    }
}

fn summarize_lumpsum(block: &MaterialBlockDto) -> MaterialSummary {
    let lines = sorted_lines(block);
    let any_line_qty = lines
        .iter()
        .any(|l| l.quantity.is_some_and(|q| q != 0.0));
    let header_qty = fmt_qty_unit(
        block.header.total_quantity.filter(|q| *q != 0.0),
        block.header.total_quantity_unit.as_deref(),
    );
    let amount = fmt_money(block.header.total_amount);

    let quantity_source = if any_line_qty {
        QuantitySource::Lines
    } else if header_qty.is_empty() {
        QuantitySource::None
    } else {
        QuantitySource::Header
    };

    let rows = if lines.is_empty() {
        vec![SummaryRow {
            sl: 1,
            description: "-".to_string(),
            qty_unit: header_qty,
            rate: String::new(),
            amount,
        }]
    } else {
        lines
            .iter()
            .enumerate()
            .map(|(i, l)| SummaryRow {
                sl: i + 1,
                description: description(l),
                qty_unit: match quantity_source {
                    QuantitySource::Lines => fmt_qty_unit(l.quantity, l.unit.as_deref()),
                    _ if i == 0 => header_qty.clone(),
                    _ => String::new(),
                },
                rate: String::new(),
                amount: if i == 0 { amount.clone() } else { String::new() },
            })
            .collect()
    };

    MaterialSummary {
        mode: MaterialMode::Lumpsum,
        rows,
        total_amount: block.header.total_amount,
        quantity_source,
    }
}

fn summarize_attached(block: &MaterialBlockDto) -> MaterialSummary {
    MaterialSummary {
        mode: MaterialMode::Attached,
        rows: vec![SummaryRow {
            sl: 1,
            description: ATTACHED_SUMMARY_DESCRIPTION.to_string(),
            qty_unit: String::new(),
            rate: String::new(),
            amount: fmt_money(block.header.total_amount),
        }],
        total_amount: block.header.total_amount,
        quantity_source: QuantitySource::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> BookingMaterialsResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_legacy_shape() {
        let resp = parse(
            r#"{"success":true,"has_materials":true,"mode":"item",
                "header":{"total_amount":"25"},
                "lines":[{"description":"Cement","quantity":10,"rate":"2.5","amount":25}]}"#,
        );
        assert!(!resp.is_multi_scope());
        let blocks = resp.blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].label, "Materials");
        assert_eq!(blocks[0].block.mode, Some(MaterialMode::Item));
        assert_eq!(blocks[0].block.lines[0].rate, Some(2.5));
    }

    #[test]
    fn test_legacy_without_materials() {
        let resp = parse(r#"{"success":true,"has_materials":false}"#);
        assert!(resp.blocks().is_empty());
    }

    #[test]
    fn test_multi_scope_shape() {
        let resp = parse(
            r#"{"success":true,
                "from_to":[{"mode":"ATTACHED","header":{"total_amount":900},"lines":[],
                            "from_title":"Port","to_title":"Depot"}],
                "loading":[],
                "booking_level":[{"mode":"LUMPSUM","header":{"total_amount":10}}]}"#,
        );
        assert!(resp.is_multi_scope());
        let labels: Vec<String> = resp.blocks().into_iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["Port → Depot", "Booking level"]);
    }

    #[test]
    fn test_block_from_payload() {
        use crate::domain::a002_booking_material::payload::MaterialLinePayload;

        let payload = MaterialPayload {
            mode: Some(MaterialMode::Item),
            total_quantity: None,
            total_quantity_unit: None,
            total_amount: Some(50.0),
            lines: vec![MaterialLinePayload {
                description: "Steel".into(),
                unit: Some("kg".into()),
                quantity: Some(5.0),
                rate: Some(10.0),
                amount: Some(50.0),
            }],
        };
        let summary = summarize(&MaterialBlockDto::from(&payload));
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].description, "Steel");
        assert_eq!(summary.total_amount, Some(50.0));
    }

    #[test]
    fn test_failed_response() {
        let resp = parse(r#"{"success":false,"error":"Booking not found"}"#);
        assert_eq!(resp.into_result(), Err("Booking not found".to_string()));
    }

    #[test]
    fn test_malformed_numbers_are_absent() {
        let resp = parse(
            r#"{"success":true,"mode":"LUMPSUM","header":{"total_quantity":"n/a","total_amount":null},
                "lines":[{"description":"x","quantity":"","rate":true}]}"#,
        );
        assert_eq!(resp.header.total_quantity, None);
        assert_eq!(resp.lines[0].quantity, None);
        assert_eq!(resp.lines[0].rate, None);
    }

    #[test]
    fn test_item_summary() {
        let block = MaterialBlockDto {
            mode: Some(MaterialMode::Item),
            lines: vec![
                MaterialLineDto {
                    sequence_index: Some(2),
                    description: Some("Steel".into()),
                    quantity: Some(2.0),
                    unit: Some("MT".into()),
                    rate: Some(100.0),
                    amount: Some(200.0),
                },
                MaterialLineDto {
                    sequence_index: Some(1),
                    description: Some("Cement".into()),
                    quantity: Some(10.0),
                    rate: Some(2.5),
                    amount: Some(25.0),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let summary = summarize(&block);
        assert_eq!(summary.rows[0].description, "Cement");
        assert_eq!(summary.rows[0].amount, "25.00");
        assert_eq!(summary.rows[1].qty_unit, "2 MT");
        assert_eq!(summary.rows[1].rate, "100.00");
        assert_eq!(summary.total_amount, Some(225.0));
        assert_eq!(summary.columns().len(), 5);
    }

    #[test]
    fn test_missing_mode_reads_as_item() {
        let summary = summarize(&MaterialBlockDto::default());
        assert_eq!(summary.mode, MaterialMode::Item);
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].description, "-");
        assert_eq!(summary.total_amount, Some(0.0));
    }

    #[test]
    fn test_lumpsum_header_quantity_on_first_row_only() {
        let block = MaterialBlockDto {
            mode: Some(MaterialMode::Lumpsum),
            header: MaterialHeaderDto {
                total_quantity: Some(100.0),
                total_quantity_unit: Some("MT".into()),
                total_amount: Some(5000.0),
            },
            lines: vec![
                MaterialLineDto {
                    description: Some("Sand".into()),
                    ..Default::default()
                },
                MaterialLineDto {
                    description: Some("Gravel".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let summary = summarize(&block);
        assert_eq!(summary.quantity_source, QuantitySource::Header);
        assert_eq!(summary.rows[0].qty_unit, "100 MT");
        assert_eq!(summary.rows[0].amount, "5000.00");
        assert_eq!(summary.rows[1].qty_unit, "");
        assert_eq!(summary.rows[1].amount, "");
    }

    #[test]
    fn test_lumpsum_line_quantities_hide_header() {
        let block = MaterialBlockDto {
            mode: Some(MaterialMode::Lumpsum),
            header: MaterialHeaderDto {
                total_quantity: Some(100.0),
                total_quantity_unit: Some("MT".into()),
                total_amount: Some(50.0),
            },
            lines: vec![
                MaterialLineDto {
                    description: Some("Sand".into()),
                    quantity: Some(3.0),
                    unit: Some("MT".into()),
                    ..Default::default()
                },
                MaterialLineDto {
                    description: Some("Gravel".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let summary = summarize(&block);
        assert_eq!(summary.quantity_source, QuantitySource::Lines);
        assert_eq!(summary.rows[0].qty_unit, "3 MT");
        assert_eq!(summary.rows[1].qty_unit, "");
        assert!(summary.rows.iter().all(|r| !r.qty_unit.contains("100")));
    }

    #[test]
    fn test_attached_summary() {
        let block = MaterialBlockDto {
            mode: Some(MaterialMode::Attached),
            header: MaterialHeaderDto {
                total_amount: Some(1234.5),
                ..Default::default()
            },
            ..Default::default()
        };
        let summary = summarize(&block);
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].description, "As per list attached");
        assert_eq!(summary.rows[0].amount, "1234.50");
        assert_eq!(summary.columns(), &["Sl no", "Description", "Amount (Rs.)"]);
    }
}

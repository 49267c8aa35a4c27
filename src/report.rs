//! Display-ready rendering of breakdown structures.
//!
//! Turns the engine's intermediate rows into labeled rows grouped by
//! computation stage, so a caller can show the derivation step by step.
//! Non-integer numeric fields use fixed 2-decimal formatting; cumulative
//! frequencies print as plain integers when integral.

use comfy_table::{Cell, CellAlignment, ContentArrangement, Row as CRow, Table, presets::ASCII_MARKDOWN};
use serde_derive::{Deserialize, Serialize};

use crate::breakdown::{Breakdown, GroupedBreakdown, UngroupedBreakdown};
use crate::error::DataStatus;

// ── Stage titles ─────────────────────────────────────────────────────
const STAGE_MIDPOINTS: &str = "Midpoints (x_mid)";
const STAGE_FX: &str = "f * x_mid";
const STAGE_CUMULATIVE: &str = "Cumulative Frequency (cf)";
const STAGE_DEV_SQ: &str = "(x_mid - Mean)^2";
const STAGE_F_DEV_SQ: &str = "f * (x_mid - Mean)^2";

const STAGE_VALUES: &str = "Values (x)";
const STAGE_FREQUENCIES: &str = "Frequencies (f)";
const STAGE_DEVIATION: &str = "x - Mean";
const STAGE_VALUE_DEV_SQ: &str = "(x - Mean)^2";

const PLACEHOLDER_EMPTY: &str = "Total frequency is zero. Cannot compute statistics.";

/// One labeled display row; the key is the class label or the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub key: String,
    pub text: String,
}

/// All display rows of one computation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSection {
    pub title: String,
    pub rows: Vec<DisplayRow>,
}

/// Stage-grouped rendering of a breakdown, or a single placeholder when
/// the breakdown carries no rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownReport {
    Stages(Vec<StageSection>),
    Placeholder(String),
}

impl BreakdownReport {
    pub fn from_breakdown(breakdown: &Breakdown) -> Self {
        match breakdown {
            Breakdown::Grouped(b) => Self::from_grouped(b),
            Breakdown::Ungrouped(b) => Self::from_ungrouped(b),
        }
    }

    pub fn from_grouped(breakdown: &GroupedBreakdown) -> Self {
        if let Some(text) = placeholder_for(breakdown.status()) {
            return BreakdownReport::Placeholder(text);
        }

        let rows = breakdown.rows();
        let mut sections = vec![
            stage(STAGE_MIDPOINTS, rows.iter().map(|r| {
                (r.class.clone(), fmt_fixed(r.midpoint))
            })),
            stage(STAGE_FX, rows.iter().map(|r| (r.class.clone(), fmt_fixed(r.fx)))),
            stage(STAGE_CUMULATIVE, rows.iter().map(|r| {
                (r.class.clone(), fmt_count(r.cumulative))
            })),
        ];
        if rows.iter().all(|r| r.deviation_sq.is_some()) {
            sections.push(stage(STAGE_DEV_SQ, rows.iter().map(|r| {
                (r.class.clone(), fmt_fixed(r.deviation_sq.unwrap_or_default()))
            })));
            sections.push(stage(STAGE_F_DEV_SQ, rows.iter().map(|r| {
                (r.class.clone(), fmt_fixed(r.f_deviation_sq.unwrap_or_default()))
            })));
        }
        BreakdownReport::Stages(sections)
    }

    pub fn from_ungrouped(breakdown: &UngroupedBreakdown) -> Self {
        if let Some(text) = placeholder_for(breakdown.status()) {
            return BreakdownReport::Placeholder(text);
        }

        let rows = breakdown.rows();
        let mut sections = vec![
            stage(STAGE_VALUES, rows.iter().map(|r| {
                (fmt_key(r.value), fmt_fixed(r.value))
            })),
            stage(STAGE_FREQUENCIES, rows.iter().map(|r| {
                (fmt_key(r.value), fmt_count(r.frequency))
            })),
            stage(STAGE_CUMULATIVE, rows.iter().map(|r| {
                (fmt_key(r.value), fmt_count(r.cumulative))
            })),
        ];
        if rows.iter().all(|r| r.deviation.is_some()) {
            sections.push(stage(STAGE_DEVIATION, rows.iter().map(|r| {
                (fmt_key(r.value), fmt_fixed(r.deviation.unwrap_or_default()))
            })));
            sections.push(stage(STAGE_VALUE_DEV_SQ, rows.iter().map(|r| {
                (fmt_key(r.value), fmt_fixed(r.deviation_sq.unwrap_or_default()))
            })));
        }
        BreakdownReport::Stages(sections)
    }

    /// Render as an ASCII markdown table: Stage | Key | Value.
    pub fn render_table(&self) -> String {
        let mut t = Table::new();
        t.load_preset(ASCII_MARKDOWN);
        t.set_content_arrangement(ContentArrangement::Dynamic);
        t.set_header(vec!["Stage", "Key", "Value"]);
        match self {
            BreakdownReport::Placeholder(text) => {
                let mut row = CRow::new();
                row.add_cell(Cell::new("-").set_alignment(CellAlignment::Center));
                row.add_cell(Cell::new("-").set_alignment(CellAlignment::Center));
                row.add_cell(Cell::new(text).set_alignment(CellAlignment::Left));
                t.add_row(row);
            }
            BreakdownReport::Stages(sections) => {
                for section in sections {
                    for dr in &section.rows {
                        let mut row = CRow::new();
                        row.add_cell(Cell::new(&section.title).set_alignment(CellAlignment::Left));
                        row.add_cell(Cell::new(&dr.key).set_alignment(CellAlignment::Left));
                        row.add_cell(Cell::new(&dr.text).set_alignment(CellAlignment::Right));
                        t.add_row(row);
                    }
                }
            }
        }
        t.to_string()
    }
}

fn stage<I>(title: &str, rows: I) -> StageSection
where
    I: Iterator<Item = (String, String)>,
{
    StageSection {
        title: title.to_string(),
        rows: rows
            .map(|(key, text)| DisplayRow { key, text })
            .collect(),
    }
}

fn placeholder_for(status: &DataStatus) -> Option<String> {
    match status {
        DataStatus::Ok => None,
        DataStatus::Empty => Some(PLACEHOLDER_EMPTY.to_string()),
        DataStatus::Invalid { reason } => Some(format!(
            "Invalid or insufficient data for computation: {reason}."
        )),
    }
}

/// Fixed 2-decimal rendering for derived (usually non-integer) fields.
fn fmt_fixed(v: f64) -> String {
    format!("{v:.2}")
}

/// Counts print as integers when integral, 2-decimal otherwise.
fn fmt_count(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// Row key for ungrouped rows: the value itself, without trailing zeros.
fn fmt_key(v: f64) -> String {
    format!("{v}")
}

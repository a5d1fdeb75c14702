//! Report generation
//!
//! Projects the resolved class set and aggregated metrics into the external
//! JSON shape and writes it to any `Write` target.

use std::io::{self, Write};

use serde::Serialize;

use crate::hierarchy::ClassMetrics;
use crate::metrics::compute_metrics;

/// One class in the report; `parentClass` is omitted for roots
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub class_name: String,
    pub number_of_children: usize,
    pub depth_of_inheritance: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_class: Option<String>,
}

/// The complete analysis result.
///
/// NaN ratios (zero total denominator) serialize as `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub classes: Vec<ClassSummary>,
    pub mif: f64,
    pub aif: f64,
    pub mhf: f64,
    pub ahf: f64,
    pub pof: f64,
    pub max_number_of_children: usize,
    pub max_depth_of_inheritance: usize,
}

/// Build the report from the resolved class set, preserving resolution order
pub fn build_report(classes: &[ClassMetrics]) -> AnalysisReport {
    let metrics = compute_metrics(classes);

    let classes = classes
        .iter()
        .map(|class| ClassSummary {
            class_name: class.class_name.clone(),
            number_of_children: class.number_of_children,
            depth_of_inheritance: class.depth_of_inheritance,
            parent_class: if class.parent_class_name.is_empty() {
                None
            } else {
                Some(class.parent_class_name.clone())
            },
        })
        .collect();

    AnalysisReport {
        classes,
        mif: metrics.mif,
        aif: metrics.aif,
        mhf: metrics.mhf,
        ahf: metrics.ahf,
        pof: metrics.pof,
        max_number_of_children: metrics.max_number_of_children,
        max_depth_of_inheritance: metrics.max_depth_of_inheritance,
    }
}

/// Write the report as JSON, pretty-printed unless `compact`
pub fn write_report<W: Write>(
    report: &AnalysisReport,
    writer: &mut W,
    compact: bool,
) -> io::Result<()> {
    if compact {
        serde_json::to_writer(&mut *writer, report)?;
    } else {
        serde_json::to_writer_pretty(&mut *writer, report)?;
    }
    writeln!(writer)
}

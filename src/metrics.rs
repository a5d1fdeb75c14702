//! MOOD metric aggregation
//!
//! The five ratios are aggregate fractions: the sum of per-class numerators
//! over the sum of per-class denominators across the whole class set. A mean
//! of per-class ratios would weight every class equally; the aggregate form
//! lets classes with more members dominate, which is what the MOOD
//! definitions call for.

use serde::Serialize;

use crate::hierarchy::ClassMetrics;

/// Program-wide MOOD ratios and hierarchy maxima.
///
/// A ratio with a zero total denominator is NaN (serialized as JSON `null`),
/// not an error.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodMetrics {
    /// Method Inheritance Factor
    pub mif: f64,
    /// Attribute Inheritance Factor
    pub aif: f64,
    /// Method Hiding Factor
    pub mhf: f64,
    /// Attribute Hiding Factor
    pub ahf: f64,
    /// Polymorphism Factor
    pub pof: f64,
    pub max_number_of_children: usize,
    pub max_depth_of_inheritance: usize,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        f64::NAN
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Aggregate the resolved class set into program-wide metrics
pub fn compute_metrics(classes: &[ClassMetrics]) -> MoodMetrics {
    let mut mif_num = 0;
    let mut mif_den = 0;
    let mut aif_num = 0;
    let mut aif_den = 0;
    let mut mhf_num = 0;
    let mut ahf_num = 0;
    let mut pof_num = 0;
    let mut pof_den = 0;

    for class in classes {
        mif_num += class.methods.inherited.len() + class.methods.own.len();
        mif_den += class.methods.len();
        aif_num += class.attributes.inherited.len() + class.attributes.own.len();
        aif_den += class.attributes.len();
        mhf_num += class.methods.private_count;
        ahf_num += class.attributes.private_count;
        pof_num += class.methods.inherited.len() + class.methods.overridden.len();
        pof_den += class.methods.own.len() * class.number_of_children;
    }

    MoodMetrics {
        mif: ratio(mif_num, mif_den),
        aif: ratio(aif_num, aif_den),
        mhf: ratio(mhf_num, mif_den),
        ahf: ratio(ahf_num, aif_den),
        pof: ratio(pof_num, pof_den),
        max_number_of_children: classes.iter().map(|c| c.number_of_children).max().unwrap_or(0),
        max_depth_of_inheritance: classes
            .iter()
            .map(|c| c.depth_of_inheritance)
            .max()
            .unwrap_or(0),
    }
}

//! # pymood - MOOD Metrics for Python
//!
//! Computes the MOOD suite of object-oriented design-quality metrics and
//! structural hierarchy statistics for Python projects.
//!
//! ## Metrics
//!
//! 1. **MIF / AIF** - Method/Attribute Inheritance Factor: aggregate fraction
//!    of methods/attributes originating from an ancestor vs. newly declared
//! 2. **MHF / AHF** - Method/Attribute Hiding Factor: aggregate fraction of
//!    methods/attributes marked private (leading underscore)
//! 3. **POF** - Polymorphism Factor: realized vs. potential method-overriding
//!    surface
//!
//! Plus per-class depth of inheritance (DIT) and number of children (NOC).
//!
//! All five ratios are aggregate fractions: sums of per-class numerators over
//! sums of per-class denominators, so classes with more members weigh more.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze a project
//! pymood ./src
//!
//! # Write the JSON report to a file
//! pymood -o report.json ./src
//!
//! # One-line JSON for piping
//! pymood --compact ./src
//! ```
//!
//! ## Limits
//!
//! Multiple inheritance is unsupported: a class with two or more base types
//! aborts the whole analysis with an error, never a partial result.

pub mod analyzer;
pub mod config;
pub mod hierarchy;
pub mod metrics;
pub mod properties;
pub mod report;
pub mod semantic;

pub use analyzer::{AnalyzerError, ProjectAnalysis, analyze_program, analyze_project};
pub use config::{
    AnalysisConfig, CompiledConfig, ConfigError, MoodConfig, load_compiled_config, load_config,
};
pub use hierarchy::{AnalysisError, ClassKey, ClassMetrics, HierarchyResolver};
pub use metrics::{MoodMetrics, compute_metrics};
pub use properties::{PropertyBucket, PropertyKind, PropertyRecord, classify};
pub use report::{AnalysisReport, ClassSummary, build_report, write_report};
pub use semantic::{
    BaseRef, ClassDecl, ClassId, DeclarationShape, Program, PropertyDeclaration, PropertySymbol,
    SemanticError, SourceLocation,
};

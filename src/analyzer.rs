//! Project analysis driver
//!
//! Loads the semantic model for a project root and runs one pre-order
//! traversal over every class-like node, resolving each through the
//! hierarchy resolver. Any fatal condition aborts with no partial result.

use std::path::Path;

use thiserror::Error;

use crate::config::CompiledConfig;
use crate::hierarchy::{AnalysisError, ClassMetrics, HierarchyResolver};
use crate::semantic::{Program, SemanticError};

/// Errors surfaced by a project analysis
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Result of analyzing one project
#[derive(Debug)]
pub struct ProjectAnalysis {
    /// Resolved classes in resolution order
    pub classes: Vec<ClassMetrics>,
    /// Number of source files loaded
    pub total_files: usize,
}

/// Analyze every Python source under `root` (a file or a directory)
pub fn analyze_project(root: &Path, config: &CompiledConfig) -> Result<ProjectAnalysis, AnalyzerError> {
    let program = Program::load(root, config)?;
    analyze_program(&program)
}

/// Run the traversal over an already-loaded program
pub fn analyze_program(program: &Program) -> Result<ProjectAnalysis, AnalyzerError> {
    let mut resolver = HierarchyResolver::new();
    for id in program.class_ids() {
        resolver.resolve(program, id)?;
    }
    Ok(ProjectAnalysis {
        classes: resolver.into_classes(),
        total_files: program.total_files(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn program(sources: &[(&str, &str)]) -> Program {
        Program::from_sources(
            sources
                .iter()
                .map(|(path, src)| (PathBuf::from(path), src.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_cross_file_inheritance() {
        let prog = program(&[
            ("a.py", "class Base:\n    def run(self):\n        pass\n"),
            ("b.py", "class Child(Base):\n    pass\n"),
        ]);
        let analysis = analyze_program(&prog).unwrap();
        assert_eq!(analysis.total_files, 2);
        assert_eq!(analysis.classes.len(), 2);
        let child = analysis
            .classes
            .iter()
            .find(|c| c.class_name == "Child")
            .unwrap();
        assert_eq!(child.parent_class_name, "Base");
        assert_eq!(child.methods.inherited.len(), 1);
    }

    #[test]
    fn test_multiple_inheritance_aborts_whole_run() {
        let prog = program(&[
            ("ok.py", "class Fine:\n    pass\n"),
            ("bad.py", "class Broken(Fine, dict):\n    pass\n"),
        ]);
        assert!(analyze_program(&prog).is_err());
    }

    #[test]
    fn test_name_cycle_across_files_degrades_to_root() {
        // Invalid as Python, but reachable through whole-program name
        // resolution; must terminate instead of recursing.
        let prog = program(&[
            ("a.py", "class A(B):\n    pass\n"),
            ("b.py", "class B(A):\n    pass\n"),
        ]);
        let analysis = analyze_program(&prog).unwrap();
        assert_eq!(analysis.classes.len(), 2);
        let roots = analysis
            .classes
            .iter()
            .filter(|c| c.parent_class_name.is_empty())
            .count();
        assert_eq!(roots, 1);
    }
}

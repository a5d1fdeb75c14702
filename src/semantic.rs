//! Python semantic model built on tree-sitter
//!
//! Loads every `.py` file under a root directory (skipping vendored
//! dependency trees), parses them with tree-sitter, and exposes the queries
//! the hierarchy resolver needs: class enumeration in pre-order, base-type
//! references resolved by name, and the property symbols visible on a class
//! (declared here plus name-inherited from ancestors).

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tree_sitter::{Node, Parser};
use walkdir::WalkDir;

use crate::config::CompiledConfig;

/// Errors that can occur while building the semantic model
#[derive(Error, Debug)]
pub enum SemanticError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse Python file: {0}")]
    ParseError(String),

    #[error("Failed to load Python grammar: {0}")]
    LanguageError(String),
}

/// Index of a class within a [`Program`]
pub type ClassId = usize;

/// Source location of a declaration (1-based line and column)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Syntactic shape of a property declaration, matched once per property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationShape {
    /// `def` in the class body (including static/class methods)
    Method,
    /// `def` under `@property`, `@cached_property`, or `@<name>.setter`-style
    /// decorators
    Accessor,
    /// Class-body assignment or bare annotation
    Field,
    /// Instance attribute introduced by `self.<name> = ...` in `__init__`
    Parameter,
}

impl DeclarationShape {
    /// Method-shaped declarations feed the methods bucket; everything else
    /// (field, parameter, accessor) feeds the attributes bucket.
    pub fn is_method_shaped(&self) -> bool {
        matches!(self, DeclarationShape::Method)
    }
}

/// First declaration of a property symbol
#[derive(Debug, Clone)]
pub struct PropertyDeclaration {
    pub shape: DeclarationShape,
    pub location: SourceLocation,
    /// The class whose body contains this declaration
    pub declaring_class: ClassId,
    /// Leading-underscore private marker (dunder names exempt)
    pub private: bool,
}

/// A property symbol visible on a class: declared here or name-inherited
#[derive(Debug, Clone)]
pub struct PropertySymbol {
    pub name: String,
    /// Absent when no declaration could be located; such symbols are skipped
    /// by the classifier.
    pub declaration: Option<PropertyDeclaration>,
}

/// A syntactic base-type entry of a class
#[derive(Debug, Clone)]
pub struct BaseRef {
    /// Base expression text, possibly dotted (`module.Base`)
    pub name: String,
    /// Resolved program class, if the base names one
    pub target: Option<ClassId>,
}

/// A member declared directly in a class body
#[derive(Debug, Clone)]
pub struct MemberDecl {
    pub name: String,
    pub shape: DeclarationShape,
    pub location: SourceLocation,
    pub private: bool,
}

/// A class-like declaration found during traversal
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    /// Declaration site; `None` when undeterminable (empty classPath)
    pub location: Option<SourceLocation>,
    /// Syntactic bases minus `object` and typing subscripts
    pub bases: Vec<BaseRef>,
    /// Own declarations in source order, first declaration wins per name
    pub members: Vec<MemberDecl>,
}

impl ClassDecl {
    /// The `file:line:col` identity path, empty if the site is unknown
    pub fn path_string(&self) -> String {
        self.location
            .as_ref()
            .map(|loc| loc.to_string())
            .unwrap_or_default()
    }
}

/// The analyzed program: every class-like node, in file order then pre-order
/// within each file. All file I/O happens during loading; the analysis phase
/// only reads this structure.
#[derive(Debug)]
pub struct Program {
    classes: Vec<ClassDecl>,
    total_files: usize,
}

impl Program {
    /// Load all Python sources under `root` (a file or a directory)
    pub fn load(root: &Path, config: &CompiledConfig) -> Result<Self, SemanticError> {
        let mut files = Vec::new();

        if root.is_file() {
            files.push(root.to_path_buf());
        } else {
            let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                !(entry.file_type().is_dir() && config.is_vendored_dir(&name))
            });
            for entry in walker.filter_map(|e| e.ok()) {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("py")
                    && !config.should_exclude(&path.to_string_lossy())
                {
                    files.push(path.to_path_buf());
                }
            }
            // WalkDir order is platform-dependent; the provider contract is a
            // stable listed order.
            files.sort();
        }

        let mut sources = Vec::with_capacity(files.len());
        for path in files {
            let content = fs::read_to_string(&path)?;
            sources.push((path, content));
        }

        Self::from_sources(sources)
    }

    /// Build a program directly from in-memory sources (useful for testing)
    pub fn from_sources(
        sources: impl IntoIterator<Item = (PathBuf, String)>,
    ) -> Result<Self, SemanticError> {
        let mut parser = Parser::new();
        let language = tree_sitter_python::LANGUAGE;
        parser
            .set_language(&language.into())
            .map_err(|e| SemanticError::LanguageError(e.to_string()))?;

        let mut classes = Vec::new();
        let mut total_files = 0;

        for (path, source) in sources {
            total_files += 1;
            let tree = parser.parse(&source, None).ok_or_else(|| {
                SemanticError::ParseError(format!("parser returned no tree for {}", path.display()))
            })?;
            collect_classes(tree.root_node(), source.as_bytes(), &path, &mut classes);
        }

        let mut program = Program {
            classes,
            total_files,
        };
        program.resolve_base_targets();
        Ok(program)
    }

    /// Number of source files that contributed to the program
    pub fn total_files(&self) -> usize {
        self.total_files
    }

    /// All class ids, in traversal (pre-order) discovery order
    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> {
        0..self.classes.len()
    }

    pub fn class(&self, id: ClassId) -> &ClassDecl {
        &self.classes[id]
    }

    /// Syntactic base entries of a class
    pub fn base_classes(&self, id: ClassId) -> &[BaseRef] {
        &self.classes[id].bases
    }

    /// Property symbols visible on a class: own declarations first (source
    /// order), then ancestor declarations for names not shadowed below. Walks
    /// the single-parent chain; a visited-set guards against name-resolution
    /// cycles that valid Python cannot produce.
    pub fn visible_properties(&self, id: ClassId) -> Vec<PropertySymbol> {
        let mut symbols = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut visited: HashSet<ClassId> = HashSet::new();

        let mut current = Some(id);
        while let Some(cid) = current {
            if !visited.insert(cid) {
                break;
            }
            for member in &self.classes[cid].members {
                if seen.insert(member.name.as_str()) {
                    symbols.push(PropertySymbol {
                        name: member.name.clone(),
                        declaration: Some(PropertyDeclaration {
                            shape: member.shape,
                            location: member.location.clone(),
                            declaring_class: cid,
                            private: member.private,
                        }),
                    });
                }
            }
            current = self.classes[cid]
                .bases
                .first()
                .and_then(|base| base.target);
        }

        symbols
    }

    /// Resolve base names against the program-wide class map. The first class
    /// bearing a simple name wins; a base resolving to its own class is left
    /// unresolved.
    fn resolve_base_targets(&mut self) {
        let mut by_name: HashMap<String, ClassId> = HashMap::new();
        for (id, class) in self.classes.iter().enumerate() {
            by_name.entry(class.name.clone()).or_insert(id);
        }

        for id in 0..self.classes.len() {
            for i in 0..self.classes[id].bases.len() {
                let simple = self.classes[id].bases[i]
                    .name
                    .rsplit('.')
                    .next()
                    .unwrap_or_default()
                    .to_string();
                let target = by_name.get(&simple).copied().filter(|&t| t != id);
                self.classes[id].bases[i].target = target;
            }
        }
    }
}

/// Leading-underscore convention, with dunder names (`__init__`) exempt
pub fn is_private_name(name: &str) -> bool {
    name.starts_with('_') && !(name.starts_with("__") && name.ends_with("__") && name.len() > 4)
}

fn location_of(node: Node, path: &Path) -> SourceLocation {
    let point = node.start_position();
    SourceLocation {
        file: path.to_path_buf(),
        line: point.row + 1,
        column: point.column + 1,
    }
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Pre-order walk collecting every class-like node, nested ones included
fn collect_classes(node: Node, source: &[u8], path: &Path, out: &mut Vec<ClassDecl>) {
    if node.kind() == "class_definition" {
        out.push(parse_class(node, source, path));
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_classes(child, source, path, out);
    }
}

fn parse_class(node: Node, source: &[u8], path: &Path) -> ClassDecl {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_default();

    let bases = node
        .child_by_field_name("superclasses")
        .map(|args| parse_bases(args, source))
        .unwrap_or_default();

    let members = node
        .child_by_field_name("body")
        .map(|body| parse_members(body, source, path))
        .unwrap_or_default();

    ClassDecl {
        name,
        location: Some(location_of(node, path)),
        bases,
        members,
    }
}

/// Base entries of a `class C(...)` argument list. Keyword arguments
/// (`metaclass=`), typing subscripts (`Generic[T]`), and `object` do not
/// count as base types.
fn parse_bases(args: Node, source: &[u8]) -> Vec<BaseRef> {
    let mut bases = Vec::new();
    let mut cursor = args.walk();
    for child in args.named_children(&mut cursor) {
        if !matches!(child.kind(), "identifier" | "attribute") {
            continue;
        }
        let text = node_text(child, source);
        if text == "object" {
            continue;
        }
        bases.push(BaseRef {
            name: text.to_string(),
            target: None,
        });
    }
    bases
}

fn parse_members(body: Node, source: &[u8], path: &Path) -> Vec<MemberDecl> {
    let mut members = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let mut push = |members: &mut Vec<MemberDecl>,
                    seen: &mut HashSet<String>,
                    name: &str,
                    shape: DeclarationShape,
                    node: Node| {
        if name.is_empty() || !seen.insert(name.to_string()) {
            return;
        }
        members.push(MemberDecl {
            name: name.to_string(),
            shape,
            location: location_of(node, path),
            private: is_private_name(name),
        });
    };

    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        match child.kind() {
            "function_definition" => {
                let name = child
                    .child_by_field_name("name")
                    .map(|n| node_text(n, source).to_string())
                    .unwrap_or_default();
                push(&mut members, &mut seen, &name, DeclarationShape::Method, child);
                if name == "__init__" {
                    collect_init_attributes(child, source, path, &mut members, &mut seen);
                }
            }
            "decorated_definition" => {
                let Some(def) = child.child_by_field_name("definition") else {
                    continue;
                };
                if def.kind() != "function_definition" {
                    continue;
                }
                let name = def
                    .child_by_field_name("name")
                    .map(|n| node_text(n, source).to_string())
                    .unwrap_or_default();
                let shape = if has_accessor_decorator(child, source) {
                    DeclarationShape::Accessor
                } else {
                    DeclarationShape::Method
                };
                push(&mut members, &mut seen, &name, shape, def);
                if name == "__init__" {
                    collect_init_attributes(def, source, path, &mut members, &mut seen);
                }
            }
            "expression_statement" => {
                let mut stmt_cursor = child.walk();
                for expr in child.named_children(&mut stmt_cursor) {
                    if expr.kind() != "assignment" {
                        continue;
                    }
                    let Some(left) = expr.child_by_field_name("left") else {
                        continue;
                    };
                    if left.kind() == "identifier" {
                        let name = node_text(left, source).to_string();
                        push(&mut members, &mut seen, &name, DeclarationShape::Field, expr);
                    }
                }
            }
            _ => {}
        }
    }

    members
}

/// `@property`, `@cached_property`, and `@<name>.setter/.getter/.deleter`
/// mark accessor-shaped declarations; `@staticmethod`/`@classmethod` stay
/// method-shaped.
fn has_accessor_decorator(decorated: Node, source: &[u8]) -> bool {
    let mut cursor = decorated.walk();
    for child in decorated.named_children(&mut cursor) {
        if child.kind() != "decorator" {
            continue;
        }
        let text = node_text(child, source).trim_start_matches('@');
        if text == "property"
            || text.ends_with("cached_property")
            || text.ends_with(".setter")
            || text.ends_with(".getter")
            || text.ends_with(".deleter")
        {
            return true;
        }
    }
    false
}

/// Instance attributes introduced in `__init__` via `self.<name> = ...`
fn collect_init_attributes(
    init: Node,
    source: &[u8],
    path: &Path,
    members: &mut Vec<MemberDecl>,
    seen: &mut HashSet<String>,
) {
    let Some(body) = init.child_by_field_name("body") else {
        return;
    };
    collect_self_assignments(body, source, path, members, seen);
}

fn collect_self_assignments(
    node: Node,
    source: &[u8],
    path: &Path,
    members: &mut Vec<MemberDecl>,
    seen: &mut HashSet<String>,
) {
    if node.kind() == "assignment" {
        if let Some(left) = node.child_by_field_name("left") {
            if left.kind() == "attribute" {
                let object = left
                    .child_by_field_name("object")
                    .map(|o| node_text(o, source));
                let attr = left
                    .child_by_field_name("attribute")
                    .map(|a| node_text(a, source).to_string());
                if object == Some("self") {
                    if let Some(name) = attr {
                        if !name.is_empty() && seen.insert(name.clone()) {
                            members.push(MemberDecl {
                                private: is_private_name(&name),
                                name,
                                shape: DeclarationShape::Parameter,
                                location: location_of(node, path),
                            });
                        }
                    }
                }
            }
        }
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_self_assignments(child, source, path, members, seen);
    }
}

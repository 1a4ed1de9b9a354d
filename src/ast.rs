//! Abstract syntax tree for the X DevAPI expression language.
//!
//! Every grammar rule produces an [`Expr`]. The tree is the protocol-ready
//! artifact handed to a wire encoder: scalars carry their exact wire type,
//! identifiers carry resolved (schema, table, column) parts plus a document
//! path, and operators carry their canonical wire names (`&&`, `==`,
//! `cont_in`, `date_add`, ...).
//!
//! All node types implement [`std::fmt::Display`]: printing a parser-produced
//! tree yields a canonical textual form that re-parses to a structurally
//! equal tree in the same mode. That printer also supplies the default alias
//! for projection expressions.

use std::fmt;

use serde::Serialize;

use crate::lexer::is_reserved_word;

/// A typed literal value with its exact wire representation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Scalar {
    /// Non-negative integer
    UInt(u64),
    /// Negative integer
    SInt(i64),
    /// Floating-point literal with more than 7 fractional digits
    Double(f64),
    /// Floating-point literal with at most 7 fractional digits
    Float(f32),
    /// UTF-8 string (also the precision-preserving fallback for integers
    /// beyond the 64-bit range)
    String(String),
    Bool(bool),
    Null,
    /// Raw uninterpreted text (cast target types)
    Octets(String),
}

/// One segment of a path into a document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DocumentPathItem {
    /// Named member: `.name`
    Member(String),
    /// Member wildcard: `.*`
    MemberAsterisk,
    /// Array element: `[3]`
    ArrayIndex(u32),
    /// Array wildcard: `[*]`
    ArrayIndexAsterisk,
    /// Recursive wildcard: `**`
    DoubleAsterisk,
}

/// A resolved column or document-field reference.
///
/// Document mode stores the whole dotted member chain in `document_path`.
/// Table mode resolves up to three dot-separated segments right-to-left into
/// `name`, `table_name`, `schema_name`, and only populates `document_path`
/// through the `->` / `->>` JSON-extraction syntax.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Identifier {
    pub schema_name: Option<String>,
    pub table_name: Option<String>,
    pub name: Option<String>,
    pub document_path: Vec<DocumentPathItem>,
}

/// An operator application; arity varies by operator name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operator {
    pub name: String,
    pub params: Vec<Expr>,
}

/// A possibly schema-qualified function name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionName {
    pub schema_name: Option<String>,
    pub name: String,
}

/// Expression AST node; exactly one variant per node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Literal(Scalar),
    Identifier(Identifier),
    Operator(Operator),
    FunctionCall {
        name: FunctionName,
        params: Vec<Expr>,
    },
    Array(Vec<Expr>),
    /// Key order is preserved; duplicate keys are kept as written
    Object(Vec<(String, Expr)>),
    /// Named bind placeholder resolved to its stable positional index
    Placeholder(u32),
}

impl Expr {
    /// Build an operator node
    pub fn operator(name: &str, params: Vec<Expr>) -> Self {
        Expr::Operator(Operator {
            name: name.to_string(),
            params,
        })
    }
}

/// Sort direction for sort expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A projection expression with its alias.
///
/// The alias defaults to the canonical textual form of the source expression
/// when no `AS name` is given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub source: Expr,
    pub alias: String,
}

/// A sort expression with an optional explicit direction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortExpr {
    pub expr: Expr,
    pub direction: Option<SortDirection>,
}

// ---------------------------------------------------------------------------
// Canonical printer
// ---------------------------------------------------------------------------

/// True if the segment can be printed without backtick quoting
fn is_plain_word(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Write one identifier segment, backtick-quoting when necessary
fn write_segment(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if is_plain_word(s) && !is_reserved_word(s) {
        write!(f, "{s}")
    } else {
        write!(f, "`{}`", s.replace('`', "``"))
    }
}

/// Escape a string for a single-quoted literal
fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "''")
}

/// Write a float so that it re-parses as a float lexeme
fn write_float(f: &mut fmt::Formatter<'_>, text: String) -> fmt::Result {
    if text.contains('.') || text.contains('e') || text.contains('E') {
        write!(f, "{text}")
    } else {
        write!(f, "{text}.0")
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::UInt(n) => write!(f, "{n}"),
            Scalar::SInt(n) => write!(f, "{n}"),
            Scalar::Double(v) => write_float(f, v.to_string()),
            Scalar::Float(v) => write_float(f, v.to_string()),
            Scalar::String(s) => write!(f, "'{}'", escape_single_quoted(s)),
            Scalar::Bool(true) => write!(f, "TRUE"),
            Scalar::Bool(false) => write!(f, "FALSE"),
            Scalar::Null => write!(f, "NULL"),
            Scalar::Octets(s) => write!(f, "{s}"),
        }
    }
}

impl fmt::Display for DocumentPathItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentPathItem::Member(m) => {
                write!(f, ".")?;
                write_segment(f, m)
            }
            DocumentPathItem::MemberAsterisk => write!(f, ".*"),
            DocumentPathItem::ArrayIndex(i) => write!(f, "[{i}]"),
            DocumentPathItem::ArrayIndexAsterisk => write!(f, "[*]"),
            DocumentPathItem::DoubleAsterisk => write!(f, "**"),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_some() || self.table_name.is_some() || self.schema_name.is_some() {
            // Table mode: [schema.][table.]name[->'$<path>']
            let mut first = true;
            for part in [&self.schema_name, &self.table_name, &self.name]
                .into_iter()
                .flatten()
            {
                if !first {
                    write!(f, ".")?;
                }
                write_segment(f, part)?;
                first = false;
            }
            if !self.document_path.is_empty() {
                let mut path = String::from("$");
                for item in &self.document_path {
                    path.push_str(&item.to_string());
                }
                write!(f, "->'{}'", escape_single_quoted(&path))?;
            }
            Ok(())
        } else {
            // Document mode: a bare member chain when possible, else $-rooted
            match self.document_path.first() {
                Some(DocumentPathItem::Member(m)) => {
                    write_segment(f, m)?;
                    for item in &self.document_path[1..] {
                        write!(f, "{item}")?;
                    }
                    Ok(())
                }
                _ => {
                    write!(f, "$")?;
                    for item in &self.document_path {
                        write!(f, "{item}")?;
                    }
                    Ok(())
                }
            }
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema_name {
            write_segment(f, schema)?;
            write!(f, ".")?;
        }
        write_segment(f, &self.name)
    }
}

/// Parenthesize operator operands so that the printed form re-parses with
/// the same nesting regardless of the surrounding precedence level.
/// Grouping parentheses are transparent in the AST, so this never changes
/// the structural result of a round trip.
struct Grouped<'a>(&'a Expr);

impl fmt::Display for Grouped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Operator(_) => write!(f, "({})", self.0),
            _ => write!(f, "{}", self.0),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, params: &[Expr]) -> fmt::Result {
    for (i, p) in params.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{p}")?;
    }
    Ok(())
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name.as_str(), self.params.as_slice()) {
            ("not", [x]) => write!(f, "NOT {}", Grouped(x)),
            ("is", [x, y]) => write!(f, "{} IS {y}", Grouped(x)),
            ("is_not", [x, y]) => write!(f, "{} IS NOT {y}", Grouped(x)),
            ("in", [x, rest @ ..]) => {
                write!(f, "{} IN (", Grouped(x))?;
                write_list(f, rest)?;
                write!(f, ")")
            }
            ("not_in", [x, rest @ ..]) => {
                write!(f, "{} NOT IN (", Grouped(x))?;
                write_list(f, rest)?;
                write!(f, ")")
            }
            ("cont_in", [x, y]) => write!(f, "{} IN {}", Grouped(x), Grouped(y)),
            ("not_cont_in", [x, y]) => write!(f, "{} NOT IN {}", Grouped(x), Grouped(y)),
            ("like", [x, y]) => write!(f, "{} LIKE {}", Grouped(x), Grouped(y)),
            ("like", [x, y, z]) => {
                write!(f, "{} LIKE {} ESCAPE {}", Grouped(x), Grouped(y), Grouped(z))
            }
            ("not_like", [x, y]) => write!(f, "{} NOT LIKE {}", Grouped(x), Grouped(y)),
            ("not_like", [x, y, z]) => write!(
                f,
                "{} NOT LIKE {} ESCAPE {}",
                Grouped(x),
                Grouped(y),
                Grouped(z)
            ),
            ("between", [x, lo, hi]) => write!(
                f,
                "{} BETWEEN {} AND {}",
                Grouped(x),
                Grouped(lo),
                Grouped(hi)
            ),
            ("between_not", [x, lo, hi]) => write!(
                f,
                "{} NOT BETWEEN {} AND {}",
                Grouped(x),
                Grouped(lo),
                Grouped(hi)
            ),
            ("regexp", [x, y]) => write!(f, "{} REGEXP {}", Grouped(x), Grouped(y)),
            ("not_regexp", [x, y]) => write!(f, "{} NOT REGEXP {}", Grouped(x), Grouped(y)),
            ("overlaps", [x, y]) => write!(f, "{} OVERLAPS {}", Grouped(x), Grouped(y)),
            ("not_overlaps", [x, y]) => {
                write!(f, "{} NOT OVERLAPS {}", Grouped(x), Grouped(y))
            }
            ("cast", [x, Expr::Literal(Scalar::Octets(ty))]) => {
                write!(f, "CAST({x} AS {ty})")
            }
            ("date_add", [x, amount, Expr::Literal(Scalar::String(unit))]) => {
                write!(f, "{} + INTERVAL {} {unit}", Grouped(x), Grouped(amount))
            }
            ("date_sub", [x, amount, Expr::Literal(Scalar::String(unit))]) => {
                write!(f, "{} - INTERVAL {} {unit}", Grouped(x), Grouped(amount))
            }
            ("div", [l, r]) => write!(f, "{} DIV {}", Grouped(l), Grouped(r)),
            (op, [l, r]) => write!(f, "{} {op} {}", Grouped(l), Grouped(r)),
            (op, params) => {
                // No textual syntax for this shape; function-call form
                write!(f, "{op}(")?;
                write_list(f, params)?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(s) => write!(f, "{s}"),
            Expr::Identifier(i) => write!(f, "{i}"),
            Expr::Operator(op) => write!(f, "{op}"),
            Expr::FunctionCall { name, params } => {
                write!(f, "{name}(")?;
                write_list(f, params)?;
                write!(f, ")")
            }
            Expr::Array(items) => {
                write!(f, "[")?;
                write_list(f, items)?;
                write!(f, "]")
            }
            Expr::Object(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}': {value}", escape_single_quoted(key))?;
                }
                write!(f, "}}")
            }
            Expr::Placeholder(position) => write!(f, ":p{position}"),
        }
    }
}

//! Filter expression serialization
//!
//! Writes parsed nodes back to the string form accepted by the backend.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::types::{KiwtNode, KiwtTerm};

/// Serialize nodes to an expression string
///
/// Groups are wrapped in parentheses and operators are written space-padded.
/// Pass the result through [`normalize_operators`] before sending it to the
/// backend.
pub fn deparse(nodes: &[KiwtNode]) -> String {
    let mut out = String::new();
    write_nodes(nodes, &mut out);
    out
}

fn write_nodes(nodes: &[KiwtNode], out: &mut String) {
    for node in nodes {
        match node {
            KiwtNode::Operator(op) => {
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
            }
            KiwtNode::Term(term) => write_term(term, out),
            KiwtNode::Group(inner) => {
                out.push('(');
                write_nodes(inner, out);
                out.push(')');
            }
        }
    }
}

fn write_term(term: &KiwtTerm, out: &mut String) {
    out.push_str(&term.path);
    if term.comparator.is_unary() {
        out.push(' ');
        out.push_str(term.comparator.as_str());
    } else {
        out.push_str(term.comparator.as_str());
        out.push_str(&quote(term.value.as_deref().unwrap_or_default()));
    }
}

/// Quote a value when it would otherwise break tokenization
fn quote(value: &str) -> Cow<'_, str> {
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '(' | ')' | '\\' | '&' | '|'));

    if !needs_quotes {
        return Cow::Borrowed(value);
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Remove whitespace around `&&` and `||` outside quoted values
///
/// The backend rejects space-padded operators.
pub fn normalize_operators(expr: &str) -> String {
    static OPERATOR_SPACING: OnceLock<Regex> = OnceLock::new();

    let re = OPERATOR_SPACING.get_or_init(|| {
        Regex::new(r#""(?:[^"\\]|\\.)*"|\s*(&&|\|\|)\s*"#).expect("Invalid regex")
    });

    re.replace_all(expr, |caps: &Captures| match caps.get(1) {
        Some(op) => op.as_str().to_string(),
        None => caps[0].to_string(),
    })
    .into_owned()
}

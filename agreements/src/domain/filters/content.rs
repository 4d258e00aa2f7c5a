//! Agreement content filter codec
//!
//! Converts between the rows of the agreement content filter and the single
//! serialized expression stored in the active filter state.
//!
//! Each row becomes one parenthesized clause: its content values joined by
//! `||`, every term sharing the row's comparator. Rows are joined by their
//! `grouping` operator:
//!
//! ```text
//! (items isNotEmpty||docs isNotEmpty)&&(orgs isEmpty)
//! ```

use serde::{Deserialize, Serialize};

use crate::data::kiwt::{self, BoolOp, KiwtError, KiwtNode, KiwtTerm};
use crate::domain::i18n::Messages;

use super::options::{ContentAttribute, is_content_value, lookup_content_label};

/// Selected content value with its display label
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "RawSelection")]
pub struct ContentSelection {
    pub value: String,
    /// `None` when the value is outside the content vocabulary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Accepts either a bare value or a `{value, label}` object
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelection {
    Value(String),
    Selection {
        value: String,
        #[serde(default)]
        label: Option<String>,
    },
}

impl From<RawSelection> for ContentSelection {
    fn from(raw: RawSelection) -> Self {
        match raw {
            RawSelection::Value(value) => Self { value, label: None },
            RawSelection::Selection { value, label } => Self { value, label },
        }
    }
}

impl ContentSelection {
    /// Selection labelled from the content vocabulary
    pub fn labelled(value: impl Into<String>, messages: &Messages) -> Self {
        let value = value.into();
        let label = lookup_content_label(messages, &value);
        Self { value, label }
    }
}

/// One row of the agreement content filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FilterGroup {
    /// Operator joining this row to the previous one; never set on the first row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping: Option<BoolOp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<ContentAttribute>,
    #[serde(default)]
    pub content: Vec<ContentSelection>,
}

impl FilterGroup {
    /// A row is submittable once it has an attribute and some content, all of
    /// it from the content vocabulary
    pub fn is_valid(&self) -> bool {
        self.attribute.is_some()
            && !self.content.is_empty()
            && self
                .content
                .iter()
                .all(|selection| is_content_value(&selection.value))
    }
}

/// Decode persisted filter state into filter rows
///
/// `raw` wraps a single serialized expression. No expression (or a blank one)
/// yields one empty placeholder row. Content paths outside the vocabulary are
/// kept with no label.
pub fn decode(raw: &[String], messages: &Messages) -> Result<Vec<FilterGroup>, KiwtError> {
    let Some(expr) = raw.first().filter(|expr| !expr.trim().is_empty()) else {
        return Ok(vec![FilterGroup::default()]);
    };
    if raw.len() > 1 {
        tracing::debug!(
            ignored = raw.len() - 1,
            "Only the first content filter expression is decoded"
        );
    }

    let nodes = kiwt::parse(expr)?;
    let mut groups = Vec::with_capacity(nodes.len() / 2 + 1);

    for (index, node) in nodes.iter().enumerate().step_by(2) {
        let grouping = match index.checked_sub(1).map(|prev| &nodes[prev]) {
            Some(KiwtNode::Operator(op)) => Some(*op),
            _ => None,
        };

        let mut terms = Vec::new();
        collect_terms(node, &mut terms);

        groups.push(FilterGroup {
            grouping,
            attribute: group_attribute(index, &terms),
            content: terms
                .iter()
                .map(|term| ContentSelection::labelled(term.path.clone(), messages))
                .collect(),
        });
    }

    tracing::debug!(groups = groups.len(), "Decoded content filter");
    Ok(groups)
}

/// Flatten the terms of one clause
fn collect_terms<'a>(node: &'a KiwtNode, terms: &mut Vec<&'a KiwtTerm>) {
    match node {
        KiwtNode::Term(term) => terms.push(term),
        KiwtNode::Group(inner) => {
            for child in inner {
                if let KiwtNode::Operator(BoolOp::And) = child {
                    tracing::warn!("Content filter clause joins terms with '&&', treated as '||'");
                }
                collect_terms(child, terms);
            }
        }
        KiwtNode::Operator(_) => {}
    }
}

/// Attribute of a clause, taken from its first term
fn group_attribute(index: usize, terms: &[&KiwtTerm]) -> Option<ContentAttribute> {
    let first = terms.first()?;

    if terms.iter().any(|term| term.comparator != first.comparator) {
        tracing::warn!(
            position = index,
            comparator = %first.comparator,
            "Content filter clause mixes comparators, using the first"
        );
    }

    let attribute = ContentAttribute::from_comparator(first.comparator);
    if attribute.is_none() {
        tracing::warn!(
            position = index,
            comparator = %first.comparator,
            "Content filter clause uses an unsupported comparator"
        );
    }
    attribute
}

/// Encode filter rows into a serialized expression
///
/// All or nothing: returns `None` unless every row is valid, so a partially
/// filled form never reaches the filter state. An empty row list also yields
/// `None`.
pub fn encode(groups: &[FilterGroup]) -> Option<String> {
    if groups.is_empty() {
        return None;
    }
    if let Some(index) = groups.iter().position(|group| !group.is_valid()) {
        tracing::debug!(index, "Content filter row incomplete, skipping encode");
        return None;
    }

    let nodes = build_nodes(groups);
    let expr = kiwt::normalize_operators(&kiwt::deparse(&nodes));
    tracing::debug!(expr = %expr, "Encoded content filter");
    Some(expr)
}

/// Rebuild rows into the node shape expected by the deparser
fn build_nodes(groups: &[FilterGroup]) -> Vec<KiwtNode> {
    let mut nodes = Vec::with_capacity(groups.len() * 2);

    for group in groups {
        // placeholder rows contribute nothing
        let Some(attribute) = group.attribute.filter(|_| group.is_valid()) else {
            continue;
        };

        if !nodes.is_empty() {
            let op = group.grouping.unwrap_or_else(|| {
                tracing::warn!("Content filter row has no grouping, joining with '&&'");
                BoolOp::And
            });
            nodes.push(KiwtNode::Operator(op));
        }

        let mut clause = Vec::with_capacity(group.content.len() * 2);
        for (i, selection) in group.content.iter().enumerate() {
            if i != 0 {
                clause.push(KiwtNode::Operator(BoolOp::Or));
            }
            clause.push(KiwtNode::Term(KiwtTerm::unary(
                selection.value.clone(),
                attribute.comparator(),
            )));
        }
        nodes.push(KiwtNode::Group(clause));
    }

    nodes
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;

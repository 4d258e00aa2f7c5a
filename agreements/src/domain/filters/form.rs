//! Agreement content filter form
//!
//! Immutable value holding the filter rows being edited. Every edit returns a
//! new form, leaving the current one untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::kiwt::BoolOp;
use crate::domain::i18n::Messages;

use super::content::{self, ContentSelection, FilterGroup};
use super::options::ContentAttribute;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Filter row {index} does not exist ({len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("The first filter row cannot be removed")]
    FirstRowNotRemovable,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ContentFilterForm {
    groups: Vec<FilterGroup>,
}

impl Default for ContentFilterForm {
    /// One empty row
    fn default() -> Self {
        Self {
            groups: vec![FilterGroup::default()],
        }
    }
}

impl ContentFilterForm {
    /// Form over the given rows; no rows gives the default form
    pub fn new(groups: Vec<FilterGroup>) -> Self {
        if groups.is_empty() {
            return Self::default();
        }
        Self { groups }
    }

    /// Seed the form from persisted filter state
    ///
    /// An expression that fails to parse is logged and replaced by the
    /// default form.
    pub fn from_active(raw: &[String], messages: &Messages) -> Self {
        match content::decode(raw, messages) {
            Ok(groups) => Self::new(groups),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed content filter state");
                Self::default()
            }
        }
    }

    pub fn groups(&self) -> &[FilterGroup] {
        &self.groups
    }

    /// Serialized expression, or `None` while any row is incomplete
    pub fn encode(&self) -> Option<String> {
        content::encode(&self.groups)
    }

    /// Append an empty row joined by `op`
    pub fn add_group(&self, op: BoolOp) -> Self {
        let mut groups = self.groups.clone();
        groups.push(FilterGroup {
            grouping: Some(op),
            ..FilterGroup::default()
        });
        Self { groups }
    }

    pub fn remove_group(&self, index: usize) -> Result<Self, FormError> {
        self.check_index(index)?;
        if index == 0 {
            return Err(FormError::FirstRowNotRemovable);
        }
        let mut groups = self.groups.clone();
        groups.remove(index);
        Ok(Self { groups })
    }

    pub fn set_attribute(
        &self,
        index: usize,
        attribute: Option<ContentAttribute>,
    ) -> Result<Self, FormError> {
        self.update(index, |group| group.attribute = attribute)
    }

    pub fn set_content(
        &self,
        index: usize,
        content: Vec<ContentSelection>,
    ) -> Result<Self, FormError> {
        self.update(index, |group| group.content = content)
    }

    fn update<F>(&self, index: usize, apply: F) -> Result<Self, FormError>
    where
        F: FnOnce(&mut FilterGroup),
    {
        self.check_index(index)?;
        let mut groups = self.groups.clone();
        apply(&mut groups[index]);
        Ok(Self { groups })
    }

    fn check_index(&self, index: usize) -> Result<(), FormError> {
        if index >= self.groups.len() {
            return Err(FormError::IndexOutOfRange {
                index,
                len: self.groups.len(),
            });
        }
        Ok(())
    }

    /// Human-readable rendering, one line per row and operator
    pub fn describe(&self, messages: &Messages) -> String {
        let mut lines = Vec::with_capacity(self.groups.len() * 2);

        for (index, group) in self.groups.iter().enumerate() {
            if index > 0
                && let Some(op) = group.grouping
            {
                lines.push(
                    messages
                        .format(match op {
                            BoolOp::And => "ui-agreements.AND",
                            BoolOp::Or => "ui-agreements.OR",
                        })
                        .to_string(),
                );
            }

            let Some(attribute) = group.attribute.filter(|_| group.is_valid()) else {
                lines.push(format!(
                    "({})",
                    messages.format("ui-agreements.agreementContent.filter.incomplete")
                ));
                continue;
            };

            let content: Vec<&str> = group
                .content
                .iter()
                .map(|selection| selection.label.as_deref().unwrap_or(&selection.value))
                .collect();
            lines.push(format!(
                "{}: {}",
                messages.format(attribute.message_id()),
                content.join(", ")
            ));
        }

        lines.join("\n")
    }
}

//! Active filter state
//!
//! The filter state maps a filter name to its selected values. The content
//! filter commits its serialized expression here, and only when every row of
//! the form is complete.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::form::ContentFilterForm;

/// Filter name under which the content filter expression is stored
pub const AGREEMENT_CONTENT_FILTER: &str = "agreementContent";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ActiveFilters(BTreeMap<String, Vec<String>>);

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of one filter, empty when unset
    pub fn get(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Copy with one filter replaced
    pub fn with_state(&self, name: &str, values: Vec<String>) -> Self {
        let mut filters = self.0.clone();
        filters.insert(name.to_string(), values);
        Self(filters)
    }

    /// Copy with one filter removed
    pub fn clear_group(&self, name: &str) -> Self {
        let mut filters = self.0.clone();
        filters.remove(name);
        Self(filters)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Receiver of committed filter state
pub trait FilterStateSink {
    fn apply(&mut self, filters: ActiveFilters);
}

impl<F> FilterStateSink for F
where
    F: FnMut(ActiveFilters),
{
    fn apply(&mut self, filters: ActiveFilters) {
        self(filters)
    }
}

/// Commit the form's expression under `filter_name`
///
/// The sink is invoked exactly once when every row is complete and not at all
/// otherwise. Returns whether the state was committed.
pub fn submit<S>(
    form: &ContentFilterForm,
    filter_name: &str,
    active: &ActiveFilters,
    sink: &mut S,
) -> bool
where
    S: FilterStateSink + ?Sized,
{
    let Some(expr) = form.encode() else {
        tracing::debug!(filter = filter_name, "Content filter incomplete, not committed");
        return false;
    };

    tracing::debug!(filter = filter_name, expr = %expr, "Committing content filter");
    sink.apply(active.with_state(filter_name, vec![expr]));
    true
}

//! Message catalog
//!
//! Maps message ids to display strings. Ships an English catalog which the
//! `messages` section of the config file can override per id.

use std::collections::HashMap;

/// Built-in English messages
const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("ui-agreements.AND", "AND"),
    ("ui-agreements.OR", "OR"),
    ("ui-agreements.agreementContent.filter.has", "Has"),
    ("ui-agreements.agreementContent.filter.hasNot", "Has not"),
    ("ui-agreements.agreementContent.filter.addFilter", "Add filter"),
    ("ui-agreements.agreementContent.filter.incomplete", "Incomplete filter"),
    ("ui-agreements.agreementContent.agreementLines", "Agreement lines"),
    ("ui-agreements.agreementContent.linkedLicenses", "Linked licenses"),
    (
        "ui-agreements.agreementContent.externalLicenseDocs",
        "External license documents",
    ),
    ("ui-agreements.agreementContent.coreDocs", "Core documents"),
    (
        "ui-agreements.agreementContent.supplementaryDocs",
        "Supplementary documents",
    ),
    ("ui-agreements.agreementContent.usageData", "Usage data"),
    ("ui-agreements.agreementContent.organizations", "Organizations"),
    ("ui-agreements.agreementContent.internalContacts", "Internal contacts"),
    (
        "ui-agreements.agreementContent.inwardRelationships",
        "Related agreements (inward)",
    ),
    (
        "ui-agreements.agreementContent.outwardRelationships",
        "Related agreements (outward)",
    ),
    ("ui-agreements.agreementContent.alternativeNames", "Alternative names"),
    ("ui-agreements.agreementContent.tags", "Tags"),
    ("ui-agreements.agreementLines.lineType.detached", "Detached"),
    ("ui-agreements.agreementLines.lineType.external", "External"),
    ("ui-agreements.agreementLines.lineType.internal", "Internal"),
];

#[derive(Debug, Clone)]
pub struct Messages {
    entries: HashMap<String, String>,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            entries: DEFAULT_MESSAGES
                .iter()
                .map(|(id, text)| (id.to_string(), text.to_string()))
                .collect(),
        }
    }
}

impl Messages {
    /// English catalog with the given ids replaced or added
    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut messages = Self::default();
        for (id, text) in overrides {
            tracing::trace!(id = %id, "Overriding message");
            messages.entries.insert(id, text);
        }
        messages
    }

    /// Display string for a message id, or the id itself when unknown
    pub fn format<'a>(&'a self, id: &'a str) -> &'a str {
        self.entries.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }
}

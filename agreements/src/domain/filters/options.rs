//! Filter vocabularies
//!
//! Fixed option lists offered by the agreement filters: content types for the
//! agreement content filter, the has / has-not attribute, and agreement line
//! types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::kiwt::Comparator;
use crate::domain::i18n::Messages;

/// Whether an agreement has (or lacks) a kind of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ContentAttribute {
    #[serde(rename = "isNotEmpty")]
    Has,
    #[serde(rename = "isEmpty")]
    HasNot,
}

impl ContentAttribute {
    pub fn comparator(&self) -> Comparator {
        match self {
            Self::Has => Comparator::IsNotEmpty,
            Self::HasNot => Comparator::IsEmpty,
        }
    }

    pub fn from_comparator(comparator: Comparator) -> Option<Self> {
        match comparator {
            Comparator::IsNotEmpty => Some(Self::Has),
            Comparator::IsEmpty => Some(Self::HasNot),
            _ => None,
        }
    }

    pub fn message_id(&self) -> &'static str {
        match self {
            Self::Has => "ui-agreements.agreementContent.filter.has",
            Self::HasNot => "ui-agreements.agreementContent.filter.hasNot",
        }
    }
}

impl fmt::Display for ContentAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.comparator().as_str())
    }
}

/// Option of a fixed filter vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    /// Value written to the filter expression
    pub value: &'static str,
    pub message_id: &'static str,
}

impl FilterOption {
    pub fn label<'a>(&self, messages: &'a Messages) -> &'a str {
        messages.format(self.message_id)
    }
}

/// Content types an agreement can be filtered on
pub const AGREEMENT_CONTENT_OPTIONS: &[FilterOption] = &[
    FilterOption {
        value: "items",
        message_id: "ui-agreements.agreementContent.agreementLines",
    },
    FilterOption {
        value: "linkedLicenses",
        message_id: "ui-agreements.agreementContent.linkedLicenses",
    },
    FilterOption {
        value: "externalLicenseDocs",
        message_id: "ui-agreements.agreementContent.externalLicenseDocs",
    },
    FilterOption {
        value: "docs",
        message_id: "ui-agreements.agreementContent.coreDocs",
    },
    FilterOption {
        value: "supplementaryDocs",
        message_id: "ui-agreements.agreementContent.supplementaryDocs",
    },
    FilterOption {
        value: "usageDataProviders",
        message_id: "ui-agreements.agreementContent.usageData",
    },
    FilterOption {
        value: "orgs",
        message_id: "ui-agreements.agreementContent.organizations",
    },
    FilterOption {
        value: "contacts",
        message_id: "ui-agreements.agreementContent.internalContacts",
    },
    FilterOption {
        value: "inwardRelationships",
        message_id: "ui-agreements.agreementContent.inwardRelationships",
    },
    FilterOption {
        value: "outwardRelationships",
        message_id: "ui-agreements.agreementContent.outwardRelationships",
    },
    FilterOption {
        value: "alternateNames",
        message_id: "ui-agreements.agreementContent.alternativeNames",
    },
    FilterOption {
        value: "tags",
        message_id: "ui-agreements.agreementContent.tags",
    },
];

/// Agreement line types, each value a complete filter expression
pub const AGREEMENT_LINE_TYPE_OPTIONS: &[FilterOption] = &[
    FilterOption {
        value: "type==detached",
        message_id: "ui-agreements.agreementLines.lineType.detached",
    },
    FilterOption {
        value: "type==external",
        message_id: "ui-agreements.agreementLines.lineType.external",
    },
    FilterOption {
        value: "type isNull",
        message_id: "ui-agreements.agreementLines.lineType.internal",
    },
];

/// Whether `value` is one of the agreement content types
pub fn is_content_value(value: &str) -> bool {
    AGREEMENT_CONTENT_OPTIONS
        .iter()
        .any(|option| option.value == value)
}

/// Localized label for a content value, `None` outside the vocabulary
pub fn lookup_content_label(messages: &Messages, value: &str) -> Option<String> {
    AGREEMENT_CONTENT_OPTIONS
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.label(messages).to_string())
}

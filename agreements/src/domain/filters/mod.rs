//! Agreement filters
//!
//! The agreement content filter (rows of has / has-not content types), its
//! codec to the KIWT expression grammar, and the active filter state it
//! commits to.
//!
//! ## Usage
//!
//! ```
//! use erm_agreements::data::kiwt::BoolOp;
//! use erm_agreements::domain::filters::{
//!     ActiveFilters, ContentAttribute, ContentFilterForm, ContentSelection,
//!     AGREEMENT_CONTENT_FILTER, submit,
//! };
//! use erm_agreements::domain::i18n::Messages;
//!
//! let messages = Messages::default();
//! let form = ContentFilterForm::default()
//!     .set_attribute(0, Some(ContentAttribute::Has)).unwrap()
//!     .set_content(0, vec![ContentSelection::labelled("items", &messages)]).unwrap()
//!     .add_group(BoolOp::And)
//!     .set_attribute(1, Some(ContentAttribute::HasNot)).unwrap()
//!     .set_content(1, vec![ContentSelection::labelled("docs", &messages)]).unwrap();
//!
//! let mut committed = None;
//! submit(&form, AGREEMENT_CONTENT_FILTER, &ActiveFilters::new(), &mut |f: ActiveFilters| {
//!     committed = Some(f)
//! });
//! assert_eq!(
//!     committed.unwrap().get(AGREEMENT_CONTENT_FILTER),
//!     &["(items isNotEmpty)&&(docs isEmpty)".to_string()]
//! );
//! ```

mod content;
mod form;
mod options;
mod state;

pub use content::{ContentSelection, FilterGroup, decode, encode};
pub use form::{ContentFilterForm, FormError};
pub use options::{
    AGREEMENT_CONTENT_OPTIONS, AGREEMENT_LINE_TYPE_OPTIONS, ContentAttribute, FilterOption,
    lookup_content_label,
};
pub use state::{AGREEMENT_CONTENT_FILTER, ActiveFilters, FilterStateSink, submit};

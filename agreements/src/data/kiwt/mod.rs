//! KIWT filter expression grammar
//!
//! Parses and serializes the boolean filter expressions understood by the
//! agreements search endpoint: terms such as `items isNotEmpty` or
//! `type==detached`, grouped with parentheses and joined by `&&` / `||`.
//!
//! ## Usage
//!
//! ```
//! use erm_agreements::data::kiwt::{deparse, normalize_operators, parse};
//!
//! let nodes = parse("(items isNotEmpty||docs isNotEmpty)&&(orgs isEmpty)").unwrap();
//! let expr = normalize_operators(&deparse(&nodes));
//! assert_eq!(expr, "(items isNotEmpty||docs isNotEmpty)&&(orgs isEmpty)");
//! ```

mod deparser;
mod error;
mod parser;
mod types;

pub use deparser::{deparse, normalize_operators};
pub use error::KiwtError;
pub use parser::parse;
pub use types::{BoolOp, Comparator, KiwtNode, KiwtTerm};

//! Agreement content filter codec
//!
//! Translates the rows of the agreement content filter (has / has-not a set
//! of content types, joined by AND / OR) to and from the KIWT filter
//! expression stored in the agreements search state, plus the command-line
//! front end around it.

pub mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;

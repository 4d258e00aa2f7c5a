//! Wire-level data formats

pub mod kiwt;

//! Agreement filter domain

pub mod filters;
pub mod i18n;

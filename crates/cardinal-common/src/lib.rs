//! # cardinal-common
//!
//! Shared types, configuration, and error handling for the Cardinal
//! theme service: the theme data model, the central error enum, and
//! validation helpers used across the API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

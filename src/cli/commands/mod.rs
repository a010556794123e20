//! CLI command implementations

pub mod article;
pub mod completions;
pub mod contractor;
pub mod domain;
pub mod manufacturer;
pub mod project;

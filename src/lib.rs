//! CPT: Catalog Project Toolkit
//!
//! A command-line frontend for a hosted catalog/project backend:
//! domains, equipment, manufacturers, contractors, and a guided
//! multi-step project creation wizard.

pub mod cli;
pub mod core;
pub mod entities;
pub mod render;
pub mod store;
pub mod wizard;

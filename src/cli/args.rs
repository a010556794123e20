//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    article::ArticleCommands,
    completions::CompletionsArgs,
    contractor::ContractorCommands,
    domain::DomainCommands,
    manufacturer::ManufacturerCommands,
    project::ProjectCommands,
};

#[derive(Parser)]
#[command(name = "cpt")]
#[command(author, version, about = "Catalog Project Toolkit")]
#[command(
    long_about = "A terminal toolkit for the equipment catalog: browse reference data and create contractor or supplier projects through a guided wizard against the hosted catalog store."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project management and the creation wizard
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Domain and subdomain reference data
    #[command(subcommand)]
    Domain(DomainCommands),

    /// Contractor management
    #[command(subcommand)]
    Contractor(ContractorCommands),

    /// Manufacturer/supplier management
    #[command(subcommand)]
    Manufacturer(ManufacturerCommands),

    /// Equipment article catalog
    #[command(subcommand)]
    Article(ArticleCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (tsv for list output)
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Just IDs, one per line
    Id,
}

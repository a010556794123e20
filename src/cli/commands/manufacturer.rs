//! `cpt manufacturer` command - manufacturer/supplier management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde_json::json;

use crate::cli::helpers::{escape_csv, id_cell, open_store, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::{IdSource, UuidSource};
use crate::entities::manufacturer::{Manufacturer, MANUFACTURERS};
use crate::store::{rows, CatalogStore, Filter, Select};

#[derive(Subcommand, Debug)]
pub enum ManufacturerCommands {
    /// List manufacturers with filtering
    List(ListArgs),

    /// Create a new manufacturer
    New(NewArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search in manufacturer names
    #[arg(long)]
    pub search: Option<String>,

    /// Show only manufacturers flagged as suppliers
    #[arg(long)]
    pub suppliers_only: bool,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Manufacturer name
    pub name: String,

    /// Contact person
    #[arg(long)]
    pub contact: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Flag the manufacturer as a supplier
    #[arg(long)]
    pub supplier: bool,
}

/// Run a manufacturer subcommand
pub fn run(cmd: ManufacturerCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ManufacturerCommands::List(args) => run_list(args, global),
        ManufacturerCommands::New(args) => run_new(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;

    let mut query = Select::from(MANUFACTURERS).order_by("name");
    if let Some(ref search) = args.search {
        query = query.filter(Filter::Contains("name".into(), search.clone()));
    }
    if args.suppliers_only {
        query = query.filter(Filter::Eq("is_supplier".into(), "true".into()));
    }
    let values = store
        .select(&query)
        .into_diagnostic()
        .wrap_err("failed to fetch manufacturers")?;
    let manufacturers: Vec<Manufacturer> = rows(values)
        .into_diagnostic()
        .wrap_err("failed to fetch manufacturers")?;

    if args.count {
        println!("{}", manufacturers.len());
        return Ok(());
    }
    if manufacturers.is_empty() {
        println!("No manufacturers found.");
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&manufacturers).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,name,contact,email,supplier");
            for m in &manufacturers {
                println!(
                    "{},{},{},{},{}",
                    m.id,
                    escape_csv(&m.name),
                    m.contact.as_deref().unwrap_or(""),
                    m.email.as_deref().unwrap_or(""),
                    m.is_supplier
                );
            }
        }
        OutputFormat::Id => {
            for m in &manufacturers {
                println!("{}", m.id);
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<10} {:<35} {:<20} {:<25} {:<8}",
                style("ID").bold(),
                style("NAME").bold(),
                style("CONTACT").bold(),
                style("EMAIL").bold(),
                style("SUPPLIER").bold()
            );
            println!("{}", "-".repeat(100));
            for m in &manufacturers {
                println!(
                    "{:<10} {:<35} {:<20} {:<25} {:<8}",
                    style(id_cell(m.id, global.verbose)).cyan(),
                    truncate_str(&m.name, 33),
                    truncate_str(m.contact.as_deref().unwrap_or("-"), 18),
                    truncate_str(m.email.as_deref().unwrap_or("-"), 23),
                    if m.is_supplier { "yes" } else { "no" }
                );
            }
            println!();
            println!("{} manufacturer(s) found.", style(manufacturers.len()).cyan());
        }
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let id = UuidSource.new_id();

    store
        .insert(
            MANUFACTURERS,
            json!({
                "id": id,
                "name": args.name,
                "contact": args.contact,
                "phone": args.phone,
                "email": args.email,
                "is_supplier": args.supplier,
            }),
            None,
        )
        .into_diagnostic()
        .wrap_err("failed to create manufacturer")?;

    if !global.quiet {
        println!(
            "{} Created manufacturer '{}' ({})",
            style("✓").green(),
            args.name,
            id.short()
        );
    }
    Ok(())
}

//! `cpt contractor` command - contractor management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde_json::json;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, id_cell, open_store, parse_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::{IdSource, UuidSource};
use crate::entities::contractor::{
    Contractor, ContractorAgreement, CONTRACTORS, CONTRACTOR_AGREEMENTS,
};
use crate::store::{rows, single_row, CatalogStore, Filter, Select};

#[derive(Subcommand, Debug)]
pub enum ContractorCommands {
    /// List contractors with filtering
    List(ListArgs),

    /// Show a contractor's details and agreements
    Show(ShowArgs),

    /// Create a new contractor
    New(NewArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search in contractor names
    #[arg(long)]
    pub search: Option<String>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Contractor ID
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Contractor name
    pub name: String,

    /// Short designation (sigle)
    #[arg(long)]
    pub sigle: Option<String>,

    /// Postal address
    #[arg(long)]
    pub address: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Fax number
    #[arg(long)]
    pub fax: Option<String>,

    /// Country
    #[arg(long)]
    pub country: Option<String>,
}

/// Run a contractor subcommand
pub fn run(cmd: ContractorCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ContractorCommands::List(args) => run_list(args, global),
        ContractorCommands::Show(args) => run_show(args, global),
        ContractorCommands::New(args) => run_new(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;

    let mut query = Select::from(CONTRACTORS).order_by("name");
    if let Some(ref search) = args.search {
        query = query.filter(Filter::Contains("name".into(), search.clone()));
    }
    let values = store
        .select(&query)
        .into_diagnostic()
        .wrap_err("failed to fetch contractors")?;
    let contractors: Vec<Contractor> = rows(values)
        .into_diagnostic()
        .wrap_err("failed to fetch contractors")?;

    if args.count {
        println!("{}", contractors.len());
        return Ok(());
    }
    if contractors.is_empty() {
        println!("No contractors found.");
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&contractors).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,name,sigle,country");
            for contractor in &contractors {
                println!(
                    "{},{},{},{}",
                    contractor.id,
                    escape_csv(&contractor.name),
                    contractor.sigle.as_deref().unwrap_or(""),
                    contractor.country.as_deref().unwrap_or("")
                );
            }
        }
        OutputFormat::Id => {
            for contractor in &contractors {
                println!("{}", contractor.id);
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<10} {:<35} {:<10} {:<15}",
                style("ID").bold(),
                style("NAME").bold(),
                style("SIGLE").bold(),
                style("COUNTRY").bold()
            );
            println!("{}", "-".repeat(72));
            for contractor in &contractors {
                println!(
                    "{:<10} {:<35} {:<10} {:<15}",
                    style(id_cell(contractor.id, global.verbose)).cyan(),
                    truncate_str(&contractor.name, 33),
                    contractor.sigle.as_deref().unwrap_or("-"),
                    contractor.country.as_deref().unwrap_or("-")
                );
            }
            println!();
            println!("{} contractor(s) found.", style(contractors.len()).cyan());
        }
    }

    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let id = parse_id(&args.id)?;

    let values = store
        .select(&Select::from(CONTRACTORS).filter(Filter::Eq("id".into(), id.to_string())))
        .into_diagnostic()
        .wrap_err("failed to fetch contractor")?;
    let contractor: Contractor = single_row(CONTRACTORS, values)
        .into_diagnostic()
        .wrap_err("failed to fetch contractor")?;

    if global.format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&contractor).into_diagnostic()?
        );
        return Ok(());
    }

    println!("{}: {}", style("Contractor").bold(), contractor.name);
    println!("{}: {}", style("ID").bold(), contractor.id);
    if let Some(ref sigle) = contractor.sigle {
        println!("{}: {}", style("Sigle").bold(), sigle);
    }
    if let Some(ref address) = contractor.address {
        println!("{}: {}", style("Address").bold(), address);
    }
    if let Some(ref phone) = contractor.phone {
        println!("{}: {}", style("Phone").bold(), phone);
    }
    if let Some(ref fax) = contractor.fax {
        println!("{}: {}", style("Fax").bold(), fax);
    }
    if let Some(ref country) = contractor.country {
        println!("{}: {}", style("Country").bold(), country);
    }

    let values = store
        .select(
            &Select::from(CONTRACTOR_AGREEMENTS)
                .filter(Filter::Eq("contractor_id".into(), id.to_string()))
                .order_by_desc("date_start"),
        )
        .into_diagnostic()
        .wrap_err("failed to fetch contractor agreements")?;
    let agreements: Vec<ContractorAgreement> = rows(values)
        .into_diagnostic()
        .wrap_err("failed to fetch contractor agreements")?;

    if agreements.is_empty() {
        println!();
        println!("No agreements on file.");
        return Ok(());
    }

    let mut table = Builder::default();
    table.push_record(["Type", "Start", "End"]);
    for agreement in agreements {
        table.push_record([
            agreement.agreement_type,
            agreement
                .date_start
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            agreement
                .date_end
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!();
    println!("{}", table.build().with(Style::modern()));

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let id = UuidSource.new_id();

    store
        .insert(
            CONTRACTORS,
            json!({
                "id": id,
                "name": args.name,
                "sigle": args.sigle,
                "address": args.address,
                "phone": args.phone,
                "fax": args.fax,
                "country": args.country,
            }),
            None,
        )
        .into_diagnostic()
        .wrap_err("failed to create contractor")?;

    if !global.quiet {
        println!(
            "{} Created contractor '{}' ({})",
            style("✓").green(),
            args.name,
            id.short()
        );
    }
    Ok(())
}

//! `cpt domain` command - domain and subdomain reference data

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde_json::json;

use crate::cli::helpers::{escape_csv, id_cell, open_store, parse_id};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::{IdSource, UuidSource};
use crate::entities::domain::{Domain, Subdomain, DOMAINS, SUBDOMAINS};
use crate::store::{rows, single_row, CatalogStore, Filter, Select};

#[derive(Subcommand, Debug)]
pub enum DomainCommands {
    /// List domains, optionally with their subdomains
    List(ListArgs),

    /// Create a new domain or subdomain
    New(NewArgs),

    /// Delete a domain and its subdomains
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Include subdomains under each domain
    #[arg(long, short = 's')]
    pub subdomains: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Name of the new domain or subdomain
    pub name: String,

    /// Create a subdomain under this parent domain ID instead
    #[arg(long, value_name = "DOMAIN_ID")]
    pub parent: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Domain ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run a domain subcommand
pub fn run(cmd: DomainCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        DomainCommands::List(args) => run_list(args, global),
        DomainCommands::New(args) => run_new(args, global),
        DomainCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;

    let values = store
        .select(&Select::from(DOMAINS).order_by("name"))
        .into_diagnostic()
        .wrap_err("failed to fetch domains")?;
    let domains: Vec<Domain> = rows(values)
        .into_diagnostic()
        .wrap_err("failed to fetch domains")?;

    if domains.is_empty() {
        println!("No domains found.");
        return Ok(());
    }

    let subdomains: Vec<Subdomain> = if args.subdomains {
        let values = store
            .select(&Select::from(SUBDOMAINS).order_by("name"))
            .into_diagnostic()
            .wrap_err("failed to fetch subdomains")?;
        rows(values)
            .into_diagnostic()
            .wrap_err("failed to fetch subdomains")?
    } else {
        Vec::new()
    };

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&domains).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,name");
            for domain in &domains {
                println!("{},{}", domain.id, escape_csv(&domain.name));
            }
        }
        OutputFormat::Id => {
            for domain in &domains {
                println!("{}", domain.id);
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            for domain in &domains {
                println!(
                    "{} {}",
                    style(id_cell(domain.id, global.verbose)).cyan(),
                    style(&domain.name).bold()
                );
                for subdomain in subdomains.iter().filter(|s| s.domain_id == domain.id) {
                    println!(
                        "    {} {}",
                        style(id_cell(subdomain.id, global.verbose)).dim(),
                        subdomain.name
                    );
                }
            }
            println!();
            println!("{} domain(s) found.", style(domains.len()).cyan());
        }
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let id = UuidSource.new_id();

    match args.parent {
        Some(ref parent) => {
            let domain_id = parse_id(parent)?;
            store
                .insert(
                    SUBDOMAINS,
                    json!({ "id": id, "name": args.name, "domain_id": domain_id }),
                    None,
                )
                .into_diagnostic()
                .wrap_err("failed to create subdomain")?;
            if !global.quiet {
                println!(
                    "{} Created subdomain '{}' ({})",
                    style("✓").green(),
                    args.name,
                    id.short()
                );
            }
        }
        None => {
            store
                .insert(DOMAINS, json!({ "id": id, "name": args.name }), None)
                .into_diagnostic()
                .wrap_err("failed to create domain")?;
            if !global.quiet {
                println!(
                    "{} Created domain '{}' ({})",
                    style("✓").green(),
                    args.name,
                    id.short()
                );
            }
        }
    }

    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let id = parse_id(&args.id)?;

    let values = store
        .select(&Select::from(DOMAINS).filter(Filter::Eq("id".into(), id.to_string())))
        .into_diagnostic()
        .wrap_err("failed to fetch domain")?;
    let domain: Domain = single_row(DOMAINS, values)
        .into_diagnostic()
        .wrap_err("failed to fetch domain")?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete domain '{}'? This also removes its subdomains.",
                domain.name
            ))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    // Subdomains first so a failure never orphans them.
    store
        .delete(SUBDOMAINS, &[Filter::Eq("domain_id".into(), id.to_string())])
        .into_diagnostic()
        .wrap_err("failed to delete subdomains")?;
    store
        .delete(DOMAINS, &[Filter::Eq("id".into(), id.to_string())])
        .into_diagnostic()
        .wrap_err("failed to delete domain")?;

    if !global.quiet {
        println!("{} Deleted domain '{}'", style("✓").green(), domain.name);
    }
    Ok(())
}

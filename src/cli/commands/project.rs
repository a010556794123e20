//! `cpt project` command - project management and the creation wizard

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;
use serde_json::json;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, id_cell, open_store, parse_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::UuidSource;
use crate::entities::project::{
    Project, ProjectStatus, ProjectType, PROJECTS, PROJECT_EQUIPMENT,
};
use crate::store::{related, rows, single_row, CatalogStore, Filter, OneOrMany, Select};
use crate::wizard::WizardSession;

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a project through the interactive wizard
    New,

    /// List projects with filtering
    List(ListArgs),

    /// Show a project's details and equipment
    Show(ShowArgs),

    /// Change a project's lifecycle status
    SetStatus(SetStatusArgs),

    /// Delete a project and its equipment rows
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by project type
    #[arg(long, short = 't', value_name = "TYPE")]
    pub project_type: Option<ProjectType>,

    /// Filter by status
    #[arg(long, short = 's')]
    pub status: Option<ProjectStatus>,

    /// Search in project names
    #[arg(long)]
    pub search: Option<String>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Project ID
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct SetStatusArgs {
    /// Project ID
    pub id: String,

    /// New status
    pub status: ProjectStatus,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Project ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Run a project subcommand
pub fn run(cmd: ProjectCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProjectCommands::New => run_new(),
        ProjectCommands::List(args) => run_list(args, global),
        ProjectCommands::Show(args) => run_show(args, global),
        ProjectCommands::SetStatus(args) => run_set_status(args, global),
        ProjectCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_new() -> Result<()> {
    let store = open_store()?;
    WizardSession::new(&store, &UuidSource).run()
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;

    let mut query = Select::from(PROJECTS).order_by_desc("created_at");
    if let Some(project_type) = args.project_type {
        query = query.filter(Filter::Eq("project_type".into(), project_type.to_string()));
    }
    if let Some(status) = args.status {
        query = query.filter(Filter::Eq("status".into(), status.to_string()));
    }
    if let Some(ref search) = args.search {
        query = query.filter(Filter::Contains("name".into(), search.clone()));
    }

    let values = store
        .select(&query)
        .into_diagnostic()
        .wrap_err("failed to fetch projects")?;
    let mut projects: Vec<Project> = rows(values)
        .into_diagnostic()
        .wrap_err("failed to fetch projects")?;

    if let Some(limit) = args.limit {
        projects.truncate(limit);
    }

    if args.count {
        println!("{}", projects.len());
        return Ok(());
    }
    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&projects).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("id,name,type,status,agreement,created");
            for project in &projects {
                println!(
                    "{},{},{},{},{},{}",
                    project.id,
                    escape_csv(&project.name),
                    project.project_type,
                    project.status,
                    escape_csv(&project.agreement_type),
                    project
                        .created_at
                        .map(|c| c.format("%Y-%m-%d").to_string())
                        .unwrap_or_default()
                );
            }
        }
        OutputFormat::Id => {
            for project in &projects {
                println!("{}", project.id);
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<10} {:<50} {:<12} {:<10} {:<12}",
                style("ID").bold(),
                style("NAME").bold(),
                style("TYPE").bold(),
                style("STATUS").bold(),
                style("CREATED").bold()
            );
            println!("{}", "-".repeat(96));
            for project in &projects {
                println!(
                    "{:<10} {:<50} {:<12} {:<10} {:<12}",
                    style(id_cell(project.id, global.verbose)).cyan(),
                    truncate_str(&project.name, 48),
                    project.project_type,
                    project.status,
                    project
                        .created_at
                        .map(|c| c.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "-".to_string())
                );
            }
            println!();
            println!("{} project(s) found.", style(projects.len()).cyan());
        }
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct NameRow {
    name: String,
}

#[derive(Debug, Deserialize)]
struct EquipmentDetailRow {
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    certified_by_onee: bool,
    #[serde(default)]
    articles: Option<OneOrMany<NameRow>>,
    #[serde(default)]
    manufacturers: Option<OneOrMany<NameRow>>,
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let id = parse_id(&args.id)?;

    let values = store
        .select(&Select::from(PROJECTS).filter(Filter::Eq("id".into(), id.to_string())))
        .into_diagnostic()
        .wrap_err("failed to fetch project")?;
    let project: Project = single_row(PROJECTS, values)
        .into_diagnostic()
        .wrap_err("failed to fetch project")?;

    if global.format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&project).into_diagnostic()?
        );
        return Ok(());
    }

    println!("{}: {}", style("Project").bold(), project.name);
    println!("{}: {}", style("ID").bold(), project.id);
    println!("{}: {}", style("Type").bold(), project.project_type);
    println!("{}: {}", style("Status").bold(), project.status);
    println!("{}: {}", style("Agreement").bold(), project.agreement_type);
    if let Some(created) = project.created_at {
        println!("{}: {}", style("Created").bold(), created.format("%Y-%m-%d %H:%M"));
    }

    if project.project_type == ProjectType::Supplier {
        let values = store
            .select(
                &Select::from(PROJECT_EQUIPMENT)
                    .columns(
                        "reference, certified_by_onee, articles(name), manufacturers(name)",
                    )
                    .filter(Filter::Eq("project_id".into(), project.id.to_string())),
            )
            .into_diagnostic()
            .wrap_err("failed to fetch project equipment")?;
        let equipment: Vec<EquipmentDetailRow> = rows(values)
            .into_diagnostic()
            .wrap_err("failed to fetch project equipment")?;

        if equipment.is_empty() {
            println!();
            println!("No equipment rows recorded for this project.");
            return Ok(());
        }

        let mut table = Builder::default();
        table.push_record(["Equipment", "Supplier", "Reference", "ONEE"]);
        for row in equipment {
            table.push_record([
                related(row.articles).map(|a| a.name).unwrap_or_else(|| "-".to_string()),
                related(row.manufacturers)
                    .map(|m| m.name)
                    .unwrap_or_else(|| "-".to_string()),
                row.reference.unwrap_or_else(|| "-".to_string()),
                if row.certified_by_onee { "Yes" } else { "No" }.to_string(),
            ]);
        }
        println!();
        println!("{}", table.build().with(Style::modern()));
    }

    Ok(())
}

fn run_set_status(args: SetStatusArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let id = parse_id(&args.id)?;

    store
        .update(
            PROJECTS,
            &[Filter::Eq("id".into(), id.to_string())],
            json!({ "status": args.status.to_string() }),
        )
        .into_diagnostic()
        .wrap_err("failed to update project status")?;

    if !global.quiet {
        println!(
            "{} Project {} set to {}",
            style("✓").green(),
            style(id.short()).cyan(),
            args.status
        );
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;
    let id = parse_id(&args.id)?;

    let values = store
        .select(&Select::from(PROJECTS).filter(Filter::Eq("id".into(), id.to_string())))
        .into_diagnostic()
        .wrap_err("failed to fetch project")?;
    let project: Project = single_row(PROJECTS, values)
        .into_diagnostic()
        .wrap_err("failed to fetch project")?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete project '{}'? This also removes its equipment rows.",
                project.name
            ))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    // Equipment rows first so a failure never orphans them.
    store
        .delete(
            PROJECT_EQUIPMENT,
            &[Filter::Eq("project_id".into(), id.to_string())],
        )
        .into_diagnostic()
        .wrap_err("failed to delete project equipment")?;
    store
        .delete(PROJECTS, &[Filter::Eq("id".into(), id.to_string())])
        .into_diagnostic()
        .wrap_err("failed to delete project")?;

    if !global.quiet {
        println!("{} Deleted project '{}'", style("✓").green(), project.name);
    }
    Ok(())
}

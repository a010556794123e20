//! `cpt article` command - equipment article catalog

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;

use crate::cli::helpers::{escape_csv, id_cell, open_store, parse_id, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::RowId;
use crate::entities::article::ARTICLES;
use crate::store::{related, rows, CatalogStore, Filter, OneOrMany, Select};
use crate::wizard::selectors::fetch_articles_for_subdomain;

#[derive(Subcommand, Debug)]
pub enum ArticleCommands {
    /// List articles with filtering
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search in article names
    #[arg(long)]
    pub search: Option<String>,

    /// Restrict to articles available under a subdomain
    #[arg(long, value_name = "SUBDOMAIN_ID")]
    pub subdomain: Option<String>,

    /// Restrict to articles in a category
    #[arg(long, value_name = "CATEGORY_ID", conflicts_with = "subdomain")]
    pub category: Option<String>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(Debug, Deserialize)]
struct NameRow {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ArticleRow {
    id: RowId,
    name: String,
    #[serde(default)]
    category: Option<OneOrMany<NameRow>>,
}

/// Run an article subcommand
pub fn run(cmd: ArticleCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ArticleCommands::List(args) => run_list(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store()?;

    // (id, name, category name)
    let mut articles: Vec<(RowId, String, Option<String>)> = match args.subdomain {
        Some(ref subdomain) => {
            let subdomain_id = parse_id(subdomain)?;
            fetch_articles_for_subdomain(&store, subdomain_id)
                .into_diagnostic()
                .wrap_err("failed to fetch articles")?
                .into_iter()
                .map(|a| (a.id, a.name, a.category_name))
                .collect()
        }
        None => {
            let mut query = Select::from(ARTICLES)
                .columns("id, name, category:categories(name)")
                .order_by("name");
            if let Some(ref category) = args.category {
                let category_id = parse_id(category)?;
                query = query.filter(Filter::Eq("category_id".into(), category_id.to_string()));
            }
            if let Some(ref search) = args.search {
                query = query.filter(Filter::Contains("name".into(), search.clone()));
            }
            let values = store
                .select(&query)
                .into_diagnostic()
                .wrap_err("failed to fetch articles")?;
            rows::<ArticleRow>(values)
                .into_diagnostic()
                .wrap_err("failed to fetch articles")?
                .into_iter()
                .map(|row| (row.id, row.name, related(row.category).map(|c| c.name)))
                .collect()
        }
    };

    if let Some(ref search) = args.search {
        let needle = search.to_lowercase();
        articles.retain(|(_, name, _)| name.to_lowercase().contains(&needle));
    }

    if args.count {
        println!("{}", articles.len());
        return Ok(());
    }
    if articles.is_empty() {
        println!("No articles found.");
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            let payload: Vec<serde_json::Value> = articles
                .iter()
                .map(|(id, name, category)| {
                    serde_json::json!({ "id": id, "name": name, "category": category })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).into_diagnostic()?
            );
        }
        OutputFormat::Csv => {
            println!("id,name,category");
            for (id, name, category) in &articles {
                println!(
                    "{},{},{}",
                    id,
                    escape_csv(name),
                    escape_csv(category.as_deref().unwrap_or(""))
                );
            }
        }
        OutputFormat::Id => {
            for (id, _, _) in &articles {
                println!("{}", id);
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            println!(
                "{:<10} {:<40} {:<25}",
                style("ID").bold(),
                style("NAME").bold(),
                style("CATEGORY").bold()
            );
            println!("{}", "-".repeat(76));
            for (id, name, category) in &articles {
                println!(
                    "{:<10} {:<40} {:<25}",
                    style(id_cell(*id, global.verbose)).cyan(),
                    truncate_str(name, 38),
                    category.as_deref().unwrap_or("-")
                );
            }
            println!();
            println!("{} article(s) found.", style(articles.len()).cyan());
        }
    }

    Ok(())
}

//! Command line lookup of the catalog, no login required.

use crate::catalog::Catalog;
use crate::cli_style::get_styles;
use crate::config::{parse_path, DEFAULT_RESOURCES_PATH};
use crate::presenter::{render_detail, render_listing, render_not_found, render_search_results};
use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Look up veteran resources by category.
#[derive(Parser, Debug)]
#[command(name = "compass4vets", styles = get_styles())]
pub struct CliArgs {
    /// Category to show, matched ignoring case.
    pub category: Option<String>,

    /// List all categories. Takes precedence over a category argument and --search.
    #[clap(short, long)]
    pub list: bool,

    /// Show the categories whose name or description contains this text, ignoring case.
    #[clap(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Path to the resources catalog.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_RESOURCES_PATH)]
    pub resources: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    List,
    Search(String),
    Show(String),
}

impl From<&CliArgs> for CliAction {
    fn from(args: &CliArgs) -> Self {
        if args.list {
            return CliAction::List;
        }
        match (&args.search, &args.category) {
            (Some(query), _) => CliAction::Search(query.clone()),
            (None, Some(category)) => CliAction::Show(category.clone()),
            (None, None) => CliAction::List,
        }
    }
}

/// Writes the output of `action` to `out`. A missing category is not an error.
pub fn run_action<W: Write>(catalog: &Catalog, action: &CliAction, out: &mut W) -> Result<()> {
    let text = match action {
        CliAction::List => render_listing(catalog),
        CliAction::Search(query) => render_search_results(query, catalog.search(query)),
        CliAction::Show(requested) => match catalog.find(requested) {
            Ok((name, category)) => render_detail(name, category),
            Err(err) => {
                debug!("{}", err);
                render_not_found(&err)
            }
        },
    };
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

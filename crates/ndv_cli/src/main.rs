use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use ndv_core::{FacetField, PaginationPolicy, ViewConfig, ViewController};
use ndv_fetch::{apply_effect, create_source, init_logging, refresh, ArticleSource};
use tracing::info;

mod render;

const DEFAULT_SOURCE: &str = "http://127.0.0.1:5000/articles";

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse a data-journal article collection", long_about = None)]
pub struct Cli {
    /// Articles endpoint URL or path to a JSON export
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: String,
    /// JSON file with view settings
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    page_size: Option<usize>,
    /// Page numbers shown around the current page
    #[arg(long)]
    max_visible: Option<usize>,
    /// List every page number instead of a window
    #[arg(long)]
    full_pagination: bool,
    /// Facet axis: category or tag
    #[arg(long)]
    facet: Option<FacetField>,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print one page of the grouped article list
    Browse {
        #[command(flatten)]
        selection: Selection,
        /// Print the derived view as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the facet values of the collection
    Facets,
    /// Show the details of one article of the filtered list (0-based)
    Show {
        index: usize,
        #[command(flatten)]
        selection: Selection,
    },
}

#[derive(clap::Args, Debug)]
struct Selection {
    /// Facet value to filter by
    #[arg(long)]
    category: Option<String>,
    /// Search keyword, resolved by the source
    #[arg(long, conflicts_with = "category")]
    keyword: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: usize,
}

impl Cli {
    fn view_config(&self) -> anyhow::Result<ViewConfig> {
        let mut config = match &self.config {
            Some(path) => ViewConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ViewConfig::default(),
        };
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(max_visible) = self.max_visible {
            config.pagination = PaginationPolicy::Windowed { max_visible };
        }
        if self.full_pagination {
            config.pagination = PaginationPolicy::Full;
        }
        if let Some(facet) = self.facet {
            config.facet = facet;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Replay a selection as the events a user would trigger.
async fn select(
    controller: &mut ViewController,
    source: &dyn ArticleSource,
    selection: &Selection,
) -> anyhow::Result<()> {
    if let Some(keyword) = &selection.keyword {
        let effect = controller.submit_keyword(keyword.as_str());
        apply_effect(controller, source, effect).await;
    }
    if let Some(category) = &selection.category {
        let effect = controller.select_category(category.as_str());
        apply_effect(controller, source, effect).await;
    }
    if selection.page != 1 {
        let effect = controller.select_page(selection.page);
        if !apply_effect(controller, source, effect).await {
            bail!(
                "Page {} is out of range (1-{})",
                selection.page,
                controller.total_pages().max(1)
            );
        }
    }
    Ok(())
}

fn print_status(controller: &ViewController) {
    if let Some(status) = controller.status() {
        eprintln!("{}", render::render_status(status));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let logger = init_logging(cli.verbose).with_prefix("[ndv]");
    let config = cli.view_config()?;

    let source = create_source(&cli.source)?;
    let mut controller = ViewController::new(config)?;

    info!("📚 Loading articles from {}", cli.source);
    let query = controller.initial_query();
    refresh(&mut controller, source.as_ref(), query).await;
    if let Some(status) = controller.status() {
        if status.level == ndv_core::StatusLevel::Danger {
            bail!("{}", status.text);
        }
    }
    logger.info(&format!("{} articles loaded", controller.index().len()));

    match &cli.command {
        Commands::Browse { selection, json } => {
            select(&mut controller, source.as_ref(), selection).await?;
            print_status(&controller);
            let view = controller.derive();
            if *json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render::render_view(controller.state(), &view));
            }
        }
        Commands::Facets => {
            for facet in controller.facets() {
                println!("{}", facet);
            }
        }
        Commands::Show { index, selection } => {
            select(&mut controller, source.as_ref(), selection).await?;
            let detail = controller.detail(*index)?;
            print!("{}", render::render_detail(&detail));
        }
    }

    Ok(())
}

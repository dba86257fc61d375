//! `ingredient-screen`: screen ingredient labels from the command line.
//!
//! Reads ingredient text from `--text` or stdin (or an Open Food Facts
//! product JSON with `--product`) and prints a JSON report on stdout. Logs
//! go to stderr; set `INGREDIENT_SCREEN_LOG` to override the configured
//! filter.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use ingredient_screen::{
    matcher_from_config, screen_product, Category, LogFormat, Matcher, ProductResponse,
    ReferenceIndex, ScreenConfig,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "INGREDIENT_SCREEN_LOG";

#[derive(Debug, Parser)]
#[command(name = "ingredient-screen", version, about = "Flag banned ingredients in food labels")]
struct Cli {
    /// Ingredient text to screen; read from stdin when omitted
    #[arg(long, conflicts_with_all = ["product", "list"])]
    text: Option<String>,

    /// Screen an Open Food Facts product API response (`-` for stdin)
    #[arg(long, value_name = "PATH", conflicts_with = "list")]
    product: Option<PathBuf>,

    /// Comma-separated additive tags, e.g. `en:e102,en:e330`
    #[arg(long, value_delimiter = ',')]
    additives: Vec<String>,

    /// YAML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the reference catalog instead of screening
    #[arg(long)]
    list: bool,

    /// With --list: only entries whose name or alias contains this text
    #[arg(long, requires = "list")]
    search: Option<String>,

    /// With --list: only this category (e.g. `seed_oil` or "Seed Oil")
    #[arg(long, requires = "list", value_parser = parse_category)]
    category: Option<Category>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::parse(value).ok_or_else(|| {
        let known: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        format!("unknown category {value:?}; expected one of {}", known.join(", "))
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScreenConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScreenConfig::default(),
    };
    init_tracing(&config);

    let matcher = matcher_from_config(&config).context("building reference index")?;

    let output = if cli.list {
        catalog_json(matcher.index(), cli.search.as_deref().unwrap_or(""), cli.category)
    } else if let Some(path) = &cli.product {
        screen_product_json(&matcher, path)?
    } else {
        let text = match cli.text {
            Some(text) => text,
            None => read_input(Path::new("-"))?,
        };
        let tags = (!cli.additives.is_empty()).then_some(cli.additives.as_slice());
        serde_json::to_value(matcher.assess(Some(text.as_str()), tags))?
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(())
}

fn init_tracing(config: &ScreenConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("reading stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn screen_product_json(matcher: &Matcher, path: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = read_input(path)?;
    let product = ProductResponse::from_json(&raw)?.into_product()?;
    let screening = screen_product(matcher, &product)?;
    Ok(serde_json::to_value(screening)?)
}

fn catalog_json(index: &ReferenceIndex, query: &str, category: Option<Category>) -> serde_json::Value {
    let entries = index.search(query, category);
    let groups: Vec<_> = ReferenceIndex::grouped_by_category(&entries)
        .into_iter()
        .map(|(category, members)| {
            json!({
                "category": category,
                "label": category.label(),
                "description": category.description(),
                "ingredients": members,
            })
        })
        .collect();

    json!({
        "total": entries.len(),
        "categories": groups,
    })
}

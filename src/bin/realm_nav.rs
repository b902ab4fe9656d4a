//! Queries a published project catalog.
//!
//! Loads `project-realms.json` (strictly: schema version and order/entry
//! consistency are checked) and answers the lookups the front-end performs:
//! display order, entry lookup with first-entry fallback, circular
//! previous/next neighbors, and resolved external links. Output is compact
//! JSON on stdout.

use anyhow::{Context, Result, bail};
use realm_catalog::site_build::{CATALOG_OUTPUT, OUTPUT_DIR};
use realm_catalog::{
    Catalog, ExternalLink, ProjectId, PublishedProject, load_catalog_from_path,
    resolve_site_root,
};
use serde_json::{Value, json};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("realm-nav: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = CliArgs::parse()?;
    let catalog_path = match args.catalog {
        Some(path) => path,
        None => resolve_site_root(None)?
            .join(OUTPUT_DIR)
            .join(CATALOG_OUTPUT),
    };
    let document = load_catalog_from_path(&catalog_path)?;
    let catalog = Catalog::<PublishedProject>::from_document(document)
        .with_context(|| format!("loading {}", catalog_path.display()))?;

    let output = answer(&catalog, &args.query)?;
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn answer(catalog: &Catalog<PublishedProject>, query: &Query) -> Result<Value> {
    let value = match query {
        Query::Order => json!(catalog.ids()),
        Query::Get(id) => match catalog.get(id) {
            Some(entry) => serde_json::to_value(entry)?,
            None => bail!("catalog is empty"),
        },
        Query::Neighbors(id) => match catalog.neighbors(id) {
            Some(around) => json!({
                "previous": around.previous.record.id,
                "next": around.next.record.id,
            }),
            None => bail!("catalog is empty"),
        },
        Query::Links(id) => match catalog.get(id) {
            Some(entry) => {
                let links: Vec<ExternalLink> = entry
                    .record
                    .assets
                    .links
                    .iter()
                    .map(|raw| ExternalLink::parse(raw))
                    .collect();
                serde_json::to_value(links)?
            }
            None => bail!("catalog is empty"),
        },
    };
    Ok(value)
}

enum Query {
    Order,
    Get(ProjectId),
    Neighbors(ProjectId),
    Links(ProjectId),
}

struct CliArgs {
    catalog: Option<PathBuf>,
    query: Query,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut catalog: Option<PathBuf> = None;
        let mut positional: Vec<String> = Vec::new();

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--catalog" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("missing value for --catalog"))?;
                    catalog = Some(PathBuf::from(path));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
                _ => positional.push(arg),
            }
        }

        let query = match positional.as_slice() {
            [command] if command == "order" => Query::Order,
            [command] => bail!("unknown command or missing id: {command}"),
            [command, id] => {
                let id = ProjectId(id.clone());
                match command.as_str() {
                    "get" => Query::Get(id),
                    "neighbors" => Query::Neighbors(id),
                    "links" => Query::Links(id),
                    other => bail!("unknown command: {other}"),
                }
            }
            [] => bail!("missing command; see --help"),
            _ => bail!("unexpected arguments: {}", positional.join(" ")),
        };

        Ok(CliArgs { catalog, query })
    }
}

fn usage() -> &'static str {
    "Usage: realm-nav [--catalog FILE] <order | get ID | neighbors ID | links ID>\n\
Reads a published project catalog (default: <site root>/src/data/project-realms.json) and prints the answer as JSON.\n\
Unknown ids never fail: get falls back to the first project, neighbors to the last/first pair.\n"
}

fn print_usage() {
    print!("{}", usage());
}

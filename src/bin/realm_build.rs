//! Builds the portfolio data files from plain-text sources.
//!
//! Discovers the site root (or honors `--root`), parses every
//! `projects/*.txt` document plus `about/profile.txt`, applies
//! `projects/order.txt`, validates the results against the catalog/profile
//! schemas, and writes `project-realms.json` and `about-data.json` into the
//! output directory (default `src/data/`).

use anyhow::{Result, bail};
use realm_catalog::{BuildOptions, SiteLayout, build_site, resolve_site_root};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("realm-build: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    init_logging(args.verbosity);

    let root = resolve_site_root(args.root.as_deref())?;
    let mut layout = SiteLayout::at_root(&root);
    if let Some(out) = args.output_dir {
        layout = layout.with_output_dir(out);
    }
    log::debug!("building site at {}", layout.root.display());

    let options = BuildOptions {
        skip_validation: args.skip_validation,
        schema_dir: args.schema_dir,
    };
    let report = build_site(&layout, &options)?;

    for id in &report.order {
        log::info!("  ✓ catalogued {id}");
    }
    log::info!(
        "  ✓ {} ({} projects)",
        report.catalog_path.display(),
        report.order.len()
    );
    if let Some(profile) = &report.profile_path {
        log::info!("  ✓ {}", profile.display());
    }
    log::info!("Built {} project(s) successfully.", report.order.len());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

fn init_logging(verbosity: Verbosity) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match verbosity {
        Verbosity::Quiet => {
            builder.filter_level(log::LevelFilter::Warn);
        }
        Verbosity::Verbose => {
            builder.filter_level(log::LevelFilter::Debug);
        }
        Verbosity::Normal => {}
    }
    builder
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

struct CliArgs {
    root: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    schema_dir: Option<PathBuf>,
    skip_validation: bool,
    verbosity: Verbosity,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut root: Option<PathBuf> = None;
        let mut output_dir: Option<PathBuf> = None;
        let mut schema_dir: Option<PathBuf> = None;
        let mut skip_validation = false;
        let mut verbosity = Verbosity::Normal;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--root" => root = Some(next_path(&mut args, "--root")?),
                "--out" => output_dir = Some(next_path(&mut args, "--out")?),
                "--schema-dir" => schema_dir = Some(next_path(&mut args, "--schema-dir")?),
                "--no-validate" => skip_validation = true,
                "--quiet" | "-q" => {
                    if verbosity == Verbosity::Verbose {
                        bail!("--quiet and --verbose are mutually exclusive");
                    }
                    verbosity = Verbosity::Quiet;
                }
                "--verbose" | "-v" => {
                    if verbosity == Verbosity::Quiet {
                        bail!("--quiet and --verbose are mutually exclusive");
                    }
                    verbosity = Verbosity::Verbose;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        if skip_validation && schema_dir.is_some() {
            bail!("--schema-dir has no effect with --no-validate");
        }

        Ok(CliArgs {
            root,
            output_dir,
            schema_dir,
            skip_validation,
            verbosity,
        })
    }
}

fn next_path(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<PathBuf> {
    args.next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: realm-build [--root DIR] [--out DIR] [--schema-dir DIR] [--no-validate] [--quiet|--verbose]\n\
Parses projects/*.txt and about/profile.txt under the site root and writes project-realms.json and about-data.json (default: <root>/src/data).\n\
The site root defaults to PORTFOLIO_ROOT, then the nearest ancestor of the working directory containing projects/.\n"
}

fn print_usage() {
    print!("{}", usage());
}

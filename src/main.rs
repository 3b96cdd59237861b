use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::env;
use std::io;
use std::path::Path;

use name_resolver::cli::{Cli, env_file_from_args};
use name_resolver::config::{AppConfig, OutputFormat};
use name_resolver::dataset::load_records;
use name_resolver::export::table::render_breakdown;
use name_resolver::export::{export_to_csv, render_table, write_results_csv};
use name_resolver::logging::init_logging;
use name_resolver::matching::{SearchOptions, build_query, explain, prepare_with_key_len};
use name_resolver::models::{Gender, MatchResult};
use name_resolver::util::envfile::{load_dotenv_if_present, load_env_file_from, write_env_template};
use name_resolver::util::partition::{Partition, PartitionSelector, search_selected};

fn main() {
    init_logging();
    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    match env_file_from_args(&args) {
        Some(path) => {
            let map = load_env_file_from(&path)?;
            info!("Loaded {} settings from {}", map.len(), path.display());
        }
        None => load_dotenv_if_present()?,
    }

    let cli = Cli::parse();

    if let Some(path) = cli.write_env_template.as_deref() {
        write_env_template(path)?;
        println!(
            "Wrote {}. Copy to .env and edit values as needed.",
            path.display()
        );
        return Ok(());
    }

    let cfg = cli.to_app_config().context("Invalid configuration")?;
    let partitions = load_partitions(&cfg)?;

    let query = cli.query.as_deref().unwrap_or_default();
    let selector = PartitionSelector::from(cli.gender);
    let options = SearchOptions::from(&cfg.search);
    info!(
        "Searching '{}' (gender: {}, min score {}, top {})",
        query,
        selector.as_str(),
        options.min_score,
        options.top_n
    );
    let hits = search_selected(
        query,
        &partitions,
        selector,
        &options,
        cfg.search.merged_limit,
    );

    if hits.is_empty() {
        eprintln!("No matches found.");
        return Ok(());
    }
    emit(&cfg, &hits)?;

    if cli.explain {
        let profile = build_query(query, cfg.search.phonetic_key_len);
        for hit in &hits {
            eprint!(
                "{}",
                render_breakdown(&hit.record.id, &explain(&profile, hit.record))
            );
        }
    }
    Ok(())
}

/// Load and prepare every configured dataset. Records without a gender of their
/// own take the gender of the file they come from.
fn load_partitions(cfg: &AppConfig) -> Result<Vec<Partition>> {
    let sources = [
        ("male", Gender::Male, cfg.datasets.male.as_deref()),
        ("female", Gender::Female, cfg.datasets.female.as_deref()),
    ];
    let mut partitions = Vec::new();
    for (name, gender, path) in sources {
        let Some(path) = path.filter(|p| !p.trim().is_empty()) else {
            continue;
        };
        let mut raw = load_records(Path::new(path), &cfg.datasets.columns)
            .with_context(|| format!("Failed to load {} dataset", name))?;
        for rec in raw.iter_mut().filter(|r| r.gender == Gender::Unknown) {
            rec.gender = gender;
        }
        let records = prepare_with_key_len(raw, cfg.search.phonetic_key_len);
        partitions.push(Partition::new(name, gender, records));
    }
    Ok(partitions)
}

fn emit(cfg: &AppConfig, hits: &[MatchResult<'_>]) -> Result<()> {
    match (cfg.export.output_format(), cfg.export.out_path.as_deref()) {
        (_, Some(out)) => export_to_csv(Path::new(out), hits)?,
        (OutputFormat::Csv, None) => {
            write_results_csv(io::stdout().lock(), hits).context("Failed to write CSV")?
        }
        (OutputFormat::Table, None) => print!("{}", render_table(hits)),
    }
    Ok(())
}

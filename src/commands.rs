use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use bizu::config::{self, BizuConfig};
use bizu::ui::{self, Spinner};
use bizu::{Language, PopulateOutcome, QueryService};

pub fn run_init(config_path: &Path, force: bool) -> anyhow::Result<()> {
    let starter = BizuConfig::starter();
    config::write_config(config_path, &starter, force)?;
    config::ensure_gitignore(Path::new("."))?;

    ui::success(&format!("Wrote {}", config_path.display()));
    ui::info("Database", &starter.database_path().display().to_string());
    ui::info("Source", &starter.source_path().display().to_string());
    Ok(())
}

pub fn run_load(settings: &BizuConfig) -> anyhow::Result<()> {
    ui::header("Loading dictionary");
    ui::info("Database", &settings.database_path().display().to_string());
    ui::info("Source", &settings.source_path().display().to_string());

    let service = config::open_service(settings)?;
    let spinner = Spinner::new("Preparing database...");
    let outcome = match service.ensure_ready() {
        Ok(outcome) => outcome,
        Err(err) => {
            spinner.abandon();
            return Err(err.into());
        }
    };

    match outcome {
        PopulateOutcome::Loaded { entries } => {
            spinner.finish_with_message(&format!("Loaded {} entries", entries));
        }
        PopulateOutcome::AlreadyPopulated { entries } => {
            spinner.finish_with_message(&format!("Already populated ({} entries)", entries));
        }
        PopulateOutcome::SourceEmpty => {
            spinner.abandon();
            ui::warn("Source has no data rows; the dictionary is empty and will be loaded on next start");
        }
    }
    Ok(())
}

pub fn run_search(settings: &BizuConfig, language: &str, query: &str, json: bool) -> anyhow::Result<()> {
    let service = ready_service(settings)?;
    // The CLI accepts loose spellings such as `english` or `orom-latin`
    let selected = Language::parse(language);
    let results = match selected {
        Some(selected) => service.search_in(selected, query)?,
        None => Vec::new(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if selected.is_none() {
        let expected: Vec<_> = Language::all().iter().map(Language::as_str).collect();
        ui::warn(&format!("Unknown language '{}' (expected one of: {})", language, expected.join(", ")));
    }

    ui::header(&format!("{} in {}", ui::highlight(query), language));
    if results.is_empty() {
        ui::no_results("No results found for your query.");
    } else {
        println!("{}", ui::entries_table(&results));
        ui::summary_row("Matches:", &results.len().to_string());
    }
    Ok(())
}

pub fn run_random(settings: &BizuConfig, json: bool) -> anyhow::Result<()> {
    let service = ready_service(settings)?;
    let entry = service.random_entry()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    ui::header("Random word");
    match entry {
        Some(entry) => println!("{}", ui::entries_table(std::slice::from_ref(&entry))),
        None => ui::no_results("No words found in the dictionary to pick a random one."),
    }
    Ok(())
}

pub fn run_stats(settings: &BizuConfig, json: bool) -> anyhow::Result<()> {
    let service = ready_service(settings)?;
    let stats = service.stats()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    ui::header("Bizu Statistics");
    println!("{}", ui::dim(&settings.database_path().display().to_string()));
    println!("{}", ui::stats_table(&stats));
    Ok(())
}

pub fn run_serve(settings: &BizuConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", settings.host(), settings.port()).parse()?;
    let service = Arc::new(ready_service(settings)?);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(bizu::server::start_server(addr, service))
}

fn ready_service(settings: &BizuConfig) -> anyhow::Result<QueryService> {
    let service = config::open_service(settings)?;
    service.ensure_ready()?;
    Ok(service)
}

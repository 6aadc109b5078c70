use anyhow::Result;
use clap::Parser;
use cli::{Cli, TraceLevel};
use dotenv::dotenv;
use lowfare_util::{write_csv, write_xlsx};
use lowfare_warehouse::{self as warehouse, Fare, REGISTRY};
use std::path::Path;
use tracing::{debug, subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod ui;

fn preprocess(trace_level: Level) -> Result<()> {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(my_subscriber)?;
    Ok(())
}

/// Write the report to `csv`, and to `xlsx` when asked. Nothing is written without a report.
fn save(report: Option<Vec<Fare>>, csv: &Path, xlsx: Option<&Path>) -> Result<bool> {
    let Some(rows) = report else {
        eprintln!("No data returned. Check your API keys or try different providers.");
        return Ok(false);
    };
    debug!("{} rows in report", rows.len());

    write_csv(csv, &rows)?;
    println!("Saved CSV -> {}", csv.display());

    if let Some(path) = xlsx {
        write_xlsx(path, &rows)?;
        println!("Saved Excel -> {}", path.display());
    }

    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let log_level = match cli.trace {
        Some(TraceLevel::TRACE) => Level::TRACE,
        Some(TraceLevel::DEBUG) => Level::DEBUG,
        Some(TraceLevel::INFO) => Level::INFO,
        Some(TraceLevel::WARN) => Level::WARN,
        Some(TraceLevel::ERROR) => Level::ERROR,
        None if cli.verbose => Level::DEBUG,
        None => Level::ERROR,
    };

    preprocess(log_level)?;
    trace!("Command line input recorded: {cli:#?}");

    let options = cli.options();

    // "> lowfare --list-providers"
    if cli.list_providers {
        for (name, constructor) in REGISTRY.iter() {
            match constructor(&options).capability_gap() {
                Some(gap) => println!("{name:<10} (returns no data: {gap})"),
                None => println!("{name}"),
            }
        }
        return Ok(());
    }

    // "> lowfare [--origin RIX] [--days 60] ..."
    let sources = warehouse::resolve(&options);
    let pb = ui::single_pb(sources.len() as u64)?;
    if options.verbose {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let report = warehouse::collect(&options, sources, |name, found| {
        pb.set_message(format!("{name}: {found} fares"));
        pb.inc(1);
    })
    .await;
    pb.finish_and_clear();

    save(report, &cli.out_csv, cli.out_xlsx.as_deref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn no_report_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("flights.csv");
        let xlsx = dir.path().join("flights.xlsx");

        let saved = save(None, &csv, Some(&xlsx)).unwrap();

        assert!(!saved);
        assert!(!csv.exists());
        assert!(!xlsx.exists());
    }

    #[test]
    fn report_is_written_to_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("flights.csv");
        let xlsx = dir.path().join("flights.xlsx");
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let rows = vec![Fare::new(day, "STN", "ryanair", Some(19.99), "EUR")];

        let saved = save(Some(rows), &csv, Some(&xlsx)).unwrap();

        assert!(saved);
        let text = std::fs::read_to_string(&csv).unwrap();
        assert!(text.starts_with("date,destination,provider,price,currency"));
        assert!(text.contains("2025-03-14,STN,ryanair,19.99,EUR"));
        assert!(xlsx.metadata().unwrap().len() > 0);
    }

    #[test]
    fn excel_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("flights.csv");
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let rows = vec![Fare::new(day, "BVA", "wizz", Some(44.5), "EUR")];

        assert!(save(Some(rows), &csv, None).unwrap());
        assert!(csv.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}

use chrono::NaiveDate;
use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};
use lowfare_warehouse::options::{self, Options};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about = "Aggregate one-way fares from an origin over the next N days into a table.", long_about = None)]
pub struct Cli {
    /// IATA code of the departure airport.
    #[arg(long, default_value = options::DEFAULT_ORIGIN)]
    pub origin: String,

    /// Number of days to query, starting today (or at --start).
    #[arg(long, default_value_t = options::DEFAULT_DAYS)]
    pub days: u32,

    /// First day of the window, as YYYY-MM-DD.
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Currency to request prices in.
    #[arg(long, env = "DEFAULT_CURRENCY", default_value = options::DEFAULT_CURRENCY)]
    pub currency: String,

    /// Comma-separated provider identifiers; unknown ones are ignored.
    #[arg(long, default_value = options::DEFAULT_PROVIDERS)]
    pub providers: String,

    /// CSV output path.
    #[arg(long = "out", default_value = "flights.csv")]
    pub out_csv: PathBuf,

    /// Optional spreadsheet (.xlsx) output path.
    #[arg(long = "excel")]
    pub out_xlsx: Option<PathBuf>,

    /// Per-request timeout, in seconds.
    #[arg(long, default_value_t = options::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Requests in flight at once, per provider.
    #[arg(long, default_value_t = options::DEFAULT_CONCURRENCY, value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
    pub concurrency: usize,

    /// Fares kept per (date, destination).
    #[arg(long, default_value_t = options::DEFAULT_MAX_PER_DAY, value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
    pub max_per_day: usize,

    /// Log provider and request failures.
    #[arg(long)]
    pub verbose: bool,

    /// Sets the level of tracing; overrides --verbose.
    #[arg(long)]
    pub trace: Option<TraceLevel>,

    /// List the known providers and exit.
    #[arg(long)]
    pub list_providers: bool,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl Cli {
    pub fn options(&self) -> Options {
        Options {
            origin: self.origin.clone(),
            days: self.days,
            start: self.start,
            currency: self.currency.clone(),
            providers: options::parse_providers(&self.providers),
            timeout: Duration::from_secs(self.timeout),
            concurrency: self.concurrency,
            max_per_day: self.max_per_day,
            verbose: self.verbose,
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["lowfare"]).unwrap();
        let opts = cli.options();
        assert_eq!(opts.origin, "RIX");
        assert_eq!(opts.days, 60);
        assert_eq!(opts.providers, vec!["kiwi", "ryanair", "wizz"]);
        assert_eq!(opts.max_per_day, 1);
        assert_eq!(cli.out_csv, PathBuf::from("flights.csv"));
        assert_eq!(cli.out_xlsx, None);
    }

    #[test]
    fn flags() {
        let cli = Cli::try_parse_from([
            "lowfare",
            "--origin",
            "vno",
            "--days",
            "7",
            "--start",
            "2025-01-01",
            "--currency",
            "usd",
            "--providers",
            "Wizz, amadeus",
            "--excel",
            "out.xlsx",
            "--timeout",
            "5",
            "--concurrency",
            "2",
            "--max-per-day",
            "3",
            "--verbose",
        ])
        .unwrap();
        let opts = cli.options();
        assert_eq!(opts.origin, "VNO");
        assert_eq!(opts.start, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(opts.currency, "USD");
        assert_eq!(opts.providers, vec!["wizz", "amadeus"]);
        assert_eq!(opts.timeout, Duration::from_secs(5));
        assert_eq!(opts.concurrency, 2);
        assert_eq!(opts.max_per_day, 3);
        assert!(opts.verbose);
        assert_eq!(cli.out_xlsx, Some(PathBuf::from("out.xlsx")));
    }

    #[test]
    fn zero_bounds_are_rejected() {
        assert!(Cli::try_parse_from(["lowfare", "--max-per-day", "0"]).is_err());
        assert!(Cli::try_parse_from(["lowfare", "--concurrency", "0"]).is_err());
        assert!(Cli::try_parse_from(["lowfare", "--start", "01/01/2025"]).is_err());
    }
}

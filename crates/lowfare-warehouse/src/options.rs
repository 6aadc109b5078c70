use chrono::NaiveDate;
use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "RIX";
pub const DEFAULT_DAYS: u32 = 60;
pub const DEFAULT_CURRENCY: &str = "EUR";
pub const DEFAULT_PROVIDERS: &str = "kiwi,ryanair,wizz";
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;
pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_MAX_PER_DAY: usize = 1;

/// Settings for one run; built once before any querying and read-only from then on.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// IATA code of the departure airport.
    pub origin: String,
    /// Number of days in the date window.
    pub days: u32,
    /// First day of the window; today when absent.
    pub start: Option<NaiveDate>,
    pub currency: String,
    /// Provider identifiers, in the order given.
    pub providers: Vec<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Upper bound on in-flight requests per provider.
    pub concurrency: usize,
    /// Fares kept per (date, destination).
    pub max_per_day: usize,
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            days: DEFAULT_DAYS,
            start: None,
            currency: DEFAULT_CURRENCY.to_string(),
            providers: parse_providers(DEFAULT_PROVIDERS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
            max_per_day: DEFAULT_MAX_PER_DAY,
            verbose: false,
        }
    }
}

impl Options {
    /// Uppercase codes, and hold the bounds at one or more.
    pub fn normalized(mut self) -> Self {
        self.origin = self.origin.trim().to_uppercase();
        self.currency = self.currency.trim().to_uppercase();
        self.concurrency = self.concurrency.max(1);
        self.max_per_day = self.max_per_day.max(1);
        self
    }
}

/// Split a comma-separated provider list, e.g., `"Kiwi, ryanair,,wizz"` -> `[kiwi, ryanair, wizz]`.
pub fn parse_providers(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert_eq!(opts.origin, "RIX");
        assert_eq!(opts.days, 60);
        assert_eq!(opts.providers, vec!["kiwi", "ryanair", "wizz"]);
        assert_eq!(opts.timeout, Duration::from_secs(25));
        assert_eq!(opts.concurrency, 8);
        assert_eq!(opts.max_per_day, 1);
    }

    #[test]
    fn provider_list_is_forgiving() {
        assert_eq!(
            parse_providers(" Kiwi, ryanair,,WIZZ ,"),
            vec!["kiwi", "ryanair", "wizz"]
        );
        assert!(parse_providers(" , ").is_empty());
    }

    #[test]
    fn normalization() {
        let opts = Options {
            origin: " rix".to_string(),
            currency: "usd ".to_string(),
            concurrency: 0,
            max_per_day: 0,
            ..Options::default()
        }
        .normalized();
        assert_eq!(opts.origin, "RIX");
        assert_eq!(opts.currency, "USD");
        assert_eq!(opts.concurrency, 1);
        assert_eq!(opts.max_per_day, 1);
    }
}

use crate::schema::{DateWindow, Fare};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

pub use reqwest::Client as HttpClient;

/// A fare source.
///
/// Providers are split in two parts, in order to segment the code neatly:
///
/// 1. [`Provider`] - everything the provider can observe for an origin over the date window.
/// 2. [`DayQuery`] - the request for one day, and its translation into [`Fare`]s.
///
/// A provider without the configuration it needs (e.g., credentials) returns an empty set,
/// not an error.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Registry identifier, also written to each fare's `provider` column.
    fn name(&self) -> &'static str;

    /// Why the provider yields nothing, when that is known ahead of any request.
    fn capability_gap(&self) -> Option<&'static str> {
        None
    }

    async fn search(&self, origin: &str, window: &DateWindow, currency: &str) -> Result<Vec<Fare>>;
}

/// One request per day; how is the response **extracted** and **normalized**?
#[async_trait]
pub trait DayQuery: Send + Sync {
    async fn search_day(
        &self,
        client: &HttpClient,
        origin: &str,
        day: NaiveDate,
        currency: &str,
    ) -> Result<Vec<Fare>>;
}

/// Bounds applied to a provider's day queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Day queries in flight at once.
    pub concurrency: usize,
    /// Per day query; expiry counts as a failed day.
    pub timeout: Duration,
}

impl QueryLimits {
    /// The run's limits, capped by the provider's own connection ceiling.
    pub fn capped(concurrency: usize, timeout: Duration, ceiling: usize) -> Self {
        Self {
            concurrency: concurrency.min(ceiling).max(1),
            timeout,
        }
    }
}

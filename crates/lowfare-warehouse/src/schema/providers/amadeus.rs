use crate::api::*;
use crate::options::Options;
use crate::schema::common::text;
use crate::schema::{DateWindow, Fare};
use async_trait::async_trait;
use dotenv::var;
use tracing::debug;

/// Amadeus self-service APIs.
///
/// Registered but returns no fares: Flight Offers Search needs an explicit destination, and
/// there is no query shape for "all destinations from an origin". Kept in the registry so the
/// gap stays visible (see [`Provider::capability_gap`]).
pub struct Amadeus {
    credentials: Option<(String, String)>,
}

impl Amadeus {
    pub const NAME: &'static str = "amadeus";

    pub const GAP: &'static str =
        "Flight Offers Search cannot query all destinations from an origin";

    pub fn new(client_id: Option<String>, client_secret: Option<String>) -> Self {
        Self {
            credentials: text(client_id).zip(text(client_secret)),
        }
    }

    /// Reads `AMADEUS_CLIENT_ID` and `AMADEUS_CLIENT_SECRET`.
    pub fn from_options(_options: &Options) -> Self {
        Self::new(var("AMADEUS_CLIENT_ID").ok(), var("AMADEUS_CLIENT_SECRET").ok())
    }
}

#[async_trait]
impl Provider for Amadeus {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn capability_gap(&self) -> Option<&'static str> {
        Some(Self::GAP)
    }

    async fn search(
        &self,
        origin: &str,
        window: &DateWindow,
        _currency: &str,
    ) -> anyhow::Result<Vec<Fare>> {
        if self.credentials.is_none() {
            debug!("amadeus: AMADEUS_CLIENT_ID/AMADEUS_CLIENT_SECRET not set; skipping");
            return Ok(vec![]);
        }
        debug!(
            "amadeus: no fares for {origin} over {} days; {}",
            window.len(),
            Self::GAP
        );
        Ok(vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn returns_nothing_with_or_without_credentials() {
        let window = DateWindow::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 2);
        for amadeus in [
            Amadeus::new(None, None),
            Amadeus::new(Some("id".into()), Some("secret".into())),
        ] {
            assert!(amadeus.search("RIX", &window, "EUR").await.unwrap().is_empty());
            assert_eq!(amadeus.capability_gap(), Some(Amadeus::GAP));
        }
    }
}

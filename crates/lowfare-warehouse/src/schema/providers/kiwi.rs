use crate::api::*;
use crate::fanout;
use crate::options::Options;
use crate::schema::common::{items, price, text};
use crate::schema::{DateWindow, Fare};
use async_trait::async_trait;
use chrono::NaiveDate;
use dotenv::var;
use lowfare_util::{build_client, Util};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap as Map;
use tracing::debug;

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Documentation:
//      - https://tequila.kiwi.com/portal/docs/tequila_api/search_api
//
////////////////////////////////////////////////////////////////////////////////////////////////////

const TEQUILA_URL: &str = "https://api.tequila.kiwi.com/v2/search";
const MAX_CONNECTIONS: usize = 8;

pub struct Kiwi {
    api_key: Option<String>,
    limits: QueryLimits,
}

impl Kiwi {
    pub const NAME: &'static str = "kiwi";

    pub fn new(api_key: Option<String>, options: &Options) -> Self {
        Self {
            api_key: text(api_key),
            limits: QueryLimits::capped(options.concurrency, options.timeout, MAX_CONNECTIONS),
        }
    }

    /// Reads the API key from `TEQUILA_API_KEY`.
    pub fn from_options(options: &Options) -> Self {
        Self::new(var("TEQUILA_API_KEY").ok(), options)
    }
}

// -------------------------------------------------------------------------------------------------

#[async_trait]
impl Provider for Kiwi {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn search(
        &self,
        origin: &str,
        window: &DateWindow,
        currency: &str,
    ) -> anyhow::Result<Vec<Fare>> {
        let Some(api_key) = &self.api_key else {
            debug!("kiwi: TEQUILA_API_KEY not set; skipping");
            return Ok(vec![]);
        };

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(api_key)?);
        let client = build_client(self.limits.timeout, self.limits.concurrency, headers)?;

        Ok(fanout::days(self, &client, origin, window, currency, self.limits).await)
    }
}

// -------------------------------------------------------------------------------------------------

#[async_trait]
impl DayQuery for Kiwi {
    async fn search_day(
        &self,
        client: &HttpClient,
        origin: &str,
        day: NaiveDate,
        currency: &str,
    ) -> anyhow::Result<Vec<Fare>> {
        // Tequila takes dd/mm/YYYY; the same day for both bounds
        let date = day.format("%d/%m/%Y").to_string();
        let params = [
            ("fly_from", origin.to_string()),
            ("date_from", date.clone()),
            ("date_to", date),
            ("curr", currency.to_string()),
            ("limit", "500".to_string()),
            ("sort", "price".to_string()),
        ];
        let search: Search = client.get_json(TEQUILA_URL, &params).await?;
        Ok(transform(search, day, currency))
    }
}

/// One fare per destination: the cheapest of the day.
fn transform(search: Search, day: NaiveDate, currency: &str) -> Vec<Fare> {
    let mut cheapest: Map<String, Fare> = Map::new();

    for (item, raw) in items::<Itinerary>(search.data) {
        // cityTo is a city name, not a code; without flyTo there is no destination
        let Some(destination) = text(item.fly_to) else {
            continue;
        };
        let Some(amount) = price(&item.price) else {
            continue;
        };

        let flight_number = item.route.first().map(|seg| {
            let airline = seg.airline.clone().unwrap_or_default();
            let number = match &seg.flight_no {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => String::new(),
            };
            format!("{airline}{number}")
        });

        let fare = Fare::new(day, &destination, Kiwi::NAME, Some(amount), currency)
            .with_flight_number(flight_number)
            .with_booking_url(item.deep_link)
            .with_raw(raw);

        match cheapest.get(&fare.destination) {
            Some(existing) if existing.amount() <= amount => {}
            _ => {
                cheapest.insert(fare.destination.clone(), fare);
            }
        }
    }

    cheapest.into_values().collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
////////////////////////////////////////////////////////////////////////////////////////////////////

// {
//   "data": [
//     {
//       "flyFrom": "RIX",
//       "flyTo": "STN",
//       "cityTo": "London",
//       "price": 39,
//       "deep_link": "https://www.kiwi.com/deep?...",
//       "route": [
//         { "airline": "FR", "flight_no": 2961, ... }
//       ],
//       ...
//     },
//     ...
//   ]
// }
#[derive(Deserialize, Debug)]
struct Search {
    #[serde(default)]
    data: Vec<Value>,
}

#[derive(Deserialize, Debug)]
struct Itinerary {
    #[serde(rename = "flyTo")]
    fly_to: Option<String>,
    #[serde(default)]
    price: Value,
    #[serde(default)]
    route: Vec<Segment>,
    deep_link: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Segment {
    airline: Option<String>,
    #[serde(default)]
    flight_no: Value,
}

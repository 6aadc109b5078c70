use crate::api::*;
use crate::fanout;
use crate::options::Options;
use crate::schema::common::{items, price, text};
use crate::schema::{DateWindow, Fare};
use async_trait::async_trait;
use chrono::NaiveDate;
use lowfare_util::{build_client, Util};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use serde_json::Value;

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Unofficial fare finder endpoint; subject to change.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

const ONE_WAY_FARES_URL: &str = "https://www.ryanair.com/api/farfnd/3/oneWayFares";
const MAX_CONNECTIONS: usize = 6;

pub struct Ryanair {
    url: String,
    limits: QueryLimits,
}

impl Ryanair {
    pub const NAME: &'static str = "ryanair";

    pub fn from_options(options: &Options) -> Self {
        Self {
            url: ONE_WAY_FARES_URL.to_string(),
            limits: QueryLimits::capped(options.concurrency, options.timeout, MAX_CONNECTIONS),
        }
    }

    /// Query another host, e.g., a mirror or a local stand-in.
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }
}

// -------------------------------------------------------------------------------------------------

#[async_trait]
impl Provider for Ryanair {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn search(
        &self,
        origin: &str,
        window: &DateWindow,
        currency: &str,
    ) -> anyhow::Result<Vec<Fare>> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = build_client(self.limits.timeout, self.limits.concurrency, headers)?;

        Ok(fanout::days(self, &client, origin, window, currency, self.limits).await)
    }
}

// -------------------------------------------------------------------------------------------------

#[async_trait]
impl DayQuery for Ryanair {
    async fn search_day(
        &self,
        client: &HttpClient,
        origin: &str,
        day: NaiveDate,
        currency: &str,
    ) -> anyhow::Result<Vec<Fare>> {
        let params = [
            ("departureAirportIataCode", origin.to_string()),
            ("dateOut", day.to_string()),
            ("currency", currency.to_string()),
            ("market", "en-us".to_string()),
        ];
        let data: OneWayFares = client.get_json(&self.url, &params).await?;
        Ok(transform(data, day, currency))
    }
}

/// Every priced outbound leg; no filtering beyond that.
fn transform(data: OneWayFares, day: NaiveDate, currency: &str) -> Vec<Fare> {
    items::<Item>(data.fares)
        .filter_map(|(item, raw)| {
            let outbound = item.outbound?;
            let destination = text(outbound.arrival_airport.and_then(|a| a.iata_code))?;
            let price_info = outbound.price?;
            if price_info.value.is_null() {
                return None;
            }
            let currency = text(price_info.currency_code).unwrap_or_else(|| currency.to_string());

            let amount = price(&price_info.value);
            let fare = Fare::new(day, &destination, Ryanair::NAME, amount, &currency)
                .with_flight_number(outbound.flight_number)
                .with_raw(raw);
            Some(fare)
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
////////////////////////////////////////////////////////////////////////////////////////////////////

// {
//   "fares": [
//     {
//       "outbound": {
//         "departureAirport": { "iataCode": "RIX", ... },
//         "arrivalAirport": { "iataCode": "STN", "name": "London Stansted", ... },
//         "departureDate": "2025-03-14T06:25:00",
//         "price": { "value": 19.99, "currencyCode": "EUR", ... },
//         "flightNumber": "FR2961"
//       },
//       ...
//     },
//     ...
//   ]
// }
#[derive(Deserialize, Debug)]
struct OneWayFares {
    #[serde(default)]
    fares: Vec<Value>,
}

#[derive(Deserialize, Debug)]
struct Item {
    outbound: Option<Outbound>,
}

#[derive(Deserialize, Debug)]
struct Outbound {
    #[serde(rename = "arrivalAirport")]
    arrival_airport: Option<Airport>,
    price: Option<PriceInfo>,
    #[serde(rename = "flightNumber")]
    flight_number: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Airport {
    #[serde(rename = "iataCode")]
    iata_code: Option<String>,
}

#[derive(Deserialize, Debug)]
struct PriceInfo {
    #[serde(default)]
    value: Value,
    #[serde(rename = "currencyCode")]
    currency_code: Option<String>,
}

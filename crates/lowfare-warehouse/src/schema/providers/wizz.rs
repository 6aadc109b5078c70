use crate::api::*;
use crate::fanout;
use crate::options::Options;
use crate::schema::common::{items, price, text};
use crate::schema::{DateWindow, Fare};
use async_trait::async_trait;
use chrono::NaiveDate;
use lowfare_util::{build_client, Util};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde_json::Value;

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Unofficial "cheap flights from origin" endpoint; may change with each site release.
//
// The endpoint is not day-parametrized, so each day's query filters the offers client-side.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

const CHEAP_FLIGHTS_URL: &str = "https://be.wizzair.com/16.1.0/Api/search/cheapFlights";
const MAX_CONNECTIONS: usize = 4;

pub struct Wizz {
    limits: QueryLimits,
}

impl Wizz {
    pub const NAME: &'static str = "wizz";

    pub fn from_options(options: &Options) -> Self {
        Self {
            limits: QueryLimits::capped(options.concurrency, options.timeout, MAX_CONNECTIONS),
        }
    }
}

// -------------------------------------------------------------------------------------------------

#[async_trait]
impl Provider for Wizz {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn search(
        &self,
        origin: &str,
        window: &DateWindow,
        currency: &str,
    ) -> anyhow::Result<Vec<Fare>> {
        let client = build_client(
            self.limits.timeout,
            self.limits.concurrency,
            HeaderMap::new(),
        )?;
        Ok(fanout::days(self, &client, origin, window, currency, self.limits).await)
    }
}

// -------------------------------------------------------------------------------------------------

#[async_trait]
impl DayQuery for Wizz {
    async fn search_day(
        &self,
        client: &HttpClient,
        origin: &str,
        day: NaiveDate,
        currency: &str,
    ) -> anyhow::Result<Vec<Fare>> {
        let params = [
            ("departureIata", origin),
            ("priceType", "regular"),
            ("currencyCode", currency),
        ];
        let data: CheapFlights = client.get_json(CHEAP_FLIGHTS_URL, &params).await?;
        Ok(transform(data, origin, day, currency))
    }
}

/// Offers departing `origin` on `day`, one fare per offer.
fn transform(data: CheapFlights, origin: &str, day: NaiveDate, currency: &str) -> Vec<Fare> {
    let day_iso = day.to_string();
    let mut fares = Vec::new();

    for (route, _) in items::<Route>(data.cheap_flight_list) {
        if !route
            .departure_station
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case(origin))
        {
            continue;
        }
        let Some(destination) = text(route.arrival_station) else {
            continue;
        };

        for (offer, raw) in items::<Offer>(route.prices) {
            // dates may carry a time part, e.g., "2025-03-14T00:00:00"
            if !offer.date.as_deref().is_some_and(|d| d.starts_with(&day_iso)) {
                continue;
            }
            if offer.price.is_null() {
                continue;
            }
            fares.push(
                Fare::new(day, &destination, Wizz::NAME, price(&offer.price), currency)
                    .with_raw(raw),
            );
        }
    }

    fares
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
////////////////////////////////////////////////////////////////////////////////////////////////////

// {
//   "cheapFlightList": [
//     {
//       "departureStation": "RIX",
//       "arrivalStation": "BGY",
//       "prices": [
//         { "date": "2025-03-14", "price": 24.99 },
//         ...
//       ]
//     },
//     ...
//   ]
// }
#[derive(Deserialize, Debug)]
struct CheapFlights {
    #[serde(rename = "cheapFlightList", default)]
    cheap_flight_list: Vec<Value>,
}

#[derive(Deserialize, Debug)]
struct Route {
    #[serde(rename = "departureStation")]
    departure_station: Option<String>,
    #[serde(rename = "arrivalStation")]
    arrival_station: Option<String>,
    #[serde(default)]
    prices: Vec<Value>,
}

#[derive(Deserialize, Debug)]
struct Offer {
    date: Option<String>,
    #[serde(default)]
    price: Value,
}

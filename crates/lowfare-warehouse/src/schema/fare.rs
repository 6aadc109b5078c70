use chrono::NaiveDate;
use lowfare_util::{Cell, Tabular};
use serde::Serialize;
use serde_json::Value;

/// One priced, dated, one-way fare from the origin to a single destination, as seen by one
/// provider.
///
/// ```text
/// date,destination,provider,price,currency,flightNumber,bookingURL
/// 2025-01-01,LHR,ryanair,40.0,EUR,FR2961,
/// ```
///
/// Only `date`, `destination` and `price` take part in grouping and ordering; the rest are
/// carried along for the report. `raw` keeps the provider's own record for diagnostics and is
/// never written out.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Fare {
    pub date: Option<NaiveDate>,
    pub destination: String,
    pub provider: String,
    pub price: Option<f64>,
    pub currency: String,
    #[serde(rename = "flightNumber")]
    pub flight_number: Option<String>,
    #[serde(rename = "bookingURL")]
    pub booking_url: Option<String>,
    #[serde(skip)]
    pub raw: Option<Value>,
}

impl Fare {
    pub fn new(
        date: NaiveDate,
        destination: &str,
        provider: &str,
        price: Option<f64>,
        currency: &str,
    ) -> Self {
        Self {
            date: Some(date),
            destination: destination.trim().to_uppercase(),
            provider: provider.to_string(),
            price,
            currency: currency.trim().to_uppercase(),
            flight_number: None,
            booking_url: None,
            raw: None,
        }
    }

    pub fn with_flight_number(mut self, flight_number: Option<String>) -> Self {
        self.flight_number = flight_number.filter(|f| !f.trim().is_empty());
        self
    }

    pub fn with_booking_url(mut self, booking_url: Option<String>) -> Self {
        self.booking_url = booking_url.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// A fare is reportable when it has a date, a destination, and a finite, non-negative price.
    pub fn is_valid(&self) -> bool {
        self.date.is_some()
            && !self.destination.trim().is_empty()
            && self.price.is_some_and(|p| p.is_finite() && p >= 0.0)
    }

    /// Sort key for the price; only meaningful on valid fares.
    pub(crate) fn amount(&self) -> f64 {
        self.price.unwrap_or(f64::INFINITY)
    }
}

impl Tabular for Fare {
    fn header() -> &'static [&'static str] {
        &[
            "date",
            "destination",
            "provider",
            "price",
            "currency",
            "flightNumber",
            "bookingURL",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        let text = |s: &Option<String>| s.clone().map_or(Cell::Empty, Cell::Text);
        vec![
            self.date
                .map_or(Cell::Empty, |d| Cell::Text(d.format("%Y-%m-%d").to_string())),
            Cell::Text(self.destination.clone()),
            Cell::Text(self.provider.clone()),
            self.price.map_or(Cell::Empty, Cell::Number),
            Cell::Text(self.currency.clone()),
            text(&self.flight_number),
            text(&self.booking_url),
        ]
    }
}

use chrono::{Local, NaiveDate};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::dates;
use crate::error::{FetchError, FetchResult};

/// Latest traded price of a ticker. Price and currency always travel together.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub ticker: String,
    pub price: f64,
    pub currency: String,
}

/// Inclusive-start date window for history lookups
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> FetchResult<Self> {
        if start > end {
            return Err(FetchError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Fill in missing bounds with 1900-01-01 and today.
    pub fn with_defaults(start: Option<NaiveDate>, end: Option<NaiveDate>) -> FetchResult<Self> {
        Self::new(
            start.unwrap_or_else(dates::earliest),
            end.unwrap_or_else(|| Local::now().date_naive()),
        )
    }
}

/// Optional `YYYY-MM-DD` field where a blank string counts as not given.
pub fn deserialize_optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(date) => date
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Daily closing prices for one ticker, oldest first
#[derive(Clone, Debug, PartialEq)]
pub struct PriceHistory {
    pub ticker: String,
    pub points: Vec<PricePoint>,
}

impl PriceHistory {
    pub fn new(ticker: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            ticker: ticker.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Rows of `{"Date": ..., "<TICKER>": close}`, the close column named after the ticker.
impl Serialize for PriceHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Row<'a> {
            ticker: &'a str,
            point: &'a PricePoint,
        }

        impl Serialize for Row<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("Date", &self.point.date)?;
                map.serialize_entry(self.ticker, &self.point.close)?;
                map.end()
            }
        }

        let mut seq = serializer.serialize_seq(Some(self.points.len()))?;
        for point in &self.points {
            seq.serialize_element(&Row {
                ticker: &self.ticker,
                point,
            })?;
        }
        seq.end()
    }
}

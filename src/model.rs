use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A cached price from the v2 endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub origin: String,
    pub destination: String,
    pub value: f64,
    #[serde(with = "date")]
    pub depart_date: NaiveDate,
    #[serde(default, with = "optional_date")]
    pub return_date: Option<NaiveDate>,
    #[serde(with = "timestamp")]
    pub found_at: NaiveDateTime,
    #[serde(default)]
    pub distance: u32,
    #[serde(default)]
    pub trip_class: u32,
    #[serde(default)]
    pub number_of_changes: u32,
    #[serde(default)]
    pub show_to_affiliates: bool,
    #[serde(default)]
    pub actual: bool,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub gate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NearestPlacesMatrix {
    #[serde(default)]
    pub prices: Vec<Ticket>,
    #[serde(default)]
    pub origins: Vec<String>,
    #[serde(default)]
    pub destinations: Vec<String>,
    #[serde(default)]
    pub errors: serde_json::Value,
}

/// A ticket from the legacy v1 `cheap` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheapTicket {
    pub price: f64,
    pub airline: String,
    pub flight_number: u32,
    #[serde(with = "timestamp")]
    pub departure_at: NaiveDateTime,
    #[serde(default, with = "optional_timestamp")]
    pub return_at: Option<NaiveDateTime>,
    #[serde(with = "timestamp")]
    pub expires_at: NaiveDateTime,
}

/// Destination code, then the API's numeric index (kept as the string key it
/// arrives as), then the ticket.
pub type CheapPrices = BTreeMap<String, BTreeMap<String, CheapTicket>>;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("invalid timestamp \"{s}\""))
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| parse_timestamp(s).map(|ts| ts.date()))
        .map_err(|_| format!("invalid date \"{s}\""))
}

mod date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&value.format(super::DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => super::date::serialize(date, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.is_empty() => super::parse_date(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&value.format("%Y-%m-%dT%H:%M:%S"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

mod optional_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => super::timestamp::serialize(ts, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.is_empty() => super::parse_timestamp(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

//! JSON wire codec
//!
//! Encoding is plain `serde_json` with one extension: dates and date-times
//! travel as `YYYY-MM-DDTHH:MM:SS` strings (second precision, no offset), and
//! a bare date is promoted to midnight. Decoding is plain JSON; dates come
//! back as strings and are never parsed into date types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::Result;

/// strftime pattern for dates on the wire
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Encode a value as JSON text
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Decode JSON text into a generic wire value
pub fn decode(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Convert any serializable value into a wire value
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Decode an already-parsed wire value into a typed structure
pub fn decode_as<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Render a naive date-time in the wire format
pub fn format_wire_date(value: &NaiveDateTime) -> String {
    value.format(WIRE_DATE_FORMAT).to_string()
}

/// A date or date-time that serializes in the wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Timestamp {
    /// Dates are promoted to midnight
    pub fn to_naive(&self) -> NaiveDateTime {
        match self {
            Timestamp::Date(date) => date.and_time(NaiveTime::default()),
            Timestamp::DateTime(datetime) => *datetime,
        }
    }

    pub fn to_wire_string(&self) -> String {
        format_wire_date(&self.to_naive())
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Timestamp::Date(date)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(datetime: NaiveDateTime) -> Self {
        Timestamp::DateTime(datetime)
    }
}

/// Zoned date-times keep their local wall-clock time and drop the offset
impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(datetime: DateTime<Tz>) -> Self {
        Timestamp::DateTime(datetime.naive_local())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.to_naive().format(WIRE_DATE_FORMAT))
    }
}

impl From<Timestamp> for Value {
    fn from(timestamp: Timestamp) -> Self {
        Value::String(timestamp.to_wire_string())
    }
}

/// Serde helpers for `NaiveDate` fields: `#[serde(with = "searchwire_core::codec::date")]`
pub mod date {
    use super::*;
    use serde::{Deserialize, Deserializer};

    pub fn serialize<S: Serializer>(
        value: &NaiveDate,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        Timestamp::Date(*value).serialize(serializer)
    }

    /// Accepts both the wire format and a bare `YYYY-MM-DD`
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, WIRE_DATE_FORMAT)
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(&raw, "%Y-%m-%d"))
            .map_err(serde::de::Error::custom)
    }
}

/// Serde helpers for `NaiveDateTime` fields: `#[serde(with = "searchwire_core::codec::datetime")]`
pub mod datetime {
    use super::*;
    use serde::{Deserialize, Deserializer};

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        Timestamp::DateTime(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, WIRE_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

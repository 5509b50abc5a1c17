//! Types that mirror the reading service's JSON schema.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::FetchError;

/// A date field as the service sends it: ISO-8601 text or epoch milliseconds.
/// Any other JSON shape is kept as `Unrecognized`: present, but an unknown time.
#[derive(Debug, Clone, PartialEq)]
pub enum DateLike {
    Millis(i64),
    Text(String),
    Unrecognized,
}

impl<'de> Deserialize<'de> for DateLike {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(ms), _) => DateLike::Millis(ms),
                // Fractional millis round to the nearest whole one; `as` saturates
                (None, Some(f)) if f.is_finite() => DateLike::Millis(f.round() as i64),
                _ => DateLike::Unrecognized,
            },
            Value::String(s) => DateLike::Text(s),
            _ => DateLike::Unrecognized,
        })
    }
}

impl DateLike {
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            DateLike::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            DateLike::Unrecognized => None,
            DateLike::Text(s) => {
                let s = s.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    return Some(dt.with_timezone(&Utc));
                }
                // Offset-less ISO strings are taken as UTC
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
                    .ok()
                    .map(|n| n.and_utc())
            }
        }
    }
}

/// Which of the three date fields supplied a reading's event time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Timestamp,
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireReading")]
pub struct Reading {
    pub id: String,
    pub sensor_id: String,
    pub location: String,
    /// NaN when the service sent null or something that is not a number.
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: Option<f64>,
    pub timestamp: Option<DateLike>,
    pub created_at: Option<DateLike>,
    pub updated_at: Option<DateLike>,
}

/// One element exactly as it arrives. Documents may carry `id`, `_id` or both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReading {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "lenient_id")]
    object_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    sensor_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    location: String,
    #[serde(default, deserialize_with = "lenient_number")]
    temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pressure: Option<f64>,
    #[serde(default)]
    timestamp: Option<DateLike>,
    #[serde(default)]
    created_at: Option<DateLike>,
    #[serde(default)]
    updated_at: Option<DateLike>,
}

impl TryFrom<WireReading> for Reading {
    type Error = String;

    fn try_from(w: WireReading) -> Result<Self, Self::Error> {
        let id = w
            .id
            .or(w.object_id)
            .ok_or_else(|| "reading has neither `id` nor `_id`".to_string())?;
        Ok(Reading {
            id,
            sensor_id: w.sensor_id,
            location: w.location,
            temperature: w.temperature.unwrap_or(f64::NAN),
            humidity: w.humidity.unwrap_or(f64::NAN),
            pressure: w.pressure,
            timestamp: w.timestamp,
            created_at: w.created_at,
            updated_at: w.updated_at,
        })
    }
}

impl Reading {
    /// First present of timestamp, createdAt, updatedAt.
    pub fn event_time_source(&self) -> Option<(TimeField, &DateLike)> {
        self.timestamp
            .as_ref()
            .map(|d| (TimeField::Timestamp, d))
            .or_else(|| self.created_at.as_ref().map(|d| (TimeField::CreatedAt, d)))
            .or_else(|| self.updated_at.as_ref().map(|d| (TimeField::UpdatedAt, d)))
    }

    /// `None` means "unknown time". A present field that fails to parse does not fall through.
    pub fn effective_time(&self) -> Option<DateTime<Utc>> {
        self.event_time_source().and_then(|(_, d)| d.to_utc())
    }
}

/// Decode a response body into a window. Anything other than a JSON array is rejected.
///
/// Elements are decoded one at a time; an element that is not a usable reading
/// is logged and dropped so the rest of the window still renders.
pub fn parse_window(body: &str) -> Result<Vec<Reading>, FetchError> {
    let elements = match serde_json::from_str::<Value>(body)? {
        Value::Array(elements) => elements,
        other => {
            let kind = match other {
                Value::Null => "null",
                Value::Bool(_) => "a boolean",
                Value::Number(_) => "a number",
                Value::String(_) => "a string",
                _ => "an object",
            };
            return Err(FetchError::Decode(format!(
                "expected an array of readings, got {kind}"
            )));
        }
    };
    let total = elements.len();
    let window: Vec<Reading> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(i, el)| match serde_json::from_value::<Reading>(el) {
            Ok(r) => Some(r),
            Err(e) => {
                warn!(index = i, error = %e, "skipping undecodable reading");
                None
            }
        })
        .collect();
    if window.len() < total {
        warn!(kept = window.len(), total, "window had undecodable readings");
    }
    Ok(window)
}

/// The three measured quantities, with their fixed gauge display ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    Humidity,
    Pressure,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Humidity, Metric::Pressure];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::Pressure => "Pressure",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
            Metric::Pressure => "hPa",
        }
    }

    /// (min, max) of the dial.
    pub fn display_range(self) -> (f64, f64) {
        match self {
            Metric::Temperature => (0.0, 50.0),
            Metric::Humidity => (0.0, 100.0),
            Metric::Pressure => (900.0, 1100.0),
        }
    }

    pub fn value(self, r: &Reading) -> Option<f64> {
        match self {
            Metric::Temperature => Some(r.temperature),
            Metric::Humidity => Some(r.humidity),
            Metric::Pressure => r.pressure,
        }
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        // Extended-JSON ObjectId: {"$oid": "..."}
        Value::Object(m) => m.get("$oid").and_then(Value::as_str).map(str::to_string),
        _ => None,
    })
}

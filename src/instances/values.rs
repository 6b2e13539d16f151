//! Property values of sampled instances
//!
//! Temporal values are kept typed until [`PropertyValue::canonicalize`] turns
//! them into ISO-8601 strings: `YYYY-MM-DD` for dates and
//! `YYYY-MM-DDTHH:MM:SS` for date-times (sub-second precision is dropped).
//!
//! The Neo4j HTTP API sends temporal properties as ISO strings such as
//! `2023-01-05T09:00:00.123000000+01:00` or
//! `2023-01-05T09:00Z[Europe/London]`. Those are decoded to local wall-clock
//! values, so the zone and the fraction never reach the canonical form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub type PropertyMap = BTreeMap<String, PropertyValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    List(Vec<PropertyValue>),
}

pub fn date_to_string(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn datetime_to_string(datetime: &NaiveDateTime) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
}

impl PropertyValue {
    /// Replace dates and date-times (also inside lists) with their ISO strings.
    pub fn canonicalize(self) -> PropertyValue {
        match self {
            PropertyValue::Date(d) => PropertyValue::String(date_to_string(&d)),
            PropertyValue::DateTime(dt) => PropertyValue::String(datetime_to_string(&dt)),
            PropertyValue::List(items) => {
                PropertyValue::List(items.into_iter().map(PropertyValue::canonicalize).collect())
            }
            other => other,
        }
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, PropertyValue::Date(_) | PropertyValue::DateTime(_))
    }

    /// Convert a JSON value from the graph source.
    ///
    /// ISO date and date-time strings, and objects shaped `{year, month, day}`
    /// or `{year, month, day, hour, minute, second}`, become dates and
    /// date-times. Any other object is kept as its JSON text, since graph
    /// properties cannot be maps.
    pub fn from_json(value: serde_json::Value) -> PropertyValue {
        use serde_json::Value;

        match value {
            Value::Null => PropertyValue::Null,
            Value::Bool(b) => PropertyValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => PropertyValue::Integer(i),
                None => PropertyValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => temporal_from_iso(&s).unwrap_or(PropertyValue::String(s)),
            Value::Array(items) => {
                PropertyValue::List(items.into_iter().map(PropertyValue::from_json).collect())
            }
            Value::Object(map) => temporal_from_fields(&map)
                .unwrap_or_else(|| PropertyValue::String(Value::Object(map).to_string())),
        }
    }
}

fn temporal_from_fields(map: &serde_json::Map<String, serde_json::Value>) -> Option<PropertyValue> {
    let field = |name: &str| map.get(name).and_then(|v| v.as_i64());

    let date = NaiveDate::from_ymd_opt(
        i32::try_from(field("year")?).ok()?,
        u32::try_from(field("month")?).ok()?,
        u32::try_from(field("day")?).ok()?,
    )?;

    match (field("hour"), field("minute"), field("second")) {
        (None, None, None) if map.len() == 3 => Some(PropertyValue::Date(date)),
        (Some(h), Some(m), Some(s)) => {
            let time = NaiveTime::from_hms_opt(
                u32::try_from(h).ok()?,
                u32::try_from(m).ok()?,
                u32::try_from(s).ok()?,
            )?;
            Some(PropertyValue::DateTime(date.and_time(time)))
        }
        _ => None,
    }
}

fn temporal_from_iso(raw: &str) -> Option<PropertyValue> {
    let bytes = raw.as_bytes();
    let looks_like_date = bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[7] == b'-';
    if !looks_like_date {
        return None;
    }

    // Named zones are appended as `[Region/City]` after the offset
    let text = match raw.find('[') {
        Some(idx) if raw.ends_with(']') => &raw[..idx],
        _ => raw,
    };

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(PropertyValue::Date(date));
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(PropertyValue::DateTime(datetime.naive_local()));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(PropertyValue::DateTime(datetime));
        }
    }

    // Seconds are omitted when zero, e.g. `2023-01-05T09:00Z`
    let offset_text = match text.strip_suffix('Z') {
        Some(head) => format!("{}+00:00", head),
        None => text.to_string(),
    };
    DateTime::parse_from_str(&offset_text, "%Y-%m-%dT%H:%M%:z")
        .ok()
        .map(|datetime| PropertyValue::DateTime(datetime.naive_local()))
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => f.write_str("null"),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(x) => write!(f, "{}", x),
            PropertyValue::String(s) => f.write_str(s),
            PropertyValue::Date(d) => f.write_str(&date_to_string(d)),
            PropertyValue::DateTime(dt) => f.write_str(&datetime_to_string(dt)),
            PropertyValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Temporal values always serialize in canonical form.
impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Null => serializer.serialize_unit(),
            PropertyValue::Bool(b) => serializer.serialize_bool(*b),
            PropertyValue::Integer(i) => serializer.serialize_i64(*i),
            PropertyValue::Float(x) => serializer.serialize_f64(*x),
            PropertyValue::String(s) => serializer.serialize_str(s),
            PropertyValue::Date(d) => serializer.serialize_str(&date_to_string(d)),
            PropertyValue::DateTime(dt) => serializer.serialize_str(&datetime_to_string(dt)),
            PropertyValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Convert a JSON object of properties; non-objects yield an empty map.
pub fn property_map_from_json(value: serde_json::Value) -> PropertyMap {
    match value {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| (k, PropertyValue::from_json(v)))
            .collect(),
        _ => PropertyMap::new(),
    }
}

/// One sampled node
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NodeInstance {
    pub label: String,
    pub properties: PropertyMap,
    /// Property names of the requested type for this label, once annotated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_properties: Option<Vec<String>>,
}

impl NodeInstance {
    pub fn new(label: impl Into<String>, properties: PropertyMap) -> Self {
        NodeInstance {
            label: label.into(),
            properties,
            selected_properties: None,
        }
    }
}

/// One sampled relationship, before endpoint labels are attached
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RelationshipInstance {
    pub source: PropertyMap,
    pub rel_type: String,
    pub target: PropertyMap,
}

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One captured sensor sample from a workout.
///
/// Every field is optional: devices drop readings, and partial samples are
/// common in exported sessions. A JSON value of the wrong type is decoded as
/// absent rather than failing the whole session.
///
/// An event decoded from JSON keeps the element it came from and serializes
/// back to exactly that element, so aggregate payloads forward what the
/// device recorded. Events built in code serialize their present fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryEvent {
  /// Beats per minute; finite and non-negative when present
  pub heart_rate: Option<f64>,

  /// Epoch milliseconds
  pub start_time: Option<i64>,

  /// Raw distance in the device's unit. Zero or negative readings are kept
  /// as-is here; consumers only trust strictly positive values.
  pub distance: Option<f64>,

  /// The source element, verbatim
  pub raw: Option<Value>,
}

impl TelemetryEvent {
  /// Decode a single array element. Fields missing from a non-object element are all absent.
  pub fn from_value(value: Value) -> Self {
    Self {
      heart_rate: heart_rate_field(value.get("heart_rate")),
      start_time: timestamp_field(value.get("start_time")),
      distance: number_field(value.get("distance")),
      raw: Some(value),
    }
  }

  /// Distance, only when it is a usable (strictly positive) reading
  pub fn positive_distance(&self) -> Option<f64> {
    self.distance.filter(|d| *d > 0.0)
  }
}

impl<'de> Deserialize<'de> for TelemetryEvent {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    Value::deserialize(deserializer).map(Self::from_value)
  }
}

impl Serialize for TelemetryEvent {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    if let Some(raw) = &self.raw {
      return raw.serialize(serializer);
    }

    let mut map = serializer.serialize_map(None)?;
    if let Some(heart_rate) = self.heart_rate {
      map.serialize_entry("heart_rate", &heart_rate)?;
    }
    if let Some(start_time) = self.start_time {
      map.serialize_entry("start_time", &start_time)?;
    }
    if let Some(distance) = self.distance {
      map.serialize_entry("distance", &distance)?;
    }
    map.end()
  }
}

/// One workout: events in the order the source delivered them (not time-sorted)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
  pub events: Vec<TelemetryEvent>,
}

impl Session {
  pub fn new(events: Vec<TelemetryEvent>) -> Self {
    Self { events }
  }

  /// Build a session from a decoded JSON document.
  /// Returns `None` when the document is not an array.
  pub fn from_json(document: Value) -> Option<Self> {
    match document {
      Value::Array(items) => Some(Self::new(
        items.into_iter().map(TelemetryEvent::from_value).collect(),
      )),
      _ => None,
    }
  }

  pub fn len(&self) -> usize {
    self.events.len()
  }

  pub fn is_empty(&self) -> bool {
    self.events.is_empty()
  }
}

/// ---------------------------------------------------------------------------
/// Lenient field decoding
/// ---------------------------------------------------------------------------

fn number_field(value: Option<&Value>) -> Option<f64> {
  value.and_then(Value::as_f64).filter(|n| n.is_finite())
}

fn heart_rate_field(value: Option<&Value>) -> Option<f64> {
  number_field(value).filter(|hr| *hr >= 0.0)
}

fn timestamp_field(value: Option<&Value>) -> Option<i64> {
  value.and_then(|v| {
    v.as_i64().or_else(|| {
      v.as_f64()
        .filter(|n| n.is_finite() && n.abs() < i64::MAX as f64)
        .map(|n| n.trunc() as i64)
    })
  })
}

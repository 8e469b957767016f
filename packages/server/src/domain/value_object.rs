//! Value objects.

use std::fmt;

use rand::{Rng, distributions::Alphanumeric};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ValueObjectError;

/// Length of generated room identifiers
pub const ROOM_ID_LENGTH: usize = 8;

/// Upper bound on client supplied room identifiers
pub const ROOM_ID_MAX_LENGTH: usize = 128;

/// Room identifier
///
/// Opaque to the relay. Generated ids are [`ROOM_ID_LENGTH`] characters from
/// `[A-Za-z0-9]`, but any non-empty string up to [`ROOM_ID_MAX_LENGTH`] bytes is
/// accepted as a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        if value.len() > ROOM_ID_MAX_LENGTH {
            return Err(ValueObjectError::RoomIdTooLong(ROOM_ID_MAX_LENGTH));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates fresh room identifiers.
///
/// The generator is passed in so that callers own the seeding policy; the
/// registry seeds one generator at construction and reuses it.
pub struct RoomIdFactory;

impl RoomIdFactory {
    pub fn generate<R: Rng>(rng: &mut R) -> RoomId {
        let value: String = (0..ROOM_ID_LENGTH)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();
        RoomId(value)
    }
}

/// Unix timestamp in milliseconds (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn now() -> Self {
        Self(huddle_shared::time::get_utc_timestamp())
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// A relayed frame: a JSON object with arbitrary values.
///
/// The relay forwards payloads verbatim and never inspects their keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse a text frame. Anything other than a JSON object is rejected.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The presence notification sent to the remaining members of a room
    /// after someone leaves: `{"join": true}`.
    pub fn presence() -> Self {
        let mut fields = Map::new();
        fields.insert("join".to_string(), Value::Bool(true));
        Self(fields)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

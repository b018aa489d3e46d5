use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

/// Custom deserializer for an optional Duration from milliseconds
pub fn deserialize_optional_duration_from_ms<'de, D>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let ms = Option::<u64>::deserialize(deserializer)?;
    Ok(ms.map(Duration::from_millis))
}

/// Custom serializer for an optional Duration to milliseconds
pub fn serialize_optional_duration_to_ms<S>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match duration {
        Some(duration) => serializer.serialize_some(&(duration.as_millis() as u64)),
        None => serializer.serialize_none(),
    }
}

//! Field readers for records written by older store generations, where the
//! same attribute may hold a number, a numeric string, or something else
//! entirely. A value that cannot be interpreted reads as absent instead of
//! failing the whole record.

use mongodb::bson::Bson;
use serde::{Deserialize, Deserializer};

use super::role::Role;

fn as_number(value: Bson) -> Option<f64> {
    match value {
        Bson::Double(n) => Some(n),
        Bson::Int32(n) => Some(n as f64),
        Bson::Int64(n) => Some(n as f64),
        Bson::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn optional_number<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Bson>::deserialize(d)?.and_then(as_number))
}

pub fn number<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_number(d)?.unwrap_or_default())
}

pub fn integer<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_number(d)?.map(|n| n as i64).unwrap_or_default())
}

/// Non-empty strings only.
pub fn optional_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Bson>::deserialize(d)? {
        Some(Bson::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

pub fn optional_role<'de, D>(d: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Bson>::deserialize(d)? {
        Some(Bson::String(s)) => s.parse().ok(),
        _ => None,
    })
}

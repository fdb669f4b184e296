//! Wire-format transport objects and their conversion into domain entities.
//!
//! Decoding happens in two steps: `serde_json` turns bytes into DTOs (shape
//! errors surface as `AppError::Decode`), then `IntoDomain` validates field
//! contents (bad dates, unknown enum values) and surfaces `MappingError`.
//! Collections are all-or-nothing: one bad element fails the whole payload.

pub mod game;
pub mod leaders;
pub mod player;
pub mod team;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::AppError;

pub use game::{BoxScoreDto, GameDto, QuarterScoreDto, TeamStatsDto};
pub use leaders::{LeaderEntry, LeaderEntryDto};
pub use player::{PlayerDto, StatisticDto};
pub use team::TeamDto;

/// Field-level validation failure while converting a DTO into a domain entity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("invalid date in field '{field}': {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("unrecognized game status: {0}")]
    InvalidStatus(String),

    #[error("unrecognized statistic category: {0}")]
    InvalidCategory(String),

    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
}

/// Conversion from a transport object into a validated domain entity
pub trait IntoDomain {
    type Domain;

    fn into_domain(self) -> Result<Self::Domain, MappingError>;
}

impl<T: IntoDomain> IntoDomain for Vec<T> {
    type Domain = Vec<T::Domain>;

    fn into_domain(self) -> Result<Self::Domain, MappingError> {
        self.into_iter().map(IntoDomain::into_domain).collect()
    }
}

/// Decodes a JSON array of `D` and maps every element, failing on the first bad one
pub fn decode_collection<D>(bytes: &[u8]) -> Result<Vec<D::Domain>, AppError>
where
    D: DeserializeOwned + IntoDomain,
{
    let dtos: Vec<D> = serde_json::from_slice(bytes)?;
    Ok(dtos.into_domain()?)
}

/// Decodes a single JSON object of `D` and maps it
pub fn decode_one<D>(bytes: &[u8]) -> Result<D::Domain, AppError>
where
    D: DeserializeOwned + IntoDomain,
{
    let dto: D = serde_json::from_slice(bytes)?;
    Ok(dto.into_domain()?)
}

/// Parses an ISO-8601 instant with or without fractional seconds
pub(crate) fn parse_instant(field: &'static str, value: &str) -> Result<DateTime<Utc>, MappingError> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| MappingError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

pub(crate) fn require_id(id: &str) -> Result<(), MappingError> {
    if id.trim().is_empty() {
        Err(MappingError::MissingRequiredField("id"))
    } else {
        Ok(())
    }
}

use chrono::NaiveDate;
use thiserror::Error;

use crate::entities::tour_date::RepeatPattern;

#[derive(Debug, Error, PartialEq)]
pub enum RepeatConfigError {
    #[error("A repeat pattern is required when repeat is enabled")]
    MissingPattern,
    #[error("Repeat-until date must be on or after the starting date")]
    UntilBeforeStart,
}

/// Normalized repeat configuration as it may be persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatConfig {
    pub pattern: Option<RepeatPattern>,
    pub until: Option<NaiveDate>,
}

/// Validate and normalize a tour date's repeat fields before persistence.
///
/// With repeat disabled, whatever transient pattern/until values the form
/// holds are forced to null so stale repeat data cannot reactivate later.
/// With repeat enabled, a pattern is required and `until` (when present)
/// must not precede the starting date.
pub fn normalize(
    repeat_enabled: bool,
    pattern: Option<RepeatPattern>,
    until: Option<NaiveDate>,
    starting_date: NaiveDate,
) -> Result<RepeatConfig, RepeatConfigError> {
    if !repeat_enabled {
        return Ok(RepeatConfig {
            pattern: None,
            until: None,
        });
    }

    let pattern = pattern.ok_or(RepeatConfigError::MissingPattern)?;

    if let Some(until) = until {
        if until < starting_date {
            return Err(RepeatConfigError::UntilBeforeStart);
        }
    }

    Ok(RepeatConfig {
        pattern: Some(pattern),
        until,
    })
}

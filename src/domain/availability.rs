use chrono::NaiveDate;

use crate::entities::{price_package, tour_date, tour_date_package};

/// Effective availability of one price package on one tour-date entry, after
/// applying its override row (if any) on top of the package defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveAvailability {
    pub enabled: bool,
    /// Adult price after override. Child price never has a per-date override.
    pub adult_price: f64,
    pub child_price: Option<f64>,
    /// None means unlimited.
    pub max_pax: Option<i32>,
    pub notes: Option<String>,
    pub blocked_dates: Vec<NaiveDate>,
}

/// Resolve the effective price and availability for a `(tour_date, package)`
/// pair. A missing override row is the default state, not an error: the pair
/// resolves to enabled at the package's base price with the date's own pax
/// cap. Input is assumed validated by the write path; no clamping here.
pub fn resolve(
    package: &price_package::Model,
    date: &tour_date::Model,
    override_row: Option<&tour_date_package::Model>,
    blocked_dates: &[NaiveDate],
) -> EffectiveAvailability {
    let enabled = override_row.map(|o| o.enabled).unwrap_or(true);

    let adult_price = override_row
        .and_then(|o| o.price_override)
        .unwrap_or(package.adult_price);

    let max_pax = override_row
        .and_then(|o| o.max_pax_override)
        .or(date.max_pax);

    EffectiveAvailability {
        enabled,
        adult_price,
        child_price: package.child_price,
        max_pax,
        notes: override_row.and_then(|o| o.notes.clone()),
        blocked_dates: blocked_dates.to_vec(),
    }
}

impl EffectiveAvailability {
    /// Whether a specific calendar day is blocked for this package on this
    /// date entry. Blocks are package-scoped: the same day can be blocked for
    /// one package and open for another.
    pub fn is_day_blocked(&self, day: NaiveDate) -> bool {
        self.blocked_dates.contains(&day)
    }

    pub fn is_bookable_on(&self, day: NaiveDate) -> bool {
        self.enabled && !self.is_day_blocked(day)
    }
}

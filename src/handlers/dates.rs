use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::change_feed::ChangeEvent;
use crate::domain::repeat;
use crate::entities::tour_date::RepeatPattern;
use crate::entities::{price_package, tour, tour_date, tour_date_blocked_date, tour_date_package};
use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TourDateRequest {
    pub starting_date: NaiveDate,
    pub cutoff_days: Option<i32>,
    pub max_pax: Option<i32>,
    pub repeat_enabled: bool,
    // Transient form state may carry a pattern while repeat is off; the
    // normalizer nulls it before anything reaches the store.
    pub repeat_pattern: Option<RepeatPattern>,
    pub repeat_until: Option<NaiveDate>,
}

fn validate_date(payload: &TourDateRequest) -> AppResult<()> {
    if payload.cutoff_days.is_some_and(|d| d < 0) {
        return Err(AppError::BadRequest(
            "Cutoff days must not be negative".to_string(),
        ));
    }
    if payload.max_pax.is_some_and(|n| n < 1) {
        return Err(AppError::BadRequest(
            "Max pax must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct OverrideInput {
    pub package_id: Uuid,
    pub enabled: bool,
    pub price_override: Option<f64>,
    pub max_pax_override: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub blocked_dates: Vec<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct SaveOverridesRequest {
    pub packages: Vec<OverrideInput>,
}

#[derive(Debug, Serialize)]
pub struct DateOverrideView {
    pub package_id: Uuid,
    pub package_name: String,
    pub enabled: bool,
    pub price_override: Option<f64>,
    pub max_pax_override: Option<i32>,
    pub notes: Option<String>,
    pub blocked_dates: Vec<NaiveDate>,
    /// False when no row is persisted and the defaults above are synthesized.
    pub persisted: bool,
}

#[derive(Debug, Serialize)]
pub struct TourDateView {
    #[serde(flatten)]
    pub date: tour_date::Model,
    pub packages: Vec<DateOverrideView>,
}

/// List a tour's dates with the override state of every package on every
/// date. Pairs without a persisted row come back as the implicit default so
/// the editor always sees a complete grid.
pub async fn list_dates(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
) -> AppResult<Json<Vec<TourDateView>>> {
    tour::Entity::find_by_id(tour_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour not found".to_string()))?;

    let dates = tour_date::Entity::find()
        .filter(tour_date::Column::TourId.eq(tour_id))
        .order_by_asc(tour_date::Column::StartingDate)
        .all(&state.db)
        .await?;

    let packages = price_package::Entity::find()
        .filter(price_package::Column::TourId.eq(tour_id))
        .order_by_asc(price_package::Column::SortOrder)
        .all(&state.db)
        .await?;

    let mut views = Vec::with_capacity(dates.len());
    for date in dates {
        let overrides = date_overrides(&state.db, date.id).await?;
        let mut rows = Vec::with_capacity(packages.len());
        for package in &packages {
            let row = overrides.iter().find(|(o, _)| o.package_id == package.id);
            rows.push(match row {
                Some((o, blocked)) => DateOverrideView {
                    package_id: package.id,
                    package_name: package.name.clone(),
                    enabled: o.enabled,
                    price_override: o.price_override,
                    max_pax_override: o.max_pax_override,
                    notes: o.notes.clone(),
                    blocked_dates: blocked.clone(),
                    persisted: true,
                },
                None => DateOverrideView {
                    package_id: package.id,
                    package_name: package.name.clone(),
                    enabled: true,
                    price_override: None,
                    max_pax_override: None,
                    notes: None,
                    blocked_dates: Vec::new(),
                    persisted: false,
                },
            });
        }
        views.push(TourDateView {
            date,
            packages: rows,
        });
    }

    Ok(Json(views))
}

/// Add a tour date (admin)
pub async fn create_date(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
    Json(payload): Json<TourDateRequest>,
) -> AppResult<Json<tour_date::Model>> {
    validate_date(&payload)?;

    tour::Entity::find_by_id(tour_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour not found".to_string()))?;

    let repeat = repeat::normalize(
        payload.repeat_enabled,
        payload.repeat_pattern,
        payload.repeat_until,
        payload.starting_date,
    )
    .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let new_date = tour_date::ActiveModel {
        id: Set(Uuid::new_v4()),
        tour_id: Set(tour_id),
        starting_date: Set(payload.starting_date),
        cutoff_days: Set(payload.cutoff_days.unwrap_or(0)),
        max_pax: Set(payload.max_pax),
        repeat_enabled: Set(payload.repeat_enabled),
        repeat_pattern: Set(repeat.pattern),
        repeat_until: Set(repeat.until),
        ..Default::default()
    };

    let result = new_date.insert(&state.db).await?;
    let _ = state
        .changes
        .send(ChangeEvent::insert("tour_dates", result.id, &result));
    Ok(Json(result))
}

/// Update a tour date (admin)
pub async fn update_date(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TourDateRequest>,
) -> AppResult<Json<tour_date::Model>> {
    validate_date(&payload)?;

    let date = tour_date::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour date not found".to_string()))?;

    let repeat = repeat::normalize(
        payload.repeat_enabled,
        payload.repeat_pattern,
        payload.repeat_until,
        payload.starting_date,
    )
    .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut active: tour_date::ActiveModel = date.into();
    active.starting_date = Set(payload.starting_date);
    active.cutoff_days = Set(payload.cutoff_days.unwrap_or(0));
    active.max_pax = Set(payload.max_pax);
    active.repeat_enabled = Set(payload.repeat_enabled);
    active.repeat_pattern = Set(repeat.pattern);
    active.repeat_until = Set(repeat.until);

    let result = active.update(&state.db).await?;
    let _ = state
        .changes
        .send(ChangeEvent::update("tour_dates", result.id, &result));
    Ok(Json(result))
}

/// Delete a tour date (admin) with its override rows and blocked dates
pub async fn delete_date(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    tour_date::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour date not found".to_string()))?;

    delete_override_set(&state.db, id).await?;
    tour_date::Entity::delete_by_id(id).exec(&state.db).await?;

    let _ = state.changes.send(ChangeEvent::delete("tour_dates", id));
    Ok(Json(serde_json::json!({ "message": "Tour date deleted" })))
}

/// Replace the full override set for a date (admin). Delete-then-reinsert:
/// whatever was saved before is gone, including blocked dates of packages
/// missing from this payload. Last write wins for the entire set.
pub async fn save_date_packages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SaveOverridesRequest>,
) -> AppResult<Json<Vec<DateOverrideView>>> {
    let date = tour_date::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour date not found".to_string()))?;

    let packages = price_package::Entity::find()
        .filter(price_package::Column::TourId.eq(date.tour_id))
        .all(&state.db)
        .await?;

    for input in &payload.packages {
        if !packages.iter().any(|p| p.id == input.package_id) {
            return Err(AppError::BadRequest(
                "Package does not belong to this tour".to_string(),
            ));
        }
        if let Some(price) = input.price_override {
            if !price.is_finite() || price < 0.0 {
                return Err(AppError::BadRequest(
                    "Price override must be a non-negative number".to_string(),
                ));
            }
        }
        if input.max_pax_override.is_some_and(|n| n < 1) {
            return Err(AppError::BadRequest(
                "Max pax override must be at least 1".to_string(),
            ));
        }
    }

    delete_override_set(&state.db, id).await?;

    let mut views = Vec::with_capacity(payload.packages.len());
    for input in payload.packages {
        let override_id = Uuid::new_v4();
        let row = tour_date_package::ActiveModel {
            id: Set(override_id),
            tour_date_id: Set(id),
            package_id: Set(input.package_id),
            enabled: Set(input.enabled),
            price_override: Set(input.price_override),
            max_pax_override: Set(input.max_pax_override),
            notes: Set(input.notes.clone()),
        };
        row.insert(&state.db).await?;

        for day in &input.blocked_dates {
            let blocked = tour_date_blocked_date::ActiveModel {
                id: Set(Uuid::new_v4()),
                tour_date_package_id: Set(override_id),
                blocked_date: Set(*day),
            };
            blocked.insert(&state.db).await?;
        }

        let package_name = packages
            .iter()
            .find(|p| p.id == input.package_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        views.push(DateOverrideView {
            package_id: input.package_id,
            package_name,
            enabled: input.enabled,
            price_override: input.price_override,
            max_pax_override: input.max_pax_override,
            notes: input.notes,
            blocked_dates: input.blocked_dates,
            persisted: true,
        });
    }

    tracing::info!(tour_date_id = %id, rows = views.len(), "Override set replaced");
    let _ = state.changes.send(ChangeEvent::update("tour_dates", id, &date));
    Ok(Json(views))
}

async fn delete_override_set(db: &DatabaseConnection, date_id: Uuid) -> AppResult<()> {
    let override_ids: Vec<Uuid> = tour_date_package::Entity::find()
        .filter(tour_date_package::Column::TourDateId.eq(date_id))
        .all(db)
        .await?
        .into_iter()
        .map(|o| o.id)
        .collect();

    if !override_ids.is_empty() {
        tour_date_blocked_date::Entity::delete_many()
            .filter(tour_date_blocked_date::Column::TourDatePackageId.is_in(override_ids))
            .exec(db)
            .await?;
        tour_date_package::Entity::delete_many()
            .filter(tour_date_package::Column::TourDateId.eq(date_id))
            .exec(db)
            .await?;
    }
    Ok(())
}

pub(crate) async fn date_overrides(
    db: &DatabaseConnection,
    date_id: Uuid,
) -> AppResult<Vec<(tour_date_package::Model, Vec<NaiveDate>)>> {
    let overrides = tour_date_package::Entity::find()
        .filter(tour_date_package::Column::TourDateId.eq(date_id))
        .all(db)
        .await?;

    let mut result = Vec::with_capacity(overrides.len());
    for o in overrides {
        let blocked: Vec<NaiveDate> = tour_date_blocked_date::Entity::find()
            .filter(tour_date_blocked_date::Column::TourDatePackageId.eq(o.id))
            .all(db)
            .await?
            .into_iter()
            .map(|b| b.blocked_date)
            .collect();
        result.push((o, blocked));
    }
    Ok(result)
}

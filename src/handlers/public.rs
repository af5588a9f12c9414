use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::availability;
use crate::domain::listing::{filter_tours, TourQuery};
use crate::entities::tour::TourStatus;
use crate::entities::{destination, price_package, tour, tour_date};
use crate::error::{AppError, AppResult};
use crate::handlers::dates::date_overrides;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TourDetailResponse {
    #[serde(flatten)]
    pub tour: tour::Model,
    pub destination: Option<destination::Model>,
}

#[derive(Debug, Serialize)]
pub struct AvailablePackage {
    pub package_id: Uuid,
    pub name: String,
    pub enabled: bool,
    pub adult_price: f64,
    pub child_price: Option<f64>,
    pub max_pax: Option<i32>,
    pub blocked_dates: Vec<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AvailableDateResponse {
    pub id: Uuid,
    pub starting_date: NaiveDate,
    pub cutoff_days: i32,
    pub max_pax: Option<i32>,
    pub packages: Vec<AvailablePackage>,
}

#[derive(Debug, Serialize)]
pub struct RelatedToursResponse {
    pub same_destination: Vec<tour::Model>,
    pub other_destinations: Vec<tour::Model>,
}

/// Public tour listing: published tours only, same in-memory filters as the
/// admin table view.
pub async fn list_tours(
    State(state): State<AppState>,
    Query(mut query): Query<TourQuery>,
) -> AppResult<Json<Vec<tour::Model>>> {
    query.status = Some(TourStatus::Published);
    let tours = tour::Entity::find().all(&state.db).await?;
    Ok(Json(filter_tours(tours, &query)))
}

/// Fetch a tour by slug with its destination embedded
pub async fn get_tour_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<TourDetailResponse>> {
    let tour = find_published(&state, &slug).await?;

    let destination = match tour.destination_id {
        Some(destination_id) => {
            destination::Entity::find_by_id(destination_id)
                .one(&state.db)
                .await?
        }
        None => None,
    };

    Ok(Json(TourDetailResponse { tour, destination }))
}

/// Active price packages for a tour, ordered by sort order
pub async fn list_packages(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<price_package::Model>>> {
    let tour = find_published(&state, &slug).await?;

    let packages = price_package::Entity::find()
        .filter(price_package::Column::TourId.eq(tour.id))
        .filter(price_package::Column::IsActive.eq(true))
        .order_by_asc(price_package::Column::SortOrder)
        .all(&state.db)
        .await?;

    Ok(Json(packages))
}

/// Future, still-bookable tour dates with per-package effective availability.
/// A date is bookable while today is at or before starting_date minus its
/// cutoff. Packages without a persisted override row resolve to the implicit
/// default.
pub async fn list_dates(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<AvailableDateResponse>>> {
    let tour = find_published(&state, &slug).await?;
    let today = Utc::now().date_naive();

    let dates = tour_date::Entity::find()
        .filter(tour_date::Column::TourId.eq(tour.id))
        .order_by_asc(tour_date::Column::StartingDate)
        .all(&state.db)
        .await?;

    let packages = price_package::Entity::find()
        .filter(price_package::Column::TourId.eq(tour.id))
        .filter(price_package::Column::IsActive.eq(true))
        .order_by_asc(price_package::Column::SortOrder)
        .all(&state.db)
        .await?;

    let mut responses = Vec::new();
    for date in dates {
        let booking_deadline = date.starting_date - Duration::days(date.cutoff_days as i64);
        if today > booking_deadline {
            continue;
        }

        let overrides = date_overrides(&state.db, date.id).await?;

        let resolved: Vec<AvailablePackage> = packages
            .iter()
            .map(|package| {
                let row = overrides.iter().find(|(o, _)| o.package_id == package.id);
                let effective = availability::resolve(
                    package,
                    &date,
                    row.map(|(o, _)| o),
                    row.map(|(_, blocked)| blocked.as_slice()).unwrap_or(&[]),
                );
                AvailablePackage {
                    package_id: package.id,
                    name: package.name.clone(),
                    enabled: effective.enabled,
                    adult_price: effective.adult_price,
                    child_price: effective.child_price,
                    max_pax: effective.max_pax,
                    blocked_dates: effective.blocked_dates,
                }
            })
            .collect();

        // A date entry with every package disabled is not offered at all.
        if resolved.iter().all(|p| !p.enabled) && !resolved.is_empty() {
            continue;
        }

        responses.push(AvailableDateResponse {
            id: date.id,
            starting_date: date.starting_date,
            cutoff_days: date.cutoff_days,
            max_pax: date.max_pax,
            packages: resolved,
        });
    }

    Ok(Json(responses))
}

/// Cross-sell: up to 3 published tours sharing the destination (excluding
/// self) and up to 4 from other destinations.
pub async fn related_tours(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<RelatedToursResponse>> {
    let tour = find_published(&state, &slug).await?;

    let published = tour::Entity::find()
        .filter(tour::Column::Status.eq(TourStatus::Published))
        .filter(tour::Column::Id.ne(tour.id))
        .all(&state.db)
        .await?;

    let same_destination: Vec<tour::Model> = published
        .iter()
        .filter(|t| tour.destination_id.is_some() && t.destination_id == tour.destination_id)
        .take(3)
        .cloned()
        .collect();

    let other_destinations: Vec<tour::Model> = published
        .iter()
        .filter(|t| t.destination_id != tour.destination_id)
        .take(4)
        .cloned()
        .collect();

    Ok(Json(RelatedToursResponse {
        same_destination,
        other_destinations,
    }))
}

/// List destinations (public)
pub async fn list_destinations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<destination::Model>>> {
    let destinations = destination::Entity::find()
        .order_by_asc(destination::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(destinations))
}

async fn find_published(state: &AppState, slug: &str) -> AppResult<tour::Model> {
    tour::Entity::find()
        .filter(tour::Column::Slug.eq(slug))
        .filter(tour::Column::Status.eq(TourStatus::Published))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour not found".to_string()))
}

use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::change_feed::ChangeEvent;
use crate::domain::packages::{can_remove, default_on_add, default_transition, promotion_after_removal};
use crate::entities::tour::{self, PackageCache, PackageSummary};
use crate::entities::{price_package, tour_date_blocked_date, tour_date_package};
use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PackageRequest {
    pub name: String,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
    pub adult_price: f64,
    pub adult_crossed_price: Option<f64>,
    pub adult_min_pax: Option<i32>,
    pub adult_max_pax: Option<i32>,
    pub child_price: Option<f64>,
    pub child_crossed_price: Option<f64>,
    pub child_min_pax: Option<i32>,
    pub child_max_pax: Option<i32>,
    pub child_age_min: Option<i32>,
    pub child_age_max: Option<i32>,
    pub group_discount_enabled: Option<bool>,
    pub group_discount_percentage: Option<f64>,
    pub group_discount_min_pax: Option<i32>,
}

fn validate_package(payload: &PackageRequest) -> AppResult<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Package name is required".to_string()));
    }
    for (label, price) in [
        ("Adult price", Some(payload.adult_price)),
        ("Adult crossed price", payload.adult_crossed_price),
        ("Child price", payload.child_price),
        ("Child crossed price", payload.child_crossed_price),
    ] {
        if let Some(p) = price {
            if !p.is_finite() || p < 0.0 {
                return Err(AppError::BadRequest(format!(
                    "{} must be a non-negative number",
                    label
                )));
            }
        }
    }
    for (label, pax) in [
        ("Adult min pax", payload.adult_min_pax),
        ("Adult max pax", payload.adult_max_pax),
        ("Child min pax", payload.child_min_pax),
        ("Child max pax", payload.child_max_pax),
        ("Group discount min pax", payload.group_discount_min_pax),
    ] {
        if let Some(n) = pax {
            if n < 0 {
                return Err(AppError::BadRequest(format!(
                    "{} must not be negative",
                    label
                )));
            }
        }
    }
    if let Some(pct) = payload.group_discount_percentage {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(AppError::BadRequest(
                "Group discount percentage must be between 0 and 100".to_string(),
            ));
        }
    }
    Ok(())
}

/// List a tour's packages ordered by sort order (admin)
pub async fn list_packages(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
) -> AppResult<Json<Vec<price_package::Model>>> {
    let packages = tour_packages(&state.db, tour_id).await?;
    Ok(Json(packages))
}

/// Add a package to a tour (admin). The first package of a tour becomes the
/// default; later ones never do.
pub async fn add_package(
    State(state): State<AppState>,
    Path(tour_id): Path<Uuid>,
    Json(payload): Json<PackageRequest>,
) -> AppResult<Json<price_package::Model>> {
    validate_package(&payload)?;

    tour::Entity::find_by_id(tour_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour not found".to_string()))?;

    let existing = tour_packages(&state.db, tour_id).await?;
    let is_default = default_on_add(&existing);
    let next_sort = existing.iter().map(|p| p.sort_order).max().unwrap_or(-1) + 1;

    let new_package = price_package::ActiveModel {
        id: Set(Uuid::new_v4()),
        tour_id: Set(tour_id),
        name: Set(payload.name.trim().to_string()),
        is_default: Set(is_default),
        is_active: Set(payload.is_active.unwrap_or(true)),
        sort_order: Set(payload.sort_order.unwrap_or(next_sort)),
        adult_price: Set(payload.adult_price),
        adult_crossed_price: Set(payload.adult_crossed_price),
        adult_min_pax: Set(payload.adult_min_pax.unwrap_or(1)),
        adult_max_pax: Set(payload.adult_max_pax),
        child_price: Set(payload.child_price),
        child_crossed_price: Set(payload.child_crossed_price),
        child_min_pax: Set(payload.child_min_pax.unwrap_or(0)),
        child_max_pax: Set(payload.child_max_pax),
        child_age_min: Set(payload.child_age_min),
        child_age_max: Set(payload.child_age_max),
        group_discount_enabled: Set(payload.group_discount_enabled.unwrap_or(false)),
        group_discount_percentage: Set(payload.group_discount_percentage),
        group_discount_min_pax: Set(payload.group_discount_min_pax),
        ..Default::default()
    };

    let result = new_package.insert(&state.db).await?;
    rebuild_package_cache(&state.db, tour_id).await?;
    let _ = state
        .changes
        .send(ChangeEvent::insert("price_packages", result.id, &result));
    Ok(Json(result))
}

/// Update a package (admin). The default flag is managed only through
/// set-default and removal promotion.
pub async fn update_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PackageRequest>,
) -> AppResult<Json<price_package::Model>> {
    validate_package(&payload)?;

    let package = price_package::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;
    let tour_id = package.tour_id;
    let current_sort = package.sort_order;
    let currently_active = package.is_active;

    let mut active: price_package::ActiveModel = package.into();
    active.name = Set(payload.name.trim().to_string());
    active.is_active = Set(payload.is_active.unwrap_or(currently_active));
    active.sort_order = Set(payload.sort_order.unwrap_or(current_sort));
    active.adult_price = Set(payload.adult_price);
    active.adult_crossed_price = Set(payload.adult_crossed_price);
    active.adult_min_pax = Set(payload.adult_min_pax.unwrap_or(1));
    active.adult_max_pax = Set(payload.adult_max_pax);
    active.child_price = Set(payload.child_price);
    active.child_crossed_price = Set(payload.child_crossed_price);
    active.child_min_pax = Set(payload.child_min_pax.unwrap_or(0));
    active.child_max_pax = Set(payload.child_max_pax);
    active.child_age_min = Set(payload.child_age_min);
    active.child_age_max = Set(payload.child_age_max);
    active.group_discount_enabled = Set(payload.group_discount_enabled.unwrap_or(false));
    active.group_discount_percentage = Set(payload.group_discount_percentage);
    active.group_discount_min_pax = Set(payload.group_discount_min_pax);

    let result = active.update(&state.db).await?;
    rebuild_package_cache(&state.db, tour_id).await?;
    let _ = state
        .changes
        .send(ChangeEvent::update("price_packages", result.id, &result));
    Ok(Json(result))
}

/// Remove a package (admin). Refused for the tour's last package; when the
/// default is removed, the first remaining package by sort order is promoted.
pub async fn delete_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let package = price_package::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;
    let tour_id = package.tour_id;

    let packages = tour_packages(&state.db, tour_id).await?;
    if !can_remove(&packages) {
        return Err(AppError::Conflict(
            "A tour must keep at least one price package".to_string(),
        ));
    }

    let promoted = promotion_after_removal(&packages, id);

    // Per-date override rows for this package go with it.
    let override_ids: Vec<Uuid> = tour_date_package::Entity::find()
        .filter(tour_date_package::Column::PackageId.eq(id))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|o| o.id)
        .collect();
    if !override_ids.is_empty() {
        tour_date_blocked_date::Entity::delete_many()
            .filter(tour_date_blocked_date::Column::TourDatePackageId.is_in(override_ids))
            .exec(&state.db)
            .await?;
        tour_date_package::Entity::delete_many()
            .filter(tour_date_package::Column::PackageId.eq(id))
            .exec(&state.db)
            .await?;
    }

    price_package::Entity::delete_by_id(id).exec(&state.db).await?;

    if let Some(promoted_id) = promoted {
        let promoted_package = price_package::Entity::find_by_id(promoted_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Internal("Promoted package vanished".to_string()))?;
        let mut active: price_package::ActiveModel = promoted_package.into();
        active.is_default = Set(true);
        active.update(&state.db).await?;
    }

    rebuild_package_cache(&state.db, tour_id).await?;
    let _ = state.changes.send(ChangeEvent::delete("price_packages", id));
    Ok(Json(serde_json::json!({ "message": "Package deleted" })))
}

/// Make a package the tour's default, clearing every sibling. Idempotent.
pub async fn set_default_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<price_package::Model>>> {
    let package = price_package::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;
    let tour_id = package.tour_id;

    let packages = tour_packages(&state.db, tour_id).await?;
    let (to_set, to_clear) = default_transition(&packages, id);

    for package_id in to_clear {
        let row = price_package::Entity::find_by_id(package_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Internal("Package vanished".to_string()))?;
        let mut active: price_package::ActiveModel = row.into();
        active.is_default = Set(false);
        active.update(&state.db).await?;
    }
    for package_id in to_set {
        let row = price_package::Entity::find_by_id(package_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Internal("Package vanished".to_string()))?;
        let mut active: price_package::ActiveModel = row.into();
        active.is_default = Set(true);
        active.update(&state.db).await?;
    }

    rebuild_package_cache(&state.db, tour_id).await?;
    let packages = tour_packages(&state.db, tour_id).await?;
    for p in &packages {
        let _ = state
            .changes
            .send(ChangeEvent::update("price_packages", p.id, p));
    }
    Ok(Json(packages))
}

async fn tour_packages(
    db: &DatabaseConnection,
    tour_id: Uuid,
) -> AppResult<Vec<price_package::Model>> {
    Ok(price_package::Entity::find()
        .filter(price_package::Column::TourId.eq(tour_id))
        .order_by_asc(price_package::Column::SortOrder)
        .all(db)
        .await?)
}

/// Rebuild the tour's denormalized package projection from the normalized
/// table: the embedded package list and the cheapest active adult price.
/// Runs after every package write; the table always wins.
pub async fn rebuild_package_cache(
    db: &DatabaseConnection,
    tour_id: Uuid,
) -> AppResult<tour::Model> {
    let packages = tour_packages(db, tour_id).await?;

    let cache = PackageCache(
        packages
            .iter()
            .map(|p| PackageSummary {
                id: p.id,
                name: p.name.clone(),
                is_default: p.is_default,
                is_active: p.is_active,
                sort_order: p.sort_order,
                adult_price: p.adult_price,
                child_price: p.child_price,
            })
            .collect(),
    );

    let starting_price = packages
        .iter()
        .filter(|p| p.is_active)
        .map(|p| p.adult_price)
        .fold(None, |acc: Option<f64>, p| {
            Some(acc.map_or(p, |a| a.min(p)))
        });

    let tour_row = tour::Entity::find_by_id(tour_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour not found".to_string()))?;

    let mut active: tour::ActiveModel = tour_row.into();
    active.price_packages_cache = Set(cache);
    active.starting_price_from = Set(starting_price);
    Ok(active.update(db).await?)
}

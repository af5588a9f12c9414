use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::change_feed::ChangeEvent;
use crate::domain::listing::{filter_tours, TourQuery};
use crate::entities::tour::{self, FaqList, Itinerary, PackageType, StringList, TourStatus};
use crate::entities::{price_package, tour_date, tour_date_blocked_date, tour_date_package};
use crate::error::{AppError, AppResult};
use crate::handlers::packages::rebuild_package_cache;
use crate::utils::slug::slugify;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTourRequest {
    pub title: String,
    pub slug: Option<String>,
    pub destination_id: Option<Uuid>,
    pub destination_name: Option<String>,
    pub category: Option<String>,
}

/// Each editor section owns a disjoint subset of tour columns and saves them
/// wholesale through its own endpoint, so saving one section can never
/// clobber a sibling's fields. Pricing packages and dates have their own
/// handlers.

#[derive(Debug, Deserialize)]
pub struct GeneralSection {
    pub title: String,
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub destination_id: Option<Uuid>,
    pub destination_name: Option<String>,
    pub activities_label: Option<String>,
    pub difficulty_level: Option<String>,
    pub duration_days: Option<i32>,
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
    pub group_size_min: Option<i32>,
    pub group_size_max: Option<i32>,
    pub featured: bool,
    pub status: TourStatus,
}

#[derive(Debug, Deserialize)]
pub struct ImagesSection {
    pub hero_image_url: Option<String>,
    pub gallery_image_urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItinerarySection {
    pub itinerary: Vec<tour::ItineraryDay>,
}

#[derive(Debug, Deserialize)]
pub struct InclusionsSection {
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FaqsSection {
    pub faqs: Vec<tour::Faq>,
}

#[derive(Debug, Deserialize)]
pub struct PricingSection {
    pub price_usd: Option<f64>,
    pub package_type: PackageType,
    pub primary_price_category: Option<String>,
}

/// List tours with in-memory search/filter/sort (admin table view)
pub async fn list_tours(
    State(state): State<AppState>,
    Query(query): Query<TourQuery>,
) -> AppResult<Json<Vec<tour::Model>>> {
    let tours = tour::Entity::find().all(&state.db).await?;
    Ok(Json(filter_tours(tours, &query)))
}

/// Get a tour by id (admin editor load)
pub async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<tour::Model>> {
    let tour = tour::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour not found".to_string()))?;
    Ok(Json(tour))
}

/// Create a tour (admin). Starts as a draft with zero dates and one default
/// price package.
pub async fn create_tour(
    State(state): State<AppState>,
    Json(payload): Json<CreateTourRequest>,
) -> AppResult<Json<tour::Model>> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let slug = slugify(payload.slug.as_deref().unwrap_or(&payload.title));
    if slug.is_empty() {
        return Err(AppError::BadRequest(
            "Title must contain letters or digits".to_string(),
        ));
    }
    ensure_slug_free(&state, &slug, None).await?;

    let tour_id = Uuid::new_v4();
    let new_tour = tour::ActiveModel {
        id: Set(tour_id),
        title: Set(payload.title.trim().to_string()),
        slug: Set(slug),
        destination_id: Set(payload.destination_id),
        destination_name: Set(payload.destination_name),
        category: Set(payload.category),
        gallery_image_urls: Set(StringList::default()),
        itinerary: Set(Itinerary::default()),
        includes: Set(StringList::default()),
        excludes: Set(StringList::default()),
        faqs: Set(FaqList::default()),
        status: Set(TourStatus::Draft),
        featured: Set(false),
        package_type: Set(PackageType::Single),
        price_packages_cache: Set(tour::PackageCache::default()),
        ..Default::default()
    };
    let created = new_tour.insert(&state.db).await?;

    let default_package = price_package::ActiveModel {
        id: Set(Uuid::new_v4()),
        tour_id: Set(tour_id),
        name: Set("Standard".to_string()),
        is_default: Set(true),
        is_active: Set(true),
        sort_order: Set(0),
        adult_price: Set(0.0),
        adult_min_pax: Set(1),
        child_min_pax: Set(0),
        group_discount_enabled: Set(false),
        ..Default::default()
    };
    default_package.insert(&state.db).await?;

    let result = rebuild_package_cache(&state.db, tour_id).await?;
    tracing::info!(tour_id = %tour_id, slug = %result.slug, "Tour created");
    let _ = state
        .changes
        .send(ChangeEvent::insert("tours", result.id, &result));
    Ok(Json(result))
}

/// Save the General section
pub async fn save_general(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GeneralSection>,
) -> AppResult<Json<tour::Model>> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let tour = find_tour(&state, id).await?;

    let slug = slugify(payload.slug.as_deref().unwrap_or(&payload.title));
    if slug.is_empty() {
        return Err(AppError::BadRequest(
            "Slug must contain letters or digits".to_string(),
        ));
    }
    if slug != tour.slug {
        ensure_slug_free(&state, &slug, Some(id)).await?;
    }

    let mut active: tour::ActiveModel = tour.into();
    active.title = Set(payload.title.trim().to_string());
    active.slug = Set(slug);
    active.short_description = Set(payload.short_description);
    active.long_description = Set(payload.long_description);
    active.category = Set(payload.category);
    active.difficulty = Set(payload.difficulty);
    active.destination_id = Set(payload.destination_id);
    active.destination_name = Set(payload.destination_name);
    active.activities_label = Set(payload.activities_label);
    active.difficulty_level = Set(payload.difficulty_level);
    active.duration_days = Set(payload.duration_days);
    active.age_min = Set(payload.age_min);
    active.age_max = Set(payload.age_max);
    active.group_size_min = Set(payload.group_size_min);
    active.group_size_max = Set(payload.group_size_max);
    active.featured = Set(payload.featured);
    active.status = Set(payload.status);
    active.updated_at = Set(Utc::now().into());

    let result = active.update(&state.db).await?;
    let _ = state
        .changes
        .send(ChangeEvent::update("tours", result.id, &result));
    Ok(Json(result))
}

/// Save the Images section
pub async fn save_images(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ImagesSection>,
) -> AppResult<Json<tour::Model>> {
    let tour = find_tour(&state, id).await?;

    let mut active: tour::ActiveModel = tour.into();
    active.hero_image_url = Set(payload.hero_image_url);
    active.gallery_image_urls = Set(StringList(payload.gallery_image_urls));
    active.updated_at = Set(Utc::now().into());

    let result = active.update(&state.db).await?;
    let _ = state
        .changes
        .send(ChangeEvent::update("tours", result.id, &result));
    Ok(Json(result))
}

/// Save the Itinerary section
pub async fn save_itinerary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ItinerarySection>,
) -> AppResult<Json<tour::Model>> {
    let tour = find_tour(&state, id).await?;

    let mut active: tour::ActiveModel = tour.into();
    active.itinerary = Set(Itinerary(payload.itinerary));
    active.updated_at = Set(Utc::now().into());

    let result = active.update(&state.db).await?;
    let _ = state
        .changes
        .send(ChangeEvent::update("tours", result.id, &result));
    Ok(Json(result))
}

/// Save the Includes/Excludes section
pub async fn save_inclusions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InclusionsSection>,
) -> AppResult<Json<tour::Model>> {
    let tour = find_tour(&state, id).await?;

    let mut active: tour::ActiveModel = tour.into();
    active.includes = Set(StringList(payload.includes));
    active.excludes = Set(StringList(payload.excludes));
    active.updated_at = Set(Utc::now().into());

    let result = active.update(&state.db).await?;
    let _ = state
        .changes
        .send(ChangeEvent::update("tours", result.id, &result));
    Ok(Json(result))
}

/// Save the FAQs section
pub async fn save_faqs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FaqsSection>,
) -> AppResult<Json<tour::Model>> {
    let tour = find_tour(&state, id).await?;

    let mut active: tour::ActiveModel = tour.into();
    active.faqs = Set(FaqList(payload.faqs));
    active.updated_at = Set(Utc::now().into());

    let result = active.update(&state.db).await?;
    let _ = state
        .changes
        .send(ChangeEvent::update("tours", result.id, &result));
    Ok(Json(result))
}

/// Save the tour-level Pricing section. Package rows have their own
/// endpoints; starting_price_from and the package cache are projections and
/// never written here.
pub async fn save_pricing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PricingSection>,
) -> AppResult<Json<tour::Model>> {
    if let Some(price) = payload.price_usd {
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::BadRequest(
                "Price must be a non-negative number".to_string(),
            ));
        }
    }

    let tour = find_tour(&state, id).await?;

    let mut active: tour::ActiveModel = tour.into();
    active.price_usd = Set(payload.price_usd);
    active.package_type = Set(payload.package_type);
    active.primary_price_category = Set(payload.primary_price_category);
    active.updated_at = Set(Utc::now().into());

    let result = active.update(&state.db).await?;
    let _ = state
        .changes
        .send(ChangeEvent::update("tours", result.id, &result));
    Ok(Json(result))
}

/// Delete a tour (admin) along with its packages, dates, overrides, and
/// blocked dates.
pub async fn delete_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    find_tour(&state, id).await?;

    let date_ids: Vec<Uuid> = tour_date::Entity::find()
        .filter(tour_date::Column::TourId.eq(id))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|d| d.id)
        .collect();

    if !date_ids.is_empty() {
        let override_ids: Vec<Uuid> = tour_date_package::Entity::find()
            .filter(tour_date_package::Column::TourDateId.is_in(date_ids.clone()))
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
        }

        tour_date_package::Entity::delete_many()
            .filter(tour_date_package::Column::TourDateId.is_in(date_ids))
            .exec(&state.db)
            .await?;

        tour_date::Entity::delete_many()
            .filter(tour_date::Column::TourId.eq(id))
            .exec(&state.db)
            .await?;
    }

    price_package::Entity::delete_many()
        .filter(price_package::Column::TourId.eq(id))
        .exec(&state.db)
        .await?;

    tour::Entity::delete_by_id(id).exec(&state.db).await?;

    tracing::info!(tour_id = %id, "Tour deleted");
    let _ = state.changes.send(ChangeEvent::delete("tours", id));
    Ok(Json(serde_json::json!({ "message": "Tour deleted" })))
}

async fn find_tour(state: &AppState, id: Uuid) -> AppResult<tour::Model> {
    tour::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour not found".to_string()))
}

/// Slug uniqueness gets its own user-facing message instead of a generic
/// store error.
async fn ensure_slug_free(state: &AppState, slug: &str, exclude: Option<Uuid>) -> AppResult<()> {
    let mut query = tour::Entity::find().filter(tour::Column::Slug.eq(slug));
    if let Some(id) = exclude {
        query = query.filter(tour::Column::Id.ne(id));
    }

    if query.one(&state.db).await?.is_some() {
        return Err(AppError::Conflict(
            "A tour with that slug already exists".to_string(),
        ));
    }
    Ok(())
}

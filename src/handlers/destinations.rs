use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::change_feed::ChangeEvent;
use crate::entities::destination;
use crate::error::{AppError, AppResult};
use crate::utils::slug::slugify;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateDestinationRequest {
    pub name: String,
    pub slug: Option<String>,
    pub country: String,
    pub region: Option<String>,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDestinationRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
}

/// List all destinations
pub async fn list_destinations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<destination::Model>>> {
    let destinations = destination::Entity::find()
        .order_by_asc(destination::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(destinations))
}

/// Create a destination (admin)
pub async fn create_destination(
    State(state): State<AppState>,
    Json(payload): Json<CreateDestinationRequest>,
) -> AppResult<Json<destination::Model>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if payload.country.trim().is_empty() {
        return Err(AppError::BadRequest("Country is required".to_string()));
    }

    let slug = slugify(payload.slug.as_deref().unwrap_or(&payload.name));
    if slug.is_empty() {
        return Err(AppError::BadRequest("Name must contain letters or digits".to_string()));
    }

    let new_destination = destination::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        slug: Set(slug),
        country: Set(payload.country.trim().to_string()),
        region: Set(payload.region),
        short_description: Set(payload.short_description),
        image_url: Set(payload.image_url),
        ..Default::default()
    };

    let result = new_destination.insert(&state.db).await?;
    let _ = state
        .changes
        .send(ChangeEvent::insert("destinations", result.id, &result));
    Ok(Json(result))
}

/// Update a destination (admin)
pub async fn update_destination(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDestinationRequest>,
) -> AppResult<Json<destination::Model>> {
    let destination = destination::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Destination not found".to_string()))?;

    let mut active: destination::ActiveModel = destination.into();

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Name is required".to_string()));
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(slug) = payload.slug {
        let slug = slugify(&slug);
        if slug.is_empty() {
            return Err(AppError::BadRequest("Slug must contain letters or digits".to_string()));
        }
        active.slug = Set(slug);
    }
    if let Some(country) = payload.country {
        active.country = Set(country.trim().to_string());
    }
    if payload.region.is_some() {
        active.region = Set(payload.region);
    }
    if payload.short_description.is_some() {
        active.short_description = Set(payload.short_description);
    }
    if payload.image_url.is_some() {
        active.image_url = Set(payload.image_url);
    }

    let result = active.update(&state.db).await?;
    let _ = state
        .changes
        .send(ChangeEvent::update("destinations", result.id, &result));
    Ok(Json(result))
}

/// Delete a destination (admin). Deletion is unguarded: tours referencing it
/// keep their free-text destination_name and lose the foreign key.
pub async fn delete_destination(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = destination::Entity::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Destination not found".to_string()));
    }

    let _ = state.changes.send(ChangeEvent::delete("destinations", id));
    Ok(Json(serde_json::json!({ "message": "Destination deleted" })))
}

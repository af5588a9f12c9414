use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::change_feed::ChangeEvent;
use crate::entities::activity;
use crate::error::{AppError, AppResult};
use crate::utils::slug::slugify;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateActivityRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// List all activities
pub async fn list_activities(State(state): State<AppState>) -> AppResult<Json<Vec<activity::Model>>> {
    let activities = activity::Entity::find()
        .order_by_asc(activity::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(activities))
}

/// Create an activity (admin)
pub async fn create_activity(
    State(state): State<AppState>,
    Json(payload): Json<CreateActivityRequest>,
) -> AppResult<Json<activity::Model>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let slug = slugify(payload.slug.as_deref().unwrap_or(&payload.name));
    if slug.is_empty() {
        return Err(AppError::BadRequest("Name must contain letters or digits".to_string()));
    }

    let new_activity = activity::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        slug: Set(slug),
        description: Set(payload.description),
        icon: Set(payload.icon),
        ..Default::default()
    };

    let result = new_activity.insert(&state.db).await?;
    let _ = state
        .changes
        .send(ChangeEvent::insert("activities", result.id, &result));
    Ok(Json(result))
}

/// Update an activity (admin)
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateActivityRequest>,
) -> AppResult<Json<activity::Model>> {
    let activity = activity::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    let mut active: activity::ActiveModel = activity.into();

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
    if payload.description.is_some() {
        active.description = Set(payload.description);
    }
    if payload.icon.is_some() {
        active.icon = Set(payload.icon);
    }

    let result = active.update(&state.db).await?;
    let _ = state
        .changes
        .send(ChangeEvent::update("activities", result.id, &result));
    Ok(Json(result))
}

/// Delete an activity (admin). Tours reference activities only by label
/// text, so nothing else needs cleanup.
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = activity::Entity::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Activity not found".to_string()));
    }

    let _ = state.changes.send(ChangeEvent::delete("activities", id));
    Ok(Json(serde_json::json!({ "message": "Activity deleted" })))
}

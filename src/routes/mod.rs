use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{activities, auth, changes, dates, destinations, packages, public, tours};
use crate::middleware::auth::auth_middleware;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes (auth + browsing)
    let auth_routes = Router::new().route("/login", post(auth::login));

    let public_routes = Router::new()
        .route("/tours", get(public::list_tours))
        .route("/tours/{slug}", get(public::get_tour_by_slug))
        .route("/tours/{slug}/packages", get(public::list_packages))
        .route("/tours/{slug}/dates", get(public::list_dates))
        .route("/tours/{slug}/related", get(public::related_tours))
        .route("/destinations", get(public::list_destinations))
        .route("/activities", get(activities::list_activities));

    // Admin routes (requires bearer token)
    let admin_routes = Router::new()
        // Destination management
        .route("/destinations", get(destinations::list_destinations))
        .route("/destinations", post(destinations::create_destination))
        .route("/destinations/{id}", put(destinations::update_destination))
        .route("/destinations/{id}", delete(destinations::delete_destination))
        // Activity management
        .route("/activities", get(activities::list_activities))
        .route("/activities", post(activities::create_activity))
        .route("/activities/{id}", put(activities::update_activity))
        .route("/activities/{id}", delete(activities::delete_activity))
        // Tour management with section-scoped saves
        .route("/tours", get(tours::list_tours))
        .route("/tours", post(tours::create_tour))
        .route("/tours/{id}", get(tours::get_tour))
        .route("/tours/{id}", delete(tours::delete_tour))
        .route("/tours/{id}/general", put(tours::save_general))
        .route("/tours/{id}/images", put(tours::save_images))
        .route("/tours/{id}/itinerary", put(tours::save_itinerary))
        .route("/tours/{id}/inclusions", put(tours::save_inclusions))
        .route("/tours/{id}/faqs", put(tours::save_faqs))
        .route("/tours/{id}/pricing", put(tours::save_pricing))
        // Price packages
        .route("/tours/{id}/packages", get(packages::list_packages))
        .route("/tours/{id}/packages", post(packages::add_package))
        .route("/packages/{id}", put(packages::update_package))
        .route("/packages/{id}", delete(packages::delete_package))
        .route("/packages/{id}/set-default", post(packages::set_default_package))
        // Tour dates and per-date package overrides
        .route("/tours/{id}/dates", get(dates::list_dates))
        .route("/tours/{id}/dates", post(dates::create_date))
        .route("/dates/{id}", put(dates::update_date))
        .route("/dates/{id}", delete(dates::delete_date))
        .route("/dates/{id}/packages", put(dates::save_date_packages))
        // Change feed
        .route("/changes", get(changes::change_feed))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", public_routes)
        .nest("/api/admin", admin_routes)
        .with_state(state)
}

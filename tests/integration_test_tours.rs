mod common;

use axum::http::StatusCode;
use common::{create_tour, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_create_tour_derives_slug_from_title() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let tour = create_tour(&app, &token, "Encantos de Bogotá").await;
    assert_eq!(tour["slug"], "encantos-de-bogota");
    assert_eq!(tour["status"], "draft");
}

#[tokio::test]
async fn test_create_tour_requires_title() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let (status, _) = app
        .request(
            "POST",
            "/api/admin/tours",
            Some(&token),
            Some(json!({ "title": "   " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_new_tour_starts_with_one_default_package_and_no_dates() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let tour = create_tour(&app, &token, "Lost City Trek").await;
    let tour_id = tour["id"].as_str().unwrap();

    let (status, packages) = app
        .request(
            "GET",
            &format!("/api/admin/tours/{tour_id}/packages"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let packages = packages.as_array().unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0]["is_default"], true);

    let (status, dates) = app
        .request(
            "GET",
            &format!("/api/admin/tours/{tour_id}/dates"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(dates.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_slug_is_a_conflict_with_specific_message() {
    let app = TestApp::new().await;
    let token = app.login().await;

    create_tour(&app, &token, "Amazon Cruise").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/admin/tours",
            Some(&token),
            Some(json!({ "title": "Amazon Cruise" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A tour with that slug already exists");
}

#[tokio::test]
async fn test_section_saves_do_not_clobber_sibling_sections() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let tour = create_tour(&app, &token, "Patagonia Expedition").await;
    let tour_id = tour["id"].as_str().unwrap();

    // Save the Itinerary section first.
    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/admin/tours/{tour_id}/itinerary"),
            Some(&token),
            Some(json!({
                "itinerary": [
                    { "day": 1, "title": "Arrival", "description": "Transfer to camp" },
                    { "day": 2, "title": "Glacier hike", "description": "Full day on the ice" },
                ]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Then save other sections.
    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/admin/tours/{tour_id}/general"),
            Some(&token),
            Some(json!({
                "title": "Patagonia Expedition",
                "short_description": "Ten days at the end of the world",
                "featured": true,
                "status": "published",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/admin/tours/{tour_id}/inclusions"),
            Some(&token),
            Some(json!({
                "includes": ["Guide", "Meals"],
                "excludes": ["Flights"],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/admin/tours/{tour_id}/images"),
            Some(&token),
            Some(json!({
                "hero_image_url": "https://img.example.com/hero.jpg",
                "gallery_image_urls": ["https://img.example.com/1.jpg"],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Every section's fields survive every other section's save.
    let (status, tour) = app
        .request("GET", &format!("/api/admin/tours/{tour_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tour["itinerary"].as_array().unwrap().len(), 2);
    assert_eq!(tour["short_description"], "Ten days at the end of the world");
    assert_eq!(tour["featured"], true);
    assert_eq!(tour["status"], "published");
    assert_eq!(tour["includes"].as_array().unwrap().len(), 2);
    assert_eq!(tour["excludes"][0], "Flights");
    assert_eq!(tour["hero_image_url"], "https://img.example.com/hero.jpg");
    assert_eq!(tour["gallery_image_urls"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_general_save_rejects_slug_taken_by_another_tour() {
    let app = TestApp::new().await;
    let token = app.login().await;

    create_tour(&app, &token, "First Tour").await;
    let second = create_tour(&app, &token, "Second Tour").await;
    let second_id = second["id"].as_str().unwrap();

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/admin/tours/{second_id}/general"),
            Some(&token),
            Some(json!({
                "title": "Second Tour",
                "slug": "first-tour",
                "featured": false,
                "status": "draft",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A tour with that slug already exists");
}

#[tokio::test]
async fn test_delete_tour_removes_it_and_its_children() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let tour = create_tour(&app, &token, "Doomed Tour").await;
    let tour_id = tour["id"].as_str().unwrap();

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/admin/tours/{tour_id}"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request("GET", &format!("/api/admin/tours/{tour_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_routes_require_a_token() {
    let app = TestApp::new().await;

    let (status, _) = app.request("GET", "/api/admin/tours", None, None).await;
    assert!(status.is_client_error());

    let (status, _) = app
        .request("GET", "/api/admin/tours", Some("not-a-real-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_listing_filters_and_sorts() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let a = create_tour(&app, &token, "Andes Trek").await;
    create_tour(&app, &token, "Beach Escape").await;
    common::publish_tour(&app, &token, a["id"].as_str().unwrap(), "Andes Trek", None).await;

    let (status, body) = app
        .request("GET", "/api/admin/tours?search=andes", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = app
        .request("GET", "/api/admin/tours?status=draft", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let drafts = body.as_array().unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0]["title"], "Beach Escape");

    let (status, body) = app
        .request(
            "GET",
            "/api/admin/tours?sort=title&order=desc",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Beach Escape");
}

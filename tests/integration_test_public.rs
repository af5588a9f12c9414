mod common;

use axum::http::StatusCode;
use common::{create_destination, create_tour, publish_tour, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_drafts_are_invisible_to_the_public() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let draft = create_tour(&app, &token, "Hidden Draft").await;
    let slug = draft["slug"].as_str().unwrap();

    let (status, body) = app.request("GET", "/api/tours", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = app
        .request("GET", &format!("/api/tours/{slug}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_listing_cannot_opt_back_into_drafts() {
    let app = TestApp::new().await;
    let token = app.login().await;

    create_tour(&app, &token, "Still Hidden").await;

    // A status filter in the query string does not widen the view.
    let (status, body) = app
        .request("GET", "/api/tours?status=draft", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_tour_by_slug_embeds_its_destination() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let destination_id = create_destination(&app, &token, "Cartagena", "Colombia").await;
    let tour = create_tour(&app, &token, "Walled City Walk").await;
    let tour_id = tour["id"].as_str().unwrap();
    publish_tour(&app, &token, tour_id, "Walled City Walk", Some(&destination_id)).await;

    let (status, body) = app
        .request("GET", "/api/tours/walled-city-walk", None, None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["title"], "Walled City Walk");
    assert_eq!(body["destination"]["name"], "Cartagena");
    assert_eq!(body["destination"]["country"], "Colombia");
}

#[tokio::test]
async fn test_public_packages_are_active_only_and_sorted() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let tour = create_tour(&app, &token, "Package Showcase").await;
    let tour_id = tour["id"].as_str().unwrap();
    publish_tour(&app, &token, tour_id, "Package Showcase", None).await;

    let (status, _) = app
        .request(
            "POST",
            &format!("/api/admin/tours/{tour_id}/packages"),
            Some(&token),
            Some(json!({ "name": "Premium", "adult_price": 300.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, retired) = app
        .request(
            "POST",
            &format!("/api/admin/tours/{tour_id}/packages"),
            Some(&token),
            Some(json!({ "name": "Retired", "adult_price": 50.0, "is_active": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(retired["is_active"], false);

    let (status, body) = app
        .request("GET", "/api/tours/package-showcase/packages", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let packages = body.as_array().unwrap();
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0]["name"], "Standard");
    assert_eq!(packages[1]["name"], "Premium");
}

#[tokio::test]
async fn test_inactive_packages_do_not_set_the_starting_price() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let tour = create_tour(&app, &token, "Starting Price Tour").await;
    let tour_id = tour["id"].as_str().unwrap();
    publish_tour(&app, &token, tour_id, "Starting Price Tour", None).await;

    // Reprice the seeded Standard package, then add a cheaper inactive one.
    let (_, packages) = app
        .request(
            "GET",
            &format!("/api/admin/tours/{tour_id}/packages"),
            Some(&token),
            None,
        )
        .await;
    let standard_id = packages[0]["id"].as_str().unwrap();
    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/admin/packages/{standard_id}"),
            Some(&token),
            Some(json!({ "name": "Standard", "adult_price": 90.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .request(
            "POST",
            &format!("/api/admin/tours/{tour_id}/packages"),
            Some(&token),
            Some(json!({ "name": "Retired", "adult_price": 10.0, "is_active": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request("GET", "/api/tours/starting-price-tour", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["starting_price_from"], 90.0);
}

#[tokio::test]
async fn test_related_tours_split_by_destination_with_limits() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let home = create_destination(&app, &token, "Medellín", "Colombia").await;
    let away = create_destination(&app, &token, "Quito", "Ecuador").await;

    let anchor = create_tour(&app, &token, "Anchor Tour").await;
    publish_tour(&app, &token, anchor["id"].as_str().unwrap(), "Anchor Tour", Some(&home)).await;

    for i in 0..4 {
        let title = format!("Home Tour {i}");
        let t = create_tour(&app, &token, &title).await;
        publish_tour(&app, &token, t["id"].as_str().unwrap(), &title, Some(&home)).await;
    }
    for i in 0..5 {
        let title = format!("Away Tour {i}");
        let t = create_tour(&app, &token, &title).await;
        publish_tour(&app, &token, t["id"].as_str().unwrap(), &title, Some(&away)).await;
    }

    let (status, body) = app
        .request("GET", "/api/tours/anchor-tour/related", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let same = body["same_destination"].as_array().unwrap();
    assert_eq!(same.len(), 3);
    assert!(same.iter().all(|t| t["title"] != "Anchor Tour"));

    let other = body["other_destinations"].as_array().unwrap();
    assert_eq!(other.len(), 4);
    assert!(other
        .iter()
        .all(|t| t["title"].as_str().unwrap().starts_with("Away")));
}

#[tokio::test]
async fn test_public_listing_filters_by_destination_and_search() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let coast = create_destination(&app, &token, "Santa Marta", "Colombia").await;
    let a = create_tour(&app, &token, "Tayrona Hike").await;
    publish_tour(&app, &token, a["id"].as_str().unwrap(), "Tayrona Hike", Some(&coast)).await;
    let b = create_tour(&app, &token, "Coffee Farm Visit").await;
    publish_tour(&app, &token, b["id"].as_str().unwrap(), "Coffee Farm Visit", None).await;

    let (status, body) = app
        .request(
            "GET",
            &format!("/api/tours?destination_id={coast}"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let tours = body.as_array().unwrap();
    assert_eq!(tours.len(), 1);
    assert_eq!(tours[0]["title"], "Tayrona Hike");

    let (status, body) = app
        .request("GET", "/api/tours?search=coffee", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_public_destination_list_is_alphabetical() {
    let app = TestApp::new().await;
    let token = app.login().await;

    create_destination(&app, &token, "Zipaquirá", "Colombia").await;
    create_destination(&app, &token, "Armenia", "Colombia").await;

    let (status, body) = app.request("GET", "/api/destinations", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Armenia", "Zipaquirá"]);
}

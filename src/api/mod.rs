//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api/v1`.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    use super::build_router;
    use crate::app_state::AppState;
    use crate::domain::{
        ActivityLog, CommunityBoard, EventBus, Ledger, RideRegistry, UserDirectory,
    };
    use crate::service::{MobilityService, WalletService};

    fn test_app() -> Router {
        let event_bus = EventBus::new(64);
        let ledger = Arc::new(Ledger::new());
        let wallet_service = Arc::new(WalletService::new(Arc::clone(&ledger), event_bus.clone()));
        let mobility_service = Arc::new(MobilityService::new(
            Arc::new(RideRegistry::new()),
            Arc::clone(&ledger),
            event_bus.clone(),
        ));
        let state = AppState {
            wallet_service,
            mobility_service,
            users: Arc::new(UserDirectory::new()),
            community: Arc::new(CommunityBoard::new()),
            esg: Arc::new(ActivityLog::new()),
            event_bus,
        };
        build_router().with_state(state)
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        let Ok(request) = Request::builder().method(method).uri(uri).body(Body::empty()) else {
            panic!("failed to build {method} {uri}");
        };
        request
    }

    fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
        let Ok(request) = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("failed to build {method} {uri}");
        };
        request
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let Ok(response) = app.clone().oneshot(request).await else {
            panic!("request did not complete");
        };
        let status = response.status();
        let Ok(collected) = response.into_body().collect().await else {
            panic!("failed to read response body");
        };
        let body = String::from_utf8_lossy(&collected.to_bytes()).into_owned();
        (status, body)
    }

    /// Registers `rider@beryl.africa`, which also opens wallet account 1.
    async fn register_rider(app: &Router) -> String {
        let (status, body) = send(
            app,
            json_request(
                "POST",
                "/api/v1/users/register",
                &json!({"email": "rider@beryl.africa", "password": "s3cret!"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn health_reports_service_version() {
        let app = test_app();
        let (status, body) = send(&app, empty_request("GET", "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"healthy\""));
        assert!(body.contains("\"version\":"));
    }

    #[tokio::test]
    async fn ride_status_catalog_marks_assignable_statuses() {
        let app = test_app();
        let (status, body) = send(&app, empty_request("GET", "/config/ride-statuses")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"payment_failed\""));
        assert!(body.contains("\"assignable\":true"));
        assert!(body.contains("\"terminal\":true"));
    }

    #[tokio::test]
    async fn register_creates_user_and_opens_wallet() {
        let app = test_app();
        let body = register_rider(&app).await;
        assert!(body.contains("\"status\":\"success\",\"user_id\":1,\"account_id\":1"));

        let (status, body) = send(&app, empty_request("GET", "/api/v1/wallet/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"balance\":\"0\""));

        // Same email again.
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/users/register",
                &json!({"email": "rider@beryl.africa", "password": "other"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("\"code\":1003"));
    }

    #[tokio::test]
    async fn login_checks_credentials() {
        let app = test_app();
        let _ = register_rider(&app).await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/users/login",
                &json!({"email": "rider@beryl.africa", "password": "s3cret!"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"success\""));
        assert!(body.contains("\"token\":\""));

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/users/login",
                &json!({"email": "rider@beryl.africa", "password": "wrong"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("\"code\":1004"));
    }

    #[tokio::test]
    async fn profile_updates_merge_and_clear() {
        let app = test_app();
        let _ = register_rider(&app).await;

        let (status, body) = send(
            &app,
            json_request(
                "PATCH",
                "/api/v1/users/1/profile",
                &json!({"display_name": "Awa", "phone": "+221770000000"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"display_name\":\"Awa\""));
        assert!(body.contains("\"phone\":\"+221770000000\""));

        // Present-but-empty clears the phone, absent display name stays.
        let (status, body) = send(
            &app,
            json_request("PATCH", "/api/v1/users/1/profile", &json!({"phone": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"phone\":null"));
        assert!(body.contains("\"display_name\":\"Awa\""));

        let (status, body) = send(
            &app,
            json_request("PATCH", "/api/v1/users/1/profile", &json!({"phone": "123"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("\"code\":1003"));

        let (status, body) = send(
            &app,
            empty_request(
                "POST",
                "/api/v1/users/1/avatar?url=https://cdn.beryl.africa/a.png",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"avatar_url\":\"https://cdn.beryl.africa/a.png\""));

        let (status, body) = send(&app, empty_request("GET", "/api/v1/users/99/profile")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("\"code\":2003"));
    }

    #[tokio::test]
    async fn wallet_operations_over_http() {
        let app = test_app();
        let _ = register_rider(&app).await;

        let (status, body) = send(
            &app,
            json_request("POST", "/api/v1/wallet/1/deposit", &json!({"amount": 1000})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"balance\":\"1000\""));

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/wallet/1/withdraw",
                &json!({"amount": 250, "description": "Achat casque"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"balance\":\"750\""));

        let (status, body) = send(
            &app,
            json_request("POST", "/api/v1/wallet/1/deposit", &json!({"amount": -5})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("\"code\":1001"));

        let (status, body) = send(
            &app,
            json_request("POST", "/api/v1/wallet/1/withdraw", &json!({"amount": 5000})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("\"code\":4001"));

        let (status, body) = send(&app, empty_request("GET", "/api/v1/wallet/1/transactions")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"type\":\"deposit\""));
        assert!(body.contains("\"type\":\"withdraw\""));
        assert!(body.contains("Dépôt BerylPay"));
        assert!(body.contains("Achat casque"));

        let (status, body) = send(&app, empty_request("GET", "/api/v1/wallet/77")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("\"code\":2001"));
    }

    #[tokio::test]
    async fn ride_lifecycle_settles_the_fare() {
        let app = test_app();
        let _ = register_rider(&app).await;
        let _ = send(
            &app,
            json_request("POST", "/api/v1/wallet/1/deposit", &json!({"amount": 2000})),
        )
        .await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/mobility/rides",
                &json!({
                    "account_id": 1,
                    "pickup": "  Gare de Dakar  ",
                    "destination": "Aéroport AIBD",
                    "estimated_fare": 1500
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.contains("\"status\":\"requested\""));
        assert!(body.contains("\"pickup\":\"Gare de Dakar\""));

        let (status, body) = send(
            &app,
            empty_request("POST", "/api/v1/mobility/rides/1/assign?driver_id=7"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"assigned\""));
        assert!(body.contains("\"driver_id\":7,"));

        let (status, body) = send(&app, empty_request("POST", "/api/v1/mobility/rides/1/start")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"in_progress\""));

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/mobility/rides/1/complete",
                &json!({"actual_fare": 1400, "distance_km": 9.5, "duration_min": 25}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"completed\""));
        assert!(body.contains("\"actual_fare\":\"1400\""));

        let (status, body) = send(&app, empty_request("GET", "/api/v1/wallet/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"balance\":\"600\""));

        let (_, body) = send(&app, empty_request("GET", "/api/v1/wallet/1/transactions")).await;
        assert!(body.contains("Paiement trajet #1"));
    }

    #[tokio::test]
    async fn declined_settlement_returns_payment_required() {
        let app = test_app();
        let _ = register_rider(&app).await;
        let _ = send(
            &app,
            json_request("POST", "/api/v1/wallet/1/deposit", &json!({"amount": 500})),
        )
        .await;
        let _ = send(
            &app,
            json_request(
                "POST",
                "/api/v1/mobility/rides",
                &json!({
                    "account_id": 1,
                    "pickup": "Plateau",
                    "destination": "Ouakam",
                    "estimated_fare": 1000
                }),
            ),
        )
        .await;
        let _ = send(
            &app,
            empty_request("POST", "/api/v1/mobility/rides/1/assign?driver_id=3"),
        )
        .await;
        let _ = send(&app, empty_request("POST", "/api/v1/mobility/rides/1/start")).await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/mobility/rides/1/complete",
                &json!({"actual_fare": 1200, "distance_km": 6.1, "duration_min": 19}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert!(body.contains("\"code\":4002"));

        let (status, body) = send(&app, empty_request("GET", "/api/v1/mobility/rides/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"payment_failed\""));
        assert!(body.contains("\"actual_fare\":\"1200\""));

        // Top up and retry. The recorded fare is charged, not the resubmitted one.
        let _ = send(
            &app,
            json_request("POST", "/api/v1/wallet/1/deposit", &json!({"amount": 1000})),
        )
        .await;
        let _ = send(
            &app,
            empty_request("POST", "/api/v1/mobility/rides/1/assign?driver_id=4"),
        )
        .await;
        let _ = send(&app, empty_request("POST", "/api/v1/mobility/rides/1/start")).await;
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/mobility/rides/1/complete",
                &json!({"actual_fare": 1, "distance_km": 0, "duration_min": 0}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"completed\""));
        assert!(body.contains("\"actual_fare\":\"1200\""));

        let (_, body) = send(&app, empty_request("GET", "/api/v1/wallet/1")).await;
        assert!(body.contains("\"balance\":\"300\""));
    }

    #[tokio::test]
    async fn completing_an_unstarted_ride_conflicts() {
        let app = test_app();
        let _ = register_rider(&app).await;
        let _ = send(
            &app,
            json_request(
                "POST",
                "/api/v1/mobility/rides",
                &json!({
                    "account_id": 1,
                    "pickup": "A",
                    "destination": "B",
                    "estimated_fare": 100
                }),
            ),
        )
        .await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/mobility/rides/1/complete",
                &json!({"actual_fare": 100, "distance_km": 1, "duration_min": 5}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.contains("\"code\":2005"));
    }

    #[tokio::test]
    async fn ride_listing_filters_and_paginates() {
        let app = test_app();
        let _ = register_rider(&app).await;
        for destination in ["Ouakam", "Yoff", "Ngor"] {
            let _ = send(
                &app,
                json_request(
                    "POST",
                    "/api/v1/mobility/rides",
                    &json!({
                        "account_id": 1,
                        "pickup": "Plateau",
                        "destination": destination,
                        "estimated_fare": 700
                    }),
                ),
            )
            .await;
        }

        let (status, body) = send(
            &app,
            empty_request("GET", "/api/v1/mobility/rides?account_id=1&limit=2"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"total\":3"));
        assert!(body.contains("\"limit\":2"));

        let (status, body) = send(
            &app,
            empty_request("GET", "/api/v1/mobility/rides?status=assigned"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"data\":[]"));

        let (status, body) = send(
            &app,
            empty_request("GET", "/api/v1/mobility/rides?status=warp"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("\"code\":1003"));
    }

    #[tokio::test]
    async fn community_posts_comments_and_likes() {
        let app = test_app();
        let _ = register_rider(&app).await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/community/posts",
                &json!({"user_id": 1, "content": "  Premier trajet en Beryl !  "}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.contains("\"content\":\"Premier trajet en Beryl !\""));

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/community/posts",
                &json!({"user_id": 9, "content": "fantôme"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("\"code\":2003"));

        let (status, body) = send(&app, empty_request("GET", "/api/v1/community/feed")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Premier trajet en Beryl !"));

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/community/posts/1/comments",
                &json!({"user_id": 1, "text": "bravo"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.contains("\"text\":\"bravo\""));

        let (status, body) = send(
            &app,
            empty_request("GET", "/api/v1/community/posts/1/comments"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"text\":\"bravo\""));

        let (status, body) = send(
            &app,
            empty_request("POST", "/api/v1/community/posts/1/like?user_id=1"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"likes\":1"));

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/community/posts/99/comments",
                &json!({"user_id": 1, "text": "où ?"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("\"code\":2004"));
    }

    #[tokio::test]
    async fn esg_records_history_and_summary() {
        let app = test_app();
        let _ = register_rider(&app).await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/esg/activity",
                &json!({"user_id": 1, "activity_type": "walk", "distance_km": 10}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.contains("\"activity_type\":\"walk\""));
        assert!(body.contains("\"co2_saved_kg\":\"1.920\""));

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/esg/activity",
                &json!({"user_id": 1, "activity_type": "jetski", "distance_km": 3}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("\"code\":1003"));

        let (status, body) = send(&app, empty_request("GET", "/api/v1/esg/history/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"activity_type\":\"walk\""));

        let (status, body) = send(&app, empty_request("GET", "/api/v1/esg/summary/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"total_distance_km\":\"10\""));
        assert!(body.contains("\"total_co2_saved_kg\":\"1.920\""));
        assert!(body.contains("\"activities_count\":1"));

        let (status, body) = send(&app, empty_request("GET", "/api/v1/esg/summary/9")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("\"code\":2003"));
    }

    #[tokio::test]
    async fn unknown_routes_and_malformed_json_are_client_errors() {
        let app = test_app();

        let (status, _) = send(&app, empty_request("GET", "/api/v1/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let Ok(request) = Request::builder()
            .method("POST")
            .uri("/api/v1/users/register")
            .header("content-type", "application/json")
            .body(Body::from("{ not json"))
        else {
            panic!("failed to build request");
        };
        let (status, _) = send(&app, request).await;
        assert!(status.is_client_error());
    }
}

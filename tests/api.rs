//! HTTP tests: routes mounted the same way the `web` binary mounts them.

use actix_web::{http::StatusCode, test, App};
use bracket_tournament_web::http::{configure, new_state, remove_inactive, ROLE_HEADER};
use serde_json::{json, Value};
use std::time::Duration;

const ORGANIZER: (&str, &str) = (ROLE_HEADER, "organizer");

#[actix_web::test]
async fn health_is_ok() {
    let app = test::init_service(App::new().app_data(new_state()).configure(configure)).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
}

#[actix_web::test]
async fn organizer_runs_group_stage_and_advances() {
    let app = test::init_service(App::new().app_data(new_state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .insert_header(ORGANIZER)
        .set_json(json!({ "name": "Spring Cup" }))
        .to_request();
    let t: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(t["name"], "Spring Cup");
    let id = t["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/teams/import"))
        .insert_header(ORGANIZER)
        .set_payload("name\nA\nB\nC\n")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/teams"))
        .insert_header(ORGANIZER)
        .set_json(json!({ "name": "D" }))
        .to_request();
    let t: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(t["teams"].as_array().unwrap().len(), 4);

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/stages/group"))
        .insert_header(ORGANIZER)
        .to_request();
    let overview: Value = test::call_and_read_body_json(&app, req).await;
    let group = overview["stages"][0]["matches"].as_array().unwrap().clone();
    assert_eq!(group.len(), 6);
    assert_eq!(overview["stages"][0]["status"], "pending");

    for m in &group {
        let match_id = m["id"].as_str().unwrap();
        let base = format!("/api/tournaments/{id}/matches/{match_id}");
        let req = test::TestRequest::post()
            .uri(&format!("{base}/start"))
            .insert_header(ORGANIZER)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = test::TestRequest::put()
            .uri(&format!("{base}/score"))
            .insert_header(ORGANIZER)
            .set_json(json!({ "score1": 3, "score2": 1 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        let req = test::TestRequest::post()
            .uri(&format!("{base}/finish"))
            .insert_header(ORGANIZER)
            .to_request();
        let finished: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(finished["status"], "finished");
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{id}/bracket"))
        .to_request();
    let overview: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(overview["can_advance"], true);
    assert_eq!(overview["status_label"], "Group Stage - Complete");

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/stages/advance"))
        .insert_header(ORGANIZER)
        .to_request();
    let overview: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(overview["stages"][1]["matches"].as_array().unwrap().len(), 2);
    assert_eq!(overview["can_advance"], false);

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/stages/advance"))
        .insert_header(ORGANIZER)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn spectators_are_read_only() {
    let app = test::init_service(App::new().app_data(new_state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Cup" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .insert_header(ORGANIZER)
        .to_request();
    let t: Value = test::call_and_read_body_json(&app, req).await;
    let id = t["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/teams"))
        .insert_header((ROLE_HEADER, "spectator"))
        .set_json(json!({ "name": "A" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn validation_failures_are_bad_requests() {
    let app = test::init_service(App::new().app_data(new_state()).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .insert_header(ORGANIZER)
        .to_request();
    let t: Value = test::call_and_read_body_json(&app, req).await;
    let id = t["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/stages/group"))
        .insert_header(ORGANIZER)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("at least 2 teams"));

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/matches/{}/start", uuid::Uuid::new_v4()))
        .insert_header(ORGANIZER)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unknown_tournament_is_not_found() {
    let app = test::init_service(App::new().app_data(new_state()).configure(configure)).await;
    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{}/bracket", uuid::Uuid::new_v4()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn inactive_tournaments_are_removed() {
    let state = new_state();
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .insert_header(ORGANIZER)
        .to_request();
    let _: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(remove_inactive(&state, Duration::from_secs(3600)), 0);
    assert_eq!(remove_inactive(&state, Duration::ZERO), 1);
    assert!(state.read().unwrap().is_empty());
}

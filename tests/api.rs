mod common;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web::Data};
use common::{memory_pool, test_config};
use leave_desk::routes;
use serde_json::{Value, json};
use std::net::SocketAddr;

fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

macro_rules! app {
    ($pool:expr) => {{
        let config = test_config();
        test::init_service(
            App::new()
                .app_data(Data::new($pool.clone()))
                .app_data(Data::new(config.clone()))
                .configure(|cfg| routes::configure(cfg, &config)),
        )
        .await
    }};
}

macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.peer_addr(peer()).to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        let value: Value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }};
}

macro_rules! login {
    ($app:expr, $user:expr) => {{
        let (status, body) = call!(
            $app,
            test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({"username": $user, "password": format!("{}-pw", $user)}))
        );
        assert_eq!(status, StatusCode::OK, "{body}");
        format!("Bearer {}", body["access_token"].as_str().unwrap())
    }};
}

#[actix_web::test]
async fn full_leave_lifecycle_over_http() {
    let pool = memory_pool().await;
    let app = app!(pool);

    let (status, grace) = call!(
        app,
        test::TestRequest::post().uri("/auth/register").set_json(json!({
            "name": "Grace", "email": "grace@company.com", "password": "Grace-pw",
            "role": "Manager", "manager_id": null
        }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, managers) = call!(app, test::TestRequest::get().uri("/auth/managers"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(managers[0]["name"], "Grace");

    let (status, _) = call!(
        app,
        test::TestRequest::post().uri("/auth/register").set_json(json!({
            "name": "Ada", "email": "ada@company.com", "password": "Ada-pw",
            "role": "Employee", "manager_id": grace["id"]
        }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let ada = login!(app, "Ada");
    let grace_token = login!(app, "Grace");

    let (status, me) = call!(
        app,
        test::TestRequest::get().uri("/api/me").insert_header((header::AUTHORIZATION, ada.clone()))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "Employee");

    let (status, submitted) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/leave")
            .insert_header((header::AUTHORIZATION, ada.clone()))
            .set_json(json!({"leave_type": "Sick", "application_date": "2026-03-02", "comment": "flu"}))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(submitted["remaining_quota"], 9);
    let id = submitted["id"].as_i64().unwrap();

    let (status, quota) = call!(
        app,
        test::TestRequest::get().uri("/api/leave/quota").insert_header((header::AUTHORIZATION, ada.clone()))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quota["remaining_quota"], 9);

    let (status, pending) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/leave/pending")
            .insert_header((header::AUTHORIZATION, grace_token.clone()))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending[0]["employee_name"], "Ada");

    let (status, decided) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/leave/{id}/approve"))
            .insert_header((header::AUTHORIZATION, grace_token.clone()))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decided["status"], "Approved");

    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/leave/{id}/reject"))
            .insert_header((header::AUTHORIZATION, grace_token.clone()))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already been decided"));

    let (status, own) = call!(
        app,
        test::TestRequest::get().uri("/api/leave").insert_header((header::AUTHORIZATION, ada.clone()))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(own[0]["status"], "Approved");
    assert_eq!(own[0]["comment"], "flu");

    let (status, history) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/leave/history")
            .insert_header((header::AUTHORIZATION, grace_token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);

    let (status, _) = call!(app, test::TestRequest::post().uri("/auth/logout"));
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn errors_map_to_distinct_statuses() {
    let pool = memory_pool().await;
    let grace = common::manager(&pool, "Grace").await;
    common::employee(&pool, "Ada", &grace).await;
    let app = app!(pool);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"username": "Ada", "password": "nope"}))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, _) = call!(app, test::TestRequest::get().uri("/api/leave"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/leave")
            .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let ada = login!(app, "Ada");
    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/leave/pending")
            .insert_header((header::AUTHORIZATION, ada.clone()))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call!(
        app,
        test::TestRequest::get().uri("/api/leave/77").insert_header((header::AUTHORIZATION, ada))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call!(
        app,
        test::TestRequest::post().uri("/auth/register").set_json(json!({
            "name": "Dup", "email": "grace@company.com", "password": "pw",
            "role": "Manager", "manager_id": null
        }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("Email already exists"));

    let (status, _) = call!(
        app,
        test::TestRequest::post().uri("/auth/register").set_json(json!({
            "name": "Ken", "email": "ken@company.com", "password": "pw",
            "role": "Employee", "manager_id": null
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

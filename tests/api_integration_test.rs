//! End-to-end tests against a live MongoDB instance.
//!
//! Each test is skipped when `TEST_MONGO_URI` is unset or the server is
//! unreachable, so the suite stays green in environments without a database.

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Database};
use serde_json::Value;
use tower::util::ServiceExt;

use exercise_tracker::api::routes::create_routes;
use exercise_tracker::services::user_service::CreateUserError;
use exercise_tracker::services::UserService;

const FORM: &str = "application/x-www-form-urlencoded";

/// Fresh, empty database per test, or `None` when no test server is around.
async fn test_db(name: &str) -> Option<Database> {
    let uri = std::env::var("TEST_MONGO_URI").ok()?;
    let client = Client::with_uri_str(&uri).await.ok()?;
    let db = client.database(&format!("exercise_tracker_test_{name}"));
    db.run_command(doc! { "ping": 1 }).await.ok()?;
    db.drop().await.ok()?;
    Some(db)
}

async fn post_form(app: &axum::Router, path: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(CONTENT_TYPE, FORM)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(app: &axum::Router, path: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn duplicate_usernames_are_rejected_without_a_second_record() {
    let Some(db) = test_db("duplicate").await else {
        eprintln!("skipping: TEST_MONGO_URI not set or unreachable");
        return;
    };
    let users = UserService::new(&db);
    users.ensure_indexes().await.unwrap();

    users.create_user("alice").await.unwrap();
    match users.create_user("alice").await {
        Err(CreateUserError::Duplicate { code }) => assert_eq!(code, 11000),
        other => panic!("expected a duplicate-key failure, got {other:?}"),
    }

    assert_eq!(users.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn listed_users_have_distinct_nonempty_ids() {
    let Some(db) = test_db("listing").await else {
        eprintln!("skipping: TEST_MONGO_URI not set or unreachable");
        return;
    };
    let users = UserService::new(&db);
    users.ensure_indexes().await.unwrap();

    users.create_user("alice").await.unwrap();
    users.create_user("bob").await.unwrap();

    let listed = users.list_users().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|user| !user.id.is_empty()));
    assert_ne!(listed[0].id, listed[1].id);
}

#[tokio::test]
async fn add_exercise_for_unknown_user_writes_nothing() {
    let Some(db) = test_db("unknown_user").await else {
        eprintln!("skipping: TEST_MONGO_URI not set or unreachable");
        return;
    };
    let app = create_routes(db.clone());

    let (status, body) = post_form(
        &app,
        "/api/exercise/add",
        "userId=nosuchuser&description=run&duration=30",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Could not add exercise. See error code for details"
    );

    let stored = db
        .collection::<Document>("exercises")
        .count_documents(doc! {})
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn omitted_date_defaults_to_now() {
    let Some(db) = test_db("default_date").await else {
        eprintln!("skipping: TEST_MONGO_URI not set or unreachable");
        return;
    };
    let app = create_routes(db.clone());

    let (_, user) = post_form(&app, "/api/exercise/new-user", "username=alice").await;
    let user_id = user["_id"].as_str().unwrap();

    let before = Utc::now();
    let (status, _) = post_form(
        &app,
        "/api/exercise/add",
        &format!("userId={user_id}&description=run&duration=30"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let stored = db
        .collection::<Document>("exercises")
        .find_one(doc! {})
        .await
        .unwrap()
        .unwrap();
    let date = stored.get_datetime("date").unwrap().to_chrono();
    let elapsed = (date - before).num_seconds().abs();
    assert!(elapsed <= 5, "stored date {date} not close to now");
}

#[tokio::test]
async fn fractional_durations_are_stored_and_echoed() {
    let Some(db) = test_db("fractional").await else {
        eprintln!("skipping: TEST_MONGO_URI not set or unreachable");
        return;
    };
    let app = create_routes(db);

    let (_, user) = post_form(&app, "/api/exercise/new-user", "username=alice").await;
    let user_id = user["_id"].as_str().unwrap();

    let (status, added) = post_form(
        &app,
        "/api/exercise/add",
        &format!("userId={user_id}&description=jog&duration=30.5&date=2023-01-15"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["duration"], 30.5);

    let (_, log) = get_json(&app, &format!("/api/exercise/log?userId={user_id}")).await;
    assert_eq!(log["count"], 1);
    assert_eq!(log["log"][0]["duration"], 30.5);
}

#[tokio::test]
async fn log_round_trip_with_window_and_limit() {
    let Some(db) = test_db("log_query").await else {
        eprintln!("skipping: TEST_MONGO_URI not set or unreachable");
        return;
    };
    let app = create_routes(db);

    let (_, user) = post_form(&app, "/api/exercise/new-user", "username=alice").await;
    assert_eq!(user["username"], "alice");
    let user_id = user["_id"].as_str().unwrap().to_string();

    let (status, added) = post_form(
        &app,
        "/api/exercise/add",
        &format!("userId={user_id}&description=run&duration=30&date=2023-01-15"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        added,
        serde_json::json!({
            "_id": user_id,
            "username": "alice",
            "description": "run",
            "duration": 30,
            "date": "Sun Jan 15 2023",
        })
    );
    for (description, date) in [("swim", "2023-01-20"), ("row", "2023-02-10")] {
        post_form(
            &app,
            "/api/exercise/add",
            &format!("userId={user_id}&description={description}&duration=30&date={date}"),
        )
        .await;
    }

    // No filters: full history, most recent first, from/to keys absent.
    let (status, log) = get_json(&app, &format!("/api/exercise/log?userId={user_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(log["count"], 3);
    assert!(log["from"].is_null() && !log.as_object().unwrap().contains_key("from"));
    let descriptions: Vec<&str> = log["log"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["description"].as_str().unwrap())
        .collect();
    assert_eq!(descriptions, vec!["row", "swim", "run"]);

    // Window plus limit: bounds are exclusive and rendered in the response.
    let (_, log) = get_json(
        &app,
        &format!("/api/exercise/log?userId={user_id}&from=2023-01-15&to=2023-01-31&limit=1"),
    )
    .await;
    assert_eq!(log["count"], 1);
    assert_eq!(log["from"], "Sun Jan 15 2023");
    assert_eq!(log["to"], "Tue Jan 31 2023");
    // 2023-01-15 itself is excluded by the strict lower bound.
    assert_eq!(log["log"][0]["description"], "swim");

    // Garbage bound: treated as absent, never an error.
    let (status, log) = get_json(
        &app,
        &format!("/api/exercise/log?userId={user_id}&from=garbage"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(log["count"], 3);
    assert!(!log.as_object().unwrap().contains_key("from"));

    // Unknown user rides the hard channel.
    let (status, _) = get_json(&app, "/api/exercise/log?userId=nosuchuser").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Unknown routes fall through to the plain-text 404.
    let (status, _) = get_json(&app, "/api/exercise/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

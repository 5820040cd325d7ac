//! Board API integration tests
//!
//! Drives the full router (middleware, handlers, board service, in-memory
//! store) through `tower::ServiceExt::oneshot`.

mod common;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{TestApp, TestUser};

fn ids(sequence: &Value) -> Vec<String> {
    sequence["ids"]
        .as_array()
        .expect("sequence ids")
        .iter()
        .map(|id| id.as_str().expect("id is a string").to_string())
        .collect()
}

fn id_of(body: &Value, key: &str) -> String {
    body[key]["id"].as_str().expect("document id").to_string()
}

async fn create_board(app: &TestApp, owner: &TestUser, members: &[&TestUser]) -> String {
    let members: Vec<String> = members.iter().map(|user| user.id.to_string()).collect();
    let (status, body) = app
        .post("/boards", &owner.token, json!({ "name": "Sprint", "description": "Q3", "members": members }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    id_of(&body, "board")
}

async fn create_column(app: &TestApp, user: &TestUser, board: &str, title: &str) -> String {
    let (status, body) = app
        .post(&format!("/boards/{}/columns", board), &user.token, json!({ "title": title }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    id_of(&body, "column")
}

async fn create_task(app: &TestApp, user: &TestUser, board: &str, column: &str, title: &str) -> String {
    let (status, body) = app
        .post(
            &format!("/boards/{}/columns/{}/tasks", board, column),
            &user.token,
            json!({ "title": title, "description": "details", "dueDate": "2030-01-01T00:00:00Z" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    id_of(&body, "task")
}

async fn task_titles(app: &TestApp, user: &TestUser, board: &str, column: &str) -> Vec<String> {
    let (status, body) = app
        .get(&format!("/boards/{}/columns/{}/tasks", board, column), &user.token)
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .map(|task| task["title"].as_str().expect("title").to_string())
        .collect()
}

#[tokio::test]
async fn test_register_login_and_profile() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;

    let (status, body) = app.get("/users/profile", &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], alice.email.as_str());
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());

    let (status, body) = app
        .put("/users/profile", &alice.token, json!({ "username": "Alice A." }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "Alice A.");
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;

    let response = app
        .request(
            Method::POST,
            "/users/register",
            None,
            Some(json!({ "username": "again", "email": alice.email, "password": "password123" })),
        )
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST, "ValidationError");
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/users/login",
            None,
            Some(json!({ "email": alice.email, "password": "not-the-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/boards", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized: No token provided");

    let (status, body) = app.get("/boards", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized: Invalid token");
}

#[tokio::test]
async fn test_deleted_account_token_rejected() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;

    let (status, _) = app.delete("/users/profile", &alice.token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/boards", &alice.token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized: User not found");
}

#[tokio::test]
async fn test_unknown_route_and_health() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "API route not found" }));

    let (status, body) = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "store": "memory", "sessions": 0 }));
}

#[tokio::test]
async fn test_board_visibility_and_roles() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;
    let bob = app.create_test_user("bob").await;
    let eve = app.create_test_user("eve").await;
    let board = create_board(&app, &alice, &[&bob]).await;

    let (status, body) = app.get("/boards", &bob.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["boards"].as_array().map(Vec::len), Some(1));

    let (_, body) = app.get("/boards", &eve.token).await;
    assert_eq!(body["boards"], json!([]));

    let response = app.get(&format!("/boards/{}", board), &eve.token).await;
    assert_api_error!(response, StatusCode::FORBIDDEN, "AccessDenied");

    // members edit content but not structure
    let column = create_column(&app, &bob, &board, "To Do").await;
    let response = app
        .put(&format!("/boards/{}/columns", board), &bob.token, json!({ "columns": [column] }))
        .await;
    assert_api_error!(response, StatusCode::FORBIDDEN, "AccessDenied");

    let response = app
        .put(&format!("/boards/{}", board), &bob.token, json!({ "name": "Mine now" }))
        .await;
    assert_api_error!(response, StatusCode::FORBIDDEN, "AccessDenied");

    let response = app.delete(&format!("/boards/{}", board), &bob.token).await;
    assert_api_error!(response, StatusCode::FORBIDDEN, "AccessDenied");
}

#[tokio::test]
async fn test_update_board_members() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;
    let bob = app.create_test_user("bob").await;
    let board = create_board(&app, &alice, &[&bob]).await;

    let (status, body) = app
        .put(&format!("/boards/{}", board), &alice.token, json!({ "name": "  Renamed  ", "members": [] }))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["board"]["name"], "Renamed");
    assert_eq!(body["board"]["members"], json!([alice.id.to_string()]));

    let response = app.get(&format!("/boards/{}", board), &bob.token).await;
    assert_api_error!(response, StatusCode::FORBIDDEN, "AccessDenied");

    let (_, body) = app.get("/users/profile", &bob.token).await;
    assert_eq!(body["boards"], json!([]));
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;

    let response = app.post("/boards", &alice.token, json!({ "name": "   " })).await;
    assert_api_error!(response, StatusCode::BAD_REQUEST, "ValidationError");

    let board = create_board(&app, &alice, &[]).await;
    let column = create_column(&app, &alice, &board, "To Do").await;
    let response = app
        .post(
            &format!("/boards/{}/columns/{}/tasks", board, column),
            &alice.token,
            json!({ "title": "No due date", "description": "x" }),
        )
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST, "ValidationError");
}

#[tokio::test]
async fn test_move_task_across_columns() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;
    let board = create_board(&app, &alice, &[]).await;
    let todo = create_column(&app, &alice, &board, "To Do").await;
    let doing = create_column(&app, &alice, &board, "Doing").await;
    let t1 = create_task(&app, &alice, &board, &todo, "T1").await;
    create_task(&app, &alice, &board, &todo, "T2").await;
    create_task(&app, &alice, &board, &todo, "T3").await;
    create_task(&app, &alice, &board, &doing, "D1").await;

    let (status, body) = app
        .put(
            &format!("/boards/{}/tasks/{}/move", board, t1),
            &alice.token,
            json!({ "targetColumnId": doing, "targetIndex": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["targetIndex"], 0);
    assert_eq!(body["task"]["columnId"], doing.as_str());
    assert_eq!(ids(&body["targetColumn"]["tasks"])[0], t1);
    assert!(!ids(&body["sourceColumn"]["tasks"]).contains(&t1));

    assert_eq!(task_titles(&app, &alice, &board, &todo).await, vec!["T2", "T3"]);
    assert_eq!(task_titles(&app, &alice, &board, &doing).await, vec!["T1", "D1"]);

    // the task now lives under its new column
    let (status, _) = app
        .get(&format!("/boards/{}/columns/{}/tasks/{}", board, doing, t1), &alice.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let response = app
        .get(&format!("/boards/{}/columns/{}/tasks/{}", board, todo, t1), &alice.token)
        .await;
    assert_api_error!(response, StatusCode::NOT_FOUND, "NotFound");
}

#[tokio::test]
async fn test_move_task_index_handling() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;
    let board = create_board(&app, &alice, &[]).await;
    let todo = create_column(&app, &alice, &board, "To Do").await;
    let done = create_column(&app, &alice, &board, "Done").await;
    let t1 = create_task(&app, &alice, &board, &todo, "T1").await;
    create_task(&app, &alice, &board, &done, "D1").await;
    let uri = format!("/boards/{}/tasks/{}/move", board, t1);

    let response = app.put(&uri, &alice.token, json!({ "targetColumnId": done, "targetIndex": -1 })).await;
    assert_api_error!(response, StatusCode::BAD_REQUEST, "InvalidIndex");

    let response = app.put(&uri, &alice.token, json!({ "targetColumnId": done, "targetIndex": "top" })).await;
    assert_api_error!(response, StatusCode::BAD_REQUEST, "InvalidIndex");

    // out-of-range index clamps to the end
    let (status, body) = app.put(&uri, &alice.token, json!({ "targetColumnId": done, "targetIndex": 99 })).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["targetIndex"], 1);
    assert_eq!(task_titles(&app, &alice, &board, &done).await, vec!["D1", "T1"]);

    let response = app
        .put(&uri, &alice.token, json!({ "targetColumnId": uuid::Uuid::new_v4() }))
        .await;
    assert_api_error!(response, StatusCode::NOT_FOUND, "NotFound");
}

#[tokio::test]
async fn test_reorder_columns_with_expected_version() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;
    let board = create_board(&app, &alice, &[]).await;
    let a = create_column(&app, &alice, &board, "A").await;
    let b = create_column(&app, &alice, &board, "B").await;
    let c = create_column(&app, &alice, &board, "C").await;
    let uri = format!("/boards/{}/columns", board);

    let (_, body) = app.get(&format!("/boards/{}", board), &alice.token).await;
    let version = body["board"]["columns"]["version"].as_u64().expect("version");

    let response = app
        .put(&uri, &alice.token, json!({ "columns": [c, a, b], "expectedVersion": version + 1 }))
        .await;
    assert_api_error!(response, StatusCode::CONFLICT, "ConflictError");

    let response = app.put(&uri, &alice.token, json!({ "columns": [c, a] })).await;
    assert_api_error!(response, StatusCode::BAD_REQUEST, "InvalidSequence");

    let (status, body) = app
        .put(&uri, &alice.token, json!({ "columns": [c, a, b], "expectedVersion": version }))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["message"], "Column order updated successfully.");
    assert_eq!(ids(&body["order"]), vec![c.clone(), a.clone(), b.clone()]);

    let (_, body) = app.get(&uri, &alice.token).await;
    let titles: Vec<&str> = body["columns"]
        .as_array()
        .expect("columns")
        .iter()
        .map(|column| column["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_reorder_tasks() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;
    let bob = app.create_test_user("bob").await;
    let board = create_board(&app, &alice, &[&bob]).await;
    let column = create_column(&app, &alice, &board, "To Do").await;
    let t1 = create_task(&app, &alice, &board, &column, "T1").await;
    let t2 = create_task(&app, &bob, &board, &column, "T2").await;

    let (status, body) = app
        .put(
            &format!("/boards/{}/columns/{}/tasks/order", board, column),
            &bob.token,
            json!({ "tasks": [t2, t1] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(task_titles(&app, &alice, &board, &column).await, vec!["T2", "T1"]);
}

#[tokio::test]
async fn test_delete_column_and_board_cascade() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;
    let board = create_board(&app, &alice, &[]).await;
    let todo = create_column(&app, &alice, &board, "To Do").await;
    let done = create_column(&app, &alice, &board, "Done").await;
    let task = create_task(&app, &alice, &board, &todo, "T1").await;
    create_task(&app, &alice, &board, &done, "D1").await;

    let (status, body) = app.delete(&format!("/boards/{}/columns/{}", board, todo), &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Column and associated tasks deleted successfully.");

    let (_, body) = app.get(&format!("/boards/{}", board), &alice.token).await;
    assert_eq!(ids(&body["board"]["columns"]), vec![done.clone()]);
    let response = app
        .get(&format!("/boards/{}/columns/{}/tasks/{}", board, todo, task), &alice.token)
        .await;
    assert_api_error!(response, StatusCode::NOT_FOUND, "NotFound");

    let (status, _) = app.delete(&format!("/boards/{}", board), &alice.token).await;
    assert_eq!(status, StatusCode::OK);
    let response = app.get(&format!("/boards/{}/columns/{}", board, done), &alice.token).await;
    assert_api_error!(response, StatusCode::NOT_FOUND, "NotFound");

    let (_, body) = app.get("/users/profile", &alice.token).await;
    assert_eq!(body["boards"], json!([]));
}

#[tokio::test]
async fn test_update_and_delete_task() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice").await;
    let bob = app.create_test_user("bob").await;
    let board = create_board(&app, &alice, &[&bob]).await;
    let column = create_column(&app, &alice, &board, "To Do").await;
    let task = create_task(&app, &alice, &board, &column, "T1").await;
    let uri = format!("/boards/{}/columns/{}/tasks/{}", board, column, task);

    let (status, body) = app
        .put(&uri, &alice.token, json!({ "status": "In Progress", "assignedTo": bob.id }))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["task"]["status"], "In Progress");
    assert_eq!(body["task"]["assignedTo"], bob.id.to_string());

    let (status, body) = app.put(&uri, &alice.token, json!({ "assignedTo": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["task"].get("assignedTo").is_none());

    let (status, body) = app.delete(&uri, &bob.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted successfully.");
    assert_eq!(task_titles(&app, &alice, &board, &column).await, Vec::<String>::new());
}

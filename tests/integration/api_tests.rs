//! API integration tests
//!
//! These run against a live server (and its DynamoDB table), so they are
//! ignored by default. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000";

/// Create a record the tests can mutate; callers delete it when done
async fn create_equipment(client: &Client, id: &str, quantity: i64) {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({
            "_id": id,
            "name": "Test projector",
            "desc": "integration fixture",
            "price": 99.5,
            "quantity": quantity
        }))
        .send()
        .await
        .expect("Failed to send create request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse create response");
    assert_eq!(body["id"], id);
}

async fn delete_equipment(client: &Client, id: &str) {
    let _ = client
        .delete(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await;
}

async fn fetch_quantity(client: &Client, id: &str) -> i64 {
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send get request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse get response");
    body["quantity"].as_i64().expect("No quantity in response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_list_equipments() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipments", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_then_get_round_trip() {
    let client = Client::new();
    let id = "it-round-trip";
    create_equipment(&client, id, 4).await;

    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Test projector");
    assert_eq!(body["quantity"], 4);

    delete_equipment(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_delete_then_get_reports_not_found() {
    let client = Client::new();
    let id = "it-deleted";
    create_equipment(&client, id, 1).await;

    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send delete request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send get request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_is_idempotent() {
    let client = Client::new();

    let response = client
        .delete(format!("{}/equipment/never-existed", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], "never-existed");
}

#[tokio::test]
#[ignore]
async fn test_update_missing_id_reports_not_found() {
    let client = Client::new();

    let response = client
        .put(format!("{}/equipment/never-existed", BASE_URL))
        .json(&json!({
            "name": "Ghost",
            "price": 1.0,
            "quantity": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_batch_get_with_duplicate_ids() {
    let client = Client::new();
    let id = "it-batch";
    create_equipment(&client, id, 2).await;

    let response = client
        .get(format!("{}/equipments/ids?ids={},{}", BASE_URL, id, id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let matched = body.as_array().expect("Expected an array");
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0]["id"], id);

    delete_equipment(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_reserve_empty_list_completes() {
    let client = Client::new();

    let response = client
        .post(format!("{}/equipment/onReserveWorkspace", BASE_URL))
        .json(&json!({ "equipmentsId": [] }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["done"], true);
    assert_eq!(body["applied"].as_array().expect("applied array").len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_reserve_counts_duplicate_ids() {
    let client = Client::new();
    let a = "it-reserve-a";
    let b = "it-reserve-b";
    create_equipment(&client, a, 5).await;
    create_equipment(&client, b, 3).await;

    let response = client
        .post(format!("{}/equipment/onReserveWorkspace", BASE_URL))
        .json(&json!({ "equipmentsId": [a, a, b] }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["done"], true);
    assert_eq!(body["applied"], json!([a, b]));

    assert_eq!(fetch_quantity(&client, a).await, 3);
    assert_eq!(fetch_quantity(&client, b).await, 2);

    delete_equipment(&client, a).await;
    delete_equipment(&client, b).await;
}

#[tokio::test]
#[ignore]
async fn test_cancel_reserve_restores_quantities() {
    let client = Client::new();
    let a = "it-cancel-a";
    let b = "it-cancel-b";
    create_equipment(&client, a, 5).await;
    create_equipment(&client, b, 3).await;

    for path in ["onReserveWorkspace", "onCancelReserve"] {
        let response = client
            .post(format!("{}/equipment/{}", BASE_URL, path))
            .json(&json!({ "equipmentsId": [a, a, b] }))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
    }

    // cancel with the same id list is the exact inverse of reserve
    assert_eq!(fetch_quantity(&client, a).await, 5);
    assert_eq!(fetch_quantity(&client, b).await, 3);

    delete_equipment(&client, a).await;
    delete_equipment(&client, b).await;
}

#[tokio::test]
#[ignore]
async fn test_reserve_unknown_id_reports_partial_failure() {
    let client = Client::new();
    let a = "it-partial-a";
    create_equipment(&client, a, 5).await;

    let response = client
        .post(format!("{}/equipment/onReserveWorkspace", BASE_URL))
        .json(&json!({ "equipmentsId": [a, "it-partial-ghost"] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "PartialFailure");
    // the first id was already decremented and stays decremented
    assert_eq!(body["applied"], json!([a]));
    assert_eq!(fetch_quantity(&client, a).await, 4);

    delete_equipment(&client, a).await;
}

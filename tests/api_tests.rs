//! API integration tests
//!
//! These run against a live server started with a test configuration
//! (`booking.confirmation_delay_ms = 0` keeps the booking test fast).

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api";

/// Helper to get an admin token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/admin/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Millisecond suffix so created rows do not collide across runs
fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_millis()
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
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/admin/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["username"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/admin/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_auth_me() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/admin/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "admin");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/admin/tours", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_admin_list_zero_page_is_first_page() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/admin/tours?page=0&perPage=-5", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["page"], 1);
    assert_eq!(body["perPage"], 1);
}

#[tokio::test]
#[ignore]
async fn test_public_tour_listing() {
    let client = Client::new();

    let response = client
        .get(format!("{}/tours", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_tour_crud_normalizes_dates() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Create with date slots in both upstream shapes
    let response = client
        .post(format!("{}/admin/tours", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": format!("Test Trek {}", unique_suffix()),
            "location": "Patagonia",
            "price": "$1,299",
            "dates": [
                {"date": "Jun 15-17, 2025", "spotsLeft": 8},
                {"start": "Jul 1", "end": "Jul 5", "spotsLeft": 2, "price": 1399}
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let tour_id = body["id"].as_i64().expect("No tour ID");
    assert_eq!(body["price"], 1299.0);
    assert_eq!(body["dates"][0]["start"], "Jun 15");
    assert_eq!(body["dates"][0]["end"], "17, 2025");
    assert_eq!(body["dates"][0]["status"], "available");
    assert_eq!(body["dates"][0]["price"], 1299.0);
    assert_eq!(body["dates"][1]["status"], "limited");
    assert_eq!(body["dates"][1]["price"], 1399.0);

    // Public fetch by id
    let response = client
        .get(format!("{}/tours?id={}", BASE_URL, tour_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Update replaces the whole slot list
    let response = client
        .put(format!("{}/admin/tours/{}", BASE_URL, tour_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "dates": [{"date": "Aug 1-3", "spotsLeft": 4}]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["dates"].as_array().expect("dates array").len(), 1);

    // Cleanup
    let response = client
        .delete(format!("{}/admin/tours/{}", BASE_URL, tour_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_booking_end_to_end() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // A tour to book against
    let response = client
        .post(format!("{}/admin/tours", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": format!("Booking Trek {}", unique_suffix()),
            "location": "Iceland",
            "price": 245,
            "dates": [{"date": "Sep 10-14", "spotsLeft": 6}]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let tour: Value = response.json().await.expect("Failed to parse response");
    let tour_id = tour["id"].as_i64().expect("No tour ID");

    // Two travelers at $245: base 490, fee 49, total 539
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "tourId": tour_id,
            "participants": 2,
            "leadTraveler": {"firstName": "Ada", "lastName": "Laurent", "phone": "+33 1 02 03 04"},
            "travelers": [{"firstName": "Sam", "lastName": "Laurent"}]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);

    let booking = &body["booking"];
    assert_eq!(booking["pricePerPerson"], 245.0);
    assert_eq!(booking["serviceFee"], 49.0);
    assert_eq!(booking["totalPrice"], 539.0);
    assert_eq!(booking["status"], "confirmed");

    let reference = booking["bookingReference"].as_str().expect("No reference");
    assert!(reference.starts_with("BOOKING-"));
    assert!(reference
        .trim_start_matches("BOOKING-")
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));

    // The confirmation page can fetch it back
    let response = client
        .get(format!("{}/bookings?reference={}", BASE_URL, reference))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let fetched: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fetched["bookingReference"], *reference);
    assert_eq!(fetched["totalPrice"], 539.0);

    // Cleanup
    let _ = client
        .delete(format!("{}/admin/tours/{}", BASE_URL, tour_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_booking_rejects_bad_participant_count() {
    let client = Client::new();

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "tourId": 1,
            "participants": 11,
            "leadTraveler": {"firstName": "Ada"}
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_consultation_code_lifecycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let code_value = format!("TEST{}", unique_suffix());

    // Create with a cap of 2 uses
    let response = client
        .post(format!("{}/admin/consultation-codes", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "code": code_value,
            "description": "Lifecycle test",
            "maxUses": 2
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse response");
    let code_id = created["id"].as_i64().expect("No code ID");
    assert_eq!(created["status"], "active");
    assert_eq!(created["createdBy"], "admin");

    // First redemption consumes one use
    let response = client
        .post(format!("{}/consultation-codes/redeem", BASE_URL))
        .json(&json!({"code": code_value.to_lowercase()}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["valid"], true);
    assert_eq!(body["remainingUses"], 1);

    // Second exhausts the cap, third is rejected
    let response = client
        .post(format!("{}/consultation-codes/redeem", BASE_URL))
        .json(&json!({"code": code_value}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/consultation-codes/redeem", BASE_URL))
        .json(&json!({"code": code_value}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // Toggle to inactive and verify redemption is refused
    let response = client
        .put(format!("{}/admin/consultation-codes/{}", BASE_URL, code_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"status": "inactive", "maxUses": 10}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/consultation-codes/redeem", BASE_URL))
        .json(&json!({"code": code_value}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // Cleanup
    let response = client
        .delete(format!("{}/admin/consultation-codes/{}", BASE_URL, code_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_redeem_unknown_code() {
    let client = Client::new();

    let response = client
        .post(format!("{}/consultation-codes/redeem", BASE_URL))
        .json(&json!({"code": "NO-SUCH-CODE"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_bulk_create_and_export() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let prefix = format!("BK{}", unique_suffix() % 100_000);

    let response = client
        .post(format!("{}/admin/consultation-codes/bulk", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "quantity": 5,
            "prefix": prefix,
            "description": "Bulk test batch",
            "maxUses": 3
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let batch: Value = response.json().await.expect("Failed to parse response");
    let codes = batch.as_array().expect("batch array");
    assert_eq!(codes.len(), 5);
    assert_eq!(
        codes[0]["code"].as_str().expect("code"),
        format!("{}-0001", prefix)
    );
    assert_eq!(
        codes[4]["code"].as_str().expect("code"),
        format!("{}-0005", prefix)
    );

    let ids: Vec<String> = codes
        .iter()
        .map(|c| c["id"].as_i64().expect("code id").to_string())
        .collect();

    // Export the fresh batch as a PDF
    let response = client
        .get(format!(
            "{}/admin/consultation-codes/export?ids={}&new=true",
            BASE_URL,
            ids.join(",")
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/pdf")
    );
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .expect("No content-disposition")
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("new-consultation-codes-"));

    let bytes = response.bytes().await.expect("Failed to read body");
    assert!(bytes.starts_with(b"%PDF"));

    // Cleanup
    for id in ids {
        let _ = client
            .delete(format!("{}/admin/consultation-codes/{}", BASE_URL, id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await;
    }
}

#[tokio::test]
#[ignore]
async fn test_bulk_update_codes() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let prefix = format!("BU{}", unique_suffix() % 100_000);

    let response = client
        .post(format!("{}/admin/consultation-codes/bulk", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"quantity": 3, "prefix": prefix}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let batch: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<i64> = batch
        .as_array()
        .expect("batch array")
        .iter()
        .map(|c| c["id"].as_i64().expect("code id"))
        .collect();

    let response = client
        .post(format!("{}/admin/consultation-codes/bulk-update", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "ids": ids,
            "action": {"status": "inactive"}
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["updated"], 3);

    // Spot-check one row
    let response = client
        .get(format!("{}/admin/consultation-codes/{}", BASE_URL, ids[0]))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let code: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(code["status"], "inactive");

    // Cleanup
    for id in ids {
        let _ = client
            .delete(format!("{}/admin/consultation-codes/{}", BASE_URL, id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await;
    }
}

#[tokio::test]
#[ignore]
async fn test_code_stats() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/admin/consultation-codes/stats", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total"].is_number());
    assert!(body["active"].is_number());
    assert!(body["expired"].is_number());
    assert!(body["totalUses"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_category_crud() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let name = format!("Alpine Treks {}", unique_suffix());

    let response = client
        .post(format!("{}/admin/categories", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"name": name}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse response");
    let category_id = created["id"].as_i64().expect("No category ID");
    assert!(created["slug"].as_str().expect("slug").starts_with("alpine-treks-"));

    // Duplicate slug is refused
    let response = client
        .post(format!("{}/admin/categories", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"name": name}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Patch a single field
    let response = client
        .patch(format!("{}/admin/categories/{}", BASE_URL, category_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"sortOrder": 7}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let patched: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(patched["sortOrder"], 7);

    // Cleanup
    let response = client
        .delete(format!("{}/admin/categories/{}", BASE_URL, category_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_expert_profile_aggregate() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/admin/experts", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": format!("Expert {}", unique_suffix()),
            "title": "Andes specialist",
            "expertise": ["Patagonia", "Altiplano"]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let expert: Value = response.json().await.expect("Failed to parse response");
    let expert_id = expert["id"].as_i64().expect("No expert ID");

    let response = client
        .get(format!("{}/experts/profile?id={}", BASE_URL, expert_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["expert"]["id"], expert_id);
    assert!(body["relatedExperts"].is_array());
    assert!(body["featuredTours"].is_array());

    // Cleanup
    let _ = client
        .delete(format!("{}/admin/experts/{}", BASE_URL, expert_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_newsletter_confirm_invalid_token() {
    let client = Client::new();

    let response = client
        .post(format!("{}/newsletter/confirm", BASE_URL))
        .json(&json!({"token": "not-a-real-token"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

//! Payback JSON API: participants, trips, purchases, ledgers

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{app, delete, get, post};
use serde_json::{json, Value};

const BASE: &str = "/api/v1/payback";

async fn participant(app: &Router, name: &str) -> i64 {
    let (status, body) = post(app, &format!("{BASE}/participants"), json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn trip_with(app: &Router, name: &str, members: &[i64]) -> i64 {
    let (status, body) = post(app, &format!("{BASE}/trips"), json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED);
    let trip = body["id"].as_i64().unwrap();

    for id in members {
        let (status, _) = post(
            app,
            &format!("{BASE}/trips/{trip}/participants"),
            json!({ "participant_id": id }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    trip
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn participants_crud() {
    let app = app().await;
    let sam = participant(&app, "Sam").await;
    participant(&app, "Alex").await;

    let (status, body) = post(&app, &format!("{BASE}/participants"), json!({ "name": "Sam" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (_, list) = get(&app, &format!("{BASE}/participants")).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alex", "Sam"]);

    let (status, body) = get(&app, &format!("{BASE}/participants/{sam}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sam");
    assert!(body.get("created_at").is_some());

    let (status, _) = get(&app, &format!("{BASE}/participants/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(&app, &format!("{BASE}/participants"), json!({ "name": "<x>" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn trip_roster() {
    let app = app().await;
    let ann = participant(&app, "Ann").await;
    let bo = participant(&app, "Bo").await;
    let trip = trip_with(&app, "Alps", &[bo, ann]).await;

    let (_, body) = get(&app, &format!("{BASE}/trips/{trip}")).await;
    assert_eq!(body["name"], "Alps");
    assert_eq!(ids(&body["participants"]), vec![ann, bo]);

    let (status, _) = post(
        &app,
        &format!("{BASE}/trips/{trip}/participants"),
        json!({ "participant_id": ann }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = delete(&app, &format!("{BASE}/trips/{trip}/participants/{bo}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = delete(&app, &format!("{BASE}/trips/{trip}/participants/{bo}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, roster) = get(&app, &format!("{BASE}/trips/{trip}/participants")).await;
    assert_eq!(ids(&roster), vec![ann]);

    let (_, trips) = get(&app, &format!("{BASE}/trips")).await;
    assert_eq!(trips.as_array().unwrap().len(), 1);

    let (status, _) = get(&app, &format!("{BASE}/trips/404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn purchase_split_and_ledger() {
    let app = app().await;
    let ann = participant(&app, "Ann").await;
    let bo = participant(&app, "Bo").await;
    let cy = participant(&app, "Cy").await;
    let trip = trip_with(&app, "Coast", &[ann, bo, cy]).await;

    let (status, body) = post(
        &app,
        &format!("{BASE}/purchases"),
        json!({
            "trip_id": trip,
            "payer_participant_id": ann,
            "total_amount": 1000,
            "description": "Dinner",
            "debtor_ids": [bo, ann, cy],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["purchase"]["payer_name"], "Ann");
    assert_eq!(body["purchase"]["trip_name"], "Coast");

    let owed: Vec<i64> = body["debts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["amount_owed"].as_i64().unwrap())
        .collect();
    assert_eq!(owed, vec![334, 333, 333]);
    assert_eq!(body["debts"][0]["debtor_participant_id"], bo);

    let purchase = body["purchase"]["id"].as_i64().unwrap();
    let (_, fetched) = get(&app, &format!("{BASE}/purchases/{purchase}")).await;
    assert_eq!(fetched, body["purchase"]);

    let (_, debts) = get(&app, &format!("{BASE}/purchases/{purchase}/debts")).await;
    assert_eq!(debts, body["debts"]);

    let (_, purchases) = get(&app, &format!("{BASE}/trips/{trip}/purchases")).await;
    assert_eq!(ids(&purchases), vec![purchase]);

    let (_, bo_debts) = get(&app, &format!("{BASE}/trips/{trip}/participants/{bo}/debts")).await;
    assert_eq!(bo_debts[0]["amount_owed"], 334);

    let (_, credits) = get(&app, &format!("{BASE}/trips/{trip}/participants/{ann}/credits")).await;
    assert_eq!(credits.as_array().unwrap().len(), 2);

    let (_, balances) = get(&app, &format!("{BASE}/trips/{trip}/balances")).await;
    let balances = balances.as_array().unwrap();
    assert_eq!(balances[0]["name"], "Ann");
    assert_eq!(balances[0]["net"], 1000 - 333);
    let total: i64 = balances.iter().map(|b| b["net"].as_i64().unwrap()).sum();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn payer_alone_without_debtors() {
    let app = app().await;
    let ann = participant(&app, "Ann").await;
    let trip = trip_with(&app, "Solo", &[ann]).await;

    let (status, body) = post(
        &app,
        &format!("{BASE}/purchases"),
        json!({
            "trip_id": trip,
            "payer_participant_id": ann,
            "total_amount": 750,
            "description": "Museum",
            "purchase_date": "2024-06-01T10:00:00Z",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["debts"].as_array().unwrap().len(), 1);
    assert_eq!(body["debts"][0]["debtor_participant_id"], ann);
    assert_eq!(body["debts"][0]["amount_owed"], 750);
    assert_eq!(body["purchase"]["purchase_date"], "2024-06-01T10:00:00+00:00");
}

#[tokio::test]
async fn rejected_purchases_write_nothing() {
    let app = app().await;
    let ann = participant(&app, "Ann").await;
    let outsider = participant(&app, "Dee").await;
    let trip = trip_with(&app, "Lake", &[ann]).await;

    let attempt = |total: i64, debtors: Vec<i64>| {
        json!({
            "trip_id": trip,
            "payer_participant_id": ann,
            "total_amount": total,
            "description": "Boat",
            "debtor_ids": debtors,
        })
    };

    let (status, _) = post(&app, &format!("{BASE}/purchases"), attempt(500, vec![ann, outsider])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, &format!("{BASE}/purchases"), attempt(0, vec![ann])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for _ in 0..2 {
        let (status, body) = post(
            &app,
            &format!("{BASE}/purchases"),
            attempt(5_000_000_000_000_000_000, vec![ann]),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    let (status, _) = post(&app, &format!("{BASE}/purchases"), attempt(500, vec![ann, 999])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, purchases) = get(&app, &format!("{BASE}/trips/{trip}/purchases")).await;
    assert!(purchases.as_array().unwrap().is_empty());

    let (_, balances) = get(&app, &format!("{BASE}/trips/{trip}/balances")).await;
    assert_eq!(balances[0]["paid"], 0);
    assert_eq!(balances[0]["owed"], 0);
}

//! Shared fixtures for the crm-filter integration tests

#![allow(dead_code)]

use crm_filter::{standard_columns, EngineConfig, FilterEngine};
use serde_json::{json, Value};

/// Engine over the standard client columns with default features
pub fn client_engine() -> FilterEngine<Value> {
    FilterEngine::new(standard_columns(), EngineConfig::default())
}

/// A small client book covering the awkward cases: missing fields, nulls,
/// empty strings, legacy boolean strings and numeric strings.
pub fn sample_clients() -> Vec<Value> {
    vec![
        json!({
            "id": "C-1001",
            "firstName": "Anna",
            "lastName": "Keller",
            "email": "anna.keller@example.com",
            "phone": "+49 30 1234567",
            "country": "DE",
            "leadStatus": "Hot",
            "kycVerified": true,
            "ftd": 2500,
            "balance": 75000.5,
            "rating": 5,
            "createdAt": "2024-01-15",
            "lastContactAt": "2024-03-02T09:30:00Z"
        }),
        json!({
            "id": "C-1002",
            "firstName": "Ben",
            "lastName": "Otieno",
            "email": "ben@example.org",
            "phone": "",
            "country": "KE",
            "leadStatus": "Cold",
            "kycVerified": "no",
            "ftd": "500",
            "balance": 1200,
            "rating": 2,
            "createdAt": "2024-02-20",
            "lastContactAt": null
        }),
        json!({
            "id": "C-1003",
            "firstName": "Chloé",
            "lastName": "Martin",
            "email": "",
            "country": "FR",
            "leadStatus": "Warm",
            "kycVerified": "Y",
            "ftd": 0,
            "balance": 0,
            "rating": 4,
            "createdAt": "2024-03-01T22:10:00Z",
            "lastContactAt": ""
        }),
        json!({
            "id": "C-1004",
            "firstName": "Dmitri",
            "email": "dmitri@example.net",
            "phone": "+357 22 000000",
            "country": "CY",
            "leadStatus": "hot",
            "kycVerified": "pending",
            "ftd": "n/a",
            "rating": 3,
            "createdAt": "2023-12-31"
        }),
    ]
}

pub fn ids(rows: &[&Value]) -> Vec<String> {
    rows.iter()
        .map(|row| row["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

// --- File: crates/bookify_store/src/store_test.rs ---

use crate::document::{new_appointment_id, AppointmentRecord};
use crate::store::JsonStore;
use bookify_common::services::{StoredTokens, TokenStore};
use std::fs;
use tempfile::tempdir;

fn sample_tokens() -> StoredTokens {
    StoredTokens {
        access_token: "ya29.test-access".to_string(),
        refresh_token: Some("1//test-refresh".to_string()),
        scope: Some("https://www.googleapis.com/auth/calendar.events".to_string()),
        expiry_date: Some(1_718_000_000_000),
        created_at: Some("2024-06-10T09:00:00.000Z".to_string()),
        updated_at: None,
    }
}

fn sample_appointment() -> AppointmentRecord {
    AppointmentRecord {
        id: "apt_1718000000000_abc123def".to_string(),
        bot_id: "default-bot".to_string(),
        customer_name: "Jane Doe".to_string(),
        customer_email: "jane@example.com".to_string(),
        customer_phone: None,
        appointment_date: "2024-06-10".to_string(),
        appointment_time: "10:30".to_string(),
        status: "confirmed".to_string(),
        google_event_id: Some("evt_42".to_string()),
        created_at: "2024-06-09T15:00:00.000Z".to_string(),
    }
}

#[test]
fn test_open_missing_file_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");

    let store = JsonStore::open(&path).unwrap();

    assert!(store.appointments().unwrap().is_empty());
    assert!(store.load("client-1").unwrap().is_none());
    // The file only appears on the first write.
    assert!(!path.exists());
}

#[test]
fn test_save_and_load_tokens() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open(dir.path().join("data.json")).unwrap();

    store.save("client-1", &sample_tokens()).unwrap();

    let loaded = store.load("client-1").unwrap();
    assert_eq!(loaded, Some(sample_tokens()));
    assert!(store.load("client-2").unwrap().is_none());
}

#[test]
fn test_clear_removes_tokens() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open(dir.path().join("data.json")).unwrap();
    store.save("client-1", &sample_tokens()).unwrap();

    assert!(store.clear("client-1").unwrap());
    assert!(store.load("client-1").unwrap().is_none());

    // Test case: clearing an already absent client reports false.
    assert!(!store.clear("client-1").unwrap());
}

#[test]
fn test_tokens_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");

    {
        let store = JsonStore::open(&path).unwrap();
        store.save("client-1", &sample_tokens()).unwrap();
    }

    let reopened = JsonStore::open(&path).unwrap();
    assert_eq!(reopened.load("client-1").unwrap(), Some(sample_tokens()));
}

#[test]
fn test_append_appointment_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");

    {
        let store = JsonStore::open(&path).unwrap();
        store.append_appointment(sample_appointment()).unwrap();
    }

    let reopened = JsonStore::open(&path).unwrap();
    assert_eq!(reopened.appointments().unwrap(), vec![sample_appointment()]);
}

#[test]
fn test_persist_leaves_no_temp_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    let store = JsonStore::open(&path).unwrap();

    store.save("client-1", &sample_tokens()).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_partial_document_loads() {
    // Test case: a hand-written file carrying only some top-level fields
    // still loads; the missing fields default to empty.
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, r#"{"appointments": []}"#).unwrap();

    let store = JsonStore::open(&path).unwrap();
    assert!(store.appointments().unwrap().is_empty());
    assert!(store.load("client-1").unwrap().is_none());
    assert!(store.client_overrides("default-bot").unwrap().is_none());
}

#[test]
fn test_appointments_parse_from_camel_case() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(
        &path,
        r#"{
  "appointments": [
    {
      "id": "apt_1718000000000_abc123def",
      "botId": "default-bot",
      "customerName": "Jane Doe",
      "customerEmail": "jane@example.com",
      "appointmentDate": "2024-06-10",
      "appointmentTime": "10:30",
      "status": "confirmed",
      "createdAt": "2024-06-09T15:00:00.000Z"
    }
  ]
}"#,
    )
    .unwrap();

    let store = JsonStore::open(&path).unwrap();
    let appointments = store.appointments().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].bot_id, "default-bot");
    assert_eq!(appointments[0].customer_phone, None);
    assert_eq!(appointments[0].google_event_id, None);
}

#[test]
fn test_client_overrides_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(
        &path,
        r##"{"clients": {"acme-bot": {"botName": "Acme Assistant", "theme": "#123456"}}}"##,
    )
    .unwrap();

    let store = JsonStore::open(&path).unwrap();
    let overrides = store.client_overrides("acme-bot").unwrap().unwrap();
    assert_eq!(overrides["botName"], "Acme Assistant");
    assert!(store.client_overrides("other-bot").unwrap().is_none());
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, "not json at all").unwrap();

    assert!(JsonStore::open(&path).is_err());
}

#[test]
fn test_new_appointment_id_shape() {
    let id = new_appointment_id();

    assert!(id.starts_with("apt_"));
    let parts: Vec<&str> = id.split('_').collect();
    assert_eq!(parts.len(), 3);
    assert!(parts[1].parse::<i64>().unwrap() > 0);
    assert_eq!(parts[2].len(), 9);
}

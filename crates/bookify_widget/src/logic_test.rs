// --- File: crates/bookify_widget/src/logic_test.rs ---
use crate::logic::{booking_submission, AckResponse, BookingFormData, WebhookRequest};
use serde_json::json;

fn complete_form() -> BookingFormData {
    BookingFormData {
        full_name: Some("Jane Doe".to_string()),
        contact: Some("jane@example.com".to_string()),
        phone: Some("555-0100".to_string()),
        preferred_date: Some("2024-06-10".to_string()),
        preferred_time: Some("14:30".to_string()),
    }
}

fn booking_request(form: Option<BookingFormData>) -> WebhookRequest {
    WebhookRequest {
        bot_id: Some("bot-1".to_string()),
        event_type: Some("appointment_booking".to_string()),
        form_data: form,
        timestamp: Some("2024-06-10T12:00:00.000Z".to_string()),
    }
}

#[test]
fn test_booking_submission_accepts_complete_booking() {
    let submission = booking_submission(&booking_request(Some(complete_form()))).unwrap();
    assert_eq!(submission.full_name, "Jane Doe");
    assert_eq!(submission.contact, "jane@example.com");
    assert_eq!(submission.phone.as_deref(), Some("555-0100"));
    assert_eq!(submission.preferred_date, "2024-06-10");
    assert_eq!(submission.preferred_time, "14:30");
}

#[test]
fn test_booking_submission_rejects_other_event_types() {
    // Test case: only appointment_booking payloads drive the flow; anything
    // else is acknowledged without action.
    let mut request = booking_request(Some(complete_form()));
    request.event_type = Some("contact_form".to_string());
    assert!(booking_submission(&request).is_none());

    request.event_type = None;
    assert!(booking_submission(&request).is_none());
}

#[test]
fn test_booking_submission_requires_form_data() {
    assert!(booking_submission(&booking_request(None)).is_none());
}

#[test]
fn test_booking_submission_treats_empty_fields_as_missing() {
    // Test case: the widget submits empty strings for untouched inputs, so
    // empty and absent are the same thing.
    let blank_one: [fn(&mut BookingFormData); 4] = [
        |form| form.full_name = Some(String::new()),
        |form| form.contact = None,
        |form| form.preferred_date = Some(String::new()),
        |form| form.preferred_time = None,
    ];
    for blank in blank_one {
        let mut form = complete_form();
        blank(&mut form);
        assert!(booking_submission(&booking_request(Some(form))).is_none());
    }
}

#[test]
fn test_booking_submission_phone_is_optional() {
    let mut form = complete_form();
    form.phone = Some(String::new());
    let submission = booking_submission(&booking_request(Some(form))).unwrap();
    assert!(submission.phone.is_none());

    let mut form = complete_form();
    form.phone = None;
    let submission = booking_submission(&booking_request(Some(form))).unwrap();
    assert!(submission.phone.is_none());
}

#[test]
fn test_webhook_request_deserializes_camel_case() {
    // Test case: the widget posts camelCase keys and a literal "type" field.
    let request: WebhookRequest = serde_json::from_value(json!({
        "botId": "clinic",
        "type": "appointment_booking",
        "formData": {
            "fullName": "Jane Doe",
            "contact": "jane@example.com",
            "phone": "555-0100",
            "preferredDate": "2024-06-10",
            "preferredTime": "14:30",
        },
        "timestamp": "2024-06-10T12:00:00.000Z",
    }))
    .unwrap();
    assert_eq!(request.bot_id.as_deref(), Some("clinic"));
    assert_eq!(request.event_type.as_deref(), Some("appointment_booking"));
    let form = request.form_data.unwrap();
    assert_eq!(form.full_name.as_deref(), Some("Jane Doe"));
    assert_eq!(form.preferred_time.as_deref(), Some("14:30"));
}

#[test]
fn test_webhook_request_tolerates_minimal_payload() {
    // Test case: an empty object is a valid envelope; every field defaults
    // to absent rather than failing deserialization.
    let request: WebhookRequest = serde_json::from_value(json!({})).unwrap();
    assert!(request.bot_id.is_none());
    assert!(request.event_type.is_none());
    assert!(request.form_data.is_none());
    assert!(request.timestamp.is_none());
}

#[test]
fn test_ack_response_omits_absent_bot_id() {
    let with_bot = serde_json::to_value(AckResponse {
        success: true,
        message: "Request received".to_string(),
        bot_id: Some("bot-1".to_string()),
        response_time: "3ms".to_string(),
        timestamp: "2024-06-10T12:00:00.000Z".to_string(),
    })
    .unwrap();
    assert_eq!(with_bot["botId"], "bot-1");
    assert_eq!(with_bot["responseTime"], "3ms");

    let without_bot = serde_json::to_value(AckResponse {
        success: true,
        message: "Request received".to_string(),
        bot_id: None,
        response_time: "3ms".to_string(),
        timestamp: "2024-06-10T12:00:00.000Z".to_string(),
    })
    .unwrap();
    assert!(without_bot.get("botId").is_none());
}

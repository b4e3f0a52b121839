use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;

#[test]
fn request_method_defaults_to_get() {
    assert_eq!(RequestMethod::default(), RequestMethod::Get);
}

#[test]
fn request_method_serialises_uppercase() {
    let all = [
        RequestMethod::Get,
        RequestMethod::Post,
        RequestMethod::Put,
        RequestMethod::Patch,
        RequestMethod::Delete,
    ];
    let encoded = serde_json::to_value(all).unwrap();
    assert_eq!(encoded, json!(["GET", "POST", "PUT", "PATCH", "DELETE"]));
}

#[test]
fn request_method_parses_case_insensitively() {
    assert_eq!("patch".parse::<RequestMethod>(), Ok(RequestMethod::Patch));
    assert_eq!("Delete".parse::<RequestMethod>(), Ok(RequestMethod::Delete));
    assert!("HEAD".parse::<RequestMethod>().is_err());
}

#[test]
fn request_message_omits_absent_payloads() {
    let endpoint = Endpoint::new("/commute/durations").unwrap();
    let message = ApiRequestMessage::new(endpoint, RequestMethod::Get);

    assert_eq!(
        serde_json::to_value(&message).unwrap(),
        json!({ "type": "API_REQUEST", "endpoint": "/commute/durations", "method": "GET" })
    );
}

#[test]
fn request_message_rejects_empty_endpoint_on_decode() {
    let raw = json!({ "type": "API_REQUEST", "endpoint": "", "method": "GET" });
    assert!(serde_json::from_value::<ApiRequestMessage>(raw).is_err());
}

#[test]
fn request_message_rejects_other_message_kinds() {
    let raw = json!({ "type": "PING", "endpoint": "/x", "method": "GET" });
    assert!(serde_json::from_value::<ApiRequestMessage>(raw).is_err());
}

#[test]
fn api_response_accepts_error_only_shape() {
    let response: ApiResponse<u32> = serde_json::from_value(json!({ "error": "boom" })).unwrap();
    assert_eq!(response.into_result(), Err("boom".to_string()));
}

#[test]
fn api_response_success_yields_data() {
    let response: ApiResponse<Vec<u32>> =
        serde_json::from_value(json!({ "data": [1, 2], "error": null })).unwrap();
    assert_eq!(response.into_result(), Ok(Some(vec![1, 2])));
}

#[test]
fn commute_response_keeps_unknown_duration_fields() {
    let raw = json!({
        "status": "success",
        "payload": {
            "addressDurations": [
                { "address": "1 Main St", "driving": 900, "transit": { "minutes": 25 } }
            ]
        }
    });

    let response: CommuteResponse = serde_json::from_value(raw.clone()).unwrap();

    assert!(response.is_success());
    assert_eq!(response.message, None);
    let first = &response.payload.address_durations[0];
    assert_eq!(first.address.as_deref(), Some("1 Main St"));
    assert_eq!(first.details.get("driving"), Some(&json!(900)));
    assert_eq!(serde_json::to_value(&response).unwrap(), raw);
}

#[test]
fn commute_error_response_carries_message() {
    let raw = json!({
        "status": "error",
        "payload": { "addressDurations": [] },
        "message": "not found"
    });

    let response: CommuteResponse = serde_json::from_value(raw).unwrap();

    assert!(!response.is_success());
    assert_eq!(response.message.as_deref(), Some("not found"));
}

#[test]
fn address_duration_without_address_still_decodes() {
    let raw = json!({
        "status": "success",
        "payload": { "addressDurations": [{ "placeId": "abc", "driving": 600 }] }
    });

    let response: CommuteResponse = serde_json::from_value(raw.clone()).unwrap();

    let first = &response.payload.address_durations[0];
    assert_eq!(first.address, None);
    assert_eq!(first.details.get("placeId"), Some(&json!("abc")));
    assert_eq!(serde_json::to_value(&response).unwrap(), raw);
}

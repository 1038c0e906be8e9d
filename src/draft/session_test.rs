use super::*;

fn at(unix_secs: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(unix_secs).unwrap()
}

// =============================================================================
// expiry
// =============================================================================

#[test]
fn new_session_expires_after_ttl() {
    let session = Session::new("guest_a".into(), 1u8, at(1_000), Duration::hours(4));
    assert_eq!(session.expires_at, (1_000 + 4 * 3_600) * 1_000);
    assert_eq!(session.last_updated, at(1_000));
}

#[test]
fn session_is_live_at_expiry_instant() {
    let session = Session::new("guest_a".into(), (), at(0), Duration::seconds(10));
    assert!(!session.is_expired(at(10)));
}

#[test]
fn session_is_expired_one_millisecond_after() {
    let session = Session::new("guest_a".into(), (), at(0), Duration::seconds(10));
    assert!(session.is_expired(at(10) + Duration::milliseconds(1)));
}

#[test]
fn new_session_with_huge_ttl_saturates() {
    let session = Session::new("guest_a".into(), (), at(0), Duration::MAX);
    assert_eq!(session.expires_at, i64::MAX);
    assert!(!session.is_expired(at(4_000_000_000)));
}

#[test]
fn new_session_with_huge_negative_ttl_is_expired() {
    let session = Session::new("guest_a".into(), (), at(0), Duration::MIN);
    assert_eq!(session.expires_at, i64::MIN);
    assert!(session.is_expired(at(0)));
}

// =============================================================================
// wire shape
// =============================================================================

#[test]
fn encode_uses_stored_field_names() {
    let session = Session::new("guest_a".into(), serde_json::json!({"nom": "Dupont"}), at(0), Duration::hours(1));
    let value: serde_json::Value = serde_json::from_str(&session.encode().unwrap()).unwrap();

    assert_eq!(value["guest_session_id"], "guest_a");
    assert_eq!(value["last_updated"], "1970-01-01T00:00:00Z");
    assert_eq!(value["expires_at"], 3_600_000);
    assert_eq!(value["form_data"]["nom"], "Dupont");
}

#[test]
fn decode_accepts_fractional_iso_timestamps() {
    let raw = r#"{
        "guest_session_id": "guest_123",
        "last_updated": "2024-05-01T09:30:00.123Z",
        "expires_at": 1714570200123,
        "form_data": {"email": "j@x.fr"}
    }"#;
    let session: Session<serde_json::Value> = Session::decode(raw).unwrap();

    assert_eq!(session.guest_session_id, "guest_123");
    assert_eq!(session.expires_at, 1_714_570_200_123);
    assert_eq!(session.form_data["email"], "j@x.fr");
}

#[test]
fn decode_rejects_malformed_json() {
    let err = Session::<serde_json::Value>::decode("{not json").unwrap_err();
    assert!(matches!(err, StorageError::Decode(_)));
}

#[test]
fn decode_rejects_missing_fields() {
    let err = Session::<serde_json::Value>::decode(r#"{"form_data": {}}"#).unwrap_err();
    assert!(matches!(err, StorageError::Decode(_)));
}

// =============================================================================
// generate_session_id
// =============================================================================

#[test]
fn generated_ids_are_prefixed_and_unique() {
    let a = generate_session_id();
    let b = generate_session_id();
    assert!(a.starts_with("guest_"));
    assert_eq!(a.len(), "guest_".len() + 32);
    assert_ne!(a, b);
}

#[test]
fn into_form_converts_form_data() {
    let raw = r#"{"guest_session_id":"guest_1","last_updated":"2024-05-01T08:00:00Z","expires_at":1,"form_data":[1,2]}"#;
    let session = Session::<serde_json::Value>::decode(raw).unwrap().into_form::<Vec<u8>>().unwrap();
    assert_eq!(session.form_data, vec![1, 2]);
    assert_eq!(session.guest_session_id, "guest_1");
}

#[test]
fn into_form_rejects_mismatched_form_data() {
    let raw = r#"{"guest_session_id":"guest_1","last_updated":"2024-05-01T08:00:00Z","expires_at":1,"form_data":"text"}"#;
    let err = Session::<serde_json::Value>::decode(raw).unwrap().into_form::<Vec<u8>>().unwrap_err();
    assert!(matches!(err, StorageError::Decode(_)));
}

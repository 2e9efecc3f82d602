// Integration tests for the outgoing OAuth connection lifecycle: the path a
// record takes from deserialized request body through stamping, validation,
// etag derivation, and redaction for the response.

use outgoing_oauth::{OutgoingOAuthConnection, GRANT_TYPE_CLIENT_CREDENTIALS};

fn incoming_connection() -> OutgoingOAuthConnection {
    // What a create-request body looks like: server-stamped fields unset.
    OutgoingOAuthConnection {
        id: String::new(),
        creator_id: "abc".to_string(),
        name: "Test".to_string(),
        client_id: "cid".to_string(),
        client_secret: "secret".to_string(),
        oauth_token_url: "https://nowhere.com/oauth/token".to_string(),
        grant_type: GRANT_TYPE_CLIENT_CREDENTIALS.to_string(),
        create_at: 0,
        update_at: 0,
        audiences: vec!["https://nowhere.com".to_string()],
    }
}

#[test]
fn test_create_flow() {
    let mut conn = incoming_connection();

    // Unstamped records are rejected before storage.
    assert!(conn.validate().is_err());

    conn.pre_save();
    assert!(conn.validate().is_ok());
    assert!(!conn.id.is_empty());
    assert_eq!(conn.create_at, conn.update_at);

    // The response body is a redacted copy; the stored record keeps its
    // credentials.
    let mut outgoing = conn.clone();
    outgoing.sanitize();
    assert!(outgoing.client_id.is_empty());
    assert!(outgoing.client_secret.is_empty());
    assert_eq!(outgoing.id, conn.id);
    assert_eq!(conn.client_secret, "secret");
}

#[test]
fn test_update_flow_refreshes_etag() {
    let mut conn = incoming_connection();
    conn.pre_save();
    let stored_etag = conn.etag();
    let id = conn.id.clone();

    conn.name = "Renamed".to_string();
    conn.pre_update();
    conn.update_at += 1; // update may land within the same millisecond
    assert!(conn.validate().is_ok());

    assert_eq!(conn.id, id);
    assert_ne!(conn.etag(), stored_etag);
}

#[test]
fn test_redacted_copy_still_serializes_with_wire_keys() {
    let mut conn = incoming_connection();
    conn.pre_save();
    conn.sanitize();

    let body = serde_json::to_string(&conn).unwrap();
    assert!(body.contains("\"client_secret\":\"\""));
    assert!(body.contains("\"oauth_token_url\":\"https://nowhere.com/oauth/token\""));
}

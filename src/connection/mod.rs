use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use uuid::Uuid;

mod validation;

pub use validation::{validate, ValidationError};

/// Grant type for the client-credentials flow.
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

/// Maximum byte length for client_id, client_secret, and oauth_token_url.
pub const MAX_CREDENTIAL_LEN: usize = 256;

/// OutgoingOAuthConnection is a stored configuration that lets the service
/// authenticate itself to an external OAuth-protected endpoint.
///
/// Records arrive from callers with `id` and timestamps unset; `pre_save`
/// stamps them before the record is persisted. The canonical stored instance
/// must never cross a trust boundary — clone and `sanitize` first.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutgoingOAuthConnection {
    /// Server-generated UUIDv7 identifier (immutable after creation)
    #[serde(default)]
    pub id: String,

    /// Identity of the principal that owns this connection
    pub creator_id: String,

    /// Human-readable label
    pub name: String,

    /// OAuth client identifier
    pub client_id: String,

    /// OAuth client secret (sensitive; cleared by `sanitize`)
    pub client_secret: String,

    /// Token endpoint URL (absolute, scheme + host required)
    pub oauth_token_url: String,

    /// OAuth grant type identifier (e.g. "client_credentials")
    pub grant_type: String,

    /// Unix epoch milliseconds, stamped on creation
    #[serde(default)]
    pub create_at: i64,

    /// Unix epoch milliseconds, restamped on every update
    #[serde(default)]
    pub update_at: i64,

    /// Target audience URLs for issued tokens (at least one, each absolute)
    pub audiences: Vec<String>,
}

impl OutgoingOAuthConnection {
    /// Checks the record against every field constraint.
    ///
    /// Reports the first failing rule. Pure: no mutation, safe to call
    /// repeatedly on the same snapshot.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate(self)
    }

    /// Stamps identity and timestamps before the record is first persisted.
    ///
    /// Assigns a fresh UUIDv7 id and sets both timestamps to the same
    /// instant. Not idempotent: call exactly once per logical creation.
    pub fn pre_save(&mut self) {
        self.id = Uuid::now_v7().to_string();
        self.create_at = now_millis();
        self.update_at = self.create_at;
    }

    /// Restamps `update_at` before the record is re-persisted.
    ///
    /// Leaves `id`, `create_at`, and every other field untouched. Safe to
    /// call on every update whether or not fields changed.
    pub fn pre_update(&mut self) {
        self.update_at = now_millis();
    }

    /// Cache-freshness tag derived from `id` and `update_at` only.
    ///
    /// Two records produce the same tag iff their id and update_at match.
    /// Precondition: the record has been through `pre_save`.
    pub fn etag(&self) -> String {
        format!("{}.{}", self.id, self.update_at)
    }

    /// Clears the credential fields for exposure to untrusted consumers.
    ///
    /// Empties `client_id` and `client_secret`; all other fields survive.
    pub fn sanitize(&mut self) {
        self.client_id = String::new();
        self.client_secret = String::new();
    }

    /// Secret-free field map for audit records.
    ///
    /// Includes `client_id` (it identifies the client) but never
    /// `client_secret`.
    pub fn audit_summary(&self) -> Value {
        json!({
            "id": self.id,
            "creator_id": self.creator_id,
            "name": self.name,
            "client_id": self.client_id,
            "oauth_token_url": self.oauth_token_url,
            "grant_type": self.grant_type,
            "create_at": self.create_at,
            "update_at": self.update_at,
            "audiences": self.audiences,
        })
    }
}

// client_secret must never leak through debug output
impl fmt::Debug for OutgoingOAuthConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutgoingOAuthConnection")
            .field("id", &self.id)
            .field("creator_id", &self.creator_id)
            .field("name", &self.name)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("oauth_token_url", &self.oauth_token_url)
            .field("grant_type", &self.grant_type)
            .field("create_at", &self.create_at)
            .field("update_at", &self.update_at)
            .field("audiences", &self.audiences)
            .finish()
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

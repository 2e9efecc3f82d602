use super::{OutgoingOAuthConnection, MAX_CREDENTIAL_LEN};
use std::fmt;
use url::Url;

/// Validation errors for OutgoingOAuthConnection
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingId,
    InvalidCreateAt(i64),
    InvalidUpdateAt(i64),
    MissingCreatorId,
    MissingName,
    MissingClientId,
    ClientIdTooLong(usize),
    MissingClientSecret,
    ClientSecretTooLong(usize),
    MissingTokenUrl,
    TokenUrlTooLong(usize),
    MalformedTokenUrl(String),
    MissingGrantType,
    EmptyAudiences,
    MalformedAudience(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingId => write!(f, "id is required"),
            ValidationError::InvalidCreateAt(at) => {
                write!(f, "create_at must be positive, got {}", at)
            }
            ValidationError::InvalidUpdateAt(at) => {
                write!(f, "update_at must be positive, got {}", at)
            }
            ValidationError::MissingCreatorId => write!(f, "creator_id is required"),
            ValidationError::MissingName => write!(f, "name is required"),
            ValidationError::MissingClientId => write!(f, "client_id is required"),
            ValidationError::ClientIdTooLong(len) => {
                write!(f, "client_id too long: {} bytes exceeds {}", len, MAX_CREDENTIAL_LEN)
            }
            ValidationError::MissingClientSecret => write!(f, "client_secret is required"),
            ValidationError::ClientSecretTooLong(len) => {
                write!(f, "client_secret too long: {} bytes exceeds {}", len, MAX_CREDENTIAL_LEN)
            }
            ValidationError::MissingTokenUrl => write!(f, "oauth_token_url is required"),
            ValidationError::TokenUrlTooLong(len) => {
                write!(f, "oauth_token_url too long: {} bytes exceeds {}", len, MAX_CREDENTIAL_LEN)
            }
            ValidationError::MalformedTokenUrl(u) => {
                write!(f, "oauth_token_url '{}' is not an absolute URL", u)
            }
            ValidationError::MissingGrantType => write!(f, "grant_type is required"),
            ValidationError::EmptyAudiences => {
                write!(f, "audiences must contain at least one entry")
            }
            ValidationError::MalformedAudience(a) => {
                write!(f, "audience '{}' is not an absolute URL", a)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates an OutgoingOAuthConnection against every field constraint.
///
/// Validation rules, in reporting order:
/// - id, creator_id, name, grant_type: non-empty
/// - create_at, update_at: positive epoch milliseconds
/// - client_id, client_secret: non-empty, at most 256 bytes
/// - oauth_token_url: non-empty, at most 256 bytes, absolute URL
/// - audiences: at least one entry, every entry an absolute URL
///
/// Returns the first rule that fails. Does not mutate the record.
pub fn validate(conn: &OutgoingOAuthConnection) -> Result<(), ValidationError> {
    if conn.id.is_empty() {
        return Err(ValidationError::MissingId);
    }
    if conn.create_at <= 0 {
        return Err(ValidationError::InvalidCreateAt(conn.create_at));
    }
    if conn.update_at <= 0 {
        return Err(ValidationError::InvalidUpdateAt(conn.update_at));
    }
    if conn.creator_id.is_empty() {
        return Err(ValidationError::MissingCreatorId);
    }
    if conn.name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    if conn.client_id.is_empty() {
        return Err(ValidationError::MissingClientId);
    }
    if conn.client_id.len() > MAX_CREDENTIAL_LEN {
        return Err(ValidationError::ClientIdTooLong(conn.client_id.len()));
    }
    if conn.client_secret.is_empty() {
        return Err(ValidationError::MissingClientSecret);
    }
    if conn.client_secret.len() > MAX_CREDENTIAL_LEN {
        return Err(ValidationError::ClientSecretTooLong(conn.client_secret.len()));
    }

    if conn.oauth_token_url.is_empty() {
        return Err(ValidationError::MissingTokenUrl);
    }
    if conn.oauth_token_url.len() > MAX_CREDENTIAL_LEN {
        return Err(ValidationError::TokenUrlTooLong(conn.oauth_token_url.len()));
    }
    if !is_absolute_url(&conn.oauth_token_url) {
        return Err(ValidationError::MalformedTokenUrl(conn.oauth_token_url.clone()));
    }

    if conn.grant_type.is_empty() {
        return Err(ValidationError::MissingGrantType);
    }

    if conn.audiences.is_empty() {
        return Err(ValidationError::EmptyAudiences);
    }
    for audience in &conn.audiences {
        if !is_absolute_url(audience) {
            return Err(ValidationError::MalformedAudience(audience.clone()));
        }
    }

    Ok(())
}

/// An absolute URL needs a scheme and a host; bare tokens like "invalid"
/// and scheme-only forms like "mailto:x" both fail.
fn is_absolute_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

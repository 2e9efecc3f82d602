// Outgoing OAuth connection model and validation
pub mod connection;

pub use connection::{
    OutgoingOAuthConnection, ValidationError, GRANT_TYPE_CLIENT_CREDENTIALS, MAX_CREDENTIAL_LEN,
};

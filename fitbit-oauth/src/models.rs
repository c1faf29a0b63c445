use serde::{Deserialize, Serialize};

/// Result of a successful client-credentials exchange.
///
/// `expires_in` is the provider-reported lifetime in seconds; converting it
/// into an absolute timestamp is left to the caller, which knows what zone
/// and format downstream consumers expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: u64,
}

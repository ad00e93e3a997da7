//! Access credential attached to authenticated tasks.

use std::fmt;

/// Access token permitting authenticated data collection for an entity.
///
/// The engine treats a credential as opaque: it only decides whether authenticated task
/// categories are included. It is shared read-only (behind an `Arc`) by every authenticated
/// task in a batch; refreshing it is the token manager's job, outside the engine.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    character_id: i64,
    access_token: String,
    scopes: Vec<String>,
}

impl Credential {
    /// Creates a credential for the character that owns the token.
    pub fn new(character_id: i64, access_token: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            character_id,
            access_token: access_token.into(),
            scopes,
        }
    }

    /// Character the token was issued to.
    pub fn character_id(&self) -> i64 {
        self.character_id
    }

    /// Bearer token for authenticated API requests.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Scopes granted to the token.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Whether the token was granted `scope`.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("character_id", &self.character_id)
            .field("access_token", &"<redacted>")
            .field("scopes", &self.scopes)
            .finish()
    }
}

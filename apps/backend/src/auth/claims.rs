//! Verified identity attached to a request by the auth gate.

use uuid::Uuid;

/// The subject of a verified access token, scoped to one request.
///
/// Inserted into request extensions by `AuthGate`; handlers read it through
/// the `CurrentUser` extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

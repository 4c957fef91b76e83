use serde::{Deserialize, Serialize};

/// The authenticated caller, as resolved by the identity collaborator in
/// front of this service. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub username: String,
    pub email: String,
}

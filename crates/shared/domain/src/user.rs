//! User domain entity and related types.

use serde::{Deserialize, Serialize};

/// User aggregate root. Owns its list of parent names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub age: i32,
    pub additional_information: String,
    pub parents: Vec<String>,
}

impl User {
    /// Build a freshly created user.
    pub fn new(
        id: String,
        name: String,
        password_hash: String,
        age: i32,
        additional_information: String,
        parents: Vec<String>,
    ) -> Self {
        Self {
            id,
            name,
            password_hash,
            age,
            additional_information,
            parents,
        }
    }

    /// Check whether both users carry the same parents, ignoring order.
    pub fn same_parents(&self, parents: &[String]) -> bool {
        let mut ours = self.parents.clone();
        let mut theirs = parents.to_vec();
        ours.sort();
        theirs.sort();
        ours == theirs
    }
}

/// User creation data transfer object.
///
/// `age` is the raw decimal string received on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub password: String,
    pub age: String,
    #[serde(default)]
    pub additional_information: String,
    #[serde(default)]
    pub parents: Vec<String>,
}

/// User update data transfer object (full replace, password untouched).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub id: String,
    pub name: String,
    pub age: String,
    #[serde(default)]
    pub additional_information: String,
    #[serde(default)]
    pub parents: Vec<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    #[cfg_attr(feature = "openapi", schema(example = "USR8f14e45fceea167a5a36dedd4bea2543"))]
    pub id: String,
    /// User name
    #[cfg_attr(feature = "openapi", schema(example = "alice"))]
    pub name: String,
    /// Age as a decimal string
    #[cfg_attr(feature = "openapi", schema(example = "30"))]
    pub age: String,
    /// Free-text notes
    pub additional_information: String,
    /// Caregiver names
    pub parents: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age.to_string(),
            additional_information: user.additional_information,
            parents: user.parents,
        }
    }
}

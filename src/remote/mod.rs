//! Remote user directory: record types and the collection contract.
//!
//! The directory is a single REST collection (`GET`/`POST <collection>`,
//! `PUT`/`DELETE <collection>/<id>`). [`DirectoryApi`] is the seam the
//! controller talks to; [`HttpDirectoryClient`] is the real implementation.

mod client;

pub use client::{DEFAULT_COLLECTION_URL, HttpDirectoryClient};

use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// A user record as kept by the local directory.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// User-submitted fields prior to id assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl UserDraft {
    /// Build a draft from raw form input; surrounding whitespace is dropped.
    pub fn new(name: &str, email: &str, phone: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
        }
    }

    /// First field left blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.name.is_empty() {
            Some("name")
        } else if self.email.is_empty() {
            Some("email")
        } else if self.phone.is_empty() {
            Some("phone")
        } else {
            None
        }
    }
}

impl From<User> for UserDraft {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
            phone: user.phone,
        }
    }
}

/// The four operations offered by the remote collection.
///
/// Every call is a single attempt. Implementations never keep a copy of the
/// records they return.
#[allow(async_fn_in_trait)]
pub trait DirectoryApi {
    async fn list(&self) -> Result<Vec<User>, TransportError>;

    /// Create a record. The id in the returned record comes from the server
    /// and is not trusted by the model.
    async fn create(&self, draft: &UserDraft) -> Result<User, TransportError>;

    async fn update(&self, id: u64, draft: &UserDraft) -> Result<(), TransportError>;

    async fn delete(&self, id: u64) -> Result<(), TransportError>;
}

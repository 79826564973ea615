// HTTP client for the remote user collection.
//
// Wraps `reqwest::Client` with collection/member URL construction and
// decoding of bodies into the explicit record shape. Anything that does not
// decode is reported as a transport failure.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{DirectoryApi, User, UserDraft};
use crate::error::TransportError;

/// Collection used when nothing else is configured.
pub const DEFAULT_COLLECTION_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Record echoed back by `POST`. The id is optional since it is ignored anyway.
#[derive(Deserialize)]
struct CreatedUser {
    #[serde(default)]
    id: Option<u64>,
    name: String,
    email: String,
    phone: String,
}

pub struct HttpDirectoryClient {
    http: reqwest::Client,
    collection: Url,
}

impl HttpDirectoryClient {
    /// Create a client with its own connection pool.
    pub fn new(collection: Url) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("usrdir-manager/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, collection })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn from_reqwest(collection: &str, http: reqwest::Client) -> Result<Self, TransportError> {
        let collection =
            Url::parse(collection).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;
        Ok(Self { http, collection })
    }

    pub fn collection(&self) -> &Url {
        &self.collection
    }

    /// `<collection>/<id>`
    fn member_url(&self, id: u64) -> Result<Url, TransportError> {
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(self.collection.to_string()))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, TransportError> {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            message: e.to_string(),
        })
    }
}

/// Turn a non-success status into an error, passing the response through otherwise.
fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(TransportError::Status(status.as_u16()))
    }
}

impl DirectoryApi for HttpDirectoryClient {
    async fn list(&self) -> Result<Vec<User>, TransportError> {
        debug!("GET {}", self.collection);
        let resp = self.http.get(self.collection.clone()).send().await?;
        Self::decode(check_status(resp)?).await
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, TransportError> {
        debug!("POST {}", self.collection);
        let resp = self
            .http
            .post(self.collection.clone())
            .json(draft)
            .send()
            .await?;
        let created: CreatedUser = Self::decode(check_status(resp)?).await?;
        debug!(server_id = ?created.id, "server accepted new user");
        Ok(User {
            id: created.id.unwrap_or_default(),
            name: created.name,
            email: created.email,
            phone: created.phone,
        })
    }

    async fn update(&self, id: u64, draft: &UserDraft) -> Result<(), TransportError> {
        let url = self.member_url(id)?;
        debug!("PUT {}", url);
        let resp = self.http.put(url).json(draft).send().await?;
        check_status(resp)?;
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), TransportError> {
        let url = self.member_url(id)?;
        debug!("DELETE {}", url);
        let resp = self.http.delete(url).send().await?;
        check_status(resp)?;
        Ok(())
    }
}

//! REST backend client
//!
//! Alternate home for user profiles: a JSON API authenticated with a bearer
//! token. The token is kept in the local key-value store so a session
//! survives between CLI invocations.

use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::UserProfile;
use crate::ports::storage::keys;
use crate::ports::{AccountBackend, KeyValueStore};

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Fallback when the server gives no error message
const GENERIC_ERROR: &str = "An error occurred";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Thin JSON client with bearer-token auth
pub struct RestClient {
    client: Client,
    base_url: String,
    store: Arc<dyn KeyValueStore>,
}

impl RestClient {
    pub fn new(base_url: &str, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::validation(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::validation("API URL must use http or https"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Result<Option<String>> {
        self.store.get(keys::AUTH_TOKEN)
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(keys::AUTH_TOKEN, token)
    }

    pub fn clear_token(&self) -> Result<()> {
        self.store.remove(keys::AUTH_TOKEN)
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::GET, path)?)
    }

    pub fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(self.request(Method::POST, path)?.json(body))
    }

    pub fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(self.request(Method::PUT, path)?.json(body))
    }

    pub fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::DELETE, path)?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut builder = self.client.request(method, url);
        if let Some(token) = self.token()? {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().map_err(map_request_error)?;
        let status = response.status();
        let body = response.text().map_err(map_request_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_ERROR.to_string());
            return Err(Error::Backend {
                status: status.as_u16(),
                message,
            });
        }

        // Empty bodies (e.g. 204) deserialize as null
        let raw = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(raw).map_err(|e| Error::Backend {
            status: status.as_u16(),
            message: format!("Unexpected response: {}", e),
        })
    }
}

fn map_request_error(error: reqwest::Error) -> Error {
    let message = if error.is_timeout() {
        "Connection timed out after 30 seconds".to_string()
    } else if error.is_connect() {
        "Unable to connect to the server".to_string()
    } else {
        format!("Request failed: {}", error)
    };
    Error::Backend { status: 0, message }
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
    user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    user: UserProfile,
}

/// Account backend that stores profiles on the server
pub struct RestAccountBackend {
    client: RestClient,
}

impl RestAccountBackend {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    fn start_session(&self, response: AuthResponse) -> Result<UserProfile> {
        if let Some(token) = response.token.as_deref() {
            self.client.set_token(token)?;
        }
        self.client.store.set(keys::ACTIVE_SESSION, &response.user.email)?;
        Ok(response.user)
    }

    fn end_session(&self) -> Result<()> {
        self.client.clear_token()?;
        self.client.store.remove(keys::ACTIVE_SESSION)
    }
}

impl AccountBackend for RestAccountBackend {
    fn name(&self) -> &str {
        "rest"
    }

    fn register(&self, name: &str, email: &str, password: &str) -> Result<UserProfile> {
        let response: AuthResponse = self.client.post(
            "/auth/register",
            &json!({ "name": name, "email": email, "password": password }),
        )?;
        self.start_session(response)
    }

    fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let response: AuthResponse = self
            .client
            .post("/auth/login", &json!({ "email": email, "password": password }))?;
        self.start_session(response)
    }

    fn logout(&self) -> Result<()> {
        self.end_session()
    }

    fn current_user(&self) -> Result<Option<UserProfile>> {
        if self.client.token()?.is_none() {
            return Ok(None);
        }
        match self.client.get::<UserProfile>("/users/profile") {
            Ok(profile) => Ok(Some(profile)),
            // Expired or revoked token
            Err(Error::Backend { status: 401, .. }) => {
                self.end_session()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        if self.client.token()?.is_none() {
            return Err(Error::NotAuthenticated);
        }
        let _: ProfileResponse = self.client.put("/users/profile", profile)?;
        Ok(())
    }

    fn delete_account(&self) -> Result<()> {
        if self.client.token()?.is_none() {
            return Err(Error::NotAuthenticated);
        }
        let _: serde_json::Value = self.client.delete("/users/account")?;
        self.end_session()
    }
}

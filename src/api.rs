//! HTTP client for the activities backend.
//!
//! The backend owns the roster; this side only reads it wholesale and posts
//! signup/unregister requests. Nothing is retried.

use crate::errors::{ApiError, ConfigError};
use crate::models::{BackendReply, Roster};
use reqwest::{Response, Url};
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy)]
pub enum Mutation {
    Signup,
    Unregister,
}

impl Mutation {
    fn path(self) -> &'static str {
        match self {
            Mutation::Signup => "signup",
            Mutation::Unregister => "unregister",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: Url,
}

impl BackendClient {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base })
    }

    pub async fn fetch_roster(&self) -> Result<Roster, ApiError> {
        let url = self.url(&["activities"])?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(rejected(response).await);
        }
        Ok(response.json::<Roster>().await?)
    }

    pub async fn signup(&self, activity: &str, email: &str) -> Result<BackendReply, ApiError> {
        self.mutate(Mutation::Signup, activity, email).await
    }

    pub async fn unregister(&self, activity: &str, email: &str) -> Result<BackendReply, ApiError> {
        self.mutate(Mutation::Unregister, activity, email).await
    }

    async fn mutate(
        &self,
        mutation: Mutation,
        activity: &str,
        email: &str,
    ) -> Result<BackendReply, ApiError> {
        let url = self.mutation_url(mutation, activity, email)?;
        let response = self.http.post(url).send().await?;
        if !response.status().is_success() {
            return Err(rejected(response).await);
        }
        // A success without a JSON body is still a success.
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes).unwrap_or_default())
    }

    /// `{base}/activities/{activity}/{signup|unregister}?email={email}`, percent-encoded.
    pub fn mutation_url(
        &self,
        mutation: Mutation,
        activity: &str,
        email: &str,
    ) -> Result<Url, ApiError> {
        let mut url = self.url(&["activities", activity, mutation.path()])?;
        url.query_pairs_mut().append_pair("email", email);
        Ok(url)
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn rejected(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let detail = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice::<BackendReply>(&bytes)
            .ok()
            .and_then(|reply| reply.detail_text()),
        Err(_) => None,
    };
    ApiError::Rejected { status, detail }
}

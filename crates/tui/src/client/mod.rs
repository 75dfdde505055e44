//! Bearer-authenticated HTTP client for the finance backend.
//!
//! Every service call goes through [`Client::send`]: the token is read from
//! the session first (a missing token fails before any request), then
//! non-2xx responses and transport failures are normalized by
//! [`handle_api_error`] and surfaced to callers as a generic
//! [`ApiError::Request`].

mod account_types;
mod accounts;
mod categories;
mod transactions;

use std::{sync::Arc, time::Duration};

use api_types::Paginated;
use reqwest::{Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::{
    error::{AppError, Result},
    session::TokenSource,
};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    AccountType,
    Account,
    Category,
    Transaction,
}

impl ResourceKind {
    pub fn singular(self) -> &'static str {
        match self {
            Self::AccountType => "account type",
            Self::Account => "account",
            Self::Category => "category",
            Self::Transaction => "transaction",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Self::AccountType => "account types",
            Self::Account => "accounts",
            Self::Category => "categories",
            Self::Transaction => "transactions",
        }
    }
}

/// Error returned by every service call.
///
/// Backend details are logged by [`handle_api_error`], not carried here;
/// pages only show the generic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Access token not found. Please log in.")]
    MissingToken,
    #[error("Failed to {}", describe(.op, .resource))]
    Request {
        op: Operation,
        resource: ResourceKind,
    },
}

fn describe(op: &Operation, resource: &ResourceKind) -> String {
    let noun = match op {
        Operation::Fetch => resource.plural(),
        _ => resource.singular(),
    };
    format!("{} {noun}", op.as_str())
}

/// Normalized backend failure.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Builds the normalized error from a non-2xx status and its raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| "unknown error".to_string());
        match status {
            400 | 422 => Self::Validation(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::Server { status, message },
        }
    }
}

/// Pulls a human readable message out of the usual backend error shapes:
/// `{"detail": ".."}`, `{"error": ".."}`, `{"non_field_errors": [..]}` and
/// per-field maps like `{"name": ["This field is required."]}`.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value {
        Value::String(message) => Some(message),
        Value::Object(map) => {
            for key in ["detail", "error", "non_field_errors"] {
                if let Some(message) = map.get(key).and_then(flatten_messages) {
                    return Some(message);
                }
            }
            let fields = map
                .iter()
                .filter_map(|(field, value)| {
                    flatten_messages(value).map(|message| format!("{field}: {message}"))
                })
                .collect::<Vec<_>>();
            (!fields.is_empty()).then(|| fields.join("; "))
        }
        Value::Array(_) => flatten_messages(&value),
        _ => None,
    }
}

fn flatten_messages(value: &Value) -> Option<String> {
    match value {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => {
            let parts = items
                .iter()
                .filter_map(|item| item.as_str())
                .collect::<Vec<_>>();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

/// Shared error handler: records the normalized backend error before the call
/// site replaces it with the generic [`ApiError`].
pub fn handle_api_error(err: &ClientError, op: Operation, resource: ResourceKind) -> ApiError {
    tracing::warn!(
        operation = op.as_str(),
        resource = resource.singular(),
        "request failed: {err}"
    );
    ApiError::Request { op, resource }
}

#[derive(Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    tokens: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration, tokens: Arc<dyn TokenSource>) -> Result<Self> {
        // `Url::join` drops the last segment unless the base ends with '/'.
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&base_url).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            http,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Resolves a relative path against the base URL. Absolute cursor URLs
    /// returned by the backend are used verbatim.
    fn endpoint(&self, path_or_cursor: &str) -> std::result::Result<Url, ClientError> {
        let parsed = if path_or_cursor.starts_with("http://") || path_or_cursor.starts_with("https://")
        {
            Url::parse(path_or_cursor)
        } else {
            self.base_url.join(path_or_cursor.trim_start_matches('/'))
        };
        parsed.map_err(|err| ClientError::InvalidUrl(format!("{path_or_cursor}: {err}")))
    }

    async fn send<F>(
        &self,
        op: Operation,
        resource: ResourceKind,
        path: &str,
        build: F,
    ) -> ApiResult<Response>
    where
        F: FnOnce(&reqwest::Client, Url) -> reqwest::RequestBuilder,
    {
        let token = self.tokens.access_token().ok_or(ApiError::MissingToken)?;

        let url = self
            .endpoint(path)
            .map_err(|err| handle_api_error(&err, op, resource))?;
        tracing::debug!(operation = op.as_str(), %url, "sending request");

        let res = build(&self.http, url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|err| handle_api_error(&ClientError::Transport(err), op, resource))?;

        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        Err(handle_api_error(
            &ClientError::from_status(status.as_u16(), &body),
            op,
            resource,
        ))
    }

    async fn decode<T: DeserializeOwned>(
        res: Response,
        op: Operation,
        resource: ResourceKind,
    ) -> ApiResult<T> {
        res.json::<T>()
            .await
            .map_err(|err| handle_api_error(&ClientError::Transport(err), op, resource))
    }

    /// Fetches a list page: the default endpoint when `cursor` is `None`,
    /// otherwise the cursor URL as given.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        resource: ResourceKind,
        default_path: &str,
        cursor: Option<&str>,
    ) -> ApiResult<Paginated<T>> {
        let op = Operation::Fetch;
        let path = cursor.unwrap_or(default_path);
        let res = self
            .send(op, resource, path, |http, url| http.get(url))
            .await?;
        Self::decode(res, op, resource).await
    }

    /// Searches a list endpoint. A cursor, when present, wins over the term.
    pub(crate) async fn search_page<T: DeserializeOwned>(
        &self,
        resource: ResourceKind,
        default_path: &str,
        term: &str,
        cursor: Option<&str>,
    ) -> ApiResult<Paginated<T>> {
        if cursor.is_some() {
            return self.get_page(resource, default_path, cursor).await;
        }
        let op = Operation::Fetch;
        let res = self
            .send(op, resource, default_path, |http, url| {
                http.get(url).query(&[("search", term)])
            })
            .await?;
        Self::decode(res, op, resource).await
    }

    pub(crate) async fn post_json<B, T>(
        &self,
        resource: ResourceKind,
        path: &str,
        body: &B,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let op = Operation::Create;
        let res = self
            .send(op, resource, path, |http, url| http.post(url).json(body))
            .await?;
        Self::decode(res, op, resource).await
    }

    pub(crate) async fn put_json<B, T>(
        &self,
        resource: ResourceKind,
        path: &str,
        body: &B,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let op = Operation::Update;
        let res = self
            .send(op, resource, path, |http, url| http.put(url).json(body))
            .await?;
        Self::decode(res, op, resource).await
    }

    pub(crate) async fn delete(&self, resource: ResourceKind, path: &str) -> ApiResult<()> {
        self.send(Operation::Delete, resource, path, |http, url| {
            http.delete(url)
        })
        .await?;
        Ok(())
    }
}

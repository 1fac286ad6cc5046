use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::models::{Catalog, NewSubmission, Submission};
use crate::submission::{self, ValidationError};

#[derive(Debug)]
pub enum ClientError {
    /// The form failed the pre-submit checks; nothing was sent.
    Invalid(ValidationError),
    IncorrectPassword,
    /// Any transport failure or unexpected reply. The detail is kept for
    /// logging only; users see one generic message.
    Unavailable(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Invalid(err) => write!(f, "{err}"),
            ClientError::IncorrectPassword => write!(f, "密碼錯誤，請再試一次！"),
            ClientError::Unavailable(_) => write!(f, "連線失敗，請稍後再試！"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Invalid(err)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Unavailable(err.to_string())
    }
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

/// HTTP client for the survey service. Validates forms locally before
/// sending them and remembers a successful admin login.
pub struct SurveyClient {
    http: Client,
    base_url: String,
    logged_in: bool,
}

impl SurveyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            logged_in: false,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub async fn catalog(&self) -> Result<Catalog, ClientError> {
        let resp = self.http.get(self.url("/api/courses")).send().await?;
        if !resp.status().is_success() {
            return Err(unexpected(resp.status()));
        }
        Ok(resp.json().await?)
    }

    /// Validate, then send. Returns the server's confirmation message.
    pub async fn submit(&self, form: &NewSubmission, catalog: &Catalog) -> Result<String, ClientError> {
        submission::validate(form, catalog)?;

        let resp = self
            .http
            .post(self.url("/api/submit"))
            .json(form)
            .send()
            .await
            .inspect_err(|e| tracing::warn!("Submit request failed: {e}"))?;

        if resp.status() != StatusCode::OK {
            return Err(unexpected(resp.status()));
        }
        let body: MessageResponse = resp.json().await?;
        Ok(body.message)
    }

    pub async fn login(&mut self, password: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.url("/api/login"))
            .json(&json!({ "password": password }))
            .send()
            .await
            .inspect_err(|e| tracing::warn!("Login request failed: {e}"))?;

        match resp.status() {
            StatusCode::OK => {
                self.logged_in = true;
                Ok(())
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::IncorrectPassword),
            other => Err(unexpected(other)),
        }
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
    }

    /// Every stored submission, oldest first.
    pub async fn submissions(&self) -> Result<Vec<Submission>, ClientError> {
        let resp = self.http.get(self.url("/api/submissions")).send().await?;
        if !resp.status().is_success() {
            return Err(unexpected(resp.status()));
        }
        Ok(resp.json().await?)
    }
}

fn unexpected(status: StatusCode) -> ClientError {
    ClientError::Unavailable(format!("unexpected status {status}"))
}

use eyre::{bail, Result};
use log::debug;
use reqwest::Client as ReqwestClient;
use reqwest::StatusCode;

use types::domain::LoginRequest;
use types::error::Error;

// const BASE_URL: &str = "https://api.windster.app";
const BASE_URL: &str = "http://localhost:8080";

pub struct Client {
    pub client: ReqwestClient,
    pub token: Option<String>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            token: None,
        }
    }

    /// Exchanges the submitted credentials for a session token.
    pub async fn login(&mut self, request: LoginRequest) -> Result<String> {
        let url = format!("{}/login", BASE_URL);
        debug!("submitting login for {}", request.email);
        let response = self.client.post(url).json(&request).send().await?;
        let status = response.status();
        let token = match status {
            StatusCode::OK => response.text().await?,
            _ => bail!(Error::LoginFailed(response.text().await?)),
        };
        self.token = Some(token.clone());
        Ok(token)
    }

    /// Drops the in-memory session. The keyring entry, if any, is managed
    /// by the caller.
    pub fn sign_out(&mut self) {
        self.token = None;
    }
}

//! Session client for the P2000 management API.
//!
//! The array speaks XML over HTTP(S): a login handshake at
//! `/api/login/{token}` yields a session key that is carried on
//! subsequent requests in a `wbisessionkey` cookie, and every status or
//! statistics document is fetched with a plain GET under `/api/`.
//!
//! One client holds at most one session token at a time; it is not safe
//! to share across overlapping login sessions. Use one instance per
//! configured array target.

use std::time::Duration;

use md5::{Digest, Md5};
use reqwest::header;
use secrecy::ExposeSecret;
use tracing::{debug, warn};

use crate::config::ArrayConfig;
use crate::error::{CollectorError, Result};
use crate::p2000::document::Document;

pub struct SessionClient {
    config: ArrayConfig,
    http: reqwest::Client,
    session_token: Option<String>,
}

impl SessionClient {
    pub fn new(config: ArrayConfig) -> Result<Self> {
        // Arrays ship self-signed certificates, so certificate
        // verification is off. The timeout bounds the whole exchange,
        // connect and read.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            config,
            http,
            session_token: None,
        })
    }

    /// The login token: the pre-shared hash when configured, otherwise
    /// the lower-case hex MD5 digest of `"{user}_{password}"`. MD5 is
    /// fixed by the array's wire protocol. With neither hash nor
    /// credentials configured this degenerates to the digest of `"_"`,
    /// which is almost certainly a misconfiguration.
    fn auth_token(&self) -> String {
        if let Some(hash) = &self.config.hash {
            return hash.expose_secret().to_string();
        }
        if self.config.user.is_empty() {
            warn!("No hash and no user configured; logging in with empty credentials");
        }
        let seed = format!(
            "{}_{}",
            self.config.user,
            self.config.password.expose_secret()
        );
        hex::encode(Md5::digest(seed.as_bytes()))
    }

    fn url(&self, command: &str) -> String {
        let scheme = if self.config.no_ssl { "http" } else { "https" };
        format!("{}://{}/api/{}", scheme, self.config.address, command)
    }

    /// Fetch and parse one API document. Attaches the session cookie
    /// once authenticated; without a token the request simply goes out
    /// unauthenticated.
    pub async fn call(&self, command: &str) -> Result<Document> {
        let mut request = self.http.get(self.url(command));
        if let Some(token) = &self.session_token {
            request = request.header(header::COOKIE, format!("wbisessionkey={}", token));
        }

        debug!("GET /api/{}", command);
        let body = request.send().await?.error_for_status()?.bytes().await?;
        Document::parse(&body)
    }

    /// Run the login handshake and store the session token.
    ///
    /// A refusal (`response-type-numeric != "0"`) is an `Auth` error;
    /// the orchestrator treats it as non-fatal and continues the cycle
    /// without a cookie. Transport and parse failures propagate as
    /// themselves.
    pub async fn login(&mut self) -> Result<()> {
        self.session_token = None;
        let token = self.auth_token();
        let doc = self.call(&format!("login/{}", token)).await?;

        match doc.find_property("response-type-numeric") {
            Some("0") => {
                let session = doc.find_property("response").ok_or_else(|| {
                    CollectorError::Auth("login succeeded but no session token returned".into())
                })?;
                self.session_token = Some(session.to_string());
                Ok(())
            }
            status => Err(CollectorError::Auth(format!(
                "array refused login (response-type-numeric={})",
                status.unwrap_or("<missing>")
            ))),
        }
    }

    /// Best-effort logout. Failure costs nothing: already-collected
    /// metrics stand, and the session expires server-side anyway.
    pub async fn logout(&mut self) {
        if let Err(e) = self.call("logout").await {
            warn!("Logout failed: {}", e);
        }
        self.session_token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(user: &str, password: &str) -> ArrayConfig {
        serde_json::from_value(serde_json::json!({
            "host": "array-1",
            "address": "10.0.0.5",
            "user": user,
            "password": password,
        }))
        .expect("test config")
    }

    #[test]
    fn auth_token_is_md5_of_user_underscore_password() {
        let client = SessionClient::new(test_config("manage", "!manage")).unwrap();
        // md5("manage_!manage")
        assert_eq!(client.auth_token(), hex::encode(Md5::digest(b"manage_!manage")));
        assert_eq!(client.auth_token().len(), 32);
        assert_eq!(client.auth_token(), client.auth_token().to_lowercase());
    }

    #[test]
    fn empty_credentials_still_produce_a_token() {
        let client = SessionClient::new(test_config("", "")).unwrap();
        assert_eq!(client.auth_token(), hex::encode(Md5::digest(b"_")));
    }

    #[test]
    fn url_scheme_follows_no_ssl() {
        let mut config = test_config("u", "p");
        config.no_ssl = true;
        let client = SessionClient::new(config).unwrap();
        assert_eq!(
            client.url("show/disk-statistics"),
            "http://10.0.0.5/api/show/disk-statistics"
        );

        let client = SessionClient::new(test_config("u", "p")).unwrap();
        assert!(client.url("logout").starts_with("https://"));
    }
}

//! Email relay through the EmailJS REST API.
//!
//! A submission is validated locally first; only a valid form is sent.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use folio_core::constants::{DEFAULT_TIMEOUT_SECS, EMAILJS_API_URL, EMAILJS_SEND_PATH};
use folio_core::error::{FolioError, Result};

use crate::form::ContactForm;

/// Email relay configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmailRelayConfig {
    /// EmailJS service ID
    pub service_id: String,
    /// EmailJS template ID
    pub template_id: String,
    /// EmailJS public key (sent as `user_id`)
    pub public_key: String,
    /// Recipient substituted into the template's `to_email`
    pub to_email: Option<String>,
    /// API base URL
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl EmailRelayConfig {
    /// Creates a config against the public EmailJS endpoint.
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
            to_email: None,
            endpoint: EMAILJS_API_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Reads `EMAILJS_SERVICE_ID`, `EMAILJS_TEMPLATE_ID`, `EMAILJS_PUBLIC_KEY`
    /// and the optional `CONTACT_TO_EMAIL` / `EMAILJS_ENDPOINT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&str> = ["EMAILJS_SERVICE_ID", "EMAILJS_TEMPLATE_ID", "EMAILJS_PUBLIC_KEY"]
            .into_iter()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(FolioError::ConfigError(format!(
                "EmailJS configuration missing: {}",
                missing.join(", ")
            )));
        }

        let mut config = Self::new(
            get("EMAILJS_SERVICE_ID").unwrap_or_default(),
            get("EMAILJS_TEMPLATE_ID").unwrap_or_default(),
            get("EMAILJS_PUBLIC_KEY").unwrap_or_default(),
        );
        config.to_email = get("CONTACT_TO_EMAIL");
        if let Some(endpoint) = get("EMAILJS_ENDPOINT") {
            config.endpoint = endpoint;
        }
        Ok(config)
    }

    /// Sets the recipient address.
    pub fn with_recipient(mut self, to_email: impl Into<String>) -> Self {
        self.to_email = Some(to_email.into());
        self
    }

    /// Points the relay at a different API base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Acknowledgement returned by the relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendReceipt {
    /// HTTP status code
    pub status: u16,
    /// Response body (EmailJS answers "OK")
    pub text: String,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_email: Option<&'a str>,
}

/// Relays contact submissions to EmailJS.
pub struct EmailRelayClient {
    config: EmailRelayConfig,
    http_client: reqwest::Client,
}

impl EmailRelayClient {
    /// Creates a relay client with the given config.
    pub fn with_config(config: EmailRelayConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| FolioError::HttpError(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// The relay configuration.
    pub fn config(&self) -> &EmailRelayConfig {
        &self.config
    }

    /// Validates `form` and sends it.
    ///
    /// Values are relayed exactly as validated. An invalid form fails with
    /// `ValidationError` before any request is made. A non-2xx answer fails
    /// with `EmailSendFailed`, and an unreadable answer with `HttpError`.
    #[instrument(skip(self, form), fields(from = %form.email))]
    pub async fn send(&self, form: &ContactForm) -> Result<SendReceipt> {
        form.validate()?;

        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                from_name: &form.name,
                from_email: &form.email,
                message: &form.message,
                to_email: self.config.to_email.as_deref(),
            },
        };

        let url = format!(
            "{}{}",
            self.config.endpoint.trim_end_matches('/'),
            EMAILJS_SEND_PATH
        );
        debug!(url = %url, "Relaying contact message");

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| FolioError::HttpError(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!(status = status.as_u16(), error = %e, "Failed to read email relay response");
            FolioError::HttpError(e.to_string())
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %text, "Email relay rejected message");
            return Err(FolioError::EmailSendFailed {
                status: status.as_u16(),
                body: text,
            });
        }

        info!(status = status.as_u16(), "Contact message sent");
        Ok(SendReceipt {
            status: status.as_u16(),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn form() -> ContactForm {
        ContactForm::new("Ada Lovelace", "ada@example.com", "I'd like to talk about a project.")
    }

    fn client_for(server: &MockServer) -> EmailRelayClient {
        let config = EmailRelayConfig::new("service_1", "template_1", "pk_123")
            .with_recipient("owner@example.com")
            .with_endpoint(server.uri());
        EmailRelayClient::with_config(config).unwrap()
    }

    #[tokio::test]
    async fn test_send_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.0/email/send"))
            .and(body_json(serde_json::json!({
                "service_id": "service_1",
                "template_id": "template_1",
                "user_id": "pk_123",
                "template_params": {
                    "from_name": "Ada Lovelace",
                    "from_email": "ada@example.com",
                    "message": "I'd like to talk about a project.",
                    "to_email": "owner@example.com"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = client_for(&server).send(&form()).await.unwrap();

        assert_eq!(receipt, SendReceipt { status: 200, text: "OK".into() });
    }

    #[tokio::test]
    async fn test_invalid_form_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let bad = ContactForm::new("A", "ada@example.com", "I'd like to talk about a project.");
        let err = client_for(&server).send(&bad).await.unwrap_err();

        assert!(matches!(err, FolioError::ValidationError(msg) if msg.contains("name")));
    }

    #[tokio::test]
    async fn test_relay_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("The Public Key is invalid"))
            .mount(&server)
            .await;

        let err = client_for(&server).send(&form()).await.unwrap_err();

        match err {
            FolioError::EmailSendFailed { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Public Key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_relays_values_as_validated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&server)
            .await;

        let padded = ContactForm::new("  A  ", "ada@example.com", "   hi        ");
        assert!(padded.validate().is_ok());
        client_for(&server).send(&padded).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let params = &body["template_params"];
        let relayed = ContactForm::new(
            params["from_name"].as_str().unwrap(),
            params["from_email"].as_str().unwrap(),
            params["message"].as_str().unwrap(),
        );

        assert!(relayed.validate().is_ok());
        assert_eq!(relayed, padded);
    }

    #[tokio::test]
    async fn test_truncated_response_is_http_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;
            // Promises 100 bytes, sends 2, then hangs up.
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 100\r\n\r\nOK")
                .await;
        });

        let config = EmailRelayConfig::new("service_1", "template_1", "pk_123")
            .with_endpoint(format!("http://{}", addr));
        let err = EmailRelayClient::with_config(config)
            .unwrap()
            .send(&form())
            .await
            .unwrap_err();

        assert!(matches!(err, FolioError::HttpError(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_config_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("EMAILJS_SERVICE_ID", "service_1"),
            ("EMAILJS_TEMPLATE_ID", "template_1"),
            ("EMAILJS_PUBLIC_KEY", "pk_123"),
            ("CONTACT_TO_EMAIL", "owner@example.com"),
        ]
        .into_iter()
        .collect();

        let config = EmailRelayConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.service_id, "service_1");
        assert_eq!(config.to_email.as_deref(), Some("owner@example.com"));
        assert_eq!(config.endpoint, EMAILJS_API_URL);
    }

    #[test]
    fn test_config_missing_values() {
        let env: HashMap<&str, &str> = [("EMAILJS_SERVICE_ID", "service_1"), ("EMAILJS_PUBLIC_KEY", " ")]
            .into_iter()
            .collect();

        let err = EmailRelayConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("EMAILJS_TEMPLATE_ID"));
        assert!(msg.contains("EMAILJS_PUBLIC_KEY"));
        assert!(!msg.contains("EMAILJS_SERVICE_ID"));
    }
}

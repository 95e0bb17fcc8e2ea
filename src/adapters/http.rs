use crate::config::toml_config::ClientConfig;
use crate::domain::model::{HttpRequest, HttpResponse, Method};
use crate::domain::ports::HttpTransport;
use crate::utils::error::{FormwireError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// `HttpTransport` over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Option<Url>,
    default_headers: Vec<(String, String)>,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_seconds));
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder.build()?;

        let base_url = config
            .base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|e| FormwireError::InvalidUrl {
                    url: raw.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            client,
            base_url,
            default_headers: config
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        })
    }

    /// Absolute URLs pass through; relative ones are joined onto the base URL.
    pub fn resolve(&self, raw: &str) -> Result<Url> {
        match Url::parse(raw) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => base.join(raw).map_err(|e| FormwireError::InvalidUrl {
                    url: raw.to_string(),
                    reason: e.to_string(),
                }),
                None => Err(FormwireError::InvalidUrl {
                    url: raw.to_string(),
                    reason: "relative URL without a configured base_url".to_string(),
                }),
            },
            Err(e) => Err(FormwireError::InvalidUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

fn classify(error: reqwest::Error, url: &Url) -> FormwireError {
    if error.is_timeout() {
        FormwireError::Timeout {
            url: url.to_string(),
        }
    } else {
        FormwireError::Request(error)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = self.resolve(&request.url)?;
        let method = match request.method {
            Method::Delete => reqwest::Method::DELETE,
            Method::Post => reqwest::Method::POST,
        };

        tracing::debug!("Dispatching {} {}", request.method.as_str(), url);

        let mut builder = self.client.request(method, url.clone());
        for (name, value) in &self.default_headers {
            let overridden = request
                .headers
                .iter()
                .any(|(own, _)| own.eq_ignore_ascii_case(name));
            if !overridden {
                builder = builder.header(name, value);
            }
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| classify(e, &url))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify(e, &url))?;

        tracing::debug!("{} {} completed with status {}", request.method.as_str(), url, status);

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn transport_for(base_url: &str) -> ReqwestTransport {
        let config = ClientConfig {
            base_url: Some(base_url.to_string()),
            ..ClientConfig::default()
        };
        ReqwestTransport::new(&config).unwrap()
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let transport = transport_for("https://app.example.com/admin/");

        assert_eq!(
            transport.resolve("/items/5").unwrap().as_str(),
            "https://app.example.com/items/5"
        );
        assert_eq!(
            transport.resolve("items/5").unwrap().as_str(),
            "https://app.example.com/admin/items/5"
        );
        assert_eq!(
            transport.resolve("http://other.test/x").unwrap().as_str(),
            "http://other.test/x"
        );
    }

    #[test]
    fn test_relative_without_base_is_rejected() {
        let transport = ReqwestTransport::new(&ClientConfig::default()).unwrap();
        let err = transport.resolve("/items/5").unwrap_err();
        assert!(matches!(err, FormwireError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_non_success_status_is_still_a_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(DELETE).path("/items/9");
            then.status(404).body("no such item");
        });

        let transport = transport_for(&server.base_url());
        let response = transport
            .send(HttpRequest::delete("/items/9"))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(response.status, 404);
        assert_eq!(response.body, "no such item");
    }

    #[tokio::test]
    async fn test_default_headers_and_content_type_override() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/notes")
                .header("x-requested-with", "XMLHttpRequest")
                .header("content-type", "application/json");
            then.status(201).body("created");
        });

        let mut config = ClientConfig {
            base_url: Some(server.base_url()),
            ..ClientConfig::default()
        };
        config
            .headers
            .insert("X-Requested-With".into(), "XMLHttpRequest".into());
        config.headers.insert("Content-Type".into(), "text/plain".into());
        let transport = ReqwestTransport::new(&config).unwrap();

        let response = transport
            .send(HttpRequest::post(
                "/notes",
                "application/json",
                "{}".to_string(),
            ))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(response.status, 201);
    }
}

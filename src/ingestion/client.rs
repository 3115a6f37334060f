use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::pipelines::text_classification::Prediction;

/// The path of the inference endpoint
pub static SENTIMENT_PATH: &str = "sentiment";

/// Something that can score a comment
#[async_trait]
pub trait SentimentClient: Send + Sync {
    /// Analyze one text
    async fn analyze(&self, text: &str) -> Result<Prediction, ClientError>;
}

#[derive(Serialize)]
struct TextInput<'a> {
    text: &'a str,
}

/// Calls the inference service over HTTP
#[derive(Clone, Debug)]
pub struct HttpSentimentClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpSentimentClient {
    /// Target `<base_url>/sentiment`. A base URL that already names the endpoint is
    /// used as-is.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: endpoint_url(base_url)?,
        })
    }

    /// The resolved endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SentimentClient for HttpSentimentClient {
    async fn analyze(&self, text: &str) -> Result<Prediction, ClientError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&TextInput { text })
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Prediction>().await?)
    }
}

/// Resolve the inference endpoint from a service base URL
pub fn endpoint_url(base_url: &str) -> Result<Url, ClientError> {
    let trimmed = base_url.trim_end_matches('/');

    if trimmed.ends_with(&format!("/{}", SENTIMENT_PATH)) {
        return Ok(Url::parse(trimmed)?);
    }

    Ok(Url::parse(&format!("{}/", trimmed))?.join(SENTIMENT_PATH)?)
}

/// Client Error
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// The configured service URL is not a valid URL
    #[error("invalid sentiment service url: {0}")]
    Url(#[from] url::ParseError),

    /// The request failed, returned an error status, or had an unreadable body
    #[error("sentiment service request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("http://localhost:8000").unwrap().as_str(),
            "http://localhost:8000/sentiment"
        );
        assert_eq!(
            endpoint_url("http://localhost:8000/").unwrap().as_str(),
            "http://localhost:8000/sentiment"
        );
        assert_eq!(
            endpoint_url("http://svc.internal/api").unwrap().as_str(),
            "http://svc.internal/api/sentiment"
        );
        assert_eq!(
            endpoint_url("http://svc.internal/sentiment").unwrap().as_str(),
            "http://svc.internal/sentiment"
        );
    }

    #[test]
    fn test_endpoint_url_invalid() {
        assert!(matches!(endpoint_url("not a url"), Err(ClientError::Url(_))));
    }
}

use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::Config;
use crate::error::TransportError;
use crate::models::OutgoingRequest;

/// Response as handed back by the network layer, before any decoding
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    /// Body length as received, before UTF-8 decoding
    pub size_bytes: usize,
    /// When the status line and headers arrived, before the body was read
    pub received_at: Instant,
}

pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + Send + 'a>>;

/// The network boundary: one request in, one response or opaque failure out
pub trait Transport: Send + Sync {
    fn execute(&self, request: OutgoingRequest) -> TransportFuture<'_>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: OutgoingRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let headers = header_map(&request)?;

            let mut builder = self
                .client
                .request(request.method.into(), &request.url)
                .headers(headers);
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let received_at = Instant::now();

            let status = response.status().as_u16();
            let status_text = response
                .status()
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string();
            let headers = collect_headers(response.headers());
            let bytes = response.bytes().await?;
            let body = String::from_utf8_lossy(&bytes).into_owned();

            Ok(RawResponse {
                status,
                status_text,
                headers,
                body,
                size_bytes: bytes.len(),
                received_at,
            })
        })
    }
}

fn header_map(request: &OutgoingRequest) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(request.headers.len());
    for (name, value) in request.headers.iter() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| TransportError::InvalidHeader(name.to_string()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| TransportError::InvalidHeader(name.to_string()))?;
        // Names differing only in case both go out, as fetch does
        map.append(header_name, header_value);
    }
    Ok(map)
}

/// Flatten response headers, joining repeated names with ", " in first-seen order
fn collect_headers(map: &HeaderMap) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = Vec::with_capacity(map.keys_len());
    for (name, value) in map {
        let value = value.to_str().unwrap_or("<binary>");
        match headers.iter_mut().find(|(k, _)| k == name.as_str()) {
            Some((_, existing)) => {
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => headers.push((name.as_str().to_string(), value.to_string())),
        }
    }
    headers
}

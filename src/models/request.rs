use crate::error::SendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    pub fn next(self) -> Self {
        match self {
            HttpMethod::Get => HttpMethod::Post,
            HttpMethod::Post => HttpMethod::Get,
        }
    }

    pub fn prev(self) -> Self {
        // Two methods, so cycling either way is a toggle
        self.next()
    }

    /// Whether a request with this method may carry a payload
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// Header mapping parsed from the raw header text.
///
/// Names are case-sensitive. Inserting a name that is already present
/// replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedHeaders {
    entries: Vec<(String, String)>,
}

impl ParsedHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse `Key: Value` lines into a header mapping.
///
/// Blank lines, lines without a colon and lines with an empty name are
/// skipped without complaint. The value is everything after the first colon.
pub fn parse_headers(raw: &str) -> ParsedHeaders {
    let mut headers = ParsedHeaders::new();

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        headers.insert(name, value.trim());
    }

    headers
}

/// What the user has typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDraft {
    pub url: String,
    pub method: HttpMethod,
    pub raw_headers: String,
    pub body: String,
}

impl RequestDraft {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_headers(mut self, raw_headers: impl Into<String>) -> Self {
        self.raw_headers = raw_headers.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn validate(&self) -> Result<(), SendError> {
        if self.url.is_empty() {
            return Err(SendError::UrlRequired);
        }
        Ok(())
    }

    /// The request exactly as it goes over the wire.
    ///
    /// GET never carries a body; POST carries it only when non-empty.
    pub fn outgoing(&self) -> OutgoingRequest {
        let body = (self.method.allows_body() && !self.body.is_empty()).then(|| self.body.clone());

        OutgoingRequest {
            method: self.method,
            url: self.url.clone(),
            headers: parse_headers(&self.raw_headers),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: ParsedHeaders,
    pub body: Option<String>,
}

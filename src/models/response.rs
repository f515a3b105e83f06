use std::time::Duration;

/// Response payload after the JSON-or-text decode step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Valid JSON, re-rendered with two-space indentation
    Json(String),
    /// Anything else, kept byte-for-byte
    RawText(String),
}

impl ResponseBody {
    /// Numbers are re-rendered by `serde_json`: exponent forms come back as
    /// plain floats and values outside `f64` range fail the parse.
    pub fn decode(text: String) -> Self {
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(pretty) => ResponseBody::Json(pretty),
                Err(_) => ResponseBody::RawText(text),
            },
            Err(_) => ResponseBody::RawText(text),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResponseBody::Json(s) | ResponseBody::RawText(s) => s,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, ResponseBody::Json(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Informational,
    Success,
    Redirect,
    ClientError,
    ServerError,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: ResponseBody,
    pub elapsed: Duration,
    pub size_bytes: usize,
}

impl Response {
    /// Round-trip time in whole milliseconds, halves rounded away from zero
    pub fn elapsed_ms(&self) -> u64 {
        ((self.elapsed.as_nanos() + 500_000) / 1_000_000) as u64
    }

    /// Format elapsed time for display (e.g., "123ms", "1.2s")
    pub fn elapsed_display(&self) -> String {
        let ms = self.elapsed_ms();
        if ms < 1000 {
            format!("{}ms", ms)
        } else {
            format!("{:.1}s", self.elapsed.as_secs_f64())
        }
    }

    /// Format body size for display (e.g., "1.2 KB", "3.4 MB")
    pub fn size_display(&self) -> String {
        let bytes = self.size_bytes;
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    pub fn status_class(&self) -> StatusClass {
        match self.status {
            100..=199 => StatusClass::Informational,
            200..=299 => StatusClass::Success,
            300..=399 => StatusClass::Redirect,
            400..=499 => StatusClass::ClientError,
            500..=599 => StatusClass::ServerError,
            _ => StatusClass::Unknown,
        }
    }
}

/// Outcome of the most recent send.
///
/// `Loading` is the in-flight period: every result field reads as absent.
/// A finished attempt is either a full `Success` or an `Error`, never both.
#[derive(Debug, Clone, Default)]
pub enum RequestState {
    /// No request has been made yet
    #[default]
    Idle,
    /// Request is currently in progress
    Loading,
    /// Request completed successfully
    Success(Response),
    /// Request failed with an error
    Error(String),
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn response(&self) -> Option<&Response> {
        match self {
            RequestState::Success(response) => Some(response),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }

    pub fn elapsed_ms(&self) -> Option<u64> {
        self.response().map(Response::elapsed_ms)
    }

    pub fn response_headers(&self) -> Option<&[(String, String)]> {
        self.response().map(|r| r.headers.as_slice())
    }

    pub fn response_body(&self) -> Option<&str> {
        self.response().map(|r| r.body.as_str())
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(elapsed: Duration) -> Response {
        Response {
            status: 200,
            status_text: "OK".to_string(),
            headers: vec![("content-type".into(), "text/plain".into())],
            body: ResponseBody::RawText("hi".into()),
            elapsed,
            size_bytes: 2,
        }
    }

    #[test]
    fn json_body_is_pretty_printed() {
        let body = ResponseBody::decode(r#"{"a":1}"#.to_string());
        assert_eq!(body, ResponseBody::Json("{\n  \"a\": 1\n}".to_string()));
    }

    #[test]
    fn json_key_order_is_preserved() {
        let body = ResponseBody::decode(r#"{"z":1,"a":[true,null]}"#.to_string());
        assert_eq!(
            body.as_str(),
            "{\n  \"z\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}"
        );
    }

    #[test]
    fn non_json_body_is_unchanged() {
        let body = ResponseBody::decode("not json".to_string());
        assert_eq!(body, ResponseBody::RawText("not json".to_string()));
        assert!(!body.is_json());
    }

    #[test]
    fn exponent_numbers_are_rewritten_as_floats() {
        let body = ResponseBody::decode(r#"{"n":1e2}"#.to_string());
        assert_eq!(body.as_str(), "{\n  \"n\": 100.0\n}");
    }

    #[test]
    fn out_of_range_number_keeps_raw_text() {
        let body = ResponseBody::decode("[1e400]".to_string());
        assert_eq!(body, ResponseBody::RawText("[1e400]".to_string()));
    }

    #[test]
    fn empty_body_is_raw_text() {
        assert_eq!(ResponseBody::decode(String::new()), ResponseBody::RawText(String::new()));
    }

    #[test]
    fn elapsed_rounds_to_nearest_millisecond() {
        assert_eq!(response(Duration::from_micros(12_400)).elapsed_ms(), 12);
        assert_eq!(response(Duration::from_micros(12_500)).elapsed_ms(), 13);
        assert_eq!(response(Duration::ZERO).elapsed_ms(), 0);
    }

    #[test]
    fn elapsed_and_size_display() {
        assert_eq!(response(Duration::from_millis(123)).elapsed_display(), "123ms");
        assert_eq!(response(Duration::from_millis(1300)).elapsed_display(), "1.3s");

        let mut r = response(Duration::ZERO);
        r.size_bytes = 2048;
        assert_eq!(r.size_display(), "2.0 KB");
        r.size_bytes = 10;
        assert_eq!(r.size_display(), "10 B");
    }

    #[test]
    fn status_classes() {
        let mut r = response(Duration::ZERO);
        assert_eq!(r.status_class(), StatusClass::Success);
        r.status = 404;
        assert_eq!(r.status_class(), StatusClass::ClientError);
        r.status = 503;
        assert_eq!(r.status_class(), StatusClass::ServerError);
    }

    #[test]
    fn loading_state_reads_as_all_absent() {
        let state = RequestState::Loading;
        assert!(state.is_in_flight());
        assert_eq!(state.status(), None);
        assert_eq!(state.elapsed_ms(), None);
        assert!(state.response_headers().is_none());
        assert!(state.response_body().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn success_and_error_are_exclusive() {
        let ok = RequestState::Success(response(Duration::from_millis(5)));
        assert_eq!(ok.status(), Some(200));
        assert_eq!(ok.elapsed_ms(), Some(5));
        assert_eq!(ok.response_body(), Some("hi"));
        assert_eq!(ok.response_headers().map(<[_]>::len), Some(1));
        assert!(ok.error().is_none());

        let err = RequestState::Error("URL is required".into());
        assert_eq!(err.error(), Some("URL is required"));
        assert!(err.status().is_none());
        assert!(err.response_body().is_none());
        assert!(!err.is_in_flight());
    }
}

mod request;
mod response;

pub use request::{HttpMethod, OutgoingRequest, ParsedHeaders, RequestDraft, parse_headers};
pub use response::{RequestState, Response, ResponseBody, StatusClass};

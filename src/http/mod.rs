mod client;
mod transport;

pub use client::{Dispatcher, HttpResult, send_request};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportFuture};

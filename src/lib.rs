#![deny(unsafe_code)]

//! # satchel
//!
//! Buffered async http client requests.
//!
//! A [`BufferedRequest`] accumulates its body in memory, then hands the
//! finalized headers and payload to a [`Transport`] exactly once,
//! returning a [`PendingResponse`] without waiting for the response.

mod body;
mod error;
mod request;
mod response;
pub mod transport;

pub use body::Body;
pub use error::{Error, Result};
pub use request::BufferedRequest;
pub use response::Response;
pub use transport::{PendingResponse, Transport};

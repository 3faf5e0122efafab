use http::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
use std::mem;

use crate::error::{Error, Result};
use crate::transport::{PendingResponse, Transport};

/// An outbound request that buffers its body in full before sending.
///
/// The body buffer is writable until [`execute`] is called, which happens
/// at most once per request. Execution snapshots the buffer into an
/// immutable payload, fills in `content-length` when the caller hasn't set
/// one, and hands both headers and payload off to the transport. After
/// that the request is spent; further writes or a second execute fail with
/// [`Error::AlreadyExecuted`].
///
/// [`execute`]: BufferedRequest::execute
pub struct BufferedRequest {
    headers: HeaderMap,
    state: State,
}

enum State {
    Writable(Vec<u8>),
    Executed,
}

impl BufferedRequest {
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
            state: State::Writable(Vec::new()),
        }
    }

    /// Start from caller-supplied headers instead of an empty map.
    pub fn with_headers(headers: HeaderMap) -> Self {
        Self {
            headers,
            state: State::Writable(Vec::new()),
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// The body sink. Every call returns the same underlying buffer, so
    /// multiple writers can append incrementally.
    pub fn body_mut(&mut self) -> Result<&mut Vec<u8>> {
        match &mut self.state {
            State::Writable(buf) => Ok(buf),
            State::Executed => Err(Error::AlreadyExecuted),
        }
    }

    /// Append bytes to the body buffer.
    pub fn write_body(&mut self, bytes: &[u8]) -> Result<()> {
        self.body_mut()?.extend_from_slice(bytes);
        Ok(())
    }

    /// Send the request through `transport`, consuming the body buffer.
    ///
    /// Returns the transport's response handle without waiting for the
    /// response. If the caller set an explicit `content-length` it is kept
    /// as-is, even when it disagrees with the actual payload length;
    /// otherwise the exact payload length is inserted. Transport failures
    /// propagate unchanged, and the request stays spent either way.
    pub fn execute<T: Transport>(&mut self, transport: &mut T) -> Result<PendingResponse> {
        let payload = match mem::replace(&mut self.state, State::Executed) {
            State::Writable(buf) => buf,
            State::Executed => return Err(Error::AlreadyExecuted),
        };

        if self.headers.get(CONTENT_LENGTH).is_none() {
            self.headers
                .insert(CONTENT_LENGTH, HeaderValue::from(payload.len()));
        }

        tracing::trace!("executing buffered request, {} body bytes", payload.len());

        // Headers are frozen from here on; the transport owns them now.
        let headers = mem::take(&mut self.headers);
        transport.send(headers, payload)
    }
}

impl Default for BufferedRequest {
    fn default() -> Self {
        Self::new()
    }
}

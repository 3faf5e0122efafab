//! Transports carry a finalized request over the wire.
//!
//! A [`Transport`] takes the frozen headers plus the fully buffered
//! payload and returns a [`PendingResponse`] handle; it never blocks on
//! the response itself. [`H1Transport`] is the built-in HTTP/1.1
//! implementation over an already-connected stream.

mod decode;
mod encode;

use futures_util::future::BoxFuture;
use futures_util::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use http::{HeaderMap, Method, Uri};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::{Error, Result};
use crate::Response;
use decode::decode;
use encode::encode;

/// Capability for executing a finalized request.
///
/// Submission may fail synchronously; otherwise the returned handle
/// resolves to the response (or a transport error) when awaited. The
/// payload arrives fully materialized, never streamed.
pub trait Transport {
    fn send(&mut self, headers: HeaderMap, payload: Vec<u8>) -> Result<PendingResponse>;
}

/// A handle to a response that resolves later.
///
/// Dropping the handle abandons the exchange.
pub struct PendingResponse {
    inner: BoxFuture<'static, Result<Response>>,
}

impl PendingResponse {
    pub fn new(fut: impl Future<Output = Result<Response>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(fut),
        }
    }
}

impl fmt::Debug for PendingResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PendingResponse")
    }
}

impl Future for PendingResponse {
    type Output = Result<Response>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

/// One-shot HTTP/1.1 transport over an already-connected stream.
///
/// Connection setup (and TLS, pooling, retries) is the caller's problem;
/// this just writes one request and reads one response.
pub struct H1Transport<RW> {
    method: Method,
    uri: Uri,
    stream: Option<RW>,
}

impl<RW> H1Transport<RW>
where
    RW: AsyncRead + AsyncWrite + Send + Sync + Unpin + 'static,
{
    pub fn new(method: Method, uri: Uri, stream: RW) -> Self {
        Self {
            method,
            uri,
            stream: Some(stream),
        }
    }
}

impl<RW> Transport for H1Transport<RW>
where
    RW: AsyncRead + AsyncWrite + Send + Sync + Unpin + 'static,
{
    fn send(&mut self, headers: HeaderMap, payload: Vec<u8>) -> Result<PendingResponse> {
        // One stream, one exchange.
        let mut stream = self.stream.take().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "transport stream already consumed",
            ))
        })?;
        let wire = encode(&self.method, &self.uri, &headers, &payload)?;

        Ok(PendingResponse::new(async move {
            stream.write_all(&wire).await?;
            stream.flush().await?;

            let res = decode(stream).await?;

            Ok(res)
        }))
    }
}

#![allow(dead_code)] // not every test file uses every helper

//! Mock server stream for testing the client side

use futures_io::{AsyncRead, AsyncWrite};
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

/// An in-memory duplex stream: reads yield a canned response, writes are
/// recorded for later assertion against the expected request bytes.
#[derive(Clone)]
pub struct Server {
    read_buf: Arc<Mutex<(Vec<u8>, usize)>>,
    write_buf: Arc<Mutex<Vec<u8>>>,
    expected: Vec<u8>,
}

impl Server {
    pub fn new(expected_req: &str, resp: &str) -> Self {
        Self {
            read_buf: Arc::new(Mutex::new((resp.to_owned().into_bytes(), 0))),
            write_buf: Arc::new(Mutex::new(Vec::new())),
            expected: expected_req.to_owned().into_bytes(),
        }
    }

    pub fn assert(self) {
        let write_buf = self.write_buf.lock().unwrap();
        assert_eq!(
            String::from_utf8(write_buf.clone()).unwrap(),
            String::from_utf8(self.expected).unwrap()
        );
    }
}

impl AsyncRead for Server {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        let mut rdr = self.read_buf.lock().unwrap();
        let pos = rdr.1;
        let n = std::cmp::min(buf.len(), rdr.0.len() - pos);
        buf[..n].copy_from_slice(&rdr.0[pos..pos + n]);
        rdr.1 += n;
        Poll::Ready(Ok(n))
    }
}

impl AsyncWrite for Server {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context, buf: &[u8]) -> Poll<io::Result<usize>> {
        let mut wtr = self.write_buf.lock().unwrap();
        wtr.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

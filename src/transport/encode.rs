use http::{header::HOST, HeaderMap, Method, Uri};

use crate::error::{Error, Result};

/// Encode the full wire bytes of a request: head, then buffered payload.
///
/// Content-length is expected to already be in `headers` (the request
/// core puts it there), so it is written out like any other header.
pub(crate) fn encode(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    payload: &[u8],
) -> Result<Vec<u8>> {
    let mut buf: Vec<u8> = vec![];

    // clients are not supposed to send uri frags when retrieving a document
    // removed code for that here, skip to query.
    let mut url = uri.path().to_owned();
    if let Some(query) = uri.query() {
        url.push('?');
        url.push_str(query);
    }

    let val = format!("{} {} HTTP/1.1\r\n", method, url);
    tracing::trace!("> {}", &val);
    buf.extend_from_slice(val.as_bytes());

    if headers.get(HOST).is_none() {
        // Insert Host header from the uri
        let host = uri
            .host()
            .ok_or_else(|| Error::Encode("missing hostname".to_owned()))?;
        let val = if let Some(port) = uri.port() {
            format!("host: {}:{}\r\n", host, port)
        } else {
            format!("host: {}\r\n", host)
        };

        tracing::trace!("> {}", &val);
        buf.extend_from_slice(val.as_bytes());
    }

    for (header, value) in headers.iter() {
        buf.extend_from_slice(header.as_str().as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");
    buf.extend_from_slice(payload);

    Ok(buf)
}

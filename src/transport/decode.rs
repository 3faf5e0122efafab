use futures_io::AsyncRead;
use futures_util::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use http::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH, DATE, TRANSFER_ENCODING},
    StatusCode,
};
use httpdate::fmt_http_date;

use crate::error::{Error, Result};
use crate::{Body, Response};

const CR: u8 = b'\r';
const LF: u8 = b'\n';
const MAX_HEADERS: usize = 128;
const MAX_HEAD_LENGTH: usize = 8 * 1024;

/// Decode an HTTP/1.1 response, buffering the body in full.
pub(crate) async fn decode<R>(reader: R) -> Result<Response>
where
    R: AsyncRead + Unpin + Send + Sync + 'static,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut httparse_res = httparse::Response::new(&mut headers);

    // Keep reading bytes from the stream until we hit the end of the head.
    loop {
        let bytes_read = reader.read_until(LF, &mut buf).await?;
        // No more bytes are yielded from the stream.
        if bytes_read == 0 {
            return Err(Error::Decode("empty response".to_owned()));
        }

        // Prevent CWE-400 DDOS with large HTTP Headers.
        if buf.len() >= MAX_HEAD_LENGTH {
            return Err(Error::Decode(
                "head byte length should be less than 8kb".to_owned(),
            ));
        }

        // We've hit the end delimiter of the stream.
        let idx = buf.len() - 1;
        if idx >= 3 && buf[idx - 3..=idx] == [CR, LF, CR, LF] {
            break;
        }
        if idx >= 1 && buf[idx - 1..=idx] == [LF, LF] {
            break;
        }
    }

    // Convert our header buf into an httparse instance, and validate.
    let status = httparse_res
        .parse(&buf)
        .map_err(|e| Error::Decode(e.to_string()))?;
    if status.is_partial() {
        return Err(Error::Decode("malformed HTTP head".to_owned()));
    }

    let code = httparse_res
        .code
        .ok_or_else(|| Error::Decode("no status code found".to_owned()))?;

    let version = httparse_res
        .version
        .ok_or_else(|| Error::Decode("no version found".to_owned()))?;
    if version != 1 {
        return Err(Error::Decode("unsupported HTTP version".to_owned()));
    }

    let mut headers = HeaderMap::new();
    for header in httparse_res.headers.iter() {
        let value = HeaderValue::from_bytes(header.value).map_err(|e| Error::Decode(e.to_string()))?;
        let name: HeaderName = header
            .name
            .parse()
            .map_err(|e: http::header::InvalidHeaderName| Error::Decode(e.to_string()))?;
        headers.append(name, value);
    }

    if headers.get(DATE).is_none() {
        let date = fmt_http_date(std::time::SystemTime::now());
        let value = HeaderValue::from_str(&date).map_err(|e| Error::Decode(e.to_string()))?;
        headers.insert(DATE, value);
    }

    if headers.get(CONTENT_LENGTH).is_some() && headers.get(TRANSFER_ENCODING).is_some() {
        return Err(Error::Decode("unexpected Content-Length header".to_owned()));
    }

    // Everything is buffered here; chunked responses are not supported.
    if let Some(encoding) = headers.get(TRANSFER_ENCODING).iter().last() {
        if *encoding == "chunked" {
            return Err(Error::Decode(
                "chunked responses are not supported".to_owned(),
            ));
        }
    }

    let mut res = Response::new(Body::empty());

    // Check for Content-Length.
    if let Some(len) = headers.get(CONTENT_LENGTH).iter().last() {
        let len = len
            .to_str()
            .map_err(|e| Error::Decode(e.to_string()))?
            .parse::<usize>()
            .map_err(|e| Error::Decode(e.to_string()))?;
        // the declared length is untrusted; cap the preallocation and let
        // read_to_end grow the buffer from actual bytes
        let mut body = Vec::with_capacity(len.min(MAX_HEAD_LENGTH));
        reader.take(len as u64).read_to_end(&mut body).await?;
        if body.len() != len {
            return Err(Error::Decode("response body shorter than content-length".to_owned()));
        }
        res = Response::new(Body::from_bytes(body));
    }

    *res.status_mut() = StatusCode::from_u16(code).map_err(|e| Error::Decode(e.to_string()))?;

    *res.headers_mut() = headers;

    Ok(res)
}

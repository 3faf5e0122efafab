use crate::error::Error;

/// A fully buffered message body.
///
/// No streaming: the whole body lives in memory, which is what lets the
/// encoder know an exact content-length up front.
#[derive(Debug)]
pub struct Body {
    bytes: Vec<u8>,
}

impl Body {
    /// Create an empty Body
    pub fn empty() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Create a Body from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Body as bytes. Consumes Body.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Body as a String. Consumes Body.
    pub fn into_string(self) -> Result<String, Error> {
        String::from_utf8(self.bytes).map_err(Error::BodyConversion)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self {
            bytes: s.into_bytes(),
        }
    }
}

impl<'a> From<&'a str> for Body {
    fn from(s: &'a str) -> Self {
        Self {
            bytes: s.to_owned().into_bytes(),
        }
    }
}

impl AsRef<[u8]> for Body {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

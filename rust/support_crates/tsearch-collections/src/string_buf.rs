use std::ffi::CString;

use tsearch_common::{Result, error::Error};

/// A growable byte buffer used to accumulate token text.
///
/// # Examples
///
/// ```
/// use tsearch_collections::StringBuf;
///
/// let mut buf = StringBuf::from_bytes(b"post").unwrap();
/// buf.extend_from_slice(b"ing").unwrap();
/// buf.push(b's').unwrap();
///
/// assert_eq!(buf.len(), 8);
/// assert_eq!(buf.byte_at(0), b'p');
/// assert_eq!(buf.to_c_string().unwrap().as_bytes(), b"postings");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct StringBuf {
    bytes: Vec<u8>,
}

impl StringBuf {
    /// Creates an empty buffer.
    pub fn new() -> StringBuf {
        StringBuf { bytes: Vec::new() }
    }

    /// Creates a buffer holding a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<StringBuf> {
        let mut buf = StringBuf::new();
        buf.extend_from_slice(bytes)?;
        Ok(buf)
    }

    /// Number of bytes in the buffer, without any terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the byte at `index`, or `0` when `index` is past the end.
    #[inline]
    pub fn byte_at(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(0)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Appends a single byte.
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.reserve(1)?;
        self.bytes.push(byte);
        Ok(())
    }

    /// Appends all of `bytes`.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?;
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    /// Returns a null-terminated copy of the buffer.
    ///
    /// Fails if the buffer itself contains a NUL byte.
    pub fn to_c_string(&self) -> Result<CString> {
        let mut bytes = Vec::new();
        // One extra byte so the terminator fits without reallocating.
        bytes
            .try_reserve_exact(self.bytes.len() + 1)
            .map_err(|e| Error::allocation("string buffer copy", e))?;
        bytes.extend_from_slice(&self.bytes);
        CString::new(bytes).map_err(|e| {
            Error::invalid_arg("bytes", format!("interior NUL at {}", e.nul_position()))
        })
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn reserve(&mut self, additional: usize) -> Result<()> {
        self.bytes
            .try_reserve(additional)
            .map_err(|e| Error::allocation("string buffer", e))
    }
}

impl std::fmt::Display for StringBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

impl std::fmt::Debug for StringBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StringBuf")
            .field(&String::from_utf8_lossy(&self.bytes))
            .finish()
    }
}

impl From<Vec<u8>> for StringBuf {
    fn from(bytes: Vec<u8>) -> Self {
        StringBuf { bytes }
    }
}

impl AsRef<[u8]> for StringBuf {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

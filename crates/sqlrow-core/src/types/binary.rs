use derive_more::Deref;
use std::fmt::{self, Write as _};

///
/// Binary
///
/// Opaque byte string column value. Orders lexicographically by byte.
///

#[derive(Clone, Debug, Default, Deref, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Binary(Vec<u8>);

impl Binary {
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Render as uppercase hex without separators.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(self.0.len() * 2);
        for byte in &self.0 {
            let _ = write!(out, "{byte:02X}");
        }

        out
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Binary {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_rendering_is_uppercase_and_unseparated() {
        let bin = Binary::from(vec![0x00, 0xAB, 0x7f]);

        assert_eq!(bin.to_string(), "00AB7F");
    }

    #[test]
    fn shorter_prefix_orders_first() {
        assert!(Binary::from(vec![1, 2]) < Binary::from(vec![1, 2, 0]));
        assert!(Binary::from(vec![2]) > Binary::from(vec![1, 9, 9]));
    }
}

use crate::de::error::DecodeError;

pub const SIGNATURE_SIZE: usize = 3;

/// The fixed-width ASCII signature at the start of a GIF stream.
pub type Signature = [u8; SIGNATURE_SIZE];

/// Represents an ongoing parse.
pub struct Parser<'a> {
    data: &'a [u8],
}

impl<'a> Parser<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl Parser<'_> {
    pub const fn bytes_remaining(&self) -> usize {
        self.data.len()
    }

    /// Return the next byte.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - There are no bytes left in the stream.
    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let (&byte, data) = self
            .data
            .split_first()
            .ok_or(DecodeError::UnexpectedEndOfStream { needed: 1 })?;

        self.data = data;
        Ok(byte)
    }

    /// Return the next `size` bytes.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - There are not enough bytes to fill a buffer of size `size`.
    pub fn read_bytes(&mut self, size: usize) -> Result<Vec<u8>, DecodeError> {
        let (result, data) =
            self.data
                .split_at_checked(size)
                .ok_or_else(|| DecodeError::UnexpectedEndOfStream {
                    needed: size.saturating_sub(self.data.len()),
                })?;

        self.data = data;
        Ok(result.to_vec())
    }

    /// Return the next `N` bytes as a fixed-size array.
    ///
    /// GIF uses fixed-width ASCII fields (signature, version, application
    /// identifiers); reading them as arrays keeps comparisons allocation-free.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - There are not enough bytes to fill a buffer of size `N`.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let (result, data) =
            self.data
                .split_at_checked(N)
                .ok_or_else(|| DecodeError::UnexpectedEndOfStream {
                    needed: N.saturating_sub(self.data.len()),
                })?;

        self.data = data;
        Ok(result.try_into().expect("split produced exactly N bytes"))
    }

    /// Return the next two bytes as a little-endian integer.
    ///
    /// All multi-byte integers in a GIF stream (canvas and image dimensions,
    /// positions, delay times, loop counts) are 16-bit little-endian.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - There are fewer than two bytes left in the stream.
    pub fn read_u16_le(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.read_array::<2>()?;
        Ok(u16::from_le_bytes(bytes))
    }

    /// Consume the 3-byte signature, failing unless it matches `expected`.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - There are fewer than three bytes left in the stream.
    /// - The signature does not match.
    pub fn expect_signature(&mut self, expected: Signature) -> Result<(), DecodeError> {
        let (result, data) = self.data.split_at_checked(SIGNATURE_SIZE).ok_or(
            DecodeError::UnexpectedEndOfStream {
                needed: SIGNATURE_SIZE.saturating_sub(self.data.len()),
            },
        )?;

        if result != expected {
            return Err(DecodeError::InvalidSignature {
                actual: (*result).try_into().expect("split produced 3 bytes"),
            });
        }

        self.data = data;
        Ok(())
    }

    /// Concatenate a run of length-prefixed data sub-blocks.
    ///
    /// Each sub-block is a 1-byte length followed by that many payload bytes;
    /// a zero length terminates the run. The payloads are returned as one
    /// contiguous buffer.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - The stream ends before the zero-length terminator sub-block.
    pub fn read_sub_blocks(&mut self) -> Result<Vec<u8>, DecodeError> {
        let mut data = Vec::new();

        loop {
            let size = self.read_byte()?;

            if size == 0 {
                break;
            }

            data.extend_from_slice(&self.read_bytes(usize::from(size))?);
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u16_is_little_endian() {
        let mut parser = Parser::new(&[0x34, 0x12]);
        let value = parser
            .read_u16_le()
            .expect("expected hardcoded bytes to be valid");
        assert_eq!(value, 0x1234);
    }

    #[test]
    fn read_past_end_reports_missing_bytes() {
        let mut parser = Parser::new(&[1, 2]);
        let err = parser.read_bytes(5).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedEndOfStream { needed: 3 }
        ));
        // A failed read consumes nothing.
        assert_eq!(parser.bytes_remaining(), 2);
    }

    #[test]
    fn sub_blocks_concatenate_until_terminator() {
        let data = b"\x03abc\x02de\x00trailing";
        let mut parser = Parser::new(data);
        let payload = parser
            .read_sub_blocks()
            .expect("expected hardcoded bytes to be valid");

        assert_eq!(payload, b"abcde");
        assert_eq!(parser.bytes_remaining(), b"trailing".len());
    }

    #[test]
    fn truncated_sub_block_is_end_of_stream() {
        let mut parser = Parser::new(b"\x05ab");
        let err = parser.read_sub_blocks().unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEndOfStream { .. }));
    }

    #[test]
    fn missing_sub_block_terminator_is_end_of_stream() {
        let mut parser = Parser::new(b"\x02ab");
        let err = parser.read_sub_blocks().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedEndOfStream { needed: 1 }
        ));
    }

    #[test]
    fn signature_mismatch() {
        let mut parser = Parser::new(b"GIT89a");
        let err = parser.expect_signature(*b"GIF").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidSignature { actual } if &actual == b"GIT"
        ));
    }
}

//! The GIF variant of LZW decompression.
//!
//! Codes are read LSB-first at a width that starts at `min_code_size + 1`
//! bits and grows by one bit whenever the dictionary fills the current code
//! space, capped at 12 bits. Decoding is strictly sequential: every code's
//! meaning depends on dictionary state built from all prior codes.

use crate::de::error::DecodeError;

const MAX_CODE_SIZE: u8 = 12;
const MAX_DICT_LEN: usize = 1 << MAX_CODE_SIZE;

/// An LSB-first bit cursor over the concatenated image sub-blocks.
///
/// Code words are packed contiguously across byte boundaries, least
/// significant bit of each byte first.
struct CodeReader<'a> {
    data: &'a [u8],
    /// Position in bits from the start of `data`.
    pos: usize,
}

impl<'a> CodeReader<'a> {
    const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl CodeReader<'_> {
    fn read(&mut self, size: u8) -> Result<u16, DecodeError> {
        let mut code = 0;

        for bit in 0..size {
            let byte = *self.data.get(self.pos / 8).ok_or_else(|| {
                let last_needed = (self.pos + usize::from(size - bit)).div_ceil(8);
                DecodeError::UnexpectedEndOfStream {
                    needed: last_needed - self.data.len(),
                }
            })?;

            if byte & (1 << (self.pos % 8)) != 0 {
                code |= 1 << bit;
            }

            self.pos += 1;
        }

        Ok(code)
    }
}

/// Decompress an image's LZW payload into a flat sequence of color indices.
///
/// # Errors
///
/// This function returns an error if:
///
/// - A code references past the end of the dictionary.
/// - The payload ends before an end-of-information code.
pub(crate) fn decompress(min_code_size: u8, data: &[u8]) -> Result<Vec<u8>, DecodeError> {
    // Color indices are single bytes, so a minimum code size past 8 cannot
    // reference any color table and would push the code space past its
    // 12-bit ceiling.
    if min_code_size > 8 {
        return Err(DecodeError::InvalidLzwCode {
            code: u16::from(min_code_size),
            limit: u16::from(MAX_CODE_SIZE),
        });
    }

    let clear_code = 1 << usize::from(min_code_size);
    let eoi_code = clear_code + 1;

    let mut reader = CodeReader::new(data);
    let mut code_size = min_code_size + 1;
    let mut dict: Vec<Vec<u8>> = Vec::with_capacity(MAX_DICT_LEN);
    reset_dict(&mut dict, clear_code);

    let mut output = Vec::new();
    // The previous code, used to extend the dictionary. `None` right after a
    // clear code, so the first code that follows never grows the dictionary.
    let mut prev: Option<usize> = None;

    loop {
        let code = usize::from(reader.read(code_size)?);

        if code == clear_code {
            reset_dict(&mut dict, clear_code);
            code_size = min_code_size + 1;
            prev = None;
            continue;
        }

        if code == eoi_code {
            break;
        }

        if code < dict.len() {
            if let Some(prev) = prev
                && dict.len() < MAX_DICT_LEN
            {
                let mut entry = dict[prev].clone();
                entry.push(dict[code][0]);
                dict.push(entry);
            }

            output.extend_from_slice(&dict[code]);
        } else if code == dict.len()
            && let Some(prev) = prev
        {
            // The code the encoder assigned on this very step: the previous
            // entry extended by its own first element.
            let mut entry = dict[prev].clone();
            entry.push(dict[prev][0]);
            output.extend_from_slice(&entry);
            dict.push(entry);
        } else {
            return Err(DecodeError::InvalidLzwCode {
                code: code as u16,
                limit: dict.len() as u16,
            });
        }

        prev = Some(code);

        if dict.len() == 1 << usize::from(code_size) && code_size < MAX_CODE_SIZE {
            code_size += 1;
        }
    }

    Ok(output)
}

/// Repopulate the dictionary with the singleton root entries.
///
/// The slots for the clear and end-of-information codes are held by empty
/// entries; both codes are intercepted before any lookup.
fn reset_dict(dict: &mut Vec<Vec<u8>>, clear_code: usize) {
    dict.clear();

    for index in 0..clear_code {
        dict.push(vec![index as u8]);
    }

    dict.push(Vec::new());
    dict.push(Vec::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pack `(code, size)` pairs LSB-first, the inverse of [`CodeReader`].
    fn pack(codes: &[(u16, u8)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut pos = 0usize;

        for &(code, size) in codes {
            for bit in 0..size {
                if pos % 8 == 0 {
                    bytes.push(0);
                }
                if code & (1 << bit) != 0 {
                    *bytes.last_mut().unwrap() |= 1 << (pos % 8);
                }
                pos += 1;
            }
        }

        bytes
    }

    /// A reference encoder emitting only literal codes, tracking the
    /// decoder's dictionary growth so each code is written at the width the
    /// decoder will read it with.
    fn compress_literals(min_code_size: u8, indices: &[u8]) -> Vec<u8> {
        let clear_code = 1usize << min_code_size;
        let mut code_size = min_code_size + 1;
        let mut dict_len = clear_code + 2;
        let mut codes = vec![(clear_code as u16, code_size)];

        for (i, &index) in indices.iter().enumerate() {
            codes.push((u16::from(index), code_size));

            // Every literal after the first grows the dictionary by one.
            if i > 0 && dict_len < MAX_DICT_LEN {
                dict_len += 1;
                if dict_len == 1 << usize::from(code_size) && code_size < MAX_CODE_SIZE {
                    code_size += 1;
                }
            }
        }

        codes.push((clear_code as u16 + 1, code_size));
        pack(&codes)
    }

    #[test]
    fn packed_literals_decode() {
        // clear, 1, 0, 0 (fills the 3-bit space), then 4-bit 1 and EOI.
        let data = pack(&[(4, 3), (1, 3), (0, 3), (0, 3), (1, 4), (5, 4)]);
        assert_eq!(data, [0x0C, 0x10, 0x05]);

        let output = decompress(2, &data).expect("expected hardcoded codes to be valid");
        assert_eq!(output, [1, 0, 0, 1]);
    }

    #[test]
    fn code_width_grows_when_dictionary_fills() {
        // With min code size 2 the dictionary starts at 6 entries; two more
        // reach 8 = 1 << 3, so the fourth data code is read at 4 bits.
        // Feeding it at 3 bits instead would misalign every later code.
        let data = pack(&[(4, 3), (0, 3), (1, 3), (2, 3), (3, 4), (5, 4)]);
        let output = decompress(2, &data).expect("expected hardcoded codes to be valid");
        assert_eq!(output, [0, 1, 2, 3]);
    }

    #[test]
    fn repeated_pattern_uses_dictionary_entries() {
        // clear, 1, 0, then code 6 = [1, 0] (assigned one step earlier),
        // exercising the `code == dict.len()` self-referencing case via
        // code 8 = [1, 0, 1] right after.
        let data = pack(&[(4, 3), (1, 3), (0, 3), (6, 3), (8, 4), (5, 4)]);
        let output = decompress(2, &data).expect("expected hardcoded codes to be valid");
        assert_eq!(output, [1, 0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn code_past_dictionary_is_invalid() {
        let data = pack(&[(4, 3), (1, 3), (7, 3), (5, 4)]);
        let err = decompress(2, &data).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidLzwCode { code: 7, limit: 6 }
        ));
    }

    #[test]
    fn next_code_right_after_clear_is_invalid() {
        // Code 6 == dict.len() immediately after a clear has no previous
        // entry to extend.
        let data = pack(&[(4, 3), (6, 3), (5, 3)]);
        let err = decompress(2, &data).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidLzwCode { code: 6, .. }));
    }

    #[test]
    fn truncated_payload_is_end_of_stream() {
        let data = pack(&[(4, 3), (1, 3)]);
        let err = decompress(2, &data).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEndOfStream { .. }));
    }

    #[test]
    fn oversized_minimum_code_size_is_invalid() {
        let err = decompress(9, &[0; 8]).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidLzwCode { code: 9, .. }));
    }

    #[test]
    fn empty_payload_is_end_of_stream() {
        let err = decompress(2, &[]).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEndOfStream { .. }));
    }

    #[test]
    fn round_trips_reference_encoder_output() {
        let indices = [3, 3, 0, 1, 2, 1, 0, 3, 2, 2, 1, 0];
        let data = compress_literals(2, &indices);
        let output = decompress(2, &data).expect("expected encoder output to be valid");
        assert_eq!(output, indices);
    }

    #[test]
    fn code_width_never_exceeds_twelve_bits() {
        // Enough literals to fill the 12-bit dictionary several times over;
        // growth must stop at 4096 entries with codes staying at 12 bits.
        let indices = (0..10_000u32)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8)
            .collect::<Vec<_>>();

        let data = compress_literals(8, &indices);
        let output = decompress(8, &data).expect("expected encoder output to be valid");
        assert_eq!(output, indices);
    }
}

//! Generalized UTF-8 codepoint codec.
//!
//! Cord text is *generalized* UTF-8: the ordinary 1–4 byte scheme extended
//! to every codepoint up to [`CHAR_MAX`] (`0x1F_FFFF`), including values
//! Unicode reserves or excludes. Characters are therefore carried as `u32`
//! and strings as byte buffers — `char`/`str` cannot represent the full
//! range.
//!
//! The codec is a pair of pure functions with a narrow contract:
//! [`decode_width`] validates a sequence and returns its byte width (or how
//! much of the bad sequence to report), [`read`] extracts the codepoint,
//! and [`encode`] writes 1–4 bytes. A valid sequence always round-trips to
//! identical bytes.

/// Largest encodable codepoint: 4 bytes of generalized UTF-8.
pub const CHAR_MAX: u32 = 0x1F_FFFF;

const XBYTE: u8 = 0b1000_0000;
const XMASK: u8 = 0b1100_0000;
const LEAD2: u8 = 0b1100_0000;
const MASK2: u8 = 0b1110_0000;
const LEAD3: u8 = 0b1110_0000;
const MASK3: u8 = 0b1111_0000;
const LEAD4: u8 = 0b1111_0000;
const MASK4: u8 = 0b1111_1000;

const SHIFT: u32 = 6;
const MAX1: u32 = 0x7F;
const MAX2: u32 = 0x7FF;
const MAX3: u32 = 0xFFFF;

#[inline]
fn byte(bytes: &[u8], i: usize) -> u8 {
    bytes.get(i).copied().unwrap_or(0)
}

#[inline]
fn is_continuation(b: u8) -> bool {
    b & XMASK == XBYTE
}

/// Validate the sequence starting at `bytes[0]` and return its width.
///
/// On failure the error value is the number of bytes (1–4) to include in
/// the diagnostic: the valid leading bytes plus the first offending one.
/// A 4-byte sequence decoding above [`CHAR_MAX`] is invalid in full.
pub fn decode_width(bytes: &[u8]) -> Result<usize, usize> {
    let b0 = byte(bytes, 0);
    if b0 & MASK4 == LEAD4 {
        if byte(bytes, 1) == 0 {
            return Err(1);
        } else if byte(bytes, 2) == 0 || !is_continuation(byte(bytes, 1)) {
            return Err(2);
        } else if byte(bytes, 3) == 0 || !is_continuation(byte(bytes, 2)) {
            return Err(3);
        } else if !is_continuation(byte(bytes, 3)) {
            return Err(4);
        }
        if read(bytes, 4) > CHAR_MAX {
            return Err(4);
        }
        Ok(4)
    } else if b0 & MASK3 == LEAD3 {
        if byte(bytes, 1) == 0 {
            Err(1)
        } else if byte(bytes, 2) == 0 || !is_continuation(byte(bytes, 1)) {
            Err(2)
        } else if !is_continuation(byte(bytes, 2)) {
            Err(3)
        } else {
            Ok(3)
        }
    } else if b0 & MASK2 == LEAD2 {
        if byte(bytes, 1) == 0 {
            Err(1)
        } else if !is_continuation(byte(bytes, 1)) {
            Err(2)
        } else {
            Ok(2)
        }
    } else if b0 & XBYTE != 0 {
        // Lone continuation byte or the unused 0xF8..=0xFF leads.
        Err(1)
    } else {
        Ok(1)
    }
}

/// Read the codepoint of a sequence whose width is already validated.
pub fn read(bytes: &[u8], width: usize) -> u32 {
    match width {
        1 => u32::from(byte(bytes, 0)),
        2 => {
            (u32::from(byte(bytes, 0) & !MASK2) << SHIFT) | u32::from(byte(bytes, 1) & !XMASK)
        }
        3 => {
            (u32::from(byte(bytes, 0) & !MASK3) << (2 * SHIFT))
                | (u32::from(byte(bytes, 1) & !XMASK) << SHIFT)
                | u32::from(byte(bytes, 2) & !XMASK)
        }
        4 => {
            (u32::from(byte(bytes, 0) & !MASK4) << (3 * SHIFT))
                | (u32::from(byte(bytes, 1) & !XMASK) << (2 * SHIFT))
                | (u32::from(byte(bytes, 2) & !XMASK) << SHIFT)
                | u32::from(byte(bytes, 3) & !XMASK)
        }
        _ => 0,
    }
}

/// Encode `cp` into `dest`, returning the number of bytes written (1–4).
///
/// Codepoints above [`CHAR_MAX`] are not representable and must be
/// rejected before encoding.
pub fn encode(cp: u32, dest: &mut [u8; 4]) -> usize {
    #[allow(clippy::cast_possible_truncation)]
    if cp > MAX3 {
        dest[0] = (cp >> (3 * SHIFT)) as u8 | LEAD4;
        dest[1] = ((cp >> (2 * SHIFT)) as u8 & !XMASK) | XBYTE;
        dest[2] = ((cp >> SHIFT) as u8 & !XMASK) | XBYTE;
        dest[3] = (cp as u8 & !XMASK) | XBYTE;
        4
    } else if cp > MAX2 {
        dest[0] = (cp >> (2 * SHIFT)) as u8 | LEAD3;
        dest[1] = ((cp >> SHIFT) as u8 & !XMASK) | XBYTE;
        dest[2] = (cp as u8 & !XMASK) | XBYTE;
        3
    } else if cp > MAX1 {
        dest[0] = (cp >> SHIFT) as u8 | LEAD2;
        dest[1] = (cp as u8 & !XMASK) | XBYTE;
        2
    } else {
        dest[0] = cp as u8;
        1
    }
}

/// Append a readable rendition of `cp` to `out`.
///
/// Named escapes for the common control characters, `\xHH` for the rest of
/// non-graphic ASCII, the character itself otherwise. Codepoints outside
/// Rust's `char` range (possible in generalized UTF-8) fall back to the
/// `\uHHHHHH` escape form.
pub fn escape_char(cp: u32, out: &mut String) {
    use std::fmt::Write as _;
    match cp {
        0x07 => out.push_str("\\a"),
        0x08 => out.push_str("\\b"),
        0x1b => out.push_str("\\e"),
        0x0c => out.push_str("\\f"),
        0x0a => out.push_str("\\n"),
        0x0d => out.push_str("\\r"),
        0x09 => out.push_str("\\t"),
        0x0b => out.push_str("\\v"),
        0x5c => out.push_str("\\\\"),
        0x20..=0x7e => out.push(cp as u8 as char),
        0x00..=0x7f => {
            let _ = write!(out, "\\x{cp:02x}");
        }
        _ => match char::from_u32(cp) {
            Some(c) => out.push(c),
            None => {
                let _ = write!(out, "\\u{cp:06x}");
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(cp: u32) -> (usize, [u8; 4]) {
        let mut buf = [0u8; 4];
        let width = encode(cp, &mut buf);
        (width, buf)
    }

    #[test]
    fn encode_widths() {
        assert_eq!(roundtrip(0x41).0, 1);
        assert_eq!(roundtrip(0xE9).0, 2);
        assert_eq!(roundtrip(0x20AC).0, 3);
        assert_eq!(roundtrip(0x1F600).0, 4);
        assert_eq!(roundtrip(CHAR_MAX).0, 4);
    }

    #[test]
    fn decode_validates_and_reads() {
        let euro = [0xE2, 0x82, 0xAC];
        assert_eq!(decode_width(&euro), Ok(3));
        assert_eq!(read(&euro, 3), 0x20AC);
    }

    #[test]
    fn decode_reports_valid_prefix_length() {
        // Lone continuation byte.
        assert_eq!(decode_width(&[0x80, 0x41]), Err(1));
        // 2-byte lead with a bad continuation.
        assert_eq!(decode_width(&[0xC3, 0x41]), Err(2));
        // 3-byte lead, second continuation bad.
        assert_eq!(decode_width(&[0xE2, 0x82, 0x41]), Err(3));
        // 4-byte lead, last continuation bad.
        assert_eq!(decode_width(&[0xF0, 0x9F, 0x98, 0x41]), Err(4));
        // Truncated at end of input.
        assert_eq!(decode_width(&[0xE2]), Err(1));
        assert_eq!(decode_width(&[0xE2, 0x82]), Err(2));
    }

    #[test]
    fn decode_rejects_beyond_char_max() {
        let mut buf = [0u8; 4];
        // 0x20_0000 encodes as F8 88 80 80, but 0xF8 is not a valid lead,
        // so nothing past CHAR_MAX is reachable through the codec.
        assert_eq!(decode_width(&[0xF8, 0x88, 0x80, 0x80]), Err(1));
        // F7 BF BF BF is the ceiling and decodes to CHAR_MAX itself.
        assert_eq!(decode_width(&[0xF7, 0xBF, 0xBF, 0xBF]), Ok(4));
        assert_eq!(read(&[0xF7, 0xBF, 0xBF, 0xBF], 4), CHAR_MAX);
        // The largest in-range codepoint decodes fine.
        let width = encode(CHAR_MAX, &mut buf);
        assert_eq!(decode_width(&buf[..width]), Ok(4));
        assert_eq!(read(&buf, 4), CHAR_MAX);
    }

    #[test]
    fn surrogates_are_representable() {
        // Generalized UTF-8 carries surrogate codepoints that strict
        // Unicode forbids.
        let (width, buf) = roundtrip(0xD800);
        assert_eq!(width, 3);
        assert_eq!(decode_width(&buf[..width]), Ok(3));
        assert_eq!(read(&buf, 3), 0xD800);
    }

    #[test]
    fn escape_common() {
        let mut out = String::new();
        escape_char(u32::from(b'\n'), &mut out);
        escape_char(u32::from(b'A'), &mut out);
        escape_char(0x01, &mut out);
        escape_char(u32::from(b'\\'), &mut out);
        assert_eq!(out, "\\nA\\x01\\\\");
    }

    #[test]
    fn escape_out_of_char_range() {
        let mut out = String::new();
        escape_char(0xD800, &mut out);
        assert_eq!(out, "\\ud800");
    }
}

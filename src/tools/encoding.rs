extern crate encoding;
use self::encoding::{DecoderTrap, EncoderTrap, Encoding};

// text encoding byte at the start of id3v2.3 text carrying frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TextEncoding {
    // ISO-8859-1, terminated with $00
    Latin1 = 0,
    // UTF-16 with a byte order mark, terminated with $00 00
    UTF16 = 1,
    // UTF-16 big endian without a byte order mark, terminated with $00 00
    UTF16BE = 2,
    // UTF-8, terminated with $00
    UTF8 = 3,
}

impl TextEncoding {
    pub fn from_u8(byte: u8) -> Option<TextEncoding> {
        match byte {
            0 => Some(TextEncoding::Latin1),
            1 => Some(TextEncoding::UTF16),
            2 => Some(TextEncoding::UTF16BE),
            3 => Some(TextEncoding::UTF8),
            _ => None,
        }
    }

    // encoding bytes outside 0-3 are read as utf-8, the most forgiving choice
    pub fn from_u8_lossy(byte: u8) -> TextEncoding {
        match TextEncoding::from_u8(byte) {
            Some(e) => e,
            None => {
                log::debug!("Unknown text encoding {:#04X}, reading as UTF-8", byte);
                TextEncoding::UTF8
            }
        }
    }
}

// Width of the null terminator for strings in `encoding`.
pub fn terminator_len(encoding: TextEncoding) -> usize {
    match encoding {
        TextEncoding::Latin1 | TextEncoding::UTF8 => 1,
        TextEncoding::UTF16 | TextEncoding::UTF16BE => 2,
    }
}

// Number of bytes taken by the string starting at `offset`, terminator included.
//
// Looks at no more than `max_len` bytes. Double-byte terminators only count
// when they sit on a 2-byte boundary relative to `offset`. If no terminator is
// found, the whole remaining length is returned.
pub fn string_byte_count(input: &[u8], offset: usize, max_len: usize, encoding: TextEncoding) -> usize {
    if offset >= input.len() {
        return 0;
    }
    let end = input.len().min(offset.saturating_add(max_len));
    let slice = &input[offset..end];

    match terminator_len(encoding) {
        1 => match slice.iter().position(|&b| b == 0x00) {
            Some(i) => i + 1,
            None => slice.len(),
        },
        _ => match slice.chunks_exact(2).position(|c| c == [0x00, 0x00]) {
            Some(i) => i * 2 + 2,
            None => slice.len(),
        },
    }
}

// Decodes `length` bytes from `offset`, stopping at the first terminator.
//
// Out of range requests are clamped, malformed sequences become U+FFFD and a
// dangling half of a UTF-16 code unit is dropped.
pub fn decode(input: &[u8], offset: usize, length: usize, encoding: TextEncoding) -> String {
    let count = string_byte_count(input, offset, length, encoding);
    if count == 0 {
        return "".to_string();
    }
    let mut slice = &input[offset..offset + count];
    // cut the terminator off, if it is there
    let t = terminator_len(encoding);
    if slice.len() >= t && slice[slice.len() - t..].iter().all(|&b| b == 0x00) {
        slice = &slice[..slice.len() - t];
    }

    match encoding {
        TextEncoding::Latin1 => decode_iso_8859_1(slice),
        TextEncoding::UTF8 => decode_utf8(slice),
        TextEncoding::UTF16 | TextEncoding::UTF16BE => decode_utf16(slice),
    }
}

// Encodes `input` without a terminator.
pub fn encode(input: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Latin1 => encode_iso_8859_1(input),
        TextEncoding::UTF8 => input.as_bytes().to_vec(),
        TextEncoding::UTF16 => {
            use self::encoding::all::UTF_16LE;
            let mut v = vec![0xFF, 0xFE];
            v.append(
                &mut UTF_16LE
                    .encode(input, EncoderTrap::Replace)
                    .unwrap_or_default(),
            );
            v
        }
        TextEncoding::UTF16BE => {
            use self::encoding::all::UTF_16BE;
            UTF_16BE
                .encode(input, EncoderTrap::Replace)
                .unwrap_or_default()
        }
    }
}

// Encodes `input` followed by the terminator of `encoding`.
pub fn encode_terminated(input: &str, encoding: TextEncoding) -> Vec<u8> {
    let mut v = encode(input, encoding);
    v.resize(v.len() + terminator_len(encoding), 0x00);
    v
}

pub fn encode_iso_8859_1(input: &str) -> Vec<u8> {
    use self::encoding::all::ISO_8859_1;
    ISO_8859_1
        .encode(input, EncoderTrap::Replace)
        .unwrap_or_default()
}

pub fn decode_iso_8859_1(input: &[u8]) -> String {
    use self::encoding::all::ISO_8859_1;
    ISO_8859_1
        .decode(input, DecoderTrap::Replace)
        .unwrap_or_default()
        .trim_end_matches('\0')
        .to_string()
}

pub fn decode_utf8(input: &[u8]) -> String {
    use self::encoding::all::UTF_8;
    UTF_8
        .decode(input, DecoderTrap::Replace)
        .unwrap_or_default()
        .trim_end_matches('\0')
        .to_string()
}

pub fn decode_utf16(input: &[u8]) -> String {
    use self::encoding::all::{UTF_16BE, UTF_16LE};
    // a lone trailing byte can never be a code unit
    let input = &input[..input.len() - input.len() % 2];
    if input.len() < 2 {
        return "".to_string();
    }
    match &input[0..2] {
        [0xFF, 0xFE] => UTF_16LE.decode(&input[2..], DecoderTrap::Replace),
        [0xFE, 0xFF] => UTF_16BE.decode(&input[2..], DecoderTrap::Replace),
        // in case of no BOM, assume big endian
        _ => UTF_16BE.decode(input, DecoderTrap::Replace),
    }
    .unwrap_or_default()
    .trim_end_matches('\0')
    .to_string()
}

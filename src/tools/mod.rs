pub mod encoding;
pub mod tags;

use crate::Error;
pub fn tag_error(err: &str) -> Error {
    Error::TagError(err.to_string())
}

// reads at most the first four bytes, most significant first
pub fn decode_int_be_u32(input: &[u8]) -> u32 {
    let input = &input[..input.len().min(4)];
    let mut result: u32 = 0;
    for (i, b) in input.iter().enumerate() {
        result |= (*b as u32) << (8 * (input.len() - 1 - i));
    }
    result
}

pub fn encode_int_be_u32(input: u32) -> [u8; 4] {
    let mut result = [0; 4];
    for i in 0..4 {
        result[i] = (input >> (8 * (3 - i))) as u8;
    }
    result
}

// largest value four base-128 digits can hold
pub const MAX_TAG_SIZE: u32 = 0x0FFFFFFF;

// Every byte is weighted by a power of 128 but not masked to 7 bits, so a byte
// with its top bit set still contributes its full value. Conforming synch-safe
// sizes decode the same either way.
pub fn decode_tag_size(input: [u8; 4]) -> u32 {
    input[0] as u32 * 128 * 128 * 128
        + input[1] as u32 * 128 * 128
        + input[2] as u32 * 128
        + input[3] as u32
}

pub fn encode_tag_size(input: u32) -> Result<[u8; 4], String> {
    if input > MAX_TAG_SIZE {
        return Err(format!(
            "Tag size {} does not fit into four 7 bit bytes",
            input
        ));
    }
    let mut size = input;
    let mut result = [0; 4];
    for i in (0..4).rev() {
        result[i] = (size % 128) as u8;
        size /= 128;
    }
    Ok(result)
}

fn is_frame_id_char(c: char) -> bool {
    (c >= 'A' && c <= 'Z') || (c >= '0' && c <= '9')
}

// ids this crate creates or accepts from callers: four of A-Z and 0-9
pub fn is_valid_frame_id(input: &str) -> bool {
    input.chars().count() == 4 && input.chars().all(is_frame_id_char)
}

// Any four bytes not starting with zero, mapped byte for byte to chars so that
// ids other tools wrote survive a read and write unchanged.
pub fn decode_frame_id(input: &[u8]) -> Result<String, String> {
    if input.len() != 4 {
        return Err(format!("Frame IDs are four characters long, got {:X?}", input));
    }
    if input[0] == 0x00 {
        return Err(format!("Cannot decode {:X?}: padding, not a frame ID", input));
    }
    Ok(input.iter().map(|&b| b as char).collect())
}

// inverse of decode_frame_id
pub fn encode_frame_id(input: &str) -> Result<[u8; 4], String> {
    if input.chars().count() != 4 {
        return Err(format!(
            "Cannot encode \"{}\": Frame IDs are exactly four characters long",
            input
        ));
    }
    let mut v = [0; 4];
    for (i, c) in input.chars().enumerate() {
        if c as u32 > 0xFF {
            return Err(format!(
                "Cannot encode \"{}\": Frame ID characters are single bytes",
                input
            ));
        }
        v[i] = c as u32 as u8;
    }
    if v[0] == 0x00 {
        return Err(format!(
            "Cannot encode \"{}\": Frame IDs cannot start with a zero byte",
            input
        ));
    }
    Ok(v)
}

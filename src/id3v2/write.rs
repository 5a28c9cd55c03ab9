use crate::id3v2::structure::{Frame, Header, HEADER_LEN, TAG_ID};
use crate::id3v2::tools::*;
use crate::tools::encode_int_be_u32;
use crate::Error;

pub fn header(header: &Header) -> Result<[u8; HEADER_LEN], Error> {
    let mut arr = [0; HEADER_LEN];
    arr[0..3].copy_from_slice(TAG_ID);
    arr[3..5].copy_from_slice(&header.version);
    arr[5] = header.flags;
    arr[6..10].copy_from_slice(&encode_tag_size(header.size)?);
    Ok(arr)
}

pub fn frame(frame: &Frame, vec: &mut Vec<u8>) -> Result<(), Error> {
    if frame.data.len() > u32::max_value() as usize {
        return Err(Error::TagError(format!(
            "Frame {} is too large to encode ({} bytes)",
            frame.id,
            frame.data.len()
        )));
    }
    // frame id
    vec.extend_from_slice(&encode_frame_id(&frame.id)?);
    // size, plain big endian
    vec.extend_from_slice(&encode_int_be_u32(frame.data.len() as u32));
    // flags, as they were read
    vec.extend_from_slice(&frame.flags);
    vec.extend_from_slice(&frame.data);
    Ok(())
}

pub fn frames(frames: &[Frame], vec: &mut Vec<u8>) -> Result<(), Error> {
    for f in frames {
        frame(f, vec)?;
    }
    Ok(())
}

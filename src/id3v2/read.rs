use std;

use std::io::prelude::*;

use crate::id3v2::structure::{Frame, Header, HEADER_LEN, TAG_ID};
use crate::id3v2::tools::*;
use crate::tools::decode_int_be_u32;
use crate::Error;

// like read_exact, but a short read is reported as a count instead of an error
fn read_up_to<T: Read>(input: &mut T, buf: &mut [u8]) -> Result<usize, Error> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

// Reads the tag header at the start of `input`.
//
// A missing or short "ID3" marker is not an error, it means there is no tag
// yet and `None` is returned.
pub fn header<T: Read + Seek>(input: &mut T) -> Result<Option<Header>, Error> {
    input.seek(std::io::SeekFrom::Start(0))?;

    let mut arr: [u8; HEADER_LEN] = [0; HEADER_LEN];
    let n = read_up_to(input, &mut arr)?;

    // ID3v2/file identifier      "ID3"
    if n < HEADER_LEN || &arr[0..3] != TAG_ID {
        log::debug!("ID3 tag not found at the start of the stream");
        return Ok(None);
    }

    Ok(Some(Header {
        version: [arr[3], arr[4]],
        flags: arr[5],
        size: decode_tag_size([arr[6], arr[7], arr[8], arr[9]]),
    }))
}

// Reads one frame.
//
// `None` means padding (or the end of the tag region) was reached and the
// caller should stop reading frames.
pub fn frame<T: Read>(input: &mut T) -> Result<Option<Frame>, Error> {
    // 4: Frame ID      $xx xx xx xx  (four characters)
    // 4: Size          $xx xx xx xx
    // 2: Flags         $xx xx
    let mut arr: [u8; 4 + 4 + 2] = [0; 10];
    let n = read_up_to(input, &mut arr)?;

    // check if padding reached
    if n == 0 || arr[0] == 0x00 {
        return Ok(None);
    }
    if n < arr.len() {
        log::warn!("Tag region ends inside a frame header, ignoring {} bytes", n);
        return Ok(None);
    }

    // padding was ruled out above, so any four bytes make an id
    let id = decode_frame_id(&arr[0..4])?;
    if !is_valid_frame_id(&id) {
        log::warn!("Frame ID {:X?} is not A-Z and 0-9, keeping it as is", &arr[0..4]);
    }

    let size = decode_int_be_u32(&arr[4..8]) as u64;
    let flags = [arr[8], arr[9]];
    if flags != [0, 0] {
        log::warn!("Frame {} has flags {:02X?} set, keeping them as is", id, flags);
    }

    let mut data = Vec::new();
    input.by_ref().take(size).read_to_end(&mut data)?;
    if (data.len() as u64) < size {
        log::warn!(
            "Frame {} claims {} bytes but only {} are left",
            id,
            size,
            data.len()
        );
    }

    log::trace!("Read frame {} ({} bytes)", id, data.len());
    Ok(Some(Frame { id, flags, data }))
}

// Reads frames until padding or the end of `input`.
pub fn frames<T: Read>(input: &mut T) -> Result<Vec<Frame>, Error> {
    let mut frames = Vec::new();
    while let Some(f) = frame(input)? {
        frames.push(f);
    }
    Ok(frames)
}

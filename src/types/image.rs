#[derive(PartialEq, Clone)]
pub enum Image {
    PNG(Vec<u8>),
    JPEG(Vec<u8>),
    None,
}

use crc::crc32::checksum_ieee;

use crate::tools::decode_int_be_u32;

// Turns the raw bytes of an embedded picture into something displayable.
//
// Implementations fail by returning `None`; the caller then proceeds
// without an image.
pub trait ImageDecoder {
    type Output;
    fn decode(&self, data: &[u8], mime: &str) -> Option<Self::Output>;
}

// Recognizes PNG and JPEG data by signature, regardless of the declared mime type.
#[derive(Debug, Default, Clone, Copy)]
pub struct SniffDecoder;

impl ImageDecoder for SniffDecoder {
    type Output = Image;

    fn decode(&self, data: &[u8], mime: &str) -> Option<Image> {
        let image = Image::from_bytes(data.to_vec());
        match image.dimensions() {
            Some(_) => Some(image),
            None => {
                log::debug!(
                    "Could not decode {} bytes of picture data declared as \"{}\"",
                    data.len(),
                    mime
                );
                None
            }
        }
    }
}

impl Image {
    pub fn from_bytes(data: Vec<u8>) -> Image {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            Image::PNG(data)
        } else if data.starts_with(&[0xFF, 0xD8]) {
            Image::JPEG(data)
        } else {
            Image::None
        }
    }
    pub fn mime(&self) -> String {
        match self {
            Image::PNG(_) => "image/png".to_string(),
            Image::JPEG(_) => "image/jpeg".to_string(),
            Image::None => "".to_string(),
        }
    }
    pub fn is_some(&self) -> bool {
        match self {
            Image::None => false,
            _ => true,
        }
    }
    pub fn is_none(&self) -> bool {
        !self.is_some()
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Image::PNG(v) | Image::JPEG(v) => Some(v),
            Image::None => None,
        }
    }
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Image::PNG(v) | Image::JPEG(v) => Some(v),
            Image::None => None,
        }
    }
    pub fn crc32(&self) -> Option<u32> {
        self.as_bytes().map(checksum_ieee)
    }
                                      // w    h   bpp
    pub fn dimensions(&self) -> Option<(u32, u32, u8)> {
        match self {
            Image::JPEG(ref v) => {
                if v.len() < 2 || v[0..2] != [0xFF, 0xD8] {
                    return None;
                }

                let mut pos = 2;

                while pos + 8 < v.len() {
                    // find SOFX
                    if v[pos] == 0xFF && v[pos + 1] & 0xF0 == 0xC0 {
                        // [FF CX] [XX XX] [XX] [XX XX] [XX XX]
                        // SOF id   size   bpp   width   height
                        return Some((
                            decode_int_be_u32(&v[pos + 7..pos + 9]),
                            decode_int_be_u32(&v[pos + 5..pos + 7]),
                            v[pos + 4],
                        ));
                    }
                    pos += 2 + decode_int_be_u32(&v[pos + 2..pos + 4]) as usize;
                }

                None
            }
            Image::PNG(ref v) => {
                if v.len() < 25 || v[0..8] != [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
                    None
                } else {
                    Some((
                        decode_int_be_u32(&v[16..20]),
                        decode_int_be_u32(&v[20..24]),
                        v[24],
                    ))
                }
            }
            Image::None => None,
        }
    }
}

impl Default for Image {
    fn default() -> Image {
        Image::None
    }
}

use std::fmt;

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let res = self.dimensions().unwrap_or((0, 0, 0));
        let t = match self {
            Image::PNG(x) => format!(
                "PNG 0x{:X?} ({} bytes, {}x{}, {}bpp)",
                checksum_ieee(x),
                x.len(),
                res.0,
                res.1,
                res.2
            ),
            Image::JPEG(x) => format!(
                "JPEG 0x{:X?} ({} bytes, {}x{}, {}bpp)",
                checksum_ieee(x),
                x.len(),
                res.0,
                res.1,
                res.2
            ),
            Image::None => "None".to_string(),
        };
        write!(f, "{}", t)
    }
}

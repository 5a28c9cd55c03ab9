// Structured views over frame payloads.
//
// The frame id picks the interpreter; everything the store does not know
// how to read stays an opaque byte payload.

use crate::id3v2::regex;
use crate::tools::encoding::*;

pub const YEAR_ID: &str = "TYER";
pub const RATING_ID: &str = "POPM";
pub const PICTURE_ID: &str = "APIC";

pub const FRONT_COVER: u8 = 0x03;
pub const FRONT_COVER_DESCRIPTION: &str = "Album Art";

// Why a payload could not be read by its interpreter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeIssue {
    #[error("Frame payload is empty")]
    Empty,
    #[error("Frame payload ends before the {0}")]
    Truncated(&'static str),
    #[error("Frame {0} is not handled by this interpreter")]
    NotApplicable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    PlainText,
    NumericYear,
    Rating,
    Picture,
    RawOpaque,
}

impl FrameKind {
    pub fn of(id: &str) -> FrameKind {
        match id {
            YEAR_ID => FrameKind::NumericYear,
            RATING_ID => FrameKind::Rating,
            PICTURE_ID => FrameKind::Picture,
            // user defined text carries a description before the value
            "TXXX" => FrameKind::RawOpaque,
            _ if id.starts_with('T') => FrameKind::PlainText,
            _ => FrameKind::RawOpaque,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameContent {
    PlainText(Text),
    NumericYear(String),
    Rating(Popularimeter),
    Picture(Picture),
    RawOpaque(Vec<u8>),
}

impl FrameContent {
    pub fn decode(id: &str, data: &[u8]) -> Result<FrameContent, DecodeIssue> {
        Ok(match FrameKind::of(id) {
            FrameKind::PlainText => FrameContent::PlainText(Text::decode(data)?),
            FrameKind::NumericYear => FrameContent::NumericYear(Text::decode(data)?.text),
            FrameKind::Rating => FrameContent::Rating(Popularimeter::decode(data)?),
            FrameKind::Picture => FrameContent::Picture(Picture::decode(data)?),
            FrameKind::RawOpaque => FrameContent::RawOpaque(data.to_vec()),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            FrameContent::PlainText(t) => t.encode(),
            FrameContent::NumericYear(y) => encode_year(y),
            FrameContent::Rating(p) => p.encode(),
            FrameContent::Picture(p) => p.encode(),
            FrameContent::RawOpaque(v) => v.clone(),
        }
    }

    // text carried by the frame, if it is a text frame
    pub fn text(&self) -> Option<&str> {
        match self {
            FrameContent::PlainText(t) => Some(&t.text),
            FrameContent::NumericYear(y) => Some(y),
            _ => None,
        }
    }
}

/*
 * Text encoding                $xx
 * Information                  <text string according to encoding>
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub encoding: TextEncoding,
    pub text: String,
}

impl Text {
    pub fn new(text: &str, encoding: TextEncoding) -> Text {
        Text {
            encoding,
            text: text.to_string(),
        }
    }

    pub fn decode(data: &[u8]) -> Result<Text, DecodeIssue> {
        // a frame must be at least 1 byte big, excluding the header
        if data.is_empty() {
            return Err(DecodeIssue::Empty);
        }
        let encoding = TextEncoding::from_u8_lossy(data[0]);
        Ok(Text {
            encoding,
            text: decode(data, 1, data.len() - 1, encoding),
        })
    }

    // no terminator is written
    pub fn encode(&self) -> Vec<u8> {
        let mut v = vec![self.encoding as u8];
        v.append(&mut encode(&self.text, self.encoding));
        v
    }
}

// Four digits, zero padded. Anything that is not a year becomes "0000".
pub fn numeric_year(input: &str) -> String {
    match regex::year(input) {
        Some(y) => y,
        None => {
            log::debug!("\"{}\" is not a year, storing 0000", input);
            "0000".to_string()
        }
    }
}

// years are numeric strings, always latin-1 whatever was asked for
fn encode_year(input: &str) -> Vec<u8> {
    let mut v = vec![TextEncoding::Latin1 as u8];
    v.extend_from_slice(numeric_year(input).as_bytes());
    v
}

/*
 * Email to user   <text string> $00
 * Rating          $xx
 * Counter         $xx xx xx xx (xx ...)
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popularimeter {
    pub email: String,
    pub popularity: u8,
}

impl Popularimeter {
    pub fn from_rating(email: &str, rating: u8) -> Popularimeter {
        Popularimeter {
            email: email.to_string(),
            popularity: popularity_from_rating(rating),
        }
    }

    pub fn rating(&self) -> u8 {
        rating_from_popularity(self.popularity)
    }

    pub fn decode(data: &[u8]) -> Result<Popularimeter, DecodeIssue> {
        if data.is_empty() {
            return Err(DecodeIssue::Empty);
        }
        let email_len = string_byte_count(data, 0, data.len(), TextEncoding::Latin1);
        if email_len >= data.len() {
            return Err(DecodeIssue::Truncated("popularity byte"));
        }
        let counter = data.len() - email_len - 1;
        if counter > 0 {
            log::debug!("Ignoring {} bytes of play counter", counter);
        }
        Ok(Popularimeter {
            email: decode(data, 0, email_len, TextEncoding::Latin1),
            popularity: data[email_len],
        })
    }

    // the play counter is never written back
    pub fn encode(&self) -> Vec<u8> {
        let mut v = encode_terminated(&self.email, TextEncoding::Latin1);
        v.push(self.popularity);
        v
    }
}

// 0 to 5 -> 0 to 255
pub fn popularity_from_rating(rating: u8) -> u8 {
    match rating {
        1 => 1,
        2 => 64,
        3 => 128,
        4 => 196,
        5 => 255,
        _ => 0,
    }
}

// 0 to 255 -> 0 to 5
pub fn rating_from_popularity(popularity: u8) -> u8 {
    if popularity == 0 {
        return 0;
    }
    (popularity - 1) / 51 + 1
}

/*
 * Text encoding      $xx
 * MIME type          <text string> $00
 * Picture type       $xx
 * Description        <text string according to encoding> $00 (00)
 * Picture data       <binary data>
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub encoding: TextEncoding,
    pub mime: String,
    pub picture_type: u8,
    pub description: String,
    pub data: Vec<u8>,
}

impl Picture {
    pub fn front_cover(mime: &str, data: Vec<u8>) -> Picture {
        Picture {
            encoding: TextEncoding::UTF16,
            mime: mime.to_string(),
            picture_type: FRONT_COVER,
            description: FRONT_COVER_DESCRIPTION.to_string(),
            data,
        }
    }

    // an empty data section means the frame holds no image
    pub fn image(&self) -> Option<&[u8]> {
        if self.data.is_empty() {
            None
        } else {
            Some(&self.data)
        }
    }

    pub fn decode(data: &[u8]) -> Result<Picture, DecodeIssue> {
        if data.is_empty() {
            return Err(DecodeIssue::Empty);
        }
        let encoding = TextEncoding::from_u8_lossy(data[0]);
        let mut i = 1;

        // always latin-1
        let mime_len = string_byte_count(data, i, data.len() - i, TextEncoding::Latin1);
        let mime = decode(data, i, mime_len, TextEncoding::Latin1);
        i += mime_len;

        if i >= data.len() {
            return Err(DecodeIssue::Truncated("picture type"));
        }
        let picture_type = data[i];
        if picture_type != FRONT_COVER {
            log::debug!("Picture type is {:#04X}, not a front cover", picture_type);
        }
        i += 1;

        // unicode descriptions may start with a BOM, so count bytes rather than chars
        let description_len = string_byte_count(data, i, data.len() - i, encoding);
        let description = decode(data, i, description_len, encoding);
        i += description_len;

        Ok(Picture {
            encoding,
            mime,
            picture_type,
            description,
            data: data[i..].to_vec(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut v = vec![self.encoding as u8];
        v.append(&mut encode_terminated(&self.mime, TextEncoding::Latin1));
        v.push(self.picture_type);
        v.append(&mut encode_terminated(&self.description, self.encoding));
        v.extend_from_slice(&self.data);
        v
    }
}

#[macro_use] extern crate lazy_static;

mod types;
pub use crate::types::Image;
pub use crate::types::ImageDecoder;
pub use crate::types::SniffDecoder;
pub use crate::types::TagOption;
pub use crate::types::Tags;

mod id3v2;
pub use crate::id3v2::content::{
    numeric_year, popularity_from_rating, rating_from_popularity, DecodeIssue, FrameContent,
    FrameKind, Picture, Popularimeter, Text,
};
pub use crate::id3v2::structure::{Frame, Header};
pub use crate::id3v2::{reset_header, State, Tag, WriteOptions};
pub use crate::id3v2::{DEFAULT_PADDING, DEFAULT_RATING_OWNER};

mod dispatch;
mod tools;
pub use crate::tools::encoding;
pub use crate::tools::encoding::TextEncoding;


pub use crate::dispatch::get_front_cover;
pub use crate::dispatch::get_tags;
pub use crate::dispatch::set_tags;

use std::io;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    IOError(#[from] io::Error),
    #[error("Tag error: {0}")]
    TagError(String),
    // Writing a tag of this major version was refused.
    #[error("ID3v2.{0} tags are not supported and will not be written")]
    Unsupported(u8),
}

impl From<String> for Error {
    fn from(err: String) -> Error {
        Error::TagError(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

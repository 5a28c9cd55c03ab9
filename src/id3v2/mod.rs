use std;

use std::fs::{File, OpenOptions};
use std::io::prelude::*;
use std::io::SeekFrom;
use std::path::Path;

use crate::tools::encoding::TextEncoding;
use crate::Error;
use crate::Image;
use crate::ImageDecoder;
use crate::SniffDecoder;
use crate::TagOption;
use crate::Tags;

pub mod content;
mod read;
mod regex;
pub mod structure;
mod tools;
mod write;

use self::content::*;
use self::structure::*;
use self::tools::is_valid_frame_id;

// Zero bytes reserved after the frames when the tag has to grow.
pub const DEFAULT_PADDING: usize = 100;
pub const DEFAULT_RATING_OWNER: &str = "neguse-tagedit";

#[derive(Debug, Clone, PartialEq)]
pub struct WriteOptions {
    pub padding: usize,
    // written as the "email" of rating frames
    pub rating_owner: String,
    // used by text setters that do not ask for an encoding
    pub text_encoding: TextEncoding,
}

impl Default for WriteOptions {
    fn default() -> WriteOptions {
        WriteOptions {
            padding: DEFAULT_PADDING,
            rating_owner: DEFAULT_RATING_OWNER.to_string(),
            text_encoding: TextEncoding::UTF16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Loaded,
    // The tag has this major version and will not be written.
    Unsupported(u8),
}

// title, artist and the rest: plain text frames
macro_rules! text_field {
    ($get:ident, $set:ident, $id:expr) => {
        pub fn $get(&self) -> String {
            self.text($id)
        }
        pub fn $set(&mut self, value: &str) {
            self.set_text($id, value)
        }
    };
}

// An ID3v2.3 tag: the header and the frames, in file order.
#[derive(Debug, Clone)]
pub struct Tag {
    header: Header,
    frames: Vec<Frame>,
    state: State,
    // bytes the tag occupied when read, header and padding included
    old_size: u64,
    options: WriteOptions,
}

impl Default for Tag {
    fn default() -> Tag {
        Tag::new()
    }
}

impl Tag {
    // An empty tag for a file that has none yet.
    pub fn new() -> Tag {
        Tag {
            header: Header::default(),
            frames: Vec::new(),
            state: State::Loaded,
            old_size: 0,
            options: WriteOptions::default(),
        }
    }

    pub fn with_options(mut self, options: WriteOptions) -> Tag {
        self.options = options;
        self
    }

    pub fn set_options(&mut self, options: WriteOptions) {
        self.options = options;
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    // Reads the tag at the start of `input`.
    //
    // Only I/O failures are errors. No tag yields an empty one, and a tag of
    // another major version yields an `Unsupported` tag without frames.
    pub fn read_from<T: Read + Seek>(input: &mut T) -> Result<Tag, Error> {
        let header = match read::header(input)? {
            Some(h) => h,
            // tag not found in the beginning, start a new one
            None => return Ok(Tag::new()),
        };

        let mut tag = Tag {
            old_size: HEADER_LEN as u64 + header.size as u64,
            ..Tag::new()
        };

        if header.major_version() != SUPPORTED_VERSION {
            log::warn!(
                "ID3v2.{}.{} is not supported, only ID3v2.{} is",
                header.version[0],
                header.version[1],
                SUPPORTED_VERSION
            );
            tag.state = State::Unsupported(header.major_version());
            tag.header = header;
            return Ok(tag);
        }

        if header.flags != 0 {
            log::warn!(
                "Tag header flags {:#04X} are not handled, frames are not read",
                header.flags
            );
            tag.header = header;
            return Ok(tag);
        }

        tag.frames = read::frames(&mut input.by_ref().take(header.size as u64))?;
        tag.header = header;
        log::debug!(
            "Read {} frames from a {} byte tag",
            tag.frames.len(),
            tag.old_size
        );
        Ok(tag)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Tag, Error> {
        let mut file = File::open(path)?;
        Tag::read_from(&mut file)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_supported(&self) -> bool {
        self.state == State::Loaded
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    // number of bytes the tag region spans in the file it was read from
    pub fn region_size(&self) -> u64 {
        self.old_size
    }

    pub fn frames(&self) -> &[Frame] {
        match self.state {
            State::Loaded => &self.frames,
            State::Unsupported(_) => &[],
        }
    }

    pub fn frame(&self, id: &str) -> Option<&Frame> {
        self.frames().iter().find(|f| f.id == id)
    }

    pub fn content(&self, id: &str) -> Option<Result<FrameContent, DecodeIssue>> {
        self.frame(id).map(|f| FrameContent::decode(&f.id, &f.data))
    }

    fn writable(&self) -> bool {
        match self.state {
            State::Loaded => true,
            State::Unsupported(v) => {
                log::warn!("Ignoring change to an unsupported ID3v2.{} tag", v);
                false
            }
        }
    }

    fn set_content(&mut self, id: &str, content: &FrameContent) {
        if !self.writable() {
            return;
        }
        let (frames, i) = locate_or_create(std::mem::take(&mut self.frames), id);
        self.frames = frames;
        self.frames[i].data = content.encode();
    }

    // Adds `frame`, or replaces the payload and flags of the frame with its id.
    // Only ids of A-Z and 0-9 are accepted, whatever was read from the file.
    pub fn insert_frame(&mut self, frame: Frame) -> Result<(), Error> {
        if !is_valid_frame_id(&frame.id) {
            return Err(Error::TagError(format!(
                "Invalid frame ID \"{}\" (need four characters of A-Z and 0-9)",
                frame.id
            )));
        }
        if !self.writable() {
            return Ok(());
        }
        let (frames, i) = locate_or_create(std::mem::take(&mut self.frames), &frame.id);
        self.frames = frames;
        self.frames[i] = frame;
        Ok(())
    }

    pub fn remove_frame(&mut self, id: &str) -> Option<Frame> {
        if !self.writable() {
            return None;
        }
        let i = self.frames.iter().position(|f| f.id == id)?;
        Some(self.frames.remove(i))
    }

    // Text of a text frame, or an empty string.
    pub fn text(&self, id: &str) -> String {
        match self.content(id) {
            Some(Ok(c)) => c.text().unwrap_or_default().to_string(),
            Some(Err(e)) => {
                log::debug!("Could not read frame {}: {}", id, e);
                "".to_string()
            }
            None => "".to_string(),
        }
    }

    pub fn set_text(&mut self, id: &str, value: &str) {
        let encoding = self.options.text_encoding;
        self.set_text_with_encoding(id, value, encoding)
    }

    // Stores `value` trimmed. A blank value removes the frame instead.
    pub fn set_text_with_encoding(&mut self, id: &str, value: &str, encoding: TextEncoding) {
        if !is_valid_frame_id(id) {
            log::warn!("Invalid frame ID \"{}\", not setting it", id);
            return;
        }
        let value = value.trim();
        if value.is_empty() {
            self.remove_frame(id);
            return;
        }
        let content = match FrameKind::of(id) {
            FrameKind::PlainText => FrameContent::PlainText(Text::new(value, encoding)),
            FrameKind::NumericYear => FrameContent::NumericYear(numeric_year(value)),
            _ => {
                log::warn!("Frame {} does not hold text, not setting it", id);
                return;
            }
        };
        self.set_content(id, &content);
    }

    text_field!(album, set_album, "TALB");
    text_field!(composer, set_composer, "TCOM");
    // Content type, e.g. "Bollywood Music" or something cryptic like "(0)"
    text_field!(genre, set_genre, "TCON");
    // Writer of the text or lyrics
    text_field!(lyricist, set_lyricist, "TEXT");
    text_field!(title, set_title, "TIT2");
    text_field!(subtitle, set_subtitle, "TIT3");
    // Original artist, for covers of previously released songs
    text_field!(original_artist, set_original_artist, "TOPE");
    // Lead artist(s) or performer(s)
    text_field!(artist, set_artist, "TPE1");
    // All the contributing artists
    text_field!(album_artist, set_album_artist, "TPE2");

    // Track number, e.g. "4/9"
    pub fn track(&self) -> String {
        self.text("TRCK")
    }
    // numeric string, other players may not recognize it in anything but latin-1
    pub fn set_track(&mut self, value: &str) {
        self.set_text_with_encoding("TRCK", value, TextEncoding::Latin1)
    }
    pub fn track_number(&self) -> (Option<u32>, Option<u32>) {
        self::regex::track_number(&self.track())
    }

    pub fn year(&self) -> String {
        self.text(YEAR_ID)
    }
    pub fn set_year(&mut self, value: &str) {
        self.set_text(YEAR_ID, value)
    }

    // Rating from 0 to 5.
    pub fn rating(&self) -> u8 {
        match self.content(RATING_ID) {
            Some(Ok(FrameContent::Rating(p))) => p.rating(),
            Some(Err(e)) => {
                log::debug!("Could not read rating: {}", e);
                0
            }
            _ => 0,
        }
    }

    pub fn set_rating(&mut self, rating: u8) {
        let p = Popularimeter::from_rating(&self.options.rating_owner, rating);
        self.set_content(RATING_ID, &FrameContent::Rating(p));
    }

    pub fn picture(&self) -> Option<Picture> {
        match self.content(PICTURE_ID) {
            Some(Ok(FrameContent::Picture(p))) => Some(p),
            Some(Err(e)) => {
                log::debug!("Could not read picture: {}", e);
                None
            }
            _ => None,
        }
    }

    // Runs the embedded picture through `decoder`.
    pub fn front_cover_with<D: ImageDecoder>(&self, decoder: &D) -> Option<D::Output> {
        let picture = self.picture()?;
        decoder.decode(picture.image()?, &picture.mime)
    }

    pub fn front_cover(&self) -> Image {
        self.front_cover_with(&SniffDecoder).unwrap_or(Image::None)
    }

    pub fn set_front_cover(&mut self, mime: &str, data: Vec<u8>) {
        if data.is_empty() {
            log::warn!("No picture data given, keeping the current picture");
            return;
        }
        let p = Picture::front_cover(mime, data);
        self.set_content(PICTURE_ID, &FrameContent::Picture(p));
    }

    // Image::None removes the picture
    pub fn set_front_cover_image(&mut self, image: &Image) {
        let mime = image.mime();
        match image.as_bytes() {
            Some(data) => self.set_front_cover(&mime, data.to_vec()),
            None => drop(self.remove_frame(PICTURE_ID)),
        }
    }

    fn text_option(&self, id: &str) -> TagOption<String> {
        self.frame(id).map(|_| self.text(id)).into()
    }

    pub fn tags(&self) -> Tags {
        Tags {
            title: self.text_option("TIT2"),
            subtitle: self.text_option("TIT3"),
            album: self.text_option("TALB"),
            artist: self.text_option("TPE1"),
            album_artist: self.text_option("TPE2"),
            original_artist: self.text_option("TOPE"),
            composer: self.text_option("TCOM"),
            lyricist: self.text_option("TEXT"),
            genre: self.text_option("TCON"),
            track: self.text_option("TRCK"),
            year: self.text_option(YEAR_ID),
            rating: self.frame(RATING_ID).map(|_| self.rating()).into(),
            // a picture we cannot decode is left for apply to keep
            front_cover: match (self.frame(PICTURE_ID), self.front_cover()) {
                (None, _) => TagOption::None,
                (Some(_), Image::None) => TagOption::Mixed,
                (Some(_), img) => TagOption::Some(img),
            },
        }
    }

    // `Some` sets a field, `None` removes it and `Mixed` leaves it alone.
    pub fn apply(&mut self, tags: &Tags) {
        crate::tools::tags::apply(self, tags)
    }

    // Writes the tag back to the start of `file`, keeping everything after
    // the old tag region byte for byte.
    //
    // If the frames still fit into the old region the rest is zero padded
    // and nothing after the region is touched. Otherwise everything after
    // the old region is read into memory and written back behind the new tag
    // and `WriteOptions::padding` zero bytes, so memory use grows with the
    // file size.
    //
    // There is no locking and no temporary file: a concurrent writer or a
    // crash during the write can corrupt the file.
    pub fn save<F: Read + Write + Seek>(&mut self, file: &mut F) -> Result<(), Error> {
        if let State::Unsupported(v) = self.state {
            log::warn!("Refusing to write an ID3v2.{} tag", v);
            return Err(Error::Unsupported(v));
        }

        if self.frames.is_empty() {
            log::warn!("Tag has no frames, not writing it");
            return Ok(());
        }

        let old_size = self.old_size;
        let new_size =
            (HEADER_LEN + self.frames.iter().map(Frame::encoded_len).sum::<usize>()) as u64;

        let (padding, rest) = if new_size > old_size {
            // tag does not fit anymore, the audio has to move
            let mut rest = Vec::new();
            file.seek(SeekFrom::Start(old_size))?;
            file.read_to_end(&mut rest)?;
            (self.options.padding as u64, rest)
        } else {
            // zero out what is left of the old tag
            (old_size - new_size, Vec::new())
        };

        let region = new_size + padding;
        let size = region - HEADER_LEN as u64;
        if size > self::tools::MAX_TAG_SIZE as u64 {
            return Err(Error::TagError(format!(
                "Tag of {} bytes is too large to write",
                region
            )));
        }

        // frames are written plainly, so no header flag applies to them
        let header = Header {
            version: self.header.version,
            flags: 0,
            size: size as u32,
        };

        let mut vec: Vec<u8> = Vec::with_capacity(region as usize + rest.len());
        vec.extend_from_slice(&write::header(&header)?);
        write::frames(&self.frames, &mut vec)?;
        vec.resize(region as usize, 0x00);
        vec.extend_from_slice(&rest);

        log::debug!(
            "Writing a {} byte tag ({} bytes of frames, {} of padding) over a {} byte one",
            region,
            new_size,
            padding,
            old_size
        );

        file.seek(SeekFrom::Start(0))?;
        file.write_all(&vec)?;
        file.flush()?;

        self.header = header;
        self.old_size = region;
        Ok(())
    }

    pub fn write_to_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let mut file = OpenOptions::new().read(true).write(true).open(path)?;
        self.save(&mut file)
    }
}

// index of the frame with `id`, appending an empty one if there is none
fn locate_or_create(mut frames: Vec<Frame>, id: &str) -> (Vec<Frame>, usize) {
    match frames.iter().position(|f| f.id == id) {
        Some(i) => (frames, i),
        None => {
            frames.push(Frame::new(id));
            let i = frames.len() - 1;
            (frames, i)
        }
    }
}

// Overwrites the start of `output` with an empty ID3v2.3 header.
pub fn reset_header<W: Write + Seek>(output: &mut W) -> Result<(), Error> {
    output.seek(SeekFrom::Start(0))?;
    output.write_all(&write::header(&Header::default())?)?;
    output.flush()?;
    Ok(())
}

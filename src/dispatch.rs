use std;
use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::id3v2::Tag;
use crate::tools::tag_error;
use crate::Error;
use crate::Image;
use crate::Tags;

macro_rules! unsupported {
    ($path:ident) => {{
        let ext = $path
            .extension()
            .unwrap_or_default()
            .to_str()
            .map(|e| e.to_ascii_lowercase());
        match ext.as_ref().map(|e| e.as_str()) {
            Some("mp3") => (),
            None | Some(_) => return Err(tag_error("Unsupported file format")),
        }
    }};
}

pub fn get_tags<P: AsRef<Path>>(path: P) -> Result<Tags, Error> {
    let path = path.as_ref();
    unsupported!(path);

    let mut file = File::open(path)?;
    Ok(Tag::read_from(&mut file)?.tags())
}

pub fn get_front_cover<P: AsRef<Path>>(path: P) -> Result<Image, Error> {
    let path = path.as_ref();
    unsupported!(path);

    let mut file = File::open(path)?;
    Ok(Tag::read_from(&mut file)?.front_cover())
}

// edits the tag in place, see Tag::save
pub fn set_tags<P: AsRef<Path>>(path: P, tags: &Tags) -> Result<(), Error> {
    let path = path.as_ref();
    unsupported!(path);

    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    let mut tag = Tag::read_from(&mut file)?;
    tag.apply(tags);
    tag.save(&mut file)
}

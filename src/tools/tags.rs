use crate::id3v2::Tag;
use crate::Image;
use crate::TagOption;
use crate::Tags;

// if new has a value, set it
// if new is None, clear the field
// but if new is Mixed, keep whatever the tag has
macro_rules! apply {
    ($tag:ident, $tags:ident, $field:ident, $set:ident) => {{
        match $tags.$field {
            TagOption::Some(ref x) => $tag.$set(x),
            // blank text removes the frame
            TagOption::None => $tag.$set(""),
            TagOption::Mixed => (),
        }
    }};
}

pub fn apply(tag: &mut Tag, tags: &Tags) {
    apply!(tag, tags, title, set_title);
    apply!(tag, tags, subtitle, set_subtitle);
    apply!(tag, tags, album, set_album);
    apply!(tag, tags, artist, set_artist);
    apply!(tag, tags, album_artist, set_album_artist);
    apply!(tag, tags, original_artist, set_original_artist);
    apply!(tag, tags, composer, set_composer);
    apply!(tag, tags, lyricist, set_lyricist);
    apply!(tag, tags, genre, set_genre);
    apply!(tag, tags, track, set_track);
    apply!(tag, tags, year, set_year);

    match tags.rating {
        TagOption::Some(r) => tag.set_rating(r),
        TagOption::None => drop(tag.remove_frame("POPM")),
        TagOption::Mixed => (),
    }

    match tags.front_cover {
        TagOption::Some(ref img) => tag.set_front_cover_image(img),
        TagOption::None => tag.set_front_cover_image(&Image::None),
        TagOption::Mixed => (),
    }
}

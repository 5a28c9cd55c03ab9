use crate::Image;

// A snapshot of the fields a tag editor works with.
//
// Produced by `Tag::tags` and consumed by `Tag::apply`.
#[derive(PartialEq, Debug, Default)]
pub struct Tags {
    pub title: TagOption<String>,
    pub subtitle: TagOption<String>,

    pub album: TagOption<String>,
    pub artist: TagOption<String>,
    pub album_artist: TagOption<String>,
    pub original_artist: TagOption<String>,
    pub composer: TagOption<String>,
    pub lyricist: TagOption<String>,

    pub genre: TagOption<String>,

    // "4" or "4/9"
    pub track: TagOption<String>,
    // always four digits once stored
    pub year: TagOption<String>,

    // 0 to 5
    pub rating: TagOption<u8>,

    pub front_cover: TagOption<Image>,
}

impl Tags {
    pub fn none() -> Tags {
        Default::default()
    }
    pub fn mixed() -> Tags {
        Tags {
            title: TagOption::Mixed,
            subtitle: TagOption::Mixed,
            album: TagOption::Mixed,
            artist: TagOption::Mixed,
            album_artist: TagOption::Mixed,
            original_artist: TagOption::Mixed,
            composer: TagOption::Mixed,
            lyricist: TagOption::Mixed,
            genre: TagOption::Mixed,
            track: TagOption::Mixed,
            year: TagOption::Mixed,
            rating: TagOption::Mixed,
            front_cover: TagOption::Mixed,
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub enum TagOption<T> {
    Some(T),
    Mixed, // the "do not overwrite" option
    None,
}

impl<T> From<Option<T>> for TagOption<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(x) => TagOption::Some(x),
            None => TagOption::None,
        }
    }
}

impl<T> TagOption<T> {
    pub fn to_option(self) -> Option<T> {
        match self {
            TagOption::Some(x) => Some(x),
            _ => None,
        }
    }

    pub fn unwrap_or(self, def: T) -> T {
        match self {
            TagOption::Some(x) => x,
            _ => def,
        }
    }
    pub fn is_some(&self) -> bool {
        match *self {
            TagOption::Some(_) => true,
            _ => false,
        }
    }
    pub fn is_none(&self) -> bool {
        match *self {
            TagOption::None => true,
            _ => false,
        }
    }
    pub fn as_ref(&self) -> TagOption<&T> {
        match *self {
            TagOption::Some(ref x) => TagOption::Some(x),
            TagOption::Mixed => TagOption::Mixed,
            TagOption::None => TagOption::None,
        }
    }
}

impl<T> Default for TagOption<T> {
    fn default() -> TagOption<T> {
        TagOption::None
    }
}

pub(crate) mod image;
pub use image::Image;
pub use image::ImageDecoder;
pub use image::SniffDecoder;

mod tags;
pub use tags::TagOption;
pub use tags::Tags;

pub const HEADER_LEN: usize = 10;
pub const FRAME_HEADER_LEN: usize = 10;
pub const TAG_ID: &[u8; 3] = b"ID3";
pub const SUPPORTED_VERSION: u8 = 3;

/*
 * ID3v2/file identifier      "ID3"
 * ID3v2 version              $03 00
 * ID3v2 flags                %abc00000
 * ID3v2 size             4 * %0xxxxxxx
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    // major, revision
    pub version: [u8; 2],
    pub flags: u8,
    // frames and padding, header excluded
    pub size: u32,
}

impl Header {
    pub fn major_version(&self) -> u8 {
        self.version[0]
    }
}

impl Default for Header {
    fn default() -> Header {
        Header {
            version: [SUPPORTED_VERSION, 0],
            flags: 0,
            size: 0,
        }
    }
}

/*
 * Frame ID   $xx xx xx xx  (four characters)
 * Size       $xx xx xx xx  (big endian)
 * Flags      $xx xx
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub id: String,
    pub flags: [u8; 2],
    // never absent, an empty payload is an empty vec
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(id: &str) -> Frame {
        Frame {
            id: id.to_string(),
            flags: [0, 0],
            data: Vec::new(),
        }
    }

    pub fn with_data(id: &str, data: Vec<u8>) -> Frame {
        Frame {
            data,
            ..Frame::new(id)
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    // bytes this frame takes up on disk
    pub fn encoded_len(&self) -> usize {
        FRAME_HEADER_LEN + self.data.len()
    }
}

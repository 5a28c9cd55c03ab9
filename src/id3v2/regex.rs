extern crate regex;
use self::regex::Regex;

// "4" or "4/9", leading zeroes allowed
pub fn track_number(input: &str) -> (Option<u32>, Option<u32>) {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^(\d+)(/\d+)?$").unwrap();
    }

    match RE.captures(input.trim()) {
        None => (None, None),
        Some(c) => (
            c.get(1).and_then(|s| s.as_str().parse::<u32>().ok()),
            c.get(2).and_then(|s| (&s.as_str()[1..]).parse::<u32>().ok()),
        ),
    }
}

// four digit, zero padded year, or None when the input is not a year we can store
pub fn year(input: &str) -> Option<String> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^\+?(\d+)$").unwrap();
    }

    let digits = RE.captures(input.trim())?.get(1)?.as_str();
    match digits.parse::<u64>() {
        Ok(y) if y <= 9999 => Some(format!("{:04}", y)),
        _ => None,
    }
}

//! Name validation for volumes, object paths, and prefixes on the backing filesystem.

use {lazy_static::lazy_static, regex::Regex};

/// Lower bound of the maximum path length across Linux, macOS, and Windows.
const PATH_MAX: usize = 4096;

/// Names used internally by the storage layer. Object names may not start or end with these.
const RESERVED_KEYWORDS: [&str; 3] = ["$multiparts", "$tmpobject", "$tmpfile"];

#[cfg(windows)]
const VOLUME_NAME_RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

#[cfg(not(windows))]
const VOLUME_NAME_RESERVED_CHARS: &[char] = &['/'];

lazy_static! {
    /// Volume names are 3 to 63 characters long.
    static ref VALID_VOLUME_NAME: Regex = Regex::new(r"^.{3,63}$").unwrap();
}

/// Indicates whether `name` is usable as a volume (bucket directory) name.
pub fn is_valid_volume_name(name: &str) -> bool {
    VALID_VOLUME_NAME.is_match(name) && !name.contains(VOLUME_NAME_RESERVED_CHARS)
}

/// Indicates whether `path` is usable as an object path: non-empty, at most 4096 bytes, and valid
/// UTF-8.
pub fn is_valid_path(path: &[u8]) -> bool {
    !path.is_empty() && path.len() <= PATH_MAX && std::str::from_utf8(path).is_ok()
}

/// Indicates whether `prefix` is usable as a listing prefix. The empty prefix is allowed.
pub fn is_valid_prefix(prefix: &[u8]) -> bool {
    prefix.is_empty() || is_valid_path(prefix)
}

/// Indicates whether `name` ends with a reserved keyword.
pub fn has_reserved_suffix(name: &str) -> bool {
    RESERVED_KEYWORDS.iter().any(|keyword| name.ends_with(keyword))
}

/// Indicates whether `name` starts with a reserved keyword.
pub fn has_reserved_prefix(name: &str) -> bool {
    RESERVED_KEYWORDS.iter().any(|keyword| name.starts_with(keyword))
}

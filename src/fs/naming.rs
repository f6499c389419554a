//! Output file naming.

use std::path::Path;

use crate::error::{Error, Result};

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Name of the `index`-th file of a set: `photo.jpg` becomes `photo_<index>.jpg`.
pub fn indexed_file_name(file_name: &str, index: usize) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, index, ext),
        None => format!("{}_{}", stem, index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_valid() {
        assert_eq!(sanitize_filename("video.mp4").unwrap(), "video.mp4");
        assert_eq!(sanitize_filename("clip:1.mp4").unwrap(), "clip_1.mp4");
        assert_eq!(
            sanitize_filename("what*is?this.mp3").unwrap(),
            "what_is_this.mp3"
        );
    }

    #[test]
    fn test_sanitize_filename_path_traversal() {
        assert!(sanitize_filename("../etc/passwd").is_err());
        assert!(sanitize_filename("..\\windows\\system32").is_err());
    }

    #[test]
    fn test_sanitize_filename_path_separators() {
        assert!(sanitize_filename("path/to/video.mp4").is_err());
        assert!(sanitize_filename("path\\to\\video.mp4").is_err());
    }

    #[test]
    fn test_sanitize_filename_null_and_empty() {
        assert!(sanitize_filename("file\0name.jpg").is_err());
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("   ").is_err());
    }

    #[test]
    fn test_indexed_file_name() {
        assert_eq!(indexed_file_name("photo.jpg", 0), "photo_0.jpg");
        assert_eq!(indexed_file_name("trip.day1.png", 12), "trip.day1_12.png");
        assert_eq!(indexed_file_name("image", 3), "image_3");
    }
}

use anyhow::{Context, Result, anyhow};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

// URI encode every byte except the unreserved characters:
// 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
// Unlike a canonical S3 path, '/' is encoded too so a key stays a single segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[must_use]
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// `.` and `..` are removed by URL normalization, `%2E` included, so they
/// can't be carried as a segment.
#[must_use]
pub fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// Check a value can travel as one path segment and decode back unchanged
///
/// # Errors
///
/// Will return `Err` if the value is `.` or `..`
pub fn check_segment(name: &str, segment: &str) -> Result<()> {
    if is_dot_segment(segment) {
        return Err(anyhow!("{name} can't be '{segment}'"));
    }

    Ok(())
}

/// Check a value can go into the URL as it is, without encoding
///
/// # Errors
///
/// Will return `Err` if the value has characters outside `A-Z a-z 0-9 - . _ ~`
/// or is `.` or `..`
pub fn check_verbatim(name: &str, segment: &str) -> Result<()> {
    check_segment(name, segment)?;

    if encode_segment(segment) != segment {
        return Err(anyhow!(
            "{name} must only contain 'A-Z a-z 0-9 - . _ ~', found '{segment}'"
        ));
    }

    Ok(())
}

/// # Errors
///
/// Will return `Err` if the decoded bytes are not valid UTF-8
pub fn decode_segment(segment: &str) -> Result<String> {
    let decoded = percent_decode_str(segment)
        .decode_utf8()
        .with_context(|| format!("invalid UTF-8 in path segment: {segment}"))?;

    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("my-bucket"), "my-bucket");
        assert_eq!(encode_segment("path/to/file.txt"), "path%2Fto%2Ffile.txt");
        assert_eq!(encode_segment("a b"), "a%20b");
        assert_eq!(encode_segment("a+b"), "a%2Bb");
        assert_eq!(encode_segment("?#&="), "%3F%23%26%3D");
        assert_eq!(encode_segment("A-Z_a.z~09"), "A-Z_a.z~09");
        assert_eq!(encode_segment(""), "");
    }

    #[test]
    fn test_encode_segment_non_ascii() {
        assert_eq!(encode_segment("ñ"), "%C3%B1");
        assert_eq!(encode_segment("文件"), "%E6%96%87%E4%BB%B6");
    }

    #[test]
    fn test_decode_segment_roundtrip() {
        for input in [
            "path/to/file.txt",
            "with space/and more",
            "über/файл 文件.txt",
            "100% legit?#",
            "",
        ] {
            let encoded = encode_segment(input);
            assert!(!encoded.contains('/'));
            assert!(!encoded.contains(' '));
            assert_eq!(decode_segment(&encoded).unwrap(), input);
        }
    }

    #[test]
    fn test_dot_segments_are_normalized_by_url() {
        // encoding the dots doesn't help, "%2E%2E" is a dot segment too
        for segment in ["..", "%2E%2E", ".%2e", "."] {
            let url = url::Url::parse(&format!("http://localhost/temp/k/1/{segment}/key")).unwrap();
            assert_ne!(url.path(), format!("/temp/k/1/{segment}/key"));
        }
    }

    #[test]
    fn test_check_segment() {
        assert!(check_segment("bucket", ".").is_err());
        assert!(check_segment("key", "..").is_err());
        assert!(check_segment("key", "...").is_ok());
        assert!(check_segment("key", ".hidden").is_ok());
        assert!(check_segment("key", "../etc/passwd").is_ok());
        assert!(check_segment("key", "").is_ok());
    }

    #[test]
    fn test_check_verbatim() {
        assert!(check_verbatim("access key", "testkey123").is_ok());
        assert!(check_verbatim("access key", "A-Z_a.z~09").is_ok());
        for invalid in ["k%41", "a b", "k?x", "k#1", "k/1", "ñ", ".", ".."] {
            assert!(
                check_verbatim("access key", invalid).is_err(),
                "{invalid} should be rejected"
            );
        }
    }

    #[test]
    fn test_decode_segment_invalid_utf8() {
        assert!(decode_segment("%FF%FE").is_err());
    }
}

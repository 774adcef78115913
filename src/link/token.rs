use std::fmt::Write;

/// Compute the link token, the MD5 of `timestamp ‖ bucket ‖ key ‖ access_key`
/// rendered as 32 lowercase hex characters.
///
/// The fields are concatenated without separators, a validator must build the
/// exact same string to match. MD5 here is a checksum shared with the server,
/// not an access-control primitive.
#[must_use]
pub fn compute_token(timestamp: u64, bucket: &str, key: &str, access_key: &str) -> String {
    let data = format!("{timestamp}{bucket}{key}{access_key}");

    let digest = md5::compute(data.as_bytes());

    write_hex_bytes(&digest.0)
}

/// Lowercase hex, two characters per byte
#[must_use]
pub(crate) fn write_hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut s, byte| {
            // writing to a String can't fail
            let _ = write!(s, "{byte:02x}");
            s
        })
}

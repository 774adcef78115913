use crate::link::{
    encode::{check_segment, check_verbatim, decode_segment, encode_segment},
    expiry::{expires_at, now},
    token::compute_token,
};
use anyhow::{Context, Result, anyhow};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::fmt;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://localhost";
pub const DEFAULT_ACCESS_KEY: &str = "put_your_key_here";

/// Path segment that marks a temporary link on the server
pub const TEMP_SEGMENT: &str = "temp";

/// Read-only settings shared by every link produced by a [`LinkGenerator`]
#[derive(Debug)]
pub struct Settings {
    pub server_url: String,
    // shared secret, also hashed into the token
    pub access_key: SecretString,
    // seconds
    pub expire: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            access_key: SecretString::new(DEFAULT_ACCESS_KEY.into()),
            expire: crate::link::expiry::DEFAULT_EXPIRE,
        }
    }
}

impl Settings {
    /// The access key goes into the URL as it is, so it's limited to the
    /// unreserved characters `A-Z a-z 0-9 - . _ ~`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the access key can't be carried verbatim in the URL
    pub fn new(server_url: &str, access_key: &str, expire: u64) -> Result<Self> {
        check_verbatim("access key", access_key)?;

        Ok(Self {
            server_url: server_url.to_string(),
            access_key: SecretString::new(access_key.into()),
            expire,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    pub bucket: String,
    pub key: String,
    // unix seconds, `None` reads the clock
    pub timestamp: Option<u64>,
}

impl LinkRequest {
    #[must_use]
    pub fn new(bucket: &str, key: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
            timestamp: None,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkResult {
    pub url: String,
    pub token: String,
    pub timestamp: u64,
    pub expires_at: String,
    pub expires_in_seconds: u64,
}

/// Builds temporary links locally, no request is made to the server.
///
/// The URL carries the access key in plain text and not the token, the server
/// recomputes the token from the URL parts and its own copy of the key.
#[derive(Debug, Default)]
pub struct LinkGenerator {
    settings: Settings,
}

impl LinkGenerator {
    #[must_use]
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// # Errors
    ///
    /// Will return `Err` if bucket or key is `.` or `..`, the clock can't be
    /// read or the expiry can't be represented
    pub fn build_link(&self, request: &LinkRequest) -> Result<LinkResult> {
        check_segment("bucket", &request.bucket)?;
        check_segment("key", &request.key)?;

        let timestamp = match request.timestamp {
            Some(timestamp) => timestamp,
            None => now()?,
        };

        let access_key = self.settings.access_key.expose_secret();

        let token = compute_token(timestamp, &request.bucket, &request.key, access_key);

        log::debug!("token: {token}, timestamp: {timestamp}");

        let url = format!(
            "{}/{TEMP_SEGMENT}/{}/{}/{}/{}",
            self.settings.server_url.trim_end_matches('/'),
            access_key,
            timestamp,
            encode_segment(&request.bucket),
            encode_segment(&request.key)
        );

        Ok(LinkResult {
            url,
            token,
            timestamp,
            expires_at: expires_at(timestamp, self.settings.expire)?,
            expires_in_seconds: self.settings.expire,
        })
    }

    /// Link issued now
    ///
    /// # Errors
    ///
    /// Will return `Err` if the link can't be built, see [`Self::build_link`]
    pub fn create_link(&self, bucket: &str, key: &str) -> Result<LinkResult> {
        self.build_link(&LinkRequest::new(bucket, key))
    }

    /// Link issued at a fixed unix timestamp
    ///
    /// # Errors
    ///
    /// Will return `Err` if the link can't be built, see [`Self::build_link`]
    pub fn create_link_with_timestamp(
        &self,
        bucket: &str,
        key: &str,
        timestamp: u64,
    ) -> Result<LinkResult> {
        self.build_link(&LinkRequest::new(bucket, key).with_timestamp(timestamp))
    }
}

/// The parts of a temporary link URL, decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempLink {
    pub access_key: String,
    pub timestamp: u64,
    pub bucket: String,
    pub key: String,
}

impl TempLink {
    /// Split `<server>/temp/<access key>/<timestamp>/<bucket>/<key>` back into its parts.
    ///
    /// Only the layout is checked, whether the link is still valid is up to the server.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the URL is not a temporary link
    pub fn parse(link: &str) -> Result<Self> {
        let url = Url::parse(link).with_context(|| format!("invalid URL: {link}"))?;

        let segments: Vec<&str> = url
            .path_segments()
            .context("URL can't have a path")?
            .collect();

        let tail = segments
            .len()
            .checked_sub(5)
            .and_then(|start| segments.get(start..))
            .context("not enough path segments for a temporary link")?;

        let [temp, access_key, timestamp, bucket, key] = tail else {
            return Err(anyhow!("not enough path segments for a temporary link"));
        };

        if *temp != TEMP_SEGMENT {
            return Err(anyhow!(
                "expected '/{TEMP_SEGMENT}/' before the access key, found '{temp}'"
            ));
        }

        Ok(Self {
            access_key: decode_segment(access_key)?,
            timestamp: timestamp
                .parse::<u64>()
                .with_context(|| format!("invalid timestamp: {timestamp}"))?,
            bucket: decode_segment(bucket)?,
            key: decode_segment(key)?,
        })
    }

    /// Token the server would compute for this link
    #[must_use]
    pub fn token(&self) -> String {
        compute_token(self.timestamp, &self.bucket, &self.key, &self.access_key)
    }
}

impl fmt::Display for TempLink {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "access key: {}, timestamp: {}, bucket: {}, key: {}",
            self.access_key, self.timestamp, self.bucket, self.key
        )
    }
}

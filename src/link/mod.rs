//! Temporary links
//!
//! A temporary link has the form
//! `<server url>/temp/<access key>/<timestamp>/<bucket>/<key>`, the server
//! validates it by recomputing [`compute_token`] with its own copy of the key.

pub mod encode;
pub mod expiry;
pub mod generator;
pub mod token;

pub use self::{
    encode::{decode_segment, encode_segment},
    expiry::{DEFAULT_EXPIRE, expires_at},
    generator::{LinkGenerator, LinkRequest, LinkResult, Settings, TempLink},
    token::compute_token,
};

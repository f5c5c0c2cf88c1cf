#![allow(clippy::cargo_common_metadata)]

pub mod config;
pub mod error;
pub mod format;
pub mod record;
pub mod tags;
pub mod walker;

#[cfg(feature = "test-utils")]
pub mod test_utils;

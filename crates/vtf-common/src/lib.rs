//! Common utilities for VTF decoding.
//!
//! This crate provides the foundational types shared by the VTF crates:
//!
//! - [`BinaryReader`] - Zero-copy binary reading from byte slices
//! - [`Error`] / [`Result`] - shared error types for structural failures

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

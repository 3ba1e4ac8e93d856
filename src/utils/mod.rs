//! Utility functions for format conversion

pub mod formats;

pub use formats::{from_sprs_csr, to_sprs_csr};

//! KYC Voice — retry-bounded identity-verification interview.

pub mod channels;
pub mod config;
pub mod error;
pub mod interview;
pub mod store;

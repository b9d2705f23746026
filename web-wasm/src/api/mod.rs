//! バックエンドAPI

pub mod school_api;

pub use school_api::{fetch_school_info, fetch_suggestions};

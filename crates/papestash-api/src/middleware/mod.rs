//! HTTP middleware

pub mod error_details;

//! HTTP request handlers.

pub mod notification;

//! Outer adapters

pub mod http;

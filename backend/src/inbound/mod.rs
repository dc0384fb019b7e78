//! Inbound adapters that translate external requests into domain calls.
//!
//! HTTP is the only transport; framework details stay inside [`http`].

pub mod http;

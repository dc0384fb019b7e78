//! Page-number pagination primitives shared by Larder list endpoints.
//!
//! Inbound adapters resolve raw `page`/`limit` query parameters into a
//! [`PageRequest`] using configured [`PageLimits`], domain services return a
//! [`PageSlice`] for the requested window, and the adapter renders the final
//! [`Page`] envelope with absolute `next`/`previous` links.

mod envelope;
mod request;

pub use envelope::{Page, PageSlice};
pub use request::{DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE, PageError, PageLimits, PageRequest};

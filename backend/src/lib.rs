//! Larder: a recipe-sharing backend.
//!
//! Authors publish recipes built from a shared catalogue of tags and
//! ingredients; readers favourite them, collect them in a shopping cart,
//! export an aggregated shopping list and follow authors.
//!
//! The crate is laid out hexagonally: [`domain`] holds the model, ports and
//! services, [`inbound`] adapts HTTP onto the driving ports and [`outbound`]
//! implements the driven ports over PostgreSQL or memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

//! Outbound adapters implementing the domain's driven ports.
//!
//! - `persistence`: PostgreSQL through Diesel and a `bb8` pool.
//! - `memory`: a mutex-guarded in-process store with the same rules.

pub mod memory;
pub mod persistence;

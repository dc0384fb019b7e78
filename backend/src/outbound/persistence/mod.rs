//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories implement the domain's driven ports over a shared
//! [`DbPool`]. Row structs (`models.rs`) and table definitions (`schema.rs`)
//! stay private to this module; only domain types cross the boundary.
//!
//! Constraint violations are the authority on uniqueness and referential
//! integrity: adapters translate them into the matching port error variants
//! rather than checking first and racing.

mod diesel_catalogue_repository;
mod diesel_helpers;
mod diesel_recipe_relation_repository;
mod diesel_recipe_repository;
mod diesel_subscription_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_catalogue_repository::DieselCatalogueRepository;
pub use diesel_recipe_relation_repository::DieselRecipeRelationRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

//! HTTP inbound adapter exposing the recipe REST API.
//!
//! [`configure`] registers every `/api` route; the server mounts it under a
//! scope wrapped in the session middleware.

pub mod catalogue;
pub mod dto;
pub mod error;
pub mod health;
mod query;
pub mod recipes;
pub mod relations;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
mod validation;

use actix_web::web;

pub use error::{ApiResult, json_config};

/// Register the API routes on a scope.
///
/// Literal paths are registered before the `{id}` patterns they overlap.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(catalogue::list_tags)
        .service(catalogue::get_tag)
        .service(catalogue::list_ingredients)
        .service(catalogue::get_ingredient)
        .service(relations::download_shopping_cart)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe)
        .service(recipes::get_recipe)
        .service(recipes::update_recipe)
        .service(recipes::delete_recipe)
        .service(relations::add_favorite)
        .service(relations::remove_favorite)
        .service(relations::add_to_cart)
        .service(relations::remove_from_cart)
        .service(users::list_users)
        .service(users::current_user)
        .service(users::list_subscriptions)
        .service(users::get_user)
        .service(users::subscribe)
        .service(users::subscribe_via_get)
        .service(users::unsubscribe);
}

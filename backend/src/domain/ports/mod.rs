//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports (`*Query`, `*Command`) are the use cases inbound adapters
//! call. Driven ports (`*Repository`) are implemented by storage adapters and
//! expose strongly typed errors so each adapter maps its failures into
//! predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_query;
mod catalogue_repository;
mod recipe_command;
mod recipe_query;
mod recipe_relation_repository;
mod recipe_relations_command;
mod recipe_repository;
mod shopping_list_query;
mod subscription_repository;
mod subscriptions_command;
mod subscriptions_query;
mod user_repository;
mod users_query;

pub use catalogue_query::CatalogueQuery;
#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use catalogue_repository::{CatalogueRepository, CatalogueRepositoryError};
#[cfg(test)]
pub use recipe_command::MockRecipeCommand;
pub use recipe_command::RecipeCommand;
#[cfg(test)]
pub use recipe_query::MockRecipeQuery;
pub use recipe_query::RecipeQuery;
#[cfg(test)]
pub use recipe_relation_repository::MockRecipeRelationRepository;
pub use recipe_relation_repository::{RecipeRelationRepository, RecipeRelationRepositoryError};
#[cfg(test)]
pub use recipe_relations_command::MockRecipeRelationsCommand;
pub use recipe_relations_command::RecipeRelationsCommand;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use shopping_list_query::MockShoppingListQuery;
pub use shopping_list_query::ShoppingListQuery;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{SubscriptionRepository, SubscriptionRepositoryError};
#[cfg(test)]
pub use subscriptions_command::MockSubscriptionsCommand;
pub use subscriptions_command::SubscriptionsCommand;
#[cfg(test)]
pub use subscriptions_query::MockSubscriptionsQuery;
pub use subscriptions_query::SubscriptionsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;

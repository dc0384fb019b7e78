//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! tests can swap in mocks or the in-memory store without touching I/O.

use std::sync::Arc;

use pagination::PageLimits;

use crate::domain::ports::{
    CatalogueQuery, CatalogueRepository, RecipeCommand, RecipeQuery, RecipeRelationRepository,
    RecipeRelationsCommand, RecipeRepository, ShoppingListQuery, SubscriptionRepository,
    SubscriptionsCommand, SubscriptionsQuery, UserRepository, UsersQuery,
};
use crate::domain::{
    CatalogueService, RecipeAuthoringService, RecipeQueryService, RecipeRelationsService,
    ShoppingListService, SubscriptionService, UserDirectoryService,
};

/// Driven adapters the services are built over.
pub struct Repositories<C, R, L, S, U> {
    pub catalogue: Arc<C>,
    pub recipes: Arc<R>,
    pub relations: Arc<L>,
    pub subscriptions: Arc<S>,
    pub users: Arc<U>,
}

/// Parameter object bundling every port implementation handlers call.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub recipes: Arc<dyn RecipeQuery>,
    pub authoring: Arc<dyn RecipeCommand>,
    pub relations: Arc<dyn RecipeRelationsCommand>,
    pub shopping_list: Arc<dyn ShoppingListQuery>,
    pub subscriptions: Arc<dyn SubscriptionsCommand>,
    pub subscriptions_query: Arc<dyn SubscriptionsQuery>,
    pub users: Arc<dyn UsersQuery>,
}

impl HttpStatePorts {
    /// Build every domain service over one set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use larder::inbound::http::state::{HttpStatePorts, Repositories};
    /// use larder::outbound::memory::MemoryStore;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let ports = HttpStatePorts::from_repositories(Repositories {
    ///     catalogue: store.clone(),
    ///     recipes: store.clone(),
    ///     relations: store.clone(),
    ///     subscriptions: store.clone(),
    ///     users: store,
    /// });
    /// let _recipes = ports.recipes.clone();
    /// ```
    pub fn from_repositories<C, R, L, S, U>(repositories: Repositories<C, R, L, S, U>) -> Self
    where
        C: CatalogueRepository + 'static,
        R: RecipeRepository + 'static,
        L: RecipeRelationRepository + 'static,
        S: SubscriptionRepository + 'static,
        U: UserRepository + 'static,
    {
        let Repositories {
            catalogue,
            recipes,
            relations,
            subscriptions,
            users,
        } = repositories;
        let subscription_service = Arc::new(SubscriptionService::new(
            users.clone(),
            subscriptions.clone(),
            recipes.clone(),
        ));
        Self {
            catalogue: Arc::new(CatalogueService::new(catalogue.clone())),
            recipes: Arc::new(RecipeQueryService::new(
                recipes.clone(),
                relations.clone(),
                subscriptions.clone(),
                users.clone(),
            )),
            authoring: Arc::new(RecipeAuthoringService::new(
                catalogue,
                recipes.clone(),
                users.clone(),
            )),
            relations: Arc::new(RecipeRelationsService::new(
                recipes.clone(),
                relations.clone(),
            )),
            shopping_list: Arc::new(ShoppingListService::new(recipes, relations)),
            subscriptions: subscription_service.clone(),
            subscriptions_query: subscription_service,
            users: Arc::new(UserDirectoryService::new(users, subscriptions)),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub recipes: Arc<dyn RecipeQuery>,
    pub authoring: Arc<dyn RecipeCommand>,
    pub relations: Arc<dyn RecipeRelationsCommand>,
    pub shopping_list: Arc<dyn ShoppingListQuery>,
    pub subscriptions: Arc<dyn SubscriptionsCommand>,
    pub subscriptions_query: Arc<dyn SubscriptionsQuery>,
    pub users: Arc<dyn UsersQuery>,
    pub page_limits: PageLimits,
}

impl HttpState {
    /// Construct state from a ports bundle and the configured page sizes.
    pub fn new(ports: HttpStatePorts, page_limits: PageLimits) -> Self {
        let HttpStatePorts {
            catalogue,
            recipes,
            authoring,
            relations,
            shopping_list,
            subscriptions,
            subscriptions_query,
            users,
        } = ports;
        Self {
            catalogue,
            recipes,
            authoring,
            relations,
            shopping_list,
            subscriptions,
            subscriptions_query,
            users,
            page_limits,
        }
    }
}

//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` endpoint, the health probes, the
//! schema-only mirrors from [`crate::inbound::http::schemas`] and the session
//! cookie security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::dto::{
    AuthorResponse, IngredientAmountRequest, IngredientResponse, RecipeIngredientResponse,
    RecipeRequest, RecipeResponse, RecipeSummaryResponse, RecipeWriteResponse,
    SubscriptionResponse, TagResponse, UserResponse,
};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, RecipePageSchema, SubscriptionPageSchema, UserPageSchema,
};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie shared with the authentication service.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Larder API",
        description = "Recipes, catalogue, favourites, shopping cart and subscriptions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::catalogue::list_tags,
        crate::inbound::http::catalogue::get_tag,
        crate::inbound::http::catalogue::list_ingredients,
        crate::inbound::http::catalogue::get_ingredient,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::relations::add_favorite,
        crate::inbound::http::relations::remove_favorite,
        crate::inbound::http::relations::add_to_cart,
        crate::inbound::http::relations::remove_from_cart,
        crate::inbound::http::relations::download_shopping_cart,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::list_subscriptions,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::subscribe,
        crate::inbound::http::users::subscribe_via_get,
        crate::inbound::http::users::unsubscribe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        TagResponse,
        IngredientResponse,
        RecipeIngredientResponse,
        UserResponse,
        AuthorResponse,
        RecipeResponse,
        RecipeWriteResponse,
        RecipeSummaryResponse,
        SubscriptionResponse,
        IngredientAmountRequest,
        RecipeRequest,
        RecipePageSchema,
        UserPageSchema,
        SubscriptionPageSchema,
    )),
    tags(
        (name = "catalogue", description = "Tags and ingredients"),
        (name = "recipes", description = "Recipe reads and authoring"),
        (name = "relations", description = "Favourites, shopping cart and shopping list"),
        (name = "users", description = "User directory and subscriptions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

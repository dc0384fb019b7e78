//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. Regenerate with `diesel print-schema` after changing them.

diesel::table! {
    /// Accounts provisioned by the authentication service.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique e-mail address.
        email -> Varchar,
        /// Unique login name.
        username -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipe labels. `name` and `slug` are unique.
    tags (id) {
        id -> Int8,
        name -> Varchar,
        /// `#RRGGBB` colour, enforced by a CHECK constraint.
        color -> Varchar,
        slug -> Varchar,
    }
}

diesel::table! {
    /// Ingredients, unique per (`name`, `measurement_unit`).
    ingredients (id) {
        id -> Int8,
        name -> Varchar,
        measurement_unit -> Varchar,
    }
}

diesel::table! {
    /// Published recipes. (`author_id`, `name`) is unique.
    recipes (id) {
        id -> Int8,
        /// Foreign key to `users`; cascades on delete.
        author_id -> Uuid,
        name -> Varchar,
        /// Data URI or stored image reference; never empty.
        image -> Text,
        text -> Text,
        /// Minutes, at least one.
        cooking_time -> Int2,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tag links for recipes.
    recipe_tags (recipe_id, tag_id) {
        recipe_id -> Int8,
        tag_id -> Int8,
    }
}

diesel::table! {
    /// Ingredient lines for recipes.
    recipe_ingredients (recipe_id, ingredient_id) {
        recipe_id -> Int8,
        ingredient_id -> Int8,
        /// Quantity in the ingredient's unit, at least one.
        amount -> Int2,
    }
}

diesel::table! {
    /// Favourites and shopping cart entries, distinguished by `kind`.
    recipe_relations (user_id, recipe_id, kind) {
        user_id -> Uuid,
        recipe_id -> Int8,
        /// `favorite` or `shopping_cart`.
        kind -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Follower to author links. A user cannot follow themselves.
    subscriptions (follower_id, author_id) {
        follower_id -> Uuid,
        author_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(recipes -> users (author_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));
diesel::joinable!(recipe_relations -> recipes (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    tags,
    ingredients,
    recipes,
    recipe_tags,
    recipe_ingredients,
    recipe_relations,
    subscriptions,
);

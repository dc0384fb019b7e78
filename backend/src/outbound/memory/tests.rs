//! Behaviour of the in-memory adapter against the driven ports.

use pagination::PageRequest;
use rstest::{fixture, rstest};

use super::MemoryStore;
use crate::domain::fixtures::{PNG_DATA_URI, user};
use crate::domain::ports::{
    CatalogueRepository, RecipeRelationRepository, RecipeRelationRepositoryError,
    RecipeRepository, RecipeRepositoryError, SubscriptionRepository,
    SubscriptionRepositoryError, UserRepository,
};
use crate::domain::{
    IngredientLinePayload, IngredientSearch, KnownReferences, RecipeDraft, RecipeFilter,
    RecipeId, RecipePayload, RelationKind, Tag, User, UserId,
};

struct Seeded {
    store: MemoryStore,
    chef: User,
    guest: User,
    breakfast: Tag,
    dinner: Tag,
}

#[fixture]
fn seeded() -> Seeded {
    let store = MemoryStore::new();
    let chef = user("chef");
    let guest = user("guest");
    store.upsert_user(chef.clone());
    store.upsert_user(guest.clone());
    let dinner = store.add_tag("Dinner", "#112233", "dinner");
    let breakfast = store.add_tag("Breakfast", "#445566", "breakfast");
    store.add_ingredient("Sugar", "g");
    store.add_ingredient("Flour", "g");
    store.add_ingredient("sugar", "tbsp");
    Seeded {
        store,
        chef,
        guest,
        breakfast,
        dinner,
    }
}

fn draft(name: &str, tags: &[&Tag]) -> RecipeDraft {
    let payload = RecipePayload {
        name: name.to_owned(),
        image: PNG_DATA_URI.to_owned(),
        text: "Stir.".to_owned(),
        cooking_time: 10,
        tag_ids: tags.iter().map(|tag| tag.id.get()).collect(),
        ingredients: vec![
            IngredientLinePayload {
                ingredient_id: 1,
                amount: 5,
            },
            IngredientLinePayload {
                ingredient_id: 2,
                amount: 100,
            },
        ],
    };
    let known = KnownReferences::new(payload.referenced_tags(), payload.referenced_ingredients());
    RecipeDraft::parse(payload, &known).expect("draft is valid")
}

#[rstest]
#[tokio::test]
async fn created_recipe_reads_back_with_sorted_children(seeded: Seeded) {
    let id = seeded
        .store
        .create(&seeded.chef.id, &draft("Porridge", &[&seeded.dinner, &seeded.breakfast]))
        .await
        .expect("create succeeds");

    let recipe = RecipeRepository::find_by_id(&seeded.store, id)
        .await
        .expect("read succeeds")
        .expect("recipe exists");
    let tags: Vec<&str> = recipe.tags.iter().map(|tag| tag.slug.as_str()).collect();
    let lines: Vec<(&str, i16)> = recipe
        .ingredients
        .iter()
        .map(|line| (line.ingredient.name.as_str(), line.amount.get()))
        .collect();
    assert_eq!(tags, vec!["breakfast", "dinner"]);
    assert_eq!(lines, vec![("Flour", 100), ("Sugar", 5)]);
    assert_eq!(recipe.author, seeded.chef.id);
}

#[rstest]
#[tokio::test]
async fn duplicate_name_for_same_author_is_rejected(seeded: Seeded) {
    let store = &seeded.store;
    store
        .create(&seeded.chef.id, &draft("Soup", &[&seeded.dinner]))
        .await
        .expect("first create");
    let err = store
        .create(&seeded.chef.id, &draft("Soup", &[&seeded.dinner]))
        .await
        .expect_err("duplicate rejected");
    assert_eq!(err, RecipeRepositoryError::duplicate_name("Soup"));

    store
        .create(&seeded.guest.id, &draft("Soup", &[&seeded.dinner]))
        .await
        .expect("another author may reuse the name");
}

#[rstest]
#[tokio::test]
async fn replace_swaps_children_and_reports_missing_recipe(seeded: Seeded) {
    let store = &seeded.store;
    let id = store
        .create(&seeded.chef.id, &draft("Toast", &[&seeded.dinner]))
        .await
        .expect("create");
    store
        .replace(id, &draft("Toast", &[&seeded.breakfast]))
        .await
        .expect("replace");
    let recipe = RecipeRepository::find_by_id(store, id)
        .await
        .expect("read")
        .expect("exists");
    assert_eq!(recipe.tags, vec![seeded.breakfast.clone()]);

    let err = store
        .replace(RecipeId::new(99), &draft("Toast", &[&seeded.dinner]))
        .await
        .expect_err("unknown recipe");
    assert_eq!(err, RecipeRepositoryError::not_found(99));
}

#[rstest]
#[tokio::test]
async fn tag_filter_matches_any_slug_once(seeded: Seeded) {
    let store = &seeded.store;
    store
        .create(&seeded.chef.id, &draft("Both", &[&seeded.dinner, &seeded.breakfast]))
        .await
        .expect("create");
    store
        .create(&seeded.chef.id, &draft("Dinner only", &[&seeded.dinner]))
        .await
        .expect("create");
    let query = RecipeFilter {
        tags: vec!["dinner".to_owned(), "breakfast".to_owned()],
        ..RecipeFilter::default()
    }
    .resolve(None);

    let page = RecipeRepository::list(store, &query, PageRequest::first(10))
        .await
        .expect("list");
    let names: Vec<&str> = page.items.iter().map(|recipe| recipe.name.as_str()).collect();
    assert_eq!(page.total, 2);
    assert_eq!(names, vec!["Both", "Dinner only"]);
}

#[rstest]
#[tokio::test]
async fn relation_filters_and_cascade_on_delete(seeded: Seeded) {
    let store = &seeded.store;
    let kept = store
        .create(&seeded.chef.id, &draft("Kept", &[&seeded.dinner]))
        .await
        .expect("create");
    let doomed = store
        .create(&seeded.chef.id, &draft("Doomed", &[&seeded.dinner]))
        .await
        .expect("create");
    for id in [kept, doomed] {
        RecipeRelationRepository::insert(store, RelationKind::Favorite, &seeded.guest.id, id)
            .await
            .expect("favourite");
    }
    let favourites = RecipeFilter {
        is_favorited: true,
        ..RecipeFilter::default()
    }
    .resolve(Some(&seeded.guest.id));
    assert_eq!(
        RecipeRepository::list(store, &favourites, PageRequest::first(10))
            .await
            .expect("list")
            .total,
        2
    );

    assert!(RecipeRepository::delete(store, doomed).await.expect("delete"));
    let remaining = store
        .recipe_ids(RelationKind::Favorite, &seeded.guest.id)
        .await
        .expect("ids");
    assert_eq!(remaining, vec![kept]);
    assert!(!RecipeRepository::delete(store, doomed).await.expect("second delete"));
}

#[rstest]
#[tokio::test]
async fn relation_insert_reports_duplicates_and_missing_recipes(seeded: Seeded) {
    let store = &seeded.store;
    let id = store
        .create(&seeded.chef.id, &draft("Pie", &[&seeded.dinner]))
        .await
        .expect("create");
    let kind = RelationKind::ShoppingCart;
    RecipeRelationRepository::insert(store, kind, &seeded.guest.id, id)
        .await
        .expect("first insert");

    let duplicate = RecipeRelationRepository::insert(store, kind, &seeded.guest.id, id).await;
    let missing =
        RecipeRelationRepository::insert(store, kind, &seeded.guest.id, RecipeId::new(42)).await;
    assert_eq!(duplicate, Err(RecipeRelationRepositoryError::already_exists()));
    assert_eq!(missing, Err(RecipeRelationRepositoryError::missing_recipe()));

    let other_kind =
        RecipeRelationRepository::insert(store, RelationKind::Favorite, &seeded.guest.id, id)
            .await;
    assert!(other_kind.is_ok());
}

#[rstest]
#[tokio::test]
async fn writes_for_unknown_accounts_are_rejected(seeded: Seeded) {
    let store = &seeded.store;
    let id = store
        .create(&seeded.chef.id, &draft("Pie", &[&seeded.dinner]))
        .await
        .expect("create");
    let ghost = UserId::random();

    assert_eq!(
        RecipeRelationRepository::insert(store, RelationKind::Favorite, &ghost, id).await,
        Err(RecipeRelationRepositoryError::missing_user())
    );
    assert_eq!(
        SubscriptionRepository::insert(store, &ghost, &seeded.chef.id).await,
        Err(SubscriptionRepositoryError::missing_follower())
    );
    assert!(
        store
            .recipe_ids(RelationKind::Favorite, &ghost)
            .await
            .expect("ids")
            .is_empty()
    );
    assert!(
        store
            .followed_among(&ghost, &[seeded.chef.id.clone()])
            .await
            .expect("followed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn subscriptions_enforce_rules_and_keep_order(seeded: Seeded) {
    let store = &seeded.store;
    let third = user("baker");
    store.upsert_user(third.clone());
    let guest = &seeded.guest.id;

    assert_eq!(
        SubscriptionRepository::insert(store, guest, guest).await,
        Err(SubscriptionRepositoryError::self_subscription())
    );
    assert_eq!(
        SubscriptionRepository::insert(store, guest, &user("ghost").id).await,
        Err(SubscriptionRepositoryError::missing_author())
    );
    SubscriptionRepository::insert(store, guest, &seeded.chef.id)
        .await
        .expect("subscribe chef");
    SubscriptionRepository::insert(store, guest, &third.id)
        .await
        .expect("subscribe baker");
    assert_eq!(
        SubscriptionRepository::insert(store, guest, &third.id).await,
        Err(SubscriptionRepositoryError::already_subscribed())
    );

    let page = store
        .list_authors(guest, PageRequest::first(10))
        .await
        .expect("list");
    assert_eq!(page.total, 2);
    assert_eq!(page.items, vec![seeded.chef.id.clone(), third.id.clone()]);

    assert!(SubscriptionRepository::delete(store, guest, &seeded.chef.id)
        .await
        .expect("unsubscribe"));
    assert!(!SubscriptionRepository::delete(store, guest, &seeded.chef.id)
        .await
        .expect("second unsubscribe"));
}

#[rstest]
#[tokio::test]
async fn ingredient_search_is_case_insensitive_prefix(seeded: Seeded) {
    let found = seeded
        .store
        .list_ingredients(&IngredientSearch::new(Some("SU".to_owned())))
        .await
        .expect("search");
    let names: Vec<(&str, &str)> = found
        .iter()
        .map(|item| (item.name.as_str(), item.measurement_unit.as_str()))
        .collect();
    assert_eq!(names, vec![("Sugar", "g"), ("sugar", "tbsp")]);
}

#[rstest]
#[tokio::test]
async fn users_are_listed_by_username(seeded: Seeded) {
    let page = UserRepository::list(&seeded.store, PageRequest::first(1))
        .await
        .expect("list");
    assert_eq!(page.total, 2);
    assert_eq!(page.items, vec![seeded.chef.clone()]);
}

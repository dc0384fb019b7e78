//! Recipe list filtering.
//!
//! Clients send a [`RecipeFilter`]; the query service resolves it against the
//! viewer into a [`RecipeListQuery`] that storage adapters execute. Resolving
//! drops viewer-relative flags for anonymous callers, so an anonymous
//! `is_favorited=true` lists every recipe.

use super::relations::RelationKind;
use super::user::UserId;

/// Raw list filter taken from query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Only recipes by this author.
    pub author: Option<UserId>,
    /// Tag slugs; a recipe matches when it carries any of them.
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// A bookmark restriction: the recipe must be in `user`'s `kind` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRestriction {
    pub kind: RelationKind,
    pub user: UserId,
}

/// Storage-level recipe list criteria. All restrictions are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeListQuery {
    pub author: Option<UserId>,
    /// Sorted, deduplicated slugs matched with OR. Empty means no tag filter.
    pub tag_slugs: Vec<String>,
    pub relations: Vec<RelationRestriction>,
}

impl RecipeFilter {
    /// Bind viewer-relative flags to `viewer`.
    ///
    /// # Examples
    /// ```
    /// use larder::domain::{RecipeFilter, RelationKind, UserId};
    ///
    /// let filter = RecipeFilter {
    ///     tags: vec!["lunch".to_owned(), "breakfast".to_owned(), "lunch".to_owned()],
    ///     is_favorited: true,
    ///     ..RecipeFilter::default()
    /// };
    ///
    /// let anonymous = filter.clone().resolve(None);
    /// assert!(anonymous.relations.is_empty());
    /// assert_eq!(anonymous.tag_slugs, vec!["breakfast", "lunch"]);
    ///
    /// let viewer = UserId::random();
    /// let signed_in = filter.resolve(Some(&viewer));
    /// assert_eq!(signed_in.relations[0].kind, RelationKind::Favorite);
    /// assert_eq!(signed_in.relations[0].user, viewer);
    /// ```
    pub fn resolve(self, viewer: Option<&UserId>) -> RecipeListQuery {
        let Self {
            author,
            tags,
            is_favorited,
            is_in_shopping_cart,
        } = self;

        let mut tag_slugs: Vec<String> = tags
            .into_iter()
            .map(|slug| slug.trim().to_owned())
            .filter(|slug| !slug.is_empty())
            .collect();
        tag_slugs.sort_unstable();
        tag_slugs.dedup();

        let mut relations = Vec::new();
        if let Some(user) = viewer {
            for (wanted, kind) in [
                (is_favorited, RelationKind::Favorite),
                (is_in_shopping_cart, RelationKind::ShoppingCart),
            ] {
                if wanted {
                    relations.push(RelationRestriction {
                        kind,
                        user: user.clone(),
                    });
                }
            }
        }

        RecipeListQuery {
            author,
            tag_slugs,
            relations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, false, 0)]
    #[case(true, false, 1)]
    #[case(true, true, 2)]
    fn flags_become_restrictions_for_signed_in_viewers(
        #[case] favorited: bool,
        #[case] in_cart: bool,
        #[case] expected: usize,
    ) {
        let viewer = UserId::random();
        let filter = RecipeFilter {
            is_favorited: favorited,
            is_in_shopping_cart: in_cart,
            ..RecipeFilter::default()
        };
        let query = filter.resolve(Some(&viewer));
        assert_eq!(query.relations.len(), expected);
        assert!(query.relations.iter().all(|rule| rule.user == viewer));
    }

    #[rstest]
    fn anonymous_flags_are_ignored() {
        let author = UserId::random();
        let filter = RecipeFilter {
            author: Some(author.clone()),
            tags: Vec::new(),
            is_favorited: true,
            is_in_shopping_cart: true,
        };
        let query = filter.resolve(None);
        assert_eq!(query.author, Some(author));
        assert!(query.relations.is_empty());
    }

    #[rstest]
    fn blank_tags_are_dropped() {
        let filter = RecipeFilter {
            tags: vec![" ".to_owned(), "dinner".to_owned()],
            ..RecipeFilter::default()
        };
        assert_eq!(filter.resolve(None).tag_slugs, vec!["dinner"]);
    }
}

//! Per-user recipe bookmarks: favourites and the shopping cart.
//!
//! Both relations share a table and differ only by [`RelationKind`]. A user
//! can hold at most one relation of each kind per recipe.

use std::fmt;

/// Which list a recipe bookmark belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationKind {
    Favorite,
    ShoppingCart,
}

impl RelationKind {
    /// Both kinds, in storage order.
    pub const ALL: [Self; 2] = [Self::Favorite, Self::ShoppingCart];

    /// Stable storage label.
    ///
    /// # Examples
    /// ```
    /// use larder::domain::RelationKind;
    ///
    /// assert_eq!(RelationKind::ShoppingCart.as_str(), "shopping_cart");
    /// assert_eq!(RelationKind::parse("favorite"), Some(RelationKind::Favorite));
    /// assert_eq!(RelationKind::parse("wishlist"), None);
    /// ```
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::ShoppingCart => "shopping_cart",
        }
    }

    /// Parse a storage label.
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == label)
    }

    /// Human-readable list name used in error messages.
    pub const fn list_name(self) -> &'static str {
        match self {
            Self::Favorite => "favourites",
            Self::ShoppingCart => "shopping cart",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Viewer-relative bookmark flags for a single recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerFlags {
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl ViewerFlags {
    /// Set the flag matching `kind`.
    pub fn mark(&mut self, kind: RelationKind) {
        match kind {
            RelationKind::Favorite => self.is_favorited = true,
            RelationKind::ShoppingCart => self.is_in_shopping_cart = true,
        }
    }
}

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Name of a content category: a structural slot such as "block content".
///
/// Categories are open. The baseline ones are available as constants, and
/// extensions may define more through
/// [`Registry::define_category`](super::Registry::define_category).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Category(Cow<'static, str>);

impl Category {
    /// Top-level document and section content.
    pub const BLOCK: Category = Category::from_static("block");
    /// Out-of-band reference targets.
    pub const DEFINITION: Category = Category::from_static("definition");
    /// Inline content that cannot contain a link.
    pub const STATIC_PHRASING: Category = Category::from_static("static-phrasing");
    /// Static phrasing content plus links. Derived from [`Self::STATIC_PHRASING`].
    pub const PHRASING: Category = Category::from_static("phrasing");
    /// Block and definition content. Derived from [`Self::BLOCK`] and
    /// [`Self::DEFINITION`].
    pub const FLOW: Category = Category::from_static("flow");
    /// Children of a list.
    pub const LIST: Category = Category::from_static("list");
    /// Children of a table.
    pub const TABLE: Category = Category::from_static("table");
    /// Children of a table row.
    pub const ROW: Category = Category::from_static("row");
    /// Children of a gallery.
    pub const GALLERY: Category = Category::from_static("gallery");

    /// Category with a static name.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Category with any name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Name of the category.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Category {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

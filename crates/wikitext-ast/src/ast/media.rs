//! Image and file embeds.
//!
//! Media options are kept as the strings the parser saw. Their legal forms
//! are a closed set of literals plus a few parametrized patterns, checked by
//! the constraints returned from [`Media::specs`].

use ecow::EcoString;
use once_cell::sync::Lazy;
use regex::Regex;

use super::attributes::Attributes;
use super::bundles::{Alternative, Resource};
use crate::error::SchemaResult;
use crate::schema::{AttributeSpec, Constraint};

/// Accepted `kind` literals.
pub const MEDIA_KINDS: &[&str] = &["thumb", "thumbnail", "frame", "framed", "frameless", "border"];

/// Accepted `location` literals (horizontal placement).
pub const MEDIA_LOCATIONS: &[&str] = &["left", "right", "center", "none"];

/// Accepted `alignment` literals (vertical alignment against text).
pub const MEDIA_ALIGNMENTS: &[&str] = &[
    "baseline",
    "sub",
    "super",
    "top",
    "text-top",
    "middle",
    "bottom",
    "text-bottom",
];

static SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]+px|x[0-9]+px|[0-9]+x[0-9]+px|upright|upright=(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+))$")
        .expect("media size pattern")
});

/// Whether `value` is a legal media size: `<n>px`, `x<n>px`, `<n>x<n>px`,
/// `upright` or `upright=<number>`.
pub fn is_media_size(value: &str) -> bool {
    SIZE.is_match(value)
}

/// Presentation options of an embed. Values are opaque to this crate beyond
/// their accepted spelling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaOptions {
    /// Frame style
    pub kind: Option<EcoString>,
    /// Horizontal placement
    pub location: Option<EcoString>,
    /// Vertical alignment
    pub alignment: Option<EcoString>,
    /// Size or upright factor
    pub size: Option<EcoString>,
    /// Link target overriding the file description page
    pub link: Option<EcoString>,
    /// Page of a multi-page file
    pub page: Option<EcoString>,
    /// Language of a multilingual file
    pub lang: Option<EcoString>,
    /// Caption text
    pub caption: Option<EcoString>,
}

/// An `image` or `file` embed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Media {
    /// Embedded file
    pub resource: Resource,
    /// Accessible text
    pub alternative: Alternative,
    /// Presentation options
    pub options: MediaOptions,
}

impl Media {
    /// Creates an embed of `url` without options.
    pub fn new(url: impl Into<EcoString>) -> Self {
        Self {
            resource: Resource::new(url),
            ..Self::default()
        }
    }

    /// Sets the accessible text.
    pub fn with_alt(mut self, alt: impl Into<EcoString>) -> Self {
        self.alternative.alt = Some(alt.into());
        self
    }

    /// Sets the frame style.
    pub fn with_kind(mut self, kind: impl Into<EcoString>) -> Self {
        self.options.kind = Some(kind.into());
        self
    }

    /// Sets the horizontal placement.
    pub fn with_location(mut self, location: impl Into<EcoString>) -> Self {
        self.options.location = Some(location.into());
        self
    }

    /// Sets the vertical alignment.
    pub fn with_alignment(mut self, alignment: impl Into<EcoString>) -> Self {
        self.options.alignment = Some(alignment.into());
        self
    }

    /// Sets the size.
    pub fn with_size(mut self, size: impl Into<EcoString>) -> Self {
        self.options.size = Some(size.into());
        self
    }

    /// Sets the caption.
    pub fn with_caption(mut self, caption: impl Into<EcoString>) -> Self {
        self.options.caption = Some(caption.into());
        self
    }

    /// Attribute rules shared by `image` and `file`.
    pub fn specs() -> Vec<AttributeSpec> {
        let mut specs = Resource::specs();
        specs.extend(Alternative::specs());
        specs.extend([
            AttributeSpec::optional("kind", Constraint::OneOf(MEDIA_KINDS)),
            AttributeSpec::optional("location", Constraint::OneOf(MEDIA_LOCATIONS)),
            AttributeSpec::optional("alignment", Constraint::OneOf(MEDIA_ALIGNMENTS)),
            AttributeSpec::optional(
                "size",
                Constraint::Pattern {
                    description: "<n>px, x<n>px, <n>x<n>px, upright or upright=<number>",
                    matches: is_media_size,
                },
            ),
            AttributeSpec::optional("link", Constraint::Text),
            AttributeSpec::optional("page", Constraint::Text),
            AttributeSpec::optional("lang", Constraint::Text),
            AttributeSpec::optional("caption", Constraint::Text),
        ]);
        specs
    }

    pub(crate) fn write_to(&self, attrs: &mut Attributes) {
        self.resource.write_to(attrs);
        self.alternative.write_to(attrs);
        let options = &self.options;
        attrs.set_opt("kind", options.kind.clone());
        attrs.set_opt("location", options.location.clone());
        attrs.set_opt("alignment", options.alignment.clone());
        attrs.set_opt("size", options.size.clone());
        attrs.set_opt("link", options.link.clone());
        attrs.set_opt("page", options.page.clone());
        attrs.set_opt("lang", options.lang.clone());
        attrs.set_opt("caption", options.caption.clone());
    }

    pub(crate) fn read_from(kind: &str, attrs: &Attributes) -> SchemaResult<Self> {
        Ok(Self {
            resource: Resource::read_from(kind, attrs)?,
            alternative: Alternative::read_from(attrs),
            options: MediaOptions {
                kind: attrs.text("kind"),
                location: attrs.text("location"),
                alignment: attrs.text("alignment"),
                size: attrs.text("size"),
                link: attrs.text("link"),
                page: attrs.text("page"),
                lang: attrs.text("lang"),
                caption: attrs.text("caption"),
            },
        })
    }
}

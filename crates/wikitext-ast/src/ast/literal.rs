//! Enumerated attribute literals.

/// Declares a closed set of attribute literals with its spelling table.
///
/// The generated enum derives [`strum::EnumIter`], converts into its
/// `&'static str` spelling and parses back through [`std::str::FromStr`].
macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $lit:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every accepted spelling, in declaration order.
            pub const LITERALS: &'static [&'static str] = &[$($lit),+];

            /// The attribute spelling of this literal.
            pub fn as_str(self) -> &'static str {
                self.into()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => $lit,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ecow::EcoString;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                use strum::IntoEnumIterator;

                Self::iter().find(|it| it.as_str() == s).ok_or_else(|| {
                    ecow::eco_format!("`{s}` is not one of: {}", Self::LITERALS.join(", "))
                })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for $crate::ast::AttrValue {
            fn from(value: $name) -> Self {
                $crate::ast::AttrValue::Text(value.as_str().into())
            }
        }
    };
}

pub(crate) use literal_enum;

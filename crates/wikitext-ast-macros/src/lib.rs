//! Proc-macro attributes for `wikitext-ast`.

extern crate proc_macro;
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    bracketed, parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated,
    DeriveInput, Ident, LitBool, LitStr, Token,
};

/// Parse custom_node attribute parameters
struct CustomNodeArgs {
    kind: Option<LitStr>,
    member_of: Vec<LitStr>,
    children: Option<LitStr>,
    literal: bool,
    attrs_impl: bool,
    build_impl: bool,
}

impl Parse for CustomNodeArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = CustomNodeArgs {
            kind: None,
            member_of: Vec::new(),
            children: None,
            literal: false,
            attrs_impl: false,
            build_impl: false,
        };

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            let _: Token![=] = input.parse()?;

            if ident == "kind" {
                args.kind = Some(input.parse()?);
            } else if ident == "member_of" {
                let content;
                bracketed!(content in input);
                let categories = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                args.member_of.extend(categories);
            } else if ident == "children" {
                args.children = Some(input.parse()?);
            } else if ident == "literal" {
                args.literal = input.parse::<LitBool>()?.value;
            } else if ident == "attrs_impl" {
                args.attrs_impl = input.parse::<LitBool>()?.value;
            } else if ident == "build_impl" {
                args.build_impl = input.parse::<LitBool>()?.value;
            } else {
                return Err(syn::Error::new_spanned(
                    ident,
                    "Unknown attribute parameter",
                ));
            }

            // Handle optional comma separator
            if input.peek(Token![,]) {
                let _: Token![,] = input.parse()?;
            }
        }

        Ok(args)
    }
}

/// Custom node attribute macro for implementing the `CustomNode` and
/// `NodeExtension` traits
///
/// Parameters:
/// - `kind = "..."`: tag of the node kind (required)
/// - `member_of = ["block", ...]`: categories the kind is registered into
/// - `children = "phrasing"`: the node is a parent whose children must belong
///   to the given category; reads the `children: Vec<Node>` field
/// - `literal = true`: the node carries a string value; reads the `value`
///   field
/// - `attrs_impl = true`: expects `fn attributes_custom(&self) -> Attributes`
///   and `fn attribute_specs() -> Vec<AttributeSpec>`
/// - `build_impl = true`: expects `fn build_custom(parts: NodeParts) ->
///   SchemaResult<Self>`, making the kind constructible from its tag
///
/// A kind with neither `children` nor `literal` is a leaf.
///
/// # Example
///
/// ```rust
/// use ecow::EcoString;
/// use wikitext_ast::ast::Attributes;
/// use wikitext_ast::schema::{AttributeSpec, Constraint};
/// use wikitext_ast_macros::custom_node;
///
/// // `<score lang="lilypond">` holding music notation
/// #[derive(Debug, Clone, PartialEq)]
/// #[custom_node(kind = "score", member_of = ["block"], literal = true, attrs_impl = true)]
/// struct Score {
///     lang: EcoString,
///     value: EcoString,
/// }
///
/// impl Score {
///     fn attributes_custom(&self) -> Attributes {
///         Attributes::new().with("lang", &self.lang)
///     }
///
///     fn attribute_specs() -> Vec<AttributeSpec> {
///         vec![AttributeSpec::required(
///             "lang",
///             Constraint::OneOf(&["lilypond", "ABC"]),
///         )]
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn custom_node(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = syn::parse_macro_input!(attr as CustomNodeArgs);
    let input = parse_macro_input!(item as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Some(kind) = &args.kind else {
        return syn::Error::new_spanned(name, "custom_node requires `kind = \"...\"`")
            .to_compile_error()
            .into();
    };
    if args.literal && args.children.is_some() {
        return syn::Error::new_spanned(
            name,
            "a custom node is either `literal` or has `children`, not both",
        )
        .to_compile_error()
        .into();
    }

    // Configure shape-dependent accessors and the definition constructor
    let (shape, accessors, definition) = if let Some(children) = &args.children {
        (
            quote! { Parent },
            quote! {
                fn children(&self) -> &[::wikitext_ast::Node] {
                    &self.children
                }
            },
            quote! {
                ::wikitext_ast::schema::VariantDef::parent(
                    #kind,
                    ::wikitext_ast::schema::Category::new(#children),
                )
            },
        )
    } else if args.literal {
        (
            quote! { Literal },
            quote! {
                fn value(&self) -> Option<&str> {
                    Some(self.value.as_str())
                }
            },
            quote! { ::wikitext_ast::schema::VariantDef::literal(#kind) },
        )
    } else {
        (
            quote! { Leaf },
            quote! {},
            quote! { ::wikitext_ast::schema::VariantDef::leaf(#kind) },
        )
    };

    // Configure attribute support
    let (attributes_impl, attribute_specs) = if args.attrs_impl {
        (
            quote! {
                fn attributes(&self) -> ::wikitext_ast::ast::Attributes {
                    self.attributes_custom()
                }
            },
            quote! { .attributes(Self::attribute_specs()) },
        )
    } else {
        (quote! {}, quote! {})
    };

    let build = if args.build_impl {
        quote! {
            .build(|parts| {
                Self::build_custom(parts).map(::wikitext_ast::ast::NodeExtension::into_node)
            })
        }
    } else {
        quote! {}
    };

    let member_of = &args.member_of;

    let expanded = quote! {
        #input

        impl #impl_generics ::wikitext_ast::ast::CustomNode for #name #ty_generics #where_clause {
            fn kind(&self) -> &'static str {
                #kind
            }

            fn shape(&self) -> ::wikitext_ast::schema::Shape {
                ::wikitext_ast::schema::Shape::#shape
            }

            #accessors

            #attributes_impl

            fn clone_box(&self) -> Box<dyn ::wikitext_ast::ast::CustomNode> {
                Box::new(self.clone())
            }

            fn eq_box(&self, other: &dyn ::wikitext_ast::ast::CustomNode) -> bool {
                if let Some(other) = other.as_any().downcast_ref::<Self>() {
                    self == other
                } else {
                    false
                }
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }

        impl #impl_generics ::wikitext_ast::ast::NodeExtension for #name #ty_generics #where_clause {
            fn variant_def() -> ::wikitext_ast::schema::VariantDef {
                #definition
                    #(.member_of(::wikitext_ast::schema::Category::new(#member_of)))*
                    #attribute_specs
                    #build
            }
        }
    };

    TokenStream::from(expanded)
}

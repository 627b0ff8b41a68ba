use ecow::{eco_format, EcoString};

use crate::ast::{AttrValue, Attributes};

/// What a single attribute value must look like.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Any value
    Any,
    /// Any text
    Text,
    /// Text naming a resource; must be single-line
    Url,
    /// A flag
    Bool,
    /// An integer within an inclusive range
    Integer {
        /// Smallest accepted value
        min: Option<i64>,
        /// Largest accepted value
        max: Option<i64>,
    },
    /// Text spelled exactly as one of the literals
    OneOf(&'static [&'static str]),
    /// Text matching a parametrized form, e.g. `<n>px`
    Pattern {
        /// Human readable form, used in violation messages
        description: &'static str,
        /// Matcher
        matches: fn(&str) -> bool,
    },
    /// A list whose items all satisfy the inner constraint
    ListOf(Box<Constraint>),
}

impl Constraint {
    /// Integer in `min..=max`.
    pub const fn range(min: i64, max: i64) -> Self {
        Constraint::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Checks `value`, returning the reason it is rejected.
    pub fn check(&self, value: &AttrValue) -> Result<(), EcoString> {
        match (self, value) {
            (Constraint::Any, _) => Ok(()),
            (Constraint::Text, AttrValue::Text(_)) => Ok(()),
            (Constraint::Url, AttrValue::Text(url)) => {
                if url.contains(['\n', '\r']) {
                    Err(eco_format!("{value} spans multiple lines"))
                } else {
                    Ok(())
                }
            }
            (Constraint::Bool, AttrValue::Bool(_)) => Ok(()),
            (Constraint::Integer { min, max }, AttrValue::Int(number)) => {
                if let Some(min) = min.filter(|min| number < min) {
                    return Err(eco_format!("{number} is less than the minimum {min}"));
                }
                if let Some(max) = max.filter(|max| number > max) {
                    return Err(eco_format!("{number} is greater than the maximum {max}"));
                }
                Ok(())
            }
            (Constraint::OneOf(literals), AttrValue::Text(text)) => {
                if literals.iter().any(|literal| *literal == text.as_str()) {
                    Ok(())
                } else {
                    Err(eco_format!("{value} is not one of: {}", literals.join(", ")))
                }
            }
            (
                Constraint::Pattern {
                    description,
                    matches,
                },
                AttrValue::Text(text),
            ) => {
                if matches(text) {
                    Ok(())
                } else {
                    Err(eco_format!("{value} does not match {description}"))
                }
            }
            (Constraint::ListOf(inner), AttrValue::List(items)) => {
                for (index, item) in items.iter().enumerate() {
                    inner
                        .check(item)
                        .map_err(|reason| eco_format!("item {index}: {reason}"))?;
                }
                Ok(())
            }
            (expected, found) => Err(eco_format!(
                "expected {}, found {}",
                expected.type_name(),
                found.type_name()
            )),
        }
    }

    /// Whether two rules accept the same values. Patterns are told apart by
    /// their description.
    pub(crate) fn same_as(&self, other: &Constraint) -> bool {
        match (self, other) {
            (Constraint::Any, Constraint::Any)
            | (Constraint::Text, Constraint::Text)
            | (Constraint::Url, Constraint::Url)
            | (Constraint::Bool, Constraint::Bool) => true,
            (
                Constraint::Integer { min, max },
                Constraint::Integer {
                    min: other_min,
                    max: other_max,
                },
            ) => min == other_min && max == other_max,
            (Constraint::OneOf(literals), Constraint::OneOf(other)) => literals == other,
            (
                Constraint::Pattern { description, .. },
                Constraint::Pattern {
                    description: other, ..
                },
            ) => description == other,
            (Constraint::ListOf(inner), Constraint::ListOf(other)) => inner.same_as(other),
            _ => false,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Constraint::Any => "any value",
            Constraint::Text | Constraint::Url | Constraint::OneOf(_) | Constraint::Pattern { .. } => {
                "text"
            }
            Constraint::Bool => "boolean",
            Constraint::Integer { .. } => "integer",
            Constraint::ListOf(_) => "list",
        }
    }
}

/// Rule for one named attribute of a variant.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    /// Attribute name
    pub name: &'static str,
    /// Whether the attribute must be present
    pub required: bool,
    /// Rule for its value
    pub constraint: Constraint,
}

impl AttributeSpec {
    /// A required attribute.
    pub fn required(name: &'static str, constraint: Constraint) -> Self {
        Self {
            name,
            required: true,
            constraint,
        }
    }

    /// An optional attribute.
    pub fn optional(name: &'static str, constraint: Constraint) -> Self {
        Self {
            name,
            required: false,
            constraint,
        }
    }
}

/// Why an attribute map does not satisfy a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeProblem {
    /// A required attribute is absent
    Missing(EcoString),
    /// An attribute the variant does not declare
    Undeclared(EcoString),
    /// A declared attribute whose value breaks its constraint
    Invalid {
        /// Attribute name
        name: EcoString,
        /// Constraint message
        reason: EcoString,
    },
}

impl AttributeProblem {
    /// Name of the offending attribute.
    pub fn attribute(&self) -> &EcoString {
        match self {
            AttributeProblem::Missing(name) | AttributeProblem::Undeclared(name) => name,
            AttributeProblem::Invalid { name, .. } => name,
        }
    }

    /// Human readable reason.
    pub fn reason(&self) -> EcoString {
        match self {
            AttributeProblem::Missing(_) => "required attribute is missing".into(),
            AttributeProblem::Undeclared(_) => "attribute is not declared by the node kind".into(),
            AttributeProblem::Invalid { reason, .. } => reason.clone(),
        }
    }
}

/// Checks `attrs` against `specs`. Problems are returned in spec order,
/// followed by undeclared attributes in map order.
pub(crate) fn check_attributes(
    specs: &[AttributeSpec],
    extra_attributes: bool,
    attrs: &Attributes,
) -> Vec<AttributeProblem> {
    let mut problems = Vec::new();

    for spec in specs {
        match attrs.get(spec.name) {
            Some(value) => {
                if let Err(reason) = spec.constraint.check(value) {
                    problems.push(AttributeProblem::Invalid {
                        name: spec.name.into(),
                        reason,
                    });
                }
            }
            None if spec.required => problems.push(AttributeProblem::Missing(spec.name.into())),
            None => {}
        }
    }

    if !extra_attributes {
        for name in attrs.names() {
            if !specs.iter().any(|spec| spec.name == name.as_str()) {
                problems.push(AttributeProblem::Undeclared(name.clone()));
            }
        }
    }

    problems
}

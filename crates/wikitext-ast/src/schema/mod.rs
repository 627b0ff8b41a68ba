//! Content categories, variant definitions and the registry tying them
//! together.
//!
//! Each node kind is described by a [`VariantDef`]: its shape, the category
//! its children must belong to, its attribute rules and the categories it is
//! itself a member of. A [`Registry`] holds the definitions together with the
//! category membership table the validator consults.

mod baseline;
mod category;
mod constraint;
mod registry;
mod variant;

pub use self::category::Category;
pub use self::constraint::{AttributeProblem, AttributeSpec, Constraint};
pub use self::registry::{extend, global, Registry};
pub use self::variant::{BuildFn, NodeParts, Shape, VariantDef};

#[cfg(test)]
mod tests;

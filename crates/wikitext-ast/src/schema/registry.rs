use std::collections::HashSet;

use ecow::EcoString;
use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use parking_lot::{RwLock, RwLockReadGuard};

use super::baseline;
use super::category::Category;
use super::variant::{NodeParts, VariantDef};
use crate::ast::{Node, NodeExtension};
use crate::error::{RegistryError, RegistryResult, SchemaError, SchemaResult};

#[derive(Debug, Clone, Default)]
struct CategoryEntry {
    members: IndexSet<EcoString>,
    includes: Vec<Category>,
}

/// Content categories and the variant definitions of every known kind.
///
/// The registry only grows: categories gain members and includes, kinds gain
/// definitions, and nothing is ever removed, so a tree that validates keeps
/// validating after extensions are registered.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    categories: IndexMap<Category, CategoryEntry>,
    variants: IndexMap<EcoString, VariantDef>,
}

impl Registry {
    /// A registry without categories or kinds.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the baseline categories and kinds.
    ///
    /// # Panics
    ///
    /// Panics if the baseline schema is misconfigured, which is a bug in this
    /// crate rather than in any document.
    pub fn baseline() -> Self {
        Self::try_baseline().unwrap_or_else(|err| panic!("baseline schema is misconfigured: {err}"))
    }

    /// Fallible version of [`Registry::baseline`].
    pub fn try_baseline() -> RegistryResult<Self> {
        let mut registry = Self::empty();
        baseline::install(&mut registry)?;
        registry.check()?;
        Ok(registry)
    }

    /// Defines `category`, or extends it when it already exists, so that it
    /// also contains every member of the `includes` categories.
    pub fn define_category(&mut self, category: Category, includes: &[Category]) -> RegistryResult<()> {
        for included in includes {
            if !self.categories.contains_key(included) {
                return Err(self.fault(included.clone(), category.as_str().into()));
            }
        }

        let entry = self.categories.entry(category.clone()).or_default();
        for included in includes {
            if !entry.includes.contains(included) {
                entry.includes.push(included.clone());
            }
        }
        log::debug!("defined content category `{category}` including {includes:?}");
        Ok(())
    }

    /// Adds `kind` to `category`. Returns whether it was newly added;
    /// registering the same pair again is a no-op.
    ///
    /// The validator only accepts kinds that also have a definition, see
    /// [`Registry::register_variant`].
    pub fn register(&mut self, category: &Category, kind: impl Into<EcoString>) -> RegistryResult<bool> {
        let kind = kind.into();
        let Some(entry) = self.categories.get_mut(category) else {
            return Err(self.fault(category.clone(), kind));
        };

        let added = entry.members.insert(kind.clone());
        if added {
            log::debug!("registered kind `{kind}` into `{category}`");
        }
        Ok(added)
    }

    /// Kinds currently legal in `category`, included categories resolved.
    pub fn members_of(&self, category: &Category) -> RegistryResult<IndexSet<EcoString>> {
        let mut members = IndexSet::new();
        let mut seen = HashSet::new();
        self.collect_members(category, &mut seen, &mut members)?;
        Ok(members)
    }

    fn collect_members<'a>(
        &'a self,
        category: &'a Category,
        seen: &mut HashSet<&'a Category>,
        members: &mut IndexSet<EcoString>,
    ) -> RegistryResult<()> {
        if !seen.insert(category) {
            return Ok(());
        }
        let entry = self.entry(category)?;
        members.extend(entry.members.iter().cloned());
        for included in &entry.includes {
            self.collect_members(included, seen, members)?;
        }
        Ok(())
    }

    /// Whether `kind` is legal in `category`.
    pub fn contains(&self, category: &Category, kind: &str) -> RegistryResult<bool> {
        let mut seen = HashSet::new();
        let mut stack = vec![category];
        while let Some(category) = stack.pop() {
            if !seen.insert(category) {
                continue;
            }
            let entry = self.entry(category)?;
            if entry.members.contains(kind) {
                return Ok(true);
            }
            stack.extend(entry.includes.iter());
        }
        Ok(false)
    }

    /// Defined categories, in definition order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.keys()
    }

    /// Whether `category` is defined.
    pub fn has_category(&self, category: &Category) -> bool {
        self.categories.contains_key(category)
    }

    /// Registers a full variant definition and makes the kind a member of
    /// each category in [`VariantDef::member_of`].
    ///
    /// Every category the definition refers to must already be defined.
    /// Registering an identical definition again is a no-op.
    pub fn register_variant(&mut self, def: VariantDef) -> RegistryResult<()> {
        for category in def.children.iter().chain(&def.member_of) {
            if !self.has_category(category) {
                return Err(self.fault(category.clone(), def.kind.clone()));
            }
        }

        if let Some(existing) = self.variants.get(&def.kind) {
            if existing.same_as(&def) {
                return Ok(());
            }
            log::error!("conflicting definition for node kind `{}`", def.kind);
            return Err(RegistryError::ConflictingVariant(def.kind.clone()));
        }

        for category in &def.member_of {
            self.register(category, def.kind.clone())?;
        }
        log::debug!("defined node kind `{}` ({:?})", def.kind, def.shape);
        self.variants.insert(def.kind.clone(), def);
        Ok(())
    }

    /// Registers the node kind of an extension.
    pub fn register_extension<T: NodeExtension>(&mut self) -> RegistryResult<()> {
        self.register_variant(T::variant_def())
    }

    /// Variant definition of `kind`.
    pub fn variant(&self, kind: &str) -> Option<&VariantDef> {
        self.variants.get(kind)
    }

    /// All variant definitions, in registration order.
    pub fn variants(&self) -> impl Iterator<Item = &VariantDef> {
        self.variants.values()
    }

    /// Constructs a node of `kind` from `parts`. See [`VariantDef::construct`].
    pub fn construct(&self, kind: &str, parts: NodeParts) -> SchemaResult<Node> {
        let def = self
            .variant(kind)
            .ok_or_else(|| SchemaError::UnknownKind(kind.into()))?;
        def.construct(parts)
    }

    /// Verifies that every category referenced by a definition or an include
    /// is defined.
    pub fn check(&self) -> RegistryResult<()> {
        for (category, entry) in &self.categories {
            for included in &entry.includes {
                if !self.has_category(included) {
                    return Err(self.fault(included.clone(), category.as_str().into()));
                }
            }
        }
        for def in self.variants.values() {
            for category in def.children.iter().chain(&def.member_of) {
                if !self.has_category(category) {
                    return Err(self.fault(category.clone(), def.kind.clone()));
                }
            }
        }
        Ok(())
    }

    fn entry(&self, category: &Category) -> RegistryResult<&CategoryEntry> {
        self.categories
            .get(category)
            .ok_or_else(|| self.fault(category.clone(), "lookup".into()))
    }

    fn fault(&self, category: Category, referenced_by: EcoString) -> RegistryError {
        log::error!("content category `{category}` referenced by `{referenced_by}` is not defined");
        RegistryError::UnknownCategory {
            category,
            referenced_by,
        }
    }
}

static GLOBAL: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::baseline()));

/// Read access to the process-wide registry.
///
/// Holding the guard blocks [`extend`]; validations may share it freely.
pub fn global() -> RwLockReadGuard<'static, Registry> {
    GLOBAL.read()
}

/// Mutates the process-wide registry, e.g. to register extensions during
/// start-up. Calls are serialized against each other and against readers.
pub fn extend<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    f(&mut *GLOBAL.write())
}

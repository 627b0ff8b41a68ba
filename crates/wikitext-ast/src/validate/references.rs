//! Cross-reference pass: every reference must resolve to exactly one
//! definition of the matching kind.

use std::collections::HashMap;
use std::convert::Infallible;

use ecow::EcoString;

use super::{FindingKind, NodePath, Report};
use crate::ast::{Association, Node, Reference, Resource};
use crate::options::IdentifierMatching;
use crate::visit::{walk, NodeVisitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Target {
    Link,
    Footnote,
}

/// Counts definitions per target and normalized identifier.
struct DefinitionIndex {
    matching: IdentifierMatching,
    counts: HashMap<(Target, EcoString), usize>,
}

impl DefinitionIndex {
    fn add(&mut self, target: Target, association: &Association) {
        let key = (target, self.matching.normalize(&association.identifier));
        *self.counts.entry(key).or_default() += 1;
    }

    fn count(&self, target: Target, identifier: &str) -> usize {
        let key = (target, self.matching.normalize(identifier));
        self.counts.get(&key).copied().unwrap_or_default()
    }
}

impl NodeVisitor for DefinitionIndex {
    type Error = Infallible;

    fn definition(
        &mut self,
        association: &Association,
        _resource: &Resource,
        _path: &NodePath,
    ) -> Result<(), Self::Error> {
        self.add(Target::Link, association);
        Ok(())
    }

    fn footnote_definition(
        &mut self,
        association: &Association,
        _path: &NodePath,
    ) -> Result<(), Self::Error> {
        self.add(Target::Footnote, association);
        Ok(())
    }
}

struct Resolver<'a, 's> {
    index: &'a DefinitionIndex,
    report: &'a mut Report<'s>,
}

impl Resolver<'_, '_> {
    fn resolve(&mut self, target: Target, reference: &Reference, path: &NodePath) {
        let identifier = reference.identifier();
        let kind = match self.index.count(target, identifier) {
            1 => return,
            0 => FindingKind::UnresolvedReference {
                identifier: identifier.clone(),
            },
            count => FindingKind::AmbiguousReference {
                identifier: identifier.clone(),
                count,
            },
        };
        self.report.push(path, kind);
    }
}

impl NodeVisitor for Resolver<'_, '_> {
    type Error = Infallible;

    fn link_reference(&mut self, reference: &Reference, path: &NodePath) -> Result<(), Self::Error> {
        self.resolve(Target::Link, reference, path);
        Ok(())
    }

    fn footnote_reference(
        &mut self,
        reference: &Reference,
        path: &NodePath,
    ) -> Result<(), Self::Error> {
        self.resolve(Target::Footnote, reference, path);
        Ok(())
    }
}

pub(super) fn check(root: &Node, matching: IdentifierMatching, report: &mut Report) {
    let mut index = DefinitionIndex {
        matching,
        counts: HashMap::new(),
    };
    walk(&mut index, root).unwrap_or_else(|never| match never {});

    let mut resolver = Resolver {
        index: &index,
        report,
    };
    walk(&mut resolver, root).unwrap_or_else(|never| match never {});
}

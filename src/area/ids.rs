//! Document-global id registration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::SourceLocation;

/// Where a registered id landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTarget {
    /// Page number holding the id's first area
    pub page_number: u32,

    /// Location of the node carrying the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

/// Ids registered so far, shared by every page sequence of a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdReferences {
    targets: HashMap<String, IdTarget>,
    order: Vec<String>,
}

impl IdReferences {
    /// Create an empty id table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` on `page_number`; fails if it was registered anywhere before.
    pub fn register(
        &mut self,
        id: &str,
        page_number: u32,
        location: Option<&SourceLocation>,
    ) -> Result<()> {
        if let Some(existing) = self.targets.get(id) {
            return Err(Error::DuplicateId {
                id: id.to_string(),
                first_page: existing.page_number,
                location: location.cloned(),
            });
        }

        self.targets.insert(
            id.to_string(),
            IdTarget {
                page_number,
                location: location.cloned(),
            },
        );
        self.order.push(id.to_string());
        Ok(())
    }

    /// Register every id of `other`, in its registration order.
    pub fn merge(&mut self, other: IdReferences) -> Result<()> {
        let IdReferences { mut targets, order } = other;
        for id in order {
            if let Some(target) = targets.remove(&id) {
                self.register(&id, target.page_number, target.location.as_ref())?;
            }
        }
        Ok(())
    }

    /// Where `id` was registered.
    pub fn get(&self, id: &str) -> Option<&IdTarget> {
        self.targets.get(id)
    }

    /// Page number of `id`.
    pub fn page_of(&self, id: &str) -> Option<u32> {
        self.targets.get(id).map(|t| t.page_number)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.targets.contains_key(id)
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no id is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered ids in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IdTarget)> {
        self.order
            .iter()
            .filter_map(|id| self.targets.get(id).map(|t| (id.as_str(), t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_once() {
        let mut ids = IdReferences::new();
        ids.register("intro", 1, None).unwrap();
        ids.register("summary", 4, None).unwrap();

        assert_eq!(ids.page_of("summary"), Some(4));
        assert_eq!(ids.len(), 2);
        let order: Vec<_> = ids.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["intro", "summary"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut ids = IdReferences::new();
        ids.register("intro", 2, None).unwrap();
        let err = ids
            .register("intro", 9, Some(&SourceLocation::new(40, 2)))
            .unwrap_err();
        match err {
            Error::DuplicateId {
                id,
                first_page,
                location,
            } => {
                assert_eq!(id, "intro");
                assert_eq!(first_page, 2);
                assert_eq!(location.map(|l| l.line), Some(40));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(ids.page_of("intro"), Some(2));
    }

    #[test]
    fn test_merge_detects_duplicates() {
        let mut first = IdReferences::new();
        first.register("a", 1, None).unwrap();

        let mut second = IdReferences::new();
        second.register("b", 3, None).unwrap();
        second.register("a", 4, None).unwrap();

        let mut merged = IdReferences::new();
        merged.merge(first).unwrap();
        assert!(matches!(merged.merge(second), Err(Error::DuplicateId { .. })));
        assert!(merged.contains("b"));
    }
}

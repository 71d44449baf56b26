//! Outcome of one layout call.

use serde::{Deserialize, Serialize};

use crate::model::BreakKind;

/// What a node reports after being asked to fill an area.
///
/// Only [`Status::Complete`] is terminal; every other value asks the caller
/// to provide a fresh area and call again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The node and all its descendants are placed.
    Complete,
    /// Nothing could be placed in the offered area.
    NoneProduced,
    /// Part of the node was placed; the rest needs another area.
    SomeProduced,
    /// A forced break; the remaining content continues on a new page.
    ForcedBreak(BreakKind),
}

impl Status {
    /// Whether the node still has content to place.
    pub fn is_incomplete(self) -> bool {
        self != Status::Complete
    }

    /// Status a container reports when a child stops early.
    ///
    /// A child that produced nothing still counts as partial progress for the
    /// parent when an earlier sibling was placed during the same call.
    pub fn combine(had_prior_progress: bool, child: Status) -> Status {
        match child {
            Status::NoneProduced if had_prior_progress => Status::SomeProduced,
            other => other,
        }
    }

    /// The break requested, if this is a forced break.
    pub fn forced_break(self) -> Option<BreakKind> {
        match self {
            Status::ForcedBreak(kind) => Some(kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_upgrades_none() {
        assert_eq!(
            Status::combine(true, Status::NoneProduced),
            Status::SomeProduced
        );
        assert_eq!(
            Status::combine(false, Status::NoneProduced),
            Status::NoneProduced
        );
    }

    #[test]
    fn test_combine_keeps_other_statuses() {
        assert_eq!(
            Status::combine(true, Status::SomeProduced),
            Status::SomeProduced
        );
        assert_eq!(
            Status::combine(false, Status::ForcedBreak(BreakKind::OddPage)),
            Status::ForcedBreak(BreakKind::OddPage)
        );
        assert!(!Status::Complete.is_incomplete());
        assert!(Status::NoneProduced.is_incomplete());
        assert_eq!(
            Status::ForcedBreak(BreakKind::Page).forced_break(),
            Some(BreakKind::Page)
        );
    }
}

//! In-memory policy model shapes exchanged with the host engine.
//!
//! The policy engine itself lives outside this crate; these types mirror
//! the surface it expects from a storage plugin: a sink that accepts rule
//! lines during [`load`](crate::SqlAdapter::load) and a model that can
//! enumerate every held rule for [`save_all`](crate::SqlAdapter::save_all).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Receiver of display lines produced while loading policies.
pub trait RuleSink {
    /// Accepts one rendered rule line, e.g. `"p, alice, data1, read"`.
    fn push_line(&mut self, line: &str);
}

impl RuleSink for Vec<String> {
    fn push_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Minimal in-memory rule holder with separate permission and grouping
/// sections, keyed by ptype (`"p"`, `"p2"`, … / `"g"`, `"g2"`, …).
///
/// Rules keep insertion order within a ptype. Duplicate detection is the
/// engine's concern, not the model's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyModel {
    policies: BTreeMap<String, Vec<Vec<String>>>,
    groupings: BTreeMap<String, Vec<Vec<String>>>,
}

impl PolicyModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one permission rule under `ptype`.
    pub fn add_policy(&mut self, ptype: &str, rule: Vec<String>) {
        self.policies.entry(ptype.to_string()).or_default().push(rule);
    }

    /// Adds one grouping (role-assignment) rule under `ptype`.
    pub fn add_grouping(&mut self, ptype: &str, rule: Vec<String>) {
        self.groupings.entry(ptype.to_string()).or_default().push(rule);
    }

    /// Returns the permission rules stored under `ptype`.
    #[must_use]
    pub fn policies(&self, ptype: &str) -> &[Vec<String>] {
        self.policies.get(ptype).map_or(&[], Vec::as_slice)
    }

    /// Returns the grouping rules stored under `ptype`.
    #[must_use]
    pub fn groupings(&self, ptype: &str) -> &[Vec<String>] {
        self.groupings.get(ptype).map_or(&[], Vec::as_slice)
    }

    /// Iterates every `(ptype, rule)` pair, permission rules first.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.policies
            .iter()
            .chain(self.groupings.iter())
            .flat_map(|(ptype, rules)| {
                rules.iter().map(move |rule| (ptype.as_str(), rule.as_slice()))
            })
    }

    /// Number of rules across both sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.values().map(Vec::len).sum::<usize>()
            + self.groupings.values().map(Vec::len).sum::<usize>()
    }

    /// Returns `true` when the model holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RuleSink for PolicyModel {
    fn push_line(&mut self, line: &str) {
        let mut parts = line.split(',').map(str::trim);
        let Some(ptype) = parts.next() else {
            return;
        };
        if ptype.is_empty() {
            return;
        }
        let rule: Vec<String> = parts.map(str::to_string).collect();
        if ptype.starts_with('g') {
            self.add_grouping(ptype, rule);
        } else {
            self.add_policy(ptype, rule);
        }
    }
}

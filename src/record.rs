//! Fixed-width row representation of a policy rule and its codec.
//!
//! A policy rule is an ordered tuple of up to [`MAX_RULE_FIELDS`] string
//! fields plus a `ptype` discriminator (`"p"` for permission rules, `"g"`
//! for role groupings, or a subtype like `"p2"`). [`PolicyRecord`] is the
//! transient row form used on the way to and from the policy table; an
//! instance never outlives a single storage operation.

use serde::{Deserialize, Serialize};

use crate::error::AdapterError;

/// Maximum number of positional fields a rule may carry.
///
/// Mirrors the `v0..v5` slot columns of the policy table. This bound is
/// public policy, not an implementation detail: callers may rely on rules
/// with up to this many fields round-tripping losslessly.
pub const MAX_RULE_FIELDS: usize = 6;

/// One row of the policy table.
///
/// `id` is a storage-assigned surrogate key: never set on the write path
/// and ignored by the [`PartialEq`] impl. A rule with N fields occupies
/// exactly slots `v0..v(N-1)`; all higher slots are `None`. A
/// present-but-empty field is stored as `Some("")` and stays distinct from
/// an absent slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct PolicyRecord {
    /// Surrogate key assigned by the backend.
    pub id: i64,
    /// Rule type discriminator. Never empty.
    pub ptype: String,
    /// Field slot 0.
    pub v0: Option<String>,
    /// Field slot 1.
    pub v1: Option<String>,
    /// Field slot 2.
    pub v2: Option<String>,
    /// Field slot 3.
    pub v3: Option<String>,
    /// Field slot 4.
    pub v4: Option<String>,
    /// Field slot 5.
    pub v5: Option<String>,
}

impl PolicyRecord {
    /// Encodes a rule tuple into row form.
    ///
    /// Field order is significant: `fields[i]` lands in slot `v{i}` and
    /// higher slots stay absent.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidRule`] if `fields` has more than
    /// [`MAX_RULE_FIELDS`] entries. Rejected before any I/O is issued.
    pub fn from_rule(ptype: &str, fields: &[String]) -> Result<Self, AdapterError> {
        if fields.len() > MAX_RULE_FIELDS {
            return Err(AdapterError::InvalidRule {
                ptype: ptype.to_string(),
                count: fields.len(),
            });
        }
        let mut record = Self {
            ptype: ptype.to_string(),
            ..Self::default()
        };
        for (slot, value) in fields.iter().enumerate() {
            record.set_slot(slot, Some(value.clone()));
        }
        Ok(record)
    }

    /// Builds a partial-match record for a filtered delete.
    ///
    /// `field_values[k]` constrains slot `field_index + k`; pairs whose
    /// slot falls outside `0..MAX_RULE_FIELDS` are silently dropped, so
    /// negative or overflowing windows clip instead of erroring. A window
    /// that clips to nothing constrains `ptype` alone.
    #[must_use]
    pub fn from_filter(ptype: &str, field_index: isize, field_values: &[String]) -> Self {
        let mut record = Self {
            ptype: ptype.to_string(),
            ..Self::default()
        };
        for (k, value) in field_values.iter().enumerate() {
            let slot = field_index + k as isize;
            if (0..MAX_RULE_FIELDS as isize).contains(&slot) {
                record.set_slot(slot as usize, Some(value.clone()));
            }
        }
        record
    }

    /// Decodes the record back into its `(ptype, fields)` tuple.
    ///
    /// Present slots are returned in index order; empty strings are kept.
    #[must_use]
    pub fn to_rule(&self) -> (String, Vec<String>) {
        let fields = self.slots().flatten().map(str::to_string).collect();
        (self.ptype.clone(), fields)
    }

    /// Renders the comma-separated line consumed by the policy engine's
    /// generic rule loader, e.g. `"p, alice, data1, read"`.
    ///
    /// Empty fields are dropped from the join — the engine's line parser
    /// cannot represent them. A record with no non-empty fields renders as
    /// the bare ptype.
    #[must_use]
    pub fn to_display_line(&self) -> String {
        let fields: Vec<&str> = self
            .slots()
            .flatten()
            .filter(|field| !field.is_empty())
            .collect();
        if fields.is_empty() {
            self.ptype.clone()
        } else {
            format!("{}, {}", self.ptype, fields.join(", "))
        }
    }

    /// Returns the six field slots in index order.
    pub fn slots(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        [
            self.v0.as_deref(),
            self.v1.as_deref(),
            self.v2.as_deref(),
            self.v3.as_deref(),
            self.v4.as_deref(),
            self.v5.as_deref(),
        ]
        .into_iter()
    }

    /// Writes `value` into the given slot. Out-of-range slots are ignored;
    /// callers clip before calling.
    pub(crate) fn set_slot(&mut self, slot: usize, value: Option<String>) {
        match slot {
            0 => self.v0 = value,
            1 => self.v1 = value,
            2 => self.v2 = value,
            3 => self.v3 = value,
            4 => self.v4 = value,
            5 => self.v5 = value,
            _ => {}
        }
    }
}

impl PartialEq for PolicyRecord {
    fn eq(&self, other: &Self) -> bool {
        self.ptype == other.ptype && self.slots().eq(other.slots())
    }
}

impl Eq for PolicyRecord {}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn fields(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| (*part).to_string()).collect()
    }

    #[test]
    fn round_trip_preserves_order_and_arity() {
        let all = ["sub", "obj", "act", "dom", "eft", "extra"];
        for arity in 0..=MAX_RULE_FIELDS {
            let rule: Vec<String> = all.iter().take(arity).map(|f| (*f).to_string()).collect();
            let Ok(record) = PolicyRecord::from_rule("p", &rule) else {
                panic!("encoding {arity} fields failed");
            };
            assert_eq!(record.to_rule(), ("p".to_string(), rule));
        }
    }

    #[test]
    fn seven_fields_rejected_before_io() {
        let rule = fields(&["a", "b", "c", "d", "e", "f", "g"]);
        let result = PolicyRecord::from_rule("p", &rule);
        assert!(matches!(
            result,
            Err(AdapterError::InvalidRule { count: 7, .. })
        ));
    }

    #[test]
    fn six_fields_accepted() {
        let rule = fields(&["a", "b", "c", "d", "e", "f"]);
        assert!(PolicyRecord::from_rule("p", &rule).is_ok());
    }

    #[test]
    fn unused_trailing_slots_stay_absent() {
        let Ok(record) = PolicyRecord::from_rule("g", &fields(&["alice", "admin"])) else {
            panic!("encoding failed");
        };
        assert_eq!(record.v0.as_deref(), Some("alice"));
        assert_eq!(record.v1.as_deref(), Some("admin"));
        assert_eq!(record.v2, None);
        assert_eq!(record.v5, None);
    }

    #[test]
    fn empty_string_kept_in_rule_dropped_from_line() {
        let Ok(record) = PolicyRecord::from_rule("p", &fields(&["alice", "", "read"])) else {
            panic!("encoding failed");
        };
        let (_, decoded) = record.to_rule();
        assert_eq!(decoded, fields(&["alice", "", "read"]));
        assert_eq!(record.to_display_line(), "p, alice, read");
    }

    #[test]
    fn display_line_joins_fields() {
        let Ok(record) = PolicyRecord::from_rule("p", &fields(&["alice", "data1", "read"])) else {
            panic!("encoding failed");
        };
        assert_eq!(record.to_display_line(), "p, alice, data1, read");
    }

    #[test]
    fn display_line_without_fields_is_bare_ptype() {
        let Ok(record) = PolicyRecord::from_rule("p", &[]) else {
            panic!("encoding failed");
        };
        assert_eq!(record.to_display_line(), "p");
    }

    #[test]
    fn filter_window_in_range() {
        let record = PolicyRecord::from_filter("p", 2, &fields(&["X", "Y"]));
        assert_eq!(record.v0, None);
        assert_eq!(record.v1, None);
        assert_eq!(record.v2.as_deref(), Some("X"));
        assert_eq!(record.v3.as_deref(), Some("Y"));
        assert_eq!(record.v4, None);
    }

    #[test]
    fn filter_window_negative_index_clips() {
        let record = PolicyRecord::from_filter("p", -1, &fields(&["X", "Y"]));
        assert_eq!(record.v0.as_deref(), Some("Y"));
        assert!(record.slots().skip(1).all(|slot| slot.is_none()));
    }

    #[test]
    fn filter_window_past_last_slot_clips() {
        let record = PolicyRecord::from_filter("p", 5, &fields(&["X", "Y"]));
        assert_eq!(record.v5.as_deref(), Some("X"));
        assert!(record.slots().take(5).all(|slot| slot.is_none()));
    }

    #[test]
    fn filter_window_fully_out_of_range_constrains_nothing() {
        let record = PolicyRecord::from_filter("p", -1, &fields(&["X"]));
        assert!(record.slots().all(|slot| slot.is_none()));
        assert_eq!(record.ptype, "p");
    }

    #[test]
    fn equality_ignores_id() {
        let Ok(mut a) = PolicyRecord::from_rule("p", &fields(&["alice", "data1", "read"])) else {
            panic!("encoding failed");
        };
        let Ok(b) = PolicyRecord::from_rule("p", &fields(&["alice", "data1", "read"])) else {
            panic!("encoding failed");
        };
        a.id = 42;
        assert_eq!(a, b);
    }

    #[test]
    fn serde_round_trip() {
        let Ok(record) = PolicyRecord::from_rule("g", &fields(&["alice", "admin"])) else {
            panic!("encoding failed");
        };
        let Ok(json) = serde_json::to_string(&record) else {
            panic!("serialization failed");
        };
        let Ok(decoded) = serde_json::from_str::<PolicyRecord>(&json) else {
            panic!("deserialization failed");
        };
        assert_eq!(record, decoded);
    }
}

//! Net balance mapping produced by the balance calculator

use super::transaction::PersonId;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::btree_map::{self, BTreeMap};

/// Net balance per person, at currency precision (2 decimal places)
///
/// Positive values are owed *to* the person; negative values are owed *by*
/// the person. Iteration is in lexicographic identifier order, which also
/// fixes the tie-break used by residual correction.
///
/// Serializes as a JSON object of person → number; the conversion to a
/// floating-point number happens only there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Balances {
    entries: BTreeMap<PersonId, Decimal>,
}

impl Balances {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `person`, if they appear in any transaction
    pub fn get(&self, person: &str) -> Option<Decimal> {
        self.entries.get(person).copied()
    }

    /// Number of people in the mapping
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no transaction has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances (zero for a consistent mapping)
    pub fn total(&self) -> Decimal {
        self.entries.values().copied().sum()
    }

    /// Iterate over `(person, balance)` pairs in identifier order
    pub fn iter(&self) -> btree_map::Iter<'_, PersonId, Decimal> {
        self.entries.iter()
    }

    pub(crate) fn get_mut(&mut self, person: &str) -> Option<&mut Decimal> {
        self.entries.get_mut(person)
    }
}

impl FromIterator<(PersonId, Decimal)> for Balances {
    fn from_iter<I: IntoIterator<Item = (PersonId, Decimal)>>(iter: I) -> Self {
        Balances {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Balances {
    type Item = (&'a PersonId, &'a Decimal);
    type IntoIter = btree_map::Iter<'a, PersonId, Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Balances {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (person, amount) in &self.entries {
            map.serialize_entry(person, &amount.to_f64().unwrap_or_default())?;
        }
        map.end()
    }
}

//! Balance calculation
//!
//! Derives the net balance of every person from the full list of
//! transactions. The computation runs in three phases:
//!
//! 1. **Accumulate** exact (28 significant digit) credits and debits per person
//! 2. **Round** each person's net to cents, half-up on the signed value
//! 3. **Correct** any rounding residual by adjusting a single extreme balance
//!
//! Rounding each person once, after accumulation, keeps the drift to at most
//! half a cent per person; the correction step then restores an exact zero sum.

use crate::types::{Balances, PersonId, Transaction};
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One currency unit (0.01)
pub const CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const HALF_CENT: Decimal = Decimal::from_parts(5, 0, 0, false, 3);

/// Compute rounded, zero-sum balances for `transactions`
///
/// Every person who appears as a payer or receiver is present in the result,
/// including people whose balance is exactly zero.
pub fn compute_balances(transactions: &[Transaction]) -> Balances {
    let mut net: BTreeMap<PersonId, Decimal> = BTreeMap::new();

    for transaction in transactions {
        let share = transaction.share();

        *net.entry(transaction.payer.clone()).or_default() += transaction.amount;
        for receiver in &transaction.receivers {
            *net.entry(receiver.clone()).or_default() -= share;
        }
    }

    let mut balances: Balances = net
        .into_iter()
        .map(|(person, amount)| (person, round_half_up(amount)))
        .collect();

    correct_residual(&mut balances);

    let remaining = balances.total();
    if remaining.abs() >= CENT {
        warn!(
            residual = %remaining,
            people = balances.len(),
            "zero-sum violation after residual correction"
        );
    }

    balances
}

/// Round to cents; exact halves go toward positive infinity
///
/// `0.005 → 0.01` and `-0.005 → 0.00`. The result always carries scale 2.
pub fn round_half_up(value: Decimal) -> Decimal {
    let floor = value.round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity);
    let rounded = if value - floor >= HALF_CENT {
        floor + CENT
    } else {
        floor
    };
    to_cents(rounded)
}

/// Push the rounding residual onto one extreme balance
///
/// A positive residual is taken from the largest balance, a negative one from
/// the smallest. Ties go to the lexicographically first person.
fn correct_residual(balances: &mut Balances) {
    let residual = balances.total();
    if residual.abs() < CENT {
        return;
    }

    let wanted = if residual > Decimal::ZERO {
        Ordering::Greater
    } else {
        Ordering::Less
    };

    let Some(person) = extreme(balances, wanted) else {
        return;
    };

    if let Some(balance) = balances.get_mut(&person) {
        debug!(%person, %residual, before = %balance, "applying residual correction");
        *balance = to_cents(*balance - residual);
    }
}

/// First person whose balance compares `wanted` against every earlier one
fn extreme(balances: &Balances, wanted: Ordering) -> Option<PersonId> {
    let mut best: Option<(&PersonId, Decimal)> = None;

    for (person, amount) in balances {
        match best {
            Some((_, current)) if amount.cmp(&current) != wanted => {}
            _ => best = Some((person, *amount)),
        }
    }

    best.map(|(person, _)| person.clone())
}

fn to_cents(mut value: Decimal) -> Decimal {
    if value.is_zero() {
        value = Decimal::ZERO;
    }
    value.rescale(2);
    value
}

//! Equal-split arithmetic for shared purchases.
//!
//! Amounts are integer cents. A purchase total is divided evenly among its
//! debtors; whatever does not divide evenly goes to the first debtor, so the
//! shares always add back up to the total.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use thiserror::Error;

/// Participant identifier as stored in the database
pub type ParticipantId = i64;

/// One debtor's portion of a purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Share {
    pub participant_id: ParticipantId,
    pub amount: i64,
}

/// Reasons a purchase cannot be split
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("total amount cannot be negative (got {0})")]
    NegativeTotal(i64),

    #[error("participant {0} is listed more than once as a debtor")]
    DuplicateDebtor(ParticipantId),

    #[error("balance for participant {0} does not fit in 64 bits")]
    Overflow(ParticipantId),
}

/// Split `total` cents between `debtors`.
///
/// With no debtors the payer carries the whole amount. Shares keep the
/// order of `debtors`; the first one absorbs the remainder.
///
/// # Example
/// ```
/// use daren_core::split::split_purchase;
///
/// let shares = split_purchase(1, 1000, &[1, 2, 3]).unwrap();
/// let amounts: Vec<i64> = shares.iter().map(|s| s.amount).collect();
/// assert_eq!(amounts, vec![334, 333, 333]);
/// ```
pub fn split_purchase(
    payer: ParticipantId,
    total: i64,
    debtors: &[ParticipantId],
) -> Result<Vec<Share>, SplitError> {
    if total < 0 {
        return Err(SplitError::NegativeTotal(total));
    }

    if debtors.is_empty() {
        return Ok(vec![Share {
            participant_id: payer,
            amount: total,
        }]);
    }

    let mut seen = HashSet::with_capacity(debtors.len());
    for &id in debtors {
        if !seen.insert(id) {
            return Err(SplitError::DuplicateDebtor(id));
        }
    }

    let count = debtors.len() as i64;
    let per_debtor = total / count;
    let remainder = total % count;

    Ok(debtors
        .iter()
        .enumerate()
        .map(|(i, &participant_id)| Share {
            participant_id,
            amount: if i == 0 {
                per_debtor + remainder
            } else {
                per_debtor
            },
        })
        .collect())
}

/// Running totals for one participant within a trip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Balance {
    /// Sum of purchase totals this participant paid for
    pub paid: i64,
    /// Sum of shares this participant owes
    pub owed: i64,
    /// `paid - owed`; positive means others owe this participant
    pub net: i64,
}

/// Aggregate paid and owed amounts per participant.
///
/// `purchases` yields `(payer, total)` and `debts` yields `(debtor, amount)`.
/// Only participants that appear in either input get an entry. Sums that
/// leave the `i64` range fail with [`SplitError::Overflow`].
pub fn tally<P, D>(purchases: P, debts: D) -> Result<BTreeMap<ParticipantId, Balance>, SplitError>
where
    P: IntoIterator<Item = (ParticipantId, i64)>,
    D: IntoIterator<Item = (ParticipantId, i64)>,
{
    let mut balances: BTreeMap<ParticipantId, Balance> = BTreeMap::new();

    for (payer, total) in purchases {
        let entry = balances.entry(payer).or_default();
        entry.paid = entry.paid.checked_add(total).ok_or(SplitError::Overflow(payer))?;
        entry.net = entry.net.checked_add(total).ok_or(SplitError::Overflow(payer))?;
    }

    for (debtor, amount) in debts {
        let entry = balances.entry(debtor).or_default();
        entry.owed = entry.owed.checked_add(amount).ok_or(SplitError::Overflow(debtor))?;
        entry.net = entry.net.checked_sub(amount).ok_or(SplitError::Overflow(debtor))?;
    }

    Ok(balances)
}

//! Ledger merge and running-balance fold.
//!
//! Every build starts from the full record set. There is no incremental
//! patching: an edit to any source record can move every later balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::RunningBalance;
use super::entry::LedgerEntry;
use super::error::LedgerError;
use super::source::{SourceEntry, TransactionStream};

/// Order entries are presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayOrder {
    /// Oldest first.
    #[default]
    Ascending,
    /// Newest first.
    Descending,
}

/// A folded passbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Entries with running balances.
    pub entries: Vec<LedgerEntry>,
    /// Balance after the last entry (zero when empty).
    pub final_balance: Decimal,
    /// Source records left out because they had no usable date.
    pub skipped: usize,
    /// Order `entries` are currently in.
    pub order: DisplayOrder,
}

impl Ledger {
    /// Sum of the debit column.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.entries.iter().map(LedgerEntry::debit).sum()
    }

    /// Sum of the credit column.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.entries.iter().map(LedgerEntry::credit).sum()
    }

    /// Reorders entries for display. Running balances keep the values of the
    /// ascending fold.
    #[must_use]
    pub fn display(mut self, order: DisplayOrder) -> Self {
        if self.order != order {
            self.entries.reverse();
            self.order = order;
        }
        self
    }

    /// Checks a stored or independently aggregated balance against the fold.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BalanceDrift` when the two differ.
    pub fn reconcile(&self, stored: Decimal) -> Result<(), LedgerError> {
        if stored == self.final_balance {
            Ok(())
        } else {
            Err(LedgerError::BalanceDrift {
                stored,
                computed: self.final_balance,
            })
        }
    }
}

/// Merges independently sourced streams into one ascending ledger.
///
/// 1. Normalizes every record; records without a date are counted in
///    `skipped` and left out.
/// 2. Sorts by date. The sort is stable, so entries sharing a date keep the
///    order in which their streams were concatenated.
/// 3. Folds a running balance over the sorted entries.
#[must_use]
pub fn build_ledger<'a, I>(streams: I) -> Ledger
where
    I: IntoIterator<Item = TransactionStream<'a>>,
{
    let mut skipped = 0;
    let mut dated = Vec::new();

    for record in streams.into_iter().flatten() {
        let SourceEntry {
            date,
            kind,
            source_id,
            description,
            signed_amount,
        } = record.normalize();

        match date {
            Some(date) => dated.push((date, kind, source_id, description, signed_amount)),
            None => skipped += 1,
        }
    }

    dated.sort_by_key(|(date, ..)| *date);

    let mut running: Option<RunningBalance> = None;
    let entries: Vec<LedgerEntry> = dated
        .into_iter()
        .map(|(date, kind, source_id, description, signed_amount)| {
            let balance = RunningBalance::advance(running.as_ref(), signed_amount);
            running = Some(balance);
            LedgerEntry {
                date,
                kind,
                source_id,
                description,
                signed_amount,
                running_balance: balance.current_balance,
            }
        })
        .collect();

    Ledger {
        final_balance: running.map_or(Decimal::ZERO, |rb| rb.current_balance),
        entries,
        skipped,
        order: DisplayOrder::Ascending,
    }
}

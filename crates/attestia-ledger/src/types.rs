use std::collections::BTreeMap;

use attestia_core::{Money, Timestamp};
use serde::{Deserialize, Serialize};

/// Which side of a ledger entry is increased by the entry's money value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Debit,
    Credit,
}

/// The five fundamental account types. Normal balance is debit for
/// asset/expense, credit for liability/income/equity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Asset,
    Liability,
    Income,
    Expense,
    Equity,
}

impl AccountType {
    pub fn normal_side(&self) -> EntryType {
        match self {
            AccountType::Asset | AccountType::Expense => EntryType::Debit,
            AccountType::Liability | AccountType::Income | AccountType::Equity => EntryType::Credit,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub account_type: AccountType,
    pub name: String,
    pub created_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    pub account_id: String,
    pub entry_type: EntryType,
    pub money: Money,
    pub timestamp: Timestamp,
    pub correlation_id: String,
    pub intent_id: Option<String>,
    pub tx_hash: Option<String>,
}

/// The set of entries appended together under one `correlationId`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub correlation_id: String,
    pub entries: Vec<LedgerEntry>,
    pub timestamp: Timestamp,
    pub description: Option<String>,
    pub entry_count: usize,
}

#[derive(Clone, Debug, Default)]
pub struct AppendOptions {
    pub description: Option<String>,
}

/// Per-currency totals for one account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub currency: String,
    pub total_debits: Money,
    pub total_credits: Money,
    /// `debits - credits` for debit-normal accounts, `credits - debits` otherwise.
    pub balance: Money,
}

/// One (account, currency) line of a trial balance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceLine {
    pub account_id: String,
    pub currency: String,
    pub debit: Money,
    pub credit: Money,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub lines: Vec<TrialBalanceLine>,
    pub balanced: bool,
}

/// A value-object snapshot of ledger state, sufficient to restore an
/// equivalent `Ledger` via [`crate::Ledger::from_snapshot`].
///
/// `transactions` is the authoritative record of how entries were grouped
/// by the original `append()` calls; `transaction_count` is kept alongside
/// it as a convenience summary (`== transactions.len()`) but restore relies
/// on `transactions` itself, since two originally-distinct transactions can
/// legally share one `correlationId` and must not be merged on restore.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub accounts: Vec<Account>,
    pub entries: Vec<LedgerEntry>,
    pub transactions: Vec<Transaction>,
    pub transaction_count: usize,
}

#[derive(Clone, Debug, Default)]
pub struct EntryFilter {
    pub account_id: Option<String>,
    pub correlation_id: Option<String>,
    pub currency: Option<String>,
    pub from_timestamp: Option<Timestamp>,
    pub to_timestamp: Option<Timestamp>,
    pub intent_id: Option<String>,
    pub tx_hash: Option<String>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if let Some(a) = &self.account_id {
            if &entry.account_id != a {
                return false;
            }
        }
        if let Some(c) = &self.correlation_id {
            if &entry.correlation_id != c {
                return false;
            }
        }
        if let Some(cur) = &self.currency {
            if &entry.money.currency != cur {
                return false;
            }
        }
        if let Some(from) = &self.from_timestamp {
            if entry.timestamp < *from {
                return false;
            }
        }
        if let Some(to) = &self.to_timestamp {
            if entry.timestamp > *to {
                return false;
            }
        }
        if let Some(intent) = &self.intent_id {
            if entry.intent_id.as_deref() != Some(intent.as_str()) {
                return false;
            }
        }
        if let Some(tx) = &self.tx_hash {
            if entry.tx_hash.as_deref() != Some(tx.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Accumulates per-currency debit/credit scaled totals while validating a batch.
pub(crate) type CurrencyTotals = BTreeMap<(String, u32), (i128, i128)>;

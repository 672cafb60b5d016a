use std::collections::{HashMap, HashSet};

use attestia_core::{AttestiaError, Money};
use chrono::Utc;
use tracing::{info, warn};

use crate::types::{
    Account, AccountBalance, AccountType, AppendOptions, EntryFilter, EntryType, LedgerEntry,
    LedgerSnapshot, Transaction, TrialBalance, TrialBalanceLine,
};

/// Double-entry ledger over appended `LedgerEntry` batches (C4).
///
/// All mutation goes through [`Ledger::append`], which validates a whole
/// batch before committing any of it: a rejected batch leaves entry count,
/// transaction count, and balances unchanged. There is no `update`,
/// `delete`, or `modify` — corrections are additional reversing entries
/// with new ids.
#[derive(Default)]
pub struct Ledger {
    accounts: HashMap<String, Account>,
    entries: Vec<LedgerEntry>,
    entry_ids: HashSet<String>,
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_account(&mut self, account: Account) -> Result<(), AttestiaError> {
        if self.accounts.contains_key(&account.id) {
            return Err(AttestiaError::Conflict(format!(
                "account already registered: {}",
                account.id
            )));
        }
        self.accounts.insert(account.id.clone(), account);
        Ok(())
    }

    pub fn get_account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Validates and commits a batch of entries atomically.
    ///
    /// Validation order: non-empty, single correlation id, unique ids,
    /// registered accounts, well-formed strictly-positive money, balanced
    /// per currency. Any failure returns an error and leaves the ledger
    /// untouched.
    pub fn append(
        &mut self,
        entries: Vec<LedgerEntry>,
        opts: AppendOptions,
    ) -> Result<Transaction, AttestiaError> {
        if entries.is_empty() {
            return Err(AttestiaError::InvalidInput("entries must not be empty".into()));
        }

        let correlation_id = entries[0].correlation_id.clone();
        for e in &entries {
            if e.correlation_id != correlation_id {
                return Err(AttestiaError::InvalidInput(
                    "all entries in a batch must share one correlationId".into(),
                ));
            }
        }

        let mut batch_ids = HashSet::with_capacity(entries.len());
        for e in &entries {
            if !batch_ids.insert(e.id.clone()) {
                return Err(AttestiaError::InvalidInput(format!(
                    "duplicate entry id within batch: {}",
                    e.id
                )));
            }
            if self.entry_ids.contains(&e.id) {
                return Err(AttestiaError::Conflict(format!(
                    "entry id already exists: {}",
                    e.id
                )));
            }
        }

        for e in &entries {
            if !self.accounts.contains_key(&e.account_id) {
                return Err(AttestiaError::NotFound(format!(
                    "unregistered account: {}",
                    e.account_id
                )));
            }
            e.money.validate_positive()?;
        }

        self.check_balanced(&entries)?;

        let timestamp = Utc::now();
        for e in &entries {
            self.entry_ids.insert(e.id.clone());
        }
        self.entries.extend(entries.iter().cloned());

        let transaction = Transaction {
            correlation_id,
            entries: entries.clone(),
            timestamp,
            description: opts.description,
            entry_count: entries.len(),
        };
        self.transactions.push(transaction.clone());

        info!(
            correlation_id = %transaction.correlation_id,
            entries = transaction.entry_count,
            "ledger transaction committed"
        );
        Ok(transaction)
    }

    /// Per-currency balance check: for every currency present in the
    /// batch, Σ(debit amounts) must equal Σ(credit amounts). A batch
    /// touching a currency with only debits (or only credits) is rejected.
    fn check_balanced(&self, entries: &[LedgerEntry]) -> Result<(), AttestiaError> {
        let mut totals: HashMap<(String, u32), (i128, i128)> = HashMap::new();
        for e in entries {
            let scaled = e.money.scaled()?;
            let key = (e.money.currency.clone(), e.money.decimals);
            let slot = totals.entry(key).or_insert((0, 0));
            match e.entry_type {
                EntryType::Debit => slot.0 += scaled,
                EntryType::Credit => slot.1 += scaled,
            }
        }
        for ((currency, _decimals), (debits, credits)) in &totals {
            if debits != credits {
                warn!(
                    currency,
                    debits, credits, "rejecting unbalanced ledger batch"
                );
                return Err(AttestiaError::IntegrityViolation(format!(
                    "unbalanced batch for currency {currency}: debits={debits} credits={credits}"
                )));
            }
        }
        Ok(())
    }

    pub fn get_balance(&self, account_id: &str) -> Vec<AccountBalance> {
        let Some(account) = self.accounts.get(account_id) else {
            return Vec::new();
        };
        let normal_side = account.account_type.normal_side();

        let mut per_currency: HashMap<(String, u32), (i128, i128)> = HashMap::new();
        for e in &self.entries {
            if e.account_id != account_id {
                continue;
            }
            let scaled = match e.money.scaled() {
                Ok(v) => v,
                Err(_) => continue,
            };
            let key = (e.money.currency.clone(), e.money.decimals);
            let slot = per_currency.entry(key).or_insert((0, 0));
            match e.entry_type {
                EntryType::Debit => slot.0 += scaled,
                EntryType::Credit => slot.1 += scaled,
            }
        }

        let mut balances: Vec<AccountBalance> = per_currency
            .into_iter()
            .map(|((currency, decimals), (debits, credits))| {
                let balance_scaled = match normal_side {
                    EntryType::Debit => debits - credits,
                    EntryType::Credit => credits - debits,
                };
                AccountBalance {
                    currency: currency.clone(),
                    total_debits: Money::new(debits, currency.clone(), decimals)
                        .expect("scaled debit total is well-formed"),
                    total_credits: Money::new(credits, currency.clone(), decimals)
                        .expect("scaled credit total is well-formed"),
                    balance: Money::new(balance_scaled, currency, decimals)
                        .expect("scaled balance is well-formed"),
                }
            })
            .collect();
        balances.sort_by(|a, b| a.currency.cmp(&b.currency));
        balances
    }

    /// Trial balance across all accounts, optionally as-of a timestamp.
    /// Each line places the account's signed balance in the column
    /// matching its normal side (or the opposite column if negative).
    pub fn get_trial_balance(&self, as_of: Option<attestia_core::Timestamp>) -> TrialBalance {
        let mut per_account_currency: HashMap<(String, String, u32), (i128, i128)> = HashMap::new();

        for e in &self.entries {
            if let Some(cutoff) = as_of {
                if e.timestamp > cutoff {
                    continue;
                }
            }
            let scaled = match e.money.scaled() {
                Ok(v) => v,
                Err(_) => continue,
            };
            let key = (e.account_id.clone(), e.money.currency.clone(), e.money.decimals);
            let slot = per_account_currency.entry(key).or_insert((0, 0));
            match e.entry_type {
                EntryType::Debit => slot.0 += scaled,
                EntryType::Credit => slot.1 += scaled,
            }
        }

        let mut lines = Vec::new();
        let mut debit_totals: HashMap<(String, u32), i128> = HashMap::new();
        let mut credit_totals: HashMap<(String, u32), i128> = HashMap::new();

        for ((account_id, currency, decimals), (debits, credits)) in per_account_currency {
            let Some(account) = self.accounts.get(&account_id) else {
                continue;
            };
            let net = debits - credits;
            let (debit_col, credit_col) = match account.account_type.normal_side() {
                EntryType::Debit => {
                    if net >= 0 {
                        (net, 0)
                    } else {
                        (0, -net)
                    }
                }
                EntryType::Credit => {
                    let credit_net = -net;
                    if credit_net >= 0 {
                        (0, credit_net)
                    } else {
                        (-credit_net, 0)
                    }
                }
            };

            *debit_totals.entry((currency.clone(), decimals)).or_insert(0) += debit_col;
            *credit_totals.entry((currency.clone(), decimals)).or_insert(0) += credit_col;

            lines.push(TrialBalanceLine {
                account_id: account_id.clone(),
                currency: currency.clone(),
                debit: Money::new(debit_col, currency.clone(), decimals)
                    .expect("scaled debit column is well-formed"),
                credit: Money::new(credit_col, currency, decimals)
                    .expect("scaled credit column is well-formed"),
            });
        }

        lines.sort_by(|a, b| (a.account_id.clone(), a.currency.clone()).cmp(&(b.account_id.clone(), b.currency.clone())));

        let balanced = debit_totals.iter().all(|(key, debit)| {
            credit_totals.get(key).copied().unwrap_or(0) == *debit
        }) && credit_totals.keys().all(|key| debit_totals.contains_key(key));

        TrialBalance { lines, balanced }
    }

    pub fn get_entries(&self, filter: &EntryFilter) -> Vec<LedgerEntry> {
        self.entries.iter().filter(|e| filter.matches(e)).cloned().collect()
    }

    pub fn get_entries_by_correlation(&self, correlation_id: &str) -> Vec<LedgerEntry> {
        self.entries
            .iter()
            .filter(|e| e.correlation_id == correlation_id)
            .cloned()
            .collect()
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            accounts: {
                let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
                accounts.sort_by(|a, b| a.id.cmp(&b.id));
                accounts
            },
            entries: self.entries.clone(),
            transactions: self.transactions.clone(),
            transaction_count: self.transactions.len(),
        }
    }

    /// Restores a ledger from a previously taken snapshot. `transactions`
    /// is restored verbatim rather than re-derived by grouping entries on
    /// `correlationId`: two separate `append()` batches are legally allowed
    /// to share one `correlationId` (e.g. two corrections posted under the
    /// same business-day id), and re-grouping by key would silently merge
    /// them into one transaction, losing the original transaction count.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let mut accounts = HashMap::with_capacity(snapshot.accounts.len());
        for a in snapshot.accounts {
            accounts.insert(a.id.clone(), a);
        }
        let mut entry_ids = HashSet::with_capacity(snapshot.entries.len());
        for e in &snapshot.entries {
            entry_ids.insert(e.id.clone());
        }
        Self {
            accounts,
            entries: snapshot.entries,
            entry_ids,
            transactions: snapshot.transactions,
        }
    }
}
        .into_iter()
        .map(|id| {
            let v = groups.remove(&id).unwrap_or_default();
            (id, v)
        })
        .collect()
}

pub fn account_type_normal_side(account_type: AccountType) -> EntryType {
    account_type.normal_side()
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One user's view of the ledger.
//!
//! Every successful write is followed by a [`Change`] sent to subscribers so
//! that cached views know to refetch. Failed operations send nothing.

use crate::config::Config;
use crate::error::Result;
use crate::models::{
    Account, AccountDraft, AccountId, AccountPatch, Transaction, TransactionDraft, TransactionId,
    UserSettings,
};
use crate::query::{self, TransactionFilter};
use crate::stats::{self, Stats};
use crate::{ledger, poster, settings};
use rusqlite::Connection;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    AccountAdded(AccountId),
    AccountUpdated(AccountId),
    AccountArchived(AccountId),
    TransactionPosted {
        id: TransactionId,
        accounts: Vec<AccountId>,
    },
    TransactionReversed {
        id: TransactionId,
        accounts: Vec<AccountId>,
    },
    SettingsUpdated,
}

type Listener = Box<dyn Fn(&Change)>;

pub struct Wallet {
    conn: Connection,
    user: String,
    max_retries: u32,
    listeners: Vec<Listener>,
}

impl Wallet {
    /// Wrap an initialized connection, creating the user if needed.
    pub fn new(conn: Connection, user: impl Into<String>, max_retries: u32) -> Result<Self> {
        let user = user.into().trim().to_string();
        settings::ensure_user(&conn, &user)?;
        Ok(Self {
            conn,
            user,
            max_retries,
            listeners: Vec::new(),
        })
    }

    pub fn open(cfg: &Config) -> anyhow::Result<Self> {
        let conn = crate::db::open_or_init(cfg)?;
        Ok(Self::new(conn, cfg.user.clone(), cfg.max_retries)?)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&Change) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self, change: Change) {
        for l in &self.listeners {
            l(&change);
        }
    }

    pub fn add_account(&mut self, draft: &AccountDraft) -> Result<AccountId> {
        let id = ledger::add_account(&self.conn, &self.user, draft)?;
        self.notify(Change::AccountAdded(id));
        Ok(id)
    }

    pub fn update_account(&mut self, id: AccountId, patch: &AccountPatch) -> Result<()> {
        ledger::update_account(&self.conn, &self.user, id, patch)?;
        self.notify(Change::AccountUpdated(id));
        Ok(())
    }

    pub fn archive_account(&mut self, id: AccountId) -> Result<()> {
        ledger::archive_account(&self.conn, &self.user, id)?;
        self.notify(Change::AccountArchived(id));
        Ok(())
    }

    pub fn account(&self, id: AccountId) -> Result<Account> {
        ledger::get_account(&self.conn, &self.user, id)
    }

    pub fn accounts(&self, include_archived: bool) -> Result<Vec<Account>> {
        ledger::list_accounts(&self.conn, &self.user, include_archived)
    }

    pub fn get_balance(&self, id: AccountId) -> Result<Decimal> {
        ledger::get_balance(&self.conn, &self.user, id)
    }

    pub fn get_total_balance(&self) -> Result<Decimal> {
        ledger::get_total_balance(&self.conn, &self.user)
    }

    pub fn add_transaction(&mut self, draft: &TransactionDraft) -> Result<TransactionId> {
        let id = poster::post(&mut self.conn, &self.user, draft, self.max_retries)?;
        let accounts = [draft.account_id, draft.from_account_id, draft.to_account_id]
            .into_iter()
            .flatten()
            .collect();
        self.notify(Change::TransactionPosted { id, accounts });
        Ok(id)
    }

    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<()> {
        let accounts = poster::reverse(&mut self.conn, &self.user, id, self.max_retries)?;
        self.notify(Change::TransactionReversed { id, accounts });
        Ok(())
    }

    pub fn transaction(&self, id: TransactionId) -> Result<Transaction> {
        query::get_transaction(&self.conn, &self.user, id)
    }

    pub fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        query::list(&self.conn, &self.user, filter)
    }

    /// Totals over all of the user's transactions, independent of any filter.
    pub fn get_stats(&self) -> Result<Stats> {
        let all = query::list(&self.conn, &self.user, &TransactionFilter::default())?;
        Ok(stats::aggregate(&all))
    }

    pub fn settings(&self) -> Result<UserSettings> {
        settings::get_settings(&self.conn, &self.user)
    }

    pub fn set_currency(&mut self, code: &str) -> Result<UserSettings> {
        let s = settings::set_currency(&self.conn, &self.user, code)?;
        self.notify(Change::SettingsUpdated);
        Ok(s)
    }
}

//! In-memory purchase ledger and spending aggregates.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::purchase::Purchase;
use crate::error::{LedgerError, Result};

/// Number of recent purchases used for "recent spending" totals.
pub const DEFAULT_RECENT_LIMIT: usize = 30;

/// Number of purchases summarized for the advice service.
pub const DEFAULT_ADVICE_HISTORY_LIMIT: usize = 100;

/// Simplified purchase view sent to the advice service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceHistoryEntry {
    pub merchant: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl From<&Purchase> for AdviceHistoryEntry {
    fn from(p: &Purchase) -> Self {
        Self {
            merchant: p.merchant.clone(),
            amount: p.amount,
            category: p.category_label().to_string(),
            date: p.date.clone(),
        }
    }
}

/// Purchases ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseLedger {
    purchases: Vec<Purchase>,
}

impl PurchaseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap purchases that are already ordered newest first.
    pub fn from_purchases(purchases: Vec<Purchase>) -> Self {
        Self { purchases }
    }

    /// Load a ledger from a JSON array of purchases. A missing file is an
    /// empty ledger.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No ledger at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        let ledger: Self = serde_json::from_str(&content)?;
        info!("Loaded {} purchases from {}", ledger.len(), path.display());
        Ok(ledger)
    }

    /// Save the ledger as a pretty-printed JSON array.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn len(&self) -> usize {
        self.purchases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Purchase> {
        self.purchases.iter().find(|p| p.id == id)
    }

    /// Record a purchase as the newest entry.
    pub fn add(&mut self, purchase: Purchase) -> &Purchase {
        self.purchases.insert(0, purchase);
        &self.purchases[0]
    }

    /// Remove a purchase by id.
    pub fn remove(&mut self, id: &str) -> Result<Purchase> {
        let index = self
            .purchases
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        Ok(self.purchases.remove(index))
    }

    pub fn clear(&mut self) {
        self.purchases.clear();
    }

    /// Total spend per category label over the whole ledger.
    pub fn total_by_category(&self) -> BTreeMap<String, Decimal> {
        totals(&self.purchases)
    }

    /// Total spend per category label over the `n` newest purchases.
    pub fn totals_last_n(&self, n: usize) -> BTreeMap<String, Decimal> {
        let end = n.min(self.purchases.len());
        totals(&self.purchases[..end])
    }

    /// Grand total over the whole ledger.
    pub fn total(&self) -> Decimal {
        self.purchases.iter().map(|p| p.amount).sum()
    }

    /// The `limit` newest purchases in the shape the advice service expects.
    pub fn recent_for_advice(&self, limit: usize) -> Vec<AdviceHistoryEntry> {
        self.purchases
            .iter()
            .take(limit)
            .map(AdviceHistoryEntry::from)
            .collect()
    }
}

fn totals(purchases: &[Purchase]) -> BTreeMap<String, Decimal> {
    let mut map = BTreeMap::new();
    for p in purchases {
        *map.entry(p.category_label().to_string())
            .or_insert(Decimal::ZERO) += p.amount;
    }
    map
}

//! Gold investment models
//!
//! A gold wallet holds a physical weight at a single purity together with
//! the cash spent to acquire it (cost basis). Gold transactions record
//! buys, sells, and transfers between gold wallets, always priced per gram.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GoldTransactionId, GoldWalletId, WalletId};
use super::money::Money;
use super::weight::Weight;

/// Gold purity expressed in karat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GoldPurity {
    #[serde(rename = "24k")]
    #[default]
    K24,
    #[serde(rename = "22k")]
    K22,
    #[serde(rename = "21k")]
    K21,
    #[serde(rename = "18k")]
    K18,
}

impl GoldPurity {
    /// Fineness in per-mille of pure gold
    pub const fn fineness_per_mille(&self) -> i64 {
        match self {
            Self::K24 => 999,
            Self::K22 => 916,
            Self::K21 => 875,
            Self::K18 => 750,
        }
    }

    /// Parse a purity from string ("24", "24k", "22K", ...)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().trim_end_matches('k') {
            "24" => Some(Self::K24),
            "22" => Some(Self::K22),
            "21" => Some(Self::K21),
            "18" => Some(Self::K18),
            _ => None,
        }
    }
}

impl fmt::Display for GoldPurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::K24 => write!(f, "24K"),
            Self::K22 => write!(f, "22K"),
            Self::K21 => write!(f, "21K"),
            Self::K18 => write!(f, "18K"),
        }
    }
}

/// A gold holding at a single purity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldWallet {
    /// Unique identifier
    pub id: GoldWalletId,

    /// Holding name (e.g., "Vault", "Wedding Set")
    pub name: String,

    /// Emoji tag shown next to the name
    #[serde(default = "default_emoji")]
    pub emoji: String,

    /// Current alloy weight held
    pub weight: Weight,

    /// Purity of the holding
    pub purity: GoldPurity,

    /// Total cash spent acquiring the current weight
    pub cost_basis: Money,

    /// Whether this holding is archived (soft-deleted)
    #[serde(default)]
    pub archived: bool,

    /// When the holding was created
    pub created_at: DateTime<Utc>,

    /// When the holding was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_emoji() -> String {
    "🪙".to_string()
}

impl GoldWallet {
    /// Create a new empty gold wallet
    pub fn new(name: impl Into<String>, purity: GoldPurity) -> Self {
        let now = Utc::now();
        Self {
            id: GoldWalletId::new(),
            name: name.into(),
            emoji: default_emoji(),
            weight: Weight::zero(),
            purity,
            cost_basis: Money::zero(),
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the emoji tag
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    /// Add weight and its acquisition cost
    pub fn add(&mut self, weight: Weight, cost: Money) {
        self.weight += weight;
        self.cost_basis += cost;
        self.updated_at = Utc::now();
    }

    /// Remove weight and a share of the cost basis. Callers validate the
    /// weight does not exceed the holding.
    pub fn remove(&mut self, weight: Weight, basis_share: Money) {
        self.weight -= weight;
        self.cost_basis -= basis_share;
        self.updated_at = Utc::now();
    }

    /// Pure-gold content of the holding
    pub fn fine_weight(&self) -> Weight {
        self.weight.scale_per_mille(self.purity.fineness_per_mille())
    }

    /// Market value at a per-gram price for pure gold
    pub fn value_at(&self, price_per_gram: Money) -> Money {
        self.fine_weight().value_at(price_per_gram)
    }

    /// The share of the cost basis carried by `weight` of this holding
    pub fn basis_share(&self, weight: Weight) -> Money {
        self.cost_basis
            .prorate(weight.milligrams(), self.weight.milligrams())
    }

    /// Mark this holding as archived
    pub fn archive(&mut self) {
        self.archived = true;
        self.updated_at = Utc::now();
    }

    /// Validate the holding
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Gold wallet name cannot be empty".into());
        }
        if self.weight.is_negative() {
            return Err(format!("Gold wallet weight cannot be negative: {}", self.weight));
        }
        Ok(())
    }
}

impl fmt::Display for GoldWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} {})",
            self.emoji, self.name, self.weight, self.purity
        )
    }
}

/// The kind of a gold transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoldTransactionKind {
    Buy,
    Sell,
    Transfer,
}

impl fmt::Display for GoldTransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Sell => write!(f, "Sell"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A gold ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldTransaction {
    /// Unique identifier
    pub id: GoldTransactionId,

    /// What kind of entry this is
    pub kind: GoldTransactionKind,

    /// The gold wallet this entry belongs to (the source, for transfers)
    pub gold_wallet_id: GoldWalletId,

    /// Destination gold wallet for transfers
    pub counter_gold_wallet_id: Option<GoldWalletId>,

    /// The cash wallet debited (buy) or credited (sell)
    pub cash_wallet_id: Option<WalletId>,

    /// Alloy weight moved
    pub weight: Weight,

    /// Price per gram used for the trade (zero for transfers)
    pub price_per_gram: Money,

    /// Total cash moved (weight x price per gram)
    pub total: Money,

    /// Ledger date
    pub date: NaiveDate,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the entry was created
    pub created_at: DateTime<Utc>,
}

impl GoldTransaction {
    /// Create a new gold ledger entry
    pub fn new(
        kind: GoldTransactionKind,
        gold_wallet_id: GoldWalletId,
        weight: Weight,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: GoldTransactionId::new(),
            kind,
            gold_wallet_id,
            counter_gold_wallet_id: None,
            cash_wallet_id: None,
            weight,
            price_per_gram: Money::zero(),
            total: Money::zero(),
            date,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    /// The signed effect of this entry on the given gold wallet's weight
    pub fn signed_weight_for(&self, gold_wallet_id: GoldWalletId) -> Weight {
        match self.kind {
            GoldTransactionKind::Buy => {
                if self.gold_wallet_id == gold_wallet_id {
                    self.weight
                } else {
                    Weight::zero()
                }
            }
            GoldTransactionKind::Sell => {
                if self.gold_wallet_id == gold_wallet_id {
                    -self.weight
                } else {
                    Weight::zero()
                }
            }
            GoldTransactionKind::Transfer => {
                if self.gold_wallet_id == gold_wallet_id {
                    -self.weight
                } else if self.counter_gold_wallet_id == Some(gold_wallet_id) {
                    self.weight
                } else {
                    Weight::zero()
                }
            }
        }
    }
}

/// A cached gold spot quote used for valuation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldPriceQuote {
    /// Price per gram of pure gold
    pub price_per_gram: Money,

    /// Currency the price is quoted in (display only)
    pub currency: String,

    /// Where the quote came from ("manual" or a provider name)
    pub source: String,

    /// When the quote was recorded
    pub fetched_at: DateTime<Utc>,
}

impl GoldPriceQuote {
    /// Create a manual quote
    pub fn manual(price_per_gram: Money, currency: impl Into<String>) -> Self {
        Self {
            price_per_gram,
            currency: currency.into(),
            source: "manual".to_string(),
            fetched_at: Utc::now(),
        }
    }

    /// Age of the quote in whole hours
    pub fn age_hours(&self) -> i64 {
        (Utc::now() - self.fetched_at).num_hours()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_purity() {
        assert_eq!(GoldPurity::parse("24"), Some(GoldPurity::K24));
        assert_eq!(GoldPurity::parse("22k"), Some(GoldPurity::K22));
        assert_eq!(GoldPurity::parse("18K"), Some(GoldPurity::K18));
        assert_eq!(GoldPurity::parse("14"), None);
        assert_eq!(GoldPurity::K22.fineness_per_mille(), 916);
        assert_eq!(format!("{}", GoldPurity::K21), "21K");
    }

    #[test]
    fn test_add_and_remove() {
        let mut vault = GoldWallet::new("Vault", GoldPurity::K24);
        vault.add(Weight::from_grams(10), Money::from_cents(650_000));
        assert_eq!(vault.weight.grams(), 10);
        assert_eq!(vault.cost_basis.cents(), 650_000);

        let share = vault.basis_share(Weight::from_grams(5));
        assert_eq!(share.cents(), 325_000);

        vault.remove(Weight::from_grams(5), share);
        assert_eq!(vault.weight.grams(), 5);
        assert_eq!(vault.cost_basis.cents(), 325_000);
    }

    #[test]
    fn test_fine_weight_and_value() {
        let mut set = GoldWallet::new("Wedding Set", GoldPurity::K22);
        set.add(Weight::from_grams(10), Money::from_cents(600_000));

        // 10 g of 22K -> 9.160 g fine
        assert_eq!(set.fine_weight().milligrams(), 9_160);

        // at $65.00/g fine: 9.160 * 6500 = $595.40
        assert_eq!(set.value_at(Money::from_cents(6500)).cents(), 59_540);
    }

    #[test]
    fn test_signed_weight_for() {
        let from = GoldWalletId::new();
        let to = GoldWalletId::new();

        let mut txn =
            GoldTransaction::new(GoldTransactionKind::Transfer, from, Weight::from_grams(2), date());
        txn.counter_gold_wallet_id = Some(to);

        assert_eq!(txn.signed_weight_for(from).grams(), -2);
        assert_eq!(txn.signed_weight_for(to).grams(), 2);

        let buy = GoldTransaction::new(GoldTransactionKind::Buy, from, Weight::from_grams(1), date());
        assert_eq!(buy.signed_weight_for(from).grams(), 1);
        assert_eq!(buy.signed_weight_for(to).grams(), 0);
    }

    #[test]
    fn test_quote() {
        let quote = GoldPriceQuote::manual(Money::from_cents(6500), "USD");
        assert_eq!(quote.source, "manual");
        assert!(quote.age_hours() <= 0);
    }
}

//! Gold spot price service
//!
//! Keeps one cached quote on disk. The quote is set manually or fetched
//! from a public spot-price API; valuation code always reads the cache and
//! never fetches on its own.

use serde::Deserialize;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{GoldPriceQuote, Money};
use crate::storage::Storage;

/// Grams per troy ounce, the unit spot APIs quote in
const GRAMS_PER_TROY_OUNCE: f64 = 31.1034768;

/// Spot price endpoint (USD per troy ounce of gold)
const SPOT_URL: &str = "https://api.gold-api.com/price/XAU";

const USER_AGENT: &str = concat!("fintrack/", env!("CARGO_PKG_VERSION"));

/// Service for the cached gold spot quote
pub struct GoldPriceService<'a> {
    storage: &'a Storage,
}

/// Response shape of the spot endpoint
#[derive(Debug, Deserialize)]
struct SpotResponse {
    price: f64,
}

impl<'a> GoldPriceService<'a> {
    /// Create a new price service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Get the cached quote, if any
    pub fn quote(&self) -> FintrackResult<Option<GoldPriceQuote>> {
        self.storage.gold_price.get()
    }

    /// Get the cached quote or fail with a hint to set one
    pub fn require_quote(&self) -> FintrackResult<GoldPriceQuote> {
        self.quote()?.ok_or_else(|| {
            FintrackError::Price(
                "No gold price on record. Run 'gold price fetch' or 'gold price set <amount>'"
                    .into(),
            )
        })
    }

    /// Record a manual per-gram quote
    pub fn set_manual(&self, price_per_gram: Money, currency: &str) -> FintrackResult<GoldPriceQuote> {
        if !price_per_gram.is_positive() {
            return Err(FintrackError::Validation(
                "Gold price must be positive".into(),
            ));
        }

        let quote = GoldPriceQuote::manual(price_per_gram, currency);
        self.storage.gold_price.set(&quote)?;
        Ok(quote)
    }

    /// Fetch the current spot price and cache it as a per-gram quote
    pub fn fetch(&self) -> FintrackResult<GoldPriceQuote> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FintrackError::Price(format!("Failed to build HTTP client: {}", e)))?;

        let response = client
            .get(SPOT_URL)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| FintrackError::Price(format!("Spot price fetch failed: {}", e)))?;

        let spot: SpotResponse = response
            .json()
            .map_err(|e| FintrackError::Price(format!("Unexpected spot price response: {}", e)))?;

        let quote = quote_from_ounce_price(spot.price)?;
        self.storage.gold_price.set(&quote)?;
        Ok(quote)
    }
}

/// Convert a USD-per-troy-ounce price into a cached per-gram quote
fn quote_from_ounce_price(ounce_price: f64) -> FintrackResult<GoldPriceQuote> {
    if !ounce_price.is_finite() || ounce_price <= 0.0 {
        return Err(FintrackError::Price(format!(
            "Spot API returned an unusable price: {}",
            ounce_price
        )));
    }

    let cents_per_gram = (ounce_price * 100.0 / GRAMS_PER_TROY_OUNCE).round() as i64;
    let mut quote = GoldPriceQuote::manual(Money::from_cents(cents_per_gram), "USD");
    quote.source = "gold-api.com".to_string();
    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_require_quote_without_cache_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoldPriceService::new(&storage);

        assert!(service.quote().unwrap().is_none());
        assert!(matches!(
            service.require_quote(),
            Err(FintrackError::Price(_))
        ));
    }

    #[test]
    fn test_set_manual_and_read_back() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoldPriceService::new(&storage);

        service.set_manual(Money::from_cents(6_500), "USD").unwrap();

        let quote = service.require_quote().unwrap();
        assert_eq!(quote.price_per_gram.cents(), 6_500);
        assert_eq!(quote.source, "manual");
    }

    #[test]
    fn test_set_manual_rejects_non_positive() {
        let (_temp_dir, storage) = create_test_storage();
        let service = GoldPriceService::new(&storage);

        assert!(service.set_manual(Money::zero(), "USD").is_err());
    }

    #[test]
    fn test_ounce_to_gram_conversion() {
        // $2,000/oz -> $64.30/g
        let quote = quote_from_ounce_price(2_000.0).unwrap();
        assert_eq!(quote.price_per_gram.cents(), 6_430);
        assert_eq!(quote.source, "gold-api.com");

        assert!(quote_from_ounce_price(0.0).is_err());
        assert!(quote_from_ounce_price(f64::NAN).is_err());
    }
}

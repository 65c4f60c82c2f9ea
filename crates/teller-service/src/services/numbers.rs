//! Account number generation.

use std::sync::Arc;

use rand::Rng;

use teller_core::{AccountNumber, Result};
use teller_store::Store;

/// Size of the account number space: all 10-digit decimal strings.
const ACCOUNT_NUMBER_SPACE: u64 = 10_000_000_000;

/// Generates unique 10-digit account numbers.
///
/// Draws uniformly from [0, 10^10) and retries until the candidate does
/// not already exist in storage. At expected scale collisions are rare
/// enough that no retry bound or backoff is needed.
pub struct AccountNumberGenerator<S> {
    store: Arc<S>,
}

impl<S: Store> AccountNumberGenerator<S> {
    /// Create a generator backed by `store` for existence checks.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Generate a fresh account number not yet present in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the existence check fails.
    pub fn generate(&self) -> Result<AccountNumber> {
        self.generate_with(&mut rand::rng())
    }

    /// Generate using the supplied RNG (seedable for tests).
    ///
    /// # Errors
    ///
    /// Returns an error if the existence check fails.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<AccountNumber> {
        loop {
            let candidate = AccountNumber::from_draw(rng.random_range(0..ACCOUNT_NUMBER_SPACE));
            if !self.store.account_number_exists(&candidate)? {
                return Ok(candidate);
            }
            tracing::debug!(%candidate, "account number collision, redrawing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use teller_core::{Account, UserId};
    use teller_store::MemoryStore;

    #[test]
    fn generated_numbers_are_10_digits_zero_padded() {
        let generator = AccountNumberGenerator::new(Arc::new(MemoryStore::new()));
        for _ in 0..100 {
            let number = generator.generate().unwrap();
            assert_eq!(number.as_str().len(), 10);
            assert!(number.as_str().bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn generator_skips_existing_numbers() {
        // First pass: record which numbers a seeded RNG draws.
        let empty = AccountNumberGenerator::new(Arc::new(MemoryStore::new()));
        let mut rng = StdRng::seed_from_u64(7);
        let taken: Vec<AccountNumber> = (0..5).map(|_| empty.generate_with(&mut rng).unwrap()).collect();

        // Second pass: same seed, but those numbers now exist in storage.
        let store = Arc::new(MemoryStore::new());
        for number in &taken {
            let account = Account::open(UserId::new(1), number.clone(), 0, Utc::now());
            store.put_account(&account).unwrap();
        }

        let generator = AccountNumberGenerator::new(store);
        let mut rng = StdRng::seed_from_u64(7);
        let fresh = generator.generate_with(&mut rng).unwrap();

        assert!(!taken.contains(&fresh));
        assert_eq!(fresh.as_str().len(), 10);
    }
}

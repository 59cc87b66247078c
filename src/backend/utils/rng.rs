// src/backend/utils/rng.rs

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;

use crate::utils::time::get_current_time_ns;

thread_local! {
    // Seeded from raw_rand shortly after init; until then a time-derived seed is used.
    static INTERNAL_RNG: RefCell<Option<ChaCha8Rng>> = const { RefCell::new(None) };
}

/// Replaces the internal RNG with one seeded from `seed`.
pub fn seed_internal_rng(seed: [u8; 32]) {
    INTERNAL_RNG.with(|rng| {
        *rng.borrow_mut() = Some(ChaCha8Rng::from_seed(seed));
    });
}

/// Seeds the internal RNG from the management canister's `raw_rand`.
/// Scheduled from a zero-delay timer in `init`/`post_upgrade`, since `init` cannot await.
#[cfg(target_arch = "wasm32")]
pub async fn initialize_internal_rng() {
    use ic_cdk::api::management_canister::main::raw_rand;

    match raw_rand().await {
        Ok((bytes,)) => match <[u8; 32]>::try_from(bytes.get(..32).unwrap_or_default()) {
            Ok(seed) => {
                seed_internal_rng(seed);
                tracing::info!("internal RNG seeded from raw_rand");
            }
            Err(_) => tracing::error!(len = bytes.len(), "raw_rand returned insufficient bytes for seed"),
        },
        Err((code, msg)) => tracing::error!(?code, %msg, "failed to fetch raw_rand"),
    }
}

/// Borrows the internal RNG, seeding it from the clock when nothing better has been provided yet.
pub fn with_internal_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut ChaCha8Rng) -> R,
{
    INTERNAL_RNG.with(|rng| {
        let mut borrowed = rng.borrow_mut();
        let instance = borrowed.get_or_insert_with(|| ChaCha8Rng::seed_from_u64(get_current_time_ns()));
        f(instance)
    })
}

// rand pulls in getrandom; inside the canister all randomness goes through INTERNAL_RNG instead.
#[cfg(target_arch = "wasm32")]
fn unsupported_getrandom(_buf: &mut [u8]) -> Result<(), getrandom::Error> {
    Err(getrandom::Error::UNSUPPORTED)
}

#[cfg(target_arch = "wasm32")]
getrandom::register_custom_getrandom!(unsupported_getrandom);

//! Deterministic variant selection.
//!
//! Phrase pools are indexed by a stable string hash instead of a random
//! number generator, so the same seed always lands on the same phrase on
//! every platform.

/// Errors raised by [`variant_index`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VariantError {
    #[error("Modulo must be positive")]
    NonPositiveModulo,
}

/// 31-multiplier string hash over UTF-16 code units, kept in a wrapping `i32`.
fn seed_hash(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Map `seed` to a stable index in `[0, modulo)`.
pub fn variant_index(seed: &str, modulo: usize) -> Result<usize, VariantError> {
    if modulo == 0 {
        return Err(VariantError::NonPositiveModulo);
    }

    let magnitude = seed_hash(seed).unsigned_abs() as usize;
    Ok(magnitude % modulo)
}

/// Pick one entry of a fixed phrase pool for `seed`.
///
/// Pools must be non-empty. Debug builds panic on an empty pool; release
/// builds fall back to an empty string.
pub fn pick_variant(pool: &[&'static str], seed: &str) -> &'static str {
    debug_assert!(!pool.is_empty(), "phrase pool for seed {seed:?} is empty");
    match variant_index(seed, pool.len()) {
        Ok(index) => pool[index],
        Err(_) => "",
    }
}

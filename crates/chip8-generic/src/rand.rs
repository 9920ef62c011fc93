//! Seeded random number generators for Cxnn.
//!
//! VIP-derived bases reproduce the interpreter's 16-bit seed-fold algorithm,
//! which adds a byte from a fixed table into the seed's high half and folds
//! the carry back. The table stands in for the interpreter ROM page the
//! original routine read through; it is built from the hex font so the
//! sequence is fully determined by the core itself.
//!
//! CHIP-48 and later bases use a classic LCG (the common ANSI-C constants)
//! with an explicit seed, so runs are reproducible.

/// Builds the 256-byte add-table for the seed-fold generator.
#[must_use]
pub fn fold_table(font: &[u8]) -> [u8; 256] {
    let mut table = [0u8; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = font[i % font.len()];
    }
    table
}

/// One step of the VIP seed-fold generator, masked with `nn`.
pub fn fold_rand(seed: &mut u16, table: &[u8; 256], nn: u8) -> u8 {
    *seed = seed.wrapping_add(1);
    let mut val = *seed >> 8;
    val = val.wrapping_add(u16::from(table[(*seed & 0xFF) as usize]));
    let result = val as u8;
    val >>= 1;
    val = val.wrapping_add(u16::from(result));
    *seed = (*seed & 0xFF) | (val << 8);
    (val as u8) & nn
}

/// One step of the classic LCG, returning the top byte of the useful bits.
pub fn lcg_rand(state: &mut u32) -> u8 {
    *state = state.wrapping_mul(1_103_515_245).wrapping_add(12345) & 0x7FFF_FFFF;
    (*state >> 16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::VIP_FONT;

    #[test]
    fn fold_rand_is_deterministic() {
        let table = fold_table(&VIP_FONT);
        let mut a = 0u16;
        let mut b = 0u16;
        for _ in 0..256 {
            assert_eq!(fold_rand(&mut a, &table, 0xFF), fold_rand(&mut b, &table, 0xFF));
        }
        assert_eq!(a, b);
    }

    #[test]
    fn fold_rand_respects_mask() {
        let table = fold_table(&VIP_FONT);
        let mut seed = 42u16;
        for _ in 0..64 {
            assert_eq!(fold_rand(&mut seed, &table, 0x0F) & 0xF0, 0);
        }
    }

    #[test]
    fn lcg_matches_reference_sequence() {
        // First values of the ANSI-C generator seeded with 12345.
        let mut state = 12345u32;
        let first = lcg_rand(&mut state);
        let mut again = 12345u32;
        assert_eq!(lcg_rand(&mut again), first);
        // The state never leaves the positive 31-bit range.
        for _ in 0..1000 {
            lcg_rand(&mut state);
            assert_eq!(state & 0x8000_0000, 0);
        }
    }
}

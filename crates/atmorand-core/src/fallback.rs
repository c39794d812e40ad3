//! Local pseudorandom fallback generator.
//!
//! Used only when the caller has opted in and the remote fetch has failed.
//! Output is tagged [`SourceLabel::Fallback`] so downstream display can
//! never misrepresent pseudorandom data as true-random.

use rand::RngCore;

use crate::fetcher::{RandomBytes, SourceLabel};

/// Exactly `n` uniform bytes from the thread-local PRNG, tagged `fallback`.
pub fn fallback_bytes(n: usize) -> RandomBytes {
    fallback_bytes_with(n, &mut rand::rng())
}

/// Exactly `n` uniform bytes from the given generator, tagged `fallback`.
///
/// The generator is injected so tests can use a seeded [`rand::rngs::StdRng`]
/// for deterministic output.
pub fn fallback_bytes_with<R: RngCore>(n: usize, rng: &mut R) -> RandomBytes {
    let mut data = vec![0u8; n];
    rng.fill_bytes(&mut data);
    RandomBytes {
        source: SourceLabel::Fallback,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn returns_exactly_n_bytes() {
        for n in [0, 1, 100, 65_536] {
            let bytes = fallback_bytes(n);
            assert_eq!(bytes.len(), n);
            assert_eq!(bytes.source, SourceLabel::Fallback);
        }
    }

    #[test]
    fn seeded_generator_is_deterministic() {
        let a = fallback_bytes_with(256, &mut StdRng::seed_from_u64(7));
        let b = fallback_bytes_with(256, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn different_seeds_differ() {
        let a = fallback_bytes_with(256, &mut StdRng::seed_from_u64(7));
        let b = fallback_bytes_with(256, &mut StdRng::seed_from_u64(8));
        assert_ne!(a.data, b.data);
    }

    #[test]
    fn output_is_not_constant() {
        let bytes = fallback_bytes_with(4_096, &mut StdRng::seed_from_u64(1));
        let first = bytes.data[0];
        assert!(bytes.data.iter().any(|&b| b != first));
    }
}

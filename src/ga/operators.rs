//! Bit-string genetic operators.
//!
//! # Crossover
//!
//! - [`recombine`]: single-point crossover gated by the crossover
//!   probability, cloning the parents otherwise
//! - [`crossover_at`]: the deterministic splice used by [`recombine`]
//!
//! # Mutation
//!
//! - [`Mutation`]: single-locus bit flip, gated once per breeding pair
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

use super::types::Genome;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// What happened to a breeding pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The parents were spliced at `point`.
    Crossover {
        /// Cut position in `[0, n]`.
        point: usize,
    },
    /// The parents were copied unchanged.
    Clone,
}

/// Two offspring and how they were produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Recombination {
    /// First child (prefix of parent A).
    pub first: Genome,
    /// Second child (prefix of parent B).
    pub second: Genome,
    /// Crossover or clone.
    pub outcome: Outcome,
}

/// Splices two parents at `point`.
///
/// Returns `(a[..point] ++ b[point..], b[..point] ++ a[point..])`. A point of
/// 0 or `n` yields copies of the parents (swapped for 0).
///
/// # Panics
/// Panics if parents have different lengths or `point > n`.
pub fn crossover_at(a: &Genome, b: &Genome, point: usize) -> (Genome, Genome) {
    let n = a.len();
    assert_eq!(n, b.len(), "parents must have equal length");
    assert!(point <= n, "crossover point {point} out of range 0..={n}");

    let (a, b) = (a.bits(), b.bits());
    let mut first = Vec::with_capacity(n);
    first.extend_from_slice(&a[..point]);
    first.extend_from_slice(&b[point..]);

    let mut second = Vec::with_capacity(n);
    second.extend_from_slice(&b[..point]);
    second.extend_from_slice(&a[point..]);

    (Genome::new(first), Genome::new(second))
}

/// Single-point crossover with probability `crossover_probability`.
///
/// Draws `u` in `[0, 1)`; when `u <= crossover_probability` a cut point is
/// drawn uniformly from `[0, n]` inclusive and the parents are spliced.
/// Otherwise both parents are cloned.
pub fn recombine<R: Rng>(
    a: &Genome,
    b: &Genome,
    crossover_probability: f64,
    rng: &mut R,
) -> Recombination {
    let u: f64 = rng.random_range(0.0..1.0);
    if u <= crossover_probability {
        let point = rng.random_range(0..=a.len());
        let (first, second) = crossover_at(a, b, point);
        Recombination {
            first,
            second,
            outcome: Outcome::Crossover { point },
        }
    } else {
        Recombination {
            first: a.clone(),
            second: b.clone(),
            outcome: Outcome::Clone,
        }
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Mutation strategy.
///
/// Both variants draw one gate per breeding pair, not per genome or per
/// bit: at most one bit flips per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// Flip one bit of one of the two offspring just produced (50/50).
    #[default]
    PairFlip,

    /// Flip one bit of a genome drawn uniformly from every offspring bred
    /// so far in this generation. The runner leaves the elite slot out of
    /// the buffer it passes.
    BufferFlip,
}

/// A flip that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    /// Index into the breeding buffer of the mutated genome.
    pub target: usize,
    /// Bit position that was flipped.
    pub locus: usize,
}

impl Mutation {
    /// Runs the mutation gate for the pair just appended to `buffer`.
    ///
    /// The pair occupies the last two slots of `buffer`. When the gate
    /// fires, the chosen genome is replaced by a copy with one bit flipped
    /// and the flip is returned.
    ///
    /// # Panics
    /// Panics if `buffer` holds fewer than two genomes.
    pub fn apply<R: Rng>(
        &self,
        buffer: &mut [Genome],
        mutation_probability: f64,
        rng: &mut R,
    ) -> Option<Flip> {
        let len = buffer.len();
        assert!(len >= 2, "mutation needs a freshly bred pair");

        let u: f64 = rng.random_range(0.0..1.0);
        if u > mutation_probability {
            return None;
        }

        let target = match self {
            Mutation::PairFlip => {
                if rng.random_bool(0.5) {
                    len - 1
                } else {
                    len - 2
                }
            }
            Mutation::BufferFlip => rng.random_range(0..len),
        };

        let n = buffer[target].len();
        if n == 0 {
            return None;
        }
        let locus = rng.random_range(0..n);
        buffer[target] = buffer[target].with_flipped(locus);
        Some(Flip { target, locus })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn g(s: &str) -> Genome {
        s.parse().unwrap()
    }

    // ---- Crossover ----

    #[test]
    fn test_crossover_at_middle() {
        let (c1, c2) = crossover_at(&g("111111"), &g("000000"), 2);
        assert_eq!(c1.to_string(), "110000");
        assert_eq!(c2.to_string(), "001111");
    }

    #[test]
    fn test_crossover_at_ends() {
        let a = g("1100");
        let b = g("0011");

        let (c1, c2) = crossover_at(&a, &b, 4);
        assert_eq!((c1, c2), (a.clone(), b.clone()));

        let (c1, c2) = crossover_at(&a, &b, 0);
        assert_eq!((c1, c2), (b, a));
    }

    #[test]
    fn test_crossover_reverses() {
        let a = g("101100111");
        let b = g("010011010");
        for point in 0..=a.len() {
            let (c1, c2) = crossover_at(&a, &b, point);
            let (r1, r2) = crossover_at(&c1, &c2, point);
            assert_eq!(r1, a, "point {point}");
            assert_eq!(r2, b, "point {point}");
        }
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_crossover_length_mismatch_panics() {
        crossover_at(&g("10"), &g("101"), 1);
    }

    #[test]
    fn test_recombine_always_crosses_at_one() {
        let mut rng = create_rng(42);
        let a = g("11111111");
        let b = g("00000000");
        for _ in 0..200 {
            let r = recombine(&a, &b, 1.0, &mut rng);
            match r.outcome {
                Outcome::Crossover { point } => {
                    assert!(point <= a.len());
                    assert_eq!((r.first.clone(), r.second.clone()), crossover_at(&a, &b, point));
                }
                Outcome::Clone => panic!("probability 1.0 must always cross"),
            }
            assert_eq!(r.first.len(), 8);
            assert_eq!(r.second.len(), 8);
        }
    }

    #[test]
    fn test_recombine_never_crosses_at_zero() {
        let mut rng = create_rng(42);
        let a = g("1010");
        let b = g("0101");
        for _ in 0..200 {
            let r = recombine(&a, &b, 0.0, &mut rng);
            // u == 0.0 is possible but vanishingly rare with a 64-bit draw.
            if r.outcome == Outcome::Clone {
                assert_eq!(r.first, a);
                assert_eq!(r.second, b);
            }
        }
    }

    #[test]
    fn test_recombine_points_cover_both_ends() {
        let mut rng = create_rng(7);
        let a = g("111");
        let b = g("000");
        let mut seen = [false; 4];
        for _ in 0..500 {
            if let Outcome::Crossover { point } = recombine(&a, &b, 1.0, &mut rng).outcome {
                seen[point] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "points seen: {seen:?}");
    }

    // ---- Mutation ----

    #[test]
    fn test_pair_flip_targets_last_two() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let mut buffer = vec![g("0000"), g("0000"), g("0000"), g("0000")];
            let flip = Mutation::PairFlip
                .apply(&mut buffer, 1.0, &mut rng)
                .expect("probability 1.0 always mutates");
            assert!(flip.target >= 2, "target {} outside pair", flip.target);
            assert_eq!(buffer[flip.target].count_ones(), 1);
            assert_eq!(buffer[flip.target].get(flip.locus), Some(true));
            let total: usize = buffer.iter().map(Genome::count_ones).sum();
            assert_eq!(total, 1, "exactly one bit flips per event");
        }
    }

    #[test]
    fn test_pair_flip_picks_both_children() {
        let mut rng = create_rng(3);
        let mut hits = [0u32; 2];
        for _ in 0..1000 {
            let mut buffer = vec![g("00"), g("00")];
            let flip = Mutation::PairFlip.apply(&mut buffer, 1.0, &mut rng).unwrap();
            hits[flip.target] += 1;
        }
        assert!(hits[0] > 400 && hits[1] > 400, "hits: {hits:?}");
    }

    #[test]
    fn test_buffer_flip_reaches_whole_buffer() {
        let mut rng = create_rng(42);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let mut buffer = vec![Genome::zeros(3); 5];
            let flip = Mutation::BufferFlip.apply(&mut buffer, 1.0, &mut rng).unwrap();
            seen[flip.target] = true;
        }
        assert!(seen.iter().all(|&s| s), "targets seen: {seen:?}");
    }

    #[test]
    fn test_mutation_gate_closed() {
        let mut rng = create_rng(42);
        let original = vec![g("0110"), g("1001")];
        for _ in 0..200 {
            let mut buffer = original.clone();
            // A zero probability only fires on an exact 0.0 draw.
            if Mutation::PairFlip.apply(&mut buffer, 0.0, &mut rng).is_none() {
                assert_eq!(buffer, original);
            }
        }
    }

    #[test]
    fn test_mutation_rate_is_per_pair() {
        let mut rng = create_rng(11);
        let trials = 10_000;
        let mut events = 0;
        for _ in 0..trials {
            let mut buffer = vec![Genome::zeros(20), Genome::zeros(20)];
            if Mutation::PairFlip.apply(&mut buffer, 0.3, &mut rng).is_some() {
                events += 1;
                let flipped: usize = buffer.iter().map(Genome::count_ones).sum();
                assert_eq!(flipped, 1);
            }
        }
        let rate = events as f64 / trials as f64;
        assert!((rate - 0.3).abs() < 0.02, "event rate {rate}");
    }

    #[test]
    fn test_zero_length_genomes_never_mutate() {
        let mut rng = create_rng(42);
        let mut buffer = vec![Genome::zeros(0), Genome::zeros(0)];
        assert_eq!(Mutation::PairFlip.apply(&mut buffer, 1.0, &mut rng), None);
    }
}

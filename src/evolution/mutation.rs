//! Stepwise mutation of multi-locus genotypes.
//!
//! Mutation acts on the derived-allele count at each locus and models the
//! symmetric gain or loss of a single allele copy per event: a homozygote
//! becomes a heterozygote, and a heterozygote resolves to either homozygote
//! by fair coin. Each entry of the genotype table mutates independently with
//! the model's per-locus, per-individual, per-step rate.

use crate::base::{Genotype, GenotypeMatrix};
pub use crate::errors::MutationError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Single-copy stepwise mutation model.
///
/// The rate is the probability that any one genotype entry mutates in one
/// step. With rate 0 the operator leaves the table unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepwiseMutation {
    rate: f64,
}

impl StepwiseMutation {
    /// Create a new mutation model.
    ///
    /// # Errors
    /// Returns an error if `rate` is outside [0.0, 1.0].
    pub fn new(rate: f64) -> Result<Self, MutationError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(MutationError::InvalidMutationRate(rate));
        }
        Ok(Self { rate })
    }

    /// Per-entry mutation probability.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Mutate a genotype table in place.
    ///
    /// Entries are visited in row-major order (individual, then locus), with
    /// one uniform draw per entry deciding whether it mutates and, for
    /// heterozygotes, one further draw resolving which homozygote results.
    ///
    /// # Returns
    /// The number of mutations that occurred.
    pub fn mutate_matrix<R: Rng + ?Sized>(
        &self,
        genotypes: &mut GenotypeMatrix,
        rng: &mut R,
    ) -> usize {
        let mut mutation_count = 0;

        for entry in genotypes.as_mut_slice() {
            if rng.random::<f64>() < self.rate {
                *entry = match *entry {
                    Genotype::HomAncestral | Genotype::HomDerived => Genotype::Heterozygous,
                    Genotype::Heterozygous => {
                        if rng.random_bool(0.5) {
                            Genotype::HomAncestral
                        } else {
                            Genotype::HomDerived
                        }
                    }
                };
                mutation_count += 1;
            }
        }

        mutation_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_mutation_model_new() {
        assert!(StepwiseMutation::new(0.0).is_ok());
        assert!(StepwiseMutation::new(1.0).is_ok());
        assert_eq!(StepwiseMutation::new(0.01).unwrap().rate(), 0.01);
    }

    #[test]
    fn test_mutation_model_invalid_rate() {
        assert!(StepwiseMutation::new(-0.1).is_err());
        assert!(StepwiseMutation::new(1.5).is_err());
    }

    #[test]
    fn test_zero_rate_leaves_table_unchanged() {
        let model = StepwiseMutation::new(0.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let mut gt = GenotypeMatrix::from_counts(3, &[vec![0, 1, 2], vec![2, 0, 1]]).unwrap();
        let original = gt.clone();

        let count = model.mutate_matrix(&mut gt, &mut rng);

        assert_eq!(count, 0);
        assert_eq!(gt, original);
    }

    #[test]
    fn test_rate_one_mutates_every_entry() {
        let model = StepwiseMutation::new(1.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let mut gt = GenotypeMatrix::filled(4, 5, Genotype::HomAncestral);
        let count = model.mutate_matrix(&mut gt, &mut rng);

        assert_eq!(count, 20);
        // Every ancestral homozygote steps to a heterozygote.
        assert!(gt.iter_rows().all(|row| row.iter().all(|g| g.is_heterozygous())));
    }

    #[test]
    fn test_homozygotes_step_to_heterozygote() {
        let model = StepwiseMutation::new(1.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);

        let mut gt = GenotypeMatrix::from_counts(2, &[vec![0, 2]]).unwrap();
        model.mutate_matrix(&mut gt, &mut rng);

        assert_eq!(gt.get(0, 0), Some(Genotype::Heterozygous));
        assert_eq!(gt.get(0, 1), Some(Genotype::Heterozygous));
    }

    #[test]
    fn test_heterozygote_resolves_to_both_homozygotes() {
        let model = StepwiseMutation::new(1.0).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);

        let mut saw_ancestral = false;
        let mut saw_derived = false;
        for _ in 0..100 {
            let mut gt = GenotypeMatrix::filled(1, 1, Genotype::Heterozygous);
            model.mutate_matrix(&mut gt, &mut rng);
            match gt.get(0, 0).unwrap() {
                Genotype::HomAncestral => saw_ancestral = true,
                Genotype::HomDerived => saw_derived = true,
                Genotype::Heterozygous => panic!("heterozygote must resolve at rate 1.0"),
            }
        }
        assert!(saw_ancestral && saw_derived);
    }

    #[test]
    fn test_mutation_count_tracks_rate() {
        let model = StepwiseMutation::new(0.1).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(123);

        let mut gt = GenotypeMatrix::filled(100, 10, Genotype::HomAncestral);
        let count = model.mutate_matrix(&mut gt, &mut rng);

        // 1000 entries at rate 0.1: expect ~100 mutations.
        assert!(count > 50 && count < 150, "count: {count}");
    }

    #[test]
    fn test_mutation_deterministic_under_seed() {
        let model = StepwiseMutation::new(0.2).unwrap();

        let mut gt1 = GenotypeMatrix::filled(10, 10, Genotype::Heterozygous);
        let mut gt2 = GenotypeMatrix::filled(10, 10, Genotype::Heterozygous);

        let mut rng1 = Xoshiro256PlusPlus::seed_from_u64(99);
        let mut rng2 = Xoshiro256PlusPlus::seed_from_u64(99);

        let count1 = model.mutate_matrix(&mut gt1, &mut rng1);
        let count2 = model.mutate_matrix(&mut gt2, &mut rng2);

        assert_eq!(count1, count2);
        assert_eq!(gt1, gt2);
    }
}

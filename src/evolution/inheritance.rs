//! Mendelian allele transmission from parents to recruits.
//!
//! Each parent contributes one allele per locus: an ancestral homozygote
//! always transmits the ancestral allele, a derived homozygote always
//! transmits the derived allele, and a heterozygote transmits either with
//! equal probability. The recruit's genotype at a locus is the sum of the
//! two transmitted alleles, so values stay in {0, 1, 2} by construction.

use crate::base::{Genotype, GenotypeMatrix};
use rand::Rng;

/// Number of derived-allele copies one gamete carries (0 or 1).
#[inline]
fn gamete<R: Rng + ?Sized>(g: Genotype, rng: &mut R) -> u8 {
    match g {
        Genotype::HomAncestral => 0,
        Genotype::HomDerived => 1,
        Genotype::Heterozygous => {
            if rng.random_bool(0.5) {
                1
            } else {
                0
            }
        }
    }
}

/// Build the recruit genotype table from assigned parents.
///
/// `mothers` and `fathers` hold one parent row index per recruit, aligned
/// with each other. Loci are drawn independently, in locus order, with the
/// maternal allele drawn before the paternal one; recruits are processed in
/// slot order. Self-fertilization (mother == father) simply draws two
/// independent gametes from the same row.
pub fn recruit_genotypes<R: Rng + ?Sized>(
    genotypes: &GenotypeMatrix,
    mothers: &[usize],
    fathers: &[usize],
    rng: &mut R,
) -> GenotypeMatrix {
    debug_assert_eq!(mothers.len(), fathers.len());

    let loci = genotypes.loci();
    let mut recruits = GenotypeMatrix::empty(loci);
    let mut row = Vec::with_capacity(loci);

    for (&mother, &father) in mothers.iter().zip(fathers.iter()) {
        row.clear();
        for locus in 0..loci {
            let maternal = gamete(genotypes.row(mother)[locus], rng);
            let paternal = gamete(genotypes.row(father)[locus], rng);
            let g = match maternal + paternal {
                0 => Genotype::HomAncestral,
                1 => Genotype::Heterozygous,
                _ => Genotype::HomDerived,
            };
            row.push(g);
        }
        recruits.push_row(&row);
    }

    recruits
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_homozygous_parents_are_deterministic() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        // Parent 0: all ancestral. Parent 1: all derived.
        let gt = GenotypeMatrix::from_counts(3, &[vec![0, 0, 0], vec![2, 2, 2]]).unwrap();

        let recruits = recruit_genotypes(&gt, &[0], &[1], &mut rng);
        assert_eq!(recruits.rows(), 1);
        // 0 from the mother, 1 from the father, at every locus.
        assert!(recruits.row(0).iter().all(|g| g.is_heterozygous()));
    }

    #[test]
    fn test_ancestral_cross_stays_ancestral() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let gt = GenotypeMatrix::from_counts(2, &[vec![0, 0], vec![0, 0]]).unwrap();

        let recruits = recruit_genotypes(&gt, &[0, 1], &[1, 0], &mut rng);
        for r in 0..2 {
            assert!(recruits
                .row(r)
                .iter()
                .all(|&g| g == Genotype::HomAncestral));
        }
    }

    #[test]
    fn test_heterozygous_parent_segregates() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        // Mother heterozygous, father ancestral: recruit is 0 or 1 per locus.
        let gt = GenotypeMatrix::from_counts(1, &[vec![1], vec![0]]).unwrap();

        let mut saw_zero = false;
        let mut saw_one = false;
        for _ in 0..200 {
            let recruits = recruit_genotypes(&gt, &[0], &[1], &mut rng);
            match recruits.get(0, 0).unwrap() {
                Genotype::HomAncestral => saw_zero = true,
                Genotype::Heterozygous => saw_one = true,
                Genotype::HomDerived => panic!("father cannot transmit a derived allele"),
            }
        }
        assert!(saw_zero && saw_one);
    }

    #[test]
    fn test_selfing_draws_two_independent_gametes() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        // A single heterozygous selfing parent can produce all three
        // genotypes.
        let gt = GenotypeMatrix::from_counts(1, &[vec![1]]).unwrap();

        let mut seen = [false; 3];
        for _ in 0..300 {
            let recruits = recruit_genotypes(&gt, &[0], &[0], &mut rng);
            seen[recruits.get(0, 0).unwrap().to_count() as usize] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_selfing_homozygote_breeds_true() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(13);
        let gt = GenotypeMatrix::from_counts(2, &[vec![2, 0]]).unwrap();

        for _ in 0..50 {
            let recruits = recruit_genotypes(&gt, &[0], &[0], &mut rng);
            assert_eq!(recruits.get(0, 0), Some(Genotype::HomDerived));
            assert_eq!(recruits.get(0, 1), Some(Genotype::HomAncestral));
        }
    }

    #[test]
    fn test_no_recruits_yields_empty_table() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let gt = GenotypeMatrix::from_counts(2, &[vec![1, 1]]).unwrap();

        let recruits = recruit_genotypes(&gt, &[], &[], &mut rng);
        assert!(recruits.is_empty());
        assert_eq!(recruits.loci(), 2);
    }
}

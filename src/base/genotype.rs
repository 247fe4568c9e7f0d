use core::fmt;

use crate::errors::ShapeError;
use serde::{Deserialize, Serialize};

/// A diploid genotype at a single biallelic locus.
///
/// `Genotype` is a compact, Copyable representation of the derived-allele
/// count, backed by a single byte. The mapping of variants to counts is
/// stable and used throughout the crate (0 = ancestral homozygote,
/// 1 = heterozygote, 2 = derived homozygote).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Genotype {
    /// No copies of the derived allele.
    HomAncestral = 0,
    /// One copy of the derived allele.
    Heterozygous = 1,
    /// Two copies of the derived allele.
    HomDerived = 2,
}

impl Genotype {
    /// Convert from a derived-allele count (0-2).
    #[inline(always)]
    pub const fn from_count(count: u8) -> Option<Self> {
        match count {
            0 => Some(Self::HomAncestral),
            1 => Some(Self::Heterozygous),
            2 => Some(Self::HomDerived),
            _ => None,
        }
    }

    /// Convert to the derived-allele count (0-2).
    #[inline(always)]
    pub const fn to_count(self) -> u8 {
        self as u8
    }

    /// Return true if the genotype carries one copy of each allele.
    #[inline(always)]
    pub const fn is_heterozygous(self) -> bool {
        matches!(self, Self::Heterozygous)
    }

    /// Return true if both allele copies are identical.
    #[inline(always)]
    pub const fn is_homozygous(self) -> bool {
        !self.is_heterozygous()
    }
}

impl From<Genotype> for u8 {
    #[inline(always)]
    fn from(g: Genotype) -> u8 {
        g.to_count()
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_count())
    }
}

/// A row-major genotype table: one row per individual, one column per locus.
///
/// Row order carries no meaning of its own, but rows must stay index-aligned
/// with the demographic table for the duration of a step; the
/// [`Population`](crate::simulation::Population) aggregate enforces that
/// alignment. Zero-row matrices are legal and represent extinct populations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenotypeMatrix {
    rows: usize,
    loci: usize,
    data: Vec<Genotype>,
}

impl GenotypeMatrix {
    /// Create an empty matrix (zero rows) for the given locus count.
    pub fn empty(loci: usize) -> Self {
        Self {
            rows: 0,
            loci,
            data: Vec::new(),
        }
    }

    /// Create a matrix with every entry set to `fill`.
    pub fn filled(rows: usize, loci: usize, fill: Genotype) -> Self {
        Self {
            rows,
            loci,
            data: vec![fill; rows * loci],
        }
    }

    /// Build a matrix from raw derived-allele counts, validating every entry.
    ///
    /// Every row must have `loci` entries and every entry must be 0, 1 or 2.
    pub fn from_counts(loci: usize, rows: &[Vec<u8>]) -> Result<Self, ShapeError> {
        let mut data = Vec::with_capacity(rows.len() * loci);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != loci {
                return Err(ShapeError::LocusCountMismatch {
                    expected: loci,
                    found: row.len(),
                });
            }
            for (l, &count) in row.iter().enumerate() {
                match Genotype::from_count(count) {
                    Some(g) => data.push(g),
                    None => {
                        return Err(ShapeError::InvalidAlleleCount {
                            row: r,
                            locus: l,
                            value: count,
                        })
                    }
                }
            }
        }
        Ok(Self {
            rows: rows.len(),
            loci,
            data,
        })
    }

    /// Number of rows (individuals).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of loci per row.
    #[inline]
    pub fn loci(&self) -> usize {
        self.loci
    }

    /// True if the matrix has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Get a single entry, or `None` if out of range.
    #[inline]
    pub fn get(&self, row: usize, locus: usize) -> Option<Genotype> {
        if row < self.rows && locus < self.loci {
            Some(self.data[row * self.loci + locus])
        } else {
            None
        }
    }

    /// Set a single entry. Panics if out of range.
    #[inline]
    pub fn set(&mut self, row: usize, locus: usize, g: Genotype) {
        assert!(row < self.rows && locus < self.loci);
        self.data[row * self.loci + locus] = g;
    }

    /// One individual's genotype as a slice over all loci.
    #[inline]
    pub fn row(&self, row: usize) -> &[Genotype] {
        &self.data[row * self.loci..(row + 1) * self.loci]
    }

    /// Mutable access to one individual's genotype row.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [Genotype] {
        &mut self.data[row * self.loci..(row + 1) * self.loci]
    }

    /// Iterate over all rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Genotype]> + '_ {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// Append one row. Panics if the row length does not match the locus
    /// count — callers construct rows from this matrix's own locus count.
    pub fn push_row(&mut self, row: &[Genotype]) {
        assert_eq!(row.len(), self.loci);
        self.data.extend_from_slice(row);
        self.rows += 1;
    }

    /// Flat mutable view of every entry, row-major.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Genotype] {
        &mut self.data
    }
}

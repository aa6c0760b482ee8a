use crate::scoring::TiePreference;
use crate::sequence::INDEX_MASK;

pub mod io;

/// Width of the folded substitution and match matrices. Index 0 is unused by
/// letters (they fold to 1..26); keeping it makes `byte & 0x1F` a direct
/// index.
pub const MATRIX_DIM: usize = 27;

/// Folds a raw base to its matrix index.
#[inline]
pub fn base_index(base: u8) -> usize {
    (base & INDEX_MASK) as usize
}

/// Which aligner [`crate::aligner::align`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignmentAlgorithm {
    #[default]
    Needleman,
    Waterman,
    MemWaterman,
    Hirschberg,
}

/// Scoring and behaviour settings shared by all aligners.
///
/// The gap penalties are non-positive and `gap_extend >= gap_open`
/// (extending a gap is never more expensive than opening one). When
/// `affine` is false the extension penalty is ignored and every gap cell
/// pays `gap_open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentConfiguration {
    pub gap_open: i32,
    pub gap_extend: i32,
    pub affine: bool,
    pub tie_preference: TiePreference,

    pub algorithm: AlignmentAlgorithm,
    /// Store full-matrix directions packed four to a byte.
    pub two_bit: bool,
    /// Record per-anchor local alignments (mem-waterman only).
    pub scan: bool,

    substitution_scores: Vec<i32>,
    match_flags: Vec<bool>,
}

impl AlignmentConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitution score for a pair of folded bases.
    #[inline]
    pub fn substitution_score(&self, qry_index: usize, ref_index: usize) -> i32 {
        self.substitution_scores[qry_index * MATRIX_DIM + ref_index]
    }

    /// Whether a pair of folded bases counts as a match rather than an snp.
    #[inline]
    pub fn is_match(&self, qry_index: usize, ref_index: usize) -> bool {
        self.match_flags[qry_index * MATRIX_DIM + ref_index]
    }

    /// Sets the score for a query/reference base pair. Takes raw (unfolded)
    /// bases in either case.
    pub fn set_score(&mut self, qry_base: u8, ref_base: u8, score: i32) {
        self.substitution_scores[base_index(qry_base) * MATRIX_DIM + base_index(ref_base)] = score;
    }

    /// Marks a query/reference base pair as a match (`true`) or snp.
    pub fn set_match(&mut self, qry_base: u8, ref_base: u8, is_match: bool) {
        self.match_flags[base_index(qry_base) * MATRIX_DIM + base_index(ref_base)] = is_match;
    }

    /// Sets the score for a pair and its transpose.
    fn seed_score(&mut self, a: u8, b: u8, score: i32) {
        self.set_score(a, b, score);
        self.set_score(b, a, score);
    }

    /// Marks a pair and its transpose as matches.
    fn seed_match(&mut self, a: u8, b: u8) {
        self.set_match(a, b, true);
        self.set_match(b, a, true);
    }

    pub(crate) fn clear_scores(&mut self) {
        self.substitution_scores.fill(0);
    }

    pub(crate) fn clear_matches(&mut self) {
        self.match_flags.fill(false);
    }
}

impl Default for AlignmentConfiguration {
    fn default() -> Self {
        let mut configuration = Self {
            gap_open: -10,
            gap_extend: -1,
            affine: true,
            tie_preference: TiePreference::default(),
            algorithm: AlignmentAlgorithm::default(),
            two_bit: false,
            scan: false,
            substitution_scores: vec![0; MATRIX_DIM * MATRIX_DIM],
            match_flags: vec![false; MATRIX_DIM * MATRIX_DIM],
        };

        for (row, base) in IUPAC_BASES.iter().enumerate() {
            for (column, other) in IUPAC_BASES.iter().enumerate() {
                configuration.set_score(*base, *other, IUPAC_SCORES[row][column]);
            }
        }

        // U pairs exactly like T (RNA against DNA), X like N.
        for base in IUPAC_BASES {
            configuration.seed_score(b'u', base, score_of(b't', base));
            configuration.seed_score(b'x', base, score_of(b'n', base));
        }
        configuration.seed_score(b'u', b'u', score_of(b't', b't'));
        configuration.seed_score(b'u', b'x', score_of(b't', b'n'));
        configuration.seed_score(b'x', b'x', score_of(b'n', b'n'));

        // Identical folded bases are matches.
        for index in 0..MATRIX_DIM as u8 {
            configuration.match_flags[index as usize * MATRIX_DIM + index as usize] = true;
        }
        configuration.seed_match(b'u', b't');

        // A definite base matches every degenerate code that includes it.
        for (degenerate, members) in DEGENERATE_SETS {
            for member in *members {
                configuration.seed_match(*degenerate, *member);
                if *member == b't' {
                    configuration.seed_match(*degenerate, b'u');
                }
            }
        }

        configuration
    }
}

/// The fifteen IUPAC codes seeded by default, in matrix-table order.
const IUPAC_BASES: [u8; 15] = [
    b'a', b't', b'g', b'c', b's', b'w', b'r', b'y', b'k', b'm', b'b', b'v', b'h', b'd', b'n',
];

/// NUC4.4-style pair scores for [`IUPAC_BASES`] x [`IUPAC_BASES`].
#[rustfmt::skip]
const IUPAC_SCORES: [[i32; 15]; 15] = [
    /*        A   T   G   C   S   W   R   Y   K   M   B   V   H   D   N */
    /* A */ [ 5, -4, -4, -4, -4,  1,  1, -4, -4,  1, -4, -1, -1, -1, -2],
    /* T */ [-4,  5, -4, -4, -4,  1, -4,  1,  1, -4, -1, -4, -1, -1, -2],
    /* G */ [-4, -4,  5, -4,  1, -4,  1, -4,  1, -4, -1, -1, -4, -1, -2],
    /* C */ [-4, -4, -4,  5,  1, -4, -4,  1, -4,  1, -1, -1, -1, -4, -2],
    /* S */ [-4, -4,  1,  1, -1, -4, -2, -2, -2, -2, -1, -1, -3, -3, -1],
    /* W */ [ 1,  1, -4, -4, -4, -1, -2, -2, -2, -2, -3, -3, -1, -1, -1],
    /* R */ [ 1, -4,  1, -4, -2, -2, -1, -4, -2, -2, -3, -1, -3, -1, -1],
    /* Y */ [-4,  1, -4,  1, -2, -2, -4, -1, -2, -2, -1, -3, -1, -3, -1],
    /* K */ [-4,  1,  1, -4, -2, -2, -2, -2, -1, -4, -1, -3, -3, -1, -1],
    /* M */ [ 1, -4, -4,  1, -2, -2, -2, -2, -4, -1, -3, -1, -1, -3, -1],
    /* B */ [-4, -1, -1, -1, -1, -3, -3, -1, -1, -3, -1, -2, -2, -2, -1],
    /* V */ [-1, -4, -1, -1, -1, -3, -1, -3, -3, -1, -2, -1, -2, -2, -1],
    /* H */ [-1, -1, -4, -1, -3, -1, -3, -1, -3, -1, -2, -2, -1, -2, -1],
    /* D */ [-1, -1, -1, -4, -3, -1, -1, -3, -1, -3, -2, -2, -2, -1, -1],
    /* N */ [-2, -2, -2, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1],
];

/// Which definite bases each degenerate code stands for.
const DEGENERATE_SETS: &[(u8, &[u8])] = &[
    (b'w', &[b'a', b't']),
    (b's', &[b'c', b'g']),
    (b'm', &[b'a', b'c']),
    (b'k', &[b'g', b't']),
    (b'r', &[b'a', b'g']),
    (b'y', &[b'c', b't']),
    (b'b', &[b'c', b'g', b't']),
    (b'd', &[b'a', b'g', b't']),
    (b'h', &[b'a', b'c', b't']),
    (b'v', &[b'a', b'c', b'g']),
    (b'n', &[b'a', b'c', b'g', b't']),
    (b'x', &[b'a', b'c', b'g', b't']),
];

/// Looks a pair up in the seed table.
fn score_of(a: u8, b: u8) -> i32 {
    let row = IUPAC_BASES.iter().position(|base| *base == a).unwrap();
    let column = IUPAC_BASES.iter().position(|base| *base == b).unwrap();
    IUPAC_SCORES[row][column]
}

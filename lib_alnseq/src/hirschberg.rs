use log::debug;

use crate::alignment::Alignment;
use crate::alignment_configuration::AlignmentConfiguration;
use crate::alignment_matrix::{Direction, try_vec};
use crate::error::Result;
use crate::scoring::GapKernel;
use crate::sequence::Sequence;

/// Per-position outcome of the recursion, over the aligned region only.
/// Whether an aligned pair is a match or an snp is decided later, when the
/// marks are converted to an [`Alignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RegionMark {
    Gap,
    Aligned,
}

/// Global alignment in linear memory (Hirschberg).
///
/// Splits the query in half, scores the last DP row of the left half
/// forwards and of the right half backwards, joins the rows to choose the
/// reference split, and recurses. No direction matrix exists; the label
/// rows are filled in place by the recursion.
pub fn hirschberg_align(
    configuration: &AlignmentConfiguration,
    query: &Sequence,
    reference: &Sequence,
) -> Result<Alignment> {
    query.validate_range()?;
    reference.validate_range()?;

    let ref_len = reference.aligned_len();
    let qry_len = query.aligned_len();
    debug!("Hirschberg alignment over {ref_len} reference and {qry_len} query bases");

    let mut ref_marks = try_vec(RegionMark::Gap, ref_len)?;
    let mut qry_marks = try_vec(RegionMark::Gap, qry_len)?;
    let mut forward = try_vec(0i32, ref_len)?;
    let mut reverse = try_vec(0i32, ref_len)?;
    let mut forward_dirs = try_vec(Direction::Stop, ref_len)?;
    let mut reverse_dirs = try_vec(Direction::Stop, ref_len)?;

    let mut recursion = Recursion {
        configuration,
        kernel: GapKernel::new(configuration),
        reference: reference.aligned_bases(),
        query: query.aligned_bases(),
        forward: &mut forward,
        reverse: &mut reverse,
        forward_dirs: &mut forward_dirs,
        reverse_dirs: &mut reverse_dirs,
        ref_marks: &mut ref_marks,
        qry_marks: &mut qry_marks,
    };
    recursion.align_region(0, ref_len, 0, qry_len);

    Alignment::from_region_marks(configuration, query, reference, &ref_marks, &qry_marks)
}

struct Recursion<'buffers> {
    configuration: &'buffers AlignmentConfiguration,
    kernel: GapKernel,
    reference: &'buffers [u8],
    query: &'buffers [u8],
    forward: &'buffers mut [i32],
    reverse: &'buffers mut [i32],
    forward_dirs: &'buffers mut [Direction],
    reverse_dirs: &'buffers mut [Direction],
    ref_marks: &'buffers mut [RegionMark],
    qry_marks: &'buffers mut [RegionMark],
}

impl Recursion<'_> {
    fn align_region(&mut self, ref_start: usize, ref_len: usize, qry_start: usize, qry_len: usize) {
        // Leaves: an empty side is all gaps, a one-base side is placed
        // directly.
        if ref_len == 0 {
            for mark in &mut self.qry_marks[qry_start..qry_start + qry_len] {
                *mark = RegionMark::Gap;
            }
            return;
        }

        if qry_len == 0 {
            for mark in &mut self.ref_marks[ref_start..ref_start + ref_len] {
                *mark = RegionMark::Gap;
            }
            return;
        }

        if ref_len == 1 && qry_len == 1 {
            self.ref_marks[ref_start] = RegionMark::Aligned;
            self.qry_marks[qry_start] = RegionMark::Aligned;
            return;
        }

        if ref_len == 1 {
            place_single_base(
                self.configuration,
                self.kernel,
                self.reference[ref_start],
                ref_start,
                self.query,
                qry_start,
                qry_len,
                self.ref_marks,
                self.qry_marks,
            );
            return;
        }

        if qry_len == 1 {
            place_single_base(
                self.configuration,
                self.kernel,
                self.query[qry_start],
                qry_start,
                self.reference,
                ref_start,
                ref_len,
                self.qry_marks,
                self.ref_marks,
            );
            return;
        }

        let half_qry = qry_len / 2;
        let forward_gap = self.forward_last_row(ref_start, ref_len, qry_start, half_qry);
        let reverse_gap =
            self.reverse_last_row(ref_start, ref_len, qry_start + half_qry, qry_len - half_qry);

        // Reference split: seed the candidate with the last position, then
        // walk left to right replacing on strictly greater only. The gap
        // column (the right half taking the whole reference) also wins only
        // strictly.
        self.forward[ref_start + ref_len - 1] += reverse_gap;
        let mut best = ref_start + ref_len - 1;
        for position in ref_start..ref_start + ref_len - 1 {
            self.forward[position] += self.reverse[position + 1];
            if self.forward[position] > self.forward[best] {
                best = position;
            }
        }

        let whole_reference_right = forward_gap + self.reverse[ref_start];
        let left_ref_len = if whole_reference_right > self.forward[best] {
            0
        } else {
            best + 1 - ref_start
        };

        self.align_region(ref_start, left_ref_len, qry_start, half_qry);
        self.align_region(
            ref_start + left_ref_len,
            ref_len - left_ref_len,
            qry_start + half_qry,
            qry_len - half_qry,
        );
    }

    /// Final Needleman row of aligning `reference[ref_start..+ref_len]`
    /// against the query range, plus the final gap-column score. The
    /// direction row only feeds gap open/extend decisions.
    fn forward_last_row(
        &mut self,
        ref_start: usize,
        ref_len: usize,
        qry_start: usize,
        qry_len: usize,
    ) -> i32 {
        let kernel = self.kernel;

        self.forward[ref_start] = kernel.open();
        self.forward_dirs[ref_start] = Direction::Left;
        for position in ref_start + 1..ref_start + ref_len {
            self.forward[position] = self.forward[position - 1] + kernel.extend();
            self.forward_dirs[position] = Direction::Left;
        }

        let mut gap_column = 0;
        for (row, qry_base) in self.query[qry_start..qry_start + qry_len]
            .iter()
            .enumerate()
        {
            let mut diag_score = gap_column;
            gap_column = if row == 0 {
                kernel.open()
            } else {
                gap_column + kernel.extend()
            };
            let mut deletion_carry = gap_column + kernel.extend();

            let qry_index = *qry_base as usize;
            for position in ref_start..ref_start + ref_len {
                let substitution = self
                    .configuration
                    .substitution_score(qry_index, self.reference[position] as usize);
                let above = self.forward[position];

                let step = kernel.step(
                    substitution,
                    diag_score,
                    above,
                    self.forward_dirs[position],
                    deletion_carry,
                );
                self.forward[position] = step.score;
                self.forward_dirs[position] = step.direction;
                deletion_carry = step.deletion_carry;
                diag_score = above;
            }
        }

        gap_column
    }

    /// Mirror of [`Recursion::forward_last_row`]: scores the suffixes, so
    /// `reverse[position]` holds the score of aligning
    /// `reference[position..ref_start + ref_len]` against the query range.
    fn reverse_last_row(
        &mut self,
        ref_start: usize,
        ref_len: usize,
        qry_start: usize,
        qry_len: usize,
    ) -> i32 {
        let kernel = self.kernel;

        self.reverse[ref_start + ref_len - 1] = kernel.open();
        self.reverse_dirs[ref_start + ref_len - 1] = Direction::Left;
        for position in (ref_start..ref_start + ref_len - 1).rev() {
            self.reverse[position] = self.reverse[position + 1] + kernel.extend();
            self.reverse_dirs[position] = Direction::Left;
        }

        let mut gap_column = 0;
        for (row, qry_base) in self.query[qry_start..qry_start + qry_len]
            .iter()
            .rev()
            .enumerate()
        {
            let mut diag_score = gap_column;
            gap_column = if row == 0 {
                kernel.open()
            } else {
                gap_column + kernel.extend()
            };
            let mut deletion_carry = gap_column + kernel.extend();

            let qry_index = *qry_base as usize;
            for position in (ref_start..ref_start + ref_len).rev() {
                let substitution = self
                    .configuration
                    .substitution_score(qry_index, self.reference[position] as usize);
                let above = self.reverse[position];

                let step = kernel.step(
                    substitution,
                    diag_score,
                    above,
                    self.reverse_dirs[position],
                    deletion_carry,
                );
                self.reverse[position] = step.score;
                self.reverse_dirs[position] = step.direction;
                deletion_carry = step.deletion_carry;
                diag_score = above;
            }
        }

        gap_column
    }
}

/// Aligns one base against a range of the other sequence: the leftmost
/// position whose substitution beats staying in the gap run takes the base,
/// every other position becomes a gap. When no substitution wins the base
/// sits at the start of the range.
#[allow(clippy::too_many_arguments)]
fn place_single_base(
    configuration: &AlignmentConfiguration,
    kernel: GapKernel,
    base: u8,
    base_position: usize,
    sequence: &[u8],
    seq_start: usize,
    seq_len: usize,
    base_marks: &mut [RegionMark],
    seq_marks: &mut [RegionMark],
) {
    let mut best_position = None;
    let mut best_margin = 0i32;
    let mut previous_gap = 0i32;
    let mut gap_score = kernel.open() - kernel.extend();

    for position in seq_start..seq_start + seq_len {
        let match_score = previous_gap
            + configuration.substitution_score(sequence[position] as usize, base as usize);
        gap_score += kernel.extend();

        let margin = match_score - gap_score;
        if margin > best_margin {
            best_margin = margin;
            best_position = Some(position);
        }
        previous_gap = gap_score;
    }

    let placed = best_position.unwrap_or(seq_start);
    for mark in &mut seq_marks[seq_start..seq_start + seq_len] {
        *mark = RegionMark::Gap;
    }
    seq_marks[placed] = RegionMark::Aligned;
    base_marks[base_position] = RegionMark::Aligned;
}

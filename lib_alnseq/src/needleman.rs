use log::debug;

use crate::alignment_configuration::AlignmentConfiguration;
use crate::alignment_matrix::{AlignmentMatrix, Direction, DirectionStore, try_vec};
use crate::error::Result;
use crate::scoring::GapKernel;
use crate::sequence::Sequence;

/// Global (Needleman-Wunsch) alignment of two encoded sequences.
///
/// Fills a full direction matrix with a single rolling score row. The best
/// alignment ends in the bottom-right cell; hand the returned matrix to
/// [`crate::traceback::traceback`] for the alignment itself.
pub fn needleman_align<Store: DirectionStore>(
    configuration: &AlignmentConfiguration,
    query: &Sequence,
    reference: &Sequence,
) -> Result<AlignmentMatrix<Store>> {
    query.validate_range()?;
    reference.validate_range()?;

    let ref_len = reference.aligned_len();
    let qry_len = query.aligned_len();
    let columns = ref_len + 1;
    let rows = qry_len + 1;
    debug!("Needleman matrix: {rows} x {columns} cells");

    let kernel = GapKernel::new(configuration);
    let mut directions = Store::try_new(rows, columns)?;
    let mut scores = try_vec(0i32, columns)?;

    // Gap row: an alignment opening with deletions.
    for column in 1..columns {
        directions.set(0, column, Direction::Left);
        scores[column] = if column == 1 {
            kernel.open()
        } else {
            scores[column - 1] + kernel.extend()
        };
    }

    let qry_bases = query.aligned_bases();
    let ref_bases = reference.aligned_bases();

    for row in 1..rows {
        // Gap column cell of this row, and the carries feeding column 1.
        let mut diag_score = scores[0];
        scores[0] = if row == 1 {
            kernel.open()
        } else {
            scores[0] + kernel.extend()
        };
        directions.set(row, 0, Direction::Up);
        let mut deletion_carry = scores[0] + kernel.extend();

        let qry_index = qry_bases[row - 1] as usize;
        for column in 1..columns {
            let substitution =
                configuration.substitution_score(qry_index, ref_bases[column - 1] as usize);
            let up_direction = directions.get(row - 1, column);
            let above = scores[column];

            let step = kernel.step(substitution, diag_score, above, up_direction, deletion_carry);
            scores[column] = step.score;
            directions.set(row, column, step.direction);
            deletion_carry = step.deletion_carry;
            diag_score = above;
        }
    }

    let best_score = scores[ref_len];
    Ok(AlignmentMatrix::new(
        directions,
        ref_len,
        qry_len,
        reference.offset(),
        query.offset(),
        best_score,
        rows * columns - 1,
    ))
}

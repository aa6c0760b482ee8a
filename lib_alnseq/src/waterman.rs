use log::debug;

use crate::alignment_configuration::AlignmentConfiguration;
use crate::alignment_matrix::{AlignmentMatrix, DirectionStore, cell_index, try_vec};
use crate::error::Result;
use crate::scoring::GapKernel;
use crate::sequence::Sequence;

/// Local (Smith-Waterman) alignment of two encoded sequences.
///
/// Same sweep as [`crate::needleman::needleman_align`] with the local clamp:
/// the gap row and column score zero, a non-positive cell becomes a `Stop`,
/// and the best-scoring cell anywhere in the matrix is recorded as the end
/// of the alignment. Ties keep the earlier cell in row-major order.
pub fn waterman_align<Store: DirectionStore>(
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
    debug!("Waterman matrix: {rows} x {columns} cells");

    let kernel = GapKernel::new(configuration);
    // The store starts out all Stop cells, which is the whole gap row.
    let mut directions = Store::try_new(rows, columns)?;
    let mut scores = try_vec(0i32, columns)?;

    let qry_bases = query.aligned_bases();
    let ref_bases = reference.aligned_bases();

    let mut best_score = 0;
    let mut best_end_index = 0;

    for row in 1..rows {
        let mut diag_score = scores[0];
        scores[0] = (scores[0] + kernel.extend()).max(0);
        let mut deletion_carry = (scores[0] + kernel.extend()).max(0);

        let qry_index = qry_bases[row - 1] as usize;
        for column in 1..columns {
            let substitution =
                configuration.substitution_score(qry_index, ref_bases[column - 1] as usize);
            let up_direction = directions.get(row - 1, column);
            let above = scores[column];

            let step =
                kernel.step_local(substitution, diag_score, above, up_direction, deletion_carry);
            scores[column] = step.score;
            directions.set(row, column, step.direction);
            deletion_carry = step.deletion_carry;
            diag_score = above;

            if step.score > best_score {
                best_score = step.score;
                best_end_index = cell_index(row, column, ref_len);
            }
        }
    }

    Ok(AlignmentMatrix::new(
        directions,
        ref_len,
        qry_len,
        reference.offset(),
        query.offset(),
        best_score,
        best_end_index,
    ))
}

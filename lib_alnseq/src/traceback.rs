use crate::alignment::{Alignment, PositionLabel};
use crate::alignment_configuration::AlignmentConfiguration;
use crate::alignment_matrix::{AlignmentMatrix, Direction, DirectionStore, cell_coordinates};
use crate::error::Result;
use crate::sequence::Sequence;

/// Walks a direction matrix from its recorded best end cell back to a stop
/// cell and builds the [`Alignment`].
pub fn traceback<Store: DirectionStore>(
    matrix: &AlignmentMatrix<Store>,
    configuration: &AlignmentConfiguration,
    query: &Sequence,
    reference: &Sequence,
) -> Result<Alignment> {
    traceback_from(matrix, matrix.best_end_index(), configuration, query, reference)
}

/// [`traceback`] from an arbitrary end cell.
///
/// Labels are written at true sequence positions (the matrix offsets are
/// added back), every position the walk does not reach is soft-masked, and
/// the start coordinates record the last cell of the walk that took a
/// diagonal. With no diagonal on the walk the start coordinates stay zero.
pub fn traceback_from<Store: DirectionStore>(
    matrix: &AlignmentMatrix<Store>,
    end_index: usize,
    configuration: &AlignmentConfiguration,
    query: &Sequence,
    reference: &Sequence,
) -> Result<Alignment> {
    let (mut row, mut column) = cell_coordinates(end_index, matrix.ref_len());
    let mut alignment = Alignment::try_new(reference.len(), query.len())?;

    let ref_bases = reference.bases();
    let qry_bases = query.bases();
    let ref_offset = matrix.ref_offset();
    let qry_offset = matrix.qry_offset();

    alignment.ref_end = ref_offset + column.saturating_sub(1);
    alignment.qry_end = qry_offset + row.saturating_sub(1);

    let mut last_diag = None;

    loop {
        match matrix.directions().get(row, column) {
            Direction::Diag if row > 0 && column > 0 => {
                let ref_position = ref_offset + column - 1;
                let qry_position = qry_offset + row - 1;

                let label = if configuration
                    .is_match(qry_bases[qry_position] as usize, ref_bases[ref_position] as usize)
                {
                    alignment.matches += 1;
                    PositionLabel::Match
                } else {
                    alignment.snps += 1;
                    PositionLabel::Snp
                };
                alignment.label_reference(ref_position, label);
                alignment.label_query(qry_position, label);
                last_diag = Some((ref_position, qry_position));

                row -= 1;
                column -= 1;
            }
            Direction::Up if row > 0 => {
                alignment.label_query(qry_offset + row - 1, PositionLabel::Gap);
                alignment.insertions += 1;
                row -= 1;
            }
            Direction::Left if column > 0 => {
                alignment.label_reference(ref_offset + column - 1, PositionLabel::Gap);
                alignment.deletions += 1;
                column -= 1;
            }
            // Stop, or a malformed direction pointing outside the matrix.
            _ => break,
        }
    }

    let (ref_start, qry_start) = last_diag.unwrap_or((0, 0));
    alignment.ref_start = ref_start;
    alignment.qry_start = qry_start;
    alignment.mask_unlabelled();

    Ok(alignment)
}

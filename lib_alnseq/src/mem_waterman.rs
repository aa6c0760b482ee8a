use log::debug;

use crate::alignment_configuration::AlignmentConfiguration;
use crate::alignment_matrix::{Direction, cell_coordinates, cell_index, try_vec};
use crate::error::Result;
use crate::scoring::GapKernel;
use crate::sequence::Sequence;

/// Sequence coordinates of a local alignment, offsets added back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentCoordinates {
    pub ref_start: usize,
    pub ref_end: usize,
    pub qry_start: usize,
    pub qry_end: usize,
}

/// Best local alignment as cell indices: the coordinate-only result of the
/// memory-efficient Waterman sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestLocalAlignment {
    pub score: i32,
    /// Cell of the first aligned base pair.
    pub start_index: usize,
    /// Cell of the last aligned base pair.
    pub end_index: usize,
    ref_len: usize,
    ref_offset: usize,
    qry_offset: usize,
}

impl BestLocalAlignment {
    /// Converts the cell indices to sequence coordinates. `None` when no
    /// cell scored above zero.
    pub fn coordinates(&self) -> Option<AlignmentCoordinates> {
        if self.score <= 0 {
            return None;
        }

        let (start_row, start_column) = cell_coordinates(self.start_index, self.ref_len);
        let (end_row, end_column) = cell_coordinates(self.end_index, self.ref_len);

        Some(AlignmentCoordinates {
            ref_start: self.ref_offset + start_column - 1,
            ref_end: self.ref_offset + end_column - 1,
            qry_start: self.qry_offset + start_row - 1,
            qry_end: self.qry_offset + end_row - 1,
        })
    }
}

/// Best local alignment anchored at one reference column or query row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorEntry {
    pub score: i32,
    pub start_index: usize,
    pub end_index: usize,
}

/// Scan-mode output: one [`AnchorEntry`] per reference position and per
/// query position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanTables {
    per_reference: Vec<AnchorEntry>,
    per_query: Vec<AnchorEntry>,
    ref_len: usize,
    ref_offset: usize,
    qry_offset: usize,
}

impl ScanTables {
    /// Best alignments ending in each reference column, indexed by
    /// reference position.
    pub fn per_reference(&self) -> &[AnchorEntry] {
        &self.per_reference
    }

    /// Best alignments ending in each query row, indexed by query position.
    pub fn per_query(&self) -> &[AnchorEntry] {
        &self.per_query
    }

    /// Overall best entry, reference anchors taking precedence on ties.
    pub fn best(&self) -> BestLocalAlignment {
        let mut best = BestLocalAlignment {
            score: 0,
            start_index: 0,
            end_index: 0,
            ref_len: self.ref_len,
            ref_offset: self.ref_offset,
            qry_offset: self.qry_offset,
        };

        for entry in self.per_reference.iter().chain(&self.per_query) {
            if entry.score > best.score {
                best.score = entry.score;
                best.start_index = entry.start_index;
                best.end_index = entry.end_index;
            }
        }

        best
    }

    /// Sequence coordinates for one anchor entry.
    pub fn coordinates_of(&self, entry: &AnchorEntry) -> Option<AlignmentCoordinates> {
        BestLocalAlignment {
            score: entry.score,
            start_index: entry.start_index,
            end_index: entry.end_index,
            ref_len: self.ref_len,
            ref_offset: self.ref_offset,
            qry_offset: self.qry_offset,
        }
        .coordinates()
    }
}

/// Rolling state for the memory-efficient Waterman sweep: one score row, one
/// direction row, and the start-cell row for the current and previous
/// matrix rows.
struct RollingRows {
    scores: Vec<i32>,
    directions: Vec<Direction>,
    starts: Vec<usize>,
    prev_starts: Vec<usize>,
}

impl RollingRows {
    fn try_new(columns: usize) -> Result<Self> {
        let mut rows = Self {
            scores: try_vec(0i32, columns)?,
            directions: try_vec(Direction::Stop, columns)?,
            starts: try_vec(0usize, columns)?,
            prev_starts: try_vec(0usize, columns)?,
        };

        // Gap-row stop cells. A stop cell's start is the cell where an
        // alignment through its diagonal successor begins: one row and one
        // column ahead.
        for (column, start) in rows.prev_starts.iter_mut().enumerate() {
            *start = column + columns + 1;
        }

        Ok(rows)
    }

    #[inline]
    fn stop_start(row: usize, column: usize, columns: usize) -> usize {
        row * columns + column + columns + 1
    }
}

/// Memory-efficient Smith-Waterman: best score and its start/end cells, no
/// direction matrix and no trace.
pub fn mem_waterman_align(
    configuration: &AlignmentConfiguration,
    query: &Sequence,
    reference: &Sequence,
) -> Result<BestLocalAlignment> {
    query.validate_range()?;
    reference.validate_range()?;

    let ref_len = reference.aligned_len();
    let qry_len = query.aligned_len();
    let columns = ref_len + 1;
    debug!("Memory-efficient Waterman sweep: {} x {columns} cells", qry_len + 1);

    let kernel = GapKernel::new(configuration);
    let mut rows = RollingRows::try_new(columns)?;

    let qry_bases = query.aligned_bases();
    let ref_bases = reference.aligned_bases();

    let mut best = BestLocalAlignment {
        score: 0,
        start_index: 0,
        end_index: 0,
        ref_len,
        ref_offset: reference.offset(),
        qry_offset: query.offset(),
    };

    for row in 1..=qry_len {
        let mut diag_score = rows.scores[0];
        rows.scores[0] = (rows.scores[0] + kernel.extend()).max(0);
        let mut deletion_carry = (rows.scores[0] + kernel.extend()).max(0);
        rows.starts[0] = RollingRows::stop_start(row, 0, columns);

        let qry_index = qry_bases[row - 1] as usize;
        for column in 1..columns {
            let substitution =
                configuration.substitution_score(qry_index, ref_bases[column - 1] as usize);
            let above = rows.scores[column];

            let step = kernel.step_local(
                substitution,
                diag_score,
                above,
                rows.directions[column],
                deletion_carry,
            );

            let start = match step.direction {
                Direction::Diag => rows.prev_starts[column - 1],
                Direction::Up => rows.prev_starts[column],
                Direction::Left => rows.starts[column - 1],
                Direction::Stop => RollingRows::stop_start(row, column, columns),
            };

            rows.scores[column] = step.score;
            rows.directions[column] = step.direction;
            rows.starts[column] = start;
            deletion_carry = step.deletion_carry;
            diag_score = above;

            if step.score > best.score {
                best.score = step.score;
                best.start_index = start;
                best.end_index = cell_index(row, column, ref_len);
            }
        }

        std::mem::swap(&mut rows.starts, &mut rows.prev_starts);
    }

    Ok(best)
}

/// Scan-mode memory-efficient Waterman: records the best local alignment
/// ending at every reference column and every query row.
///
/// Only cells ending in a substitution feed the tables, on strict
/// improvement. In the left half of the reference the per-reference table
/// has update priority and the per-query table only sees cells the
/// reference table declined; from the reference midpoint on the roles
/// swap.
pub fn mem_waterman_scan(
    configuration: &AlignmentConfiguration,
    query: &Sequence,
    reference: &Sequence,
) -> Result<ScanTables> {
    query.validate_range()?;
    reference.validate_range()?;

    let ref_len = reference.aligned_len();
    let qry_len = query.aligned_len();
    let columns = ref_len + 1;
    debug!("Waterman scan sweep: {} x {columns} cells", qry_len + 1);

    let kernel = GapKernel::new(configuration);
    let mut rows = RollingRows::try_new(columns)?;

    let mut tables = ScanTables {
        per_reference: try_vec(AnchorEntry::default(), ref_len)?,
        per_query: try_vec(AnchorEntry::default(), qry_len)?,
        ref_len,
        ref_offset: reference.offset(),
        qry_offset: query.offset(),
    };

    let qry_bases = query.aligned_bases();
    let ref_bases = reference.aligned_bases();
    let half = ref_len / 2;

    for row in 1..=qry_len {
        let mut diag_score = rows.scores[0];
        rows.scores[0] = (rows.scores[0] + kernel.extend()).max(0);
        let mut deletion_carry = (rows.scores[0] + kernel.extend()).max(0);
        rows.starts[0] = RollingRows::stop_start(row, 0, columns);

        let qry_index = qry_bases[row - 1] as usize;
        for column in 1..columns {
            let substitution =
                configuration.substitution_score(qry_index, ref_bases[column - 1] as usize);
            let above = rows.scores[column];

            let step = kernel.step_local(
                substitution,
                diag_score,
                above,
                rows.directions[column],
                deletion_carry,
            );

            let start = match step.direction {
                Direction::Diag => rows.prev_starts[column - 1],
                Direction::Up => rows.prev_starts[column],
                Direction::Left => rows.starts[column - 1],
                Direction::Stop => RollingRows::stop_start(row, column, columns),
            };

            rows.scores[column] = step.score;
            rows.directions[column] = step.direction;
            rows.starts[column] = start;
            deletion_carry = step.deletion_carry;
            diag_score = above;

            if step.direction == Direction::Diag {
                let entry = AnchorEntry {
                    score: step.score,
                    start_index: start,
                    end_index: cell_index(row, column, ref_len),
                };
                let ref_anchor = &mut tables.per_reference[column - 1];
                let qry_anchor = &mut tables.per_query[row - 1];

                if column < half {
                    if entry.score > ref_anchor.score {
                        *ref_anchor = entry;
                    } else if entry.score > qry_anchor.score {
                        *qry_anchor = entry;
                    }
                } else if entry.score > qry_anchor.score {
                    *qry_anchor = entry;
                } else if entry.score > ref_anchor.score {
                    *ref_anchor = entry;
                }
            }
        }

        std::mem::swap(&mut rows.starts, &mut rows.prev_starts);
    }

    Ok(tables)
}

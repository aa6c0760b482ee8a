use crate::alignment_configuration::AlignmentConfiguration;
use crate::alignment_matrix::Direction;

/// Total order imposed on the three recurrence directions when scores tie.
///
/// The name lists the directions from most to least preferred; on equal
/// scores the earlier direction wins. Deterministic output depends on these
/// six orders being honoured exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TiePreference {
    #[default]
    SnpInsDel,
    SnpDelIns,
    InsSnpDel,
    InsDelSnp,
    DelSnpIns,
    DelInsSnp,
}

impl TiePreference {
    /// All six preferences, handy for exercising tie behaviour.
    pub const ALL: [TiePreference; 6] = [
        TiePreference::SnpInsDel,
        TiePreference::SnpDelIns,
        TiePreference::InsSnpDel,
        TiePreference::InsDelSnp,
        TiePreference::DelSnpIns,
        TiePreference::DelInsSnp,
    ];

    /// Picks the maximum of the three direction scores, resolving ties by
    /// this preference order.
    #[inline]
    pub fn choose(self, snp: i32, ins: i32, del: i32) -> (i32, Direction) {
        match self {
            TiePreference::SnpInsDel => {
                ordered(snp, Direction::Diag, ins, Direction::Up, del, Direction::Left)
            }
            TiePreference::SnpDelIns => {
                ordered(snp, Direction::Diag, del, Direction::Left, ins, Direction::Up)
            }
            TiePreference::InsSnpDel => {
                ordered(ins, Direction::Up, snp, Direction::Diag, del, Direction::Left)
            }
            TiePreference::InsDelSnp => {
                ordered(ins, Direction::Up, del, Direction::Left, snp, Direction::Diag)
            }
            TiePreference::DelSnpIns => {
                ordered(del, Direction::Left, snp, Direction::Diag, ins, Direction::Up)
            }
            TiePreference::DelInsSnp => {
                ordered(del, Direction::Left, ins, Direction::Up, snp, Direction::Diag)
            }
        }
    }
}

/// The second choice must beat the first strictly, the third must beat both
/// strictly.
#[inline]
fn ordered(
    first: i32,
    first_direction: Direction,
    second: i32,
    second_direction: Direction,
    third: i32,
    third_direction: Direction,
) -> (i32, Direction) {
    let (mut score, mut direction) = if second > first {
        (second, second_direction)
    } else {
        (first, first_direction)
    };

    if third > score {
        score = third;
        direction = third_direction;
    }

    (score, direction)
}

/// The outcome of one recurrence step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub score: i32,
    pub direction: Direction,
    /// Best score for ending the next cell of this row with a deletion,
    /// with the gap cost already folded in.
    pub deletion_carry: i32,
}

/// The per-cell recurrence shared by every aligner.
///
/// Precomputes the gap penalties once: under a linear gap model the
/// extension penalty collapses onto the opening penalty, so the hot loop
/// never branches on the gap model.
#[derive(Debug, Clone, Copy)]
pub struct GapKernel {
    open: i32,
    extend: i32,
    preference: TiePreference,
}

impl GapKernel {
    pub fn new(configuration: &AlignmentConfiguration) -> Self {
        Self {
            open: configuration.gap_open,
            extend: if configuration.affine {
                configuration.gap_extend
            } else {
                configuration.gap_open
            },
            preference: configuration.tie_preference,
        }
    }

    #[inline]
    pub fn open(&self) -> i32 {
        self.open
    }

    #[inline]
    pub fn extend(&self) -> i32 {
        self.extend
    }

    /// Cost of a gap whose predecessor cell chose `direction`: opening after
    /// a substitution, extending after anything else.
    #[inline]
    pub fn gap_cost_after(&self, direction: Direction) -> i32 {
        if direction == Direction::Diag {
            self.open
        } else {
            self.extend
        }
    }

    /// One global-alignment step.
    ///
    /// `diag_score` is the pre-update value of this column from the previous
    /// row, `up_score` the rolling value still in the row buffer (the cell
    /// above), `up_direction` that cell's stored direction, and
    /// `deletion_carry` the running deletion score from the cell to the
    /// left.
    #[inline]
    pub fn step(
        &self,
        substitution: i32,
        diag_score: i32,
        up_score: i32,
        up_direction: Direction,
        deletion_carry: i32,
    ) -> Step {
        let snp = diag_score + substitution;
        let ins = up_score + self.gap_cost_after(up_direction);
        let (score, direction) = self.preference.choose(snp, ins, deletion_carry);

        Step {
            score,
            direction,
            deletion_carry: score + self.gap_cost_after(direction),
        }
    }

    /// One local-alignment step: as [`GapKernel::step`] but a non-positive
    /// maximum is clamped to zero and becomes a `Stop` cell.
    #[inline]
    pub fn step_local(
        &self,
        substitution: i32,
        diag_score: i32,
        up_score: i32,
        up_direction: Direction,
        deletion_carry: i32,
    ) -> Step {
        let step = self.step(substitution, diag_score, up_score, up_direction, deletion_carry);

        if step.score > 0 {
            step
        } else {
            Step {
                score: 0,
                direction: Direction::Stop,
                deletion_carry: self.extend,
            }
        }
    }
}

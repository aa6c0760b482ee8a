use crate::alignment_configuration::{AlignmentConfiguration, base_index};
use crate::alignment_matrix::try_vec;
use crate::error::Result;
use crate::hirschberg::RegionMark;
use crate::scoring::GapKernel;
use crate::sequence::Sequence;

/// Per-position label of an aligned sequence. The discriminants are stable:
/// print layers consume them as raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PositionLabel {
    #[default]
    EndOfAln = 0,
    Gap = 1,
    Snp = 2,
    Match = 3,
    SoftMask = 4,
}

impl PositionLabel {
    #[inline]
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Whether the position is part of an aligned pair.
    #[inline]
    pub fn is_aligned(self) -> bool {
        matches!(self, PositionLabel::Match | PositionLabel::Snp)
    }
}

/// A finished pairwise alignment: one label per reference base and one per
/// query base (over the full sequences, positions outside the alignment
/// soft-masked), plus coordinates and counts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    ref_labels: Vec<PositionLabel>,
    qry_labels: Vec<PositionLabel>,

    /// First and last aligned reference base. When nothing aligned the
    /// start and end sit at the sequence length.
    pub ref_start: usize,
    pub ref_end: usize,
    pub qry_start: usize,
    pub qry_end: usize,

    pub matches: usize,
    pub snps: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl Alignment {
    pub(crate) fn try_new(ref_len: usize, qry_len: usize) -> Result<Self> {
        Ok(Self {
            ref_labels: try_vec(PositionLabel::EndOfAln, ref_len)?,
            qry_labels: try_vec(PositionLabel::EndOfAln, qry_len)?,
            ref_start: 0,
            ref_end: 0,
            qry_start: 0,
            qry_end: 0,
            matches: 0,
            snps: 0,
            insertions: 0,
            deletions: 0,
        })
    }

    pub fn reference_labels(&self) -> &[PositionLabel] {
        &self.ref_labels
    }

    pub fn query_labels(&self) -> &[PositionLabel] {
        &self.qry_labels
    }

    /// Number of alignment columns: matches, snps, insertions and
    /// deletions.
    pub fn aligned_len(&self) -> usize {
        self.matches + self.snps + self.insertions + self.deletions
    }

    pub(crate) fn label_reference(&mut self, position: usize, label: PositionLabel) {
        self.ref_labels[position] = label;
    }

    pub(crate) fn label_query(&mut self, position: usize, label: PositionLabel) {
        self.qry_labels[position] = label;
    }

    /// Soft-masks every position the alignment walk never touched.
    pub(crate) fn mask_unlabelled(&mut self) {
        for label in self.ref_labels.iter_mut().chain(&mut self.qry_labels) {
            if *label == PositionLabel::EndOfAln {
                *label = PositionLabel::SoftMask;
            }
        }
    }

    /// Converts Hirschberg's per-region mark rows into a full alignment:
    /// query gaps first, then the reference mark, aligned pairs split into
    /// matches and snps by the match matrix.
    pub(crate) fn from_region_marks(
        configuration: &AlignmentConfiguration,
        query: &Sequence,
        reference: &Sequence,
        ref_marks: &[RegionMark],
        qry_marks: &[RegionMark],
    ) -> Result<Self> {
        let mut alignment = Self::try_new(reference.len(), query.len())?;

        let ref_bases = reference.bases();
        let qry_bases = query.bases();
        let mut first_ref = None;
        let mut last_ref = None;
        let mut first_qry = None;
        let mut last_qry = None;

        let mut ref_at = 0;
        let mut qry_at = 0;
        while ref_at < ref_marks.len() || qry_at < qry_marks.len() {
            if qry_at < qry_marks.len() && qry_marks[qry_at] == RegionMark::Gap {
                alignment.label_query(query.offset() + qry_at, PositionLabel::Gap);
                alignment.insertions += 1;
                qry_at += 1;
                continue;
            }

            if ref_at >= ref_marks.len() {
                break;
            }

            match ref_marks[ref_at] {
                RegionMark::Gap => {
                    alignment.label_reference(reference.offset() + ref_at, PositionLabel::Gap);
                    alignment.deletions += 1;
                    ref_at += 1;
                }
                RegionMark::Aligned => {
                    // An aligned reference mark always has a query partner.
                    if qry_at >= qry_marks.len() {
                        break;
                    }
                    let ref_position = reference.offset() + ref_at;
                    let qry_position = query.offset() + qry_at;
                    let label = if configuration.is_match(
                        qry_bases[qry_position] as usize,
                        ref_bases[ref_position] as usize,
                    ) {
                        alignment.matches += 1;
                        PositionLabel::Match
                    } else {
                        alignment.snps += 1;
                        PositionLabel::Snp
                    };
                    alignment.label_reference(ref_position, label);
                    alignment.label_query(qry_position, label);

                    first_ref.get_or_insert(ref_position);
                    last_ref = Some(ref_position);
                    first_qry.get_or_insert(qry_position);
                    last_qry = Some(qry_position);

                    ref_at += 1;
                    qry_at += 1;
                }
            }
        }

        alignment.ref_start = first_ref.unwrap_or(reference.len());
        alignment.ref_end = last_ref.unwrap_or(reference.len());
        alignment.qry_start = first_qry.unwrap_or(query.len());
        alignment.qry_end = last_qry.unwrap_or(query.len());
        alignment.mask_unlabelled();

        Ok(alignment)
    }

    /// Renders the aligned region as two gapped byte strings (reference
    /// line, query line), `-` standing for a gap. Soft-masked positions are
    /// left out.
    pub fn aligned_pair(&self, reference: &Sequence, query: &Sequence) -> (Vec<u8>, Vec<u8>) {
        let mut ref_line = Vec::new();
        let mut qry_line = Vec::new();

        self.walk_columns(|column| match column {
            AlignmentColumn::Insertion { qry_position } => {
                ref_line.push(b'-');
                qry_line.push(query.bases()[qry_position]);
            }
            AlignmentColumn::Deletion { ref_position } => {
                ref_line.push(reference.bases()[ref_position]);
                qry_line.push(b'-');
            }
            AlignmentColumn::Pair {
                ref_position,
                qry_position,
            } => {
                ref_line.push(reference.bases()[ref_position]);
                qry_line.push(query.bases()[qry_position]);
            }
        });

        (ref_line, qry_line)
    }

    /// Recomputes the alignment's score under a configuration: substitution
    /// scores for aligned columns, a gap opening for the first gap column
    /// after an aligned one and extensions for the rest (all openings under
    /// a linear model). Works on encoded and decoded sequences alike.
    pub fn score_with(
        &self,
        configuration: &AlignmentConfiguration,
        reference: &Sequence,
        query: &Sequence,
    ) -> i32 {
        let kernel = GapKernel::new(configuration);
        let mut score = 0;
        let mut in_gap_run = false;

        self.walk_columns(|column| match column {
            AlignmentColumn::Insertion { .. } | AlignmentColumn::Deletion { .. } => {
                score += if in_gap_run {
                    kernel.extend()
                } else {
                    kernel.open()
                };
                in_gap_run = true;
            }
            AlignmentColumn::Pair {
                ref_position,
                qry_position,
            } => {
                score += configuration.substitution_score(
                    base_index(query.bases()[qry_position]),
                    base_index(reference.bases()[ref_position]),
                );
                in_gap_run = false;
            }
        });

        score
    }

    /// Walks the alignment columns in order, insertions taking precedence,
    /// skipping soft-masked positions.
    fn walk_columns(&self, mut visit: impl FnMut(AlignmentColumn)) {
        let mut ref_at = 0;
        let mut qry_at = 0;

        loop {
            while qry_at < self.qry_labels.len() && !self.qry_labels[qry_at].is_aligned()
                && self.qry_labels[qry_at] != PositionLabel::Gap
            {
                qry_at += 1;
            }
            while ref_at < self.ref_labels.len() && !self.ref_labels[ref_at].is_aligned()
                && self.ref_labels[ref_at] != PositionLabel::Gap
            {
                ref_at += 1;
            }

            if qry_at < self.qry_labels.len() && self.qry_labels[qry_at] == PositionLabel::Gap {
                visit(AlignmentColumn::Insertion {
                    qry_position: qry_at,
                });
                qry_at += 1;
                continue;
            }

            if ref_at < self.ref_labels.len() && self.ref_labels[ref_at] == PositionLabel::Gap {
                visit(AlignmentColumn::Deletion {
                    ref_position: ref_at,
                });
                ref_at += 1;
                continue;
            }

            if ref_at < self.ref_labels.len()
                && qry_at < self.qry_labels.len()
                && self.ref_labels[ref_at].is_aligned()
                && self.qry_labels[qry_at].is_aligned()
            {
                visit(AlignmentColumn::Pair {
                    ref_position: ref_at,
                    qry_position: qry_at,
                });
                ref_at += 1;
                qry_at += 1;
                continue;
            }

            break;
        }
    }
}

enum AlignmentColumn {
    Insertion { qry_position: usize },
    Deletion { ref_position: usize },
    Pair { ref_position: usize, qry_position: usize },
}

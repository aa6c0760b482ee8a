use log::info;

use crate::alignment::Alignment;
use crate::alignment_configuration::{AlignmentAlgorithm, AlignmentConfiguration};
use crate::alignment_matrix::{ByteDirections, DirectionStore, TwoBitDirections};
use crate::error::Result;
use crate::hirschberg::hirschberg_align;
use crate::mem_waterman::{BestLocalAlignment, ScanTables, mem_waterman_align, mem_waterman_scan};
use crate::needleman::needleman_align;
use crate::sequence::Sequence;
use crate::traceback::traceback;
use crate::waterman::waterman_align;

/// What [`align`] produced, depending on the configured algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignmentOutcome {
    /// A full trace (Needleman, Waterman, Hirschberg).
    Trace(Alignment),
    /// Coordinates only (mem-waterman).
    Best(BestLocalAlignment),
    /// Per-anchor tables (mem-waterman scan).
    Scan(ScanTables),
}

/// Runs the aligner selected by the configuration's toggles on two encoded
/// sequences. The full-matrix variants honour `two_bit` for the direction
/// storage; mem-waterman honours `scan`.
pub fn align(
    configuration: &AlignmentConfiguration,
    query: &Sequence,
    reference: &Sequence,
) -> Result<AlignmentOutcome> {
    info!(
        "Aligning query '{}' against reference '{}' with {:?}",
        query.id(),
        reference.id(),
        configuration.algorithm,
    );

    match configuration.algorithm {
        AlignmentAlgorithm::Needleman => {
            if configuration.two_bit {
                full_matrix::<TwoBitDirections>(configuration, query, reference, needleman_align)
            } else {
                full_matrix::<ByteDirections>(configuration, query, reference, needleman_align)
            }
        }
        AlignmentAlgorithm::Waterman => {
            if configuration.two_bit {
                full_matrix::<TwoBitDirections>(configuration, query, reference, waterman_align)
            } else {
                full_matrix::<ByteDirections>(configuration, query, reference, waterman_align)
            }
        }
        AlignmentAlgorithm::MemWaterman => {
            if configuration.scan {
                Ok(AlignmentOutcome::Scan(mem_waterman_scan(
                    configuration,
                    query,
                    reference,
                )?))
            } else {
                Ok(AlignmentOutcome::Best(mem_waterman_align(
                    configuration,
                    query,
                    reference,
                )?))
            }
        }
        AlignmentAlgorithm::Hirschberg => Ok(AlignmentOutcome::Trace(hirschberg_align(
            configuration,
            query,
            reference,
        )?)),
    }
}

type FullMatrixAligner<Store> = fn(
    &AlignmentConfiguration,
    &Sequence,
    &Sequence,
) -> Result<crate::alignment_matrix::AlignmentMatrix<Store>>;

fn full_matrix<Store: DirectionStore>(
    configuration: &AlignmentConfiguration,
    query: &Sequence,
    reference: &Sequence,
    aligner: FullMatrixAligner<Store>,
) -> Result<AlignmentOutcome> {
    let matrix = aligner(configuration, query, reference)?;
    let alignment = traceback(&matrix, configuration, query, reference)?;
    Ok(AlignmentOutcome::Trace(alignment))
}

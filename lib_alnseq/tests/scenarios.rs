//! Pinned end-to-end scenarios with hand-checked scores and traces.

use lib_alnseq::alignment::PositionLabel;
use lib_alnseq::alignment_configuration::AlignmentConfiguration;
use lib_alnseq::alignment_matrix::ByteDirections;
use lib_alnseq::hirschberg::hirschberg_align;
use lib_alnseq::mem_waterman::{mem_waterman_align, mem_waterman_scan};
use lib_alnseq::needleman::needleman_align;
use lib_alnseq::scoring::TiePreference;
use lib_alnseq::sequence::Sequence;
use lib_alnseq::traceback::traceback;
use lib_alnseq::waterman::waterman_align;

fn encoded(id: &str, bases: &str) -> Sequence {
    let mut sequence = Sequence::new(id, bases.as_bytes());
    sequence.encode();
    sequence
}

fn labels(alignment: &[PositionLabel]) -> String {
    alignment
        .iter()
        .map(|label| match label {
            PositionLabel::EndOfAln => 'E',
            PositionLabel::Gap => '-',
            PositionLabel::Snp => 'X',
            PositionLabel::Match => 'M',
            PositionLabel::SoftMask => 's',
        })
        .collect()
}

#[test]
fn needleman_identity() {
    let configuration = AlignmentConfiguration::default();
    let reference = encoded("ref", "ACGT");
    let query = encoded("qry", "ACGT");

    let matrix = needleman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
    assert_eq!(matrix.best_score(), 20);

    let alignment = traceback(&matrix, &configuration, &query, &reference).unwrap();
    assert_eq!(labels(alignment.reference_labels()), "MMMM");
    assert_eq!(labels(alignment.query_labels()), "MMMM");
}

#[test]
fn needleman_single_mismatch() {
    let configuration = AlignmentConfiguration::default();
    let reference = encoded("ref", "ACCT");
    let query = encoded("qry", "ACGT");

    let matrix = needleman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
    assert_eq!(matrix.best_score(), 11);

    let alignment = traceback(&matrix, &configuration, &query, &reference).unwrap();
    assert_eq!(labels(alignment.reference_labels()), "MMXM");
}

#[test]
fn needleman_single_insertion() {
    let configuration = AlignmentConfiguration::default();
    let reference = encoded("ref", "AGT");
    let query = encoded("qry", "ACGT");

    let matrix = needleman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
    assert_eq!(matrix.best_score(), 5);

    let alignment = traceback(&matrix, &configuration, &query, &reference).unwrap();
    // The unmatched query base sits in the second alignment column.
    assert_eq!(labels(alignment.reference_labels()), "MMM");
    assert_eq!(labels(alignment.query_labels()), "M-MM");
}

#[test]
fn waterman_finds_the_embedded_query() {
    let configuration = AlignmentConfiguration::default();
    let reference = encoded("ref", "AAAACGTAAAA");
    let query = encoded("qry", "CGT");

    let matrix = waterman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
    assert_eq!(matrix.best_score(), 15);

    let alignment = traceback(&matrix, &configuration, &query, &reference).unwrap();
    assert_eq!(alignment.ref_start, 4);
    assert_eq!(alignment.ref_end, 6);
    assert_eq!(labels(alignment.reference_labels()), "ssssMMMssss");
    assert_eq!(labels(alignment.query_labels()), "MMM");
}

#[test]
fn mem_waterman_reports_the_embedded_query_cells() {
    let configuration = AlignmentConfiguration::default();
    let reference = encoded("ref", "AAAACGTAAAA");
    let query = encoded("qry", "CGT");

    let best = mem_waterman_align(&configuration, &query, &reference).unwrap();
    assert_eq!(best.score, 15);
    assert_eq!(best.start_index, 1 * 12 + 5);
    assert_eq!(best.end_index, 3 * 12 + 7);

    let coordinates = best.coordinates().unwrap();
    assert_eq!(
        (
            coordinates.ref_start,
            coordinates.ref_end,
            coordinates.qry_start,
            coordinates.qry_end
        ),
        (4, 6, 0, 2)
    );
}

#[test]
fn hirschberg_empty_reference() {
    let configuration = AlignmentConfiguration::default();
    let reference = encoded("ref", "");
    let query = encoded("qry", "ACGT");

    let alignment = hirschberg_align(&configuration, &query, &reference).unwrap();
    assert_eq!(alignment.score_with(&configuration, &reference, &query), -13);
    assert_eq!(labels(alignment.query_labels()), "----");

    let plain_reference = Sequence::new("ref", Vec::new());
    let plain_query = Sequence::new("qry", "ACGT".as_bytes());
    let (ref_line, qry_line) = alignment.aligned_pair(&plain_reference, &plain_query);
    assert_eq!(ref_line, b"----");
    assert_eq!(qry_line, b"ACGT");
}

#[test]
fn tie_preference_changes_layout_but_not_score() {
    let reference = encoded("ref", "AGC");
    let query = encoded("qry", "AC");

    let mut scores = Vec::new();
    for preference in TiePreference::ALL {
        let mut configuration = AlignmentConfiguration::default();
        configuration.tie_preference = preference;

        let matrix =
            needleman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
        scores.push(matrix.best_score());
    }
    assert!(scores.iter().all(|score| *score == scores[0]));

    // Under the default preference the middle reference base is deleted.
    let configuration = AlignmentConfiguration::default();
    let matrix = needleman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
    assert_eq!(matrix.best_score(), 0);

    let alignment = traceback(&matrix, &configuration, &query, &reference).unwrap();
    assert_eq!(labels(alignment.reference_labels()), "M-M");
    assert_eq!(labels(alignment.query_labels()), "MM");

    let plain_reference = Sequence::new("ref", "AGC".as_bytes());
    let plain_query = Sequence::new("qry", "AC".as_bytes());
    let (ref_line, qry_line) = alignment.aligned_pair(&plain_reference, &plain_query);
    assert_eq!(ref_line, b"AGC");
    assert_eq!(qry_line, b"A-C");
}

/// Pins the scan's half-split priority: alignments ending left of the
/// reference midpoint feed the per-reference table first, the rest feed the
/// per-query table first. Downstream consumers rely on the two tables being
/// complementary this way.
#[test]
fn scan_priority_splits_at_reference_midpoint() {
    let configuration = AlignmentConfiguration::default();
    let query = encoded("qry", "CGT");

    // Match entirely left of the midpoint: reference table wins.
    let reference = encoded("ref", "CGTAAAAAAAA");
    let tables = mem_waterman_scan(&configuration, &query, &reference).unwrap();
    assert_eq!(tables.per_reference()[2].score, 15);
    assert!(tables.per_query().iter().all(|entry| entry.score == 0));

    // Match at and past the midpoint: query table wins.
    let reference = encoded("ref", "AAAACGTAAAA");
    let tables = mem_waterman_scan(&configuration, &query, &reference).unwrap();
    assert_eq!(tables.per_query()[2].score, 15);
    assert!(tables.per_reference().iter().all(|entry| entry.score == 0));
}

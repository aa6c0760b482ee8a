//! Cross-algorithm properties: the four aligners agree with each other
//! wherever their contracts overlap.

use lib_alnseq::aligner::{AlignmentOutcome, align};
use lib_alnseq::alignment_configuration::{AlignmentAlgorithm, AlignmentConfiguration};
use lib_alnseq::alignment_matrix::ByteDirections;
use lib_alnseq::hirschberg::hirschberg_align;
use lib_alnseq::mem_waterman::mem_waterman_align;
use lib_alnseq::needleman::needleman_align;
use lib_alnseq::sequence::Sequence;
use lib_alnseq::traceback::traceback;
use lib_alnseq::waterman::waterman_align;

fn encoded(id: &str, bases: &str) -> Sequence {
    let mut sequence = Sequence::new(id, bases.as_bytes());
    sequence.encode();
    sequence
}

const PAIRS: [(&str, &str); 5] = [
    ("ACGTACGT", "ACGTACGT"),
    ("AAAACGTAAAA", "CGT"),
    ("GATTACA", "GCATGCT"),
    ("ACAGGGACTGTTTT", "GGGACT"),
    ("TTTTACGT", "ACGTTTTT"),
];

#[test]
fn aligners_are_deterministic() {
    let configuration = AlignmentConfiguration::default();

    for (ref_bases, qry_bases) in PAIRS {
        let reference = encoded("ref", ref_bases);
        let query = encoded("qry", qry_bases);

        let first = needleman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
        let second = needleman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
        assert_eq!(first, second);

        let first = traceback(&first, &configuration, &query, &reference).unwrap();
        let second = traceback(&second, &configuration, &query, &reference).unwrap();
        assert_eq!(first, second);

        let first = mem_waterman_align(&configuration, &query, &reference).unwrap();
        let second = mem_waterman_align(&configuration, &query, &reference).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn mem_waterman_agrees_with_full_matrix_waterman() {
    let configuration = AlignmentConfiguration::default();

    for (ref_bases, qry_bases) in PAIRS {
        let reference = encoded("ref", ref_bases);
        let query = encoded("qry", qry_bases);

        let matrix = waterman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
        let best = mem_waterman_align(&configuration, &query, &reference).unwrap();

        assert_eq!(best.score, matrix.best_score(), "{ref_bases} / {qry_bases}");
        assert_eq!(best.end_index, matrix.best_end_index());

        if best.score > 0 {
            let alignment = traceback(&matrix, &configuration, &query, &reference).unwrap();
            let coordinates = best.coordinates().unwrap();
            assert_eq!(coordinates.ref_start, alignment.ref_start);
            assert_eq!(coordinates.ref_end, alignment.ref_end);
            assert_eq!(coordinates.qry_start, alignment.qry_start);
            assert_eq!(coordinates.qry_end, alignment.qry_end);
        }
    }
}

#[test]
fn waterman_score_is_never_negative() {
    let configuration = AlignmentConfiguration::default();
    let reference = encoded("ref", "GGGG");
    let query = encoded("qry", "CCCC");

    let matrix = waterman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
    assert_eq!(matrix.best_score(), 0);

    let best = mem_waterman_align(&configuration, &query, &reference).unwrap();
    assert_eq!(best.score, 0);
    assert!(best.coordinates().is_none());
}

#[test]
fn hirschberg_matches_needleman_under_linear_gaps() {
    let mut configuration = AlignmentConfiguration::default();
    configuration.affine = false;

    for (ref_bases, qry_bases) in PAIRS {
        let reference = encoded("ref", ref_bases);
        let query = encoded("qry", qry_bases);

        let matrix = needleman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
        let alignment = hirschberg_align(&configuration, &query, &reference).unwrap();

        assert_eq!(
            alignment.score_with(&configuration, &reference, &query),
            matrix.best_score(),
            "{ref_bases} / {qry_bases}"
        );
    }
}

#[test]
fn hirschberg_matches_needleman_under_affine_gaps() {
    let configuration = AlignmentConfiguration::default();

    for (ref_bases, qry_bases) in [
        ("ACGTACGT", "ACGTACGT"),
        ("ACCT", "ACGT"),
        ("AGT", "ACGT"),
        ("ACGT", ""),
    ] {
        let reference = encoded("ref", ref_bases);
        let query = encoded("qry", qry_bases);

        let matrix = needleman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
        let alignment = hirschberg_align(&configuration, &query, &reference).unwrap();

        assert_eq!(
            alignment.score_with(&configuration, &reference, &query),
            matrix.best_score(),
            "{ref_bases} / {qry_bases}"
        );
    }
}

#[test]
fn waterman_score_survives_reversing_both_sequences() {
    let configuration = AlignmentConfiguration::default();

    for (ref_bases, qry_bases) in PAIRS {
        let reference = encoded("ref", ref_bases);
        let query = encoded("qry", qry_bases);

        let reversed_ref: String = ref_bases.chars().rev().collect();
        let reversed_qry: String = qry_bases.chars().rev().collect();
        let reference_reversed = encoded("ref-rev", &reversed_ref);
        let query_reversed = encoded("qry-rev", &reversed_qry);

        let forward = waterman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
        let backward =
            waterman_align::<ByteDirections>(&configuration, &query_reversed, &reference_reversed)
                .unwrap();

        assert_eq!(forward.best_score(), backward.best_score());
    }
}

#[test]
fn empty_query_scores_as_one_long_deletion() {
    let mut configuration = AlignmentConfiguration::default();
    let reference = encoded("ref", "ACGT");
    let query = encoded("qry", "");

    let matrix = needleman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
    assert_eq!(matrix.best_score(), -10 + 3 * -1);

    configuration.affine = false;
    let matrix = needleman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
    assert_eq!(matrix.best_score(), 4 * -10);
}

#[test]
fn identical_sequences_score_the_diagonal() {
    let configuration = AlignmentConfiguration::default();
    let reference = encoded("ref", "GATTACA");
    let query = encoded("qry", "GATTACA");

    let matrix = needleman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
    assert_eq!(matrix.best_score(), 35);

    let alignment = traceback(&matrix, &configuration, &query, &reference).unwrap();
    assert_eq!(alignment.matches, 7);
    assert_eq!(alignment.snps + alignment.insertions + alignment.deletions, 0);
}

#[test]
fn dispatch_honours_the_algorithm_toggles() {
    let reference = encoded("ref", "AAAACGTAAAA");
    let query = encoded("qry", "CGT");

    let mut configuration = AlignmentConfiguration::default();
    configuration.algorithm = AlignmentAlgorithm::Waterman;
    let direct = {
        let matrix = waterman_align::<ByteDirections>(&configuration, &query, &reference).unwrap();
        traceback(&matrix, &configuration, &query, &reference).unwrap()
    };

    match align(&configuration, &query, &reference).unwrap() {
        AlignmentOutcome::Trace(alignment) => assert_eq!(alignment, direct),
        other => panic!("expected a trace, got {other:?}"),
    }

    // The packed direction matrix must not change the outcome.
    configuration.two_bit = true;
    match align(&configuration, &query, &reference).unwrap() {
        AlignmentOutcome::Trace(alignment) => assert_eq!(alignment, direct),
        other => panic!("expected a trace, got {other:?}"),
    }

    configuration.algorithm = AlignmentAlgorithm::MemWaterman;
    match align(&configuration, &query, &reference).unwrap() {
        AlignmentOutcome::Best(best) => assert_eq!(best.score, 15),
        other => panic!("expected coordinates, got {other:?}"),
    }

    configuration.scan = true;
    match align(&configuration, &query, &reference).unwrap() {
        AlignmentOutcome::Scan(tables) => assert_eq!(tables.best().score, 15),
        other => panic!("expected scan tables, got {other:?}"),
    }

    configuration.algorithm = AlignmentAlgorithm::Hirschberg;
    match align(&configuration, &query, &reference).unwrap() {
        AlignmentOutcome::Trace(alignment) => {
            assert_eq!(alignment.matches + alignment.snps + alignment.deletions, 11);
        }
        other => panic!("expected a trace, got {other:?}"),
    }
}

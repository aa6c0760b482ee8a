use super::Sequence;

#[test]
fn encode_then_decode_restores_uppercase() {
    let mut sequence = Sequence::new("roundtrip", "ACGTNWRYKMBDHVSX".as_bytes());
    let original = sequence.bases().to_vec();

    sequence.encode();
    assert_eq!(sequence.bases()[0], 1);
    assert_eq!(sequence.bases()[3], 20);

    sequence.decode();
    assert_eq!(sequence.bases(), &original[..]);
}

#[test]
fn decode_uppercases_lowercase_input() {
    let mut sequence = Sequence::new("case", "acgt".as_bytes());
    sequence.encode();
    sequence.decode();
    assert_eq!(sequence.bases(), b"ACGT");
}

#[test]
fn alignment_range_is_validated() {
    let mut sequence = Sequence::new("range", "ACGTACGT".as_bytes());
    assert!(sequence.set_alignment_range(2, 5).is_ok());
    assert_eq!(sequence.aligned_len(), 4);
    assert_eq!(sequence.aligned_bases(), b"GTAC");

    assert!(sequence.set_alignment_range(5, 2).is_err());
    assert!(sequence.set_alignment_range(2, 8).is_err());
    // A failed update leaves the previous range in place.
    assert_eq!(sequence.offset(), 2);
    assert_eq!(sequence.end(), 5);
}

#[test]
fn empty_sequence_is_legal() {
    let sequence = Sequence::new("empty", Vec::new());
    assert!(sequence.validate_range().is_ok());
    assert_eq!(sequence.aligned_len(), 0);
    assert_eq!(sequence.aligned_bases(), b"");
}

//! Registry and CIGAR properties exercised through the public API.

use samcore::{Cigar, CigarOp, CigarOpKind, Header, HeaderError, ReadGroup, Reference};

fn reference(name: &str, length: u64) -> Reference {
    Reference::new(name, length).expect("valid reference")
}

/// Re-registering identical references never errors or grows the registry
#[test]
fn test_idempotent_reregistration() {
    let mut header = Header::default();
    let lengths = [1_u64, 16_569, 248_956_422, (1 << 31) - 1];
    for (i, &length) in lengths.iter().enumerate() {
        let name = format!("contig{i}");
        let id = header.add_reference(reference(&name, length)).unwrap();
        for _ in 0..3 {
            assert_eq!(header.add_reference(reference(&name, length)), Ok(id));
        }
    }
    assert_eq!(header.references().len(), lengths.len());
}

/// A same-named reference with another length is rejected and changes nothing
#[test]
fn test_conflict_leaves_registry_unchanged() {
    let mut header = Header::new(
        Some("@SQ\tSN:chr1\tLN:1000\n@SQ\tSN:chr2\tLN:2000\n"),
        Vec::new(),
    )
    .unwrap();
    let before = header.references().to_vec();

    for length in [1, 999, 1001, 2000] {
        let result = header.add_reference(reference("chr1", length));
        assert_eq!(
            result,
            Err(HeaderError::DuplicateReference("chr1".to_string()))
        );
        assert_eq!(header.references(), before.as_slice());
    }
}

/// N insertions into an empty header yield ids 0..N in order
#[test]
fn test_id_assignment_monotonic() {
    let mut header = Header::default();
    let ids: Vec<usize> = (0..50)
        .map(|i| header.add_reference(reference(&format!("chr{i}"), 100)).unwrap())
        .collect();
    assert_eq!(ids, (0..50).collect::<Vec<_>>());

    let rg_ids: Vec<usize> = (0..5)
        .map(|i| {
            header
                .add_read_group(ReadGroup::new(format!("rg{i}")).unwrap())
                .unwrap()
        })
        .collect();
    assert_eq!(rg_ids, vec![0, 1, 2, 3, 4]);

    for (i, r) in header.references().iter().enumerate() {
        assert_eq!(r.id(), Some(i));
        assert_eq!(header.reference(i32::try_from(i).unwrap()), Some(r));
    }
}

/// Flow order buffers are never shared between a header and its clone
#[test]
fn test_clone_independence_both_directions() {
    let text = "@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:100\n@RG\tID:rg1\tFO:TACGTACG\tKS:TCAG\n";
    let mut original = Header::new(Some(text), Vec::new()).unwrap();
    let mut copy = original.clone();

    copy.read_group_mut("rg1")
        .unwrap()
        .flow_order_mut()
        .extend_from_slice(b"NN");
    assert_eq!(
        original.read_group("rg1").unwrap().flow_order(),
        b"TACGTACG"
    );

    original.read_group_mut("rg1").unwrap().flow_order_mut()[0] = b'G';
    assert_eq!(
        copy.read_group("rg1").unwrap().flow_order(),
        b"TACGTACGNN"
    );
    assert_eq!(copy.read_group("rg1").unwrap().key_sequence(), b"TCAG");
    assert_eq!(copy.to_string(), original.to_string());
}

/// A clone can be handed to another thread while the original keeps changing
#[test]
fn test_clone_sent_to_thread() {
    let mut header = Header::new(None, vec![reference("chr1", 100)]).unwrap();
    let snapshot = header.clone();

    let handle = std::thread::spawn(move || snapshot.references().len());
    header.add_reference(reference("chr2", 200)).unwrap();

    assert_eq!(handle.join().unwrap(), 1);
    assert_eq!(header.references().len(), 2);
}

#[test]
fn test_reference_span_examples() {
    use samcore::CigarOpKind::{Back, HardClip, Match, SoftClip};

    let span = |ops: &[(CigarOpKind, u32)]| {
        ops.iter()
            .map(|&(kind, len)| CigarOp::new(kind, len))
            .collect::<Cigar>()
            .reference_end(0)
    };

    assert_eq!(span(&[(Match, 20), (Back, 5), (Match, 20)]), 35);
    assert_eq!(span(&[(HardClip, 10), (Back, 3)]), 0);
    assert_eq!(span(&[(Match, 3), (SoftClip, 10), (HardClip, 10)]), 3);
}

#[test]
fn test_hard_clip_ordering() {
    let parse = |s: &str| s.parse::<Cigar>().unwrap();

    for length in 0..=30 {
        assert!(!parse("3M10H10H").is_valid(length));
        assert!(!parse("3M10H10S").is_valid(length));
    }
    assert!(parse("3M10S10H").is_valid(13));
}

#[test]
fn test_empty_cigar_validity() {
    let empty: Cigar = "*".parse().unwrap();
    assert!(empty.is_valid(0));
    for n in 1..10 {
        assert!(!empty.is_valid(n));
    }
}

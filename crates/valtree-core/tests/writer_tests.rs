use valtree_core::{encode, write_tree, Kind, Node, TreeError, TreeWriter};

/// Build the expected bytes of one segment by hand.
fn segment(signature: u8, children: i32, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![signature];
    out.extend_from_slice(&children.to_le_bytes());
    out.extend_from_slice(&(payload.len() as i32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

// ============================================================================
// Single segments
// ============================================================================

#[test]
fn encode_empty_tree_writes_nothing() {
    assert!(encode(&Node::empty()).unwrap().is_empty());
}

#[test]
fn encode_int_leaf() {
    let bytes = encode(&Node::int(42)).unwrap();
    assert_eq!(bytes, segment(b'i', 0, &42i32.to_le_bytes()));
}

#[test]
fn encode_negative_int_leaf() {
    let bytes = encode(&Node::int(-100)).unwrap();
    assert_eq!(bytes, segment(b'i', 0, &(-100i32).to_le_bytes()));
}

#[test]
fn encode_real_leaf() {
    let bytes = encode(&Node::real(7.5)).unwrap();
    assert_eq!(bytes, segment(b'r', 0, &7.5f64.to_le_bytes()));
}

#[test]
fn encode_string_leaf() {
    let bytes = encode(&Node::string("asd")).unwrap();
    assert_eq!(bytes, segment(b's', 0, b"asd"));
}

#[test]
fn encode_string_keeps_raw_bytes() {
    let raw = vec![0u8, 0xff, b'\n', 0];
    let bytes = encode(&Node::string(raw.clone())).unwrap();
    assert_eq!(bytes, segment(b's', 0, &raw));
}

// ============================================================================
// Trees
// ============================================================================

#[test]
fn encode_int_with_two_children() {
    let tree = Node::int(42) + Node::int(-100) + Node::int(999999);
    let mut expected = segment(b'i', 2, &42i32.to_le_bytes());
    expected.extend(segment(b'i', 0, &(-100i32).to_le_bytes()));
    expected.extend(segment(b'i', 0, &999999i32.to_le_bytes()));
    assert_eq!(encode(&tree).unwrap(), expected);
}

#[test]
fn encode_is_pre_order_with_direct_child_counts() {
    // 1 ── 2 ── 3
    //  └── 4
    let tree = Node::int(1) + (Node::string("two") + Node::real(3.0)) + Node::int(4);
    let mut expected = segment(b'i', 2, &1i32.to_le_bytes());
    expected.extend(segment(b's', 1, b"two"));
    expected.extend(segment(b'r', 0, &3.0f64.to_le_bytes()));
    expected.extend(segment(b'i', 0, &4i32.to_le_bytes()));
    assert_eq!(encode(&tree).unwrap(), expected);
}

#[test]
fn encoded_length_matches_stats() {
    let tree = Node::int(8) + (Node::string("bar") + Node::real(2.015)) + Node::string("baz");
    assert_eq!(encode(&tree).unwrap().len(), tree.stats().encoded_bytes);
}

// ============================================================================
// Streams and failures
// ============================================================================

#[test]
fn write_tree_appends_to_existing_sink() {
    let mut sink = vec![0xAA];
    write_tree(&mut sink, &Node::int(1)).unwrap();
    assert_eq!(sink[0], 0xAA);
    assert_eq!(&sink[1..], segment(b'i', 0, &1i32.to_le_bytes()).as_slice());
}

#[test]
fn tree_writer_counts_bytes_across_writes() {
    let mut writer = TreeWriter::new(Vec::new());
    writer.write(&Node::int(1)).unwrap();
    writer.write(&(Node::string("ab") + Node::int(2))).unwrap();
    assert_eq!(writer.bytes_written(), 13 + 11 + 13);
    assert_eq!(writer.into_inner().len(), 37);
}

#[test]
fn empty_string_leaf_is_rejected() {
    let err = encode(&Node::string("")).unwrap_err();
    assert!(matches!(err, TreeError::EmptyPayload { kind: Kind::String }));
}

#[test]
fn empty_string_child_is_rejected_before_writing() {
    let tree = Node::int(1) + Node::string("");
    let mut sink = Vec::new();
    let err = write_tree(&mut sink, &tree).unwrap_err();
    assert!(matches!(err, TreeError::EmptyPayload { .. }));
    assert!(sink.is_empty(), "nothing should be written for a rejected tree");
}

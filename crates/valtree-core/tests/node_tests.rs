use valtree_core::{Kind, Node, TreeError, TreeStats, Value};

fn assert_equal_both_ways(a: &Node, b: &Node) {
    assert!(a.is_equal(b), "expected equal:\n  left:  {a}\n  right: {b}");
    assert!(b.is_equal(a), "expected equal:\n  left:  {b}\n  right: {a}");
}

fn assert_not_equal_both_ways(a: &Node, b: &Node) {
    assert!(!a.is_equal(b), "expected different:\n  left:  {a}\n  right: {b}");
    assert!(!b.is_equal(a), "expected different:\n  left:  {b}\n  right: {a}");
}

// ============================================================================
// Equality: leaves
// ============================================================================

#[test]
fn empty_equals_empty() {
    assert_equal_both_ways(&Node::empty(), &Node::empty());
}

#[test]
fn int_differs_from_empty() {
    assert_not_equal_both_ways(&Node::int(42), &Node::empty());
}

#[test]
fn real_differs_from_empty() {
    assert_not_equal_both_ways(&Node::real(42.9), &Node::empty());
}

#[test]
fn string_differs_from_empty() {
    assert_not_equal_both_ways(&Node::string("asd"), &Node::empty());
}

#[test]
fn equal_ints() {
    assert_equal_both_ways(&Node::int(42), &Node::int(42));
}

#[test]
fn different_ints() {
    assert_not_equal_both_ways(&Node::int(42), &Node::int(100));
}

#[test]
fn equal_reals() {
    assert_equal_both_ways(&Node::real(7.5), &Node::real(7.5));
}

#[test]
fn close_reals_differ() {
    assert_not_equal_both_ways(&Node::real(7.5), &Node::real(7.499));
}

#[test]
fn equal_strings() {
    assert_equal_both_ways(&Node::string("asd"), &Node::string("asd"));
}

#[test]
fn empty_strings_are_equal() {
    assert_equal_both_ways(&Node::string(""), &Node::string(""));
}

#[test]
fn string_prefix_is_not_equal() {
    assert_not_equal_both_ways(&Node::string("asd"), &Node::string("asdf"));
}

#[test]
fn different_strings() {
    assert_not_equal_both_ways(&Node::string("asd"), &Node::string("qwe"));
}

#[test]
fn kinds_with_same_digits_differ() {
    assert_not_equal_both_ways(&Node::int(42), &Node::string("42"));
    assert_not_equal_both_ways(&Node::int(42), &Node::real(42.0));
}

#[test]
fn partial_eq_follows_is_equal() {
    assert_eq!(Node::int(1) + Node::int(2), Node::int(1) + Node::int(2));
    assert_ne!(Node::int(1) + Node::int(2), Node::int(1));
}

// ============================================================================
// Equality: shapes
// ============================================================================

#[test]
fn tree_equals_itself() {
    let tree = Node::int(42) + Node::int(100);
    assert_equal_both_ways(&tree, &tree.clone());
}

#[test]
fn swapped_parent_and_child_differ() {
    let a = Node::int(42) + Node::int(100);
    let b = Node::int(100) + Node::int(42);
    assert_not_equal_both_ways(&a, &b);
}

#[test]
fn parent_never_equals_its_leaf_value() {
    let tree = Node::int(100) + Node::int(42);
    assert_not_equal_both_ways(&tree, &Node::int(100));
    assert_not_equal_both_ways(&tree, &Node::int(42));
}

#[test]
fn sibling_order_matters() {
    let a = Node::int(0) + Node::int(1) + Node::int(2);
    let b = Node::int(0) + Node::int(2) + Node::int(1);
    assert_not_equal_both_ways(&a, &b);
}

#[test]
fn nesting_matters() {
    let flat = Node::int(0) + Node::int(1) + Node::int(2);
    let nested = Node::int(0) + (Node::int(1) + Node::int(2));
    assert_not_equal_both_ways(&flat, &nested);
}

// ============================================================================
// Merge operator
// ============================================================================

#[test]
fn empty_plus_tree_is_tree() {
    assert_equal_both_ways(&(Node::empty() + Node::int(42)), &Node::int(42));
}

#[test]
fn tree_plus_empty_is_tree() {
    let tree = Node::int(42) + Node::string("x");
    assert_equal_both_ways(&(tree.clone() + Node::empty()), &tree);
}

#[test]
fn empty_plus_empty_is_empty() {
    let merged = Node::empty() + Node::empty();
    assert!(merged.is_empty());
}

#[test]
fn merge_is_left_associative() {
    let tree = Node::int(42) + Node::int(100) + Node::int(333);
    assert_eq!(tree.children_count(), 2);
    assert!(tree.children().iter().all(Node::is_leaf));
}

#[test]
fn parenthesized_merge_nests() {
    let tree = Node::int(42) + (Node::int(100) + Node::int(333));
    assert_eq!(tree.children_count(), 1);
    assert_eq!(tree.children()[0].children_count(), 1);
}

// ============================================================================
// add_child
// ============================================================================

#[test]
fn add_child_appends_in_order_and_chains() {
    let mut tree = Node::string("root");
    tree.add_child(Node::int(1))
        .unwrap()
        .add_child(Node::int(2))
        .unwrap();
    assert_equal_both_ways(&tree, &(Node::string("root") + Node::int(1) + Node::int(2)));
}

#[test]
fn add_empty_child_is_noop() {
    let mut tree = Node::int(1);
    tree.add_child(Node::empty()).unwrap();
    assert!(tree.is_leaf());
}

#[test]
fn empty_tree_refuses_children() {
    let mut tree = Node::empty();
    let err = tree.add_child(Node::int(1)).unwrap_err();
    assert!(matches!(err, TreeError::ChildOfEmpty));
    assert!(tree.is_leaf());
}

// ============================================================================
// Text rendering
// ============================================================================

#[test]
fn text_empty() {
    assert_eq!(Node::empty().to_text(), "()");
}

#[test]
fn text_leaves() {
    assert_eq!(Node::int(42).to_text(), "(int 42)");
    assert_eq!(Node::int(-7).to_text(), "(int -7)");
    assert_eq!(Node::real(7.5).to_text(), "(real 7.500000)");
    assert_eq!(Node::string("asd").to_text(), "(string asd)");
    assert_eq!(Node::string("").to_text(), "(string )");
}

#[test]
fn text_children_have_no_separator() {
    let tree = Node::int(42) + Node::int(100) + Node::int(333);
    assert_eq!(tree.to_text(), "(int 42(int 100int 333))");
}

#[test]
fn text_nested() {
    let tree = Node::int(42) + (Node::int(100) + Node::int(0) + Node::int(99)) + Node::int(333);
    assert_eq!(tree.to_text(), "(int 42(int 100(int 0int 99)int 333))");
}

#[test]
fn display_matches_to_text() {
    let tree = Node::real(1.25) + Node::string("s");
    assert_eq!(format!("{tree}"), tree.to_text());
}

// ============================================================================
// Accessors and stats
// ============================================================================

#[test]
fn raw_bytes_per_kind() {
    assert!(Node::empty().value().raw_bytes().is_empty());
    assert_eq!(Node::int(999999).value().raw_bytes().as_ref(), &999999i32.to_le_bytes());
    assert_eq!(Node::real(7.5).value().raw_bytes().as_ref(), &7.5f64.to_le_bytes());
    assert_eq!(Node::string("asd").value().raw_bytes().as_ref(), b"asd");
    assert_eq!(Node::string("asd").raw_bytes(), Node::string("asd").value().raw_bytes());
}

#[test]
fn conversions_pick_the_kind() {
    assert_eq!(Node::from(5i32).kind(), Kind::Int);
    assert_eq!(Node::from(5.0f64).kind(), Kind::Real);
    assert_eq!(Node::from("five").kind(), Kind::String);
    assert_eq!(Node::from(Value::Invalid).kind(), Kind::Invalid);
    assert!(Node::default().is_empty());
}

#[test]
fn stats_of_empty_tree_are_zero() {
    assert_eq!(Node::empty().stats(), TreeStats::default());
}

#[test]
fn stats_count_shape_and_bytes() {
    let tree = Node::int(8) + (Node::string("bar") + Node::real(2.015)) + Node::string("baz");
    let stats = tree.stats();
    assert_eq!(stats.nodes, 4);
    assert_eq!(stats.leaves, 2);
    assert_eq!(stats.max_depth, 3);
    assert_eq!(stats.payload_bytes, 4 + 3 + 8 + 3);
    assert_eq!(stats.encoded_bytes, 4 * 9 + 18);
}

#[test]
fn stats_serialize_to_json() {
    let json = serde_json::to_value(Node::int(1).stats()).unwrap();
    assert_eq!(json["nodes"], 1);
    assert_eq!(json["encoded_bytes"], 13);
}

//! Tests for the cycle guard

use std::collections::HashSet;

use rstest::{fixture, rstest};

use retree::domain::{can_reparent, descendants_of, Node};
use retree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn node(id: &str, name: &str, parent: Option<&str>) -> Node {
    Node::new(id, name, parent.map(String::from))
}

#[fixture]
fn chain() -> Vec<Node> {
    vec![
        node("1", "Root", None),
        node("2", "Child", Some("1")),
        node("3", "Grand", Some("2")),
    ]
}

#[rstest]
fn given_chain_when_collecting_descendants_then_full_transitive_set(chain: Vec<Node>) {
    let descendants = descendants_of("1", &chain);
    assert_eq!(
        descendants,
        HashSet::from(["2".to_string(), "3".to_string()])
    );
}

#[rstest]
fn given_chain_when_reparenting_root_under_grandchild_then_rejected(chain: Vec<Node>) {
    assert!(!can_reparent("1", Some("3"), &chain));
}

#[rstest]
fn given_chain_when_reparenting_grandchild_under_root_then_accepted(chain: Vec<Node>) {
    assert!(can_reparent("3", Some("1"), &chain));
}

#[test]
fn given_any_descendant_target_when_validating_then_always_rejected() {
    // Wide tree: every (source, descendant) pair must be rejected
    let nodes = vec![
        node("r", "r", None),
        node("a", "a", Some("r")),
        node("b", "b", Some("r")),
        node("a1", "a1", Some("a")),
        node("a2", "a2", Some("a")),
        node("a1x", "a1x", Some("a1")),
    ];

    for source in &nodes {
        for target in descendants_of(&source.id, &nodes) {
            assert!(
                !can_reparent(&source.id, Some(&target), &nodes),
                "move of {} under descendant {} must be rejected",
                source.id,
                target
            );
        }
    }
}

#[test]
fn given_descendant_sets_when_comparing_then_transitively_closed() {
    let nodes = vec![
        node("a", "a", None),
        node("b", "b", Some("a")),
        node("c", "c", Some("b")),
        node("d", "d", Some("c")),
    ];

    let of_a = descendants_of("a", &nodes);
    for b in &of_a {
        for c in descendants_of(b, &nodes) {
            assert!(of_a.contains(&c), "{} must be a descendant of a", c);
        }
    }
}

#[rstest]
fn given_move_to_root_when_validating_then_always_legal(chain: Vec<Node>) {
    for node in &chain {
        assert!(can_reparent(&node.id, None, &chain));
    }
}

#[rstest]
fn given_self_as_target_when_validating_then_rejected(chain: Vec<Node>) {
    assert!(!can_reparent("2", Some("2"), &chain));
}

#[rstest]
fn given_unknown_target_when_validating_then_rejected(chain: Vec<Node>) {
    assert!(!can_reparent("2", Some("nope"), &chain));
}

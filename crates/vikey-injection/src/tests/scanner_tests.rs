use crate::process_tree::has_slow_ui_descendant;
use crate::tests::mocks::FakeProcessTree;

const NAMES: &[&str] = &["claude", "aider", "codex"];

#[test]
fn finds_direct_child() {
    let mut tree = FakeProcessTree::new().with_process(1, 2, "claude");
    assert!(has_slow_ui_descendant(&mut tree, 1, 4, NAMES));
}

#[test]
fn finds_descendant_through_shell() {
    // terminal -> shell -> multiplexer -> app
    let mut tree = FakeProcessTree::new()
        .with_process(1, 2, "zsh")
        .with_process(2, 3, "tmux")
        .with_process(3, 4, "claude");
    assert!(has_slow_ui_descendant(&mut tree, 1, 4, NAMES));
}

#[test]
fn no_match_returns_false() {
    let mut tree = FakeProcessTree::new()
        .with_process(1, 2, "zsh")
        .with_process(2, 3, "vim");
    assert!(!has_slow_ui_descendant(&mut tree, 1, 4, NAMES));
}

#[test]
fn match_at_depth_limit_is_found() {
    // Depths 1..=4; the node at the limit is name-checked but not expanded.
    let mut tree = FakeProcessTree::new()
        .with_process(1, 2, "login")
        .with_process(2, 3, "zsh")
        .with_process(3, 4, "tmux")
        .with_process(4, 5, "codex");
    assert!(has_slow_ui_descendant(&mut tree, 1, 4, NAMES));
}

#[test]
fn match_beyond_depth_limit_is_not_found() {
    let mut tree = FakeProcessTree::new()
        .with_process(1, 2, "login")
        .with_process(2, 3, "zsh")
        .with_process(3, 4, "tmux")
        .with_process(4, 5, "node")
        .with_process(5, 6, "claude");
    assert!(!has_slow_ui_descendant(&mut tree, 1, 4, NAMES));
}

#[test]
fn names_compare_after_truncation() {
    // 16-character comparable limit; longer on-disk names still match an
    // entry that fits the limit.
    let names: &[&str] = &["sixteen-char-nam"];
    let mut tree = FakeProcessTree::new().with_process(1, 2, "sixteen-char-name-overflow");
    assert!(has_slow_ui_descendant(&mut tree, 1, 4, names));
}

#[test]
fn unresolvable_names_are_skipped() {
    let mut tree = FakeProcessTree::new()
        .with_nameless_process(1, 2)
        .with_process(1, 3, "aider");
    assert!(has_slow_ui_descendant(&mut tree, 1, 4, NAMES));
}

#[test]
fn empty_tree_returns_false() {
    let mut tree = FakeProcessTree::new();
    assert!(!has_slow_ui_descendant(&mut tree, 1, 4, NAMES));
}

#[test]
fn sibling_branches_are_all_searched() {
    let mut tree = FakeProcessTree::new()
        .with_process(1, 2, "zsh")
        .with_process(1, 3, "zsh")
        .with_process(3, 4, "claude");
    assert!(has_slow_ui_descendant(&mut tree, 1, 4, NAMES));
}

use vdom::{Dom, DomMutation, DomVNode, Mount, NodeId, Props, Reconciler, h, patch, text};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn keyed(keys: &[&str]) -> DomVNode {
    h("ul").children(keys.iter().map(|key| h("li").with_key(*key)))
}

/// Mounts `tree` over a fresh placeholder and clears the journal.
fn mount(dom: &mut Dom, mut tree: DomVNode) -> (DomVNode, NodeId) {
    let placeholder = dom.mount_point("div").unwrap();
    let node = patch(dom, Mount::Node(placeholder), &mut tree).unwrap();
    dom.clear_mutations();
    (tree, node)
}

fn child_els(tree: &DomVNode) -> Vec<NodeId> {
    tree.child_nodes()
        .iter()
        .map(|child| child.el().unwrap())
        .collect()
}

#[test]
fn identical_tree_patches_without_mutations() {
    init_logs();
    let build = || {
        h("section")
            .attr("id", "main")
            .style("display", "flex")
            .child(h("h1").attr("class", "title").child(text("Hello")))
            .child(keyed(&["a", "b", "c"]))
            .child(text("footer"))
    };
    let mut dom = Dom::new();
    let (old, node) = mount(&mut dom, build());

    let mut new: DomVNode = build();
    let patched = patch(&mut dom, Mount::from(&old), &mut new).unwrap();
    assert_eq!(patched, node);
    assert!(dom.mutations().is_empty(), "{:?}", dom.mutations());
}

#[test]
fn matched_pairs_keep_their_real_nodes() {
    init_logs();
    let mut dom = Dom::new();
    let (old, node) = mount(&mut dom, keyed(&["a", "b", "c", "d"]));
    let before = child_els(&old);

    let mut new = keyed(&["d", "b", "a", "c"]);
    patch(&mut dom, Mount::from(&old), &mut new).unwrap();
    let after = child_els(&new);

    assert_eq!(after, vec![before[3], before[1], before[0], before[2]]);
    assert_eq!(dom.children(node), after);
    assert_eq!(dom.count_mutations(DomMutation::is_create), 0);
}

#[test]
fn rotation_is_a_single_move() {
    init_logs();
    let mut dom = Dom::new();
    let (old, node) = mount(&mut dom, keyed(&["a", "b", "c"]));
    let before = child_els(&old);

    let mut new = keyed(&["c", "a", "b"]);
    let mut reconciler = Reconciler::new(&mut dom);
    reconciler.patch(Mount::from(&old), &mut new).unwrap();
    let stats = reconciler.stats();
    assert_eq!((stats.moved, stats.created, stats.removed), (1, 0, 0));

    assert_eq!(dom.count_mutations(DomMutation::is_move), 1);
    assert_eq!(dom.count_mutations(DomMutation::is_create), 0);
    assert_eq!(dom.count_mutations(DomMutation::is_removal), 0);
    assert_eq!(
        dom.mutations(),
        [DomMutation::Move {
            parent: node,
            node: before[2],
            before: Some(before[0]),
        }]
    );
}

#[test]
fn append_only_leaves_existing_children_alone() {
    init_logs();
    let mut dom = Dom::new();
    let (old, node) = mount(&mut dom, keyed(&["a", "b"]));
    let before = child_els(&old);

    let mut new = keyed(&["a", "b", "c"]);
    patch(&mut dom, Mount::from(&old), &mut new).unwrap();
    let after = child_els(&new);

    assert_eq!(&after[..2], &before[..]);
    assert_eq!(dom.count_mutations(DomMutation::is_move), 0);
    assert_eq!(dom.count_mutations(DomMutation::is_create), 1);
    assert_eq!(
        dom.mutations()[1],
        DomMutation::Insert {
            parent: node,
            node: after[2],
            before: None,
        }
    );
}

#[test]
fn prepend_only_inserts_before_first() {
    init_logs();
    let mut dom = Dom::new();
    let (old, node) = mount(&mut dom, keyed(&["a", "b"]));
    let before = child_els(&old);

    let mut new = keyed(&["c", "a", "b"]);
    patch(&mut dom, Mount::from(&old), &mut new).unwrap();
    let after = child_els(&new);

    assert_eq!(&after[1..], &before[..]);
    assert_eq!(dom.count_mutations(DomMutation::is_move), 0);
    assert_eq!(dom.count_mutations(DomMutation::is_create), 1);
    assert_eq!(
        dom.mutations()[1],
        DomMutation::Insert {
            parent: node,
            node: after[0],
            before: Some(before[0]),
        }
    );
    assert_eq!(dom.children(node), after);
}

#[test]
fn full_removal_clears_parent() {
    init_logs();
    let mut dom = Dom::new();
    let (old, node) = mount(&mut dom, keyed(&["a", "b", "c"]));
    let before = child_els(&old);

    let mut new = keyed(&[]);
    patch(&mut dom, Mount::from(&old), &mut new).unwrap();

    assert!(dom.children(node).is_empty());
    assert!(before.iter().all(|&el| !dom.contains(el)));
    assert_eq!(dom.count_mutations(DomMutation::is_create), 0);
    assert_eq!(dom.mutations(), [DomMutation::ClearChildren { parent: node }]);
}

#[test]
fn tag_mismatch_replaces_node() {
    init_logs();
    let mut dom = Dom::new();
    let (old, node) = mount(&mut dom, h("div").child(h("em").child(text("deep"))));
    let inner = old.child_nodes()[0].el().unwrap();

    let mut new: DomVNode = h("span");
    let replaced = patch(&mut dom, Mount::from(&old), &mut new).unwrap();

    assert_ne!(replaced, node);
    assert!(!dom.contains(node));
    assert!(!dom.contains(inner));
    assert_eq!(dom.children(dom.root()), vec![replaced]);
    assert_eq!(dom.outer_html(replaced), "<span></span>");
    assert_eq!(dom.count_mutations(|mutation| mutation.name() == "replace"), 1);
}

#[test]
fn property_patch_removes_sets_and_clears() {
    init_logs();
    let mut dom = Dom::new();
    let old_props = Props::new().with_attr("id", "a").with_style("color", "red");
    let (old, node) = mount(&mut dom, h("div").props(old_props));
    assert_eq!(dom.outer_html(node), r#"<div id="a" style="color: red"></div>"#);

    let mut new: DomVNode = h("div").props(Props::new().with_attr("class", "b"));
    patch(&mut dom, Mount::from(&old), &mut new).unwrap();

    assert_eq!(dom.attribute(node, "id"), None);
    assert_eq!(dom.attribute(node, "class"), Some("b"));
    assert_eq!(dom.style(node, "color"), None);
    assert_eq!(dom.outer_html(node), r#"<div class="b"></div>"#);
}

#[test]
fn successive_passes_chain_through_new_tree() {
    init_logs();
    let mut dom = Dom::new();
    let (mut current, node) = mount(&mut dom, keyed(&["a"]));
    let passes: [&[&str]; 4] = [&["a", "b"], &["b"], &["c", "b", "a"], &["a"]];
    for keys in passes {
        let mut next = keyed(keys);
        let patched = patch(&mut dom, Mount::from(&current), &mut next).unwrap();
        assert_eq!(patched, node);
        assert_eq!(dom.children(node), child_els(&next));
        current = next;
    }
}

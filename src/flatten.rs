use crate::node::Node;
use crate::tree::Tree;

/// A [`Node`] which is currently visible together with its depth.
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct Flattened<'a> {
    /// Zero based depth. Depth 0 means the root with 0 indentation.
    pub depth: usize,
    pub node: &'a Node,
}

impl Flattened<'_> {
    #[must_use]
    pub fn path(&self) -> &str {
        self.node.path()
    }
}

/// Get a flat list of all visible nodes in display order.
///
/// Hidden nodes are skipped together with everything below them.
#[must_use]
pub fn flatten(tree: &Tree) -> Vec<Flattened<'_>> {
    let mut result = Vec::new();
    push_visible(&mut result, tree.root(), 0);
    result
}

fn push_visible<'a>(result: &mut Vec<Flattened<'a>>, node: &'a Node, depth: usize) {
    if !node.is_visible() {
        return;
    }
    result.push(Flattened { depth, node });
    for child in node.children() {
        push_visible(result, child, depth + 1);
    }
}

#[cfg(test)]
fn flatten_works(tree: &Tree, expected: &[&str]) {
    let actual = flatten(tree)
        .into_iter()
        .map(|flattened| flattened.node.name())
        .collect::<Vec<_>>();
    assert_eq!(actual, expected);
}

#[test]
fn flatten_closed_is_only_root() {
    flatten_works(&Tree::example(), &["root"]);
}

#[test]
fn flatten_root_open() {
    let mut tree = Tree::example();
    tree.open_folder("root").unwrap();
    flatten_works(&tree, &["root", "first", "some-sort.c", "wallpapers"]);
}

#[test]
fn flatten_nested_open() {
    let mut tree = Tree::example();
    tree.open_folder("root").unwrap();
    tree.open_folder("root/first").unwrap();
    tree.open_folder("root/first/fk").unwrap();
    flatten_works(
        &tree,
        &[
            "root",
            "first",
            "labs",
            "fk",
            "fk.svg",
            "Дневник самоконтроля.docx",
            "some-sort.c",
            "wallpapers",
        ],
    );
}

#[test]
fn flatten_skips_below_hidden_folder() {
    let mut tree = Tree::example();
    tree.open_folder("root/wallpapers").unwrap();
    flatten_works(&tree, &["root"]);
}

#[test]
fn depth_works() {
    let mut tree = Tree::example();
    tree.open_folder("root").unwrap();
    tree.open_folder("root/first").unwrap();
    tree.open_folder("root/first/labs").unwrap();
    let depths = flatten(&tree)
        .into_iter()
        .map(|flattened| flattened.depth)
        .collect::<Vec<_>>();
    assert_eq!(depths, [0, 1, 2, 3, 2, 1, 1]);
}

/*! Text based views of a [`Tree`].
 *
 * Both only show visible nodes.
 * The markup carries the path of every node in `data-path` so a click on a folder can be mapped back to [`Tree::toggle_folder`].
 */

use core::fmt;

use crate::node::Node;
use crate::tree::Tree;

/// Render the visible part of the tree as nested HTML lists.
///
/// Folders become `<ul class='folder'>`, files `<li class='file'>`.
///
/// ```
/// # use folder_tree::{render, Folder, Tree};
/// let tree = Tree::new(Folder::root("root"));
/// assert_eq!(render::html(&tree), "<ul data-path='root' class='folder'> <p>root</p></ul>");
/// ```
#[must_use]
pub fn html(tree: &Tree) -> String {
    let mut result = String::new();
    html_node(&mut result, tree.root());
    result
}

fn html_node(result: &mut String, node: &Node) {
    if !node.is_visible() {
        return;
    }
    let path = escape(node.path());
    let name = escape(node.name());
    match node {
        Node::File(_) => {
            result.push_str(&format!(
                "<li data-path='{path}' class='file'><p>{name}</p></li>"
            ));
        }
        Node::Folder(folder) => {
            result.push_str(&format!(
                "<ul data-path='{path}' class='folder'> <p>{name}</p>"
            ));
            for child in folder.children() {
                html_node(result, child);
            }
            result.push_str("</ul>");
        }
    }
}

fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for char in text.chars() {
        match char {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\'' => result.push_str("&#39;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(char),
        }
    }
    result
}

/// Render the visible part of the tree as an indented outline, one node per line.
///
/// Same as the [`Display`](fmt::Display) of [`Tree`].
#[must_use]
pub fn outline(tree: &Tree) -> String {
    tree.to_string()
}

fn outline_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    if !node.is_visible() {
        return Ok(());
    }
    let indent = depth * 2;
    match node {
        Node::File(_) => writeln!(f, "{:indent$}{}", "", node.name()),
        Node::Folder(folder) => {
            writeln!(f, "{:indent$}{}/", "", node.name())?;
            folder
                .children()
                .iter()
                .try_for_each(|child| outline_node(f, child, depth + 1))
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        outline_node(f, self.root(), 0)
    }
}

#[test]
fn html_of_closed_tree_is_root() {
    assert_eq!(
        html(&Tree::example()),
        "<ul data-path='root' class='folder'> <p>root</p></ul>"
    );
}

#[test]
fn html_contains_visible_nodes() {
    let mut tree = Tree::example();
    tree.open_folder("root").unwrap();
    tree.open_folder("root/wallpapers").unwrap();
    assert_eq!(
        html(&tree),
        "<ul data-path='root' class='folder'> <p>root</p>\
         <ul data-path='root/first' class='folder'> <p>first</p></ul>\
         <li data-path='root/some-sort.c' class='file'><p>some-sort.c</p></li>\
         <ul data-path='root/wallpapers' class='folder'> <p>wallpapers</p>\
         <li data-path='root/wallpapers/wallpapers.png' class='file'><p>wallpapers.png</p></li>\
         <li data-path='root/wallpapers/phone-wallpapers.png' class='file'><p>phone-wallpapers.png</p></li>\
         </ul></ul>"
    );
}

#[test]
fn html_escapes_names() {
    let mut tree = Tree::example();
    tree.insert_file("root/it's <b>.txt").unwrap();
    tree.open_folder("root").unwrap();
    let html = html(&tree);
    assert!(html.contains("<p>it&#39;s &lt;b&gt;.txt</p>"));
    assert!(html.contains("data-path='root/it&#39;s &lt;b&gt;.txt'"));
}

#[test]
fn outline_indents_children() {
    let mut tree = Tree::example();
    tree.open_folder("root").unwrap();
    tree.open_folder("root/first").unwrap();
    assert_eq!(
        outline(&tree),
        "root/\n  first/\n    labs/\n    fk/\n  some-sort.c\n  wallpapers/\n"
    );
}

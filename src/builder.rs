use crate::error::{Error, Result};
use crate::node::{is_valid_name, Folder, Node, NodeKind, SEPARATOR};
use crate::tree::Tree;

/// Declarative description of a node and everything below it.
///
/// Deserializes from `{"type": "FOLDER", "name": "root", "childs": [...]}`.
/// `kind` and `children` are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Description {
    #[serde(rename = "type", alias = "kind")]
    pub kind: NodeKind,
    pub name: String,
    #[serde(default, alias = "childs")]
    pub children: Vec<Description>,
}

impl Description {
    #[must_use]
    pub fn file<S: Into<String>>(name: S) -> Self {
        Self {
            kind: NodeKind::File,
            name: name.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn folder<S: Into<String>>(name: S, children: Vec<Self>) -> Self {
        Self {
            kind: NodeKind::Folder,
            name: name.into(),
            children,
        }
    }
}

/// Top level of a serialized tree: `{"root": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Structure {
    pub root: Description,
}

/// Build a [`Tree`] from its description.
///
/// Every node starts closed and hidden, only the root is visible.
///
/// # Errors
///
/// - [`Error::RootNotFolder`] when the root is described as a file
/// - [`Error::InvalidName`] when a name is empty or contains a `/`
/// - [`Error::DuplicateName`] when two siblings share a name
///
/// # Example
///
/// ```
/// # use folder_tree::{build_tree, Description};
/// let tree = build_tree(&Description::folder(
///     "root",
///     vec![Description::file("some-sort.c")],
/// ))?;
/// assert_eq!(tree.resolve("root/some-sort.c")?.path(), "root/some-sort.c");
/// # Ok::<(), folder_tree::Error>(())
/// ```
pub fn build_tree(description: &Description) -> Result<Tree> {
    if description.kind != NodeKind::Folder {
        return Err(Error::RootNotFolder);
    }
    if !is_valid_name(&description.name) {
        return Err(Error::InvalidName(description.name.clone()));
    }

    let mut root = Folder::root(description.name.clone());
    add_children(&mut root, &description.children)?;
    Ok(Tree::new(root))
}

fn add_children(folder: &mut Folder, children: &[Description]) -> Result<()> {
    for description in children {
        let name = &description.name;
        if !is_valid_name(name) {
            return Err(Error::InvalidName(name.clone()));
        }
        if folder.contains(name) {
            return Err(Error::DuplicateName {
                path: format!("{}{SEPARATOR}{name}", folder.info().path()),
            });
        }

        match folder.add_child(name.clone(), description.kind) {
            Node::Folder(child) => add_children(child, &description.children)?,
            Node::File(file) => {
                if !description.children.is_empty() {
                    log::warn!("ignoring the children of the file {}", file.info().path());
                }
            }
        }
    }
    Ok(())
}

#[cfg(feature = "json")]
impl Tree {
    /// Parse a [`Structure`] from JSON and [build](build_tree) the tree from it.
    ///
    /// # Errors
    ///
    /// [`Error::Description`] when the JSON is malformed or contains an unrecognized node kind.
    /// Otherwise see [`build_tree`].
    pub fn from_json(json: &str) -> Result<Self> {
        let structure = serde_json::from_str::<Structure>(json)?;
        build_tree(&structure.root)
    }
}

#[cfg(test)]
impl Tree {
    pub(crate) fn example() -> Self {
        build_tree(&Description::folder(
            "root",
            vec![
                Description::folder(
                    "first",
                    vec![
                        Description::folder("labs", vec![Description::file("enother-lab.c")]),
                        Description::folder(
                            "fk",
                            vec![
                                Description::file("fk.svg"),
                                Description::file("Дневник самоконтроля.docx"),
                            ],
                        ),
                    ],
                ),
                Description::file("some-sort.c"),
                Description::folder(
                    "wallpapers",
                    vec![
                        Description::file("wallpapers.png"),
                        Description::file("phone-wallpapers.png"),
                    ],
                ),
            ],
        ))
        .expect("example is valid")
    }
}

#[test]
fn example_root_has_three_children_in_order() {
    let tree = Tree::example();
    let names = tree
        .root()
        .children()
        .iter()
        .map(Node::name)
        .collect::<Vec<_>>();
    assert_eq!(names, ["first", "some-sort.c", "wallpapers"]);
    assert_eq!(tree.root().children()[1].path(), "root/some-sort.c");
    assert_eq!(tree.root().children()[1].kind(), NodeKind::File);
}

#[test]
fn built_nodes_are_hidden() {
    let tree = Tree::example();
    assert!(tree.root().is_visible());
    assert!(tree.root().children().iter().all(|child| !child.is_visible()));
}

#[test]
fn root_path_is_its_name() {
    let tree = build_tree(&Description::folder("home", vec![Description::file("a")])).unwrap();
    assert_eq!(tree.root().path(), "home");
    assert_eq!(tree.resolve("home/a").unwrap().path(), "home/a");
}

#[test]
fn root_has_to_be_a_folder() {
    let result = build_tree(&Description::file("root"));
    assert!(matches!(result, Err(Error::RootNotFolder)));
}

#[test]
fn siblings_need_distinct_names() {
    let result = build_tree(&Description::folder(
        "root",
        vec![Description::file("a"), Description::folder("a", vec![])],
    ));
    assert!(matches!(result, Err(Error::DuplicateName { path }) if path == "root/a"));
}

#[test]
fn names_can_not_contain_separator() {
    let result = build_tree(&Description::folder(
        "root",
        vec![Description::file("a/b")],
    ));
    assert!(matches!(result, Err(Error::InvalidName(name)) if name == "a/b"));
}

#[test]
fn children_of_files_are_ignored() {
    let mut file = Description::file("a");
    file.children.push(Description::file("b"));
    let tree = build_tree(&Description::folder("root", vec![file])).unwrap();
    assert_eq!(tree.node_count(), 2);
}

#[cfg(all(test, feature = "json"))]
const ORIGINAL_STRUCTURE: &str = r#"{
    "root": {
        "type": "FOLDER",
        "name": "root",
        "childs": [
            {
                "type": "FOLDER",
                "name": "first",
                "childs": [
                    { "type": "FOLDER", "name": "labs", "childs": [{ "type": "FILE", "name": "enother-lab.c" }] },
                    {
                        "type": "FOLDER",
                        "name": "fk",
                        "childs": [
                            { "type": "FILE", "name": "fk.svg" },
                            { "type": "FILE", "name": "Дневник самоконтроля.docx" }
                        ]
                    }
                ]
            },
            { "type": "FILE", "name": "some-sort.c" },
            {
                "type": "FOLDER",
                "name": "wallpapers",
                "childs": [
                    { "type": "FILE", "name": "wallpapers.png" },
                    { "type": "FILE", "name": "phone-wallpapers.png" }
                ]
            }
        ]
    }
}"#;

#[cfg(feature = "json")]
#[test]
fn from_json_matches_example() {
    let tree = Tree::from_json(ORIGINAL_STRUCTURE).unwrap();
    assert_eq!(tree, Tree::example());
}

#[cfg(feature = "json")]
#[test]
fn from_json_accepts_kind_and_children() {
    let tree = Tree::from_json(
        r#"{"root": {"kind": "FOLDER", "name": "root", "children": [{"kind": "FILE", "name": "x"}]}}"#,
    )
    .unwrap();
    assert_eq!(tree.node_count(), 2);
}

#[cfg(feature = "json")]
#[test]
fn from_json_rejects_unknown_kind() {
    let error = Tree::from_json(r#"{"root": {"type": "LINK", "name": "root"}}"#).unwrap_err();
    assert!(matches!(error, Error::Description(_)));
    assert!(error.to_string().contains("unrecognized node kind"));
}

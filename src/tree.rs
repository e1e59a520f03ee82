use crate::error::{join, Error, Result};
use crate::node::{is_valid_name, Folder, Node, NodeKind, SEPARATOR};

/// Owner of the root [`Folder`] and everything below it.
///
/// Every node is addressed by its path: the names from the root down to the node joined with `/`.
/// The first name is always the name of the root, by convention `root`.
///
/// # Example
///
/// ```
/// # use folder_tree::{Folder, Tree};
/// let mut tree = Tree::new(Folder::root("root"));
/// tree.insert_file("root/notes.txt")?;
/// tree.open_folder("root")?;
/// assert!(tree.resolve("root/notes.txt")?.is_visible());
/// # Ok::<(), folder_tree::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// Create a tree from its root.
    ///
    /// The root is always visible, no matter if it is open or not.
    #[must_use]
    pub fn new(mut root: Folder) -> Self {
        root.set_visible(true);
        Self {
            root: Node::Folder(root),
        }
    }

    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Find the node at the given path.
    ///
    /// # Errors
    ///
    /// [`Error::PathNotFound`] when the first name is not the root,
    /// a name in the middle of the path is a file or a name does not exist.
    pub fn resolve(&self, path: &str) -> Result<&Node> {
        self.resolve_segments(&split(path))
    }

    /// Find the node at the path given as its separate names.
    ///
    /// The segments are only read, they can be reused afterwards.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn resolve_segments<S: AsRef<str>>(&self, segments: &[S]) -> Result<&Node> {
        resolve(&self.root, segments).ok_or_else(|| {
            log::debug!("unable to resolve {}", join(segments));
            Error::path_not_found(segments)
        })
    }

    fn resolve_folder_mut<S: AsRef<str>>(&mut self, segments: &[S]) -> Result<&mut Folder> {
        resolve_mut(&mut self.root, segments)
            .and_then(Node::as_folder_mut)
            .ok_or_else(|| {
                log::debug!("no folder at {}", join(segments));
                Error::path_not_found(segments)
            })
    }

    /// Add a new file. The last name of `full_path` is the name of the file, the rest the folder to put it in.
    ///
    /// # Errors
    ///
    /// - [`Error::PathNotFound`] when the folder does not exist
    /// - [`Error::DuplicateName`] when the folder already has a child with that name
    /// - [`Error::InvalidName`] when the name of the file is empty
    pub fn insert_file(&mut self, full_path: &str) -> Result<&Node> {
        self.insert(full_path, NodeKind::File)
    }

    /// Add a new [`File`](crate::File) or [`Folder`] at `full_path`.
    ///
    /// The new node is hidden until its folder is opened.
    ///
    /// # Errors
    ///
    /// See [`insert_file`](Self::insert_file).
    pub fn insert(&mut self, full_path: &str, kind: NodeKind) -> Result<&Node> {
        let segments = split(full_path);
        let Some((name, folder_path)) = segments.split_last() else {
            return Err(Error::path_not_found(&segments));
        };
        if folder_path.is_empty() {
            log::debug!("{full_path} has no folder to insert into");
            return Err(Error::PathNotFound {
                path: full_path.to_owned(),
            });
        }

        let folder = self.resolve_folder_mut(folder_path)?;
        if !is_valid_name(name) {
            return Err(Error::InvalidName((*name).to_owned()));
        }
        if folder.contains(name) {
            log::debug!("{full_path} already exists");
            return Err(Error::DuplicateName {
                path: full_path.to_owned(),
            });
        }

        log::debug!("insert {kind} {full_path}");
        Ok(&*folder.add_child(*name, kind))
    }

    /// Open the folder at `path` making its direct children visible.
    ///
    /// Nested folders keep their state.
    ///
    /// # Errors
    ///
    /// [`Error::PathNotFound`] when there is no folder at `path`.
    pub fn open_folder(&mut self, path: &str) -> Result<()> {
        log::debug!("open {path}");
        self.resolve_folder_mut(&split(path))?.open();
        Ok(())
    }

    /// Close the folder at `path` together with every folder below it.
    ///
    /// Afterwards nothing below `path` is visible.
    ///
    /// # Errors
    ///
    /// [`Error::PathNotFound`] when there is no folder at `path`.
    pub fn close_folder_recursive(&mut self, path: &str) -> Result<()> {
        log::debug!("close {path} recursively");
        collapse(self.resolve_folder_mut(&split(path))?);
        Ok(())
    }

    /// Collapse the whole tree. Only the root stays visible.
    pub fn close_all(&mut self) {
        log::debug!("close everything");
        if let Node::Folder(root) = &mut self.root {
            collapse(root);
        }
    }

    /// Close an open folder recursively or open a closed one.
    ///
    /// Returns whether the folder is open afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::PathNotFound`] when there is no folder at `path`.
    pub fn toggle_folder(&mut self, path: &str) -> Result<bool> {
        if self.is_open(path)? {
            self.close_folder_recursive(path)?;
            Ok(false)
        } else {
            self.open_folder(path)?;
            Ok(true)
        }
    }

    /// # Errors
    ///
    /// [`Error::PathNotFound`] when there is no folder at `path`.
    pub fn is_open(&self, path: &str) -> Result<bool> {
        self.resolve(path)?
            .as_folder()
            .map(Folder::is_open)
            .ok_or_else(|| Error::PathNotFound {
                path: path.to_owned(),
            })
    }

    /// Amount of nodes including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            1 + node.children().iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }
}

fn split(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).collect()
}

fn resolve<'node, S: AsRef<str>>(node: &'node Node, segments: &[S]) -> Option<&'node Node> {
    let (first, rest) = segments.split_first()?;
    if node.name() != first.as_ref() {
        return None;
    }
    descend(node, rest)
}

fn descend<'node, S: AsRef<str>>(node: &'node Node, rest: &[S]) -> Option<&'node Node> {
    let Some((next, rest)) = rest.split_first() else {
        return Some(node);
    };
    let child = node.as_folder()?.child(next.as_ref())?;
    descend(child, rest)
}

fn resolve_mut<'node, S: AsRef<str>>(
    node: &'node mut Node,
    segments: &[S],
) -> Option<&'node mut Node> {
    let (first, rest) = segments.split_first()?;
    if node.name() != first.as_ref() {
        return None;
    }
    descend_mut(node, rest)
}

fn descend_mut<'node, S: AsRef<str>>(
    node: &'node mut Node,
    rest: &[S],
) -> Option<&'node mut Node> {
    let Some((next, rest)) = rest.split_first() else {
        return Some(node);
    };
    let child = node
        .as_folder_mut()?
        .children_mut()
        .iter_mut()
        .find(|child| child.name() == next.as_ref())?;
    descend_mut(child, rest)
}

/// Post-order: children are closed before their folder.
fn collapse(folder: &mut Folder) {
    for child in folder.children_mut() {
        if let Node::Folder(child) = child {
            collapse(child);
        }
    }
    folder.close();
}

#[cfg(test)]
fn all_paths(node: &Node) -> Vec<String> {
    let mut result = vec![node.path().to_owned()];
    for child in node.children() {
        result.extend(all_paths(child));
    }
    result
}

#[test]
fn root_is_visible_and_closed() {
    let tree = Tree::example();
    assert!(tree.root().is_visible());
    assert!(!tree.is_open("root").unwrap());
    assert_eq!(tree.node_count(), 11);
}

#[test]
fn every_path_resolves_to_its_node() {
    let tree = Tree::example();
    for path in all_paths(tree.root()) {
        assert_eq!(tree.resolve(&path).unwrap().path(), path);
    }
}

#[test]
fn resolve_does_not_consume_segments() {
    let tree = Tree::example();
    let segments = vec!["root", "first", "fk"];
    let first = tree.resolve_segments(&segments).unwrap().path().to_owned();
    let second = tree.resolve_segments(&segments).unwrap().path().to_owned();
    assert_eq!(first, second);
    assert_eq!(segments.len(), 3);
}

#[test]
fn resolve_fails_on_wrong_root() {
    let tree = Tree::example();
    let error = tree.resolve("home/first").unwrap_err();
    assert!(matches!(error, Error::PathNotFound { path } if path == "home/first"));
}

#[test]
fn resolve_fails_through_a_file() {
    let tree = Tree::example();
    assert!(tree.resolve("root/some-sort.c").is_ok());
    assert!(matches!(
        tree.resolve("root/some-sort.c/inner"),
        Err(Error::PathNotFound { .. })
    ));
}

#[test]
fn resolve_fails_on_missing_child() {
    let tree = Tree::example();
    assert!(tree.resolve("root/first/nope").is_err());
    assert!(tree.resolve("").is_err());
    assert!(tree.resolve("root/").is_err());
    assert!(tree.resolve_segments::<&str>(&[]).is_err());
}

#[test]
fn insert_file_appends_to_folder() {
    let mut tree = Tree::example();
    let inserted = tree.insert_file("root/first/labs/new.c").unwrap();
    assert_eq!(inserted.path(), "root/first/labs/new.c");
    assert_eq!(inserted.kind(), NodeKind::File);
    assert!(!inserted.is_visible());

    let labs = tree.resolve("root/first/labs").unwrap();
    let names = labs.children().iter().map(Node::name).collect::<Vec<_>>();
    assert_eq!(names, ["enother-lab.c", "new.c"]);
}

#[test]
fn insert_file_twice_reports_duplicate() {
    let mut tree = Tree::example();
    tree.insert_file("root/first/labs/new.c").unwrap();
    let before = tree.clone();
    let error = tree.insert_file("root/first/labs/new.c").unwrap_err();
    assert!(matches!(error, Error::DuplicateName { .. }));
    assert_eq!(tree, before);
    assert_eq!(tree.resolve("root/first/labs").unwrap().children().len(), 2);
}

#[test]
fn insert_into_missing_folder_changes_nothing() {
    let mut tree = Tree::example();
    let before = tree.clone();
    assert!(matches!(
        tree.insert_file("root/nope/new.c"),
        Err(Error::PathNotFound { path }) if path == "root/nope"
    ));
    assert!(tree.insert_file("root/some-sort.c/new.c").is_err());
    assert!(tree.insert_file("new.c").is_err());
    assert_eq!(tree, before);
}

#[test]
fn insert_without_folder_reports_whole_path() {
    let mut tree = Tree::example();
    let before = tree.clone();
    let error = tree.insert_file("root").unwrap_err();
    assert!(matches!(&error, Error::PathNotFound { path } if path == "root"));
    assert_eq!(error.to_string(), "Path is not correct: root");
    assert_eq!(tree, before);
}

#[test]
fn insert_folder_duplicate_is_reported() {
    let mut tree = Tree::example();
    let error = tree.insert("root/first", NodeKind::Folder).unwrap_err();
    assert_eq!(error.to_string(), "Name already exists: root/first");
}

#[test]
fn insert_rejects_empty_name() {
    let mut tree = Tree::example();
    assert!(matches!(
        tree.insert_file("root/first/"),
        Err(Error::InvalidName(_))
    ));
}

#[test]
fn insert_folder_can_hold_files() {
    let mut tree = Tree::example();
    tree.insert("root/docs", NodeKind::Folder).unwrap();
    tree.insert_file("root/docs/readme.md").unwrap();
    assert_eq!(
        tree.resolve("root/docs/readme.md").unwrap().path(),
        "root/docs/readme.md"
    );
}

#[test]
fn open_folder_is_shallow() {
    let mut tree = Tree::example();
    tree.open_folder("root").unwrap();
    tree.open_folder("root/first").unwrap();
    tree.open_folder("root/first/fk").unwrap();
    tree.close_folder_recursive("root/first").unwrap();

    tree.open_folder("root/first").unwrap();
    assert!(tree.is_open("root/first").unwrap());
    for child in tree.resolve("root/first").unwrap().children() {
        assert!(child.is_visible());
        assert!(!child.as_folder().unwrap().is_open());
        for grandchild in child.children() {
            assert!(!grandchild.is_visible());
        }
    }
}

#[test]
fn open_folder_keeps_grandchildren() {
    let mut tree = Tree::example();
    tree.open_folder("root/first/fk").unwrap();
    tree.open_folder("root/first").unwrap();
    assert!(tree.is_open("root/first/fk").unwrap());
    assert!(tree.resolve("root/first/fk/fk.svg").unwrap().is_visible());
    assert!(!tree.is_open("root/first/labs").unwrap());
}

#[test]
fn close_folder_recursive_hides_subtree() {
    let mut tree = Tree::example();
    for path in ["root", "root/first", "root/first/labs", "root/first/fk"] {
        tree.open_folder(path).unwrap();
    }
    tree.close_folder_recursive("root/first").unwrap();

    let first = tree.resolve("root/first").unwrap();
    assert!(first.is_visible());
    assert!(!first.as_folder().unwrap().is_open());
    for path in all_paths(first).iter().skip(1) {
        let node = tree.resolve(path).unwrap();
        assert!(!node.is_visible(), "{path} should be hidden");
        if let Some(folder) = node.as_folder() {
            assert!(!folder.is_open(), "{path} should be closed");
        }
    }
    assert!(tree.resolve("root/wallpapers").unwrap().is_visible());
}

#[test]
fn open_and_close_need_a_folder() {
    let mut tree = Tree::example();
    let before = tree.clone();
    assert!(tree.open_folder("root/some-sort.c").is_err());
    assert!(tree.close_folder_recursive("root/nope").is_err());
    assert!(tree.is_open("root/some-sort.c").is_err());
    assert_eq!(tree, before);
}

#[test]
fn close_all_keeps_only_root_visible() {
    let mut tree = Tree::example();
    for path in ["root", "root/first", "root/first/fk", "root/wallpapers"] {
        tree.open_folder(path).unwrap();
    }
    tree.close_all();
    assert!(tree.root().is_visible());
    assert!(!tree.is_open("root").unwrap());
    for path in all_paths(tree.root()).iter().skip(1) {
        assert!(!tree.resolve(path).unwrap().is_visible(), "{path} should be hidden");
    }
}

#[test]
fn toggle_folder_switches_state() {
    let mut tree = Tree::example();
    assert!(tree.toggle_folder("root").unwrap());
    assert!(tree.toggle_folder("root/first").unwrap());
    assert!(!tree.toggle_folder("root").unwrap());
    assert!(!tree.is_open("root/first").unwrap());
    assert!(tree.root().is_visible());
}

use std::str::FromStr;

use crate::error::Error;

/// Separator between the names of a path.
pub const SEPARATOR: char = '/';

/// The two kinds of [`Node`]s.
///
/// Written as `FILE` and `FOLDER` in tree descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum NodeKind {
    File,
    Folder,
}

impl NodeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "FILE",
            Self::Folder => "FOLDER",
        }
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FILE" => Ok(Self::File),
            "FOLDER" => Ok(Self::Folder),
            _ => Err(Error::UnknownKind(s.to_owned())),
        }
    }
}

impl TryFrom<String> for NodeKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl core::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name is a single path segment: not empty and without [`SEPARATOR`].
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(SEPARATOR)
}

/// Identity shared by [`File`]s and [`Folder`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    name: String,
    path: String,
    visible: bool,
}

impl NodeInfo {
    /// New nodes start hidden.
    fn new(name: String, path: String) -> Self {
        Self {
            name,
            path,
            visible: false,
        }
    }

    fn child_of(parent_path: &str, name: String) -> Self {
        let path = format!("{parent_path}{SEPARATOR}{name}");
        Self::new(name, path)
    }

    /// Name of the node, unique among its siblings.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path from the root to this node.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether every folder above this node is open.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}

/// A leaf of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    info: NodeInfo,
}

impl File {
    #[must_use]
    pub const fn info(&self) -> &NodeInfo {
        &self.info
    }
}

/// A node holding an ordered list of children which can be opened and closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    info: NodeInfo,
    children: Vec<Node>,
    open: bool,
}

impl Folder {
    /// Create a closed folder which is the root of its own tree.
    ///
    /// The path of a root is its name.
    #[must_use]
    pub fn root<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        Self {
            info: NodeInfo::new(name.clone(), name),
            children: Vec::new(),
            open: false,
        }
    }

    #[must_use]
    pub const fn info(&self) -> &NodeInfo {
        &self.info
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// First child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name() == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Open the folder and show its direct children.
    ///
    /// Only one level is affected: grandchildren keep whatever visibility they had.
    pub fn open(&mut self) {
        self.open = true;
        for child in &mut self.children {
            child.set_visible(true);
        }
    }

    /// Close the folder and hide its direct children.
    ///
    /// Use [`Tree::close_folder_recursive`](crate::Tree::close_folder_recursive) to collapse a whole subtree.
    pub fn close(&mut self) {
        self.open = false;
        for child in &mut self.children {
            child.set_visible(false);
        }
    }

    /// Append a new, hidden child below this folder.
    ///
    /// Sibling names are not checked here, [`Tree::insert`](crate::Tree::insert) takes care of that.
    pub fn add_child<S: Into<String>>(&mut self, name: S, kind: NodeKind) -> &mut Node {
        let info = NodeInfo::child_of(&self.info.path, name.into());
        let node = match kind {
            NodeKind::File => Node::File(File { info }),
            NodeKind::Folder => Node::Folder(Self {
                info,
                children: Vec::new(),
                open: false,
            }),
        };
        self.children.push(node);
        let index = self.children.len() - 1;
        &mut self.children[index]
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.info.visible = visible;
    }
}

/// Any entry of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File(File),
    Folder(Folder),
}

impl Node {
    #[must_use]
    pub const fn info(&self) -> &NodeInfo {
        match self {
            Self::File(file) => file.info(),
            Self::Folder(folder) => folder.info(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.info().name()
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.info().path()
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.info().is_visible()
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::File(_) => NodeKind::File,
            Self::Folder(_) => NodeKind::Folder,
        }
    }

    #[must_use]
    pub const fn as_folder(&self) -> Option<&Folder> {
        match self {
            Self::Folder(folder) => Some(folder),
            Self::File(_) => None,
        }
    }

    pub fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            Self::Folder(folder) => Some(folder),
            Self::File(_) => None,
        }
    }

    /// Children of a folder, nothing for a file.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        self.as_folder().map_or(&[], Folder::children)
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        match self {
            Self::File(file) => file.info.visible = visible,
            Self::Folder(folder) => folder.set_visible(visible),
        }
    }
}

#[cfg(test)]
fn example_folder() -> Folder {
    let mut root = Folder::root("root");
    root.add_child("a.txt", NodeKind::File);
    let sub = root
        .add_child("sub", NodeKind::Folder)
        .as_folder_mut()
        .unwrap();
    sub.add_child("b.txt", NodeKind::File);
    root
}

#[test]
fn kind_parses_upper_case_names() {
    assert_eq!("FILE".parse::<NodeKind>().unwrap(), NodeKind::File);
    assert_eq!("FOLDER".parse::<NodeKind>().unwrap(), NodeKind::Folder);
    assert_eq!(NodeKind::Folder.to_string(), "FOLDER");
}

#[test]
fn kind_rejects_unknown_names() {
    let error = "LINK".parse::<NodeKind>().unwrap_err();
    assert!(matches!(&error, Error::UnknownKind(kind) if kind == "LINK"));
    assert_eq!(error.to_string(), "unrecognized node kind \"LINK\"");
}

#[test]
fn names_are_single_segments() {
    assert!(is_valid_name("fk.svg"));
    assert!(is_valid_name("Дневник самоконтроля.docx"));
    assert!(!is_valid_name(""));
    assert!(!is_valid_name("a/b"));
}

#[test]
fn add_child_computes_path() {
    let root = example_folder();
    assert_eq!(root.info().path(), "root");
    let sub = root.child("sub").unwrap();
    assert_eq!(sub.path(), "root/sub");
    assert_eq!(sub.children()[0].path(), "root/sub/b.txt");
    assert_eq!(sub.kind(), NodeKind::Folder);
}

#[test]
fn add_child_does_not_check_names() {
    let mut root = Folder::root("root");
    root.add_child("same", NodeKind::File);
    root.add_child("same", NodeKind::Folder);
    assert_eq!(root.children().len(), 2);
    assert_eq!(root.child("same").unwrap().kind(), NodeKind::File);
}

#[test]
fn new_nodes_are_closed_and_hidden() {
    let root = example_folder();
    assert!(!root.is_open());
    assert!(root.children().iter().all(|child| !child.is_visible()));
    assert!(!root.child("sub").unwrap().as_folder().unwrap().is_open());
}

#[test]
fn open_shows_one_level() {
    let mut root = example_folder();
    root.open();
    assert!(root.is_open());
    assert!(root.children().iter().all(Node::is_visible));
    let sub = root.child("sub").unwrap();
    assert!(!sub.children()[0].is_visible());
}

#[test]
fn close_twice_is_a_noop() {
    let mut root = example_folder();
    root.open();
    root.close();
    let once = root.clone();
    root.close();
    assert_eq!(root, once);
    assert!(!root.is_open());
    assert!(root.children().iter().all(|child| !child.is_visible()));
}

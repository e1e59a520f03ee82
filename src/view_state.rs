use crate::error::Result;
use crate::flatten::flatten;
use crate::node::{Node, SEPARATOR};
use crate::tree::Tree;

/// Keeps the state of what is currently selected in a [`TreeView`](crate::TreeView) and how far it is scrolled.
///
/// Which folders are open is part of the [`Tree`] itself.
/// The selection is the path of a node.
///
/// # Example
///
/// ```
/// # use folder_tree::{Folder, Tree, ViewState};
/// let mut tree = Tree::new(Folder::root("root"));
/// let mut state = ViewState::default();
/// state.select_first(&tree);
/// assert_eq!(state.selected(), Some("root"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ViewState {
    pub(super) offset: usize,
    pub(super) selected: Option<String>,
    pub(super) ensure_selected_in_view_on_next_render: bool,
}

impl ViewState {
    #[must_use]
    pub const fn get_offset(&self) -> usize {
        self.offset
    }

    /// Path of the selected node.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selects the given path.
    ///
    /// Returns `true` when the selection changed.
    ///
    /// Clear the selection by passing `None`:
    ///
    /// ```rust
    /// # use folder_tree::ViewState;
    /// # let mut state = ViewState::default();
    /// state.select(None);
    /// ```
    pub fn select(&mut self, path: Option<String>) -> bool {
        self.ensure_selected_in_view_on_next_render = true;
        let changed = self.selected != path;
        self.selected = path;
        changed
    }

    /// Toggles the currently selected folder.
    /// See also [`Tree::toggle_folder`].
    ///
    /// Returns `true` when a folder is opened / closed.
    /// Returns `false` when nothing or a file is selected.
    ///
    /// # Errors
    ///
    /// [`Error::PathNotFound`](crate::Error::PathNotFound) when the selected path does not exist in the `tree`.
    pub fn toggle_selected(&mut self, tree: &mut Tree) -> Result<bool> {
        self.ensure_selected_in_view_on_next_render = true;
        let Some(path) = self.selected.as_deref() else {
            return Ok(false);
        };
        if tree.resolve(path)?.as_folder().is_none() {
            return Ok(false);
        }
        tree.toggle_folder(path)?;
        Ok(true)
    }

    /// Select the root.
    ///
    /// Returns `true` when the selection changed.
    pub fn select_first(&mut self, tree: &Tree) -> bool {
        self.select(Some(tree.root().path().to_owned()))
    }

    /// Select the last visible node.
    ///
    /// Returns `true` when the selection changed.
    pub fn select_last(&mut self, tree: &Tree) -> bool {
        let new_path = flatten(tree)
            .last()
            .map(|flattened| flattened.path().to_owned());
        self.select(new_path)
    }

    /// Select the node visible on the given index.
    ///
    /// Returns `true` when the selection changed.
    ///
    /// This can be useful for mouse clicks.
    pub fn select_visible_index(&mut self, tree: &Tree, new_index: usize) -> bool {
        let visible = flatten(tree);
        let new_index = new_index.min(visible.len().saturating_sub(1));
        let new_path = visible
            .get(new_index)
            .map(|flattened| flattened.path().to_owned());
        self.select(new_path)
    }

    /// Move the current selection with the direction/amount by the given function.
    ///
    /// Returns `true` when the selection changed.
    ///
    /// # Example
    ///
    /// ```
    /// # use folder_tree::{Folder, Tree, ViewState};
    /// # let tree = Tree::new(Folder::root("root"));
    /// # let mut state = ViewState::default();
    /// // Move the selection one down
    /// state.select_visible_relative(&tree, |current| {
    ///     current.map_or(0, |current| current.saturating_add(1))
    /// });
    /// ```
    pub fn select_visible_relative<F>(&mut self, tree: &Tree, change_function: F) -> bool
    where
        F: FnOnce(Option<usize>) -> usize,
    {
        let visible = flatten(tree);
        let current_index = self.selected.as_deref().and_then(|selected| {
            visible
                .iter()
                .position(|flattened| flattened.path() == selected)
        });
        let new_index = change_function(current_index).min(visible.len().saturating_sub(1));
        let new_path = visible
            .get(new_index)
            .map(|flattened| flattened.path().to_owned());
        self.select(new_path)
    }

    /// Ensure the selected node is visible on next render
    pub fn scroll_selected_into_view(&mut self) {
        self.ensure_selected_in_view_on_next_render = true;
    }

    /// Scroll the specified amount of lines up
    ///
    /// Returns `true` when the scroll position changed.
    /// Returns `false` when the scrolling has reached the top.
    pub fn scroll_up(&mut self, lines: usize) -> bool {
        let before = self.offset;
        self.offset = self.offset.saturating_sub(lines);
        before != self.offset
    }

    /// Scroll the specified amount of lines down
    ///
    /// In contrast to [`scroll_up()`](Self::scroll_up) this can not return whether the view position changed or not as the actual change is determined on render.
    /// Always returns `true`.
    pub fn scroll_down(&mut self, lines: usize) -> bool {
        self.offset = self.offset.saturating_add(lines);
        true
    }

    /// Handles the up arrow key.
    /// Moves up in the current depth or to its parent.
    ///
    /// Returns `true` when the selection changed.
    pub fn key_up(&mut self, tree: &Tree) -> bool {
        self.select_visible_relative(tree, |current| {
            current.map_or(usize::MAX, |current| current.saturating_sub(1))
        })
    }

    /// Handles the down arrow key.
    /// Moves down in the current depth or into a child node.
    ///
    /// Returns `true` when the selection changed.
    pub fn key_down(&mut self, tree: &Tree) -> bool {
        self.select_visible_relative(tree, |current| {
            current.map_or(0, |current| current.saturating_add(1))
        })
    }

    /// Handles the left arrow key.
    /// Closes the selected folder with everything below or moves to its parent.
    ///
    /// Returns `true` when the selection or the open state changed.
    pub fn key_left(&mut self, tree: &mut Tree) -> bool {
        self.ensure_selected_in_view_on_next_render = true;
        let Some(path) = self.selected.clone() else {
            return false;
        };
        let is_open = matches!(tree.resolve(&path), Ok(Node::Folder(folder)) if folder.is_open());
        if is_open {
            return tree.close_folder_recursive(&path).is_ok();
        }
        match path.rsplit_once(SEPARATOR) {
            Some((parent, _)) => self.select(Some(parent.to_owned())),
            None => false,
        }
    }

    /// Handles the right arrow key.
    /// Opens the selected folder.
    ///
    /// Returns `true` if the folder was closed and has been opened.
    /// Returns `false` if it was already open or a file is selected.
    pub fn key_right(&mut self, tree: &mut Tree) -> bool {
        self.ensure_selected_in_view_on_next_render = true;
        let Some(path) = self.selected.as_deref() else {
            return false;
        };
        let is_closed = matches!(tree.resolve(path), Ok(Node::Folder(folder)) if !folder.is_open());
        is_closed && tree.open_folder(path).is_ok()
    }
}

#[test]
fn key_down_walks_visible_nodes() {
    let mut tree = Tree::example();
    tree.open_folder("root").unwrap();
    let mut state = ViewState::default();
    assert!(state.key_down(&tree));
    assert_eq!(state.selected(), Some("root"));
    state.key_down(&tree);
    state.key_down(&tree);
    assert_eq!(state.selected(), Some("root/some-sort.c"));
    state.key_down(&tree);
    assert!(!state.key_down(&tree));
    assert_eq!(state.selected(), Some("root/wallpapers"));
}

#[test]
fn key_up_without_selection_selects_last() {
    let mut tree = Tree::example();
    tree.open_folder("root").unwrap();
    let mut state = ViewState::default();
    state.key_up(&tree);
    assert_eq!(state.selected(), Some("root/wallpapers"));
    state.key_up(&tree);
    assert_eq!(state.selected(), Some("root/some-sort.c"));
}

#[test]
fn key_right_opens_and_key_left_closes() {
    let mut tree = Tree::example();
    let mut state = ViewState::default();
    state.select_first(&tree);
    assert!(state.key_right(&mut tree));
    assert!(!state.key_right(&mut tree));
    state.key_down(&tree);
    assert!(state.key_right(&mut tree));
    assert!(tree.is_open("root/first").unwrap());

    // first is open: close it, then move to the parent
    assert!(state.key_left(&mut tree));
    assert!(!tree.is_open("root/first").unwrap());
    assert_eq!(state.selected(), Some("root/first"));
    assert!(state.key_left(&mut tree));
    assert_eq!(state.selected(), Some("root"));
}

#[test]
fn key_left_on_closed_root_does_nothing() {
    let mut tree = Tree::example();
    let mut state = ViewState::default();
    state.select_first(&tree);
    assert!(!state.key_left(&mut tree));
}

#[test]
fn toggle_selected_ignores_files() {
    let mut tree = Tree::example();
    tree.open_folder("root").unwrap();
    let mut state = ViewState::default();
    state.select(Some("root/some-sort.c".to_owned()));
    assert!(!state.toggle_selected(&mut tree).unwrap());
    state.select(Some("root/wallpapers".to_owned()));
    assert!(state.toggle_selected(&mut tree).unwrap());
    assert!(tree.is_open("root/wallpapers").unwrap());
}

#[test]
fn toggle_selected_reports_missing_path() {
    let mut tree = Tree::example();
    let mut state = ViewState::default();
    state.select(Some("root/nope".to_owned()));
    assert!(state.toggle_selected(&mut tree).is_err());
}

#[test]
fn select_visible_index_clamps() {
    let tree = Tree::example();
    let mut state = ViewState::default();
    state.select_visible_index(&tree, 42);
    assert_eq!(state.selected(), Some("root"));
}

#[test]
fn scroll_up_stops_at_top() {
    let mut state = ViewState::default();
    assert!(!state.scroll_up(1));
    assert!(state.scroll_down(3));
    assert!(state.scroll_up(1));
    assert_eq!(state.get_offset(), 2);
}

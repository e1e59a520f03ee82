use crate::error::Result;
use crate::flatten::flatten;
use crate::render;
use crate::tree::Tree;
use crate::view_state::ViewState;

/// Everything an interactive view of a [`Tree`] needs: the tree, the [`ViewState`], the path input line and the last notification for the user.
///
/// Errors caused by user input ([`Error::is_user_facing`](crate::Error::is_user_facing)) do not end up as `Err`.
/// They become the [`notification`](Self::notification) and the tree stays unchanged.
///
/// # Example
///
/// ```
/// # use folder_tree::{App, Folder, Tree};
/// let mut app = App::new(Tree::new(Folder::root("root")));
/// app.input_mut().push_str("root/notes.txt");
/// app.submit()?;
/// assert!(app.tree().resolve("root/notes.txt").is_ok());
///
/// app.input_mut().push_str("root/notes.txt");
/// app.submit()?;
/// assert_eq!(app.notification(), Some("Name already exists: root/notes.txt"));
/// # Ok::<(), folder_tree::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct App {
    tree: Tree,
    state: ViewState,
    input: String,
    notification: Option<String>,
}

impl App {
    #[must_use]
    pub fn new(tree: Tree) -> Self {
        Self {
            tree,
            state: ViewState::default(),
            input: String::new(),
            notification: None,
        }
    }

    /// # Errors
    ///
    /// See [`Tree::from_json`].
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(Tree::from_json(json)?))
    }

    #[must_use]
    pub const fn tree(&self) -> &Tree {
        &self.tree
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Tree and view state at once, for rendering a [`TreeView`](crate::TreeView).
    pub fn view_mut(&mut self) -> (&Tree, &mut ViewState) {
        (&self.tree, &mut self.state)
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    #[must_use]
    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// The visible part of the tree as HTML.
    #[must_use]
    pub fn html(&self) -> String {
        render::html(&self.tree)
    }

    /// A folder was clicked: close it recursively when it is open, open it otherwise.
    ///
    /// The path of the folder is copied into the input to make inserting into it easier.
    ///
    /// # Errors
    ///
    /// Only errors which are not caused by user input.
    pub fn click(&mut self, path: &str) -> Result<()> {
        let result = self.tree.toggle_folder(path);
        if self.report(result)?.is_some() {
            self.input = path.to_owned();
            self.state.select(Some(path.to_owned()));
        }
        Ok(())
    }

    /// A visible row was clicked, counted from the top of the rendered list.
    ///
    /// Rows below the last visible node are ignored.
    ///
    /// # Errors
    ///
    /// Only errors which are not caused by user input.
    pub fn click_row(&mut self, row: usize) -> Result<()> {
        let index = self.state.get_offset().saturating_add(row);
        if index >= flatten(&self.tree).len() {
            return Ok(());
        }
        self.state.select_visible_index(&self.tree, index);
        self.toggle_selected()
    }

    /// Toggles the folder selected in the [`ViewState`].
    ///
    /// # Errors
    ///
    /// Only errors which are not caused by user input.
    pub fn toggle_selected(&mut self) -> Result<()> {
        let Some(path) = self.state.selected().map(ToOwned::to_owned) else {
            return Ok(());
        };
        if self.tree.resolve(&path).is_ok_and(|node| node.as_folder().is_some()) {
            self.click(&path)?;
        }
        Ok(())
    }

    /// See [`ViewState::key_left`].
    pub fn key_left(&mut self) -> bool {
        self.state.key_left(&mut self.tree)
    }

    /// See [`ViewState::key_right`].
    pub fn key_right(&mut self) -> bool {
        self.state.key_right(&mut self.tree)
    }

    /// Insert a file at the path in the input.
    ///
    /// Afterwards the input is empty and the whole tree is collapsed.
    ///
    /// # Errors
    ///
    /// Only errors which are not caused by user input.
    pub fn submit(&mut self) -> Result<()> {
        let path = std::mem::take(&mut self.input);
        let result = self.tree.insert_file(&path).map(|_| ());
        if self.report(result)?.is_some() {
            log::info!("created {path}");
        }

        self.tree.close_all();
        self.state.select_first(&self.tree);
        Ok(())
    }

    /// Turns user-facing errors into the notification.
    fn report<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => {
                self.notification = None;
                Ok(Some(value))
            }
            Err(error) if error.is_user_facing() => {
                log::warn!("{error}");
                self.notification = Some(error.to_string());
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
fn example_app() -> App {
    App::new(Tree::example())
}

#[test]
fn click_toggles_and_fills_input() {
    let mut app = example_app();
    app.click("root").unwrap();
    assert!(app.tree().is_open("root").unwrap());
    assert_eq!(app.input(), "root");
    app.click("root/first").unwrap();
    app.click("root").unwrap();
    assert!(!app.tree().is_open("root").unwrap());
    assert!(!app.tree().is_open("root/first").unwrap());
    assert_eq!(app.notification(), None);
}

#[test]
fn click_on_wrong_path_notifies() {
    let mut app = example_app();
    let before = app.tree().clone();
    app.click("root/nope").unwrap();
    assert_eq!(app.notification(), Some("Path is not correct: root/nope"));
    assert_eq!(app.input(), "");
    assert_eq!(app.tree(), &before);
}

#[test]
fn submit_inserts_and_collapses() {
    let mut app = example_app();
    app.click("root").unwrap();
    app.click("root/first").unwrap();
    app.input_mut().push_str("/labs/new.c");
    assert_eq!(app.input(), "root/first/labs/new.c");
    app.submit().unwrap();

    assert_eq!(app.input(), "");
    assert_eq!(app.notification(), None);
    assert_eq!(
        app.tree().resolve("root/first/labs/new.c").unwrap().path(),
        "root/first/labs/new.c"
    );
    assert!(!app.tree().is_open("root").unwrap());
    assert_eq!(app.state().selected(), Some("root"));
}

#[test]
fn submit_duplicate_notifies() {
    let mut app = example_app();
    app.input_mut().push_str("root/some-sort.c");
    app.submit().unwrap();
    assert_eq!(
        app.notification(),
        Some("Name already exists: root/some-sort.c")
    );
    assert_eq!(app.tree().root().children().len(), 3);
    app.dismiss_notification();
    assert_eq!(app.notification(), None);
}

#[test]
fn click_row_below_the_list_does_nothing() {
    let mut app = example_app();
    app.click("root").unwrap();
    let before = app.tree().clone();
    app.view_mut().1.select(Some("root/some-sort.c".to_owned()));
    app.click_row(10).unwrap();
    assert_eq!(app.tree(), &before);
    assert_eq!(app.state().selected(), Some("root/some-sort.c"));
    assert!(app.tree().is_open("root").unwrap());
}

#[test]
fn click_row_toggles_the_folder_on_that_row() {
    let mut app = example_app();
    app.click_row(0).unwrap();
    assert!(app.tree().is_open("root").unwrap());
    app.click_row(1).unwrap();
    assert!(app.tree().is_open("root/first").unwrap());
    assert_eq!(app.state().selected(), Some("root/first"));
}

#[test]
fn toggle_selected_only_toggles_folders() {
    let mut app = example_app();
    app.click("root").unwrap();
    app.view_mut().1.select(Some("root/some-sort.c".to_owned()));
    app.toggle_selected().unwrap();
    assert_eq!(app.input(), "root");
    app.view_mut().1.select(Some("root/wallpapers".to_owned()));
    app.toggle_selected().unwrap();
    assert!(app.tree().is_open("root/wallpapers").unwrap());
}

#[test]
fn arrow_keys_open_and_close() {
    let mut app = example_app();
    app.view_mut().1.select(Some("root".to_owned()));
    assert!(app.key_right());
    assert!(app.tree().is_open("root").unwrap());
    assert!(app.key_left());
    assert!(!app.tree().is_open("root").unwrap());
}

#[test]
fn html_follows_clicks() {
    let mut app = example_app();
    assert!(!app.html().contains("some-sort.c"));
    app.click("root").unwrap();
    assert!(app.html().contains("data-path='root/some-sort.c'"));
}

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]

/*!
In-memory folder tree with expand/collapse state.

A [`Tree`] owns a root [`Folder`] which holds [`File`]s and further [`Folder`]s.
Every node is addressed by its path like `root/first/labs`.
Folders can be opened (showing their direct children) and closed recursively (hiding everything below them).
New files are inserted by their full path.

Trees are built from a [`Description`] with [`build_tree`] or parsed from JSON with [`Tree::from_json`].

The visible part of a tree can be shown with the ratatui widget [`TreeView`] or as text with the functions in [`render`].
[`App`] ties a tree to a view and maps user interactions onto tree operations.
*/

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Scrollbar, ScrollbarState, StatefulWidget, Widget};
use unicode_width::UnicodeWidthStr;

mod app;
mod builder;
mod error;
mod flatten;
mod node;
pub mod render;
mod tree;
mod view_state;

pub use crate::app::App;
pub use crate::builder::{build_tree, Description, Structure};
pub use crate::error::{Error, Result};
pub use crate::flatten::{flatten, Flattened};
pub use crate::node::{is_valid_name, File, Folder, Node, NodeInfo, NodeKind, SEPARATOR};
pub use crate::tree::Tree;
pub use crate::view_state::ViewState;

/// A view on a [`Tree`] which can be rendered.
///
/// Only visible nodes are shown.
/// The selection and the scroll position are kept in the [`ViewState`].
///
/// # Example
///
/// ```
/// # use folder_tree::{Folder, Tree, TreeView, ViewState};
/// # use ratatui::backend::TestBackend;
/// # use ratatui::Terminal;
/// # use ratatui::widgets::Block;
/// # let mut terminal = Terminal::new(TestBackend::new(32, 32)).unwrap();
/// let tree = Tree::new(Folder::root("root"));
/// let mut state = ViewState::default();
///
/// terminal.draw(|frame| {
///     let area = frame.size();
///
///     let widget = TreeView::new(&tree).block(Block::bordered().title("Folders"));
///
///     frame.render_stateful_widget(widget, area, &mut state);
/// })?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TreeView<'a> {
    tree: &'a Tree,

    block: Option<Block<'a>>,
    scrollbar: Option<Scrollbar<'a>>,
    /// Style used as a base style for the widget
    style: Style,

    /// Style used to render selected node
    highlight_style: Style,
    /// Symbol in front of the selected node (Shift all nodes to the right)
    highlight_symbol: &'a str,

    /// Symbol displayed in front of a closed folder
    node_closed_symbol: &'a str,
    /// Symbol displayed in front of an open folder
    node_open_symbol: &'a str,
    /// Symbol displayed in front of a file
    node_no_children_symbol: &'a str,
}

impl<'a> TreeView<'a> {
    #[must_use]
    pub const fn new(tree: &'a Tree) -> Self {
        Self {
            tree,
            block: None,
            scrollbar: None,
            style: Style::new(),
            highlight_style: Style::new(),
            highlight_symbol: "",
            node_closed_symbol: "\u{25b6} ", // Arrow to right
            node_open_symbol: "\u{25bc} ",   // Arrow down
            node_no_children_symbol: "  ",
        }
    }

    #[allow(clippy::missing_const_for_fn)]
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Show the scrollbar when rendering this widget.
    ///
    /// Experimental: Can change on any release without any additional notice.
    #[must_use]
    pub const fn experimental_scrollbar(mut self, scrollbar: Option<Scrollbar<'a>>) -> Self {
        self.scrollbar = scrollbar;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    #[must_use]
    pub const fn highlight_symbol(mut self, highlight_symbol: &'a str) -> Self {
        self.highlight_symbol = highlight_symbol;
        self
    }

    #[must_use]
    pub const fn node_closed_symbol(mut self, symbol: &'a str) -> Self {
        self.node_closed_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn node_open_symbol(mut self, symbol: &'a str) -> Self {
        self.node_open_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn node_no_children_symbol(mut self, symbol: &'a str) -> Self {
        self.node_no_children_symbol = symbol;
        self
    }

    const fn symbol(&self, node: &Node) -> &'a str {
        match node {
            Node::File(_) => self.node_no_children_symbol,
            Node::Folder(folder) if folder.is_open() => self.node_open_symbol,
            Node::Folder(_) => self.node_closed_symbol,
        }
    }
}

impl StatefulWidget for TreeView<'_> {
    type State = ViewState;

    fn render(self, full_area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(full_area, self.style);

        // Get the inner area inside a possible block, otherwise use the full area
        let area = self.block.as_ref().map_or(full_area, |block| {
            let inner_area = block.inner(full_area);
            block.clone().render(full_area, buf);
            inner_area
        });

        if area.width < 1 || area.height < 1 {
            return;
        }

        let visible = flatten(self.tree);
        if visible.is_empty() {
            return;
        }
        let available_height = area.height as usize;

        let ensure_index_in_view = if state.ensure_selected_in_view_on_next_render {
            state.selected().and_then(|selected| {
                visible
                    .iter()
                    .position(|flattened| flattened.path() == selected)
            })
        } else {
            None
        };

        // Ensure last line is still visible
        let mut start = state.offset.min(visible.len().saturating_sub(1));
        if let Some(ensure_index_in_view) = ensure_index_in_view {
            start = start.min(ensure_index_in_view);
        }

        // Every node takes exactly one line
        let mut end = (start + available_height).min(visible.len());
        if let Some(ensure_index_in_view) = ensure_index_in_view {
            if ensure_index_in_view >= end {
                end = ensure_index_in_view + 1;
                start = end.saturating_sub(available_height);
            }
        }
        let height = end - start;

        state.offset = start;
        state.ensure_selected_in_view_on_next_render = false;

        if let Some(scrollbar) = self.scrollbar.clone() {
            let mut scrollbar_state = ScrollbarState::new(visible.len().saturating_sub(height))
                .position(start)
                .viewport_content_length(height);
            let scrollbar_area = Rect {
                // Inner height to be exactly as the content
                y: area.y,
                height: area.height,
                // Outer width to stay on the right border
                x: full_area.x,
                width: full_area.width,
            };
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);
        }

        let blank_symbol = " ".repeat(self.highlight_symbol.width());

        let has_selection = state.selected.is_some();
        #[allow(clippy::cast_possible_truncation)]
        for (line, Flattened { depth, node }) in visible[start..end].iter().enumerate() {
            let x = area.x;
            let y = area.y + line as u16;
            let area = Rect {
                x,
                y,
                width: area.width,
                height: 1,
            };

            buf.set_style(area, self.style);

            let is_selected = state.selected() == Some(node.path());
            let after_highlight_symbol_x = if has_selection {
                let symbol = if is_selected {
                    self.highlight_symbol
                } else {
                    &blank_symbol
                };
                let (x, _) = buf.set_stringn(x, y, symbol, area.width as usize, self.style);
                x
            } else {
                x
            };

            let after_depth_x = {
                let indent_width = depth * 2;
                let (after_indent_x, _) = buf.set_stringn(
                    after_highlight_symbol_x,
                    y,
                    " ".repeat(indent_width),
                    indent_width,
                    self.style,
                );
                let max_width = area.width.saturating_sub(after_indent_x - x);
                let (x, _) = buf.set_stringn(
                    after_indent_x,
                    y,
                    self.symbol(node),
                    max_width as usize,
                    self.style,
                );
                x
            };

            let max_element_width = area.width.saturating_sub(after_depth_x - x);
            buf.set_line(after_depth_x, y, &Line::from(node.name()), max_element_width);
            if is_selected {
                buf.set_style(area, self.highlight_style);
            }
        }
    }
}

impl Widget for TreeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut state = ViewState::default();
        StatefulWidget::render(self, area, buf, &mut state);
    }
}

#[cfg(test)]
fn render_example(tree: &Tree, state: &mut ViewState, area: Rect) -> Buffer {
    let mut buffer = Buffer::empty(area);
    let widget = TreeView::new(tree)
        .highlight_symbol(">> ")
        .node_closed_symbol("+ ")
        .node_open_symbol("- ");
    StatefulWidget::render(widget, area, &mut buffer, state);
    buffer
}

#[test]
fn renders_visible_nodes() {
    let mut tree = Tree::example();
    tree.open_folder("root").unwrap();
    let mut state = ViewState::default();
    state.select(Some("root/first".to_owned()));
    let buffer = render_example(&tree, &mut state, Rect::new(0, 0, 20, 5));
    let expected = Buffer::with_lines(vec![
        "   - root           ",
        ">>   + first        ",
        "       some-sort.c  ",
        "     + wallpapers   ",
        "                    ",
    ]);
    assert_eq!(buffer, expected);
}

#[test]
fn renders_without_selection_column() {
    let tree = Tree::example();
    let mut state = ViewState::default();
    let buffer = render_example(&tree, &mut state, Rect::new(0, 0, 8, 2));
    let expected = Buffer::with_lines(vec!["+ root  ", "        "]);
    assert_eq!(buffer, expected);
}

#[test]
fn render_scrolls_selection_into_view() {
    let mut tree = Tree::example();
    tree.open_folder("root").unwrap();
    tree.open_folder("root/wallpapers").unwrap();
    let mut state = ViewState::default();
    state.select_last(&tree);
    render_example(&tree, &mut state, Rect::new(0, 0, 30, 2));
    assert_eq!(state.get_offset(), 4);
}

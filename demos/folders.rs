use crossterm::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Scrollbar, ScrollbarOrientation};
use ratatui::Terminal;

use folder_tree::{App, TreeView};

const STRUCTURE: &str = r#"{
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

type AnyResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> AnyResult<()> {
    let mut app = App::from_json(STRUCTURE)?;

    if std::env::args().any(|arg| arg == "--print") {
        env_logger::init();
        return print(&mut app);
    }

    // Terminal initialization
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, app);

    // restore terminal
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Walk through a few interactions and print every step.
fn print(app: &mut App) -> AnyResult<()> {
    println!("{}", app.tree());
    for path in ["root", "root/first", "root/first/labs"] {
        app.click(path)?;
    }
    println!("{}", app.tree());

    app.input_mut().push_str("/new.c");
    app.submit()?;
    app.click("root")?;
    println!("{}", app.tree());
    println!("{}", app.html());

    app.input_mut().push_str("root/some-sort.c");
    app.submit()?;
    if let Some(notification) = app.notification() {
        println!("{notification}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> AnyResult<()> {
    let mut editing = false;
    let mut tree_area = Rect::default();
    loop {
        terminal.draw(|frame| {
            let chunks =
                Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).split(frame.size());
            let (tree_chunk, input_chunk) = (chunks[0], chunks[1]);
            tree_area = tree_chunk;

            let title_bottom = app
                .notification()
                .map_or_else(|| "q quit, i insert".to_owned(), ToOwned::to_owned);
            let input_title = if editing { "Path (editing)" } else { "Path" };
            let input = Paragraph::new(app.input().to_owned())
                .block(Block::bordered().title(input_title));
            frame.render_widget(input, input_chunk);

            let (tree, state) = app.view_mut();
            let widget = TreeView::new(tree)
                .block(
                    Block::bordered()
                        .title("Folders")
                        .title_bottom(title_bottom),
                )
                .experimental_scrollbar(Some(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight)
                        .begin_symbol(None)
                        .track_symbol(None)
                        .end_symbol(None),
                ))
                .highlight_style(
                    Style::new()
                        .fg(Color::Black)
                        .bg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol(">> ");
            frame.render_stateful_widget(widget, tree_chunk, state);
        })?;

        match crossterm::event::read()? {
            Event::Key(key) if editing => match key.code {
                KeyCode::Esc => editing = false,
                KeyCode::Enter => {
                    editing = false;
                    app.submit()?;
                }
                KeyCode::Backspace => {
                    app.input_mut().pop();
                }
                KeyCode::Char(char) => app.input_mut().push(char),
                _ => {}
            },
            Event::Key(key) => {
                app.dismiss_notification();
                let (tree, state) = app.view_mut();
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('i') => editing = true,
                    KeyCode::Char('\n' | ' ') | KeyCode::Enter => app.toggle_selected()?,
                    KeyCode::Left => {
                        app.key_left();
                    }
                    KeyCode::Right => {
                        app.key_right();
                    }
                    KeyCode::Down => {
                        state.key_down(tree);
                    }
                    KeyCode::Up => {
                        state.key_up(tree);
                    }
                    KeyCode::Home => {
                        state.select_first(tree);
                    }
                    KeyCode::End => {
                        state.select_last(tree);
                    }
                    KeyCode::PageDown => {
                        state.scroll_down(3);
                    }
                    KeyCode::PageUp => {
                        state.scroll_up(3);
                    }
                    _ => {}
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => {
                    app.view_mut().1.scroll_down(1);
                }
                MouseEventKind::ScrollUp => {
                    app.view_mut().1.scroll_up(1);
                }
                MouseEventKind::Down(MouseButton::Left) => {
                    // One line of border above the first node
                    let Some(row) = mouse.row.checked_sub(tree_area.y + 1) else {
                        continue;
                    };
                    app.click_row(usize::from(row))?;
                }
                _ => {}
            },
            _ => {}
        }
    }
}

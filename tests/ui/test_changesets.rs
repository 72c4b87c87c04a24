//! Changeset list rendering

use ratatui::{Terminal, backend::TestBackend, style::Color};

use hgcomb::model::Notification;
use hgcomb::ui::views::ChangesetListView;

use crate::rows;

fn items(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("User{i} {i} days ago: change number {i}"))
        .collect()
}

fn list(n: usize) -> ChangesetListView {
    let mut view = ChangesetListView::new();
    view.file_label = Some("src/main.rs".to_string());
    view.set_items(items(n));
    view
}

#[test]
fn test_list_title_and_items() {
    let mut view = list(2);
    let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
    terminal
        .draw(|frame| view.render(frame, frame.area(), None))
        .unwrap();

    let rows = rows(&terminal);
    assert!(rows[0].contains(" hgcomb - src/main.rs [2] "));
    assert!(rows[1].starts_with("│User0 0 days ago: change number 0"));
    assert!(rows[2].starts_with("│User1 1 days ago: change number 1"));
}

#[test]
fn test_selected_row_is_highlighted() {
    let mut view = list(3);
    view.select(1);
    let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
    terminal
        .draw(|frame| view.render(frame, frame.area(), None))
        .unwrap();

    let buffer = terminal.backend().buffer();
    assert_ne!(buffer[(1, 2)].bg, Color::Reset);
    assert_eq!(buffer[(1, 1)].bg, Color::Reset);
}

#[test]
fn test_list_scrolls_to_selection() {
    let mut view = list(20);
    view.select(15);
    let mut terminal = Terminal::new(TestBackend::new(60, 7)).unwrap();
    terminal
        .draw(|frame| view.render(frame, frame.area(), None))
        .unwrap();

    // 5 visible rows, the selection is the last of them
    let rows = rows(&terminal);
    assert!(rows[5].contains("change number 15"));
    assert!(rows[1].contains("change number 11"));
}

#[test]
fn test_empty_list() {
    let mut view = list(0);
    let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
    terminal
        .draw(|frame| view.render(frame, frame.area(), None))
        .unwrap();

    let text = rows(&terminal).join("\n");
    assert!(text.contains("No changesets touch this file."));
    assert!(text.contains("[0]"));
}

#[test]
fn test_notification_in_title() {
    let mut view = list(1);
    let mut terminal = Terminal::new(TestBackend::new(80, 5)).unwrap();
    terminal
        .draw(|frame| {
            view.render(
                frame,
                frame.area(),
                Some(&Notification::info("1 changesets")),
            )
        })
        .unwrap();

    let rows = rows(&terminal);
    assert!(rows[0].contains("Info: 1 changesets"));
}

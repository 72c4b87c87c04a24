//! Output panel rendering

use ratatui::{Terminal, backend::TestBackend, style::Color};

use hgcomb::model::{PanelRegistry, Syntax, WriteMode};
use hgcomb::ui::views::PanelView;

use crate::rows;

const DIFF: &str = "\
3:a1b2c3 [Alice 2023-01-01]
 - fix bug
diff -r 000000000000 -r a1b2c3d4e5f6 src/main.rs
--- a/src/main.rs
+++ b/src/main.rs
@@ -1,2 +1,2 @@
-old line
+new line
";

fn panel_with(text: &str, syntax: Syntax) -> PanelView {
    let panels = PanelRegistry::new();
    let handle = panels.create_if_absent("out");
    handle.set_syntax(syntax);
    handle.write(text, WriteMode::Replace);

    let mut view = PanelView::new();
    view.attach(handle);
    view
}

fn draw(view: &mut PanelView, width: u16, height: u16) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| view.render(frame, frame.area(), None))
        .unwrap();
    terminal
}

/// Index of the first row containing `needle`
fn row_of(rows: &[String], needle: &str) -> usize {
    rows.iter()
        .position(|row| row.contains(needle))
        .unwrap_or_else(|| panic!("{needle:?} not drawn"))
}

#[test]
fn test_diff_panel_layout() {
    let mut view = panel_with(DIFF, Syntax::Diff);
    let terminal = draw(&mut view, 60, 14);
    let rows = rows(&terminal);

    assert!(rows[0].contains(" hgcomb - out "));
    assert!(rows[1].contains("src/main.rs [1/1]"));
    assert!(rows[2].contains("3:a1b2c3 [Alice 2023-01-01]"));
}

#[test]
fn test_diff_lines_are_colored() {
    let mut view = panel_with(DIFF, Syntax::Diff);
    let terminal = draw(&mut view, 60, 14);
    let rows = rows(&terminal);
    let buffer = terminal.backend().buffer();

    let added = row_of(&rows, "+new line") as u16;
    let removed = row_of(&rows, "-old line") as u16;
    assert_eq!(buffer[(1, added)].fg, Color::Green);
    assert_eq!(buffer[(1, removed)].fg, Color::Red);
}

#[test]
fn test_plain_panel_has_no_diff_colors() {
    let mut view = panel_with("+not a diff\n", Syntax::Plain);
    let terminal = draw(&mut view, 40, 6);
    let rows = rows(&terminal);
    let buffer = terminal.backend().buffer();

    let row = row_of(&rows, "+not a diff") as u16;
    assert_ne!(buffer[(1, row)].fg, Color::Green);
    // no file context outside diffs
    assert!(!rows[1].contains("(no files)"));
}

#[test]
fn test_empty_panel() {
    let mut view = panel_with("", Syntax::Plain);
    let terminal = draw(&mut view, 50, 8);
    let text = rows(&terminal).join("\n");
    assert!(text.contains("Nothing to show yet."));
}

#[test]
fn test_appended_text_is_picked_up() {
    let panels = PanelRegistry::new();
    let handle = panels.create_if_absent("out");
    handle.write("first\n", WriteMode::Replace);

    let mut view = PanelView::new();
    view.attach(handle.clone());
    draw(&mut view, 40, 8);

    handle.write("second\n", WriteMode::Append);
    let terminal = draw(&mut view, 40, 8);
    let text = rows(&terminal).join("\n");
    assert!(text.contains("second"));
}

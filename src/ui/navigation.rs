//! Cursor and scroll arithmetic shared by the list and the panel
//!
//! Pure functions; the views own the state and apply the results.

/// Index below `selected`, stopping at `last`
pub fn select_next(selected: usize, last: usize) -> usize {
    selected.saturating_add(1).min(last)
}

/// Index above `selected`, stopping at 0
pub fn select_prev(selected: usize) -> usize {
    selected.saturating_sub(1)
}

/// Scroll offset that keeps row `selected` inside a window of `rows` rows
///
/// A zero-height window leaves `offset` alone.
pub fn adjust_scroll(selected: usize, offset: usize, rows: usize) -> usize {
    if rows == 0 {
        return offset;
    }
    if selected < offset {
        selected
    } else if selected >= offset + rows {
        selected + 1 - rows
    } else {
        offset
    }
}

/// Largest offset at which `rows` rows of a `total`-line text are still full
pub fn max_offset(total: usize, rows: usize) -> usize {
    if rows == 0 {
        return 0;
    }
    total.saturating_sub(rows)
}

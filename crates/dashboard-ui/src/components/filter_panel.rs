//! Sidebar with one checkbox list per filter dimension.

use dashboard_core::models::Dimension;
use dashboard_core::selection::FilterSelection;
use dashboard_data::filter::FilterOptions;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::truncate_to_width;
use crate::themes::Theme;

/// Keyboard focus and cursor position within the sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPanelState {
    /// Index into [`Dimension::FILTERABLE`] of the focused list.
    focused: usize,
    /// Cursor row in each list.
    cursors: [usize; Dimension::FILTERABLE.len()],
}

impl FilterPanelState {
    pub fn focused_dimension(&self) -> Dimension {
        Dimension::FILTERABLE[self.focused]
    }

    pub fn cursor(&self) -> usize {
        self.cursors[self.focused]
    }

    pub fn cursor_for(&self, dimension: Dimension) -> usize {
        Dimension::FILTERABLE
            .iter()
            .position(|d| *d == dimension)
            .map_or(0, |i| self.cursors[i])
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % Dimension::FILTERABLE.len();
    }

    pub fn focus_prev(&mut self) {
        let n = Dimension::FILTERABLE.len();
        self.focused = (self.focused + n - 1) % n;
    }

    pub fn move_up(&mut self) {
        let cursor = &mut self.cursors[self.focused];
        *cursor = cursor.saturating_sub(1);
    }

    /// Move down within a list holding `len` values.
    pub fn move_down(&mut self, len: usize) {
        let cursor = &mut self.cursors[self.focused];
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    /// Keep every cursor inside its list after the option lists change.
    pub fn clamp(&mut self, options: &[FilterOptions]) {
        for (cursor, dimension) in self.cursors.iter_mut().zip(Dimension::FILTERABLE) {
            let len = options
                .iter()
                .find(|o| o.dimension == dimension)
                .map_or(0, |o| o.values.len());
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
    }

    /// Value under the cursor in the focused list.
    pub fn current_value<'o>(&self, options: &'o [FilterOptions]) -> Option<&'o str> {
        let dimension = self.focused_dimension();
        options
            .iter()
            .find(|o| o.dimension == dimension)?
            .values
            .get(self.cursor())
            .map(String::as_str)
    }
}

/// Draw the three filter lists stacked vertically in `area`.
pub fn render_filter_panel(
    frame: &mut Frame,
    area: Rect,
    options: &[FilterOptions],
    selection: &FilterSelection,
    state: &FilterPanelState,
    theme: &Theme,
) {
    let sections =
        Layout::vertical(vec![Constraint::Ratio(1, options.len().max(1) as u32); options.len()])
            .split(area);

    for (option, section) in options.iter().zip(sections.iter()) {
        let focused = option.dimension == state.focused_dimension();
        let item_width = section.width.saturating_sub(2 + 4) as usize;

        let items: Vec<ListItem> = option
            .values
            .iter()
            .map(|value| {
                let (mark, style) = if selection.is_selected(option.dimension, value) {
                    ("[x] ", theme.checked)
                } else {
                    ("[ ] ", theme.unchecked)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, style),
                    Span::styled(truncate_to_width(value, item_width), theme.text),
                ]))
            })
            .collect();

        let selected_count = option
            .values
            .iter()
            .filter(|v| selection.is_selected(option.dimension, v))
            .count();
        let title = format!(
            " {} ({}/{}) ",
            option.dimension.label(),
            selected_count,
            option.values.len()
        );

        let mut list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if focused {
                    theme.border_focused
                } else {
                    theme.border
                })
                .title(Span::styled(title, theme.label)),
        );
        if focused {
            list = list.highlight_style(theme.cursor);
        }

        let mut list_state =
            ListState::default().with_selected(Some(state.cursor_for(option.dimension)));
        frame.render_stateful_widget(list, *section, &mut list_state);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

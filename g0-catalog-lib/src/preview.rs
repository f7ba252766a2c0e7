//! Bounded console previews of finding lists.
//!
//! Counts always stay exact; only the number of listed examples is capped.

/// Examples listed per finding category unless configured otherwise.
pub const DEFAULT_SHOW_LIMIT: usize = 12;

/// Line printed in place of the examples that did not fit.
pub const ELLIPSIS_MARKER: &str = "- ...";

/// The first `limit` items of a list and how many were left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview<'a, T> {
    pub shown: &'a [T],
    pub hidden: usize,
}

impl<T> Preview<'_, T> {
    pub fn total(&self) -> usize {
        self.shown.len() + self.hidden
    }

    pub fn is_truncated(&self) -> bool {
        self.hidden > 0
    }
}

pub fn preview<T>(items: &[T], limit: usize) -> Preview<'_, T> {
    let end = items.len().min(limit);
    Preview {
        shown: &items[..end],
        hidden: items.len() - end,
    }
}

/// Render a titled list: `"<title>: <count>"`, one `- item` line per shown
/// example, then [`ELLIPSIS_MARKER`] if anything was cut. Empty lists render
/// to nothing.
pub fn render_list<T>(
    title: &str,
    items: &[T],
    limit: usize,
    format: impl Fn(&T) -> String,
) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }
    let view = preview(items, limit);
    let mut lines = Vec::with_capacity(view.shown.len() + 2);
    lines.push(format!("{title}: {}", items.len()));
    lines.extend(view.shown.iter().map(|item| format!("- {}", format(item))));
    if view.is_truncated() {
        lines.push(ELLIPSIS_MARKER.to_string());
    }
    lines
}

#[cfg(test)]
#[path = "tests/preview_tests.rs"]
mod tests;

//! Shared helpers for command handlers.

use std::fmt::Display;

use snmpsim_api::{Filter, Tag};

use crate::cli::{GlobalOpts, ListArgs};

/// Server-side filter from `--filter key=value` pairs; `None` when empty.
pub fn filter_from(list: &ListArgs) -> Option<Filter> {
    if list.filter.is_empty() {
        return None;
    }
    let mut filter = Filter::new();
    for (key, value) in &list.filter {
        filter.insert(key.clone(), value.clone());
    }
    Some(filter)
}

/// Confirmation on stderr unless `--quiet`.
pub fn report(global: &GlobalOpts, message: impl Display) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

/// Tag names joined for a table cell.
pub fn tag_names(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// IDs joined for a detail line, `-` when empty.
pub fn ids<T>(items: &[T], id: impl Fn(&T) -> i64) -> String {
    if items.is_empty() {
        return "-".into();
    }
    items
        .iter()
        .map(|i| id(i).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

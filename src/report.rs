//! Plain-text and JSON rendering for the CLI commands

use serde::Serialize;

use crate::color::HexColor;
use crate::filter::filter_items;
use crate::index::Indexes;

/// One listed item with its badge colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub color: HexColor,
    pub text_color: &'static str,
}

impl Entry {
    fn new(name: String, color: &HexColor) -> Self {
        Self {
            name,
            color: color.clone(),
            text_color: color.text_color(),
        }
    }
}

/// Items at one level of the hierarchy, sorted then filtered by `search`.
///
/// No `first` lists the first items, `first` alone lists its seconds, and
/// both list the thirds of the pair.
pub fn entries(
    indexes: &Indexes,
    first: Option<&str>,
    second: Option<&str>,
    search: &str,
) -> Vec<Entry> {
    match (first, second) {
        (None, _) => filter_items(indexes.firsts(), search)
            .into_iter()
            .map(|name| {
                let color = indexes.first_color(&name);
                Entry::new(name, color)
            })
            .collect(),
        (Some(first), None) => filter_items(indexes.seconds_sorted(first), search)
            .into_iter()
            .map(|name| {
                let color = indexes.pair_color(first, &name);
                Entry::new(name, color)
            })
            .collect(),
        (Some(first), Some(second)) => filter_items(indexes.thirds_sorted(first, second), search)
            .into_iter()
            .map(|name| {
                let color = indexes.triple_color(first, second, &name);
                Entry::new(name, color)
            })
            .collect(),
    }
}

/// Aligned `name  color` lines
pub fn render_text(entries: &[Entry]) -> String {
    let width = entries.iter().map(|e| e.name.chars().count()).max().unwrap_or(0);
    entries
        .iter()
        .map(|e| format!("{:<width$}  {}", e.name, e.color, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub generated: String,
    pub firsts: Vec<FirstNode>,
}

#[derive(Debug, Serialize)]
pub struct FirstNode {
    #[serde(flatten)]
    pub entry: Entry,
    pub seconds: Vec<SecondNode>,
}

#[derive(Debug, Serialize)]
pub struct SecondNode {
    #[serde(flatten)]
    pub entry: Entry,
    pub thirds: Vec<Entry>,
}

/// Whole hierarchy as a nested, sorted tree
pub fn snapshot(indexes: &Indexes) -> Snapshot {
    let firsts = entries(indexes, None, None, "")
        .into_iter()
        .map(|first| {
            let seconds = entries(indexes, Some(first.name.as_str()), None, "")
                .into_iter()
                .map(|second| SecondNode {
                    thirds: entries(
                        indexes,
                        Some(first.name.as_str()),
                        Some(second.name.as_str()),
                        "",
                    ),
                    entry: second,
                })
                .collect();
            FirstNode {
                entry: first,
                seconds,
            }
        })
        .collect();

    Snapshot {
        generated: chrono::Local::now().to_rfc3339(),
        firsts,
    }
}

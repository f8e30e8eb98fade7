use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use popcorn_core::RatingInput;
use popcorn_models::{MovieDetail, SearchResult, WatchSummary, WatchedEntry};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(label).add_attribute(Attribute::Bold))
        .collect()
}

fn or_dash(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_else(|| "-".to_string())
}

pub fn results_table(results: &[SearchResult]) -> Table {
    let mut table = new_table();
    table.set_header(header(&["#", "Title", "Year", "IMDb ID"]));
    for (index, result) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&result.title),
            Cell::new(&result.year),
            Cell::new(&result.imdb_id),
        ]);
    }
    table
}

pub fn detail_table(detail: &MovieDetail) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(&detail.title).add_attribute(Attribute::Bold),
        Cell::new(&detail.year),
    ]);

    let rows = [
        ("Released", detail.released.clone()),
        ("Runtime", detail.runtime.clone()),
        ("Genre", detail.genre.clone()),
        ("IMDb rating", or_dash(detail.external_rating, 1)),
        ("Director", detail.director.clone()),
        ("Starring", detail.actors.clone()),
        ("Plot", detail.plot.clone()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

/// Star strip for the rating input, e.g. `★★★★★★★☆☆☆ 7`.
pub fn stars(input: &RatingInput) -> String {
    let strip: String = (1..=input.max_rating())
        .map(|position| {
            if input.is_filled(position) {
                "★".yellow().to_string()
            } else {
                "☆".to_string()
            }
        })
        .collect();
    match input.rating() {
        0 => strip,
        rating => format!("{} {}", strip, rating),
    }
}

pub fn watched_table(entries: &[WatchedEntry]) -> Table {
    let mut table = new_table();
    table.set_header(header(&["Title", "Year", "IMDb", "Yours", "Runtime"]));
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(&entry.year),
            Cell::new(or_dash(entry.external_rating, 1)),
            Cell::new(entry.user_rating),
            Cell::new(
                entry
                    .runtime_minutes
                    .map(|m| format!("{} min", m))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    table
}

pub fn summary_line(summary: &WatchSummary) -> String {
    format!(
        "{} {} movies  {} {}  {} {}  {} {} min",
        "#".bright_cyan(),
        summary.count,
        "⭐".yellow(),
        or_dash(summary.mean_external_rating, 2),
        "🌟".yellow(),
        or_dash(summary.mean_user_rating, 2),
        "⏳".bright_white(),
        or_dash(summary.mean_runtime_minutes, 0),
    )
}

//! Terminal rendering of the page grid.

use artic_lib::model::RecordId;
use artic_lib::selection::PageView;
use comfy_table::Attribute;
use comfy_table::Cell;
use comfy_table::CellAlignment;
use comfy_table::Color;
use comfy_table::ContentArrangement;
use comfy_table::Table;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;

pub fn print_page(view: &PageView) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            header_cell(""),
            header_cell("#"),
            header_cell("Title"),
            header_cell("Origin"),
            header_cell("Artist Info"),
            header_cell("Notes"),
            header_cell("Start Year"),
            header_cell("End Year"),
        ]);

    for (i, row) in view.rows.iter().enumerate() {
        let record = &row.record;
        let checkbox = if row.is_selected {
            Cell::new("[x]").fg(Color::Green)
        } else {
            Cell::new("[ ]")
        };
        table.add_row(vec![
            checkbox,
            Cell::new(i + 1),
            Cell::new(record.title().unwrap_or("-")),
            Cell::new(record.place_of_origin().unwrap_or("-")),
            Cell::new(record.artist_display().unwrap_or("-")),
            Cell::new(record.inscriptions().map(first_line).unwrap_or("-")),
            year_cell(record.date_start()),
            year_cell(record.date_end()),
        ]);
    }
    println!("{table}");
    println!("{}", footer(view));
}

pub fn print_selected(ids: &[RecordId]) {
    println!("Selected: {}", ids.len());
    for id in ids {
        println!("  Artwork ID: {}", id);
    }
}

fn footer(view: &PageView) -> String {
    let pages = match view.page_count {
        Some(count) => format!("Page {} of {}", view.page_index + 1, count.max(1)),
        None => format!("Page {}", view.page_index + 1),
    };
    let total = view
        .total
        .map(|t| format!(" | {} artworks", t))
        .unwrap_or_default();
    format!("{}{} | Selected: {}", pages, total, view.selected_count)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn year_cell(year: Option<i64>) -> Cell {
    let cell = match year {
        Some(year) => Cell::new(year),
        None => Cell::new("-"),
    };
    cell.set_alignment(CellAlignment::Right)
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer() {
        let view = PageView {
            page_index: 1,
            page_count: Some(13),
            total: Some(129),
            page_size: 10,
            rows: Vec::new(),
            selected_count: 5,
        };
        assert_eq!(footer(&view), "Page 2 of 13 | 129 artworks | Selected: 5");
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("signed lower right\nverso: label"), "signed lower right");
        assert_eq!(first_line(""), "");
    }
}

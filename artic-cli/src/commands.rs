//! Session commands read from the prompt.

use std::collections::HashSet;

use artic_lib::SelectionController;
use artic_lib::TransportError;
use artic_lib::parse_auto_select_count;
use artic_lib::selection::PageView;

use crate::render;

pub const HELP: &str = "\
commands:
  next | n              show the next page
  prev | p              show the previous page
  page <N>              show page N (1-based)
  toggle <ROW>...       flip the checkbox of the given rows (1-based)
  all                   select every row on this page
  none                  deselect every row on this page
  auto <N>              select exactly the first N artworks of the collection
  selected              list the selected artwork ids
  refresh               drop cached pages and reload this page
  help                  show this help
  quit | q              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Page(usize),
    Toggle(Vec<usize>),
    SelectPage,
    ClearPage,
    /// `None` when the count was not a number.
    Auto(Option<i64>),
    Selected,
    Refresh,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("next" | "n", []) => Command::Next,
        ("prev" | "p", []) => Command::Prev,
        ("page", [n]) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Command::Page(n),
            _ => return Err(format!("not a page number: {}", n)),
        },
        ("toggle" | "t", rows) if !rows.is_empty() => {
            let rows = rows
                .iter()
                .map(|r| match r.parse::<usize>() {
                    Ok(row) if row >= 1 => Ok(row),
                    _ => Err(format!("not a row number: {}", r)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Command::Toggle(rows)
        }
        ("all", []) => Command::SelectPage,
        ("none", []) => Command::ClearPage,
        ("auto", [n]) => Command::Auto(parse_auto_select_count(n)),
        ("auto", []) => Command::Auto(None),
        ("selected", []) => Command::Selected,
        ("refresh", []) => Command::Refresh,
        ("help" | "?", []) => Command::Help,
        ("quit" | "q" | "exit", []) => Command::Quit,
        _ => return Err(format!("unknown command: {} (try `help`)", line.trim())),
    };
    Ok(Some(command))
}

/// Which visible rows end up selected after flipping `rows` (1-based).
///
/// Row numbers past the end of the page are reported as an error.
pub fn flipped_rows(view: &PageView, rows: &[usize]) -> Result<Vec<usize>, String> {
    if let Some(bad) = rows.iter().find(|&&r| r == 0 || r > view.rows.len()) {
        return Err(format!("no row {} on this page", bad));
    }
    let flips: HashSet<usize> = rows.iter().map(|r| r - 1).collect();
    Ok(view
        .rows
        .iter()
        .enumerate()
        .filter(|(i, row)| row.is_selected != flips.contains(i))
        .map(|(i, _)| i)
        .collect())
}

/// Outcome of running a command.
pub enum Flow {
    Continue,
    Quit,
}

/// Runs a command against the controller, printing its result.
pub async fn execute(controller: &SelectionController, command: Command) -> Result<Flow, TransportError> {
    match command {
        Command::Next => {
            let index = controller.current_page().await + 1;
            show(controller.navigate(index).await?);
        }
        Command::Prev => {
            let index = controller.current_page().await.saturating_sub(1);
            show(controller.navigate(index).await?);
        }
        Command::Page(n) => show(controller.navigate(n - 1).await?),
        Command::Toggle(rows) => {
            let view = controller.view().await;
            match flipped_rows(&view, &rows) {
                Ok(selected) => {
                    let records = selected.into_iter().map(|i| view.rows[i].record.clone());
                    render::print_page(&controller.toggle_selection(records).await);
                }
                Err(message) => println!("{}", message),
            }
        }
        Command::SelectPage => {
            let view = controller.view().await;
            let records = view.rows.into_iter().map(|row| row.record);
            render::print_page(&controller.toggle_selection(records).await);
        }
        Command::ClearPage => {
            render::print_page(&controller.toggle_selection(Vec::new()).await);
        }
        Command::Auto(Some(n)) if n > 0 => {
            let count = controller.auto_select(n).await?;
            println!("Selected: {}", count);
            render::print_page(&controller.view().await);
        }
        Command::Auto(_) => println!("give a positive number, e.g. `auto 25`"),
        Command::Selected => render::print_selected(&controller.selected_ids().await),
        Command::Refresh => {
            controller.clear_cache();
            let index = controller.current_page().await;
            show(controller.navigate(index).await?);
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn show(view: Option<PageView>) {
    if let Some(view) = view {
        render::print_page(&view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artic_lib::model::Record;
    use artic_lib::selection::Row;

    fn view(selected: &[bool]) -> PageView {
        PageView {
            page_index: 0,
            page_count: Some(1),
            total: Some(selected.len()),
            page_size: 10,
            rows: selected
                .iter()
                .enumerate()
                .map(|(i, &is_selected)| Row {
                    record: Record::new(i as u64 + 1),
                    is_selected,
                })
                .collect(),
            selected_count: selected.iter().filter(|s| **s).count(),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("  "), Ok(None));
        assert_eq!(parse("next"), Ok(Some(Command::Next)));
        assert_eq!(parse("PAGE 3"), Ok(Some(Command::Page(3))));
        assert_eq!(parse("toggle 1 4"), Ok(Some(Command::Toggle(vec![1, 4]))));
        assert_eq!(parse("auto 12"), Ok(Some(Command::Auto(Some(12)))));
        assert_eq!(parse("q"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_parse_non_numeric_auto_is_noop() {
        assert_eq!(parse("auto twelve"), Ok(Some(Command::Auto(None))));
        assert_eq!(parse("auto"), Ok(Some(Command::Auto(None))));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse("page 0").is_err());
        assert!(parse("page x").is_err());
        assert!(parse("toggle").is_err());
        assert!(parse("toggle 2 b").is_err());
        assert!(parse("dance").is_err());
    }

    #[test]
    fn test_flipped_rows() {
        let view = view(&[true, false, true]);
        assert_eq!(flipped_rows(&view, &[1, 2]), Ok(vec![1, 2]));
        assert_eq!(flipped_rows(&view, &[2, 2]), Ok(vec![0, 1, 2]));
        assert!(flipped_rows(&view, &[4]).is_err());
    }
}

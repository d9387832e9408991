use crate::models::book::{BookDetail, BookSummary};
use crate::utils::text::format_created;
use crate::view::state::{ErrorBanner, ViewState};

pub const LOADING: &str = "Loading...";
pub const NO_RESULTS: &str = "No books found";
pub const IDLE_HINT: &str = "Type a title and press Enter to search.";
const MODAL_WIDTH: usize = 60;
const MODAL_SUBJECTS: usize = 5;

/// Renders the whole view as text. Pure function of the state.
pub fn render(state: &ViewState) -> String {
    let mut lines = vec![
        "Book Finder".to_string(),
        format!("Search: {}", state.query),
        String::new(),
    ];

    if let Some(banner) = &state.error {
        lines.push(render_banner(banner));
        lines.push(String::new());
    }

    let mut out = join_lines(&lines);

    if state.loading() {
        out.push_str(&format!("{}\n", LOADING));
    } else if !state.results.is_empty() {
        for (index, book) in state.results.iter().enumerate() {
            out.push_str(&render_card(index + 1, book));
        }
    } else if state.searched {
        out.push_str(&format!("{}\n", NO_RESULTS));
    } else {
        out.push_str(&format!("{}\n", IDLE_HINT));
    }

    if state.detail_loading() {
        out.push_str("Loading details...\n");
    }

    if let Some(detail) = &state.selected {
        out.push('\n');
        out.push_str(&render_modal(detail));
    }

    out
}

/// One result card; the first line is always `[n] title`.
pub fn render_card(number: usize, book: &BookSummary) -> String {
    let mut lines = vec![format!("[{}] {}", number, book.title)];

    if !book.author_names.is_empty() {
        lines.push(format!("    {}", book.author_names.join(", ")));
    }
    if let Some(year) = book.first_publish_year {
        lines.push(format!("    {}", year));
    }
    if let Some(cover) = &book.cover_image_url {
        lines.push(format!("    cover: {}", cover));
    }

    join_lines(&lines)
}

pub fn render_modal(detail: &BookDetail) -> String {
    let border = format!("+{}+", "-".repeat(MODAL_WIDTH));
    let mut lines = text_lines(&detail.title);

    if let Some(cover) = detail.cover_image_urls.first() {
        lines.push(format!("cover: {}", cover));
    }

    lines.push(String::new());
    match &detail.description {
        Some(description) => lines.extend(text_lines(description)),
        None => lines.push("No description available".to_string()),
    }
    lines.push(String::new());

    let subjects = if detail.subjects.is_empty() {
        "N/A".to_string()
    } else {
        detail
            .subjects
            .iter()
            .take(MODAL_SUBJECTS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };
    lines.push(format!("Subjects: {}", subjects));

    let created = detail
        .created
        .as_deref()
        .and_then(format_created)
        .unwrap_or_else(|| "Unknown".to_string());
    lines.push(format!("Created: {}", created));
    lines.push(String::new());
    lines.push("(/close to dismiss)".to_string());

    let mut framed = vec![border.clone()];
    framed.extend(lines.iter().map(|line| format!("| {}", line)));
    framed.push(border);
    join_lines(&framed)
}

/// Splits catalog text into display lines. Catalog descriptions use `\r\n`,
/// and a stray `\r` would move the cursor back over the frame.
fn text_lines(text: &str) -> Vec<String> {
    text.lines().map(|line| line.replace('\r', "")).collect()
}

fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

fn render_banner(banner: &ErrorBanner) -> String {
    format!(
        "! {}: {} (/retry to try again, /dismiss to hide)",
        banner.kind, banner.message
    )
}

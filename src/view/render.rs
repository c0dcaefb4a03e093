//! Plain-text rendering of the view for the console front end

use super::{ItemPanel, Panel, UserPanel, View};

/// Render the whole view: error banner first, then whichever panel is shown
pub fn render_view(view: &View) -> String {
    let mut lines = Vec::new();

    if let Some(message) = view.error().message() {
        lines.push(format!("[error] {}", message));
    }

    match view.panel() {
        Panel::None if lines.is_empty() => lines.push("(no results)".to_string()),
        Panel::None => {}
        Panel::User(panel) => lines.extend(user_panel_lines(panel)),
        Panel::Item(panel) => lines.extend(item_panel_lines(panel)),
    }

    join_lines(lines)
}

fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

fn user_panel_lines(panel: &UserPanel) -> Vec<String> {
    let similar: Vec<String> = panel
        .similar_users
        .iter()
        .map(|user| format!("{} (similarity: {})", user.user_id, user.similarity))
        .collect();

    let mut lines = vec![
        format!("Similar users: {}", similar.join(" ")),
        "Cover\tTitle\tAuthor\tPredicted score\tSimilarity".to_string(),
    ];
    lines.extend(panel.recommendations.iter().map(|row| {
        format!(
            "{}\t{} [{}]\t{}\t{}\t{}",
            row.cover_url, row.title, row.isbn, row.author, row.predicted_score, row.similarity
        )
    }));
    lines
}

fn item_panel_lines(panel: &ItemPanel) -> Vec<String> {
    let source = &panel.source_book;

    let mut lines = vec![
        format!("Source book: {}", source.title),
        format!("  Author: {}", source.author),
        format!("  ISBN: {}", source.isbn),
        format!("  Cover: {}", source.cover_url),
        "Cover\tTitle\tAuthor\tSimilarity\tAvg rating".to_string(),
    ];
    lines.extend(panel.similar_books.iter().map(|row| {
        format!(
            "{}\t{} [{}]\t{}\t{}\t{}",
            row.cover_url, row.title, row.isbn, row.author, row.similarity, row.avg_rating
        )
    }));
    lines
}

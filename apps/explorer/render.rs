use summary_linker::{SelectionController, StatusView};

/// Strongest highlight a paragraph can get, as a fraction of full intensity.
pub const HIGHLIGHT_MAX_ALPHA: f64 = 0.7;
const BAR_WIDTH: usize = 10;

pub fn status(view: &StatusView) -> Option<String> {
    match view {
        StatusView::Idle => None,
        StatusView::Loading => Some("Loading...".to_string()),
        StatusView::Failed(message) => Some(format!("Error: {message}")),
        StatusView::Ready { .. } => None,
    }
}

pub fn summary(controller: &SelectionController) -> String {
    let highlighted = controller.highlighted_sentence();
    let mut out = String::from("Summary\n");
    for (index, sentence) in controller.sentences().unwrap_or_default().iter().enumerate() {
        let marker = if highlighted == Some(index) { '>' } else { ' ' };
        out.push_str(&format!("{marker} [{index}] {sentence}\n"));
    }
    out
}

pub fn document(controller: &SelectionController) -> String {
    let mut out = String::from("Document\n");
    for (index, paragraph) in controller.paragraphs().unwrap_or_default().iter().enumerate() {
        let similarity = controller.similarity_of(index);
        let score = similarity
            .map(|s| format!("{s:.2}"))
            .unwrap_or_else(|| "    ".to_string());
        out.push_str(&format!("{} {score} {paragraph}\n", bar(similarity)));
    }
    out
}

fn bar(similarity: Option<f64>) -> String {
    let intensity = similarity.unwrap_or(0.0) * HIGHLIGHT_MAX_ALPHA;
    let filled = ((intensity * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

use slidegenius_common::{escape_html, OutlinePreview, Slide};

use crate::page::Page;

/// HTML for a single preview entry. `number` is 1-based.
pub fn render_slide_entry(number: usize, slide: &Slide) -> String {
    let title = escape_html(Some(slide.display_title()));
    let bullets: String = slide
        .bullets
        .iter()
        .map(|bullet| format!("<li>{}</li>", escape_html(Some(bullet))))
        .collect();
    format!(r#"<div class="mb-2"><strong>{number}. {title}</strong><ul>{bullets}</ul></div>"#)
}

/// Replace the preview container contents with the capped outline.
///
/// Returns how many entries were rendered.
pub fn render_outline<P: Page + ?Sized>(page: &mut P, outline: &OutlinePreview) -> usize {
    page.clear_preview();
    let shown = outline.displayed();
    for (index, slide) in shown.iter().enumerate() {
        page.append_preview_entry(render_slide_entry(index + 1, slide));
    }
    shown.len()
}

use anyhow::Result;
use slidegenius_common::OutlinePreview;

pub mod outline_view;

pub use outline_view::OutlineViewer;

/// Open the full-screen outline viewer and block until the user quits.
pub async fn run_outline_view(outline: &OutlinePreview) -> Result<()> {
    let mut viewer = OutlineViewer::new(outline);
    viewer.run().await
}

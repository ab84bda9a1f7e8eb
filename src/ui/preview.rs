//! Rendered markdown preview panel using egui_commonmark

use eframe::egui;
use egui_commonmark::CommonMarkViewer;

use crate::app::MarknoteApp;

/// Live preview panel
pub struct PreviewPanel;

impl PreviewPanel {
    /// Show the preview panel
    pub fn show(ui: &mut egui::Ui, app: &mut MarknoteApp) {
        // Get content first to avoid borrow conflicts with the cache
        let content = app.store.current().map(|doc| doc.content.clone());

        egui::ScrollArea::vertical()
            .id_salt("preview_scroll")
            .show(ui, |ui| {
                if let Some(content) = content {
                    CommonMarkViewer::new().show(ui, &mut app.commonmark_cache, &content);
                } else {
                    Self::show_empty(ui);
                }
            });
    }

    /// Show empty state
    fn show_empty(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.label("Nothing to preview");
            ui.label("Create a document to see it rendered here");
        });
    }
}

//! Markdown editor panel

use eframe::egui;

use crate::app::MarknoteApp;

/// Markdown editor panel
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor panel
    pub fn show(ui: &mut egui::Ui, app: &mut MarknoteApp) {
        egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .show(ui, |ui| {
                let Some(doc) = app.store.current() else {
                    Self::show_empty(ui);
                    return;
                };

                let mut content = doc.content.clone();
                let response = egui::TextEdit::multiline(&mut content)
                    .font(egui::TextStyle::Monospace)
                    .code_editor()
                    .desired_width(f32::INFINITY)
                    .desired_rows(30)
                    .show(ui);

                if response.response.changed() {
                    app.persist_current(&content);
                }
            });
    }

    /// Show empty state when the collection has no documents
    fn show_empty(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);

            ui.heading("No documents");
            ui.add_space(10.0);
            ui.label("Create a document from the menu to start writing.");
        });
    }
}

//! Slide-out navigation menu with the document list

use eframe::egui;

use crate::app::MarknoteApp;
use crate::core::prefs::ThemeMode;

use super::topbar;

/// Slide-out navigation panel
pub struct NavMenu;

impl NavMenu {
    /// Show the navigation panel when open
    pub fn show(ctx: &egui::Context, app: &mut MarknoteApp) {
        if !app.nav_open {
            return;
        }

        egui::SidePanel::left("nav_menu")
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| {
                if !topbar::is_wide(ctx) {
                    ui.add_space(4.0);
                    topbar::logo(ui);
                    ui.separator();
                }

                ui.horizontal(|ui| {
                    ui.heading("Documents");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("+").on_hover_text("New document").clicked() {
                            app.new_doc_dialog.open();
                        }
                    });
                });

                ui.separator();

                // Theme toggle pinned to the bottom, document list filling
                // the rest
                ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                    ui.add_space(8.0);
                    let label = match app.theme {
                        ThemeMode::Dark => "\u{2600} Light theme",
                        ThemeMode::Light => "\u{1F319} Dark theme",
                    };
                    if ui.button(label).clicked() {
                        app.toggle_theme(ctx);
                    }
                    ui.separator();

                    ui.with_layout(egui::Layout::top_down(egui::Align::LEFT), |ui| {
                        egui::ScrollArea::vertical()
                            .id_salt("nav_menu_scroll")
                            .show(ui, |ui| {
                                let mut clicked = None;
                                for (index, doc) in app.store.documents().iter().enumerate() {
                                    let selected = index == app.store.cursor();
                                    let label = format!("\u{1F4DD} {}", doc.name);
                                    let response = ui
                                        .selectable_label(selected, label)
                                        .on_hover_text(&doc.date);
                                    if response.clicked() {
                                        clicked = Some(index);
                                    }
                                }
                                if let Some(index) = clicked {
                                    app.store.select(index);
                                }
                            });
                    });
                });
            });
    }
}

/// Dialog for creating a new document
pub struct NewDocumentDialog {
    visible: bool,
    name: String,
}

impl Default for NewDocumentDialog {
    fn default() -> Self {
        Self {
            visible: false,
            name: String::new(),
        }
    }
}

impl NewDocumentDialog {
    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Show the dialog; returns the chosen name on create
    pub fn show(&mut self, ctx: &egui::Context) -> Option<String> {
        if !self.visible {
            return None;
        }

        let mut result = None;

        egui::Window::new("New Document")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Name:");
                    ui.text_edit_singleline(&mut self.name);
                });

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.visible = false;
                        self.name.clear();
                    }
                    if ui.button("Create").clicked() {
                        let name = self.name.trim();
                        if !name.is_empty() {
                            result = Some(name.to_string());
                        }
                        self.visible = false;
                        self.name.clear();
                    }
                });
            });

        result
    }
}

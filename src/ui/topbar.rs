//! Top bar with menus, responsive logo placement and window controls

use eframe::egui;

use crate::app::{MarknoteApp, ViewMode};

/// Window width at which the logo moves from the menu panel into the bar
pub const WIDE_BREAKPOINT: f32 = 960.0;

/// Whether the window is wide enough to carry the logo in the top bar
pub fn is_wide(ctx: &egui::Context) -> bool {
    ctx.screen_rect().width() >= WIDE_BREAKPOINT
}

/// Render the wordmark logo
pub fn logo(ui: &mut egui::Ui) {
    ui.add(
        egui::Image::new(egui::include_image!("../../assets/logo.svg"))
            .fit_to_exact_size(egui::vec2(126.0, 24.0)),
    );
}

/// Top bar panel
pub struct TopBar;

impl TopBar {
    /// Show the top bar
    pub fn show(ctx: &egui::Context, app: &mut MarknoteApp) {
        egui::TopBottomPanel::top("topbar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                let menu_icon = if app.nav_open { "\u{2715}" } else { "\u{2630}" };
                if ui.button(menu_icon).on_hover_text("Documents").clicked() {
                    app.nav_open = !app.nav_open;
                }

                ui.menu_button("File", |ui| {
                    if ui.button("New Document...").clicked() {
                        app.new_doc_dialog.open();
                        ui.close();
                    }
                    if ui.button("Export HTML...").clicked() {
                        app.export_current();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    let modes = [
                        (ViewMode::Editor, "Editor Only"),
                        (ViewMode::Preview, "Preview Only"),
                        (ViewMode::Split, "Split View"),
                    ];
                    for (mode, label) in modes {
                        if ui.selectable_label(app.view_mode == mode, label).clicked() {
                            app.view_mode = mode;
                            ui.close();
                        }
                    }
                });

                // On narrow windows the logo lives in the menu panel instead
                if is_wide(ctx) {
                    ui.separator();
                    logo(ui);
                }

                if let Some(doc) = app.store.current() {
                    ui.separator();
                    ui.label(&doc.name);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
                    let (icon, hover) = if fullscreen {
                        ("\u{1F5D7}", "Exit fullscreen")
                    } else {
                        ("\u{26F6}", "Fullscreen")
                    };
                    if ui.button(icon).on_hover_text(hover).clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
                    }
                });
            });
        });
    }
}

//! Main application state and UI coordination

use anyhow::Context;
use eframe::egui;

use crate::core::markdown;
use crate::core::prefs::ThemeMode;
use crate::core::storage::{FileStorage, StorageWatcher};
use crate::core::store::{welcome_document, DocumentStore, DOCS_KEY};
use crate::ui::{
    editor::EditorPanel,
    nav_menu::{NavMenu, NewDocumentDialog},
    preview::PreviewPanel,
    topbar::TopBar,
};

/// View mode for the editor area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Editor,
    Preview,
    #[default]
    Split,
}

/// Main application state
pub struct MarknoteApp {
    /// Document collection and cursor
    pub store: DocumentStore<FileStorage>,
    /// Current theme
    pub theme: ThemeMode,
    /// Current view mode
    pub view_mode: ViewMode,
    /// Whether the navigation panel is open
    pub nav_open: bool,
    /// New-document dialog state
    pub new_doc_dialog: NewDocumentDialog,
    /// Commonmark cache for preview
    pub commonmark_cache: egui_commonmark::CommonMarkCache,
    /// Storage substrate, shared with the preference keys
    storage: FileStorage,
    /// Watcher for out-of-process writes to the document key
    watcher: Option<StorageWatcher>,
}

impl MarknoteApp {
    /// Create a new application instance
    ///
    /// Malformed persisted document data is fatal here: startup fails with
    /// the parse error rather than silently starting from an empty store.
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let storage = FileStorage::new()?;

        let theme = ThemeMode::load(&storage).unwrap_or_default();
        cc.egui_ctx.set_visuals(theme.visuals());

        let mut store =
            DocumentStore::load(storage.clone()).context("Failed to load stored documents")?;
        store.seed_if_empty(welcome_document()?)?;

        // The app stays usable without the watcher, just without
        // cross-process reloads
        let watcher = match StorageWatcher::new(&storage, DOCS_KEY) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::warn!("External change watching disabled: {}", e);
                None
            }
        };

        Ok(Self {
            store,
            theme,
            view_mode: ViewMode::default(),
            nav_open: true,
            new_doc_dialog: NewDocumentDialog::default(),
            commonmark_cache: egui_commonmark::CommonMarkCache::default(),
            storage,
            watcher,
        })
    }

    /// Flip the theme, apply it, and persist the preference
    pub fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = self.theme.toggled();
        ctx.set_visuals(self.theme.visuals());
        if let Err(e) = self.theme.save(&self.storage) {
            tracing::error!("Failed to persist theme: {}", e);
        }
    }

    /// Append a new document and move the cursor to it
    pub fn create_document(&mut self, name: &str) {
        if let Err(e) = self.store.create(name) {
            tracing::error!("Failed to create document: {}", e);
        }
    }

    /// Persist edited content of the current document
    pub fn persist_current(&mut self, content: &str) {
        if let Err(e) = self.store.set_current_content(content) {
            tracing::error!("Failed to save document: {}", e);
        }
    }

    /// Export the current document as a standalone HTML page
    pub fn export_current(&mut self) {
        if let Err(e) = self.try_export() {
            tracing::error!("Failed to export document: {:#}", e);
        }
    }

    fn try_export(&mut self) -> anyhow::Result<()> {
        let Some(doc) = self.store.current() else {
            return Ok(());
        };

        let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}.html", markdown::slug(&doc.name)))
            .add_filter("HTML", &["html"])
            .save_file()
        else {
            return Ok(());
        };

        let page = markdown::export_page(&doc.name, &markdown::to_html(&doc.content));
        std::fs::write(&path, page)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Exported {}", path.display());

        if let Err(e) = open::that(&path) {
            tracing::warn!("Could not open exported file: {}", e);
        }
        Ok(())
    }

    /// Reload the collection when another process wrote the document key;
    /// last writer wins
    fn drain_watcher(&mut self) {
        let changed = self
            .watcher
            .as_ref()
            .is_some_and(StorageWatcher::take_change);
        if !changed {
            return;
        }
        match self.store.reload() {
            Ok(true) => tracing::info!("Reloaded documents after external change"),
            Ok(false) => {}
            Err(e) => tracing::error!("Failed to reload documents: {}", e),
        }
    }
}

impl eframe::App for MarknoteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_watcher();

        // Handle keyboard shortcuts; acted on outside the input lock since
        // export opens a blocking dialog
        let (new_doc, toggle_nav, export) = ctx.input(|i| {
            (
                i.modifiers.ctrl && i.key_pressed(egui::Key::N),
                i.modifiers.ctrl && i.key_pressed(egui::Key::B),
                i.modifiers.ctrl && i.key_pressed(egui::Key::E),
            )
        });
        if new_doc {
            self.new_doc_dialog.open();
        }
        if toggle_nav {
            self.nav_open = !self.nav_open;
        }
        if export {
            self.export_current();
        }

        TopBar::show(ctx, self);
        NavMenu::show(ctx, self);

        if let Some(name) = self.new_doc_dialog.show(ctx) {
            self.create_document(&name);
        }

        // Render main content area
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.view_mode {
                ViewMode::Editor => {
                    EditorPanel::show(ui, self);
                }
                ViewMode::Preview => {
                    PreviewPanel::show(ui, self);
                }
                ViewMode::Split => {
                    // Split view: editor on left, preview on right
                    let available_width = ui.available_width();
                    ui.horizontal(|ui| {
                        ui.set_min_width(available_width);

                        ui.vertical(|ui| {
                            ui.set_width(available_width / 2.0 - 4.0);
                            EditorPanel::show(ui, self);
                        });

                        ui.separator();

                        ui.vertical(|ui| {
                            ui.set_width(available_width / 2.0 - 4.0);
                            PreviewPanel::show(ui, self);
                        });
                    });
                }
            }
        });
    }
}

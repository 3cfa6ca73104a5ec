//! Main viewer application with eframe/egui integration.
//!
//! Everything runs on the UI thread: loads, passes and uploads happen inside
//! the frame update that triggered them.

use std::path::PathBuf;

use egui::{Color32, ColorImage, Sense, TextureHandle, TextureOptions, Vec2};
use hueshift_compute::{CpuBackend, Renderer};
use hueshift_core::{extract_palette, PaletteOptions, RasterImage};
use tracing::{debug, info, warn};

use crate::dial;
use crate::state::{BackendChoice, DialEdit, ViewerPersistence, ViewerState};

/// eframe storage key for [`ViewerPersistence`].
pub(crate) const STORAGE_KEY: &str = "hueshift_viewer_state";

/// Configuration for launching the viewer.
#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    /// Backend override; `None` keeps the persisted choice.
    pub backend: Option<BackendChoice>,
    /// Verbosity level.
    pub verbose: u8,
}

/// Main viewer application.
pub struct ViewerApp {
    renderer: Renderer,
    /// Decoded source, kept to re-upload on backend switch.
    source: Option<RasterImage>,
    /// Current display texture.
    texture: Option<TextureHandle>,
    /// Error message to display.
    error: Option<String>,
    state: ViewerState,
}

/// Renderer for `choice`, falling back to the CPU when the GPU is missing.
fn make_renderer(choice: BackendChoice) -> (Renderer, BackendChoice, Option<String>) {
    match Renderer::new(choice.backend()) {
        Ok(renderer) => (renderer, choice, None),
        Err(e) => {
            warn!(error = %e, backend = choice.label(), "backend unavailable, using cpu");
            let fallback = Renderer::with_backend(Box::new(CpuBackend::new()));
            (fallback, BackendChoice::Cpu, Some(format!("{} backend unavailable: {e}", choice.label())))
        }
    }
}

impl ViewerApp {
    /// Creates a new viewer application.
    pub fn new(cc: &eframe::CreationContext<'_>, image_path: Option<PathBuf>, config: ViewerConfig) -> Self {
        // Load persisted settings
        let persistence: ViewerPersistence = cc
            .storage
            .and_then(|s| eframe::get_value(s, STORAGE_KEY))
            .unwrap_or_default();

        let mut state = ViewerState::from_persistence(&persistence, config.backend);
        let (mut renderer, backend, error) = make_renderer(state.backend);
        state.backend = backend;
        renderer.set_remap(state.remap);
        info!(backend = renderer.backend_name(), "viewer started");

        let mut app = Self {
            renderer,
            source: None,
            texture: None,
            error,
            state,
        };

        if let Some(path) = image_path {
            app.load(&cc.egui_ctx, path);
        }
        app
    }

    /// Open file dialog and load selected image.
    fn open_file_dialog(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.load(ctx, path);
        }
    }

    /// Decode and upload `path`. On failure the previous image stays.
    fn load(&mut self, ctx: &egui::Context, path: PathBuf) {
        let image = match hueshift_io::read(&path) {
            Ok(image) => image,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "load failed");
                self.error = Some(format!("Failed to load {}: {e}", path.display()));
                return;
            }
        };
        if let Err(e) = self.renderer.set_image(&image) {
            warn!(path = %path.display(), error = %e, "upload failed");
            self.error = Some(format!("Failed to upload {}: {e}", path.display()));
            return;
        }

        self.state.palette = extract_palette(&image, &PaletteOptions::default());
        self.state.image_dims = Some(image.dimensions());
        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            palette = self.state.palette.len(),
            "image loaded"
        );

        let title = format!("hueshift - {}", path.file_name().and_then(|n| n.to_str()).unwrap_or("image"));
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));

        self.state.image_path = Some(path);
        self.source = Some(image);
        self.error = None;
        self.render(ctx);
    }

    /// Switch backend and re-upload the current source.
    fn set_backend(&mut self, ctx: &egui::Context, choice: BackendChoice) {
        let (mut renderer, backend, error) = make_renderer(choice);
        renderer.set_remap(self.state.remap);
        if let Some(src) = &self.source {
            if let Err(e) = renderer.set_image(src) {
                warn!(error = %e, backend = backend.label(), "re-upload failed");
                self.error = Some(format!("{} backend cannot hold this image: {e}", backend.label()));
                return;
            }
        }
        self.renderer = renderer;
        self.state.backend = backend;
        self.error = error;
        self.render(ctx);
    }

    /// Forward an edit to the renderer through its angle setters.
    fn push_edit(&mut self, edit: DialEdit) {
        match edit {
            DialEdit::Start(a) => self.renderer.set_input_start_angle(a),
            DialEdit::End(a) => self.renderer.set_input_end_angle(a),
            DialEdit::Output(a) => self.renderer.set_output_angle(a),
        }
    }

    /// Run a pass with the current remap and refresh the texture.
    fn render(&mut self, ctx: &egui::Context) {
        let image = match self.renderer.render() {
            Ok(Some(image)) => image,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "render failed");
                self.error = Some(format!("Render failed: {e}"));
                return;
            }
        };
        debug!(backend = self.renderer.backend_name(), remap = ?self.renderer.remap(), "rendered");

        let size = [image.width() as usize, image.height() as usize];
        let color = ColorImage::from_rgba_unmultiplied(size, image.data());
        match &mut self.texture {
            Some(texture) => texture.set(color, TextureOptions::LINEAR),
            None => self.texture = Some(ctx.load_texture("hueshift_image", color, TextureOptions::LINEAR)),
        }
    }

    /// Handle keyboard input. Returns true if should exit.
    fn handle_input(&mut self, ctx: &egui::Context) -> bool {
        let (exit, open_file) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::O) && !i.modifiers.ctrl,
            )
        });
        if open_file {
            self.open_file_dialog(ctx);
        }
        exit
    }

    /// Check for dropped files.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.load(ctx, path);
        }
    }

    /// Draw the dial panel.
    fn draw_dials(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("dials").resizable(false).show(ctx, |ui| {
            ui.add_space(8.0);
            ui.label(format!(
                "Input hues: {:.0}\u{b0} to {:.0}\u{b0}",
                self.state.remap.arc.start, self.state.remap.arc.end
            ));
            let (rect, response) = ui.allocate_exact_size(Vec2::splat(dial::DIAL_SIZE), Sense::click_and_drag());
            let center = rect.center();

            if response.drag_started() {
                if let Some(angle) = dial::pointer_angle(&response, center) {
                    self.state.press_input(angle);
                }
            }
            if response.dragged() {
                if let Some(edit) = dial::pointer_angle(&response, center).and_then(|a| self.state.drag_input(a)) {
                    self.push_edit(edit);
                    if self.state.renders_on_move() {
                        self.render(ctx);
                    }
                }
            }
            if response.drag_stopped() && self.state.release_input() && !self.state.renders_on_move() {
                self.render(ctx);
            }
            dial::paint_input(&ui.painter_at(rect), center, &self.state.remap.arc, &self.state.palette);

            ui.add_space(12.0);
            ui.label(format!("Output hue: {:.0}\u{b0}", self.state.remap.output));
            let (rect, response) = ui.allocate_exact_size(Vec2::splat(dial::DIAL_SIZE), Sense::click_and_drag());
            let center = rect.center();

            if response.dragged() || response.clicked() {
                if let Some(angle) = dial::pointer_angle(&response, center) {
                    let edit = self.state.set_output(angle);
                    self.push_edit(edit);
                    if self.state.renders_on_move() || response.clicked() {
                        self.render(ctx);
                    }
                }
            }
            if response.drag_stopped() && !self.state.renders_on_move() {
                self.render(ctx);
            }
            dial::paint_output(&ui.painter_at(rect), center, self.state.remap.output);

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.label("Backend:");
                let mut choice = self.state.backend;
                for option in [BackendChoice::Gpu, BackendChoice::Cpu] {
                    ui.radio_value(&mut choice, option, option.label());
                }
                if choice != self.state.backend {
                    self.set_backend(ctx, choice);
                }
            });
            ui.label(format!("Running on: {}", self.renderer.backend_name()));

            ui.add_space(12.0);
            if ui.button("Open").clicked() {
                self.open_file_dialog(ctx);
            }
        });
    }

    /// Draw bottom hints panel.
    fn draw_hints(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("hints").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(ref err) = self.error {
                    ui.colored_label(Color32::RED, err);
                    ui.separator();
                }
                if let Some((w, h)) = self.state.image_dims {
                    ui.label(format!("{w}x{h}"));
                    ui.separator();
                }
                ui.label("O: Open | Drag input handles / output needle | Esc: Exit");
            });
        });
    }

    /// Draw main canvas with the remapped image, fitted to the panel.
    fn draw_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let (rect, response) = ui.allocate_exact_size(available, Sense::click());

            if response.double_clicked() {
                self.open_file_dialog(ctx);
            }

            let painter = ui.painter_at(rect);
            match &self.texture {
                Some(texture) => {
                    let tex_size = texture.size_vec2();
                    let scale = (rect.width() / tex_size.x).min(rect.height() / tex_size.y).min(1.0);
                    let image_rect = egui::Rect::from_center_size(rect.center(), tex_size * scale);
                    painter.image(
                        texture.id(),
                        image_rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
                None => {
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Double-click or drag file to open",
                        egui::FontId::default(),
                        ui.visuals().text_color(),
                    );
                }
            }
        });
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        if self.handle_input(ctx) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.draw_dials(ctx);
        self.draw_hints(ctx);
        self.draw_canvas(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STORAGE_KEY, &self.state.to_persistence());
    }
}

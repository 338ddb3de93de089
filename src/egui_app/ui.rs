//! egui renderer for the application UI.

use eframe::egui::{self, Color32, Frame, RichText, TextureHandle, TextureOptions, Ui, Vec2};

use crate::egui_app::controller::AppController;
use crate::egui_app::state::{StatusTone, status_badge_color};
use crate::validate::Field;

/// Smallest window size that keeps the form and labels readable.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(560.0, 640.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: AppController,
    visuals_set: bool,
    chart_textures: Vec<TextureHandle>,
    charts_revision: u64,
}

impl EguiApp {
    /// Create the app, running the full startup sequence (config, dataset,
    /// training).
    pub fn new() -> Result<Self, String> {
        let controller =
            AppController::bootstrap().map_err(|err| format!("Failed to start: {err}"))?;
        Ok(Self::with_controller(controller))
    }

    /// Wrap an already-bootstrapped controller.
    pub fn with_controller(controller: AppController) -> Self {
        Self {
            controller,
            visuals_set: false,
            chart_textures: Vec::new(),
            charts_revision: 0,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgb(12, 12, 12);
        visuals.panel_fill = Color32::from_rgb(16, 16, 16);
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(16, 16, 16);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::none().fill(Color32::from_rgb(24, 24, 24)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Blood Donation Predictor").color(Color32::WHITE));
                    ui.add_space(8.0);
                    ui.separator();
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(RichText::new("Close").color(Color32::WHITE))
                            .clicked()
                        {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_form(&mut self, ui: &mut Ui) {
        ui.add_space(8.0);
        ui.heading(RichText::new("Donor details").color(Color32::WHITE));
        ui.add_space(12.0);

        let fields: [(Field, &mut String); 4] = [
            (Field::Recency, &mut self.controller.ui.form.recency),
            (Field::Frequency, &mut self.controller.ui.form.frequency),
            (Field::Monetary, &mut self.controller.ui.form.monetary),
            (Field::Time, &mut self.controller.ui.form.time),
        ];
        for (field, text) in fields {
            ui.label(RichText::new(field.label()).color(Color32::LIGHT_GRAY));
            ui.add(egui::TextEdit::singleline(text).desired_width(220.0));
            ui.add_space(6.0);
        }

        ui.add_space(10.0);
        let mut predict_clicked = false;
        let mut charts_clicked = false;
        ui.horizontal(|ui| {
            if ui.button("Predict").clicked() {
                predict_clicked = true;
            }
            ui.add_space(8.0);
            if ui.button("Show Visualizations").clicked() {
                charts_clicked = true;
            }
        });
        if predict_clicked {
            self.controller.submit_prediction();
        }
        if charts_clicked {
            self.controller.show_visualizations();
        }

        ui.add_space(14.0);
        if let Some(message) = &self.controller.ui.prediction {
            ui.label(
                RichText::new(message)
                    .color(status_badge_color(StatusTone::Info))
                    .strong(),
            );
        }
        if let Some(message) = &self.controller.ui.error {
            ui.label(
                RichText::new(message)
                    .color(status_badge_color(StatusTone::Error))
                    .strong(),
            );
        }
    }

    fn sync_chart_textures(&mut self, ctx: &egui::Context) {
        if self.charts_revision == self.controller.ui.charts.revision {
            return;
        }
        self.chart_textures = self
            .controller
            .ui
            .charts
            .images
            .iter()
            .enumerate()
            .map(|(index, image)| {
                let pixels = egui::ColorImage::from_rgb(
                    [image.width as usize, image.height as usize],
                    &image.rgb,
                );
                ctx.load_texture(format!("chart_{index}"), pixels, TextureOptions::LINEAR)
            })
            .collect();
        self.charts_revision = self.controller.ui.charts.revision;
    }

    fn render_charts_window(&mut self, ctx: &egui::Context) {
        if !self.controller.ui.charts.open {
            return;
        }
        self.sync_chart_textures(ctx);

        let mut open = true;
        egui::Window::new("Visualizations")
            .open(&mut open)
            .default_width(680.0)
            .vscroll(true)
            .show(ctx, |ui| {
                let images = &self.controller.ui.charts.images;
                for (texture, image) in self.chart_textures.iter().zip(images) {
                    ui.label(RichText::new(&image.title).color(Color32::WHITE));
                    let scale = (ui.available_width() / image.width as f32).min(1.0);
                    let size =
                        egui::vec2(image.width as f32 * scale, image.height as f32 * scale);
                    ui.image(egui::load::SizedTexture::new(texture.id(), size));
                    ui.add_space(12.0);
                }
            });
        if !open {
            self.controller.ui.charts.open = false;
        }
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::none().fill(Color32::from_rgb(0, 0, 0)))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(Color32::WHITE));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(Color32::WHITE));
                });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.render_top_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_form(ui);
        });
        self.render_charts_window(ctx);
        self.render_status(ctx);
    }
}

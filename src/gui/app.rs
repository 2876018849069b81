use eframe::egui;
use walkers::sources::{Mapbox, MapboxStyle};
use walkers::{HttpTiles, Map, MapMemory, Tiles};

use crate::config::AppContext;
use crate::gui::map_view::{MarkerLayer, MarkerPlugin, ScaleBarPlugin};
use crate::gui::measure::{DrawPlugin, MeasureTool};
use crate::gui::{APP_TITLE, toolbar_button};
use crate::regions::REGIONS;

/// The two fixed styles the toggle cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapStyle {
    Streets,
    Satellite,
}

impl MapStyle {
    pub fn flipped(self) -> Self {
        match self {
            MapStyle::Streets => MapStyle::Satellite,
            MapStyle::Satellite => MapStyle::Streets,
        }
    }

    /// Toggle-button label: names the style the button switches TO.
    pub fn toggle_label(self) -> &'static str {
        match self {
            MapStyle::Streets => "🛰 Satellite",
            MapStyle::Satellite => "🗺 Map",
        }
    }

    fn tile_source(self, access_token: String) -> Mapbox {
        Mapbox {
            style: match self {
                MapStyle::Streets => MapboxStyle::Streets,
                MapStyle::Satellite => MapboxStyle::SatelliteStreets,
            },
            high_resolution: false,
            access_token,
        }
    }
}

pub struct GuiApp {
    pub(super) ctx: AppContext,
    pub(super) map_memory: MapMemory,
    pub(super) style: MapStyle,
    // One tile pipeline per style, built on first use; the toggle just
    // switches which one the widget draws from.
    pub(super) streets_tiles: Option<HttpTiles>,
    pub(super) satellite_tiles: Option<HttpTiles>,
    pub(super) markers: MarkerLayer,
    pub(super) measure: MeasureTool,
    pub(super) initial_view_applied: bool,
    pub(super) last_window_size: Option<(u32, u32)>,
}

impl GuiApp {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            map_memory: MapMemory::default(),
            style: MapStyle::Streets,
            streets_tiles: None,
            satellite_tiles: None,
            markers: MarkerLayer::new(),
            measure: MeasureTool::new(),
            initial_view_applied: false,
            last_window_size: None,
        }
    }

    /// Flip streets/satellite. A style change discards and rebuilds the
    /// marker set, like any other custom layer.
    pub(super) fn toggle_style(&mut self) {
        self.style = self.style.flipped();
        self.markers.populate(&REGIONS);
    }

    fn ensure_tiles(&mut self, egui_ctx: &egui::Context) {
        let token = self.ctx.map_config.token.clone().unwrap_or_default();
        let slot = match self.style {
            MapStyle::Streets => &mut self.streets_tiles,
            MapStyle::Satellite => &mut self.satellite_tiles,
        };
        if slot.is_none() {
            *slot = Some(HttpTiles::new(
                self.style.tile_source(token),
                egui_ctx.clone(),
            ));
        }
    }

    fn track_window_size(&mut self, egui_ctx: &egui::Context) {
        if let Some(rect) = egui_ctx.input(|i| i.viewport().inner_rect) {
            self.last_window_size = Some((rect.width() as u32, rect.height() as u32));
        }
    }

    fn render_toolbar(&mut self, egui_ctx: &egui::Context) {
        egui::Area::new(egui::Id::new("map_toolbar"))
            .fixed_pos(egui::pos2(12.0, 12.0))
            .order(egui::Order::Foreground)
            .show(egui_ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(20, 24, 28, 200))
                    .corner_radius(egui::CornerRadius::same(6))
                    .inner_margin(egui::Margin::same(6))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.spacing_mut().item_spacing.x = 4.0;
                            if toolbar_button(ui, self.style.toggle_label(), false).clicked() {
                                self.toggle_style();
                            }
                            if toolbar_button(ui, "📏 Measure", self.measure.is_active()).clicked()
                            {
                                self.measure.toggle();
                            }
                            ui.separator();
                            if toolbar_button(ui, "＋", false).clicked() {
                                let _ = self.map_memory.zoom_in();
                            }
                            if toolbar_button(ui, "－", false).clicked() {
                                let _ = self.map_memory.zoom_out();
                            }
                        });
                    });
            });
    }

    fn render_measure_panel(&mut self, egui_ctx: &egui::Context) {
        if !self.measure.is_active() {
            return;
        }
        egui::Window::new("Distance")
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
            .resizable(false)
            .collapsible(false)
            .show(egui_ctx, |ui| {
                ui.set_min_width(120.0);
                let (value, bearing) = self.measure.display_lines();
                ui.label(egui::RichText::new(value).size(22.0).strong());
                if !bearing.is_empty() {
                    ui.label(bearing);
                }
                ui.add_space(4.0);
                if ui.button("Clear").clicked() {
                    self.measure.clear();
                }
            });
    }

    pub fn run(self) -> Result<(), eframe::Error> {
        let width = self.ctx.gui_config.width.unwrap_or(1280) as f32;
        let height = self.ctx.gui_config.height.unwrap_or(720) as f32;

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([width, height])
                .with_title(APP_TITLE),
            ..Default::default()
        };

        eframe::run_native(APP_TITLE, options, Box::new(move |_cc| Ok(Box::new(self))))
    }
}

impl eframe::App for GuiApp {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        let ctx = ui.ctx().clone();
        let ctx = &ctx;
        self.track_window_size(ctx);
        self.ensure_tiles(ctx);

        let center_pos = walkers::lat_lon(self.ctx.map_config.center.1, self.ctx.map_config.center.0);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} regions", self.markers.len()));
                ui.separator();
                ui.label(format!("Zoom: {:.1}", self.map_memory.zoom()));
                if let Some(pos) = self.markers.hover_geo {
                    ui.separator();
                    ui.label(format!("📌 {:.4}, {:.4}", pos.y(), pos.x()));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.initial_view_applied {
                self.map_memory.center_at(center_pos);
                if let Err(e) = self.map_memory.set_zoom(self.ctx.map_config.zoom) {
                    log::warn!("invalid initial zoom {}: {:?}", self.ctx.map_config.zoom, e);
                }
                // Map ready: first marker population.
                self.markers.populate(&REGIONS);
                self.initial_view_applied = true;
            }

            let measuring = self.measure.is_active();
            let tiles = match self.style {
                MapStyle::Streets => self.streets_tiles.as_mut(),
                MapStyle::Satellite => self.satellite_tiles.as_mut(),
            };

            let map = Map::new(
                tiles.map(|t| t as &mut dyn Tiles),
                &mut self.map_memory,
                center_pos,
            )
            .with_plugin(MarkerPlugin {
                layer: &mut self.markers,
                clicks_enabled: !measuring,
            })
            .with_plugin(DrawPlugin {
                tool: &mut self.measure,
            })
            .with_plugin(ScaleBarPlugin { home: center_pos });

            let response = ui.add(map);
            if measuring {
                response.on_hover_cursor(egui::CursorIcon::Crosshair);
            }

            self.markers.render_popup(ui, &self.ctx.map_config.site_url);
            self.render_toolbar(ui.ctx());
            self.render_measure_panel(ui.ctx());
        });
    }

    fn on_exit(&mut self) {
        let mut gui_config = self.ctx.gui_config.clone();
        if let Some((w, h)) = self.last_window_size {
            gui_config.width = Some(w);
            gui_config.height = Some(h);
        }
        if let Err(e) = self.ctx.save_gui_config(&gui_config) {
            log::warn!("failed to save config: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_toggle_labels_do_not_drift() {
        let mut style = MapStyle::Streets;
        for _ in 0..4 {
            assert_eq!(style.toggle_label(), "🛰 Satellite");
            style = style.flipped();
            assert_eq!(style.toggle_label(), "🗺 Map");
            style = style.flipped();
        }
        assert_eq!(style, MapStyle::Streets);
    }

    #[test]
    fn styles_map_to_distinct_tile_sources() {
        let streets = MapStyle::Streets.tile_source("pk.t".into());
        let satellite = MapStyle::Satellite.tile_source("pk.t".into());
        assert!(matches!(streets.style, MapboxStyle::Streets));
        assert!(matches!(satellite.style, MapboxStyle::SatelliteStreets));
    }
}

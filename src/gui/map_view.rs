use eframe::egui;
use walkers::{MapMemory, Plugin, Position, Projector};

use crate::gui::BRAND_GOLD;
use crate::position::KM_PER_NAUTICAL_MILE;
use crate::regions::Region;

const MARKER_RADIUS: f32 = 7.0;
const MARKER_RADIUS_HOVER: f32 = 9.0;

/// One visual marker bound to a region. The whole set is rebuilt on every
/// populate() call.
pub struct RegionMarker {
    pub region: Region,
    /// Projected screen position from the last rendered frame, used to
    /// anchor the popup.
    pub screen_pos: Option<egui::Pos2>,
}

/// Owns the markers and the single open popup.
pub struct MarkerLayer {
    markers: Vec<RegionMarker>,
    open_popup: Option<usize>,
    /// Pointer position in geographic coordinates, for the status strip.
    pub hover_geo: Option<Position>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self { markers: Vec::new(), open_popup: None, hover_geo: None }
    }

    /// Removes all tracked markers, then recreates one per region. Runs on
    /// the initial map-ready frame and after every style change.
    pub fn populate(&mut self, regions: &[Region]) {
        self.markers.clear();
        self.open_popup = None;
        for region in regions {
            self.markers.push(RegionMarker { region: *region, screen_pos: None });
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Popup for the clicked marker: region name, description and the
    /// site link. At most one is open; the close button or a second click
    /// on the marker dismisses it.
    pub fn render_popup(&mut self, ui: &egui::Ui, site_url: &str) {
        let Some(idx) = self.open_popup else { return };
        let Some(marker) = self.markers.get(idx) else {
            self.open_popup = None;
            return;
        };
        let Some(screen_pos) = marker.screen_pos else { return };
        let region = marker.region;

        let mut close = false;
        egui::Area::new(egui::Id::new("region_popup"))
            .fixed_pos(screen_pos + egui::vec2(16.0, -12.0))
            .order(egui::Order::Tooltip)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(240.0);
                    ui.horizontal(|ui| {
                        ui.heading(region.name);
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.small_button("✕").clicked() {
                                    close = true;
                                }
                            },
                        );
                    });
                    ui.label(region.description);
                    let href =
                        format!("{}{}", site_url.trim_end_matches('/'), region.link_path());
                    ui.hyperlink_to("Explore region →", href);
                });
            });
        if close {
            self.open_popup = None;
        }
    }
}

/// Paints the region markers and routes marker clicks to the popup state.
/// Clicks are suppressed while the measurement overlay owns the pointer.
pub struct MarkerPlugin<'a> {
    pub layer: &'a mut MarkerLayer,
    pub clicks_enabled: bool,
}

impl Plugin for MarkerPlugin<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        self.layer.hover_geo = response.hover_pos().map(|p| projector.unproject(p.to_vec2()));

        let hover = response.hover_pos();
        let painter = ui.painter();
        let mut clicked_marker = None;

        for (idx, marker) in self.layer.markers.iter_mut().enumerate() {
            let screen_vec = projector.project(marker.region.position());
            let screen_pos = egui::pos2(screen_vec.x, screen_vec.y);
            marker.screen_pos = Some(screen_pos);

            if !ui.clip_rect().contains(screen_pos) {
                continue;
            }

            let hovered =
                hover.map(|h| h.distance(screen_pos) <= MARKER_RADIUS_HOVER + 2.0).unwrap_or(false);
            let radius = if hovered || self.layer.open_popup == Some(idx) {
                MARKER_RADIUS_HOVER
            } else {
                MARKER_RADIUS
            };

            painter.circle_filled(screen_pos + egui::vec2(1.5, 1.5), radius, egui::Color32::from_black_alpha(90));
            painter.circle_filled(screen_pos, radius, BRAND_GOLD);
            painter.circle_stroke(screen_pos, radius, egui::Stroke::new(2.0, egui::Color32::WHITE));

            if hovered && self.layer.open_popup != Some(idx) {
                let galley = painter.layout_no_wrap(
                    marker.region.name.to_string(),
                    egui::FontId::proportional(12.0),
                    egui::Color32::WHITE,
                );
                let label_pos = screen_pos
                    + egui::vec2(-galley.rect.width() / 2.0, -(radius + 8.0) - galley.rect.height());
                let text_rect = galley.rect.translate(label_pos.to_vec2());
                painter.rect_filled(text_rect.expand(3.0), 3.0, egui::Color32::from_black_alpha(180));
                painter.galley(label_pos, galley, egui::Color32::WHITE);
            }

            if self.clicks_enabled && response.clicked_by(egui::PointerButton::Primary) {
                if let Some(click) = response.interact_pointer_pos() {
                    if click.distance(screen_pos) <= radius + 4.0 {
                        clicked_marker = Some(idx);
                    }
                }
            }
        }

        if let Some(idx) = clicked_marker {
            self.layer.open_popup =
                if self.layer.open_popup == Some(idx) { None } else { Some(idx) };
        }
    }
}

/// Bottom-left scale bar labelled in nautical miles.
pub struct ScaleBarPlugin {
    pub home: Position,
}

const SCALE_STEPS_NM: [f64; 12] =
    [0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0];
const SCALE_MAX_WIDTH_PX: f64 = 140.0;

impl Plugin for ScaleBarPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        _response: &egui::Response,
        projector: &Projector,
        map_memory: &MapMemory,
    ) {
        let center = map_memory.detached().unwrap_or(self.home);
        let px_per_meter = projector.scale_pixel_per_meter(center) as f64;
        if !px_per_meter.is_finite() || px_per_meter <= 0.0 {
            return;
        }

        let meters_per_nm = KM_PER_NAUTICAL_MILE * 1000.0;
        let nm = SCALE_STEPS_NM
            .iter()
            .copied()
            .rev()
            .find(|nm| nm * meters_per_nm * px_per_meter <= SCALE_MAX_WIDTH_PX)
            .unwrap_or(SCALE_STEPS_NM[0]);
        let width = (nm * meters_per_nm * px_per_meter) as f32;

        let rect = ui.clip_rect();
        let origin = egui::pos2(rect.left() + 12.0, rect.bottom() - 16.0);
        let painter = ui.painter();
        let stroke = egui::Stroke::new(2.0, egui::Color32::from_black_alpha(210));

        painter.line_segment([origin, origin + egui::vec2(width, 0.0)], stroke);
        painter.line_segment([origin, origin + egui::vec2(0.0, -5.0)], stroke);
        painter.line_segment(
            [origin + egui::vec2(width, 0.0), origin + egui::vec2(width, -5.0)],
            stroke,
        );

        let label = if nm < 1.0 { format!("{} nm", nm) } else { format!("{:.0} nm", nm) };
        painter.text(
            origin + egui::vec2(width / 2.0, -7.0),
            egui::Align2::CENTER_BOTTOM,
            label,
            egui::FontId::proportional(11.0),
            egui::Color32::from_black_alpha(210),
        );
    }
}

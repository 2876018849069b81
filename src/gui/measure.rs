use eframe::egui;
use walkers::{MapMemory, Plugin, Position, Projector};

use crate::gui::BRAND_GOLD;
use crate::position;

/// Derived from the first drawn line; recomputed on every edit, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureResult {
    pub distance_nm: f64,
    /// Initial bearing, first vertex to last vertex, in [0, 360).
    pub bearing_deg: f64,
}

impl MeasureResult {
    pub fn compass(&self) -> &'static str {
        position::compass_label(self.bearing_deg)
    }
}

/// The line-measurement state machine: Inactive ↔ Active, toggled from the
/// toolbar. While Active the draw overlay feeds vertices in here and every
/// edit recomputes the result.
pub struct MeasureTool {
    active: bool,
    /// Drawn lines in draw order. Only the FIRST is ever measured; extra
    /// lines can be drawn but stay unmeasured.
    features: Vec<Vec<Position>>,
    /// True while the newest line is still being extended.
    drawing: bool,
    result: Option<MeasureResult>,
}

impl MeasureTool {
    pub fn new() -> Self {
        Self { active: false, features: Vec::new(), drawing: false, result: None }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Inactive → Active enters line-draw mode with empty geometry.
    /// Active → Inactive drops all geometry and detaches the overlay.
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        if !active {
            self.features.clear();
            self.drawing = false;
            self.recompute();
        }
    }

    pub fn toggle(&mut self) {
        self.set_active(!self.active);
    }

    /// Clear button: delete all drawn geometry. No-op while Inactive.
    pub fn clear(&mut self) {
        if !self.active {
            return;
        }
        self.features.clear();
        self.drawing = false;
        self.recompute();
    }

    /// Primary click: extend the line in progress, starting a new line if
    /// none is.
    pub fn add_vertex(&mut self, pos: Position) {
        if !self.active {
            return;
        }
        if !self.drawing {
            self.features.push(Vec::new());
            self.drawing = true;
        }
        if let Some(line) = self.features.last_mut() {
            line.push(pos);
        }
        self.recompute();
    }

    /// Right click: drop the newest vertex of the line in progress.
    pub fn undo_vertex(&mut self) {
        if !self.active || !self.drawing {
            return;
        }
        if let Some(line) = self.features.last_mut() {
            line.pop();
            if line.is_empty() {
                self.features.pop();
                self.drawing = false;
            }
        }
        self.recompute();
    }

    /// Double click: finish the line in progress. A finished line with
    /// fewer than two vertices is discarded, not kept as a degenerate
    /// feature.
    pub fn finish_line(&mut self) {
        if !self.active || !self.drawing {
            return;
        }
        if self.features.last().map(|line| line.len() < 2).unwrap_or(false) {
            self.features.pop();
        }
        self.drawing = false;
        self.recompute();
    }

    pub fn result(&self) -> Option<MeasureResult> {
        self.result
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Distance value and bearing line for the results panel; the em-dash
    /// placeholder shows whenever the first line cannot be measured.
    pub fn display_lines(&self) -> (String, String) {
        match self.result {
            Some(r) => (
                position::format_distance_nm(r.distance_nm),
                position::format_bearing(r.bearing_deg),
            ),
            None => ("—".to_string(), String::new()),
        }
    }

    fn recompute(&mut self) {
        self.result = None;
        let Some(line) = self.features.first() else { return };
        if line.len() < 2 {
            return;
        }

        let path: Vec<(f64, f64)> = line.iter().map(|p| (p.y(), p.x())).collect();
        let meters = position::path_length_meters(&path);
        let distance_nm = position::nautical_miles(meters / 1000.0);
        let (_, bearing_deg) =
            position::distance_and_bearing(path[0], path[path.len() - 1]);

        self.result = Some(MeasureResult { distance_nm, bearing_deg });
    }
}

/// The drawing overlay: paints the measured line and, while the tool is
/// Active, owns click input on the map surface.
pub struct DrawPlugin<'a> {
    pub tool: &'a mut MeasureTool,
}

const LINE_WIDTH: f32 = 3.0;
const VERTEX_RADIUS: f32 = 5.0;
const MIDPOINT_RADIUS: f32 = 3.0;
const DASH_LEN: f32 = 8.0;

impl Plugin for DrawPlugin<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        if !self.tool.is_active() {
            return;
        }

        // Input first, so this frame already paints the updated geometry.
        // The second click of a double-click finishes the line instead of
        // appending another vertex.
        if response.double_clicked() {
            self.tool.finish_line();
        } else if response.clicked_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                self.tool.add_vertex(projector.unproject(pos.to_vec2()));
            }
        } else if response.clicked_by(egui::PointerButton::Secondary) {
            self.tool.undo_vertex();
        }

        let painter = ui.painter();
        let stroke = egui::Stroke::new(LINE_WIDTH, BRAND_GOLD);
        let feature_count = self.tool.features.len();

        for (feature_idx, line) in self.tool.features.iter().enumerate() {
            let in_progress = self.tool.drawing && feature_idx + 1 == feature_count;
            let points: Vec<egui::Pos2> = line
                .iter()
                .map(|p| {
                    let v = projector.project(*p);
                    egui::pos2(v.x, v.y)
                })
                .collect();

            if points.len() >= 2 {
                if in_progress {
                    painter.extend(egui::Shape::dashed_line(&points, stroke, DASH_LEN, DASH_LEN));
                } else {
                    for pair in points.windows(2) {
                        painter.line_segment([pair[0], pair[1]], stroke);
                    }
                    for pair in points.windows(2) {
                        let mid =
                            egui::pos2((pair[0].x + pair[1].x) / 2.0, (pair[0].y + pair[1].y) / 2.0);
                        painter.circle_filled(mid, MIDPOINT_RADIUS, BRAND_GOLD);
                    }
                }
            }

            // Rubber band from the newest vertex to the pointer.
            if in_progress {
                if let (Some(last), Some(hover)) = (points.last(), response.hover_pos()) {
                    painter.extend(egui::Shape::dashed_line(
                        &[*last, hover],
                        stroke,
                        DASH_LEN,
                        DASH_LEN,
                    ));
                }
            }

            for point in &points {
                painter.circle_filled(*point, VERTEX_RADIUS, BRAND_GOLD);
                painter.circle_stroke(*point, VERTEX_RADIUS, egui::Stroke::new(2.0, egui::Color32::WHITE));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use walkers::lat_lon;

    fn active_tool() -> MeasureTool {
        let mut tool = MeasureTool::new();
        tool.set_active(true);
        tool
    }

    #[test]
    fn placeholder_until_two_vertices() {
        let mut tool = active_tool();
        assert_eq!(tool.display_lines(), ("—".to_string(), String::new()));

        tool.add_vertex(lat_lon(36.85, 28.3));
        assert_eq!(tool.display_lines().0, "—");

        tool.add_vertex(lat_lon(36.85, 28.4));
        let (value, bearing) = tool.display_lines();
        assert_ne!(value, "—");
        assert!(value.ends_with(" nm"), "{}", value);
        assert!(bearing.starts_with("Bearing: "), "{}", bearing);
    }

    #[test]
    fn due_east_line_reads_90_degrees() {
        let mut tool = active_tool();
        tool.add_vertex(lat_lon(36.85, 28.3));
        tool.add_vertex(lat_lon(36.85, 28.4));
        let result = tool.result().expect("two vertices measure");
        assert_eq!(result.bearing_deg.round() as i64, 90);
        assert_eq!(result.compass(), "E");
    }

    #[test]
    fn distance_uses_exact_nm_conversion() {
        let mut tool = active_tool();
        tool.add_vertex(lat_lon(36.85, 28.3));
        tool.add_vertex(lat_lon(36.95, 28.5));
        let meters = position::path_length_meters(&[(36.85, 28.3), (36.95, 28.5)]);
        let expected = (meters / 1000.0) / 1.852;
        assert_eq!(tool.result().unwrap().distance_nm, expected);
    }

    #[test]
    fn only_first_line_is_measured() {
        let mut tool = active_tool();
        tool.add_vertex(lat_lon(36.85, 28.3));
        tool.add_vertex(lat_lon(36.85, 28.4));
        tool.finish_line();
        let first = tool.result().expect("first line measured");

        tool.add_vertex(lat_lon(36.2, 29.6));
        tool.add_vertex(lat_lon(37.0, 27.4));
        tool.finish_line();

        assert_eq!(tool.feature_count(), 2);
        assert_eq!(tool.result(), Some(first));
    }

    #[test]
    fn deactivation_clears_geometry() {
        let mut tool = active_tool();
        tool.add_vertex(lat_lon(36.85, 28.3));
        tool.add_vertex(lat_lon(36.85, 28.4));
        assert!(tool.result().is_some());

        tool.set_active(false);
        assert_eq!(tool.feature_count(), 0);
        assert!(tool.result().is_none());

        tool.set_active(true);
        assert_eq!(tool.feature_count(), 0);
        assert_eq!(tool.display_lines().0, "—");
    }

    #[test]
    fn clear_resets_the_display() {
        let mut tool = active_tool();
        tool.add_vertex(lat_lon(36.85, 28.3));
        tool.add_vertex(lat_lon(36.85, 28.4));
        tool.clear();
        assert_eq!(tool.feature_count(), 0);
        assert_eq!(tool.display_lines(), ("—".to_string(), String::new()));
    }

    #[test]
    fn clear_and_edits_are_noops_while_inactive() {
        let mut tool = MeasureTool::new();
        tool.clear();
        tool.add_vertex(lat_lon(36.85, 28.3));
        tool.finish_line();
        tool.undo_vertex();
        assert!(!tool.is_active());
        assert_eq!(tool.feature_count(), 0);
        assert!(tool.result().is_none());
    }

    #[test]
    fn undo_vertex_steps_back() {
        let mut tool = active_tool();
        tool.add_vertex(lat_lon(36.85, 28.3));
        tool.add_vertex(lat_lon(36.85, 28.4));
        assert!(tool.result().is_some());

        tool.undo_vertex();
        assert!(tool.result().is_none());
        assert_eq!(tool.feature_count(), 1);

        tool.undo_vertex();
        assert_eq!(tool.feature_count(), 0);

        // Nothing left; a further undo must not panic.
        tool.undo_vertex();
        assert_eq!(tool.feature_count(), 0);
    }

    #[test]
    fn finishing_discards_single_vertex_lines() {
        let mut tool = active_tool();
        tool.add_vertex(lat_lon(36.85, 28.3));
        tool.finish_line();
        assert_eq!(tool.feature_count(), 0);
        assert_eq!(tool.display_lines().0, "—");
    }
}

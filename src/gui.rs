use eframe::egui;

pub mod app;
pub mod map_view;
pub mod measure;

pub use app::GuiApp;

pub const APP_TITLE: &str = "Bayexpress Map";

/// Brand gold shared by markers and the measure line.
pub const BRAND_GOLD: egui::Color32 = egui::Color32::from_rgb(200, 168, 96);

/// Flat dark button for the floating map toolbar; gold while its tool is
/// engaged.
pub(crate) fn toolbar_button(ui: &mut egui::Ui, text: &str, active: bool) -> egui::Response {
    let (fill, text_color) = if active {
        (BRAND_GOLD, egui::Color32::BLACK)
    } else {
        (
            egui::Color32::from_rgba_unmultiplied(30, 34, 40, 220),
            egui::Color32::from_rgb(220, 220, 220),
        )
    };
    ui.add(egui::Button::new(egui::RichText::new(text).size(14.0).color(text_color)).fill(fill))
}

use eframe::egui::Color32;

// Color Palette
pub const PRIMARY_BUTTON_BG: Color32 = Color32::from_rgb(76, 154, 255); // Vibrant blue for the main action
pub const BUTTON_MAIN_TEXT: Color32 = Color32::from_rgb(255, 255, 255); // White text for buttons
pub const SECONDARY_TEXT: Color32 = Color32::from_rgb(96, 96, 100); // Medium gray for status text
pub const TEXT_ERROR: Color32 = Color32::from_rgb(200, 30, 30); // Red for error messages

// UI Elements
pub const BORDER_COLOR: Color32 = Color32::from_rgba_premultiplied(60, 60, 67, 15); // Subtle border
pub const STATUS_FRAME_BG: Color32 = Color32::from_rgb(248, 248, 248);
pub const INPUT_FRAME_BG: Color32 = Color32::from_rgb(250, 250, 250);

// Sizing & Spacing
pub const ROUNDING_BUTTON: f32 = 6.0;
pub const MIN_SIZE_BUTTON: egui::Vec2 = egui::Vec2::new(180.0, 44.0);
pub const BUTTON_FONT_SIZE: f32 = 16.0;
pub const COMBO_WIDTH: f32 = 220.0;

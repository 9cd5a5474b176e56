//! Draft tuning defaults and layout constants

use bevy::prelude::*;

// =============================================================================
// CAROUSEL
// =============================================================================

pub const CAROUSEL_X_OFFSET: f32 = 300.0; // Horizontal offset of side previews (px)
pub const CAROUSEL_SIDE_SCALE: f32 = 0.8; // Scale of the side previews
pub const CAROUSEL_TRANSITION_DURATION: f32 = 0.3; // Seconds to animate between positions
pub const SWIPE_THRESHOLD: f32 = 50.0; // Minimum horizontal drag (px) to count as a swipe

// =============================================================================
// FLOW
// =============================================================================

pub const PANEL_FADE_DURATION: f32 = 0.5; // Per-panel fade (out, then in)
pub const WELCOME_MESSAGE: &str = "Welcome to the Draft";
pub const TYPE_SPEED: f32 = 0.05; // Seconds per revealed character
pub const WELCOME_PAUSE: f32 = 0.5; // Hold after the last character before auto-advancing

// =============================================================================
// STATS PANEL
// =============================================================================

pub const STAT_MAX_VALUE: u32 = 100;
pub const STAT_MIN_VALUE: u32 = 1;
pub const BAR_FADE_DURATION: f32 = 0.3;
pub const DELAY_BETWEEN_BARS: f32 = 0.1;
pub const HEIGHT_BAND_MIN: u8 = 1;
pub const HEIGHT_BAND_MAX: u8 = 5;

// =============================================================================
// LAYOUT (world units, portrait phone canvas)
// =============================================================================

pub const CANVAS_WIDTH: f32 = 1080.0;
pub const CANVAS_HEIGHT: f32 = 1920.0;
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (540, 960);

pub const CARD_SIZE: Vec2 = Vec2::new(260.0, 360.0);
pub const CAROUSEL_Y: f32 = 220.0;
pub const BUTTON_SIZE: Vec2 = Vec2::new(240.0, 90.0);
pub const BUTTON_Y: f32 = -760.0;
pub const BUTTON_X: f32 = 300.0;
pub const TITLE_Y: f32 = 700.0;

pub const STATS_PANEL_Y: f32 = -180.0;
pub const STAT_BAR_WIDTH: f32 = 420.0;
pub const STAT_BAR_HEIGHT: f32 = 26.0;
pub const STAT_ROW_SPACING: f32 = 52.0;

// =============================================================================
// COLORS
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::srgb(0.07, 0.08, 0.12);
pub const PANEL_COLOR: Color = Color::srgb(0.11, 0.13, 0.19);
pub const CARD_COLOR: Color = Color::srgb(0.22, 0.27, 0.40);
pub const BUTTON_COLOR: Color = Color::srgb(0.85, 0.45, 0.12);
pub const BAR_BG_COLOR: Color = Color::srgb(0.2, 0.2, 0.24);
pub const BAR_FILL_COLOR: Color = Color::srgb(0.95, 0.62, 0.18);

pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.93, 0.88);
pub const TEXT_SECONDARY: Color = Color::srgb(0.7, 0.72, 0.78);
pub const TEXT_ACCENT: Color = Color::srgb(0.98, 0.75, 0.3);

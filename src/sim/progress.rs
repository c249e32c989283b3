//! Level progress and end detection

/// Fraction of the level behind the player, clamped to [0, 1].
/// An empty level counts as complete.
pub fn progress_fraction(x: f64, level_width: f64) -> f64 {
    if level_width <= 0.0 {
        return 1.0;
    }
    (x / level_width).clamp(0.0, 1.0)
}

/// The player has run past the last column
#[inline]
pub fn crossed_level_end(x: f64, level_width: f64) -> bool {
    x > level_width
}

/// Seconds after crossing the end before the win screen is requested
#[inline]
pub fn win_screen_due(win_timer: f64, animation_length: f64, screen_delay: f64) -> bool {
    win_timer > animation_length + screen_delay
}

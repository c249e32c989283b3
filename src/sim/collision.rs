//! Collision queries between the player and the tile grid
//!
//! The player is a unit-diameter circle whose bounding box has its
//! bottom-left corner at `(x, y)`. It overlaps at most two columns, so every
//! query scans `floor(x)` and `floor(x) + 1` only. All queries are pure.

use glam::DVec2;

use super::geometry::{Rect, circle_overlaps_circle, circle_overlaps_rect, circle_overlaps_triangle};
use super::grid::TileSource;
use super::state::{PlayerState, Regime};
use super::tile::TileKind;
use crate::consts::*;

/// Nudge so a player resting exactly on a tile top does not scan that tile's row
const GROUND_SCAN_EPSILON: f64 = 0.00001;

/// Fraction of the player's width, from its right edge, that counts as its front
const FRONT_STRIP_WIDTH: f64 = 0.2;

/// Pads occupy a quarter of their tile
const PAD_HEIGHT: f64 = 0.25;

/// Rings reach a quarter block past their tile on every side
const RING_RADIUS: f64 = 0.75;

/// How a column sits relative to the player's center
enum ColumnContact {
    /// The center is over this column: contact on the flat face
    Center,
    /// Trailing column; the circle rests on the corner at `corner_x`
    Corner { corner_x: f64 },
    /// Leading column; side hits are handled by the hazard test
    Leading,
}

fn column_contact(player: &PlayerState, col: i64) -> ColumnContact {
    let center_col = player.center().x.floor() as i64;
    if col == center_col {
        ColumnContact::Center
    } else if col < center_col {
        ColumnContact::Corner {
            corner_x: (col + 1) as f64,
        }
    } else {
        ColumnContact::Leading
    }
}

/// Vertical offset of a circle resting on a square corner `corner_x` away
#[inline]
fn corner_rounding(corner_x: f64, center_x: f64) -> f64 {
    ((corner_x - center_x) / PLAYER_RADIUS).asin().cos().abs() * PLAYER_RADIUS
}

#[inline]
fn columns(player: &PlayerState) -> [i64; 2] {
    let col = player.x.floor() as i64;
    [col, col + 1]
}

/// Height the player's bottom can rest at: the highest solid surface below
/// it across both overlapped columns, or the ground line.
pub fn ground_y<G: TileSource + ?Sized>(player: &PlayerState, grid: &G) -> f64 {
    let center_x = player.center().x;
    let start_row = (player.y + PLAYER_WIDTH - GROUND_SCAN_EPSILON).floor() as i64;
    let mut ground = 0.0_f64;

    for col in columns(player) {
        let contact = column_contact(player, col);
        if matches!(contact, ColumnContact::Leading) {
            continue;
        }
        let Some(row) = (0..=start_row).rev().find(|&row| grid.is_solid(col, row)) else {
            continue;
        };
        let top = (row + 1) as f64;
        let surface = match contact {
            ColumnContact::Corner { corner_x } => top - corner_rounding(corner_x, center_x),
            _ => top,
        };
        ground = ground.max(surface);
    }

    ground
}

/// Height of the lowest solid surface above the player across both
/// overlapped columns. Without one, Circle×RightSideUp has no ceiling and
/// every other regime is capped one block below the level top.
pub fn ceiling_y<G: TileSource + ?Sized>(player: &PlayerState, grid: &G, level_height: f64) -> f64 {
    let center_x = player.center().x;
    let start_row = (player.y + PLAYER_WIDTH).floor() as i64;
    let height = grid.height() as i64;
    let mut ceiling = match player.regime() {
        Regime::CircleUp => OPEN_CEILING,
        _ => level_height - 1.0,
    };

    for col in columns(player) {
        let contact = column_contact(player, col);
        if matches!(contact, ColumnContact::Leading) {
            continue;
        }
        let Some(row) = (start_row.max(0)..height).find(|&row| grid.is_solid(col, row)) else {
            continue;
        };
        let bottom = row as f64;
        let surface = match contact {
            ColumnContact::Corner { corner_x } => bottom + corner_rounding(corner_x, center_x),
            _ => bottom,
        };
        ceiling = ceiling.min(surface);
    }

    ceiling
}

/// Triangle outline of a hazard tile
pub fn hazard_triangle(kind: TileKind, col: i64, row: i64) -> Option<[DVec2; 3]> {
    let (x, y) = (col as f64, row as f64);
    match kind {
        TileKind::Spike => Some([
            DVec2::new(x, y),
            DVec2::new(x + 0.5, y + 1.0),
            DVec2::new(x + 1.0, y),
        ]),
        TileKind::SpikeDown => Some([
            DVec2::new(x, y + 1.0),
            DVec2::new(x + 0.5, y),
            DVec2::new(x + 1.0, y + 1.0),
        ]),
        TileKind::SpikeLeft => Some([
            DVec2::new(x, y + 0.5),
            DVec2::new(x + 1.0, y),
            DVec2::new(x + 1.0, y + 1.0),
        ]),
        _ => None,
    }
}

/// Rows a unit circle with bottom at `y` can overlap
#[inline]
fn overlapped_rows(y: f64) -> std::ops::RangeInclusive<i64> {
    y.floor() as i64..=(y + PLAYER_WIDTH).floor() as i64
}

/// Whether the player overlaps a hazard triangle, or is running face-first
/// into a solid tile in the column ahead.
pub fn hazard_intersects<G: TileSource + ?Sized>(player: &PlayerState, grid: &G) -> bool {
    let center = player.center();

    for col in columns(player) {
        for row in overlapped_rows(player.y) {
            let Some(tri) = grid.tile_at(col, row).and_then(|k| hazard_triangle(k, col, row)) else {
                continue;
            };
            if circle_overlaps_triangle(center, PLAYER_RADIUS, &tri) {
                return true;
            }
        }

        if col as f64 > player.x {
            let front = Rect::new(
                player.x + PLAYER_WIDTH - FRONT_STRIP_WIDTH,
                player.y,
                FRONT_STRIP_WIDTH,
                PLAYER_WIDTH,
            );
            for row in overlapped_rows(player.y) {
                if !grid.is_solid(col, row) {
                    continue;
                }
                let tile = Rect::new(col as f64, row as f64, 1.0, 1.0);
                if circle_overlaps_rect(center, PLAYER_RADIUS, &front.intersection(&tile)) {
                    return true;
                }
            }
        }
    }

    false
}

/// Whether the player overlaps a pad of the given kind
pub fn pad_intersects<G: TileSource + ?Sized>(player: &PlayerState, grid: &G, kind: TileKind) -> bool {
    let offset = match kind {
        TileKind::YellowPad => 0.0,
        TileKind::YellowPadInverted => 1.0 - PAD_HEIGHT,
        _ => return false,
    };
    let center = player.center();

    columns(player).into_iter().any(|col| {
        overlapped_rows(player.y).any(|row| {
            grid.tile_at(col, row) == Some(kind)
                && circle_overlaps_rect(
                    center,
                    PLAYER_RADIUS,
                    &Rect::new(col as f64, row as f64 + offset, 1.0, PAD_HEIGHT),
                )
        })
    })
}

/// Whether the player overlaps either kind of pad
pub fn any_pad_intersects<G: TileSource + ?Sized>(player: &PlayerState, grid: &G) -> bool {
    pad_intersects(player, grid, TileKind::YellowPad)
        || pad_intersects(player, grid, TileKind::YellowPadInverted)
}

/// Whether the player overlaps a ring's enlarged catch area
pub fn ring_intersects<G: TileSource + ?Sized>(player: &PlayerState, grid: &G) -> bool {
    let center = player.center();
    let top = (player.y + PLAYER_WIDTH).floor() as i64;
    let bottom = player.y.floor() as i64 - 1;

    columns(player).into_iter().any(|col| {
        (bottom..=top).any(|row| {
            grid.is_yellow_ring(col, row)
                && circle_overlaps_circle(
                    center,
                    PLAYER_RADIUS,
                    DVec2::new(col as f64 + 0.5, row as f64 + 0.5),
                    RING_RADIUS,
                )
        })
    })
}

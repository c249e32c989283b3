//! Tile kinds and their gameplay classification
//!
//! A tile is classified along independent axes: solid (can be stood on),
//! hazard (kills on overlap), portal (flips a mode axis) or pad/ring
//! (velocity impulse). Visual variants of solid blocks are a rendering
//! concern and are all represented by `Solid` here.

use serde::{Deserialize, Serialize};

/// What a portal switches the player to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalKind {
    Circle,
    Triangle,
    UpsideDown,
    RightSideUp,
}

/// Portals are two tiles tall; each half is its own tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalHalf {
    Bottom,
    Top,
}

/// Tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Square block: floor, ceiling and wall
    Solid,
    /// Hazard triangle pointing up, base on the tile bottom
    Spike,
    /// Hazard triangle pointing down, base on the tile top
    SpikeDown,
    /// Hazard triangle pointing left, base on the tile's right edge
    SpikeLeft,
    /// Launch pad on the bottom quarter of the tile
    YellowPad,
    /// Launch pad on the top quarter of the tile (upside-down sections)
    YellowPadInverted,
    /// Mid-air jump ring
    YellowRing,
    Portal { kind: PortalKind, half: PortalHalf },
}

impl TileKind {
    /// Hazard triangles
    pub fn is_hazard(&self) -> bool {
        matches!(self, TileKind::Spike | TileKind::SpikeDown | TileKind::SpikeLeft)
    }

    /// The player can land on, hit and scrape against this tile
    pub fn is_solid(&self) -> bool {
        matches!(self, TileKind::Solid)
    }

    pub fn portal_kind(&self) -> Option<PortalKind> {
        match self {
            TileKind::Portal { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_circle_portal(&self) -> bool {
        self.portal_kind() == Some(PortalKind::Circle)
    }

    pub fn is_triangle_portal(&self) -> bool {
        self.portal_kind() == Some(PortalKind::Triangle)
    }

    pub fn is_upside_down_portal(&self) -> bool {
        self.portal_kind() == Some(PortalKind::UpsideDown)
    }

    pub fn is_right_side_up_portal(&self) -> bool {
        self.portal_kind() == Some(PortalKind::RightSideUp)
    }

    pub fn is_yellow_pad(&self) -> bool {
        matches!(self, TileKind::YellowPad)
    }

    pub fn is_yellow_pad_inverted(&self) -> bool {
        matches!(self, TileKind::YellowPadInverted)
    }

    pub fn is_yellow_ring(&self) -> bool {
        matches!(self, TileKind::YellowRing)
    }
}

//! Per-cell supervision targets and the dense grid that holds them.

use glam::{UVec2, Vec2};

use crate::grid::Grid2d;
use crate::types::{
    CH_CATEGORY, CH_CLASS, CH_CONFIDENCE, CH_HEADING_COS, CH_HEADING_SIN, CH_HEIGHT,
    CH_INSTANCE_X, CH_INSTANCE_Y, GridInfo, TARGET_CHANNELS,
};

/// Raw channel values of one cell, in the fixed channel order.
pub type Channels = [f32; TARGET_CHANNELS];

/// `(size, size, 8)` grid of training targets for one frame.
pub type LabelGrid = Grid2d<Channels>;

/// Decoded view of one cell's channels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CellTargets {
    pub category: f32,
    /// Offset from the cell center away from the object center, clamped in length.
    pub instance: Vec2,
    pub confidence: f32,
    pub class_id: f32,
    /// `(cos 2θ, sin 2θ)` of the normalized yaw.
    pub heading: Vec2,
    pub height: f32,
}

impl CellTargets {
    pub fn from_channels(ch: &Channels) -> Self {
        Self {
            category: ch[CH_CATEGORY],
            instance: Vec2::new(ch[CH_INSTANCE_X], ch[CH_INSTANCE_Y]),
            confidence: ch[CH_CONFIDENCE],
            class_id: ch[CH_CLASS],
            heading: Vec2::new(ch[CH_HEADING_COS], ch[CH_HEADING_SIN]),
            height: ch[CH_HEIGHT],
        }
    }

    pub fn to_channels(&self) -> Channels {
        let mut ch = [0.0; TARGET_CHANNELS];
        ch[CH_CATEGORY] = self.category;
        ch[CH_INSTANCE_X] = self.instance.x;
        ch[CH_INSTANCE_Y] = self.instance.y;
        ch[CH_CONFIDENCE] = self.confidence;
        ch[CH_CLASS] = self.class_id;
        ch[CH_HEADING_COS] = self.heading.x;
        ch[CH_HEADING_SIN] = self.heading.y;
        ch[CH_HEIGHT] = self.height;
        ch
    }

    pub fn is_occupied(&self) -> bool {
        self.category > 0.0
    }
}

impl Grid2d<Channels> {
    /// All-zero target grid.
    pub fn zeros(info: GridInfo) -> Self {
        Self::filled(info, [0.0; TARGET_CHANNELS])
    }

    pub fn targets(&self, pos: UVec2) -> Option<CellTargets> {
        self.get(pos).map(CellTargets::from_channels)
    }

    /// Decoded targets of cell `(i, j)`.
    pub fn cell(&self, i: u32, j: u32) -> Option<CellTargets> {
        self.targets(UVec2::new(i, j))
    }

    pub fn channel(&self, pos: UVec2, channel: usize) -> Option<f32> {
        self.get(pos).and_then(|ch| ch.get(channel).copied())
    }

    /// Number of cells with the category channel set.
    pub fn occupied_count(&self) -> usize {
        self.data().iter().filter(|ch| ch[CH_CATEGORY] > 0.0).count()
    }
}

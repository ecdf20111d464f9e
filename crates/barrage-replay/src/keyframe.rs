//! Keyframe data model: one timestamped sample of full scene state.

use serde::Serialize;

use barrage_core::components::Shape;
use barrage_core::kind::RenderType;
use barrage_core::types::Position;

/// Color written for entities recorded without one: warm yellow.
pub const DEFAULT_COLOR: [f32; 4] = [0.9, 0.9, 0.2, 1.0];

/// Per-entity payload inside a keyframe.
#[derive(Debug, Clone, Serialize)]
pub struct EntityRecord {
    /// Logical name; many entities may share one ("Enemy", "Bullet", …).
    pub id: String,
    /// Stable identity across keyframes; absent records degrade replay to
    /// positional-index reconciliation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub x: f32,
    pub y: f32,
    pub rt: RenderType,
    pub w: f32,
    pub h: f32,
    pub color: [f32; 4],
}

impl EntityRecord {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Render descriptor for a visual entity backing this record.
    /// Degenerate dimensions fall back to a visible minimum.
    pub fn shape(&self) -> Shape {
        Shape {
            render_type: self.rt,
            width: if self.w > 0.0 { self.w.max(1.0) } else { 10.0 },
            height: if self.h > 0.0 { self.h.max(1.0) } else { 10.0 },
            color: self.color,
        }
    }

    /// Reconciliation key: the uid when present, otherwise the logical
    /// name qualified by position in the keyframe's entity list.
    pub fn stable_key(&self, index: usize) -> String {
        match &self.uid {
            Some(uid) => uid.clone(),
            None => format!("{}@idx{index}", self.id),
        }
    }
}

/// One discrete, timestamped sample of scene state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Keyframe {
    /// Seconds since recording start; non-decreasing within a log.
    pub t: f32,
    pub entities: Vec<EntityRecord>,
}

impl Keyframe {
    /// Whether every entity carries a uid (enables uid reconciliation).
    pub fn all_uids(&self) -> bool {
        !self.entities.is_empty() && self.entities.iter().all(|e| e.uid.is_some())
    }

    /// Sort entities by uid when all carry one, making positional
    /// fallback reconciliation reproducible across loads.
    pub fn normalize(&mut self) {
        if self.all_uids() {
            self.entities.sort_by(|a, b| a.uid.cmp(&b.uid));
        }
    }
}

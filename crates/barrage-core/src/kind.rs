//! Entity kind and render descriptor vocabulary.
//!
//! Every simulation entity carries one `EntityKind` tag. Behavior and render
//! appearance are dispatched by matching on the kind, not by per-instance
//! overrides, so adding a kind means extending the match arms in one place.

use serde::{Deserialize, Serialize};

use crate::components::Shape;

/// Classification of every entity in the simulation or a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Bullet,
    Decoration,
    /// A reconstructed entity driven by replayed keyframe data.
    ReplayVisual,
}

/// How an entity is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RenderType {
    #[default]
    Rectangle,
    Circle,
    Line,
    Custom,
}

impl EntityKind {
    /// Logical name recorded in keyframes. Many entities share one name.
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Player => "Player",
            EntityKind::Enemy => "Enemy",
            EntityKind::Bullet => "Bullet",
            EntityKind::Decoration => "Decoration",
            EntityKind::ReplayVisual => "ReplayVisual",
        }
    }
}

impl RenderType {
    /// Tag string used in the keyframe log.
    pub fn as_tag(&self) -> &'static str {
        match self {
            RenderType::Rectangle => "RECTANGLE",
            RenderType::Circle => "CIRCLE",
            RenderType::Line => "LINE",
            RenderType::Custom => "CUSTOM",
        }
    }

    /// Parse a log tag; unknown tags fall back to rectangle.
    pub fn from_tag(tag: &str) -> RenderType {
        match tag {
            "CIRCLE" => RenderType::Circle,
            "LINE" => RenderType::Line,
            "CUSTOM" => RenderType::Custom,
            _ => RenderType::Rectangle,
        }
    }
}

/// Default render descriptor for each entity kind.
pub fn default_shape(kind: EntityKind) -> Shape {
    match kind {
        EntityKind::Player => Shape {
            render_type: RenderType::Custom,
            width: 16.0,
            height: 20.0,
            color: [1.0, 0.0, 0.0, 1.0],
        },
        EntityKind::Enemy => Shape {
            render_type: RenderType::Rectangle,
            width: 20.0,
            height: 20.0,
            color: [1.0, 0.5, 0.0, 1.0],
        },
        EntityKind::Bullet => Shape {
            render_type: RenderType::Circle,
            width: 6.0,
            height: 6.0,
            color: [1.0, 1.0, 0.0, 1.0],
        },
        EntityKind::Decoration => Shape {
            render_type: RenderType::Circle,
            width: 5.0,
            height: 5.0,
            color: [0.5, 0.5, 1.0, 0.8],
        },
        EntityKind::ReplayVisual => Shape {
            render_type: RenderType::Rectangle,
            width: 10.0,
            height: 10.0,
            color: [0.7, 0.7, 0.7, 1.0],
        },
    }
}

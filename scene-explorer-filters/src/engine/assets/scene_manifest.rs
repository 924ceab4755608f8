use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Axis-aligned extents in world coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundsData {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl BoundsData {
    /// Center point for camera positioning and framing.
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            ((self.max_x + self.min_x) * 0.5) as f32,
            ((self.max_y + self.min_y) * 0.5) as f32,
            ((self.max_z + self.min_z) * 0.5) as f32,
        )
    }

    /// Size along each axis.
    pub fn size(&self) -> Vec3 {
        Vec3::new(
            (self.max_x - self.min_x) as f32,
            (self.max_y - self.min_y) as f32,
            (self.max_z - self.min_z) as f32,
        )
    }

    pub fn ground_height(&self) -> f32 {
        self.min_y as f32
    }
}

/// One authored node of the scene tree. A node with `dims` spawns a cuboid
/// mesh; a node without is a plain grouping transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNodeSpec {
    pub name: String,
    #[serde(default)]
    pub position: Option<[f32; 3]>,
    /// Full cuboid extents (width, height, depth).
    #[serde(default)]
    pub dims: Option<[f32; 3]>,
    #[serde(default)]
    pub color: Option<[f32; 3]>,
    /// Explicit framing extent; the focus fallback chain probes this first.
    #[serde(default)]
    pub bounds: Option<BoundsData>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub children: Vec<SceneNodeSpec>,
}

/// Complete scene description as a Bevy asset. Mirrors the JSON structure
/// exactly; cloned into a resource once loaded.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath, Resource)]
pub struct SceneManifest {
    #[serde(default = "default_meters_per_unit")]
    pub meters_per_unit: f32,
    pub scene_bounds: BoundsData,
    #[serde(default)]
    pub nodes: Vec<SceneNodeSpec>,
}

fn default_meters_per_unit() -> f32 {
    1.0
}

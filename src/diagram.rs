use serde::Deserialize;

use crate::geometry::{Point, Rect};

/// Fallback block size when the source document omits dimensions.
pub const DEFAULT_BLOCK_WIDTH: f32 = 120.0;
pub const DEFAULT_BLOCK_HEIGHT: f32 = 80.0;

#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub id: String,
    pub label: Option<String>,
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Block {
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.width.unwrap_or(DEFAULT_BLOCK_WIDTH),
            self.height.unwrap_or(DEFAULT_BLOCK_HEIGHT),
        )
    }

    /// Connectors leave a block at the midpoint of its right edge.
    pub fn source_port(&self) -> Point {
        let bounds = self.bounds();
        Point::new(bounds.right(), bounds.y + bounds.height / 2.0)
    }

    /// Connectors enter a block at the midpoint of its left edge.
    pub fn target_port(&self) -> Point {
        let bounds = self.bounds();
        Point::new(bounds.x, bounds.y + bounds.height / 2.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    #[serde(default)]
    pub waypoints: Vec<Point>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Diagram {
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }
}

pub fn parse_diagram(input: &str) -> anyhow::Result<Diagram> {
    match serde_json::from_str(input) {
        Ok(diagram) => Ok(diagram),
        // Fixture files written by hand tend to carry comments.
        Err(_) => Ok(json5::from_str(input)?),
    }
}

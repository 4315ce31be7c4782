//! Orthogonal connector routing.
//!
//! The router is a pure function of its inputs: endpoints, obstacle
//! rectangles, and optional user-placed waypoints go in, a Manhattan
//! polyline comes out. Configuration is fixed at construction, so one
//! router instance can serve every connector of a redraw, including from
//! multiple call sites at once.

mod intersect;
mod obstacles;
mod strategy;

pub use intersect::{path_is_clear, segment_intersects};
pub use obstacles::build_obstacles;

use tracing::{debug, warn};

use crate::config::{ConfigError, RouterConfig};
use crate::diagram::Diagram;
use crate::geometry::{Point, Rect, segment_count};

/// Padding added around the content extents of a routed canvas.
const CANVAS_PADDING: f32 = 40.0;

#[derive(Debug, Clone)]
pub struct Router {
    config: RouterConfig,
}

impl Router {
    pub fn new(config: RouterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: RouterConfig::default(),
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Compute a best-effort obstacle-clear polyline from `from` to `to`.
    ///
    /// The result always starts at `from` and ends at `to`. There is no
    /// error condition: when every candidate is blocked, the fallback
    /// mid-corridor jog is returned even though it may cross obstacles.
    pub fn compute_path(
        &self,
        from: Point,
        to: Point,
        obstacles: &[Rect],
        waypoints: &[Point],
    ) -> Vec<Point> {
        let path = if waypoints.is_empty() {
            strategy::route_pair(&self.config, from, to, obstacles, true)
        } else {
            self.route_through_waypoints(from, to, obstacles, waypoints)
        };
        let segments = segment_count(&path);
        if segments > self.config.max_segments {
            debug!(
                segments,
                budget = self.config.max_segments,
                "routed path exceeds the segment budget"
            );
        }
        path
    }

    /// Route source → waypoints → target as independent consecutive pairs
    /// and join the legs. Only the first leg gets the port stub; a stub in
    /// the middle of a path serves no clearance purpose.
    fn route_through_waypoints(
        &self,
        from: Point,
        to: Point,
        obstacles: &[Rect],
        waypoints: &[Point],
    ) -> Vec<Point> {
        let mut stops = Vec::with_capacity(waypoints.len() + 2);
        stops.push(from);
        stops.extend_from_slice(waypoints);
        stops.push(to);

        let mut path: Vec<Point> = Vec::new();
        for (index, pair) in stops.windows(2).enumerate() {
            let leg = strategy::route_pair(&self.config, pair[0], pair[1], obstacles, index == 0);
            if path.is_empty() {
                path.extend(leg);
            } else {
                path.extend(leg.into_iter().skip(1));
            }
        }
        path
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[derive(Debug, Clone)]
pub struct BlockLayout {
    pub id: String,
    pub label: String,
    pub bounds: Rect,
}

#[derive(Debug, Clone)]
pub struct ConnectorLayout {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub blocks: Vec<BlockLayout>,
    pub connectors: Vec<ConnectorLayout>,
    pub width: f32,
    pub height: f32,
    /// Translation that brings all content (including detours that swing
    /// past the origin) into the canvas.
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Route every connection of a diagram. Each connection avoids all blocks
/// except its own endpoints; connections naming unknown blocks are skipped.
pub fn compute_layout(diagram: &Diagram, router: &Router) -> Layout {
    let mut connectors = Vec::with_capacity(diagram.connections.len());
    for connection in &diagram.connections {
        let (Some(source), Some(target)) = (
            diagram.block(&connection.from),
            diagram.block(&connection.to),
        ) else {
            warn!(
                from = %connection.from,
                to = %connection.to,
                "skipping connection with unknown endpoint block"
            );
            continue;
        };
        let obstacles = build_obstacles(&diagram.blocks, &connection.from, &connection.to);
        let points = router.compute_path(
            source.source_port(),
            target.target_port(),
            &obstacles,
            &connection.waypoints,
        );
        connectors.push(ConnectorLayout {
            from: connection.from.clone(),
            to: connection.to.clone(),
            label: connection.label.clone(),
            points,
        });
    }

    let blocks: Vec<BlockLayout> = diagram
        .blocks
        .iter()
        .map(|block| BlockLayout {
            id: block.id.clone(),
            label: block.label.clone().unwrap_or_else(|| block.id.clone()),
            bounds: block.bounds(),
        })
        .collect();

    let (width, height, offset_x, offset_y) = canvas_frame(&blocks, &connectors);
    Layout {
        blocks,
        connectors,
        width,
        height,
        offset_x,
        offset_y,
    }
}

fn canvas_frame(blocks: &[BlockLayout], connectors: &[ConnectorLayout]) -> (f32, f32, f32, f32) {
    let mut min_x = 0.0f32;
    let mut min_y = 0.0f32;
    let mut max_x = 0.0f32;
    let mut max_y = 0.0f32;
    for block in blocks {
        min_x = min_x.min(block.bounds.x);
        min_y = min_y.min(block.bounds.y);
        max_x = max_x.max(block.bounds.right());
        max_y = max_y.max(block.bounds.bottom());
    }
    for connector in connectors {
        for point in &connector.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
    }
    let width = max_x - min_x + CANVAS_PADDING;
    let height = max_y - min_y + CANVAS_PADDING;
    let offset_x = CANVAS_PADDING / 2.0 - min_x;
    let offset_y = CANVAS_PADDING / 2.0 - min_y;
    (width, height, offset_x, offset_y)
}

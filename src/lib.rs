pub mod cli;
pub mod config;
pub mod diagram;
pub mod geometry;
pub mod render;
pub mod route_dump;
pub mod router;

pub use cli::run;
pub use config::{Config, ConfigError, RenderStyle, RouterConfig, load_config};
pub use diagram::{Block, Connection, Diagram, parse_diagram};
pub use geometry::{Point, Rect};
pub use render::render_svg;
pub use router::{Layout, Router, build_obstacles, compute_layout, path_is_clear, segment_intersects};

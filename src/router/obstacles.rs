use crate::diagram::Block;
use crate::geometry::Rect;

/// Build the obstacle set for one connection: every block except the two
/// owning the endpoints, so a connector is never blocked by its own
/// source or target.
pub fn build_obstacles(blocks: &[Block], from_id: &str, to_id: &str) -> Vec<Rect> {
    blocks
        .iter()
        .filter(|block| block.id != from_id && block.id != to_id)
        .map(Block::bounds)
        .collect()
}

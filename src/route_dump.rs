use crate::router::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct RouteDump {
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<BlockDump>,
    pub connectors: Vec<ConnectorDump>,
}

#[derive(Debug, Serialize)]
pub struct BlockDump {
    pub id: String,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct ConnectorDump {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub points: Vec<[f32; 2]>,
}

impl RouteDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let blocks = layout
            .blocks
            .iter()
            .map(|block| BlockDump {
                id: block.id.clone(),
                label: block.label.clone(),
                x: block.bounds.x,
                y: block.bounds.y,
                width: block.bounds.width,
                height: block.bounds.height,
            })
            .collect();

        let connectors = layout
            .connectors
            .iter()
            .map(|connector| ConnectorDump {
                from: connector.from.clone(),
                to: connector.to.clone(),
                label: connector.label.clone(),
                points: connector
                    .points
                    .iter()
                    .map(|point| [point.x, point.y])
                    .collect(),
            })
            .collect();

        RouteDump {
            width: layout.width,
            height: layout.height,
            blocks,
            connectors,
        }
    }
}

pub fn write_route_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = RouteDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

pub fn route_dump_string(layout: &Layout) -> anyhow::Result<String> {
    let dump = RouteDump::from_layout(layout);
    Ok(serde_json::to_string_pretty(&dump)?)
}

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Routing parameters. Supplied once at router construction and immutable
/// afterwards, so a single `Router` can serve every connector of a redraw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Clearance kept between a detour and the obstacle band.
    pub margin: f32,
    /// Routing-complexity budget. Not a hard cap on the search; paths that
    /// exceed it are reported through a debug event and returned unchanged.
    pub max_segments: usize,
    /// Length of the straight run leaving the source port before any turn.
    pub stub_length: f32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            margin: 20.0,
            max_segments: 12,
            stub_length: 20.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("margin must be positive, got {0}")]
    NonPositiveMargin(f32),
    #[error("stub length must be positive, got {0}")]
    NonPositiveStubLength(f32),
    #[error("max segments must be at least 1")]
    ZeroMaxSegments,
}

impl RouterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.margin > 0.0) {
            return Err(ConfigError::NonPositiveMargin(self.margin));
        }
        if !(self.stub_length > 0.0) {
            return Err(ConfigError::NonPositiveStubLength(self.stub_length));
        }
        if self.max_segments == 0 {
            return Err(ConfigError::ZeroMaxSegments);
        }
        Ok(())
    }
}

/// Colors and fonts for the SVG preview output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderStyle {
    pub background: String,
    pub block_fill: String,
    pub block_stroke: String,
    pub block_stroke_width: f32,
    pub block_corner_radius: f32,
    pub line_color: String,
    pub line_width: f32,
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            block_fill: "#ECECFF".to_string(),
            block_stroke: "#9370DB".to_string(),
            block_stroke_width: 1.4,
            block_corner_radius: 6.0,
            line_color: "#333333".to_string(),
            line_width: 1.4,
            font_family: "\"Open Sans\", sans-serif".to_string(),
            font_size: 14.0,
            text_color: "#131300".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub router: RouterConfig,
    pub render: RenderStyle,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RouterConfigFile {
    margin: Option<f32>,
    max_segments: Option<usize>,
    stub_length: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderStyleFile {
    background: Option<String>,
    block_fill: Option<String>,
    block_stroke: Option<String>,
    block_stroke_width: Option<f32>,
    block_corner_radius: Option<f32>,
    line_color: Option<String>,
    line_width: Option<f32>,
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    router: Option<RouterConfigFile>,
    render: Option<RenderStyleFile>,
}

fn merge_config_file(mut config: Config, parsed: ConfigFile) -> Config {
    if let Some(router) = parsed.router {
        if let Some(v) = router.margin {
            config.router.margin = v;
        }
        if let Some(v) = router.max_segments {
            config.router.max_segments = v;
        }
        if let Some(v) = router.stub_length {
            config.router.stub_length = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.background {
            config.render.background = v;
        }
        if let Some(v) = render.block_fill {
            config.render.block_fill = v;
        }
        if let Some(v) = render.block_stroke {
            config.render.block_stroke = v;
        }
        if let Some(v) = render.block_stroke_width {
            config.render.block_stroke_width = v;
        }
        if let Some(v) = render.block_corner_radius {
            config.render.block_corner_radius = v;
        }
        if let Some(v) = render.line_color {
            config.render.line_color = v;
        }
        if let Some(v) = render.line_width {
            config.render.line_width = v;
        }
        if let Some(v) = render.font_family {
            config.render.font_family = v;
        }
        if let Some(v) = render.font_size {
            config.render.font_size = v;
        }
        if let Some(v) = render.text_color {
            config.render.text_color = v;
        }
    }

    config
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = match serde_json::from_str(&contents) {
        Ok(parsed) => parsed,
        // Hand-written config files get comments and trailing commas.
        Err(_) => json5::from_str(&contents)?,
    };

    Ok(merge_config_file(config, parsed))
}

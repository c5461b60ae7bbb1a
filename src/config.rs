use crate::ir::TimeOfDay;
use crate::parser::parse_time;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default axis ticks, matching the teaching-block start times of the
/// records service plus the end of the last block.
pub const DEFAULT_AXIS_TICKS: [&str; 7] = [
    "7:30", "9:15", "11:00", "12:45", "14:30", "16:15", "18:00",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Tick labels for the chart's horizontal axis, `"H:MM"`.
    pub axis_ticks: Vec<String>,
    /// Pixel height of one packed row in the chart.
    pub row_height: f32,
    /// Pixel width of one hour in the chart.
    pub hour_width: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Base rem height of one packed row in the fragment output.
    pub html_row_rem: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            axis_ticks: DEFAULT_AXIS_TICKS.iter().map(|t| t.to_string()).collect(),
            row_height: 48.0,
            hour_width: 96.0,
            margin_left: 96.0,
            margin_right: 24.0,
            margin_top: 48.0,
            margin_bottom: 44.0,
            html_row_rem: 4.0,
        }
    }
}

impl LayoutConfig {
    /// Parsed tick positions, in axis order. Unparsable entries are skipped.
    pub fn tick_times(&self) -> Vec<TimeOfDay> {
        self.axis_ticks.iter().filter_map(|t| parse_time(t)).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub background: String,
    pub title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            title: "Weekly Timetable".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Root of the records service; the API lives under `<base_url>/api`,
    /// the login form at `<base_url>/login`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://kos.cvut.cz/rest".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub records: RecordsConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::default_light();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
            records: RecordsConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
    grid_color: Option<String>,
    axis_color: Option<String>,
    band_color: Option<String>,
    band_alt_color: Option<String>,
    event_border_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    axis_ticks: Option<Vec<String>>,
    row_height: Option<f32>,
    hour_width: Option<f32>,
    margin_left: Option<f32>,
    margin_right: Option<f32>,
    margin_top: Option<f32>,
    margin_bottom: Option<f32>,
    html_row_rem: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    background: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordsConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
    records: Option<RecordsConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    Ok(apply_overrides(parsed))
}

fn apply_overrides(parsed: ConfigFile) -> Config {
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "default" || theme_name == "light" {
            config.theme = Theme::default_light();
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.grid_color {
            config.theme.grid_color = v;
        }
        if let Some(v) = vars.axis_color {
            config.theme.axis_color = v;
        }
        if let Some(v) = vars.band_color {
            config.theme.band_color = v;
        }
        if let Some(v) = vars.band_alt_color {
            config.theme.band_alt_color = v;
        }
        if let Some(v) = vars.event_border_color {
            config.theme.event_border_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v.clone();
            config.render.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.axis_ticks {
            config.layout.axis_ticks = v;
        }
        if let Some(v) = layout.row_height {
            config.layout.row_height = v;
        }
        if let Some(v) = layout.hour_width {
            config.layout.hour_width = v;
        }
        if let Some(v) = layout.margin_left {
            config.layout.margin_left = v;
        }
        if let Some(v) = layout.margin_right {
            config.layout.margin_right = v;
        }
        if let Some(v) = layout.margin_top {
            config.layout.margin_top = v;
        }
        if let Some(v) = layout.margin_bottom {
            config.layout.margin_bottom = v;
        }
        if let Some(v) = layout.html_row_rem {
            config.layout.html_row_rem = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.background {
            config.render.background = v;
        }
        if let Some(v) = render.title {
            config.render.title = v;
        }
    }

    if let Some(records) = parsed.records {
        if let Some(v) = records.base_url {
            config.records.base_url = v;
        }
        if let Some(v) = records.timeout_secs {
            config.records.timeout_secs = v;
        }
    }

    config
}

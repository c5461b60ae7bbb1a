use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub grid_color: String,
    pub axis_color: String,
    /// Fill of the odd day bands; even bands use `band_alt_color`.
    pub band_color: String,
    pub band_alt_color: String,
    pub event_border_color: String,
    pub background: String,
}

impl Theme {
    pub fn default_light() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 12.0,
            text_color: "#333333".to_string(),
            grid_color: "#DDDDDD".to_string(),
            axis_color: "#666666".to_string(),
            band_color: "#FFFFFF".to_string(),
            band_alt_color: "#F2F2F2".to_string(),
            event_border_color: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            text_color: "#1C2430".to_string(),
            grid_color: "#D7E0F0".to_string(),
            axis_color: "#7A8AA6".to_string(),
            band_color: "#FFFFFF".to_string(),
            band_alt_color: "#EEF2F8".to_string(),
            event_border_color: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_light()
    }
}

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::input::buttons::{self, ButtonMapper};

/// `[tablet]` section of the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabletConfig {
    #[serde(rename = "rotate")]
    pub rotation: Rotation,
    pub area: ActiveArea,
    /// Tool button name -> pointer button name, e.g. `Stylus = "Right"`.
    #[serde(default = "default_button_map")]
    pub map: BTreeMap<String, String>,
    #[serde(skip)]
    #[serde(default)]
    button_lookup: HashMap<u32, u32>,
}

impl Default for TabletConfig {
    fn default() -> Self {
        let mut config = Self {
            rotation: Rotation::None,
            area: ActiveArea::default(),
            map: default_button_map(),
            button_lookup: HashMap::new(),
        };
        config.rebuild_button_lookup();
        config
    }
}

fn default_button_map() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Tip".to_string(), "Left".to_string()),
        ("Stylus".to_string(), "Right".to_string()),
        ("Stylus2".to_string(), "Middle".to_string()),
    ])
}

impl TabletConfig {
    pub(crate) fn rebuild_button_lookup(&mut self) {
        self.button_lookup.clear();
        for (from, to) in &self.map {
            let Some(raw) = buttons::parse_tool_button(from) else {
                warn!(from = %from, "unknown tablet button in map entry");
                continue;
            };
            if to.trim().eq_ignore_ascii_case("none") {
                self.button_lookup.remove(&raw);
                continue;
            }
            match buttons::parse_pointer_button(to) {
                Some(button) => {
                    if self.button_lookup.insert(raw, button).is_some() {
                        warn!(from = %from, "duplicate tablet button map entry; last value wins");
                    }
                }
                None => warn!(to = %to, "unknown pointer button in tablet map entry"),
            }
        }
    }

    pub fn mapped_button(&self, raw: u32) -> Option<u32> {
        self.button_lookup.get(&raw).copied()
    }
}

impl ButtonMapper for TabletConfig {
    fn mapped_button(&self, raw: u32) -> Option<u32> {
        TabletConfig::mapped_button(self, raw)
    }
}

/// Region of the tablet surface, in millimetres, that is stretched over the
/// whole output range.
///
/// All zero means the whole surface is used. A zero `width` or `height` extends
/// the area from its offset to the physical edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveArea {
    #[serde(alias = "left")]
    pub x: f64,
    #[serde(alias = "top")]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ActiveArea {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_unset(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.width == 0.0 && self.height == 0.0
    }
}

/// Clockwise rotation of the tablet, applied after the active area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "toml::Value", into = "u16")]
pub enum Rotation {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Rotate90 => 90,
            Rotation::Rotate180 => 180,
            Rotation::Rotate270 => 270,
        }
    }
}

impl From<i64> for Rotation {
    fn from(degrees: i64) -> Self {
        match degrees {
            0 => Rotation::None,
            90 => Rotation::Rotate90,
            180 => Rotation::Rotate180,
            270 => Rotation::Rotate270,
            other => {
                warn!(rotate = other, "unsupported tablet rotation, using 0");
                Rotation::None
            }
        }
    }
}

// Any TOML value is accepted; unsupported angles become no rotation.
impl From<toml::Value> for Rotation {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::Integer(degrees) => Rotation::from(degrees),
            toml::Value::Float(degrees) if degrees.fract() == 0.0 => Rotation::from(degrees as i64),
            other => {
                warn!(rotate = %other, "unsupported tablet rotation, using 0");
                Rotation::None
            }
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

//! Page settings - size, orientation, margins

use serde::{Deserialize, Serialize};

/// Named page formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    A4,
    A3,
    Letter,
    Legal,
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageSize::A4 => write!(f, "A4"),
            PageSize::A3 => write!(f, "A3"),
            PageSize::Letter => write!(f, "Letter"),
            PageSize::Legal => write!(f, "Legal"),
        }
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Portrait
    }
}

/// Unit for margin values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginUnit {
    Mm,
    In,
}

impl Default for MarginUnit {
    fn default() -> Self {
        MarginUnit::Mm
    }
}

impl MarginUnit {
    pub fn css_suffix(&self) -> &'static str {
        match self {
            MarginUnit::Mm => "mm",
            MarginUnit::In => "in",
        }
    }
}

/// Page margins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    #[serde(default)]
    pub unit: MarginUnit,
}

impl Default for Margins {
    fn default() -> Self {
        // 20mm all around
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 20.0,
            left: 20.0,
            unit: MarginUnit::Mm,
        }
    }
}

impl Margins {
    pub fn uniform(value: f64, unit: MarginUnit) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
            unit,
        }
    }

    /// Convert all values to the target unit.
    pub fn in_unit(&self, unit: MarginUnit) -> Margins {
        if self.unit == unit {
            return self.clone();
        }
        let factor = match (self.unit, unit) {
            (MarginUnit::In, MarginUnit::Mm) => 25.4,
            (MarginUnit::Mm, MarginUnit::In) => 1.0 / 25.4,
            _ => 1.0,
        };
        Margins {
            top: self.top * factor,
            right: self.right * factor,
            bottom: self.bottom * factor,
            left: self.left * factor,
            unit,
        }
    }
}

/// Page settings for paginated output; required only for PDF export
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageSettings {
    #[serde(default)]
    pub size: PageSize,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub margins: Margins,
}

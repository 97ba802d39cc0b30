//! Mapping from Open-Meteo (WMO) weather codes to display strings.
//!
//! Only a handful of codes are recognised. Everything else, including codes
//! the provider may add later, falls back to [`Condition::UNKNOWN`].

use std::{collections::HashMap, fmt, sync::LazyLock};

use serde::Serialize;

/// Icon identifier handed to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Default,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Sunny => "sunny",
            Icon::Cloudy => "cloudy",
            Icon::Rainy => "rainy",
            Icon::Snowy => "snowy",
            Icon::Default => "default",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Animation category; `None` means the icon stays still.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    None,
}

impl Animation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Animation::Sunny => "sunny",
            Animation::Cloudy => "cloudy",
            Animation::Rainy => "rainy",
            Animation::Snowy => "snowy",
            Animation::None => "none",
        }
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub description: &'static str,
    pub icon: Icon,
    pub animation: Animation,
}

impl Condition {
    pub const UNKNOWN: Condition =
        Condition { description: "Unknown weather", icon: Icon::Default, animation: Animation::None };

    const fn new(description: &'static str, icon: Icon, animation: Animation) -> Self {
        Self { description, icon, animation }
    }
}

// Fog has its own description but no dedicated icon or animation.
static CODE_TABLE: LazyLock<HashMap<i64, Condition>> = LazyLock::new(|| {
    let clear = Condition::new("Clear sky", Icon::Sunny, Animation::Sunny);
    let cloudy = Condition::new("Partly cloudy", Icon::Cloudy, Animation::Cloudy);
    let foggy = Condition::new("Foggy", Icon::Default, Animation::None);
    let rain = Condition::new("Light rain", Icon::Rainy, Animation::Rainy);
    let snow = Condition::new("Snow", Icon::Snowy, Animation::Snowy);

    HashMap::from([
        (0, clear),
        (1, clear),
        (2, cloudy),
        (3, cloudy),
        (45, foggy),
        (48, foggy),
        (51, rain),
        (61, rain),
        (71, snow),
    ])
});

/// Look up the display condition for a weather code. Total over `i64`.
pub fn describe(code: i64) -> Condition {
    CODE_TABLE.get(&code).copied().unwrap_or(Condition::UNKNOWN)
}

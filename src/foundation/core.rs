use crate::foundation::error::{ExportError, ExportResult};
use crate::foundation::math::js_number;

/// Reference resolution of a 1x export.
pub const BASE_DPI: f64 = 96.0;

/// Resolution multiplier for one export variant (`1` = base size, `2` = `@2x`, ...).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Scale(f64);

impl Scale {
    /// Create a validated scale; must be finite and large enough for a DPI of at least 1.
    pub fn new(v: f64) -> ExportResult<Self> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ExportError::config(format!(
                "scale must be a positive number, got {v}"
            )));
        }
        let scale = Self(v);
        if scale.dpi() == 0 {
            return Err(ExportError::config(format!(
                "scale {v} is too small: export DPI rounds to 0"
            )));
        }
        Ok(scale)
    }

    /// The raw multiplier.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Export DPI for this scale (`96 * scale`, rounded to the nearest integer).
    pub fn dpi(self) -> u32 {
        (BASE_DPI * self.0).round() as u32
    }

    /// Filename suffix: empty for `1`, `@{scale}x` otherwise.
    pub fn suffix(self) -> String {
        if self.0 == 1.0 {
            String::new()
        } else {
            format!("@{}x", js_number(self.0))
        }
    }

    /// Default scale list used when none are configured.
    pub fn defaults() -> Vec<Self> {
        vec![Self(1.0), Self(2.0)]
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&js_number(self.0))
    }
}

impl std::str::FromStr for Scale {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v: f64 = s
            .trim()
            .parse()
            .map_err(|_| ExportError::config(format!("invalid scale '{s}'")))?;
        Self::new(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::CoreError;

/// Largest accepted board side, in cells.
///
/// Bounds the size of the pre-allocated frame buffer.
pub const MAX_DIMENSION: usize = 4096;

/// Configuration d'une exécution. Immuable une fois validée.
///
/// # Example
/// ```
/// use lt_core::config::{Encoding, RenderConfig};
/// let config = RenderConfig::default();
/// assert_eq!((config.rows, config.cols), (10, 10));
/// assert_eq!(config.encoding, Encoding::Ascii);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Logical board height, in cells.
    pub rows: usize,
    /// Logical board width, in cells.
    pub cols: usize,
    /// Target generations per second.
    pub fps: f32,
    /// Frame encoder variant.
    pub encoding: Encoding,
    /// Stop after this many generations. 0 = unbounded.
    pub max_steps: u64,
    /// Seed the board randomly instead of with the glider.
    pub random_fill: bool,
    /// Probability of each cell being alive when `random_fill` is set [0.0, 1.0].
    pub random_fraction: f32,
    /// Fixed RNG seed for reproducible random boards.
    pub rng_seed: Option<u64>,
    /// Pattern file stamped onto the board instead of the glider.
    pub pattern: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            fps: 10.0,
            encoding: Encoding::Ascii,
            max_steps: 0,
            random_fill: false,
            random_fraction: 0.2,
            rng_seed: None,
            pattern: None,
        }
    }
}

impl RenderConfig {
    /// Reject any configuration the scheduler cannot run.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] for empty or oversized boards and
    /// [`CoreError::Config`] for a non-positive fps or an out-of-range fraction.
    ///
    /// # Example
    /// ```
    /// use lt_core::config::RenderConfig;
    /// let config = RenderConfig { rows: 0, ..RenderConfig::default() };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.rows == 0
            || self.cols == 0
            || self.rows > MAX_DIMENSION
            || self.cols > MAX_DIMENSION
        {
            return Err(CoreError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(CoreError::Config(format!(
                "fps doit être > 0 (reçu {})",
                self.fps
            )));
        }
        if !(0.0..=1.0).contains(&self.random_fraction) {
            return Err(CoreError::Config(format!(
                "random_fraction hors de [0, 1] (reçu {})",
                self.random_fraction
            )));
        }
        Ok(())
    }

    /// Frame budget: `1e9 / fps` nanoseconds.
    ///
    /// # Example
    /// ```
    /// use lt_core::config::RenderConfig;
    /// use std::time::Duration;
    /// let config = RenderConfig { fps: 4.0, ..RenderConfig::default() };
    /// assert_eq!(config.frame_budget(), Duration::from_millis(250));
    /// ```
    #[must_use]
    pub fn frame_budget(&self) -> Duration {
        Duration::from_nanos((1e9 / f64::from(self.fps)) as u64)
    }
}

/// Frame encoder selector.
///
/// # Example
/// ```
/// use lt_core::config::Encoding;
/// let enc: Encoding = "braille".parse().unwrap();
/// assert_eq!(enc, Encoding::Braille);
/// assert_eq!(enc.group(), (4, 2));
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// One byte per cell.
    #[default]
    #[serde(alias = "ascii")]
    Ascii,
    /// Unicode Braille, 2×4 cells per glyph.
    #[serde(alias = "braille")]
    Braille,
    /// Truecolor half-block (▄), 1×2 cells per glyph.
    #[serde(alias = "bigpixel", alias = "halfblock")]
    BigPixel,
    /// Sixel bitmap, 1×6 cells per sixel byte.
    #[serde(alias = "sixel")]
    Sixel,
}

impl Encoding {
    /// All variants, in CLI order.
    pub const ALL: [Self; 4] = [Self::Ascii, Self::Braille, Self::BigPixel, Self::Sixel];

    /// Pixel-group shape `(rows, cols)` covered by one emitted unit.
    #[must_use]
    pub const fn group(self) -> (usize, usize) {
        match self {
            Self::Ascii => (1, 1),
            Self::Braille => (4, 2),
            Self::BigPixel => (2, 1),
            Self::Sixel => (6, 1),
        }
    }

    /// Board size `(rows, cols)` rounded up to whole pixel groups.
    ///
    /// # Example
    /// ```
    /// use lt_core::config::Encoding;
    /// assert_eq!(Encoding::Sixel.padded(10, 7), (12, 7));
    /// assert_eq!(Encoding::Braille.padded(10, 7), (12, 8));
    /// ```
    #[must_use]
    pub const fn padded(self, rows: usize, cols: usize) -> (usize, usize) {
        let (gr, gc) = self.group();
        (rows.div_ceil(gr) * gr, cols.div_ceil(gc) * gc)
    }

    /// Lower-case selector as accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Braille => "braille",
            Self::BigPixel => "bigpixel",
            Self::Sixel => "sixel",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" => Ok(Self::Ascii),
            "braille" => Ok(Self::Braille),
            "bigpixel" | "big-pixel" | "halfblock" => Ok(Self::BigPixel),
            "sixel" => Ok(Self::Sixel),
            other => Err(CoreError::UnsupportedEncoding {
                format: other.to_string(),
            }),
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    life: Option<LifeSection>,
}

/// `[life]` section, all fields optional for partial override.
#[derive(Deserialize)]
struct LifeSection {
    rows: Option<usize>,
    cols: Option<usize>,
    fps: Option<f32>,
    encoding: Option<Encoding>,
    max_steps: Option<u64>,
    random_fill: Option<bool>,
    random_fraction: Option<f32>,
    seed: Option<u64>,
    pattern: Option<PathBuf>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// The result is not validated: CLI overrides are applied first, then
/// [`RenderConfig::validate`] runs once on the final value.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use lt_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("lifeterm.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    if !path.exists() {
        return Err(CoreError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;

    let mut config = RenderConfig::default();
    let Some(l) = file.life else {
        log::warn!("{}: pas de section [life], valeurs par défaut", path.display());
        return Ok(config);
    };

    if let Some(v) = l.rows {
        config.rows = v;
    }
    if let Some(v) = l.cols {
        config.cols = v;
    }
    if let Some(v) = l.fps {
        config.fps = v;
    }
    if let Some(v) = l.encoding {
        config.encoding = v;
    }
    if let Some(v) = l.max_steps {
        config.max_steps = v;
    }
    if let Some(v) = l.random_fill {
        config.random_fill = v;
    }
    if let Some(v) = l.random_fraction {
        config.random_fraction = v;
    }
    if let Some(v) = l.seed {
        config.rng_seed = Some(v);
    }
    if let Some(v) = l.pattern {
        config.pattern = Some(v);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let file = write_toml("[life]\nrows = 40\nencoding = \"Braille\"\nseed = 7\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.rows, 40);
        assert_eq!(config.cols, 10);
        assert_eq!(config.encoding, Encoding::Braille);
        assert_eq!(config.rng_seed, Some(7));
        assert!((config.fps - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn lowercase_encoding_alias_accepted() {
        let file = write_toml("[life]\nencoding = \"halfblock\"\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.encoding, Encoding::BigPixel);
    }

    #[test]
    fn missing_section_yields_defaults() {
        let file = write_toml("# vide\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_config(Path::new("/nonexistent/lifeterm.toml")).unwrap_err();
        assert!(err.to_string().contains("introuvable"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let file = write_toml("[life]\nrows = \"dix\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let base = RenderConfig::default();
        assert!(RenderConfig { cols: 0, ..base.clone() }.validate().is_err());
        assert!(
            RenderConfig { rows: MAX_DIMENSION + 1, ..base.clone() }
                .validate()
                .is_err()
        );
        assert!(RenderConfig { fps: 0.0, ..base.clone() }.validate().is_err());
        assert!(RenderConfig { fps: f32::NAN, ..base.clone() }.validate().is_err());
        assert!(
            RenderConfig { random_fraction: 1.5, ..base.clone() }
                .validate()
                .is_err()
        );
        assert!(RenderConfig { rows: 1, cols: 1, ..base }.validate().is_ok());
    }

    #[test]
    fn encoding_parse_is_case_insensitive_and_strict() {
        assert_eq!("SIXEL".parse::<Encoding>().unwrap(), Encoding::Sixel);
        assert_eq!("big-pixel".parse::<Encoding>().unwrap(), Encoding::BigPixel);
        assert!("octant".parse::<Encoding>().is_err());
    }

    #[test]
    fn padding_rounds_up_to_group() {
        assert_eq!(Encoding::Ascii.padded(7, 9), (7, 9));
        assert_eq!(Encoding::Braille.padded(4, 2), (4, 2));
        assert_eq!(Encoding::Braille.padded(5, 3), (8, 4));
        assert_eq!(Encoding::BigPixel.padded(5, 3), (6, 3));
        assert_eq!(Encoding::Sixel.padded(1, 3), (6, 3));
    }

    #[test]
    fn frame_budget_matches_fps() {
        let config = RenderConfig { fps: 10.0, ..RenderConfig::default() };
        assert_eq!(config.frame_budget(), Duration::from_millis(100));
    }

    #[test]
    fn bundled_default_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        let config = load_config(&path).unwrap();
        assert_eq!(config.encoding, Encoding::Braille);
        assert!(config.random_fill);
        assert!(config.validate().is_ok());
    }
}

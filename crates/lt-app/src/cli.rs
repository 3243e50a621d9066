use std::path::PathBuf;

use clap::Parser;
use lt_core::config::{Encoding, RenderConfig};

/// lifeterm : jeu de la vie de Conway, rendu directement dans le terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Hauteur de la grille, en cellules.
    #[arg(short, long)]
    pub rows: Option<usize>,

    /// Largeur de la grille, en cellules.
    #[arg(short, long)]
    pub cols: Option<usize>,

    /// Générations par seconde.
    #[arg(short, long)]
    pub fps: Option<f32>,

    /// Encodage : ascii, braille, bigpixel, sixel.
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Remplissage aléatoire au lieu du planeur.
    #[arg(long, default_value_t = false)]
    pub random: bool,

    /// Proportion de cellules vivantes avec --random [0.0, 1.0].
    #[arg(long)]
    pub fraction: Option<f32>,

    /// Arrêt après N générations (0 = jamais).
    #[arg(short = 'n', long)]
    pub max_steps: Option<u64>,

    /// Graine RNG pour un remplissage reproductible.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fichier motif à poser sur la grille.
    #[arg(long)]
    pub pattern: Option<PathBuf>,

    /// Ajuster la grille à la taille du terminal.
    #[arg(long, default_value_t = false)]
    pub fit: bool,

    /// Fichier de configuration TOML (section [life]).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logs détaillés (niveau info).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Log filter from `--log-level`, raised to `info` by `--verbose`.
    #[must_use]
    pub fn log_filter(&self) -> log::LevelFilter {
        let level = self.log_level.parse().unwrap_or(log::LevelFilter::Warn);
        if self.verbose {
            level.max(log::LevelFilter::Info)
        } else {
            level
        }
    }

    /// Apply every flag that was given on top of `config`.
    ///
    /// # Errors
    /// Returns an error if `--encoding` names no known encoder.
    pub fn apply_overrides(&self, config: &mut RenderConfig) -> anyhow::Result<()> {
        if let Some(ref name) = self.encoding {
            config.encoding = name.parse::<Encoding>()?;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if self.random {
            config.random_fill = true;
        }
        if let Some(fraction) = self.fraction {
            config.random_fraction = fraction;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if self.seed.is_some() {
            config.rng_seed = self.seed;
        }
        if self.pattern.is_some() {
            config.pattern.clone_from(&self.pattern);
        }
        Ok(())
    }
}

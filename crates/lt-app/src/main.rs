use anyhow::{Context, Result};
use clap::Parser;
use lt_core::config::{RenderConfig, load_config};
use lt_core::stop::StopSignal;
use lt_render::session::RenderSession;
use lt_render::terminal::{TerminalGuard, fit_to_terminal};

pub mod cli;
pub mod scheduler;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Logging sur stderr, stdout reste réservé aux frames
    env_logger::Builder::new()
        .filter_level(cli.log_filter())
        .init();

    // 3. Config : fichier → overrides CLI → --fit → validation
    let config = resolve_config(&cli)?;

    // 4. Grille initiale
    let board = lt_life::seed_board(&config).context("Impossible de préparer la grille")?;

    // 5. Ctrl-C ne fait que lever le drapeau
    let stop = StopSignal::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.request_stop())
        .context("Impossible d'installer le gestionnaire Ctrl-C")?;

    // 6. Terminal + session ; le curseur revient au drop du guard
    let mut guard =
        TerminalGuard::enter(std::io::stdout()).context("Terminal indisponible")?;
    let session = RenderSession::new(config.encoding, config.rows, config.cols, std::io::stdout());
    let mut scheduler = scheduler::Scheduler::new(&config, board, session, stop);

    // 7. Boucle principale
    let result = scheduler.run();
    log::debug!(
        "état {:?}, population finale {}, {} octets écrits",
        scheduler.state(),
        scheduler.board().population(),
        scheduler.session().bytes_written()
    );

    // 8. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    drop(scheduler);
    if let Err(e) = guard.restore() {
        log::warn!("Impossible de réafficher le curseur : {e}");
    }

    let report = result?;
    log::info!(
        "{} générations, {} frames, {:.1} fps moyen",
        report.steps,
        report.frames,
        report.average_fps
    );
    Ok(())
}

/// Build the run configuration; nothing is started if it is invalid.
fn resolve_config(cli: &cli::Cli) -> Result<RenderConfig> {
    let mut config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => RenderConfig::default(),
    };
    cli.apply_overrides(&mut config)?;

    if cli.fit {
        match fit_to_terminal(config.encoding)? {
            Some((rows, cols)) => {
                log::info!("Grille ajustée au terminal : {rows}×{cols}");
                config.rows = rows;
                config.cols = cols;
            }
            None => log::warn!(
                "Taille du terminal inconnue pour {}, grille {}×{} conservée",
                config.encoding,
                config.rows,
                config.cols
            ),
        }
    }

    config.validate()?;
    Ok(config)
}

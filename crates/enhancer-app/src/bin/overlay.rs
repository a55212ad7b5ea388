//! Battery overlay entry point.
//!
//! Runs the overlay in the mode named by `[overlay] mode` in enhancer.toml.
//! Input and output work as for `enhanced-settings`.  A pending
//! launch-overlay flag is consumed on start.

use anyhow::Context;
use tracing::{info, warn};

use enhancer_app::application::ports::Signal;
use enhancer_app::application::session::{Flow, OverlaySession};
use enhancer_app::infrastructure::console::{render_overlay, StdinInput, CLEAR_SCREEN};
use enhancer_app::infrastructure::launcher::{host_ports, init_tracing, run_frames};
use enhancer_app::infrastructure::storage::app_config::load_config;
use enhancer_app::infrastructure::storage::flags::FlagFiles;

fn main() -> anyhow::Result<()> {
    let config = load_config().context("loading launcher config")?;
    init_tracing(&config.log_level);

    let paths = config.store_paths().context("resolving data directory")?;
    let flags = FlagFiles::from_paths(&paths);
    if flags.is_raised(Signal::LaunchOverlay) {
        info!("launch request found");
        if let Err(e) = flags.clear(Signal::LaunchOverlay) {
            warn!("could not clear launch flag: {e}");
        }
    }

    let mode = config.overlay.mode;
    let mut session = OverlaySession::start(host_ports(&paths), mode, config.screen_options());
    print!("{CLEAR_SCREEN}{}", render_overlay(&session.view(0)));

    let mut input = StdinInput::stdin();
    let frames = run_frames(&mut input, config.runtime.frame_interval(), |frame, elapsed_ms| {
        let flow = session.step(frame);
        if flow == Flow::Continue {
            print!("{CLEAR_SCREEN}{}", render_overlay(&session.view(elapsed_ms)));
        }
        flow
    });

    info!(?mode, "overlay stopped after {frames} frames");
    Ok(())
}

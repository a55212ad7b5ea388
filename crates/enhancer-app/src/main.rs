//! Enhanced Settings entry point.
//!
//! Runs the five-page settings menu on a desktop host: button names are read
//! from stdin one line per frame and each frame's view is printed to stdout.
//! Logs go to stderr.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()              -- enhancer.toml, defaults if absent
//!  └─ host_ports()               -- ConfigStore, FlagFiles, host adapters
//!  └─ SettingsSession::start()   -- load settings, apply startup brightness
//!  └─ run_frames()               -- poll → step → render until START / EOF
//! ```

use anyhow::Context;
use tracing::info;

use enhancer_app::application::session::{Flow, SettingsSession};
use enhancer_app::infrastructure::console::{render_settings, StdinInput, CLEAR_SCREEN};
use enhancer_app::infrastructure::launcher::{host_ports, init_tracing, run_frames};
use enhancer_app::infrastructure::storage::app_config::load_config;

fn main() -> anyhow::Result<()> {
    let config = load_config().context("loading launcher config")?;
    init_tracing(&config.log_level);

    let paths = config.store_paths().context("resolving data directory")?;
    info!("Enhanced Settings starting, config at {}", paths.config.display());

    let mut session = SettingsSession::start(host_ports(&paths), config.screen_options());
    print!("{CLEAR_SCREEN}{}", render_settings(&session.view()));

    let mut input = StdinInput::stdin();
    let frames = run_frames(&mut input, config.runtime.frame_interval(), |frame, _| {
        let flow = session.step(frame);
        if flow == Flow::Continue {
            print!("{CLEAR_SCREEN}{}", render_settings(&session.view()));
        }
        flow
    });

    info!("Enhanced Settings stopped after {frames} frames");
    Ok(())
}

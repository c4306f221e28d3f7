use anyhow::Context;
use relm4::prelude::*;
use tonight::config;
use tonight::gui::app::AppModel;
use whirl::{Animator, ThreadSpeed, choice};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match config::write_default_config() {
        Ok(path) => log::debug!("Config file: {}", path.display()),
        Err(e) => log::warn!("Could not write default config: {}", e),
    }

    let config = config::load_or_default();
    let path = &config.options_path;

    let choices = choice::load_options(path)
        .with_context(|| format!("Failed to load options from {}", path.display()))?;
    let wheel = Animator::new(choices, config.physics, ThreadSpeed::thread())
        .with_context(|| format!("No options found in {}", path.display()))?;

    log::info!(
        "Loaded {} options from {}",
        wheel.choices().len(),
        path.display()
    );

    let app = RelmApp::new("org.whirl.tonight");
    app.run::<AppModel>((wheel, config.appearance));

    Ok(())
}

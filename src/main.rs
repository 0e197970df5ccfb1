use anyhow::Context;
use shapeforge::config::EditorConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EditorConfig::default();
    log::info!(
        "Starting {} ({}x{})",
        config.window_title,
        config.window_size.0,
        config.window_size.1
    );

    shapeforge::run(config).context("editor exited with an error")
}

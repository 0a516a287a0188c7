use clap::Parser;

use glsketch_common::config::SketchConfig;

mod app;
mod args;

use app::App;
use args::Args;

fn main() {
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match SketchConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("could not load config {path:?}: {e}");
                std::process::exit(1);
            }
        },
        None => SketchConfig::default(),
    };

    let app = match App::new(&config, &args) {
        Ok(app) => app,
        Err(e) => {
            log::error!("could not start the textured quad sketch: {e}");
            std::process::exit(1);
        }
    };

    app.run();
}

/// Persp Terminal Demo - Wire cubes in perspective
///
/// Usage: persp-terminal [config.toml]
/// Controls:
///   - A/D, W/S, Q/E: Pan along the camera's x, y and z axes
///   - Arrow Keys: Turn
///   - , / .: Roll
///   - ESC / Ctrl+C: Quit

use anyhow::Context;
use log::info;
use persp_core::{Observer, Projection, ProjectionController, Vector3, Viewer};
use persp_terminal::{Config, TerminalApp};
use std::env;
use std::fs::File;
use std::path::Path;

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    );
    if let Some(path) = &config.logging.file {
        let file = File::create(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Four cubes in a square with a few polygons around the first
fn demo_scene() -> Projection {
    let cube = 100.0;
    let mut scene = Projection::new();

    scene.add_wire_cube(Vector3::new(0.0, 0.0, 0.0), cube);
    scene.add_wire_cube(Vector3::new(cube * 4.0, 0.0, 0.0), cube);
    scene.add_wire_cube(Vector3::new(0.0, cube * 4.0, 0.0), cube);
    scene.add_wire_cube(Vector3::new(cube * 4.0, cube * 4.0, 0.0), cube);

    scene.add_polygon([
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(cube, cube, cube),
        Vector3::new(-cube, cube, cube),
    ]);
    scene.add_polygon([
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(cube, 0.0, 0.0),
    ]);
    scene.add_polygon([Vector3::new(0.0, 0.0, 0.0), Vector3::new(-cube, 0.0, 0.0)]);
    scene.add_polygon([
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(cube, 0.0, cube),
        Vector3::new(0.0, 3.0 * cube, 0.0),
    ]);
    scene.add_polygon([
        Vector3::new(-cube, 0.0, -cube),
        Vector3::new(cube, 0.0, 2.0 * cube),
        Vector3::new(-cube, 3.0 * cube, -cube),
    ]);

    scene
}

fn main() -> anyhow::Result<()> {
    let config = match env::args().nth(1) {
        Some(path) => Config::load(Path::new(&path))
            .with_context(|| format!("could not load configuration from {}", path))?,
        None => Config::default(),
    };
    init_logging(&config)?;

    let scene = demo_scene();
    info!("scene has {} primitives", scene.primitives().len());

    let observer = Observer::looking_at_origin(config.screen.focal, config.screen.dimensions);
    let controller = ProjectionController::new(observer, config.ui);

    let mut app = TerminalApp::new(Viewer::new(scene, controller), &config)?;
    app.run()?;

    let origin = app.observer().origin;
    println!(
        "Viewer closed at ({:.1}, {:.1}, {:.1})",
        origin.x, origin.y, origin.z
    );
    Ok(())
}

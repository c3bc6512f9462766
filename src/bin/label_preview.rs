use std::error::Error;

use label_grid::loaders::scene::load_scene;
use label_grid::visualization::save_category_preview;
use label_grid::{DatasetConfig, TargetRasterizer};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args();
    let _binary = args.next();
    let (config_path, scene_path, output_path) = match (args.next(), args.next(), args.next()) {
        (Some(config), Some(scene), Some(output)) => (config, scene, output),
        _ => {
            eprintln!("usage: label_preview <config.yaml> <scene.yaml> <output.png>");
            return Ok(());
        }
    };

    let config = DatasetConfig::load(&config_path)?;
    let rasterizer = TargetRasterizer::new(config.raster_config()?);
    let frame = load_scene(&scene_path)?;

    let (grid, stats) = rasterizer.rasterize_frame_with_stats(&frame.points, &frame.boxes);
    log::info!(
        "{}: {} boxes, {} written, {} sparse, {} unclassified, {} cells",
        scene_path,
        stats.boxes,
        stats.written,
        stats.sparse,
        stats.unclassified,
        stats.cells_written
    );

    save_category_preview(&grid, &output_path)?;
    Ok(())
}

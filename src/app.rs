use crate::error::AppError;
use crate::io::config::Config;
use crate::io::image::save_framebuffer;
use crate::pipeline::renderer::WireframeRenderer;
use crate::scene::loader::ObjAssetStore;
use crate::showcase::Page;
use crate::showcase::stage::Stage;
use crate::ui::input::{Action, poll_actions};
use log::{debug, info, warn};
use minifb::{Key, Window, WindowOptions};
use std::time::{Duration, Instant};

/// Headless runs wait this long for background model loads before drawing.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

fn window_title(stage: &Stage) -> String {
    match stage.page() {
        Page::Cabinet => format!("Showcase - {}", stage.cabinet().active_category().key),
        Page::Perfume => {
            let perfume = stage.perfume();
            let mut title = match perfume.selected() {
                Some(p) => format!(
                    "Showcase - {} ({}, {}) ${:.2}",
                    p.name, p.brand, p.family, p.price
                ),
                None => "Showcase - no perfume matches".to_string(),
            };
            if stage.searching() {
                title.push_str(&format!(" - search: {}_", perfume.query()));
            } else if !perfume.query().trim().is_empty() {
                title.push_str(&format!(" - \"{}\"", perfume.query().trim()));
            }
            title
        }
    }
}

/// Runs the interactive window until Escape or close.
pub fn run_gui(config: Config, config_path: Option<&str>, page: Page) -> Result<(), AppError> {
    let width = config.window.width;
    let height = config.window.height;

    info!("Starting GUI mode ({}x{})...", width, height);
    info!(
        "Controls: Tab=Switch page, 1-6/Left/Right=Category, Up/Down=Hover, Enter=Click, F=Family, /=Search, R=Reload Config"
    );

    let mut window = Window::new(
        "Showcase",
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(config.window.fps);

    let mut stage = Stage::new(&config, page, Box::new(ObjAssetStore::new()))?;
    let mut renderer = WireframeRenderer::new(width, height);

    let mut frame_count = 0;
    let mut last_fps_update = Instant::now();
    let mut last_frame_time = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        for action in poll_actions(&window, stage.page(), stage.searching()) {
            if action == Action::Reload {
                reload(&mut stage, config_path);
            } else {
                stage.apply(action);
            }
        }

        stage.tick(dt);
        stage.render(&mut renderer);
        window.update_with_buffer(renderer.framebuffer.pixels(), width, height)?;
        window.set_title(&window_title(&stage));

        frame_count += 1;
        if last_fps_update.elapsed().as_secs_f32() >= 2.0 {
            info!(
                "Average FPS: {:.1}",
                frame_count as f32 / last_fps_update.elapsed().as_secs_f32()
            );
            frame_count = 0;
            last_fps_update = Instant::now();
        }
    }
    Ok(())
}

fn reload(stage: &mut Stage, config_path: Option<&str>) {
    let Some(path) = config_path else {
        warn!("No config file given; nothing to reload.");
        return;
    };
    info!("Reloading configuration...");
    match Config::load(path) {
        Ok(new_config) => match stage.reload(&new_config, Box::new(ObjAssetStore::new())) {
            Ok(()) => info!("Hot reload successful!"),
            Err(e) => warn!("Failed to reload config: {}", e),
        },
        Err(e) => warn!("Failed to reload config: {}", e),
    }
}

/// Options for a headless run.
#[derive(Debug, Clone)]
pub struct HeadlessRun {
    pub page: Page,
    pub frames: u32,
    /// Category (cabinet) selected halfway through, to capture a turn.
    pub switch_to: Option<usize>,
    pub output: String,
}

/// Simulates `frames` ticks at the configured rate and saves the last frame.
pub fn run_cli(config: Config, run: HeadlessRun) -> Result<(), AppError> {
    info!("Starting CLI mode...");
    let start_time = Instant::now();

    let mut stage = Stage::new(&config, run.page, Box::new(ObjAssetStore::new()))?;
    if !stage.settle_assets(SETTLE_TIMEOUT) {
        warn!("Rendering with models still loading.");
    }

    let dt = 1.0 / config.window.fps.max(1) as f32;
    for frame in 0..run.frames {
        if frame == run.frames / 2
            && let Some(index) = run.switch_to
        {
            stage.apply(Action::SelectCategory(index));
        }
        stage.tick(dt);
    }
    debug!(
        "Cabinet angle {:.4}, perfume angle {:.4}",
        stage.cabinet().current_angle(),
        stage.perfume().current_angle()
    );

    let mut renderer = WireframeRenderer::new(config.window.width, config.window.height);
    stage.render(&mut renderer);
    info!(
        "{} frames simulated and drawn in {:.2?}",
        run.frames,
        start_time.elapsed()
    );

    info!("Saving output to '{}'...", run.output);
    save_framebuffer(&renderer.framebuffer, &run.output)?;
    info!("Done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_run_writes_image() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cabinet.png");
        let mut config = Config::default();
        config.window.width = 64;
        config.window.height = 36;

        run_cli(
            config,
            HeadlessRun {
                page: Page::Cabinet,
                frames: 10,
                switch_to: Some(1),
                output: output.to_str().unwrap().to_string(),
            },
        )
        .unwrap();

        let img = image::open(&output).unwrap();
        assert_eq!((img.width(), img.height()), (64, 36));
    }

    #[test]
    fn perfume_title_shows_price_and_search() {
        let mut stage = Stage::new(
            &Config::default(),
            Page::Perfume,
            Box::new(ObjAssetStore::new()),
        )
        .unwrap();
        assert_eq!(
            window_title(&stage),
            "Showcase - Rose Nocturne (Maison Aube, Floral) $128.00"
        );

        stage.apply(Action::BeginSearch);
        stage.apply(Action::QueryChar('v'));
        assert_eq!(
            window_title(&stage),
            "Showcase - Amber Veil (Maison Aube, Oriental) $142.00 - search: v_"
        );
        stage.apply(Action::EndSearch);
        assert!(window_title(&stage).ends_with(" - \"v\""));
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("frame.unknown");
        let mut config = Config::default();
        config.window.width = 8;
        config.window.height = 8;

        let result = run_cli(
            config,
            HeadlessRun {
                page: Page::Perfume,
                frames: 1,
                switch_to: None,
                output: output.to_str().unwrap().to_string(),
            },
        );
        assert!(matches!(result, Err(AppError::Image(_))));
    }
}

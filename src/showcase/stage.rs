use crate::io::config::Config;
use crate::pipeline::renderer::{DrawItem, WireframeRenderer};
use crate::scene::camera::Camera;
use crate::scene::frame::{FrameScheduler, FrameTick, ListenerId};
use crate::scene::loader::{AssetSource, LoadState};
use crate::error::ShowcaseError;
use crate::showcase::Page;
use crate::showcase::cabinet::Cabinet;
use crate::showcase::perfume::PerfumeShowcase;
use crate::ui::input::Action;
use log::{debug, info, warn};
use nalgebra::{Point3, Vector3};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

/// Both pages, the frame scheduler driving their turntables, and the shared
/// asset source.
///
/// Each page registers one frame listener; rebuilding a page (config reload)
/// unregisters the old listener before the replacement is registered, so a
/// discarded page never sees another tick.
pub struct Stage {
    page: Page,
    searching: bool,
    cabinet: Rc<RefCell<Cabinet>>,
    perfume: Rc<RefCell<PerfumeShowcase>>,
    listeners: Vec<ListenerId>,
    scheduler: FrameScheduler,
    assets: Box<dyn AssetSource>,
    camera: Camera,
    background: (Vector3<f32>, Vector3<f32>),
}

fn build_camera(config: &Config) -> Camera {
    Camera::new_perspective(
        Point3::from(config.camera.position),
        Point3::from(config.camera.target),
        Vector3::from(config.camera.up),
        config.camera.fov.to_radians(),
        config.window.width as f32 / config.window.height.max(1) as f32,
        config.camera.near,
        config.camera.far,
    )
}

impl Stage {
    pub fn new(
        config: &Config,
        page: Page,
        assets: Box<dyn AssetSource>,
    ) -> Result<Self, ShowcaseError> {
        let mut stage = Self {
            page,
            searching: false,
            cabinet: Rc::new(RefCell::new(Cabinet::from_config(&config.cabinet)?)),
            perfume: Rc::new(RefCell::new(PerfumeShowcase::from_config(&config.perfume))),
            listeners: Vec::new(),
            scheduler: FrameScheduler::new(),
            assets,
            camera: build_camera(config),
            background: (
                Vector3::from(config.window.background_top),
                Vector3::from(config.window.background_bottom),
            ),
        };
        stage.attach_pages();
        Ok(stage)
    }

    fn attach_pages(&mut self) {
        for id in self.listeners.drain(..) {
            self.scheduler.unregister(id);
        }

        let cabinet = Rc::clone(&self.cabinet);
        self.listeners
            .push(self.scheduler.register_frame_listener(move |tick| {
                cabinet.borrow_mut().on_frame(tick);
            }));
        let perfume = Rc::clone(&self.perfume);
        self.listeners
            .push(self.scheduler.register_frame_listener(move |tick| {
                perfume.borrow_mut().on_frame(tick);
            }));

        self.cabinet.borrow().preload(self.assets.as_mut());
        self.perfume.borrow().preload(self.assets.as_mut());
    }

    /// Rebuilds both pages from a fresh config. Selection state is reset.
    /// On error the current pages stay in place.
    pub fn reload(
        &mut self,
        config: &Config,
        assets: Box<dyn AssetSource>,
    ) -> Result<(), ShowcaseError> {
        let cabinet = Cabinet::from_config(&config.cabinet)?;
        self.cabinet = Rc::new(RefCell::new(cabinet));
        self.searching = false;
        self.perfume = Rc::new(RefCell::new(PerfumeShowcase::from_config(&config.perfume)));
        self.assets = assets;
        self.camera = build_camera(config);
        self.background = (
            Vector3::from(config.window.background_top),
            Vector3::from(config.window.background_bottom),
        );
        self.attach_pages();
        info!("Stage rebuilt with {} listeners", self.scheduler.listener_count());
        Ok(())
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// True while keys type into the perfume query.
    pub fn searching(&self) -> bool {
        self.searching
    }

    pub fn cabinet(&self) -> Ref<'_, Cabinet> {
        self.cabinet.borrow()
    }

    pub fn perfume(&self) -> Ref<'_, PerfumeShowcase> {
        self.perfume.borrow()
    }

    /// Applies one user action. `Reload` is left to the caller, which owns
    /// the config path.
    pub fn apply(&mut self, action: Action) {
        debug!("Action: {:?}", action);
        match action {
            Action::SelectCategory(index) => {
                if let Err(e) = self.cabinet.borrow_mut().select(index) {
                    warn!("{}", e);
                }
            }
            Action::NextCategory => self.cabinet.borrow_mut().select_next(),
            Action::PreviousCategory => self.cabinet.borrow_mut().select_previous(),
            Action::HoverNext => self.cabinet.borrow_mut().hover_step(true),
            Action::HoverPrevious => self.cabinet.borrow_mut().hover_step(false),
            Action::Click => {
                let cabinet = self.cabinet.borrow();
                if let Some(slot) = cabinet.hovered() {
                    cabinet.click(slot).ok();
                }
            }
            Action::CycleFamily => self.perfume.borrow_mut().cycle_filter(),
            Action::NextPerfume => self.perfume.borrow_mut().select_step(true),
            Action::PreviousPerfume => self.perfume.borrow_mut().select_step(false),
            Action::RotateLeft => self.perfume.borrow_mut().rotate(false),
            Action::RotateRight => self.perfume.borrow_mut().rotate(true),
            Action::BeginSearch => self.searching = self.page == Page::Perfume,
            Action::QueryChar(c) if self.searching => self.perfume.borrow_mut().push_query(c),
            Action::QueryBackspace if self.searching => self.perfume.borrow_mut().pop_query(),
            Action::QueryChar(_) | Action::QueryBackspace => {}
            Action::EndSearch => {
                self.searching = false;
                info!("Search: '{}'", self.perfume.borrow().query());
            }
            Action::SwitchPage => {
                self.page = self.page.toggled();
                info!("Page: {:?}", self.page);
            }
            Action::Reload => {}
        }
    }

    pub fn tick(&mut self, delta: f32) -> FrameTick {
        self.scheduler.tick(delta)
    }

    pub fn draw_items(&mut self) -> Vec<DrawItem> {
        match self.page {
            Page::Cabinet => self.cabinet.borrow_mut().draw_items(self.assets.as_mut()),
            Page::Perfume => self.perfume.borrow_mut().draw_items(self.assets.as_mut()),
        }
    }

    pub fn render(&mut self, renderer: &mut WireframeRenderer) {
        let items = self.draw_items();
        let (top, bottom) = self.background;
        renderer.clear_gradient(top, bottom);
        renderer.draw(&self.camera, &items);
    }

    /// Blocks until no model of either page is pending, or `timeout` passes.
    /// Returns true when everything settled.
    pub fn settle_assets(&mut self, timeout: Duration) -> bool {
        let mut paths: Vec<String> = self
            .cabinet
            .borrow()
            .categories()
            .iter()
            .flat_map(|c| c.model_paths().map(str::to_string).collect::<Vec<_>>())
            .collect();
        paths.extend(
            self.perfume
                .borrow()
                .filtered()
                .iter()
                .filter_map(|p| p.model_path.clone()),
        );

        let deadline = Instant::now() + timeout;
        loop {
            let pending = paths
                .iter()
                .filter(|p| matches!(self.assets.load(p), LoadState::Pending))
                .count();
            if pending == 0 {
                return true;
            }
            if Instant::now() >= deadline {
                warn!("{} assets still loading after {:?}", pending, timeout);
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

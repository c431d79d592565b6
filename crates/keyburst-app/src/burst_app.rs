//! Burst application implementing winit ApplicationHandler
//!
//! Owns the engine, the camera and the GPU state, and drives the single
//! per-frame pass: shake, integrate, upload, draw.

use crate::config::AppConfig;
use keyburst_core::KeyburstError;
use keyburst_particles::{DirtyBuffers, ParticleEngine, Trigger};
use keyburst_render::{Camera, ParticlePipeline, RenderContext};
use keyburst_runtime::{trigger_for_key, GameClock, IdleLabel};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Fullscreen, Window, WindowId};

pub struct BurstApp {
    config: AppConfig,
    engine: ParticleEngine,
    clock: GameClock,
    idle_label: IdleLabel,
    last_key: Option<String>,
    title_active: Option<bool>,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    pipeline: Option<ParticlePipeline>,
    camera: Camera,
    // Accumulated since the last upload
    pending: DirtyBuffers,

    error: Option<KeyburstError>,
}

impl BurstApp {
    pub fn new(config: AppConfig, seed: u32) -> Self {
        let engine = ParticleEngine::with_seed(config.engine.clone(), seed);
        let idle_label = IdleLabel::new(
            config.idle_label.debounce(),
            config.idle_label.ignore_first,
        );
        let mut camera = Camera::look_at(config.camera.position, keyburst_core::Vec3::ZERO);
        camera.fov = config.camera.fov;

        Self {
            config,
            engine,
            clock: GameClock::new(),
            idle_label,
            last_key: None,
            title_active: None,
            window: None,
            render_context: None,
            pipeline: None,
            camera,
            pending: DirtyBuffers::NONE,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<KeyburstError> {
        self.error.take()
    }

    pub fn engine(&self) -> &ParticleEngine {
        &self.engine
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> keyburst_core::Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| KeyburstError::RenderError(format!("window creation: {e}")))?,
        );

        if self.config.window.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        self.window = Some(window.clone());

        let render_context = pollster::block_on(RenderContext::new(window))?;
        self.camera.aspect = render_context.aspect_ratio();

        let pipeline = ParticlePipeline::new(
            &render_context.device,
            render_context.config.format,
            self.engine.buffers(),
            self.engine.material(),
        );
        info!(
            instances = pipeline.instance_count(),
            format = ?render_context.config.format,
            "particle pipeline ready"
        );

        self.render_context = Some(render_context);
        self.pipeline = Some(pipeline);

        // The label's first observed value is the empty trigger at startup
        self.idle_label.on_value(None, Instant::now());
        self.update_title(Instant::now());
        Ok(())
    }

    fn on_key(&mut self, trigger: Option<Trigger>) {
        let now = Instant::now();
        self.pending = self.pending | self.engine.on_trigger(trigger.as_ref());
        self.idle_label.on_value(trigger.as_ref(), now);
        if let Some(trigger) = trigger {
            self.last_key = Some(trigger.key);
        }
        // Force a title refresh so the newest key shows while already active
        self.title_active = None;
        self.update_title(now);
    }

    fn update_title(&mut self, now: Instant) {
        let active = self.idle_label.poll(now);
        if self.title_active == Some(active) {
            return;
        }
        self.title_active = Some(active);

        let Some(window) = &self.window else {
            return;
        };
        let title = match (&self.last_key, active) {
            (Some(key), true) => format!("{} - {}", self.config.window.title, key),
            _ => format!("{} - press any key", self.config.window.title),
        };
        window.set_title(&title);
    }

    fn tick(&mut self) {
        let dt = self.clock.tick() as f32;
        self.pending = self.pending | self.engine.on_frame(dt, &mut self.camera);
        self.update_title(Instant::now());
    }

    fn render(&mut self) {
        let Some(context) = &self.render_context else {
            return;
        };
        let Some(pipeline) = &self.pipeline else {
            return;
        };

        if self.pending.any() {
            pipeline.upload(&context.queue, self.engine.buffers(), self.pending);
            self.pending = DirtyBuffers::NONE;
        }
        pipeline.update_uniforms(&context.queue, &self.camera, context.viewport());

        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                return;
            }
            Err(e) => {
                warn!(error = ?e, "surface error");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        pipeline.render(context, &view);
        output.present();
    }

    fn toggle_fullscreen(&self) {
        if let Some(window) = &self.window {
            if window.fullscreen().is_some() {
                window.set_fullscreen(None);
            } else {
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
        }
    }
}

impl ApplicationHandler for BurstApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            error!(error = %e, "failed to initialize");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                    self.camera.aspect = context.aspect_ratio();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    match &event.logical_key {
                        Key::Named(NamedKey::Escape) => {
                            event_loop.exit();
                            return;
                        }
                        Key::Named(NamedKey::F11) => {
                            self.toggle_fullscreen();
                            return;
                        }
                        _ => {}
                    }
                }

                if let Some(trigger) = trigger_for_key(&event.logical_key, event.state, event.repeat)
                {
                    self.on_key(Some(trigger));
                }
            }

            WindowEvent::RedrawRequested => {
                self.tick();
                self.render();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_applies_config() {
        let mut config = AppConfig::default();
        config.camera.fov = 60.0;
        config.engine.burst.capacity = 1000;
        config.engine.burst.burst_count = 200;

        let app = BurstApp::new(config, 9);
        assert_eq!(app.camera.fov, 60.0);
        assert_eq!(app.camera.position, keyburst_core::Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(app.engine().draw_count(), 1000);
    }

    #[test]
    fn key_without_window_still_bursts() {
        let mut app = BurstApp::new(AppConfig::default(), 3);
        app.idle_label.on_value(None, Instant::now());
        app.on_key(Some(Trigger::new("z")));

        assert_eq!(app.engine().alive_count(), 500);
        assert_eq!(app.pending, DirtyBuffers::ALL);
        assert_eq!(app.last_key.as_deref(), Some("z"));
        assert!(app.idle_label.is_active());
    }

    #[test]
    fn modifier_key_sets_label_but_spawns_nothing() {
        let mut app = BurstApp::new(AppConfig::default(), 3);
        app.idle_label.on_value(None, Instant::now());
        app.on_key(Some(Trigger::new("Shift")));

        assert_eq!(app.engine().alive_count(), 0);
        assert!(!app.pending.any());
        assert!(app.idle_label.is_active());
    }
}

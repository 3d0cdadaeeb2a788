//! Orbital Shapes
//!
//! Click to drop shapes that pull on each other, collide and leave fading trails.

use winit::{
    application::ApplicationHandler,
    event::{TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use orbital_core::{Command, World};
use orbital_shapes::config::AppConfig;
use orbital_shapes::input::{InputAction, InputMapper};
use orbital_shapes::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    renderer: Option<RenderSystem>,
    world: World,
    simulation: SimulationSystem,
    /// Last pointer position in physical pixels
    cursor: Option<(f32, f32)>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let mut world = World::with_config(
            config.sketch.clone(),
            config.window.width as f32,
            config.window.height as f32,
        );
        if let Some(seed) = config.simulation.seed {
            world = world.with_seed(seed);
            log::info!("Using fixed seed {}", seed);
        }
        world.set_running(config.simulation.start_running);

        let simulation = SimulationSystem::new(&config.simulation);

        Self {
            config,
            window: None,
            renderer: None,
            world,
            simulation,
            cursor: None,
        }
    }

    /// Apply a mapped input action
    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::Restart => {
                log::info!("Restarting sketch");
                self.world.queue(Command::Restart);
            }
            other => {
                if let Some(command) = other.to_command(self.cursor) {
                    log::debug!("Queued {:?}", command);
                    self.world.queue(command);
                }
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            self.config.window.vsync,
            self.world.config().background,
        ) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        // The world was sized from the config; follow the real window
        let (width, height) = renderer.size();
        self.world.queue(Command::Resize {
            width: width as f32,
            height: height as f32,
        });

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if physical_size.width == 0 || physical_size.height == 0 {
                    return;
                }
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size.width, physical_size.height);
                }
                self.world.queue(Command::Resize {
                    width: physical_size.width as f32,
                    height: physical_size.height as f32,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some((position.x as f32, position.y as f32));
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        // Held keys only repeat slider nudges
                        if event.repeat && !matches!(action, InputAction::Adjust(..)) {
                            return;
                        }
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(action) = InputMapper::map_mouse_button(button, state) {
                    self.handle_action(action, event_loop);
                }
            }

            WindowEvent::Touch(touch) => {
                if touch.phase == TouchPhase::Started {
                    self.world.queue(Command::SpawnAt {
                        x: touch.location.x as f32,
                        y: touch.location.y as f32,
                    });
                }
            }

            WindowEvent::RedrawRequested => {
                let (Some(window), Some(renderer)) = (self.window.as_mut(), self.renderer.as_mut()) else {
                    return;
                };

                let frame = self.simulation.update(&mut self.world, renderer.batch_mut());

                if !frame.is_idle() {
                    if self.config.debug.show_status {
                        window.update_title(&self.world);
                    }

                    match renderer.render_frame() {
                        Ok(()) => {}
                        Err(RenderError::SurfaceLost) => renderer.recover_surface(),
                        Err(RenderError::OutOfMemory) => {
                            log::error!("GPU out of memory");
                            event_loop.exit();
                            return;
                        }
                        Err(e) => log::warn!("{}", e),
                    }
                }

                // Request next frame
                window.request_redraw();
            }

            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration picks the default log level, so load it first
    let config = AppConfig::load();
    let log_level = config
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    log::info!("Starting Orbital Shapes");

    // Create event loop
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

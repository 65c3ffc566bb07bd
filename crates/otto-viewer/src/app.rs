//! Main viewer application: drives the cycle clock once per display frame
//! and paints the engine plus control panels with egui.

use crate::canvas::{color32, EguiSurface};
use crate::config::{ViewerConfig, ViewerOptions};
use crate::context::RenderContext;
use crate::input::{action_for_key, apply_to_clock, ViewerAction};
use crate::panels::{cycle_explanation, phase_header, ControlPanel, RenderStats};
use anyhow::{Context, Result};
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use otto_render::{Frame, KinematicRenderer};
use otto_runtime::{CycleClock, CycleEvent, EventBus, FrameHandle, FrameScheduler};
use rand::rngs::ThreadRng;
use std::path::Path;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{ModifiersState, PhysicalKey};
use winit::window::{Window, WindowId};

pub const WINDOW_TITLE: &str = "Otto Engine Simulator";

/// Set by the watcher thread, cleared by the frame loop
#[derive(Default)]
struct ReloadState {
    needs_reload: bool,
}

/// Run the viewer until the window is closed
pub fn run(options: ViewerOptions) -> Result<()> {
    let config = options.load_config()?;
    let theme = config.resolved_theme()?;

    let mut clock =
        CycleClock::with_config(config.sim.clock).context("Invalid clock configuration")?;
    if let Some(speed) = options.speed {
        clock = clock.with_speed(speed);
    }
    if options.run {
        clock.start();
    }
    let renderer = KinematicRenderer::with_thread_rng(config.sim.layout, theme);

    let reload = Arc::new(Mutex::new(ReloadState::default()));

    let _watcher = if options.watch {
        match options.config_file() {
            Some(path) => {
                let state = Arc::clone(&reload);
                let (tx, rx) = mpsc::channel::<DebounceEventResult>();
                let mut debouncer = new_debouncer(Duration::from_millis(300), tx)?;

                // Watch the directory so editors that replace the file are seen
                let dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                debouncer
                    .watcher()
                    .watch(dir, RecursiveMode::NonRecursive)
                    .with_context(|| format!("Failed to watch {}", dir.display()))?;

                let file_name = path.file_name().map(|n| n.to_os_string());
                std::thread::spawn(move || {
                    for result in rx {
                        match result {
                            Ok(events) => {
                                let touched = events
                                    .iter()
                                    .any(|e| e.path.file_name() == file_name.as_deref());
                                if touched {
                                    if let Ok(mut state) = state.lock() {
                                        state.needs_reload = true;
                                    }
                                }
                            }
                            Err(e) => warn!("Watch error: {e:?}"),
                        }
                    }
                });

                info!("Watching {} for changes", path.display());
                Some(debouncer)
            }
            None => {
                warn!("--watch given but no config file found; nothing to watch");
                None
            }
        }
    } else {
        None
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(options, clock, renderer, reload);
    event_loop.run_app(&mut app)?;

    Ok(())
}

/// The main viewer application
pub struct ViewerApp {
    options: ViewerOptions,
    reload: Arc<Mutex<ReloadState>>,

    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,

    clock: CycleClock,
    renderer: KinematicRenderer<ThreadRng>,
    events: EventBus,
    scheduler: FrameScheduler,
    frame_handle: Option<FrameHandle>,
    modifiers: ModifiersState,

    // egui state
    egui_ctx: egui::Context,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,

    control_panel: ControlPanel,
    render_stats: RenderStats,
}

impl ViewerApp {
    fn new(
        options: ViewerOptions,
        clock: CycleClock,
        renderer: KinematicRenderer<ThreadRng>,
        reload: Arc<Mutex<ReloadState>>,
    ) -> Self {
        Self {
            options,
            reload,
            window: None,
            render_context: None,
            clock,
            renderer,
            events: EventBus::new(),
            scheduler: FrameScheduler::new(),
            frame_handle: None,
            modifiers: ModifiersState::empty(),
            egui_ctx: egui::Context::default(),
            egui_winit: None,
            egui_renderer: None,
            control_panel: ControlPanel::new(),
            render_stats: RenderStats::new(),
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(760.0, 640.0))
            .with_min_inner_size(LogicalSize::new(420.0, 420.0));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create viewer window")?,
        );
        self.window = Some(window.clone());

        let render_context = pollster::block_on(RenderContext::new(window.clone()))
            .context("Failed to initialize viewer render context")?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &render_context.device,
            render_context.config.format,
            None,
            1,
            false,
        );

        self.render_context = Some(render_context);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        self.frame_handle = Some(self.scheduler.schedule());

        info!(
            running = self.clock.is_running(),
            speed = self.clock.speed(),
            "viewer ready"
        );
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(handle) = self.frame_handle.take() {
            handle.cancel();
        }
        event_loop.exit();
    }

    fn check_reload(&mut self) {
        let needs_reload = match self.reload.lock() {
            Ok(mut state) => std::mem::take(&mut state.needs_reload),
            Err(_) => false,
        };
        if !needs_reload {
            return;
        }

        match self
            .options
            .load_config()
            .and_then(|config| self.apply_config(&config))
        {
            Ok(()) => info!("Reloaded config"),
            Err(e) => warn!("Failed to reload config: {e:#}"),
        }
    }

    fn apply_config(&mut self, config: &ViewerConfig) -> Result<()> {
        let theme = config.resolved_theme()?;
        self.clock.set_config(config.sim.clock)?;
        self.renderer.set_layout(config.sim.layout);
        self.renderer.set_theme(theme);
        Ok(())
    }

    fn apply_action(&mut self, action: ViewerAction, event_loop: &ActiveEventLoop) {
        match action {
            ViewerAction::ToggleStats => {
                self.render_stats.visible = !self.render_stats.visible;
                debug!(visible = self.render_stats.visible, "stats panel toggled");
            }
            ViewerAction::Exit => self.shutdown(event_loop),
            other => {
                let was_running = self.clock.is_running();
                apply_to_clock(&mut self.clock, other);
                if was_running != self.clock.is_running() {
                    info!(
                        angle = self.clock.angle_degrees(),
                        "Engine {}",
                        if self.clock.is_running() { "started" } else { "stopped" }
                    );
                }
            }
        }
    }

    fn log_events(&mut self) {
        for event in self.events.drain() {
            match event {
                CycleEvent::PhaseChanged { to, angle, .. } => {
                    info!(angle, "{to}");
                }
                CycleEvent::CycleCompleted { cycles } => {
                    debug!(cycles, "cycle completed");
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(elapsed_ms) = self.scheduler.begin_frame() else {
            return;
        };

        self.check_reload();

        // The clock advances even when the frame below cannot be presented
        let events = self.clock.tick(elapsed_ms);
        self.events.extend(events);
        self.log_events();

        let frame = self.renderer.render_state(&self.clock.current_state());

        let Some(context) = self.render_context.as_mut() else {
            return;
        };
        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("surface lost, reconfiguring");
                context.reconfigure();
                return;
            }
            Err(e) => {
                warn!("Surface error, skipping frame: {e:?}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.render_stats.record_frame();

        let actions = self.render_egui(&view, &frame);
        output.present();

        for action in actions {
            self.apply_action(action, event_loop);
        }
    }

    fn render_egui(
        &mut self,
        target_view: &wgpu::TextureView,
        frame: &Frame,
    ) -> Vec<ViewerAction> {
        let mut actions = Vec::new();

        let Some(window) = self.window.clone() else {
            return actions;
        };
        let (Some(context), Some(egui_winit), Some(egui_renderer)) = (
            self.render_context.as_ref(),
            self.egui_winit.as_mut(),
            self.egui_renderer.as_mut(),
        ) else {
            return actions;
        };

        let raw_input = egui_winit.take_egui_input(&window);

        let clock = &self.clock;
        let control_panel = &self.control_panel;
        let render_stats = &self.render_stats;
        let background = color32(self.renderer.theme().background);
        let state = clock.current_state();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::TopBottomPanel::top("controls_panel").show(ctx, |ui| {
                ui.add_space(4.0);
                actions.extend(control_panel.ui(ui, clock));
                ui.add_space(4.0);
            });

            egui::SidePanel::right("phase_panel")
                .default_width(260.0)
                .resizable(true)
                .show(ctx, |ui| {
                    phase_header(ui, &state);
                    ui.separator();
                    cycle_explanation(ui, state.phase());
                });

            if render_stats.visible {
                egui::TopBottomPanel::bottom("stats_panel").show(ctx, |ui| {
                    render_stats.ui(ui, clock);
                });
            }

            egui::CentralPanel::default()
                .frame(egui::Frame::none().fill(background))
                .show(ctx, |ui| {
                    EguiSurface::paint(ui, frame);
                });
        });

        egui_winit.handle_platform_output(&window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [context.config.width, context.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui Encoder"),
            });

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&context.device, &context.queue, *id, image_delta);
        }

        egui_renderer.update_buffers(
            &context.device,
            &context.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        context.queue.submit(std::iter::once(encoder.finish()));

        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        actions
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                tracing::error!("Failed to initialize viewer: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::ModifiersChanged(mods) = &event {
            self.modifiers = mods.state();
        }

        // Let egui handle the event first
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        let shift = self.modifiers.shift_key();
                        if let Some(action) = action_for_key(code, shift, &self.clock) {
                            self.apply_action(action, event_loop);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.scheduler.is_active() {
            event_loop.set_control_flow(ControlFlow::Poll);
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}

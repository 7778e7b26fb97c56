use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{error, info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::input::ActionStates;
use super::metrics::MetricsAccumulator;
use super::rendering::Viewport;
use super::scene::SceneHost;
use super::{InputAction, InputSnapshot, Renderer, Rgba, Scene, SceneCommand};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    /// Logical canvas size; the framebuffer is letterboxed into the window.
    pub width: u32,
    pub height: u32,
    pub background: Rgba,
    pub asset_root: PathBuf,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
    pub max_render_fps: Option<u32>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Room".to_string(),
            width: 960,
            height: 540,
            background: [152, 231, 95, 255],
            asset_root: PathBuf::from("assets"),
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(5),
            max_render_fps: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("logical canvas size must be non-zero, got {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig, scene: Box<dyn Scene>) -> Result<(), AppError> {
    if config.width == 0 || config.height == 0 {
        return Err(AppError::InvalidCanvasSize {
            width: config.width,
            height: config.height,
        });
    }

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
            .with_min_inner_size(LogicalSize::new(
                (config.width / 2).max(1) as f64,
                (config.height / 2).max(1) as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(
        Arc::clone(&window),
        Viewport {
            width: config.width,
            height: config.height,
        },
        config.background,
        config.asset_root.clone(),
    )
    .map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let target_tps = config.target_tps.max(1);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(5));
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let render_frame_target = target_frame_duration(effective_render_cap);

    let mut host = SceneHost::new(scene, (config.width, config.height));
    host.load();
    info!(node_count = host.world().node_count(), "scene_loaded");
    info!(
        target_tps,
        width = config.width,
        height = config.height,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        render_fps_cap = %format_render_cap(effective_render_cap),
        "loop_config"
    );

    let mut input_collector = InputCollector::default();
    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval, Instant::now());
    let mut last_applied_title: Option<String> = None;
    let window_for_loop = Arc::clone(&window);

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window_for_loop.id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        info!(reason = "window_close", "shutdown_requested");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                            error!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                    }
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = window_for_loop.inner_size();
                        if let Err(error) = renderer.resize(size.width, size.height) {
                            error!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        input_collector.handle_keyboard_input(&event);
                        if input_collector.quit_requested {
                            info!(reason = "escape_key", "shutdown_requested");
                            window_target.exit();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                        last_frame_instant = now;
                        accumulator =
                            accumulator.saturating_add(clamp_frame_delta(raw_frame_dt, max_frame_delta));

                        let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
                        for _ in 0..step_plan.ticks_to_run {
                            let input_snapshot = input_collector.snapshot_for_tick();
                            let command = host.update(fixed_dt_seconds, &input_snapshot);
                            metrics_accumulator.record_tick();
                            if command == SceneCommand::Quit {
                                info!(reason = "scene_command", "shutdown_requested");
                                window_target.exit();
                                break;
                            }
                        }
                        accumulator = step_plan.remaining_accumulator;
                        if step_plan.dropped_backlog > Duration::ZERO {
                            warn!(
                                dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                                max_ticks_per_frame, "sim_clamp_triggered"
                            );
                        }

                        let cap_sleep = compute_cap_sleep(
                            Instant::now().saturating_duration_since(last_present_instant),
                            render_frame_target,
                        );
                        if cap_sleep > Duration::ZERO {
                            thread::sleep(cap_sleep);
                        }

                        if let Err(error) = renderer.render_world(host.world()) {
                            error!(error = %error, "renderer_draw_failed");
                            window_target.exit();
                        }
                        last_present_instant = Instant::now();

                        let next_title = host.debug_title();
                        if next_title != last_applied_title {
                            window_for_loop
                                .set_title(next_title.as_deref().unwrap_or(&config.window_title));
                            last_applied_title = next_title;
                        }

                        metrics_accumulator.record_frame(raw_frame_dt);
                        if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                            info!(
                                fps = snapshot.fps,
                                tps = snapshot.tps,
                                frame_time_ms = snapshot.frame_time_ms,
                                node_count = host.world().node_count(),
                                "loop_metrics"
                            );
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                window_for_loop.request_redraw();
            }
            Event::LoopExiting => {
                host.shutdown();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

/// Turns held-key state into a one-tick press edge.
#[derive(Debug, Clone, Copy, Default)]
struct KeyEdge {
    is_down: bool,
    pressed_edge: bool,
}

impl KeyEdge {
    fn handle(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.is_down {
                    self.pressed_edge = true;
                }
                self.is_down = true;
            }
            ElementState::Released => self.is_down = false,
        }
    }

    fn take(&mut self) -> bool {
        std::mem::take(&mut self.pressed_edge)
    }
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    action_states: ActionStates,
    interact: KeyEdge,
    dismiss: KeyEdge,
}

impl InputCollector {
    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        self.handle_physical_key(key_event.physical_key, key_event.state);
    }

    fn handle_physical_key(&mut self, key: PhysicalKey, state: ElementState) {
        let is_pressed = state == ElementState::Pressed;
        let PhysicalKey::Code(code) = key else {
            return;
        };
        match code {
            KeyCode::KeyW | KeyCode::ArrowUp => self.action_states.set(InputAction::MoveUp, is_pressed),
            KeyCode::KeyS | KeyCode::ArrowDown => {
                self.action_states.set(InputAction::MoveDown, is_pressed)
            }
            KeyCode::KeyA | KeyCode::ArrowLeft => {
                self.action_states.set(InputAction::MoveLeft, is_pressed)
            }
            KeyCode::KeyD | KeyCode::ArrowRight => {
                self.action_states.set(InputAction::MoveRight, is_pressed)
            }
            KeyCode::Space => {
                self.action_states.set(InputAction::Interact, is_pressed);
                self.interact.handle(state);
            }
            KeyCode::Enter | KeyCode::NumpadEnter => {
                self.action_states.set(InputAction::Dismiss, is_pressed);
                self.dismiss.handle(state);
            }
            KeyCode::Escape => {
                self.action_states.set(InputAction::Quit, is_pressed);
                if is_pressed {
                    self.quit_requested = true;
                }
            }
            _ => {}
        }
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        InputSnapshot::new(
            self.quit_requested,
            self.action_states,
            self.interact.take(),
            self.dismiss.take(),
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;
    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    let dropped_backlog = if accumulator >= fixed_dt {
        std::mem::take(&mut accumulator)
    } else {
        Duration::ZERO
    };
    StepPlan {
        ticks_to_run,
        remaining_accumulator: accumulator,
        dropped_backlog,
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut InputCollector, code: KeyCode) {
        input.handle_physical_key(PhysicalKey::Code(code), ElementState::Pressed);
    }

    fn release(input: &mut InputCollector, code: KeyCode) {
        input.handle_physical_key(PhysicalKey::Code(code), ElementState::Released);
    }

    #[test]
    fn clamp_frame_delta_caps_large_frame() {
        let max_frame_delta = Duration::from_millis(250);
        assert_eq!(
            clamp_frame_delta(Duration::from_millis(600), max_frame_delta),
            max_frame_delta
        );
    }

    #[test]
    fn plan_sim_steps_runs_expected_ticks_without_drop() {
        let result = plan_sim_steps(Duration::from_millis(50), Duration::from_millis(16), 5);
        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::from_millis(2));
        assert_eq!(result.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn plan_sim_steps_drops_backlog_when_tick_cap_hit() {
        let result = plan_sim_steps(Duration::from_millis(120), Duration::from_millis(16), 3);
        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::from_millis(72));
    }

    #[test]
    fn space_press_is_delivered_to_exactly_one_tick() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::Space);

        let first = input.snapshot_for_tick();
        let second = input.snapshot_for_tick();
        assert!(first.interact_pressed());
        assert!(!second.interact_pressed());
        assert!(second.is_down(InputAction::Interact));
    }

    #[test]
    fn held_space_does_not_repeat_interact_edge() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::Space);
        assert!(input.snapshot_for_tick().interact_pressed());

        press(&mut input, KeyCode::Space);
        assert!(!input.snapshot_for_tick().interact_pressed());

        release(&mut input, KeyCode::Space);
        press(&mut input, KeyCode::Space);
        assert!(input.snapshot_for_tick().interact_pressed());
    }

    #[test]
    fn enter_and_numpad_enter_both_dismiss() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::Enter);
        assert!(input.snapshot_for_tick().dismiss_pressed());
        release(&mut input, KeyCode::Enter);

        press(&mut input, KeyCode::NumpadEnter);
        assert!(input.snapshot_for_tick().dismiss_pressed());
    }

    #[test]
    fn wasd_and_arrow_keys_map_to_movement() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::KeyW);
        press(&mut input, KeyCode::ArrowLeft);

        let snapshot = input.snapshot_for_tick();
        assert!(snapshot.is_down(InputAction::MoveUp));
        assert!(snapshot.is_down(InputAction::MoveLeft));

        release(&mut input, KeyCode::KeyW);
        assert!(!input.snapshot_for_tick().is_down(InputAction::MoveUp));
    }

    #[test]
    fn escape_requests_quit() {
        let mut input = InputCollector::default();
        press(&mut input, KeyCode::Escape);
        assert!(input.quit_requested);
        assert!(input.snapshot_for_tick().quit_requested());
    }

    #[test]
    fn render_cap_helpers() {
        assert_eq!(normalize_render_fps_cap(Some(0)), None);
        assert_eq!(target_frame_duration(None), None);
        let target = target_frame_duration(Some(60));
        assert_eq!(compute_cap_sleep(Duration::from_millis(20), target), Duration::ZERO);
        assert!(compute_cap_sleep(Duration::from_millis(5), target) > Duration::ZERO);
        assert_eq!(format_render_cap(None), "off");
    }
}

//! Vantage - First-person character controller
//!
//! Headless entry point: builds a small test course in rapier, drives the
//! controller with scripted input, and logs what it does each phase.

mod settings;

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use vantage_core::InputAction::{Crouch, Jump, MoveForward, Pause, Sprint};
use vantage_core::{GameTime, InputAction, InputSampler, LayerMask, SurfaceTag};
use vantage_game::{InputState, Interactor, MovementController, SwayController};
use vantage_physics::{PhysicsWorld, RapierBackend};

use settings::GameSettings;

/// Simulated frame length
const FRAME_DELTA: f32 = 1.0 / 60.0;

/// A stretch of scripted input
struct Phase {
    name: &'static str,
    seconds: f32,
    held: &'static [InputAction],
    /// Pressed on the first frame only
    tap: Option<InputAction>,
    /// Mouse delta every frame
    look: Vec2,
}

impl Phase {
    fn new(name: &'static str, seconds: f32, held: &'static [InputAction]) -> Self {
        Self {
            name,
            seconds,
            held,
            tap: None,
            look: Vec2::ZERO,
        }
    }

    fn tap(mut self, action: InputAction) -> Self {
        self.tap = Some(action);
        self
    }

    fn look(mut self, look: Vec2) -> Self {
        self.look = look;
        self
    }

    fn apply(&self, input: &mut InputState, first_frame: bool) {
        let stale: Vec<InputAction> = input
            .held
            .iter()
            .copied()
            .filter(|action| !self.held.contains(action))
            .collect();
        for action in stale {
            input.release(action);
        }
        for &action in self.held {
            input.press(action);
        }
        if first_frame {
            if let Some(action) = self.tap {
                input.press(action);
            }
        }
        input.mouse_delta = self.look;
    }
}

fn script() -> Vec<Phase> {
    vec![
        Phase::new("settle", 1.0, &[]),
        Phase::new("walk", 0.5, &[MoveForward]),
        Phase::new("sprint", 0.6, &[MoveForward, Sprint]),
        Phase::new("jump", 0.8, &[]).tap(Jump),
        Phase::new("crouch into tunnel", 2.0, &[MoveForward, Crouch]),
        Phase::new("release under ceiling", 1.0, &[MoveForward]),
        Phase::new("leave tunnel", 2.0, &[MoveForward]),
        Phase::new("look around", 0.5, &[]).look(Vec2::new(4.0, 3.0)),
        Phase::new("pause", 0.5, &[MoveForward])
            .tap(Pause)
            .look(Vec2::new(6.0, 0.0)),
        Phase::new("resume", 0.5, &[]).tap(Pause),
    ]
}

/// Ground plane, a low tunnel, and a tagged item and door beyond it
fn build_course() -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    world.create_ground(0.0, LayerMask::ALL);

    // Ceiling at 1.5m: passable crouched, not standing
    world.create_static_box(Vec3::new(2.0, 0.25, 2.0), Vec3::new(0.0, 1.75, -10.0));

    world.create_tagged_box(
        Vec3::splat(0.25),
        Vec3::new(0.0, 0.25, -18.0),
        SurfaceTag::Item,
        LayerMask::ALL,
    );
    world.create_tagged_box(
        Vec3::new(1.0, 1.0, 0.1),
        Vec3::new(0.0, 1.0, -21.0),
        SurfaceTag::Door,
        LayerMask::ALL,
    );

    world.update_queries();
    world
}

fn report(
    phase: &str,
    controller: &MovementController,
    sway: &SwayController,
    interactor: &Interactor,
) {
    let state = controller.state();
    info!(
        phase,
        position = ?state.position,
        grounded = state.is_grounded,
        crouching = state.is_crouching,
        speed = state.current_speed,
        height = state.current_height,
        fov = state.current_fov,
        pitch = state.pitch.to_degrees(),
        gait = ?controller.gait(),
        sway = ?sway.offset(),
        focus = ?interactor.focused(),
        "Phase complete"
    );
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Vantage...");

    let settings = GameSettings::load();
    if std::env::args().any(|arg| arg == "--write-settings") {
        settings.save().context("Failed to write settings")?;
    }

    let mut physics = RapierBackend::new(build_course(), settings.body.to_config(), Vec3::ZERO);
    let mut controller = MovementController::new(settings.movement.clone(), &physics)
        .context("Invalid movement settings")?;
    let mut sway = SwayController::new(settings.sway.clone(), settings.gameplay.held_item_offset)
        .context("Invalid sway settings")?;
    let mut interactor = Interactor::new(settings.gameplay.interact_range);
    let mut time = GameTime::new(settings.time.clone());

    let mut input = InputState::new();
    input.cursor_captured = true;

    for phase in script() {
        info!(phase = phase.name, seconds = phase.seconds, "Starting phase");
        let frames = (phase.seconds / FRAME_DELTA).round() as u32;

        for frame in 0..frames {
            phase.apply(&mut input, frame == 0);

            time.update(FRAME_DELTA);
            for _ in 0..time.fixed_steps() {
                physics.step();
            }

            if input.is_just_pressed(InputAction::Pause) {
                controller.set_paused(!controller.is_paused());
            }

            let dt = time.delta();
            controller.advance(dt, &input, &mut physics);
            sway.follow(dt, &input, &controller);
            interactor.update(controller.eye_position(), controller.view_direction(), &physics);

            input.clear_frame();
        }

        report(phase.name, &controller, &sway, &interactor);
    }

    info!(
        frames = time.frame_count,
        seconds = time.total_time,
        "Script finished"
    );
    Ok(())
}

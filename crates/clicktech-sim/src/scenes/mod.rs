//! Per-scene simulators.
//!
//! Each playable scene owns its `World` and reacts to scheduled tasks and
//! input. Everything shared (scheduler, RNG, score) reaches it through a
//! `SimContext` borrowed from the engine for the duration of one call.

pub mod animation;
pub mod breakout;
pub mod clicker;
pub mod defense;
pub mod drawing;
pub mod flight;
pub mod snake;

use glam::Vec2;
use rand_chacha::ChaCha8Rng;

use clicktech_core::commands::InputEvent;
use clicktech_core::enums::{GameKind, Outcome};
use clicktech_core::events::GameEvent;
use clicktech_core::types::Color;

use crate::scheduler::{Scheduler, TimerHandle};
use crate::session::Session;
use crate::world::World;
use crate::world_setup;

pub use animation::AnimationStudio;
pub use breakout::BreakoutGame;
pub use clicker::ClickerGame;
pub use defense::DefenseGame;
pub use drawing::DrawingStudio;
pub use flight::FlightGame;
pub use snake::SnakeGame;

/// Work items the scheduler can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Fixed-interval simulation step.
    Update,
    /// Probabilistic spawn roll.
    Spawn,
    /// One-second countdown tick.
    Countdown,
    /// Clicker button springs back up.
    ButtonRelease,
    /// Keyframe playback advance.
    Playback,
    DriftClouds,
    Particles,
    /// Welcome scene timeout.
    ShowMenu,
}

impl Task {
    /// Tasks that stop once a scene reaches its terminal state. Effects
    /// and decoration keep animating over the frozen scene.
    pub fn is_simulation(self) -> bool {
        matches!(
            self,
            Task::Update | Task::Spawn | Task::Countdown | Task::Playback
        )
    }
}

/// Engine state lent to a simulator for one call.
pub struct SimContext<'a> {
    pub scheduler: &'a mut Scheduler<Task>,
    pub rng: &'a mut ChaCha8Rng,
    pub session: &'a mut Session,
    pub events: &'a mut Vec<GameEvent>,
}

impl SimContext<'_> {
    /// Add to the running score.
    pub fn add_score(&mut self, points: u32) {
        let total = self.session.add(points);
        self.events.push(GameEvent::Scored { points, total });
    }

    /// Record the terminal outcome and stop the simulation tasks.
    /// Later calls are ignored.
    pub fn finish(&mut self, outcome: Outcome) {
        if self.session.finish(outcome) {
            self.scheduler.cancel_where(|task| task.is_simulation());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    pub fn every(&mut self, interval_ms: u64, task: Task) -> TimerHandle {
        self.scheduler.schedule(interval_ms, true, task)
    }

    pub fn after(&mut self, delay_ms: u64, task: Task) -> TimerHandle {
        self.scheduler.schedule(delay_ms, false, task)
    }

    pub fn burst(&mut self, world: &mut World, at: Vec2, color: Color) {
        world_setup::spawn_burst(world, self.rng, at, color);
        self.events.push(GameEvent::Burst {
            x: at.x,
            y: at.y,
            count: clicktech_core::constants::BURST_PARTICLES,
        });
    }

    pub fn explosion(&mut self, world: &mut World, at: Vec2) {
        world_setup::spawn_explosion(world, self.rng, at);
        self.events.push(GameEvent::Burst {
            x: at.x,
            y: at.y,
            count: clicktech_core::constants::EXPLOSION_PARTICLES,
        });
    }
}

/// Behaviour shared by all playable scenes.
pub trait Simulator {
    fn kind(&self) -> GameKind;

    /// Build the initial world and arm the scene's tasks.
    fn setup(&mut self, ctx: &mut SimContext<'_>);

    /// Fixed-interval simulation step.
    fn update(&mut self, _ctx: &mut SimContext<'_>) {}

    /// Probabilistic spawn roll on its own interval.
    fn spawn(&mut self, _ctx: &mut SimContext<'_>) {}

    /// Any other scene-specific task.
    fn on_task(&mut self, _task: Task, _ctx: &mut SimContext<'_>) {}

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut SimContext<'_>);

    fn world(&self) -> &World;

    fn world_mut(&mut self) -> &mut World;

    fn background(&self) -> Color;
}

/// The active playable scene.
pub enum Game {
    Defense(DefenseGame),
    Flight(FlightGame),
    Clicker(ClickerGame),
    Breakout(BreakoutGame),
    Snake(SnakeGame),
    Drawing(DrawingStudio),
    Animation(AnimationStudio),
}

impl Game {
    /// Fresh, not yet set up, scene of `kind`. `clicker_secs` only
    /// matters for the clicker.
    pub fn new(kind: GameKind, clicker_secs: u32) -> Self {
        match kind {
            GameKind::DefenseGame => Game::Defense(DefenseGame::new()),
            GameKind::Flight => Game::Flight(FlightGame::new()),
            GameKind::Clicker => Game::Clicker(ClickerGame::new(clicker_secs)),
            GameKind::Breakout => Game::Breakout(BreakoutGame::new()),
            GameKind::Snake => Game::Snake(SnakeGame::new()),
            GameKind::Drawing => Game::Drawing(DrawingStudio::new()),
            GameKind::Animation => Game::Animation(AnimationStudio::new()),
        }
    }

    pub fn sim(&self) -> &dyn Simulator {
        match self {
            Game::Defense(g) => g,
            Game::Flight(g) => g,
            Game::Clicker(g) => g,
            Game::Breakout(g) => g,
            Game::Snake(g) => g,
            Game::Drawing(g) => g,
            Game::Animation(g) => g,
        }
    }

    pub fn sim_mut(&mut self) -> &mut dyn Simulator {
        match self {
            Game::Defense(g) => g,
            Game::Flight(g) => g,
            Game::Clicker(g) => g,
            Game::Breakout(g) => g,
            Game::Snake(g) => g,
            Game::Drawing(g) => g,
            Game::Animation(g) => g,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.sim().kind()
    }

    /// Route a fired task to the simulator.
    pub fn dispatch(&mut self, task: Task, ctx: &mut SimContext<'_>) {
        let sim = self.sim_mut();
        match task {
            Task::Update => sim.update(ctx),
            Task::Spawn => sim.spawn(ctx),
            other => sim.on_task(other, ctx),
        }
    }
}

//! Arcade engine: the application context.
//!
//! `ArcadeEngine` owns the scheduler, RNG, score session, high-score table
//! and the active scene, and produces `SceneSnapshot`s. Completely
//! headless, driven by a virtual millisecond clock, which keeps every run
//! reproducible from its seed.

use std::collections::VecDeque;
use std::path::PathBuf;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use clicktech_core::commands::{InputEvent, Key};
use clicktech_core::components::Body;
use clicktech_core::constants::{CLICKER_DURATIONS, CLOUD_INTERVAL_MS, WELCOME_DELAY_MS, WIDTH};
use clicktech_core::enums::{EntityKind, GameKind, SceneTag};
use clicktech_core::events::GameEvent;
use clicktech_core::state::{HudView, SceneSnapshot};
use clicktech_core::types::{Aabb, Color, Shape};

use crate::highscores::{HighScores, JsonFileStore, MemoryStore, ScoreStore};
use crate::scenes::{Game, SimContext, Task};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::session::Session;
use crate::shell::{MenuAction, MenuList, ShellScene};
use crate::systems;
use crate::systems::snapshot::Overlays;
use crate::world::World;
use crate::world_setup;

/// In-game "Menu" button, top right, shown by scored scenes.
const MENU_BUTTON_CENTER: Vec2 = Vec2::new(WIDTH - 40.0, 45.0);
const MENU_BUTTON_HALF: Vec2 = Vec2::new(25.0, 12.0);

/// Configuration for starting the arcade.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed. Same seed and inputs = same run.
    pub seed: u64,
    /// High-score file. `None` keeps scores in memory only.
    pub high_score_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            high_score_path: None,
        }
    }
}

/// The active scene.
pub enum Scene {
    Welcome(ShellScene),
    Menu(ShellScene),
    ClickerSelect(ShellScene),
    Playing(Game),
}

impl Scene {
    pub fn tag(&self) -> SceneTag {
        match self {
            Scene::Welcome(_) => SceneTag::Welcome,
            Scene::Menu(_) => SceneTag::Menu,
            Scene::ClickerSelect(_) => SceneTag::ClickerSelect,
            Scene::Playing(game) => SceneTag::Playing(game.kind()),
        }
    }

    pub fn world(&self) -> &World {
        match self {
            Scene::Welcome(shell) | Scene::Menu(shell) | Scene::ClickerSelect(shell) => {
                shell.world()
            }
            Scene::Playing(game) => game.sim().world(),
        }
    }

    pub fn world_mut(&mut self) -> &mut World {
        match self {
            Scene::Welcome(shell) | Scene::Menu(shell) | Scene::ClickerSelect(shell) => {
                shell.world_mut()
            }
            Scene::Playing(game) => game.sim_mut().world_mut(),
        }
    }

    fn background(&self) -> Color {
        match self {
            Scene::Playing(game) => game.sim().background(),
            _ => Color::SKY_BLUE,
        }
    }
}

/// Where a transition leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Welcome,
    Menu,
    ClickerSelect,
    Game { kind: GameKind, clicker_secs: u32 },
}

/// The arcade engine. Owns every piece of cross-scene state.
pub struct ArcadeEngine {
    scheduler: Scheduler<Task>,
    rng: ChaCha8Rng,
    session: Session,
    high_scores: HighScores,
    scene: Scene,
    input_queue: VecDeque<InputEvent>,
    events: Vec<GameEvent>,
    welcomed: bool,
    quit_requested: bool,
}

impl ArcadeEngine {
    /// Create the engine and show the welcome scene.
    pub fn new(config: EngineConfig) -> Self {
        let store: Box<dyn ScoreStore> = match &config.high_score_path {
            Some(path) => Box::new(JsonFileStore::new(path.clone())),
            None => Box::new(MemoryStore::new()),
        };
        Self::with_store(config.seed, store)
    }

    /// Create the engine over an explicit high-score store.
    pub fn with_store(seed: u64, store: Box<dyn ScoreStore>) -> Self {
        let mut engine = Self {
            scheduler: Scheduler::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            session: Session::default(),
            high_scores: HighScores::load(store),
            scene: Scene::Welcome(ShellScene::empty()),
            input_queue: VecDeque::new(),
            events: Vec::new(),
            welcomed: false,
            quit_requested: false,
        };
        engine.show_menu();
        engine
    }

    // --- Navigation ---

    /// Go to the menu. The very first call shows the welcome scene,
    /// which hands over to the menu on its own.
    pub fn show_menu(&mut self) {
        if self.welcomed {
            self.enter(Destination::Menu);
        } else {
            self.welcomed = true;
            self.enter(Destination::Welcome);
        }
    }

    /// Start a playable scene. The clicker starts with its shortest
    /// duration; use `start_clicker` to pick another.
    pub fn start_game(&mut self, kind: GameKind) {
        let clicker_secs = CLICKER_DURATIONS[0];
        self.enter(Destination::Game { kind, clicker_secs });
    }

    pub fn start_clicker(&mut self, seconds: u32) {
        self.enter(Destination::Game {
            kind: GameKind::Clicker,
            clicker_secs: seconds,
        });
    }

    pub fn show_clicker_select(&mut self) {
        self.enter(Destination::ClickerSelect);
    }

    /// Leave the active scene for the menu, saving the high score of a
    /// scored game first.
    pub fn return_to_menu(&mut self) {
        if let Some(kind) = self.active_game() {
            self.save_high_score(kind);
        }
        self.welcomed = true;
        self.enter(Destination::Menu);
    }

    /// Tear down the current scene and build the next one.
    ///
    /// Every pending timer is cancelled and the old world is emptied
    /// before the new scene's setup runs, so nothing of the old scene can
    /// fire or draw afterwards.
    fn enter(&mut self, destination: Destination) {
        let cancelled = self.scheduler.cancel_all();
        self.scene.world_mut().clear();
        self.session.reset();

        let scene = match destination {
            Destination::Welcome => {
                let shell = ShellScene::welcome(&mut self.rng);
                self.scheduler
                    .schedule(WELCOME_DELAY_MS, false, Task::ShowMenu);
                self.scheduler
                    .schedule(CLOUD_INTERVAL_MS, true, Task::DriftClouds);
                Scene::Welcome(shell)
            }
            Destination::Menu => {
                let menu = MenuList::main(&self.high_scores);
                let shell = ShellScene::with_menu(&mut self.rng, menu);
                self.scheduler
                    .schedule(CLOUD_INTERVAL_MS, true, Task::DriftClouds);
                Scene::Menu(shell)
            }
            Destination::ClickerSelect => {
                let shell = ShellScene::with_menu(&mut self.rng, MenuList::clicker_select());
                self.scheduler
                    .schedule(CLOUD_INTERVAL_MS, true, Task::DriftClouds);
                Scene::ClickerSelect(shell)
            }
            Destination::Game { kind, clicker_secs } => {
                let mut game = Game::new(kind, clicker_secs);
                let mut ctx = SimContext {
                    scheduler: &mut self.scheduler,
                    rng: &mut self.rng,
                    session: &mut self.session,
                    events: &mut self.events,
                };
                game.sim_mut().setup(&mut ctx);
                if kind.is_scored() {
                    spawn_menu_button(game.sim_mut().world_mut());
                }
                Scene::Playing(game)
            }
        };
        self.scene = scene;

        let tag = self.scene.tag();
        info!(scene = ?tag, cancelled, timers = self.scheduler.live_count(), "scene_entered");
        self.events.push(GameEvent::SceneEntered { scene: tag });
    }

    // --- Clock ---

    /// Advance the virtual clock by `ms`, firing every task that falls
    /// due, in due order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now().saturating_add(ms);
        while let Some(fired) = self.scheduler.pop_due(until) {
            self.run_task(fired.task);
        }
        self.scheduler.advance_to(until);
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::ShowMenu => self.show_menu(),
            Task::DriftClouds => systems::clouds::run(self.scene.world_mut(), &mut self.rng),
            Task::Particles => systems::particles::run(self.scene.world_mut()),
            other => {
                if let Scene::Playing(game) = &mut self.scene {
                    let mut ctx = SimContext {
                        scheduler: &mut self.scheduler,
                        rng: &mut self.rng,
                        session: &mut self.session,
                        events: &mut self.events,
                    };
                    game.dispatch(other, &mut ctx);
                }
                self.settle_outcome();
            }
        }
    }

    /// Persist the high score once the active game reaches its terminal
    /// state.
    fn settle_outcome(&mut self) {
        let Some(outcome) = self.session.take_pending() else {
            return;
        };
        let Some(kind) = self.active_game() else {
            return;
        };
        info!(
            game = kind.key(),
            score = self.session.points,
            outcome = %outcome.message(),
            "game_over"
        );
        self.events.push(GameEvent::GameOver {
            game: kind,
            outcome,
        });
        self.save_high_score(kind);
    }

    // --- Input ---

    /// Queue input for the next `frame`.
    pub fn queue_input(&mut self, input: InputEvent) {
        self.input_queue.push_back(input);
    }

    /// Handle one input event immediately.
    pub fn handle_input(&mut self, input: InputEvent) {
        let action = match &mut self.scene {
            Scene::Welcome(_) => None,
            Scene::Menu(shell) | Scene::ClickerSelect(shell) => shell.handle_input(&input),
            Scene::Playing(game) => {
                if leaves_game(&input, game.kind()) {
                    Some(MenuAction::BackToMenu)
                } else {
                    let mut ctx = SimContext {
                        scheduler: &mut self.scheduler,
                        rng: &mut self.rng,
                        session: &mut self.session,
                        events: &mut self.events,
                    };
                    game.sim_mut().handle_input(&input, &mut ctx);
                    None
                }
            }
        };
        match action {
            Some(action) => self.activate(action),
            None => self.settle_outcome(),
        }
    }

    fn activate(&mut self, action: MenuAction) {
        match action {
            MenuAction::Play(kind) => self.start_game(kind),
            MenuAction::ChooseClickerTime => self.show_clicker_select(),
            MenuAction::ClickerTime(seconds) => self.start_clicker(seconds),
            MenuAction::ResetHighScores => {
                self.high_scores.reset();
                info!("high_scores_reset");
                self.enter(Destination::Menu);
            }
            MenuAction::Quit => {
                info!("quit_requested");
                self.quit_requested = true;
            }
            MenuAction::BackToMenu => self.return_to_menu(),
        }
    }

    // --- Scoring ---

    /// Add points to the running score of the active scene.
    pub fn add_score(&mut self, points: u32) -> u32 {
        let total = self.session.add(points);
        self.events.push(GameEvent::Scored { points, total });
        total
    }

    /// Record the running score as the high score of `kind` when it beats
    /// the stored one. Returns whether it did.
    pub fn save_high_score(&mut self, kind: GameKind) -> bool {
        if !kind.is_scored() {
            return false;
        }
        let score = self.session.points;
        if !self.high_scores.record(kind, score) {
            return false;
        }
        info!(game = kind.key(), score, "high_score_saved");
        self.events.push(GameEvent::HighScoreSaved { game: kind, score });
        true
    }

    // --- Output ---

    /// Build the snapshot of the current scene, draining pending events.
    pub fn snapshot(&mut self) -> SceneSnapshot {
        let events = std::mem::take(&mut self.events);
        let overlays = self.overlays();
        systems::snapshot::build_snapshot(
            self.scene.tag(),
            self.scheduler.now(),
            self.scene.background(),
            self.scene.world(),
            overlays,
            events,
        )
    }

    /// Apply queued input, advance by `ms` and snapshot.
    pub fn frame(&mut self, ms: u64) -> SceneSnapshot {
        while let Some(input) = self.input_queue.pop_front() {
            self.handle_input(input);
        }
        self.advance(ms);
        self.snapshot()
    }

    fn overlays(&self) -> Overlays {
        match &self.scene {
            Scene::Menu(shell) | Scene::ClickerSelect(shell) => Overlays {
                menu: shell.menu().map(MenuList::view),
                ..Overlays::default()
            },
            Scene::Welcome(_) => Overlays::default(),
            Scene::Playing(game) => {
                let kind = game.kind();
                let hud = kind.is_scored().then(|| HudView {
                    score: self.session.points,
                    timer: self.session.timer,
                    high_score: self.high_scores.get(kind),
                });
                Overlays {
                    hud,
                    menu: None,
                    message: self.session.outcome.map(|o| o.message()),
                }
            }
        }
    }

    // --- Accessors ---

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_tag(&self) -> SceneTag {
        self.scene.tag()
    }

    pub fn game(&self) -> Option<&Game> {
        match &self.scene {
            Scene::Playing(game) => Some(game),
            _ => None,
        }
    }

    pub fn game_mut(&mut self) -> Option<&mut Game> {
        match &mut self.scene {
            Scene::Playing(game) => Some(game),
            _ => None,
        }
    }

    fn active_game(&self) -> Option<GameKind> {
        self.game().map(Game::kind)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Virtual clock in milliseconds.
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn live_timers(&self) -> Vec<TimerHandle> {
        self.scheduler.live_handles()
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }
}

fn spawn_menu_button(world: &mut World) {
    let bounds = Aabb::from_center(MENU_BUTTON_CENTER, MENU_BUTTON_HALF);
    world.spawn(
        EntityKind::Hud,
        Body::new(Shape::Rect { bounds }, Color::GRAY80).with_outline(Color::BLACK),
    );
    world_setup::spawn_text(
        world,
        EntityKind::Hud,
        MENU_BUTTON_CENTER,
        "Menu",
        10,
        Color::BLACK,
    );
}

/// Escape always leaves; scored scenes also leave through their Menu
/// button.
fn leaves_game(input: &InputEvent, kind: GameKind) -> bool {
    match *input {
        InputEvent::KeyDown { key: Key::Escape } => true,
        InputEvent::PointerDown { x, y } => {
            kind.is_scored()
                && Aabb::from_center(MENU_BUTTON_CENTER, MENU_BUTTON_HALF).contains(Vec2::new(x, y))
        }
        _ => false,
    }
}

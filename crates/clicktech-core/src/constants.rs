//! Tuning parameters shared by the scenes.

// --- Canvas ---

/// Canvas width in pixels.
pub const WIDTH: f32 = 600.0;

/// Canvas height in pixels.
pub const HEIGHT: f32 = 500.0;

// --- Shell ---

/// How long the welcome scene stays up before the menu appears.
pub const WELCOME_DELAY_MS: u64 = 3000;

/// Clicker durations offered by the duration picker (seconds).
pub const CLICKER_DURATIONS: [u32; 3] = [10, 30, 60];

/// Background clouds per scene that shows them.
pub const CLOUD_COUNT: usize = 8;

/// Cloud drift interval.
pub const CLOUD_INTERVAL_MS: u64 = 50;

/// Particle animation interval.
pub const PARTICLE_INTERVAL_MS: u64 = 50;

/// Particles in a small burst (unit lost, shot landed).
pub const BURST_PARTICLES: u32 = 6;

/// Lifetime of a small-burst particle, in particle ticks.
pub const BURST_LIFETIME: u32 = 8;

/// Particles in a large explosion (ship lost, plane crash).
pub const EXPLOSION_PARTICLES: u32 = 40;

/// Lifetime of an explosion particle, in particle ticks.
pub const EXPLOSION_LIFETIME: u32 = 15;

// --- Defense ("Earth Protector") ---

pub const DEFENSE_UPDATE_MS: u64 = 30;
pub const DEFENSE_SPAWN_MS: u64 = 300;

/// Height of the ground strip at the bottom of the canvas.
pub const DEFENSE_GROUND_HEIGHT: f32 = 30.0;

/// Spawn probability per spawn tick.
pub const ASTEROID_SPAWN_CHANCE: f64 = 0.15;
pub const HOSTILE_SPAWN_CHANCE: f64 = 0.03;

/// Asteroid diameter range (inclusive).
pub const ASTEROID_MIN_SIZE: i32 = 20;
pub const ASTEROID_MAX_SIZE: i32 = 40;

pub const HOSTILE_WIDTH: f32 = 30.0;
pub const HOSTILE_HEIGHT: f32 = 15.0;

/// Per-tick speeds (pixels).
pub const ASTEROID_SPEED: f32 = 9.0;
pub const HOSTILE_SPEED: f32 = 4.0;
pub const PROJECTILE_SPEED: f32 = 18.0;
pub const HOSTILE_PROJECTILE_SPEED: f32 = 8.0;

/// Player ship nudge per key press.
pub const SHIP_STEP: f32 = 20.0;

/// Offset of each defense unit from the canvas center.
pub const DEFENSE_UNIT_OFFSET: f32 = 150.0;

/// Probability per tick that a hostile craft fires while the ship exists.
pub const HOSTILE_FIRE_CHANCE: f64 = 0.005;

pub const SCORE_ASTEROID: u32 = 10;
pub const SCORE_HOSTILE: u32 = 20;
pub const SCORE_UNIT_LOST: u32 = 50;

// --- Flight ---

pub const FLIGHT_UPDATE_MS: u64 = 50;
pub const FLIGHT_SPAWN_MS: u64 = 700;
pub const FLIGHT_GROUND_HEIGHT: f32 = 50.0;
pub const BUILDING_SPAWN_CHANCE: f64 = 0.25;
pub const FLIGHT_BASE_SPEED: u32 = 6;

/// Score points per extra unit of forward speed.
pub const FLIGHT_SCORE_PER_SPEED: u32 = 10;

/// Plane nudge per arrow key.
pub const FLIGHT_STEP: f32 = 12.0;

// --- Clicker ---

pub const CLICKER_COUNTDOWN_MS: u64 = 1000;

/// How long the button stays pressed down.
pub const CLICKER_PRESS_MS: u64 = 50;

// --- Breakout ---

pub const BREAKOUT_UPDATE_MS: u64 = 30;
pub const PADDLE_WIDTH: f32 = 80.0;
pub const PADDLE_HEIGHT: f32 = 10.0;
pub const PADDLE_STEP: f32 = 20.0;
pub const BALL_RADIUS: f32 = 8.0;
pub const BALL_SPEED: f32 = 5.0;
pub const BRICK_WIDTH: f32 = 50.0;
pub const BRICK_HEIGHT: f32 = 20.0;
pub const BRICK_GAP: f32 = 2.0;
pub const BRICK_ROWS: usize = 4;
pub const BRICK_TOP: f32 = 50.0;
pub const SCORE_BRICK: u32 = 10;

/// Paddle offset (pixels) per unit of horizontal ball speed after a bounce.
pub const PADDLE_DEFLECTION_DIVISOR: f32 = 10.0;

// --- Snake ---

pub const SNAKE_UPDATE_MS: u64 = 150;
pub const SNAKE_GRID_SIZE: i32 = 20;
pub const SNAKE_INITIAL_LENGTH: usize = 3;
pub const SCORE_FOOD: u32 = 10;

// --- Animation studio ---

pub const PLAYBACK_INTERVAL_MS: u64 = 100;
pub const ANIMATION_PANEL_HEIGHT: f32 = 60.0;

// --- Drawing studio ---

pub const DRAWING_PANEL_HEIGHT: f32 = 40.0;
pub const DEFAULT_BRUSH_SIZE: f32 = 5.0;

// --- Pursuit AI (friendly defense units) ---

/// Horizontal step toward a pursued hazard.
pub const PURSUIT_STEP: f32 = 5.0;

/// Half-width of the band around the unit center where it holds still.
pub const PURSUIT_DEAD_ZONE: f32 = 20.0;

/// Chance per tick that an idle unit picks a new drift step.
pub const IDLE_DRIFT_CHANCE: f64 = 0.05;

/// Candidate idle drift steps.
pub const IDLE_DRIFT_STEPS: [f32; 3] = [-5.0, 0.0, 5.0];

/// Chance per tick that a unit fires a projectile.
pub const UNIT_FIRE_CHANCE: f64 = 0.1;

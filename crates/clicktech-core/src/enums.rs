//! Enumeration types used throughout the arcade.

use serde::{Deserialize, Serialize};

/// The seven playable experiences reachable from the menu.
///
/// Serialized names double as the keys of the persisted high-score map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameKind {
    #[serde(rename = "earthprotector")]
    DefenseGame,
    #[serde(rename = "flight")]
    Flight,
    #[serde(rename = "clicker")]
    Clicker,
    #[serde(rename = "breakout")]
    Breakout,
    #[serde(rename = "snake")]
    Snake,
    #[serde(rename = "drawing")]
    Drawing,
    #[serde(rename = "animation")]
    Animation,
}

impl GameKind {
    /// Menu and high-score display order.
    pub const ALL: [GameKind; 7] = [
        GameKind::DefenseGame,
        GameKind::Flight,
        GameKind::Clicker,
        GameKind::Breakout,
        GameKind::Snake,
        GameKind::Drawing,
        GameKind::Animation,
    ];

    /// Key in the persisted high-score map.
    pub fn key(self) -> &'static str {
        match self {
            GameKind::DefenseGame => "earthprotector",
            GameKind::Flight => "flight",
            GameKind::Clicker => "clicker",
            GameKind::Breakout => "breakout",
            GameKind::Snake => "snake",
            GameKind::Drawing => "drawing",
            GameKind::Animation => "animation",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            GameKind::DefenseGame => "Earth Protector",
            GameKind::Flight => "Flight Simulator",
            GameKind::Clicker => "Click Clicker",
            GameKind::Breakout => "Breakout",
            GameKind::Snake => "Snake",
            GameKind::Drawing => "Drawing Studio",
            GameKind::Animation => "Animation Studio",
        }
    }

    /// Whether the scene keeps score and persists a high score on exit.
    pub fn is_scored(self) -> bool {
        !matches!(self, GameKind::Drawing | GameKind::Animation)
    }
}

/// Top-level scene tag, as reported in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scene", content = "game")]
pub enum SceneTag {
    Welcome,
    Menu,
    ClickerSelect,
    Playing(GameKind),
}

/// Kind of a live entity. Each scene world keeps one ordered
/// collection per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    // --- Shared decoration ---
    Cloud,
    Ground,
    Particle,
    Label,
    Hud,
    Decoration,

    // --- Defense ---
    Ship,
    DefenseUnit,
    Projectile,
    HostileProjectile,
    Asteroid,
    HostileCraft,

    // --- Flight ---
    Plane,
    Building,
    BuildingRoof,
    Cockpit,

    // --- Clicker ---
    ClickButton,

    // --- Breakout ---
    Paddle,
    Ball,
    Brick,

    // --- Snake ---
    SnakeSegment,
    Food,

    // --- Studios ---
    Stroke,
    AnimShape,
    Panel,
}

impl EntityKind {
    /// Paint order, back to front.
    pub const DRAW_ORDER: [EntityKind; 25] = [
        EntityKind::Cloud,
        EntityKind::Decoration,
        EntityKind::Ground,
        EntityKind::Building,
        EntityKind::BuildingRoof,
        EntityKind::Brick,
        EntityKind::Food,
        EntityKind::SnakeSegment,
        EntityKind::Stroke,
        EntityKind::AnimShape,
        EntityKind::Asteroid,
        EntityKind::HostileCraft,
        EntityKind::HostileProjectile,
        EntityKind::Projectile,
        EntityKind::Ship,
        EntityKind::DefenseUnit,
        EntityKind::Plane,
        EntityKind::Paddle,
        EntityKind::Ball,
        EntityKind::ClickButton,
        EntityKind::Particle,
        EntityKind::Label,
        EntityKind::Cockpit,
        EntityKind::Panel,
        EntityKind::Hud,
    ];
}

/// How a scored scene ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Outcome {
    /// A hazard struck the player ship.
    ShipDestroyed,
    /// A hazard reached the ground.
    EarthDestroyed,
    /// The plane flew into a building.
    Crashed,
    /// The plane touched the ground.
    CrashedOnGround,
    /// The clicker countdown expired.
    TimeUp { clicks: u32 },
    /// Every brick was cleared.
    LevelCleared,
    /// The last ball fell past the paddle.
    BallsLost,
    /// The snake hit a wall or itself.
    SnakeCollided { length: u32 },
}

impl Outcome {
    /// End-state message shown over the frozen scene.
    pub fn message(&self) -> String {
        match self {
            Outcome::ShipDestroyed => "Ship Destroyed!".to_string(),
            Outcome::EarthDestroyed => "Earth Destroyed!".to_string(),
            Outcome::Crashed => "Crashed".to_string(),
            Outcome::CrashedOnGround => "Crashed on Ground".to_string(),
            Outcome::TimeUp { clicks } => format!("Time's Up! Final Clicks: {clicks}"),
            Outcome::LevelCleared => "LEVEL CLEARED!".to_string(),
            Outcome::BallsLost => "GAME OVER".to_string(),
            Outcome::SnakeCollided { length } => format!("GAME OVER! Length: {length}"),
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::LevelCleared | Outcome::TimeUp { .. })
    }
}

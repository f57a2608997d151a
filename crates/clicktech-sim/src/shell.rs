//! Navigation shell: welcome screen, main menu, clicker duration picker.

use glam::Vec2;
use hecs::Entity;
use rand_chacha::ChaCha8Rng;

use clicktech_core::commands::{InputEvent, Key};
use clicktech_core::components::Body;
use clicktech_core::constants::{CLICKER_DURATIONS, HEIGHT, WIDTH};
use clicktech_core::enums::{EntityKind, GameKind};
use clicktech_core::state::MenuView;
use clicktech_core::types::{Aabb, Anchor, Color, Shape};

use crate::highscores::HighScores;
use crate::world::World;
use crate::world_setup;

/// What activating a menu entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play(GameKind),
    ChooseClickerTime,
    ClickerTime(u32),
    ResetHighScores,
    Quit,
    BackToMenu,
}

const MAIN_TITLE: &str = "Click Tech Tutorial Prototype";
const CLICKER_TITLE: &str = "Choose Game Time (Seconds)";

const ENTRY_HALF_EXTENTS: Vec2 = Vec2::new(90.0, 14.0);

pub struct MenuEntry {
    pub label: String,
    pub action: MenuAction,
    pub bounds: Aabb,
    background: Option<Entity>,
}

/// Ordered entries with exactly one highlighted.
pub struct MenuList {
    title: String,
    lines: Vec<String>,
    entries: Vec<MenuEntry>,
    selected: usize,
}

impl MenuList {
    fn new(title: &str, lines: Vec<String>, items: Vec<(String, MenuAction, f32)>) -> Self {
        let entries = items
            .into_iter()
            .map(|(label, action, y)| MenuEntry {
                label,
                action,
                bounds: Aabb::from_center(Vec2::new(WIDTH / 2.0, y), ENTRY_HALF_EXTENTS),
                background: None,
            })
            .collect();
        Self {
            title: title.to_string(),
            lines,
            entries,
            selected: 0,
        }
    }

    /// Main menu: every game, then reset and quit. Shows every stored
    /// high score above the entries.
    pub fn main(scores: &HighScores) -> Self {
        let lines = GameKind::ALL
            .iter()
            .map(|kind| format!("{} High Score: {}", kind.title(), scores.get(*kind)))
            .collect();
        let mut items: Vec<(String, MenuAction)> = GameKind::ALL
            .iter()
            .map(|kind| {
                let action = match kind {
                    GameKind::Clicker => MenuAction::ChooseClickerTime,
                    other => MenuAction::Play(*other),
                };
                (kind.title().to_string(), action)
            })
            .collect();
        items.push(("Reset Highscores".to_string(), MenuAction::ResetHighScores));
        items.push(("Quit".to_string(), MenuAction::Quit));

        let items = items
            .into_iter()
            .enumerate()
            .map(|(i, (label, action))| (label, action, 200.0 + 34.0 * i as f32))
            .collect();
        Self::new(MAIN_TITLE, lines, items)
    }

    /// Clicker duration picker.
    pub fn clicker_select() -> Self {
        let mut items: Vec<(String, MenuAction, f32)> = CLICKER_DURATIONS
            .iter()
            .enumerate()
            .map(|(i, secs)| {
                (
                    format!("{secs} Seconds"),
                    MenuAction::ClickerTime(*secs),
                    150.0 + 50.0 * i as f32,
                )
            })
            .collect();
        items.push(("Back to Menu".to_string(), MenuAction::BackToMenu, 350.0));
        Self::new(CLICKER_TITLE, Vec::new(), items)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Move the highlight with wrap-around.
    pub fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    pub fn selected_action(&self) -> Option<MenuAction> {
        self.entries.get(self.selected).map(|e| e.action)
    }

    pub fn action_at(&self, point: Vec2) -> Option<MenuAction> {
        self.entries
            .iter()
            .find(|e| e.bounds.contains(point))
            .map(|e| e.action)
    }

    pub fn view(&self) -> MenuView {
        MenuView {
            title: self.title.clone(),
            lines: self.lines.clone(),
            entries: self.entries.iter().map(|e| e.label.clone()).collect(),
            selected: self.selected,
        }
    }

    /// Spawn title, info lines and entry buttons.
    fn spawn_into(&mut self, world: &mut World) {
        let title_y = if self.lines.is_empty() { 80.0 } else { 40.0 };
        world.spawn(
            EntityKind::Label,
            Body::new(
                Shape::text(Vec2::new(WIDTH / 2.0, title_y), &self.title, 20, Anchor::Center),
                Color::RED,
            ),
        );
        for (i, line) in self.lines.iter().enumerate() {
            world.spawn(
                EntityKind::Label,
                Body::new(
                    Shape::text(
                        Vec2::new(WIDTH / 2.0, 70.0 + 18.0 * i as f32),
                        line,
                        11,
                        Anchor::Center,
                    ),
                    Color::BLACK,
                ),
            );
        }
        for entry in &mut self.entries {
            let background = world.spawn(
                EntityKind::Panel,
                Body::new(Shape::Rect { bounds: entry.bounds }, Color::WHITE)
                    .with_outline(Color::GRAY50),
            );
            world.spawn(
                EntityKind::Hud,
                Body::new(
                    Shape::text(entry.bounds.center(), &entry.label, 11, Anchor::Center),
                    Color::BLACK,
                ),
            );
            entry.background = Some(background);
        }
        self.refresh_highlight(world);
    }

    fn refresh_highlight(&self, world: &mut World) {
        for (i, entry) in self.entries.iter().enumerate() {
            let fill = if i == self.selected {
                Color::RED
            } else {
                Color::WHITE
            };
            if let Some(body) = entry.background.and_then(|bg| world.body_mut(bg)) {
                body.fill = fill;
            }
        }
    }
}

/// A non-playing scene: decoration plus an optional menu.
pub struct ShellScene {
    world: World,
    menu: Option<MenuList>,
}

impl ShellScene {
    /// Nothing to show. Placeholder before the first scene is entered.
    pub fn empty() -> Self {
        Self {
            world: World::new(),
            menu: None,
        }
    }

    pub fn welcome(rng: &mut ChaCha8Rng) -> Self {
        let mut world = World::new();
        world_setup::spawn_clouds(&mut world, rng);
        let center = Vec2::new(WIDTH / 2.0, HEIGHT / 2.0);
        world_setup::spawn_text(
            &mut world,
            EntityKind::Label,
            center - Vec2::new(0.0, 50.0),
            "Welcome to GamingGlobe Click: Click Tech Tutorial!",
            24,
            Color::DARK_BLUE,
        );
        world_setup::spawn_text(
            &mut world,
            EntityKind::Label,
            center + Vec2::new(0.0, 10.0),
            "This Game features various Technology abilities of the Console!",
            14,
            Color::BLACK,
        );
        Self { world, menu: None }
    }

    pub fn with_menu(rng: &mut ChaCha8Rng, mut menu: MenuList) -> Self {
        let mut world = World::new();
        world_setup::spawn_clouds(&mut world, rng);
        menu.spawn_into(&mut world);
        Self {
            world,
            menu: Some(menu),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn menu(&self) -> Option<&MenuList> {
        self.menu.as_ref()
    }

    /// Navigate or activate. Returns the action to run, if any.
    pub fn handle_input(&mut self, input: &InputEvent) -> Option<MenuAction> {
        let menu = self.menu.as_mut()?;
        match *input {
            InputEvent::KeyDown { key: Key::Up } => {
                menu.move_selection(-1);
                menu.refresh_highlight(&mut self.world);
                None
            }
            InputEvent::KeyDown { key: Key::Down } => {
                menu.move_selection(1);
                menu.refresh_highlight(&mut self.world);
                None
            }
            InputEvent::KeyDown { key: Key::Enter } => menu.selected_action(),
            InputEvent::KeyDown { key: Key::Escape } => menu
                .entries
                .iter()
                .any(|e| e.action == MenuAction::BackToMenu)
                .then_some(MenuAction::BackToMenu),
            InputEvent::PointerDown { x, y } => menu.action_at(Vec2::new(x, y)),
            _ => None,
        }
    }
}

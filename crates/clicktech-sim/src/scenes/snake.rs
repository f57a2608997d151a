//! Grid snake.
//!
//! Cells are pixel coordinates of the top-left corner of a grid square.
//! The body is kept head-first alongside the entity drawn for each cell.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};
use hecs::Entity;
use rand::Rng;

use clicktech_core::commands::{InputEvent, Key};
use clicktech_core::components::Body;
use clicktech_core::constants::*;
use clicktech_core::enums::{EntityKind, GameKind, Outcome};
use clicktech_core::types::{Color, Shape};

use super::{SimContext, Simulator, Task};
use crate::world::World;

const COLUMNS: i32 = WIDTH as i32 / SNAKE_GRID_SIZE;
const ROWS: i32 = HEIGHT as i32 / SNAKE_GRID_SIZE;

pub struct SnakeGame {
    world: World,
    /// Head first.
    cells: VecDeque<IVec2>,
    segments: VecDeque<Entity>,
    /// Direction applied on the next step.
    direction: IVec2,
    /// Direction of the last completed step.
    last_step: IVec2,
    food: Option<(IVec2, Entity)>,
    eaten: u32,
}

impl SnakeGame {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            cells: VecDeque::new(),
            segments: VecDeque::new(),
            direction: IVec2::X,
            last_step: IVec2::X,
            food: None,
            eaten: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn food_eaten(&self) -> u32 {
        self.eaten
    }

    pub fn head(&self) -> Option<IVec2> {
        self.cells.front().copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.cells.iter().copied()
    }

    pub fn food(&self) -> Option<IVec2> {
        self.food.map(|(cell, _)| cell)
    }

    pub fn direction(&self) -> IVec2 {
        self.direction
    }

    /// Change heading. Reversal into the body is rejected, including a
    /// reversal of a turn queued since the last step.
    pub fn set_direction(&mut self, direction: IVec2) -> bool {
        if direction == -self.direction || direction == -self.last_step {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Place food on `cell`. Rejected when the cell is off the grid or on
    /// the snake.
    pub fn place_food(&mut self, cell: IVec2) -> bool {
        let on_grid = cell.x >= 0
            && cell.y >= 0
            && cell.x < COLUMNS * SNAKE_GRID_SIZE
            && cell.y < ROWS * SNAKE_GRID_SIZE
            && cell % SNAKE_GRID_SIZE == IVec2::ZERO;
        if !on_grid || self.cells.contains(&cell) {
            return false;
        }
        if let Some((_, old)) = self.food.take() {
            self.world.despawn(old);
        }
        let x = cell.x as f32;
        let y = cell.y as f32;
        let size = SNAKE_GRID_SIZE as f32;
        let entity = self.world.spawn(
            EntityKind::Food,
            Body::new(
                Shape::oval(x + 2.0, y + 2.0, x + size - 2.0, y + size - 2.0),
                Color::RED,
            )
            .with_outline(Color::ORANGE),
        );
        self.food = Some((cell, entity));
        true
    }

    /// Random free cell, by rejection sampling.
    fn respawn_food(&mut self, ctx: &mut SimContext<'_>) {
        if self.cells.len() >= (COLUMNS * ROWS) as usize {
            if let Some((_, old)) = self.food.take() {
                self.world.despawn(old);
            }
            return;
        }
        loop {
            let cell = IVec2::new(
                ctx.rng.gen_range(0..COLUMNS) * SNAKE_GRID_SIZE,
                ctx.rng.gen_range(0..ROWS) * SNAKE_GRID_SIZE,
            );
            if self.place_food(cell) {
                return;
            }
        }
    }

    fn spawn_segment(&mut self, cell: IVec2, fill: Color) -> Entity {
        let x = cell.x as f32;
        let y = cell.y as f32;
        let size = SNAKE_GRID_SIZE as f32;
        self.world.spawn(
            EntityKind::SnakeSegment,
            Body::new(Shape::rect(x, y, x + size, y + size), fill),
        )
    }

    fn step(&mut self, ctx: &mut SimContext<'_>) {
        let Some(head) = self.head() else {
            return;
        };
        let next = head + self.direction * SNAKE_GRID_SIZE;

        let off_grid = next.x < 0
            || next.y < 0
            || next.x >= WIDTH as i32
            || next.y >= HEIGHT as i32;
        let grows = self.food() == Some(next);
        // The tail cell is vacated this tick unless the snake grows.
        let blocking = if grows {
            self.cells.len()
        } else {
            self.cells.len().saturating_sub(1)
        };
        let bites_self = self.cells.iter().take(blocking).any(|cell| *cell == next);

        if off_grid || bites_self {
            ctx.finish(Outcome::SnakeCollided {
                length: self.cells.len() as u32,
            });
            return;
        }

        if let Some(old_head) = self.segments.front().copied() {
            if let Some(body) = self.world.body_mut(old_head) {
                body.fill = Color::GREEN;
            }
        }
        self.cells.push_front(next);
        let segment = self.spawn_segment(next, Color::LIME);
        self.segments.push_front(segment);
        self.last_step = self.direction;

        if grows {
            self.eaten += 1;
            ctx.add_score(SCORE_FOOD);
            self.respawn_food(ctx);
        } else {
            self.cells.pop_back();
            if let Some(tail) = self.segments.pop_back() {
                self.world.despawn(tail);
            }
        }
    }
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for SnakeGame {
    fn kind(&self) -> GameKind {
        GameKind::Snake
    }

    fn setup(&mut self, ctx: &mut SimContext<'_>) {
        for column in 0..COLUMNS {
            let x = (column * SNAKE_GRID_SIZE) as f32;
            self.world.spawn(
                EntityKind::Decoration,
                Body::new(line(Vec2::new(x, 0.0), Vec2::new(x, HEIGHT)), Color::GRAY30),
            );
        }
        for row in 0..ROWS {
            let y = (row * SNAKE_GRID_SIZE) as f32;
            self.world.spawn(
                EntityKind::Decoration,
                Body::new(line(Vec2::new(0.0, y), Vec2::new(WIDTH, y)), Color::GRAY30),
            );
        }

        let start = IVec2::new(COLUMNS / 2, ROWS / 2) * SNAKE_GRID_SIZE;
        for i in 0..SNAKE_INITIAL_LENGTH as i32 {
            let cell = start - IVec2::new(i * SNAKE_GRID_SIZE, 0);
            let fill = if i == 0 { Color::LIME } else { Color::GREEN };
            let segment = self.spawn_segment(cell, fill);
            self.cells.push_back(cell);
            self.segments.push_back(segment);
        }
        self.direction = IVec2::X;
        self.last_step = IVec2::X;
        self.respawn_food(ctx);

        ctx.every(SNAKE_UPDATE_MS, Task::Update);
    }

    fn update(&mut self, ctx: &mut SimContext<'_>) {
        if ctx.is_finished() {
            return;
        }
        self.step(ctx);
    }

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut SimContext<'_>) {
        if ctx.is_finished() {
            return;
        }
        let InputEvent::KeyDown { key } = input else {
            return;
        };
        let direction = match key {
            Key::Up => IVec2::NEG_Y,
            Key::Down => IVec2::Y,
            Key::Left => IVec2::NEG_X,
            Key::Right => IVec2::X,
            _ => return,
        };
        self.set_direction(direction);
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn background(&self) -> Color {
        Color::GRAY10
    }
}

fn line(from: Vec2, to: Vec2) -> Shape {
    Shape::Line {
        from,
        to,
        width: 1.0,
    }
}

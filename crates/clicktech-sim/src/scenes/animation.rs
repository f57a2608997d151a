//! Keyframe animation studio.
//!
//! Idle: shapes can be dragged and recorded into frames. Playing: frames
//! are shown in a loop and editing is locked.

use glam::Vec2;
use hecs::Entity;
use tracing::debug;

use clicktech_core::commands::{InputEvent, Key};
use clicktech_core::components::{Body, Movable, ShapeId};
use clicktech_core::constants::*;
use clicktech_core::enums::{EntityKind, GameKind};
use clicktech_core::events::GameEvent;
use clicktech_core::types::{Aabb, Anchor, Color, Shape};

use super::{SimContext, Simulator, Task};
use crate::keyframe::{Frame, FrameSequence, ShapeSnapshot};
use crate::scheduler::TimerHandle;
use crate::world::World;

const PANEL_TOP: f32 = HEIGHT - ANIMATION_PANEL_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StudioAction {
    Record,
    Prev,
    Next,
    TogglePlay,
    ClearAll,
}

/// Shape being dragged and the last pointer position.
#[derive(Debug, Clone, Copy)]
struct Drag {
    shape: Entity,
    last: Vec2,
}

pub struct AnimationStudio {
    world: World,
    frames: FrameSequence,
    playback: Option<TimerHandle>,
    drag: Option<Drag>,
    frame_label: Option<Entity>,
    buttons: Vec<(Aabb, StudioAction)>,
}

impl AnimationStudio {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            frames: FrameSequence::new(),
            playback: None,
            drag: None,
            frame_label: None,
            buttons: Vec::new(),
        }
    }

    pub fn frames(&self) -> &FrameSequence {
        &self.frames
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Live shapes in display order.
    pub fn shapes(&self) -> &[Entity] {
        self.world.entities(EntityKind::AnimShape)
    }

    /// Snapshot of every live shape.
    pub fn capture(&self) -> Frame {
        self.shapes()
            .iter()
            .filter_map(|shape| {
                let id = self.world.get::<ShapeId>(*shape)?;
                let body = self.world.body(*shape)?;
                Some((id, ShapeSnapshot::capture(&body)?))
            })
            .collect()
    }

    /// Move a shape by `delta` as a drag would. Ignored while playing.
    pub fn move_shape(&mut self, shape: Entity, delta: Vec2) -> bool {
        if self.is_playing() {
            return false;
        }
        self.world.translate(shape, delta)
    }

    pub fn record(&mut self, ctx: &mut SimContext<'_>) {
        let frame = self.capture();
        if !self.frames.accepts(&frame) {
            debug!("empty frame not recorded");
            return;
        }
        self.stop(ctx);
        if self.frames.insert_after_cursor(frame).is_some() {
            self.show_current(ctx);
        }
    }

    pub fn prev(&mut self, ctx: &mut SimContext<'_>) {
        self.stop(ctx);
        if self.frames.step(-1).is_some() {
            self.show_current(ctx);
        }
    }

    pub fn next(&mut self, ctx: &mut SimContext<'_>) {
        self.stop(ctx);
        if self.frames.step(1).is_some() {
            self.show_current(ctx);
        }
    }

    pub fn toggle_play(&mut self, ctx: &mut SimContext<'_>) {
        if self.is_playing() {
            self.stop(ctx);
        } else if !self.frames.is_empty() {
            self.drag = None;
            self.playback = Some(ctx.every(PLAYBACK_INTERVAL_MS, Task::Playback));
        }
    }

    /// Drop every frame and start over from the default shapes.
    pub fn clear_all(&mut self, ctx: &mut SimContext<'_>) {
        self.stop(ctx);
        self.frames.clear();
        self.world.despawn_kind(EntityKind::AnimShape);
        self.spawn_default_shapes();
        self.record(ctx);
    }

    /// Cancel playback, freezing on the frame currently shown.
    fn stop(&mut self, ctx: &mut SimContext<'_>) {
        if let Some(handle) = self.playback.take() {
            ctx.scheduler.cancel(handle);
            self.show_current(ctx);
        }
    }

    fn show_current(&mut self, ctx: &mut SimContext<'_>) {
        let Some(frame) = self.frames.current().cloned() else {
            return;
        };
        self.world.despawn_kind(EntityKind::AnimShape);
        for (id, snapshot) in frame {
            self.world
                .spawn_with(EntityKind::AnimShape, snapshot.to_body(), (id, Movable));
        }
        let (index, total) = self.frames.display_position();
        if let Some(label) = self.frame_label {
            self.world.set_text(label, format!("Frame: {index}/{total}"));
        }
        ctx.events.push(GameEvent::FrameShown { index, total });
    }

    fn spawn_default_shapes(&mut self) {
        let cx = WIDTH / 2.0;
        let cy = HEIGHT / 2.0;
        let defaults = [
            (
                ShapeId(1),
                Body::new(
                    Shape::oval(cx - 20.0, cy - 20.0, cx + 20.0, cy + 20.0),
                    Color::PURPLE,
                ),
            ),
            (
                ShapeId(2),
                Body::new(
                    Shape::rect(cx - 80.0, cy + 50.0, cx - 40.0, cy + 90.0),
                    Color::ORANGE,
                ),
            ),
        ];
        for (id, body) in defaults {
            self.world.spawn_with(
                EntityKind::AnimShape,
                body.with_outline(Color::BLACK),
                (id, Movable),
            );
        }
    }

    fn build_panel(&mut self) {
        self.world.spawn(
            EntityKind::Panel,
            Body::new(Shape::rect(0.0, PANEL_TOP, WIDTH, HEIGHT), Color::GRAY80),
        );
        let y = HEIGHT - 30.0;
        let buttons = [
            (60.0, 50.0, "Record Frame", Color::GREEN, StudioAction::Record),
            (160.0, 28.0, "< Prev", Color::BLUE, StudioAction::Prev),
            (320.0, 28.0, "Next >", Color::BLUE, StudioAction::Next),
            (420.0, 28.0, "Play", Color::RED, StudioAction::TogglePlay),
            (WIDTH - 50.0, 36.0, "Clear All", Color::GRAY, StudioAction::ClearAll),
        ];
        for (x, half_width, label, fill, action) in buttons {
            let bounds = Aabb::from_center(Vec2::new(x, y), Vec2::new(half_width, 12.0));
            self.world
                .spawn(EntityKind::Panel, Body::new(Shape::Rect { bounds }, fill));
            self.world.spawn(
                EntityKind::Panel,
                Body::new(
                    Shape::text(bounds.center(), label, 10, Anchor::Center),
                    Color::WHITE,
                ),
            );
            self.buttons.push((bounds, action));
        }
        self.frame_label = Some(self.world.spawn(
            EntityKind::Panel,
            Body::new(
                Shape::text(Vec2::new(240.0, y), "Frame: 1/1", 12, Anchor::Center),
                Color::BLACK,
            ),
        ));
    }

    fn run_action(&mut self, action: StudioAction, ctx: &mut SimContext<'_>) {
        match action {
            StudioAction::Record => self.record(ctx),
            StudioAction::Prev => self.prev(ctx),
            StudioAction::Next => self.next(ctx),
            StudioAction::TogglePlay => self.toggle_play(ctx),
            StudioAction::ClearAll => self.clear_all(ctx),
        }
    }

    fn pointer_down(&mut self, point: Vec2, ctx: &mut SimContext<'_>) {
        if point.y > PANEL_TOP {
            let action = self
                .buttons
                .iter()
                .find(|(bounds, _)| bounds.contains(point))
                .map(|(_, action)| *action);
            if let Some(action) = action {
                self.run_action(action, ctx);
            }
            return;
        }
        if self.is_playing() {
            return;
        }
        // Topmost shape under the pointer.
        self.drag = self
            .shapes()
            .iter()
            .rev()
            .copied()
            .find(|shape| {
                self.world.get::<Movable>(*shape).is_some()
                    && self.world.bbox(*shape).is_some_and(|b| b.contains(point))
            })
            .map(|shape| Drag { shape, last: point });
    }

    fn pointer_drag(&mut self, point: Vec2) {
        let Some(drag) = self.drag else {
            return;
        };
        if !self.move_shape(drag.shape, point - drag.last) {
            self.drag = None;
            return;
        }
        self.drag = Some(Drag {
            shape: drag.shape,
            last: point,
        });
    }

    fn pointer_up(&mut self) {
        if let Some(drag) = self.drag.take() {
            debug!(shape = ?self.world.get::<ShapeId>(drag.shape), "shape_moved_unrecorded");
        }
    }
}

impl Default for AnimationStudio {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for AnimationStudio {
    fn kind(&self) -> GameKind {
        GameKind::Animation
    }

    fn setup(&mut self, ctx: &mut SimContext<'_>) {
        self.build_panel();
        self.spawn_default_shapes();
        self.record(ctx);
    }

    fn on_task(&mut self, task: Task, ctx: &mut SimContext<'_>) {
        if task != Task::Playback || !self.is_playing() {
            return;
        }
        if self.frames.advance_wrapping().is_some() {
            self.show_current(ctx);
        }
    }

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut SimContext<'_>) {
        match *input {
            InputEvent::KeyDown { key } => match key {
                Key::Char('r') => self.record(ctx),
                Key::Left => self.prev(ctx),
                Key::Right => self.next(ctx),
                Key::Space => self.toggle_play(ctx),
                Key::Char('x') => self.clear_all(ctx),
                _ => {}
            },
            InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y), ctx),
            InputEvent::PointerDrag { x, y } => self.pointer_drag(Vec2::new(x, y)),
            InputEvent::PointerUp { .. } => self.pointer_up(),
        }
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn background(&self) -> Color {
        Color::LIGHT_GRAY
    }
}

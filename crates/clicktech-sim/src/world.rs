//! Scene world: a hecs world plus one spawn-ordered collection per kind.
//!
//! hecs does not keep insertion order, but scan order matters (pursuit
//! ties, first brick hit, paint order), so every entity is also listed in
//! the collection for its `Kind`. Removal from the collection and
//! despawning always happen together.

use std::collections::BTreeMap;

use glam::Vec2;
use hecs::{DynamicBundle, Entity};

use clicktech_core::collision::overlaps_opt;
use clicktech_core::components::{Body, Kind};
use clicktech_core::enums::EntityKind;
use clicktech_core::state::DrawItem;
use clicktech_core::types::{Aabb, Shape};

/// Visual partner that moves and dies with its owner (unit label,
/// building roof, cloud shadow).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Companion(pub Entity);

#[derive(Default)]
pub struct World {
    ecs: hecs::World,
    order: BTreeMap<EntityKind, Vec<Entity>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, kind: EntityKind, body: Body) -> Entity {
        let entity = self.ecs.spawn((Kind(kind), body));
        self.order.entry(kind).or_default().push(entity);
        entity
    }

    /// Spawn with extra components (velocity, lifetime, pursuit state).
    pub fn spawn_with(
        &mut self,
        kind: EntityKind,
        body: Body,
        extra: impl DynamicBundle,
    ) -> Entity {
        let entity = self.spawn(kind, body);
        let _ = self.ecs.insert(entity, extra);
        entity
    }

    /// Add a component to a live entity. Stale handles return false.
    pub fn insert<C: hecs::Component>(&mut self, entity: Entity, component: C) -> bool {
        self.ecs.insert_one(entity, component).is_ok()
    }

    /// Attach `companion` to `owner`.
    pub fn pair(&mut self, owner: Entity, companion: Entity) {
        let _ = self.ecs.insert_one(owner, Companion(companion));
    }

    /// Remove an entity and its companion. Stale handles return false.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        let Some(kind) = self.kind_of(entity) else {
            return false;
        };
        let companion = self.companion(entity);
        if let Some(list) = self.order.get_mut(&kind) {
            list.retain(|e| *e != entity);
        }
        let _ = self.ecs.despawn(entity);
        if let Some(companion) = companion {
            self.despawn(companion);
        }
        true
    }

    /// Remove every entity of one kind.
    pub fn despawn_kind(&mut self, kind: EntityKind) -> usize {
        let ids = self.ids(kind);
        ids.into_iter().filter(|e| self.despawn(*e)).count()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.ecs.contains(entity)
    }

    pub fn kind_of(&self, entity: Entity) -> Option<EntityKind> {
        self.ecs.get::<&Kind>(entity).ok().map(|k| k.0)
    }

    pub fn companion(&self, entity: Entity) -> Option<Entity> {
        self.ecs.get::<&Companion>(entity).ok().map(|c| c.0)
    }

    /// Live entities of `kind` in spawn order.
    pub fn entities(&self, kind: EntityKind) -> &[Entity] {
        self.order.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Owned copy of the collection, for loops that remove while iterating.
    pub fn ids(&self, kind: EntityKind) -> Vec<Entity> {
        self.entities(kind).to_vec()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities(kind).len()
    }

    pub fn len(&self) -> usize {
        self.order.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bbox(&self, entity: Entity) -> Option<Aabb> {
        self.ecs
            .get::<&Body>(entity)
            .ok()
            .and_then(|body| body.bbox())
    }

    /// First defining point: polygon apex, box top-left, line start.
    pub fn origin(&self, entity: Entity) -> Option<Vec2> {
        let body = self.ecs.get::<&Body>(entity).ok()?;
        match &body.shape {
            Shape::Rect { bounds } | Shape::Oval { bounds } => {
                Some(Vec2::new(bounds.min_x, bounds.min_y))
            }
            Shape::Polygon { points } => points.first().copied(),
            Shape::Line { from, .. } => Some(*from),
            Shape::Text { at, .. } => Some(*at),
        }
    }

    /// Overlap test between two possibly-removed entities.
    pub fn collide(&self, a: Entity, b: Entity) -> bool {
        overlaps_opt(self.bbox(a), self.bbox(b))
    }

    /// First entity of `kind` overlapping `entity`, in scan order.
    pub fn first_hit(&self, entity: Entity, kind: EntityKind) -> Option<Entity> {
        let bounds = self.bbox(entity)?;
        self.entities(kind)
            .iter()
            .copied()
            .find(|other| *other != entity && overlaps_opt(Some(bounds), self.bbox(*other)))
    }

    /// Move an entity and its companion. Returns false for stale handles.
    pub fn translate(&mut self, entity: Entity, delta: Vec2) -> bool {
        let companion = self.companion(entity);
        let Ok(body) = self.ecs.query_one_mut::<&mut Body>(entity) else {
            return false;
        };
        body.shape.translate(delta);
        if let Some(companion) = companion {
            if let Ok(body) = self.ecs.query_one_mut::<&mut Body>(companion) {
                body.shape.translate(delta);
            }
        }
        true
    }

    /// Move every entity of `kind` (and their companions).
    pub fn translate_kind(&mut self, kind: EntityKind, delta: Vec2) {
        for entity in self.ids(kind) {
            self.translate(entity, delta);
        }
    }

    pub fn body(&self, entity: Entity) -> Option<Body> {
        self.ecs.get::<&Body>(entity).ok().map(|b| (*b).clone())
    }

    pub fn body_mut(&mut self, entity: Entity) -> Option<&mut Body> {
        self.ecs.query_one_mut::<&mut Body>(entity).ok()
    }

    /// Copy out a `Copy` component.
    pub fn get<C: hecs::Component + Copy>(&self, entity: Entity) -> Option<C> {
        self.ecs.get::<&C>(entity).ok().map(|c| *c)
    }

    pub fn get_mut<C: hecs::Component>(&mut self, entity: Entity) -> Option<&mut C> {
        self.ecs.query_one_mut::<&mut C>(entity).ok()
    }

    pub fn set_hidden(&mut self, entity: Entity, hidden: bool) {
        if let Some(body) = self.body_mut(entity) {
            body.hidden = hidden;
        }
    }

    pub fn set_text(&mut self, entity: Entity, text: impl Into<String>) {
        if let Some(body) = self.body_mut(entity) {
            body.shape.set_text(text);
        }
    }

    pub fn ecs(&self) -> &hecs::World {
        &self.ecs
    }

    pub fn clear(&mut self) {
        self.ecs.clear();
        self.order.clear();
    }

    /// Visible bodies in paint order, back to front.
    pub fn draw_items(&self) -> Vec<DrawItem> {
        let mut items = Vec::with_capacity(self.len());
        for kind in EntityKind::DRAW_ORDER {
            for entity in self.entities(kind) {
                let Ok(body) = self.ecs.get::<&Body>(*entity) else {
                    continue;
                };
                if body.hidden {
                    continue;
                }
                items.push(DrawItem {
                    id: entity.to_bits().get(),
                    shape: body.shape.clone(),
                    fill: body.fill,
                    outline: body.outline,
                });
            }
        }
        items
    }
}

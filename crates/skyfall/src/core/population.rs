use crate::components::entity::{Entity, EntityKind};
use crate::components::kind::KindSpec;
use crate::systems::spawn::SpawnTimer;

/// Live entities of one kind, plus that kind's rules and spawn timer.
///
/// A flat `Vec` in spawn order. Sized for dozens of entities, not thousands.
#[derive(Debug, Clone)]
pub struct Population {
    spec: KindSpec,
    entities: Vec<Entity>,
    pub(crate) timer: SpawnTimer,
}

impl Population {
    pub fn new(spec: KindSpec) -> Self {
        Self {
            spec,
            entities: Vec::with_capacity(8),
            timer: SpawnTimer::default(),
        }
    }

    pub fn spec(&self) -> &KindSpec {
        &self.spec
    }

    pub fn kind(&self) -> EntityKind {
        self.spec.kind()
    }

    pub fn timer(&self) -> &SpawnTimer {
        &self.timer
    }

    /// Append a freshly spawned entity.
    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Remove every entity for which `expired` returns true.
    ///
    /// Each entity is visited exactly once and survivors keep their order.
    /// Returns the number removed.
    pub fn cull(&mut self, mut expired: impl FnMut(&Entity) -> bool) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !expired(e));
        before - self.entities.len()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Whether `max_alive` has been reached.
    pub fn is_full(&self) -> bool {
        self.spec.max_alive.is_some_and(|cap| self.entities.len() >= cap)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

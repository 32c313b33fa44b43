use std::mem;
use crate::data::snapshot::Snapshot;
use crate::rendering::MapSurface;

/// The snapshot currently on the map. Replaced wholesale, never edited in place.
pub struct LiveSnapshot {
    current: Snapshot
}

impl LiveSnapshot {
    pub fn new() -> Self {
        Self { current: Snapshot::empty() }
    }

    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Attaches `next`, then detaches the outgoing snapshot, which is returned. Only `next` is
    /// current once this returns.
    pub fn swap<M: MapSurface + ?Sized>(&mut self, next: Snapshot, surface: &mut M) -> Snapshot {
        surface.attach_entities(&next);
        let previous = mem::replace(&mut self.current, next);
        surface.detach_entities(&previous);
        previous
    }
}

impl Default for LiveSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

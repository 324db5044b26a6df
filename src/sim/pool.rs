//! Fixed-capacity entity pools
//!
//! Slots are allocated once at construction and toggled active/inactive.
//! Spawning takes the first free slot; a full pool drops the request.

use super::collision::{Aabb, Playfield};

/// Capability contract shared by bullets, enemies and pickups
pub trait Pooled: Default {
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
    fn aabb(&self) -> Aabb;
    /// Advance one tick; deactivate when leaving the play area
    fn update(&mut self, dt: f32, field: &Playfield);
}

/// A fixed set of reusable entity slots
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<T>,
}

impl<T: Pooled> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, T::default);
        Self { slots }
    }

    /// Initialize the first inactive slot in place.
    ///
    /// Returns `false` without touching anything when every slot is in use.
    pub fn spawn(&mut self, init: impl FnOnce(&mut T)) -> bool {
        match self.slots.iter_mut().find(|slot| !slot.is_active()) {
            Some(slot) => {
                init(slot);
                true
            }
            None => false,
        }
    }

    pub fn update(&mut self, dt: f32, field: &Playfield) {
        for slot in self.slots.iter_mut().filter(|s| s.is_active()) {
            slot.update(dt, field);
        }
    }

    /// Active members in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|s| s.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter(|s| s.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.is_active())
    }

    /// Deactivate every slot
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.deactivate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Dot {
        active: bool,
        y: f32,
        tag: u32,
    }

    impl Pooled for Dot {
        fn is_active(&self) -> bool {
            self.active
        }

        fn deactivate(&mut self) {
            self.active = false;
        }

        fn aabb(&self) -> Aabb {
            Aabb {
                x: 0.0,
                y: self.y,
                w: 1.0,
                h: 1.0,
            }
        }

        fn update(&mut self, dt: f32, field: &Playfield) {
            self.y += 100.0 * dt;
            if self.y > field.height {
                self.active = false;
            }
        }
    }

    fn spawn_tagged(pool: &mut Pool<Dot>, tag: u32) -> bool {
        pool.spawn(|d| {
            d.active = true;
            d.y = 0.0;
            d.tag = tag;
        })
    }

    #[test]
    fn test_spawn_until_full() {
        let mut pool = Pool::<Dot>::new(2);
        assert!(spawn_tagged(&mut pool, 1));
        assert!(spawn_tagged(&mut pool, 2));
        assert!(pool.is_full());
        assert!(!spawn_tagged(&mut pool, 3));
        assert_eq!(pool.active_count(), 2);
        let tags: Vec<u32> = pool.iter_active().map(|d| d.tag).collect();
        assert_eq!(tags, vec![1, 2]);
    }

    #[test]
    fn test_first_free_slot_wins() {
        let mut pool = Pool::<Dot>::new(3);
        spawn_tagged(&mut pool, 1);
        spawn_tagged(&mut pool, 2);
        spawn_tagged(&mut pool, 3);
        // Free the middle slot, next spawn must reuse it
        pool.iter_active_mut()
            .find(|d| d.tag == 2)
            .unwrap()
            .deactivate();
        spawn_tagged(&mut pool, 4);
        let tags: Vec<u32> = pool.iter_active().map(|d| d.tag).collect();
        assert_eq!(tags, vec![1, 4, 3]);
    }

    #[test]
    fn test_update_expires_members() {
        let mut pool = Pool::<Dot>::new(4);
        spawn_tagged(&mut pool, 1);
        let field = Playfield::new(100.0, 50.0);
        pool.update(0.4, &field);
        assert_eq!(pool.active_count(), 1);
        pool.update(0.2, &field);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.capacity(), 4);
    }

    #[test]
    fn test_clear() {
        let mut pool = Pool::<Dot>::new(3);
        spawn_tagged(&mut pool, 1);
        spawn_tagged(&mut pool, 2);
        pool.clear();
        assert_eq!(pool.active_count(), 0);
    }
}

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Typed index into a [`FixedStore`].
pub trait Handle: Copy {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

/// Stable handle to a particle. Stays valid for the whole session because the
/// particle store never grows, shrinks, or reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ParticleId(usize);

impl ParticleId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }
}

impl Handle for ParticleId {
    fn from_index(index: usize) -> Self {
        Self(index)
    }

    fn index(self) -> usize {
        self.0
    }
}

/// Stable handle to a constraint, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ConstraintId(usize);

impl ConstraintId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }
}

impl Handle for ConstraintId {
    fn from_index(index: usize) -> Self {
        Self(index)
    }

    fn index(self) -> usize {
        self.0
    }
}

/// Fixed-capacity store. Its length is decided at construction and the
/// backing slice is never reallocated, so handles cannot dangle.
#[derive(Debug, Clone)]
pub struct FixedStore<T, H: Handle> {
    items: Box<[T]>,
    _handle: PhantomData<H>,
}

impl<T, H: Handle> FixedStore<T, H> {
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: items.into_boxed_slice(),
            _handle: PhantomData,
        }
    }

    pub fn get(&self, id: H) -> Option<&T> {
        self.items.get(id.index())
    }

    pub fn get_mut(&mut self, id: H) -> Option<&mut T> {
        self.items.get_mut(id.index())
    }

    /// Mutable access to two distinct slots at once.
    pub fn get2_mut(&mut self, id_a: H, id_b: H) -> Option<(&mut T, &mut T)> {
        let (a, b) = (id_a.index(), id_b.index());
        if a == b || a >= self.items.len() || b >= self.items.len() {
            return None;
        }

        let (first, second, flipped) = if a < b { (a, b, false) } else { (b, a, true) };
        let (left, right) = self.items.split_at_mut(second);
        let first_slot = &mut left[first];
        let second_slot = &mut right[0];

        if flipped {
            Some((second_slot, first_slot))
        } else {
            Some((first_slot, second_slot))
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn iter_with_ids(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (H::from_index(index), item))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

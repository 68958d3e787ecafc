//! Intersection handles.
//!
//! Intersections are named by strings in the persistence format, but inside a
//! `Network` they live in a `Vec` and are addressed by a `Copy` handle.  A
//! route keeps the handle of its origin instead of a pointer, so the graph
//! has no ownership cycles.

/// Position of an intersection in its network's table (insertion order).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionId(pub u32);

impl IntersectionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fails once a network outgrows `u32` handles.
impl TryFrom<usize> for IntersectionId {
    type Error = std::num::TryFromIntError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        u32::try_from(n).map(IntersectionId)
    }
}

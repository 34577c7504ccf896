//! Overlap queries between single entities and entity collections
//!
//! All boxes share the same size and sit on the lattice, so two boxes
//! intersect exactly when their cells are equal.

use super::entity::Boxed;

/// Whether two boxed entities intersect
pub fn intersects<A: Boxed + ?Sized, B: Boxed + ?Sized>(a: &A, b: &B) -> bool {
    a.cell() == b.cell()
}

/// Whether anything in `set` overlaps `a`
pub fn any_overlap<'a, A, B, I>(a: &A, set: I) -> bool
where
    A: Boxed + ?Sized,
    B: Boxed + 'a,
    I: IntoIterator<Item = &'a B>,
{
    set.into_iter().any(|b| intersects(a, b))
}

/// Number of members of `set` overlapping `a`
pub fn count_overlaps<'a, A, B, I>(a: &A, set: I) -> usize
where
    A: Boxed + ?Sized,
    B: Boxed + 'a,
    I: IntoIterator<Item = &'a B>,
{
    set.into_iter().filter(|b| intersects(a, *b)).count()
}

/// Remove and return every member of `set` overlapping `a`
pub fn take_overlapping<A, B>(a: &A, set: &mut Vec<B>) -> Vec<B>
where
    A: Boxed + ?Sized,
    B: Boxed,
{
    let mut taken = Vec::new();
    let mut kept = Vec::with_capacity(set.len());
    for item in set.drain(..) {
        if intersects(a, &item) {
            taken.push(item);
        } else {
            kept.push(item);
        }
    }
    *set = kept;
    taken
}

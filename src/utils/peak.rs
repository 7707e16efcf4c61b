use crate::float::Float;

/// Index and value of the largest element of `arr`. Ties go to the first
/// occurrence; NaNs are never chosen. Returns `None` for an empty slice.
pub fn find_peak<T: Float>(arr: &[T]) -> Option<(usize, T)> {
    arr.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, T)>, (i, &v)| match best {
            Some((_, peak)) if !(v > peak) => best,
            _ if v.is_nan() => best,
            _ => Some((i, v)),
        })
}

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for body positions, velocities, and forces
pub type Vector = bevy::math::DVec2;

/// Flat phase-space state handed to the integrators
pub type StateVector = Vec<Scalar>;

/// Returns `base + scale * direction`, element by element
///
/// Both slices must have the same length.
#[inline]
pub fn offset_state(base: &[Scalar], direction: &[Scalar], scale: Scalar) -> StateVector {
    debug_assert_eq!(base.len(), direction.len());
    base.iter()
        .zip(direction)
        .map(|(value, rate)| value + scale * rate)
        .collect()
}

/// Wraps a coordinate onto a torus of the given extent
///
/// Values already inside `[0, extent]` are returned untouched, so a body
/// sitting exactly on the far edge stays there. Anything outside is folded
/// back with a euclidean remainder, which also handles bodies that travelled
/// more than one extent in a single step. Non-finite values pass through.
#[inline]
pub fn wrap_coordinate(value: Scalar, extent: Scalar) -> Scalar {
    if (0.0..=extent).contains(&value) || !value.is_finite() || extent <= 0.0 {
        value
    } else {
        value.rem_euclid(extent)
    }
}

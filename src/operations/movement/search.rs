use std::convert::Infallible;

/// Smallest interval width the search will resolve.
const MIN_PRECISION: f64 = 1e-9;

/// Longest displacement in `[0, requested]` accepted by `is_valid`, to
/// within `precision`.
///
/// Assumes validity is monotone: every length below the boundary is valid,
/// every length above it is not. `requested` itself is taken as invalid and
/// is never probed; `0` is returned when no probed length passes.
pub fn search_valid_length(
    requested: f64,
    precision: f64,
    mut is_valid: impl FnMut(f64) -> bool,
) -> f64 {
    match try_search_valid_length(requested, precision, |len| {
        Ok::<_, Infallible>(is_valid(len))
    }) {
        Ok(found) => found,
        Err(never) => match never {},
    }
}

/// [`search_valid_length`] with a fallible test. The first error ends the
/// search and is returned.
///
/// # Errors
///
/// Returns whatever error `is_valid` returns.
pub fn try_search_valid_length<E>(
    requested: f64,
    precision: f64,
    mut is_valid: impl FnMut(f64) -> Result<bool, E>,
) -> Result<f64, E> {
    let precision = precision.max(MIN_PRECISION);
    let mut lo = 0.0;
    let mut hi = requested;
    while hi - lo >= precision {
        let mid = lo + (hi - lo) / 2.0;
        if mid <= lo || mid >= hi {
            break;
        }
        if is_valid(mid)? {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}

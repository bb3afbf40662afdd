//! Nearest-floor search over a sorted candidate pool.

use elevator_core::{Error, Floor, Result};

/// Return the candidate closest to `current`.
///
/// `candidates` must be sorted ascending and free of duplicates. When two
/// candidates are equally far away the lower one wins.
///
/// # Errors
///
/// Returns `Error::NoCandidates` if `candidates` is empty.
///
/// # Examples
///
/// ```
/// use elevator_car::nearest_floor;
///
/// assert_eq!(nearest_floor(4, &[1, 6, 9]).unwrap(), 6);
/// assert_eq!(nearest_floor(5, &[3, 7]).unwrap(), 3);
/// assert_eq!(nearest_floor(0, &[2, 8]).unwrap(), 2);
/// assert!(nearest_floor(1, &[]).is_err());
/// ```
pub fn nearest_floor(current: Floor, candidates: &[Floor]) -> Result<Floor> {
    debug_assert!(
        candidates.windows(2).all(|w| w[0] < w[1]),
        "candidates must be sorted and distinct"
    );

    let (&lowest, &highest) = match (candidates.first(), candidates.last()) {
        (Some(lowest), Some(highest)) => (lowest, highest),
        _ => return Err(Error::NoCandidates),
    };

    if current <= lowest {
        return Ok(lowest);
    }
    if current >= highest {
        return Ok(highest);
    }

    match candidates.binary_search(&current) {
        Ok(index) => Ok(candidates[index]),
        Err(insertion) => {
            // lowest < current < highest, so both neighbours exist
            let above = candidates[insertion];
            let below = candidates[insertion - 1];
            if above.abs_diff(current) < current.abs_diff(below) {
                Ok(above)
            } else {
                Ok(below)
            }
        }
    }
}

//! SCAN ordering for destination calls.
//!
//! The car keeps going in one direction for as long as there are requests
//! that way, then reverses. When requests lie on both sides of the car, the
//! side holding the first-pressed floor is served first.
//!
//! ```text
//!   floor 5  ●        first pressed = 1 (below the car)
//!   floor 4  ●
//!   floor 3  ▲ car    visit order: 1, 4, 5
//!   floor 2
//!   floor 1  ●
//! ```

use elevator_core::Floor;

/// Order in which to visit `floors` starting from `current`.
///
/// `floors` is expected to be deduplicated and to not contain `current`;
/// the scheduler serves the current floor in place before planning.
/// `first_pressed` selects which run goes first when the car is between
/// requests. A first-pressed floor equal to `current` counts as upper.
///
/// # Examples
///
/// ```
/// use elevator_car::visit_order;
///
/// // Car between requests, first pressed below: go down first.
/// assert_eq!(visit_order(3, 1, &[1, 4, 5]), vec![1, 4, 5]);
///
/// // First pressed above: go up first, then come back down.
/// assert_eq!(visit_order(3, 5, &[5, 1, 4]), vec![4, 5, 1]);
///
/// // Car above every request: straight down.
/// assert_eq!(visit_order(6, 2, &[2, 4]), vec![4, 2]);
/// ```
pub fn visit_order(current: Floor, first_pressed: Floor, floors: &[Floor]) -> Vec<Floor> {
    let mut sorted = floors.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let (Some(&lowest), Some(&highest)) = (sorted.first(), sorted.last()) else {
        return sorted;
    };

    if current > highest {
        sorted.reverse();
        return sorted;
    }
    if current < lowest {
        return sorted;
    }

    // Floors equal to `current` land in the upper run.
    let split = sorted.partition_point(|&floor| floor < current);
    let upper = sorted.split_off(split);
    let mut lower = sorted;
    lower.reverse();

    if first_pressed < current {
        lower.extend(upper);
        lower
    } else {
        let mut order = upper;
        order.extend(lower);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, &[2, 5], &[2, 5])]
    #[case(3, 1, &[1, 4, 5], &[1, 4, 5])]
    #[case(3, 5, &[5, 1, 4], &[4, 5, 1])]
    #[case(3, 1, &[1, 2], &[2, 1])]
    #[case(1, 4, &[4, 2], &[2, 4])]
    #[case(5, 7, &[7, 2, 9, 1, 6], &[6, 7, 9, 2, 1])]
    #[case(5, 2, &[7, 2, 9, 1, 6], &[2, 1, 6, 7, 9])]
    #[case(0, -1, &[-3, -1, 2], &[-1, -3, 2])]
    #[case(4, 8, &[8], &[8])]
    fn test_visit_order(
        #[case] current: Floor,
        #[case] first_pressed: Floor,
        #[case] floors: &[Floor],
        #[case] expected: &[Floor],
    ) {
        assert_eq!(visit_order(current, first_pressed, floors), expected);
    }

    #[test]
    fn test_empty_request() {
        assert!(visit_order(3, 3, &[]).is_empty());
    }

    #[test]
    fn test_first_pressed_at_current_floor_goes_up_first() {
        // Current floor was served in place; it still picks the upper run.
        assert_eq!(visit_order(3, 3, &[1, 5]), vec![5, 1]);
    }

    /// Count how many times the travel direction flips along a route.
    fn reversals(current: Floor, order: &[Floor]) -> usize {
        let mut position = current;
        let mut last_sign = 0;
        let mut count = 0;
        for &floor in order {
            let sign = (floor - position).signum();
            if sign != 0 && last_sign != 0 && sign != last_sign {
                count += 1;
            }
            if sign != 0 {
                last_sign = sign;
            }
            position = floor;
        }
        count
    }

    proptest! {
        /// Every requested floor is visited exactly once.
        #[test]
        fn prop_visits_each_floor_once(
            current in -20i32..20,
            floors in prop::collection::vec(-20i32..20, 1..15),
        ) {
            let requested: Vec<Floor> = floors.iter().copied().filter(|&f| f != current).collect();
            prop_assume!(!requested.is_empty());

            let order = visit_order(current, requested[0], &requested);

            let mut expected = requested.clone();
            expected.sort_unstable();
            expected.dedup();
            let mut visited = order.clone();
            visited.sort_unstable();
            prop_assert_eq!(visited, expected);
        }

        /// The route reverses direction at most once.
        #[test]
        fn prop_reverses_at_most_once(
            current in -20i32..20,
            floors in prop::collection::vec(-20i32..20, 1..15),
        ) {
            let requested: Vec<Floor> = floors.iter().copied().filter(|&f| f != current).collect();
            prop_assume!(!requested.is_empty());

            let order = visit_order(current, requested[0], &requested);
            prop_assert!(reversals(current, &order) <= 1);
        }

        /// The first floor visited lies on the same side as the first-pressed floor.
        #[test]
        fn prop_first_pressed_side_served_first(
            current in -20i32..20,
            floors in prop::collection::vec(-20i32..20, 1..15),
        ) {
            let requested: Vec<Floor> = floors.iter().copied().filter(|&f| f != current).collect();
            prop_assume!(!requested.is_empty());

            let first_pressed = requested[0];
            let order = visit_order(current, first_pressed, &requested);
            prop_assert_eq!((order[0] - current).signum(), (first_pressed - current).signum());
        }
    }
}

use skytrips_core::{PassengerCount, MAX_TOTAL_PASSENGERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassengerField {
    Adults,
    Children,
    Infants,
}

/// Bounded-counter update for one increment/decrement tap.
///
/// Rules are applied in order: floor-clamp the touched field (adults bottom
/// out at 1, the rest at 0); if the new total exceeds the hard cap, pull the
/// touched field back down by the overflow; infants then follow adults down
/// and are clamped so they never outnumber them. Invalid requests are
/// clamped, never rejected wholesale.
pub fn update_passengers(
    field: PassengerField,
    delta: i32,
    current: PassengerCount,
) -> PassengerCount {
    let mut next = current;

    let floor: u32 = match field {
        PassengerField::Adults => 1,
        PassengerField::Children | PassengerField::Infants => 0,
    };
    let touched = get(&next, field);
    let updated = (i64::from(touched) + i64::from(delta)).max(i64::from(floor)) as u32;
    set(&mut next, field, updated);

    let total = next.total();
    if total > MAX_TOTAL_PASSENGERS {
        let overflow = total - MAX_TOTAL_PASSENGERS;
        let reduced = get(&next, field).saturating_sub(overflow).max(floor);
        set(&mut next, field, reduced);
    }

    if next.infants > next.adults {
        next.infants = next.adults;
    }

    next
}

fn get(count: &PassengerCount, field: PassengerField) -> u32 {
    match field {
        PassengerField::Adults => count.adults,
        PassengerField::Children => count.children,
        PassengerField::Infants => count.infants,
    }
}

fn set(count: &mut PassengerCount, field: PassengerField, value: u32) {
    match field {
        PassengerField::Adults => count.adults = value,
        PassengerField::Children => count.children = value,
        PassengerField::Infants => count.infants = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn test_adults_never_drop_below_one() {
        let count = update_passengers(PassengerField::Adults, -5, PassengerCount::default());
        assert_eq!(count.adults, 1);
    }

    #[test]
    fn test_cap_claws_back_the_touched_field() {
        let count = PassengerCount::new(2, 4, 1);
        let next = update_passengers(PassengerField::Children, 3, count);

        // children went 4 -> 7, total 10, overflow 3 pulled back off children
        assert_eq!(next, PassengerCount::new(2, 4, 1));

        let next = update_passengers(PassengerField::Children, 0, PassengerCount::new(2, 4, 1));
        assert_eq!(next.total(), 7);
    }

    #[test]
    fn test_infants_follow_adults_down() {
        let count = PassengerCount::new(3, 0, 3);
        let next = update_passengers(PassengerField::Adults, -1, count);
        assert_eq!(next, PassengerCount::new(2, 0, 2));
    }

    #[test]
    fn test_infants_clamped_to_adults() {
        let count = PassengerCount::new(2, 0, 2);
        let next = update_passengers(PassengerField::Infants, 3, count);
        assert_eq!(next.infants, 2);
    }

    #[test]
    fn test_invariants_hold_under_random_operation_sequences() {
        let mut rng = StdRng::seed_from_u64(7);
        let fields = [
            PassengerField::Adults,
            PassengerField::Children,
            PassengerField::Infants,
        ];

        for _ in 0..200 {
            let mut count = PassengerCount::default();
            for _ in 0..60 {
                let field = fields[rng.gen_range(0..fields.len())];
                let delta = rng.gen_range(-3..=3);
                count = update_passengers(field, delta, count);

                assert!(count.adults >= 1, "adults invariant broken: {:?}", count);
                assert!(
                    count.infants <= count.adults,
                    "infants invariant broken: {:?}",
                    count
                );
                assert!(
                    count.total() <= MAX_TOTAL_PASSENGERS,
                    "cap invariant broken: {:?}",
                    count
                );
            }
        }
    }
}

//! Unit tests for bd-core primitives.

#[cfg(test)]
mod ids {
    use crate::PassengerId;

    #[test]
    fn index_matches_inner() {
        assert_eq!(PassengerId(42).index(), 42);
    }

    #[test]
    fn ordered_by_sequence_number() {
        let mut ids = vec![PassengerId(3), PassengerId(0), PassengerId(2)];
        ids.sort();
        assert_eq!(ids, vec![PassengerId(0), PassengerId(2), PassengerId(3)]);
    }

    #[test]
    fn display() {
        assert_eq!(PassengerId(7).to_string(), "PassengerId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_starts_at_zero_and_advances() {
        let mut clock = SimClock::new();
        assert_eq!(clock.current_tick, Tick::ZERO);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.to_string(), "T2");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: u64 = r1.gen_range(0..u64::MAX);
            let b: u64 = r2.gen_range(0..u64::MAX);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn shuffle_is_reproducible() {
        let mut a: Vec<u32> = (0..50).collect();
        let mut b = a.clone();
        SimRng::new(7).shuffle(&mut a);
        SimRng::new(7).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn sample_indices_are_distinct_and_in_range() {
        let mut rng = SimRng::new(3);
        let mut picked = rng.sample_indices(20, 12);
        assert_eq!(picked.len(), 12);
        assert!(picked.iter().all(|&i| i < 20));
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 12);
    }
}

//! Unit and property tests for bd-order.

use std::cell::Cell;

use bd_cabin::{Seat, SeatLetter, SeatMap, Side};
use bd_core::{PassengerId, SimRng, Tick};

use crate::{
    ActivationQueue, BagModel, Boarder, BoardingOrder, BoardingPolicy, LateArrivalScheduler,
    LateMode, Manifest, OrderError, OrderResult, PassengerSpec,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn map(rows: u16, seats: u8) -> SeatMap {
    SeatMap::new(rows, seats).unwrap()
}

fn letters(order: &[Seat]) -> String {
    order.iter().map(|s| s.letter.as_char()).collect()
}

/// Estimator that must never be consulted.
fn no_estimate(_: &[PassengerSpec]) -> OrderResult<Tick> {
    panic!("estimator consulted unexpectedly")
}

fn order_for(policy: BoardingPolicy, m: &SeatMap, seed: u64) -> BoardingOrder {
    policy.generate(m, &mut SimRng::new(seed)).unwrap()
}

// ── Policies ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod policies {
    use super::*;

    #[test]
    fn every_policy_is_a_bijection() {
        for (rows, seats) in [(1, 2), (2, 2), (3, 4), (10, 6), (33, 6), (7, 10)] {
            let m = map(rows, seats);
            for policy in BoardingPolicy::ALL {
                let order = order_for(policy, &m, 99);
                assert_eq!(order.len(), m.seat_count(), "{policy} on {rows}x{seats}");
                let mut sorted = order.seats().to_vec();
                sorted.sort();
                let all: Vec<Seat> = m.seats().collect();
                assert_eq!(sorted, all, "{policy} on {rows}x{seats}");
            }
        }
    }

    #[test]
    fn window_to_aisle_is_deterministic_and_exact() {
        let m = map(3, 6);
        let a = order_for(BoardingPolicy::WindowToAisle, &m, 1);
        let b = order_for(BoardingPolicy::WindowToAisle, &m, 2);
        assert_eq!(a, b);

        let seats = a.seats();
        for (chunk, row) in seats.chunks(6).zip([3u16, 2, 1]) {
            assert!(chunk.iter().all(|s| s.row == row));
            assert_eq!(letters(chunk), "AFBECD");
        }
    }

    #[test]
    fn back_to_front_rows_descend() {
        let m = map(8, 6);
        let order = order_for(BoardingPolicy::BackToFront, &m, 5);
        let rows: Vec<u16> = order.seats().iter().map(|s| s.row).collect();
        assert!(rows.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(rows[0], 8);
    }

    #[test]
    fn skip_rows_boards_odd_rows_first() {
        let m = map(10, 6);
        let order = order_for(BoardingPolicy::SkipRows, &m, 11);
        let rows: Vec<u16> = order.seats().iter().map(|s| s.row).collect();
        let first_even = rows.iter().position(|r| r % 2 == 0).unwrap();
        assert_eq!(first_even, 5 * 6, "all 5 odd rows come first");
        assert!(rows[..first_even].iter().all(|r| r % 2 == 1));
        assert!(rows[first_even..].iter().all(|r| r % 2 == 0));
        assert!(rows[..first_even].windows(2).all(|w| w[0] >= w[1]));
        assert!(rows[first_even..].windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(rows[0], 9);
        assert_eq!(rows[first_even], 10);
    }

    #[test]
    fn zones_are_contiguous_back_to_front() {
        let m = map(10, 6); // zone size 3: rows 10-8, 7-5, 4-1
        let order = order_for(BoardingPolicy::Zones, &m, 3);
        let rows: Vec<u16> = order.seats().iter().map(|s| s.row).collect();
        assert!(rows[..18].iter().all(|r| (8..=10).contains(r)));
        assert!(rows[18..36].iter().all(|r| (5..=7).contains(r)));
        assert!(rows[36..].iter().all(|r| (1..=4).contains(r)));
    }

    #[test]
    fn zones_with_fewer_than_three_rows() {
        let m = map(2, 4);
        let order = order_for(BoardingPolicy::Zones, &m, 3);
        assert_eq!(order.len(), 8);
    }

    #[test]
    fn four_groups_skip_rows_and_switch_sides() {
        let m = map(6, 6);
        let order = order_for(BoardingPolicy::FourGroups, &m, 8);
        let blocks: Vec<(u16, Side)> = order
            .seats()
            .chunks(3)
            .map(|c| {
                let side = m.side(c[0].letter);
                assert!(c.iter().all(|s| s.row == c[0].row && m.side(s.letter) == side));
                (c[0].row, side)
            })
            .collect();
        use bd_cabin::Side::{Left as L, Right as R};
        assert_eq!(
            blocks,
            vec![
                (6, L), (4, R), (2, L), // G1
                (6, R), (4, L), (2, R), // G2
                (5, L), (3, R), (1, L), // G3
                (5, R), (3, L), (1, R), // G4
            ]
        );
    }

    #[test]
    fn four_groups_single_row() {
        let m = map(1, 4);
        let order = order_for(BoardingPolicy::FourGroups, &m, 8);
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn random_policies_reproducible_per_seed() {
        let m = map(12, 6);
        for policy in BoardingPolicy::ALL {
            assert_eq!(order_for(policy, &m, 77), order_for(policy, &m, 77), "{policy}");
        }
        assert_ne!(
            order_for(BoardingPolicy::Random, &m, 1),
            order_for(BoardingPolicy::Random, &m, 2)
        );
    }

    #[test]
    fn policy_selector_parsing() {
        assert_eq!(BoardingPolicy::try_from(4).unwrap(), BoardingPolicy::Zones);
        assert!(matches!(BoardingPolicy::try_from(6), Err(OrderError::UnknownPolicy(6))));
        assert_eq!("2".parse::<BoardingPolicy>().unwrap(), BoardingPolicy::WindowToAisle);
        assert_eq!("skip-rows".parse::<BoardingPolicy>().unwrap(), BoardingPolicy::SkipRows);
        match "sideways".parse::<BoardingPolicy>() {
            Err(OrderError::UnknownPolicyName(name)) => assert_eq!(name, "sideways"),
            other => panic!("unexpected {other:?}"),
        }
        let err = "sideways".parse::<BoardingPolicy>().unwrap_err();
        assert!(err.to_string().contains("`sideways`"), "{err}");
        assert!(matches!("9".parse::<BoardingPolicy>(), Err(OrderError::UnknownPolicy(9))));
        for policy in BoardingPolicy::ALL {
            assert_eq!(BoardingPolicy::try_from(policy.id()).unwrap(), policy);
        }
    }
}

// ── Bijection check ───────────────────────────────────────────────────────────

#[cfg(test)]
mod bijection {
    use super::*;

    #[test]
    fn duplicate_and_missing_reported() {
        let m = map(1, 4);
        let a = Seat::new(1, SeatLetter(0));
        let b = Seat::new(1, SeatLetter(1));
        let c = Seat::new(1, SeatLetter(2));
        let err = BoardingOrder::new(&m, vec![a, b, c, c]).unwrap_err();
        match err {
            OrderError::Assignment { expected, missing, duplicated } => {
                assert_eq!(expected, 4);
                assert_eq!(missing, vec![Seat::new(1, SeatLetter(3))]);
                assert_eq!(duplicated, vec![c]);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn foreign_seat_rejected() {
        let m = map(1, 2);
        let err = BoardingOrder::new(&m, vec![Seat::new(2, SeatLetter(0))]).unwrap_err();
        assert!(matches!(err, OrderError::Cabin(_)));
    }

    #[test]
    fn short_order_rejected() {
        let m = map(2, 2);
        let seats: Vec<Seat> = m.seats().take(3).collect();
        assert!(matches!(BoardingOrder::new(&m, seats), Err(OrderError::Assignment { .. })));
    }
}

// ── Late arrivals ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod late {
    use super::*;

    fn schedule(
        m:        &SeatMap,
        fraction: f64,
        mode:     LateMode,
        seed:     u64,
        release:  u64,
    ) -> Manifest {
        let mut rng = SimRng::new(seed);
        let order = BoardingPolicy::Random.generate(m, &mut rng).unwrap();
        let estimator = move |_: &[PassengerSpec]| -> OrderResult<Tick> { Ok(Tick(release)) };
        LateArrivalScheduler::new(fraction, mode)
            .unwrap()
            .schedule(&order, &mut rng, &estimator)
            .unwrap()
    }

    #[test]
    fn zero_fraction_marks_nobody_in_either_mode() {
        let m = map(10, 6);
        for mode in [LateMode::Immediate, LateMode::AfterEveryone] {
            let mut rng = SimRng::new(4);
            let order = BoardingPolicy::BackToFront.generate(&m, &mut rng).unwrap();
            let manifest = LateArrivalScheduler::new(0.0, mode)
                .unwrap()
                .schedule(&order, &mut rng, &no_estimate)
                .unwrap();
            assert_eq!(manifest.late_count(), 0);
            assert!(manifest.passengers().iter().all(|p| p.activation_tick == Tick::ZERO));
            let queued: Vec<Seat> = manifest.seats().collect();
            assert_eq!(queued, order.seats(), "order untouched");
        }
    }

    #[test]
    fn exact_floor_count_marked_late() {
        let m = map(10, 6); // 60 passengers
        for (fraction, expected) in [(0.25, 15), (0.5, 30), (0.1, 6), (1.0, 60), (0.01, 0)] {
            for mode in [LateMode::Immediate, LateMode::AfterEveryone] {
                let manifest = schedule(&m, fraction, mode, 9, 500);
                assert_eq!(manifest.late_count(), expected, "{fraction} {mode}");
            }
        }
    }

    #[test]
    fn percentages_of_a_hundred_are_exact() {
        let m = map(50, 2); // 100 passengers
        for pct in [29usize, 57, 58, 7, 14, 28, 56, 100] {
            let manifest = schedule(&m, pct as f64 / 100.0, LateMode::Immediate, 3, 0);
            assert_eq!(manifest.late_count(), pct, "{pct}%");
        }
    }

    #[test]
    fn late_count_matches_integer_floor() {
        for n in [1usize, 7, 60, 100, 198, 333] {
            for pct in 0..=100usize {
                let scheduler =
                    LateArrivalScheduler::new(pct as f64 / 100.0, LateMode::Immediate).unwrap();
                assert_eq!(scheduler.late_count(n), pct * n / 100, "{pct}% of {n}");
            }
        }
        let third = LateArrivalScheduler::new(1.0 / 3.0, LateMode::Immediate).unwrap();
        assert_eq!(third.late_count(10), 3);
        assert_eq!(third.late_count(9), 3);
    }

    #[test]
    fn immediate_offsets_positive_and_distinct() {
        let m = map(10, 6);
        let manifest = schedule(&m, 0.5, LateMode::Immediate, 21, 0);
        let mut ticks: Vec<Tick> = manifest
            .passengers()
            .iter()
            .filter(|p| p.is_late)
            .map(|p| p.activation_tick)
            .collect();
        assert_eq!(ticks.len(), 30);
        assert!(ticks.iter().all(|t| t.0 >= 1 && t.0 <= 70));
        ticks.sort();
        ticks.dedup();
        assert_eq!(ticks.len(), 30, "late offsets must be distinct");

        assert!(
            manifest
                .passengers()
                .iter()
                .filter(|p| !p.is_late)
                .all(|p| p.activation_tick == Tick::ZERO)
        );
    }

    #[test]
    fn all_late_each_draw_their_own_offset() {
        let m = map(10, 6);
        let manifest = schedule(&m, 1.0, LateMode::Immediate, 33, 0);
        let mut ticks: Vec<u64> = manifest.passengers().iter().map(|p| p.activation_tick.0).collect();
        ticks.sort_unstable();
        ticks.dedup();
        assert_eq!(ticks.len(), 60);
        assert!(ticks.iter().all(|&t| (1..=70).contains(&t)));
        let ranks: Vec<u32> = manifest.passengers().iter().map(|p| p.rank).collect();
        assert_eq!(ranks, (0..60).collect::<Vec<u32>>());
    }

    #[test]
    fn immediate_keeps_on_time_relative_order() {
        let m = map(10, 6);
        let manifest = schedule(&m, 0.3, LateMode::Immediate, 5, 0);
        let on_time_ids: Vec<u32> = manifest
            .passengers()
            .iter()
            .filter(|p| !p.is_late)
            .map(|p| p.id.0)
            .collect();
        assert!(on_time_ids.windows(2).all(|w| w[0] < w[1]));
        let ranks: Vec<u32> = manifest.passengers().iter().map(|p| p.rank).collect();
        assert_eq!(ranks, (0..60).collect::<Vec<u32>>());
    }

    #[test]
    fn after_everyone_holds_late_passengers_back() {
        let m = map(10, 6);
        let seen = Cell::new(0usize);
        let estimator = |on_time: &[PassengerSpec]| -> OrderResult<Tick> {
            seen.set(on_time.len());
            assert!(on_time.iter().all(|p| !p.is_late));
            Ok(Tick(123))
        };
        let mut rng = SimRng::new(8);
        let order = BoardingPolicy::WindowToAisle.generate(&m, &mut rng).unwrap();
        let manifest = LateArrivalScheduler::new(0.2, LateMode::AfterEveryone)
            .unwrap()
            .schedule(&order, &mut rng, &estimator)
            .unwrap();

        assert_eq!(seen.get(), 48);
        let (on_time, late): (Vec<&PassengerSpec>, Vec<&PassengerSpec>) =
            manifest.passengers().iter().partition(|p| !p.is_late);
        assert_eq!(late.len(), 12);
        assert!(on_time.iter().all(|p| p.rank < 48 && p.activation_tick == Tick::ZERO));
        assert!(late.iter().all(|p| p.rank >= 48 && p.activation_tick == Tick(123)));
        // On-time passengers keep the policy's order.
        assert!(on_time.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn schedule_preserves_seat_bijection() {
        let m = map(10, 6);
        for mode in [LateMode::Immediate, LateMode::AfterEveryone] {
            let manifest = schedule(&m, 0.4, mode, 13, 90);
            manifest.verify(&m).unwrap();
            let mut ids: Vec<PassengerId> = manifest.passengers().iter().map(|p| p.id).collect();
            ids.sort();
            assert_eq!(ids, (0..60).map(PassengerId).collect::<Vec<_>>());
        }
    }

    #[test]
    fn invalid_fraction_rejected() {
        for bad in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                LateArrivalScheduler::new(bad, LateMode::Immediate),
                Err(OrderError::InvalidLateFraction(_))
            ));
        }
    }

    #[test]
    fn bag_counts_respect_model() {
        let m = map(10, 6);
        let mut rng = SimRng::new(2);
        let order = BoardingPolicy::Random.generate(&m, &mut rng).unwrap();
        let manifest = LateArrivalScheduler::new(0.0, LateMode::Immediate)
            .unwrap()
            .with_bags(BagModel { max_bags: 3 })
            .schedule(&order, &mut rng, &no_estimate)
            .unwrap();
        assert!(manifest.passengers().iter().all(|p| p.bag_count <= 3));
        assert!(manifest.passengers().iter().any(|p| p.bag_count > 0));

        let mut rng = SimRng::new(2);
        let manifest = LateArrivalScheduler::new(0.0, LateMode::Immediate)
            .unwrap()
            .with_bags(BagModel::NONE)
            .schedule(&order, &mut rng, &no_estimate)
            .unwrap();
        assert!(manifest.passengers().iter().all(|p| p.bag_count == 0));
    }

    #[test]
    fn late_mode_parsing() {
        assert_eq!("immediate".parse::<LateMode>().unwrap(), LateMode::Immediate);
        assert_eq!("AFTER".parse::<LateMode>().unwrap(), LateMode::AfterEveryone);
        assert_eq!("no".parse::<LateMode>().unwrap(), LateMode::AfterEveryone);
        assert!("later".parse::<LateMode>().is_err());
    }
}

// ── Activation queue ──────────────────────────────────────────────────────────

#[cfg(test)]
mod activation {
    use super::*;

    fn boarder(rank: u32) -> Boarder {
        Boarder { rank, id: PassengerId(rank) }
    }

    #[test]
    fn same_tick_boarders_share_an_entry() {
        let mut q = ActivationQueue::new();
        q.push(Tick(0), boarder(0));
        q.push(Tick(0), boarder(1));
        q.push(Tick(4), boarder(2));
        assert_eq!(q.tick_count(), 2);
        assert_eq!(q.drain_through(Tick(0)), vec![boarder(0), boarder(1)]);
        assert_eq!(q.tick_count(), 1);
    }

    #[test]
    fn drain_through_takes_everything_due() {
        let mut q = ActivationQueue::new();
        q.push(Tick(2), boarder(5));
        q.push(Tick(0), boarder(3));
        q.push(Tick(7), boarder(1));
        let due = q.drain_through(Tick(2));
        assert_eq!(due, vec![boarder(3), boarder(5)]);
        assert_eq!(q.tick_count(), 1);
        assert!(q.drain_through(Tick(6)).is_empty());
        assert_eq!(q.drain_through(Tick(7)), vec![boarder(1)]);
        assert_eq!(q.tick_count(), 0);
    }

    #[test]
    fn built_from_manifest() {
        let m = map(1, 2);
        let specs = vec![
            PassengerSpec::on_time(0, Seat::new(1, SeatLetter(0)), 0),
            PassengerSpec {
                activation_tick: Tick(3),
                is_late: true,
                ..PassengerSpec::on_time(1, Seat::new(1, SeatLetter(1)), 0)
            },
        ];
        Manifest::new(specs.clone()).verify(&m).unwrap();
        let mut q = ActivationQueue::build_from_manifest(&specs);
        assert_eq!(q.tick_count(), 2);
        assert_eq!(q.drain_through(Tick(2)), vec![Boarder::from(&specs[0])]);
        assert_eq!(q.drain_through(Tick(3)), vec![Boarder::from(&specs[1])]);
    }

    #[test]
    fn boarders_order_by_rank() {
        let a = Boarder { rank: 1, id: PassengerId(9) };
        let b = Boarder { rank: 2, id: PassengerId(0) };
        assert!(a < b);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn generated_orders_are_bijections(
            rows in 1u16..40,
            half in 1u8..6,
            policy in 0u8..6,
            seed in any::<u64>(),
        ) {
            let m = map(rows, half * 2);
            let policy = BoardingPolicy::try_from(policy).unwrap();
            let order = policy.generate(&m, &mut SimRng::new(seed)).unwrap();
            let mut seen = vec![false; m.seat_count()];
            for &seat in order.seats() {
                let idx = m.seat_index(seat).unwrap();
                prop_assert!(!seen[idx], "seat {} repeated", seat);
                seen[idx] = true;
            }
            prop_assert!(seen.iter().all(|&s| s));
        }

        #[test]
        fn late_count_is_floor(
            rows in 1u16..20,
            pct in 0usize..=100,
            seed in any::<u64>(),
        ) {
            let m = map(rows, 6);
            let fraction = pct as f64 / 100.0;
            let mut rng = SimRng::new(seed);
            let order = BoardingPolicy::Random.generate(&m, &mut rng).unwrap();
            let manifest = LateArrivalScheduler::new(fraction, LateMode::Immediate)
                .unwrap()
                .schedule(&order, &mut rng, &no_estimate)
                .unwrap();
            let expected = pct * m.seat_count() / 100;
            prop_assert_eq!(manifest.late_count(), expected);
            prop_assert!(manifest.verify(&m).is_ok());
        }
    }
}

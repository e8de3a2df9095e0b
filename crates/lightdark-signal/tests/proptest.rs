//! Property-based tests for signals and the debouncing scheduler.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lightdark_signal::{Scheduler, Signal};
use proptest::prelude::*;

proptest! {
    /// However many writes land in one turn, a debounced reaction runs once
    /// and observes the last written value.
    #[test]
    fn debounced_reaction_sees_only_final_value(
        writes in prop::collection::vec(0u8..4, 1..50),
    ) {
        let scheduler = Scheduler::new();
        let signal = Signal::new(u8::MAX);
        let observed = Rc::new(RefCell::new(Vec::new()));

        let reader = signal.clone();
        let log = observed.clone();
        let reaction = scheduler.debounce(move || log.borrow_mut().push(reader.get()));

        let trigger = reaction.clone();
        let _sub = signal.subscribe(move |_| {
            trigger.trigger();
        });

        for w in &writes {
            signal.set(*w);
        }
        scheduler.run_until_idle();

        let last = *writes.last().unwrap();
        let observed = observed.borrow();
        prop_assert_eq!(observed.as_slice(), &[last][..]);
        prop_assert_eq!(reaction.runs(), 1);
    }

    /// Subscribers are notified once per actual change, never for repeats.
    #[test]
    fn notifications_match_value_changes(
        writes in prop::collection::vec(any::<bool>(), 0..50),
    ) {
        let signal = Signal::new(false);
        let hits = Rc::new(Cell::new(0usize));
        let h = hits.clone();
        let _sub = signal.subscribe(move |_| h.set(h.get() + 1));

        let mut expected = 0;
        let mut current = false;
        for w in writes {
            if w != current {
                expected += 1;
                current = w;
            }
            signal.set(w);
        }

        prop_assert_eq!(hits.get(), expected);
    }

    /// Separate turns each get their own run.
    #[test]
    fn one_run_per_turn(turns in 1usize..20, burst in 1usize..10) {
        let scheduler = Scheduler::new();
        let reaction = scheduler.debounce(|| {});
        for _ in 0..turns {
            for _ in 0..burst {
                reaction.trigger();
            }
            scheduler.run_until_idle();
        }
        prop_assert_eq!(reaction.runs(), turns as u64);
    }
}

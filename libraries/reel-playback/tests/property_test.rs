//! Property-based tests for the playback controller
//!
//! Uses proptest to check invariants across random playlists and random
//! operation sequences.


use proptest::prelude::*;
use reel_core::ItemId;
use reel_playback::{format_time, MediaEvent, SurfaceKind};
use test_helpers::Rig;

#[derive(Debug, Clone)]
enum Op {
    Select(usize),
    Toggle,
    Next,
    Previous,
    Seek(f64),
    Stop,
    Minimize,
    Maximize,
    Hide,
    Ended,
    TimeUpdate,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8).prop_map(Op::Select),
        Just(Op::Toggle),
        Just(Op::Next),
        Just(Op::Previous),
        (-1.0f64..2.0).prop_map(Op::Seek),
        Just(Op::Stop),
        Just(Op::Minimize),
        Just(Op::Maximize),
        Just(Op::Hide),
        Just(Op::Ended),
        Just(Op::TimeUpdate),
    ]
}

fn apply(rig: &mut Rig, op: &Op, len: usize) {
    match *op {
        Op::Select(slot) => {
            if len > 0 {
                rig.play((slot % len) as i64 + 1);
            }
        }
        Op::Toggle => rig.controller.toggle_play_pause(),
        Op::Next => {
            rig.controller.next().ok();
        }
        Op::Previous => {
            rig.controller.previous().ok();
        }
        Op::Seek(fraction) => {
            rig.controller.seek(fraction);
        }
        Op::Stop => rig.controller.stop(),
        Op::Minimize => rig.controller.minimize(),
        Op::Maximize => rig.controller.maximize(),
        Op::Hide => rig.controller.hide(),
        Op::Ended => {
            let active = rig.controller.active_surface();
            rig.controller.handle_media_event(active, MediaEvent::Ended);
        }
        Op::TimeUpdate => {
            let active = rig.controller.active_surface();
            rig.controller.handle_media_event(active, MediaEvent::TimeUpdate);
        }
    }
}

fn ids(len: usize) -> Vec<i64> {
    (1..=len as i64).collect()
}

proptest! {
    /// Property: len calls to next from any start return to that start
    #[test]
    fn next_is_cyclic(len in 1usize..12, start in 0usize..12) {
        let start = start % len;
        let mut rig = Rig::with_items(&ids(len));
        rig.play(start as i64 + 1);

        for _ in 0..len {
            rig.controller.next().unwrap();
        }

        prop_assert_eq!(rig.controller.current_index(), Some(start));
        prop_assert_eq!(rig.controller.current_id(), Some(ItemId::new(start as i64 + 1)));
    }

    /// Property: previous undoes next
    #[test]
    fn previous_inverts_next(len in 2usize..12, start in 0usize..12) {
        let start = start % len;
        let mut rig = Rig::with_items(&ids(len));
        rig.play(start as i64 + 1);

        rig.controller.next().unwrap();
        rig.controller.previous().unwrap();

        prop_assert_eq!(rig.controller.current_index(), Some(start));
    }

    /// Property: seek always lands inside [0, duration]
    #[test]
    fn seek_lands_within_duration(fraction in -10.0f64..10.0, duration in 0.5f64..10_000.0) {
        let mut rig = Rig::with_items(&[1]);
        rig.play(1);
        rig.main.metadata_loaded(duration);

        prop_assert!(rig.controller.seek(fraction));

        let position = rig.main.state().position;
        prop_assert!((0.0..=duration).contains(&position));
        prop_assert!((0.0..=1.0).contains(&rig.controller.progress_fraction()));
    }

    /// Property: at most one surface is unmuted, the inactive one never plays,
    /// and the index always matches the current id
    #[test]
    fn surface_invariants_hold(len in 0usize..6, ops in prop::collection::vec(arbitrary_op(), 1..40)) {
        let mut rig = Rig::with_items(&ids(len));

        for op in &ops {
            apply(&mut rig, op, len);
            rig.main.metadata_loaded(120.0);
            rig.mini.metadata_loaded(120.0);

            let main = rig.main.state();
            let mini = rig.mini.state();
            let (active, inactive) = match rig.controller.active_surface() {
                SurfaceKind::Main => (&main, &mini),
                SurfaceKind::Mini => (&mini, &main),
            };

            prop_assert!(!active.muted, "active surface muted after {:?}", op);
            prop_assert!(inactive.muted, "inactive surface unmuted after {:?}", op);
            prop_assert!(inactive.paused, "inactive surface playing after {:?}", op);
            prop_assert!(!(main.visible && mini.visible));
            prop_assert_eq!(main.source.clone(), mini.source.clone());

            if let Some(id) = rig.controller.current_id() {
                let index = rig.controller.current_index();
                let position = rig.controller.playlist().index_of(id);
                prop_assert_eq!(index, position.or(if len > 0 { Some(0) } else { None }));
            }
        }
    }

    /// Property: formatted time is always mm:ss with seconds below 60
    #[test]
    fn format_time_shape(seconds in 0.0f64..1_000_000.0) {
        let text = format_time(seconds);
        let (minutes, secs) = text.split_once(':').unwrap();

        prop_assert!(minutes.len() >= 2);
        prop_assert_eq!(secs.len(), 2);
        prop_assert!(secs.parse::<u64>().unwrap() < 60);
        prop_assert_eq!(
            minutes.parse::<u64>().unwrap() * 60 + secs.parse::<u64>().unwrap(),
            seconds.floor() as u64
        );
    }
}

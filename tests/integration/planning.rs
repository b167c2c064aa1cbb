use stitchplan::config::ConfigKey;
use stitchplan::core::persist::save_data;
use stitchplan::core::types::Stage;
use stitchplan::errors::Error;
use stitchplan::scheduler::Planner;
use stitchplan::scheduler::availability::{SlotQuery, is_available};
use stitchplan::scheduler::lanes::layout_lanes;

use crate::common::{build_context, day, range, shop_dir};

#[test]
fn chain_cascade_round_trips_through_the_data_file() {
    let dir = shop_dir("planning");
    let mut ctx = build_context(&dir);
    let rina = ctx.user_by_name("rina").unwrap().clone();

    let mut planner = Planner::new(&mut ctx);
    let planned = planner.plan_move(&rina, 1, day(9)).unwrap();
    assert_eq!(planned.ids(), vec![1, 2, 3]);
    assert_eq!(planner.commit(&rina, &planned).unwrap(), 3);
    save_data(&ctx, &ctx.data_path).unwrap();

    let reloaded = build_context(&dir);
    assert_eq!(reloaded.schedule(1).unwrap().range, range(9, 11));
    // Sewing at 10 now starts inside cutting's new range and is pushed to the 12th.
    assert_eq!(reloaded.schedule(2).unwrap().range, range(12, 15));
    assert_eq!(reloaded.schedule(3).unwrap().range, range(16, 17));
}

#[test]
fn supplier_cascade_stops_at_the_first_gap() {
    let dir = shop_dir("planning");
    let mut ctx = build_context(&dir);
    ctx.config.set_key(ConfigKey::CascadeMode, "supplier").unwrap();
    let rina = ctx.user_by_name("rina").unwrap().clone();

    let planned = Planner::new(&mut ctx).plan_move(&rina, 2, day(11)).unwrap();
    assert_eq!(planned.ids(), vec![2, 4]);
    assert_eq!(planned.get(2).unwrap().new, range(11, 14));
    assert_eq!(planned.get(4).unwrap().new, range(15, 16));
}

#[test]
fn sequential_apply_reports_partial_progress() {
    let dir = shop_dir("planning");
    let mut ctx = build_context(&dir);
    ctx.config.set_key(ConfigKey::ApplyMode, "sequential").unwrap();
    let rina = ctx.user_by_name("rina").unwrap().clone();

    let planned = Planner::new(&mut ctx).plan_move(&rina, 1, day(7)).unwrap();
    ctx.schedules.delete(3).unwrap();

    match Planner::new(&mut ctx).commit(&rina, &planned) {
        Err(Error::PartialApply { applied, total, reason }) => {
            assert_eq!((applied, total), (2, 3));
            assert_eq!(reason, "Not found: schedule 3");
        }
        other => panic!("expected partial apply, got {other:?}"),
    }
    assert_eq!(ctx.schedule(2).unwrap().range, range(11, 14));
}

#[test]
fn availability_and_lanes_over_loaded_data() {
    let dir = shop_dir("planning");
    let ctx = build_context(&dir);
    let snapshot = ctx.snapshot();

    assert!(!is_available(&snapshot, &SlotQuery::new(2, Stage::Sewing, range(13, 14))));
    assert!(is_available(&snapshot, &SlotQuery::new(2, Stage::Sewing, range(16, 20))));

    let sewing: Vec<_> = snapshot.into_iter().filter(|s| s.supplier_id == 2).collect();
    assert_eq!(layout_lanes(&sewing).max_lanes(), 1);
}

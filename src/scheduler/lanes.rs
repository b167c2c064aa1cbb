use crate::core::models::Schedule;
use chrono::NaiveDate;

/// A schedule paired with the display lane it was stacked into.
#[derive(Debug, Clone, Copy)]
pub struct LanedBar<'a> {
    pub schedule: &'a Schedule,
    pub lane: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LaneLayout<'a> {
    bars: Vec<LanedBar<'a>>,
}

impl<'a> LaneLayout<'a> {
    /// Bars in ascending start order.
    pub fn bars(&self) -> &[LanedBar<'a>] {
        &self.bars
    }

    /// Rows needed to draw the supplier; never less than one.
    pub fn max_lanes(&self) -> usize {
        self.bars.iter().map(|b| b.lane + 1).max().unwrap_or(1)
    }
}

/// Greedy first-fit interval colouring of one supplier's bars.
///
/// A lane is reusable once its last bar ended strictly before the next start,
/// so bars sharing a day never share a lane. Stored dates are not touched.
pub fn layout_lanes(schedules: &[Schedule]) -> LaneLayout<'_> {
    let mut sorted: Vec<&Schedule> = schedules.iter().collect();
    sorted.sort_by_key(|s| s.start());

    let mut lane_ends: Vec<NaiveDate> = Vec::new();
    let bars = sorted
        .into_iter()
        .map(|schedule| {
            let lane = match lane_ends.iter().position(|end| *end < schedule.start()) {
                Some(i) => {
                    lane_ends[i] = schedule.end();
                    i
                }
                None => {
                    lane_ends.push(schedule.end());
                    lane_ends.len() - 1
                }
            };
            LanedBar { schedule, lane }
        })
        .collect();

    LaneLayout { bars }
}

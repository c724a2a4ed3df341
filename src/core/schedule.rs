//! Splitting an entity's shows into upcoming and past

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::models::ScheduledShow;
use crate::utils::dates::parse_datetime;

/// Shows on either side of a reference instant
#[derive(Debug, Default)]
pub struct Partition {
    pub upcoming: Vec<ScheduledShow>,
    pub past: Vec<ScheduledShow>,
}

impl Partition {
    /// Split `shows` around `now`. Both comparisons are strict, so a show
    /// starting exactly at `now` lands in neither list.
    pub fn split(shows: Vec<ScheduledShow>, now: NaiveDateTime) -> Self {
        let mut partition = Self::default();

        for show in shows {
            let Ok(start) = parse_datetime(&show.start_time) else {
                tracing::warn!(
                    "Show {} has an unreadable start time {:?}",
                    show.show_id,
                    show.start_time
                );
                continue;
            };

            if start > now {
                partition.upcoming.push(show);
            } else if start < now {
                partition.past.push(show);
            }
        }

        partition
    }
}

/// Number of distinct counterparts among `shows`
pub fn distinct_counterparts(shows: &[ScheduledShow]) -> usize {
    shows
        .iter()
        .map(|s| s.counterpart_id)
        .collect::<HashSet<_>>()
        .len()
}

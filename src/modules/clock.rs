// Clock-style displays: the space page's mission timer and the status-bar
// clock, refreshed once per TICK.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::modules::scheduler::ScheduledTask;

pub const TICK: Duration = Duration::from_secs(1);

/// Elapsed time as `HH:MM:SS`. Hours keep counting past 99.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

pub fn format_status_clock(now: DateTime<Local>) -> String {
    now.format("%H:%M").to_string()
}

#[derive(Debug, Clone, Copy)]
pub struct MissionClock {
    started: Instant,
}

impl MissionClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn started_at(started: Instant) -> Self {
        Self { started }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn display(&self) -> String {
        format_elapsed(self.elapsed())
    }

    pub fn reading(&self, now: DateTime<Local>) -> ClockReading {
        ClockReading {
            mission: self.display(),
            status: format_status_clock(now),
        }
    }
}

/// One tick's worth of clock text.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClockReading {
    pub mission: String,
    pub status: String,
}

/// Reports a reading every TICK until the returned task is dropped.
/// Must be called from within a tokio runtime.
pub fn start_ticker<F>(clock: MissionClock, mut on_tick: F) -> ScheduledTask
where
    F: FnMut(ClockReading) + Send + 'static,
{
    ScheduledTask::every("clock-tick", TICK, move || on_tick(clock.reading(Local::now())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    #[rstest]
    #[case(0, "00:00:00")]
    #[case(59, "00:00:59")]
    #[case(61, "00:01:01")]
    #[case(3_600, "01:00:00")]
    #[case(3_661, "01:01:01")]
    #[case(86_399, "23:59:59")]
    #[case(360_000, "100:00:00")]
    fn test_format_elapsed(#[case] secs: u64, #[case] expected: &str) {
        assert_eq!(format_elapsed(Duration::from_secs(secs)), expected);
    }

    #[test]
    fn sub_second_remainder_is_dropped() {
        assert_eq!(format_elapsed(Duration::from_millis(1_999)), "00:00:01");
    }

    #[test]
    fn status_clock_is_hours_and_minutes() {
        let now = Local.with_ymd_and_hms(2024, 1, 2, 9, 5, 30).unwrap();
        assert_eq!(format_status_clock(now), "09:05");
    }

    #[test]
    fn reading_pairs_mission_and_status() {
        let clock = MissionClock::start();
        let now = Local.with_ymd_and_hms(2024, 1, 2, 21, 45, 0).unwrap();
        let reading = clock.reading(now);
        assert_eq!(reading.status, "21:45");
        assert!(reading.mission.starts_with("00:00:0"));
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_reports_every_second_until_dropped() {
        let seen: Arc<Mutex<Vec<ClockReading>>> = Arc::default();
        let sink = seen.clone();
        let ticker = start_ticker(MissionClock::start(), move |reading| {
            sink.lock().unwrap().push(reading)
        });

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert_eq!(seen.lock().unwrap().len(), 3);

        drop(ticker);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn mission_clock_counts_from_start() {
        let Some(started) = Instant::now().checked_sub(Duration::from_secs(3_725)) else {
            return;
        };
        let clock = MissionClock::started_at(started);
        assert!(clock.display().starts_with("01:02:0"));
    }
}

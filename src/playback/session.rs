use crate::api::{MediaKind, Track, TrackId};
use std::fmt;

/// A minute/second pair as shown next to the seek bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTime {
    pub minutes: u64,
    pub seconds: u64,
}

impl ClockTime {
    pub fn from_seconds(seconds: f64) -> Self {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Self::default();
        }
        let total = seconds.floor() as u64;
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeReadout {
    pub current: ClockTime,
    pub total: ClockTime,
    /// Seek-bar fill, 0 to 100.
    pub progress: f64,
}

impl TimeReadout {
    /// `None` while the duration is unknown or zero.
    pub fn measure(position: f64, duration: Option<f64>) -> Option<Self> {
        let duration = duration.filter(|d| d.is_finite() && *d > 0.0)?;
        let position = if position.is_finite() {
            position.clamp(0.0, duration)
        } else {
            0.0
        };
        Some(Self {
            current: ClockTime::from_seconds(position),
            total: ClockTime::from_seconds(duration),
            progress: position / duration * 100.0,
        })
    }
}

/// The track whose source is actually loaded into a media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedSource {
    pub kind: MediaKind,
    pub id: TrackId,
}

/// Snapshot of everything the player bar renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackSession {
    /// Selected track; may run ahead of `last_played` during a transition.
    pub current_track: Option<Track>,
    pub kind: MediaKind,
    pub is_playing: bool,
    pub time: TimeReadout,
    pub loop_active: bool,
    pub shuffle_active: bool,
    pub is_last_track: bool,
    pub is_changing_track: bool,
    pub last_played: Option<AttachedSource>,
    pub video_visible: bool,
}

impl PlaybackSession {
    pub fn last_played_id(&self) -> Option<TrackId> {
        self.last_played.map(|source| source.id)
    }

    pub fn is_current(&self, id: TrackId, kind: MediaKind) -> bool {
        self.current_track
            .as_ref()
            .is_some_and(|track| track.id == id && track.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_is_zero_padded() {
        assert_eq!(ClockTime::from_seconds(125.0).to_string(), "02:05");
        assert_eq!(ClockTime::from_seconds(9.7).to_string(), "00:09");
        assert_eq!(ClockTime::from_seconds(f64::NAN).to_string(), "00:00");
        assert_eq!(ClockTime::from_seconds(3600.0).to_string(), "60:00");
    }

    #[test]
    fn readout_needs_a_duration() {
        assert_eq!(TimeReadout::measure(3.0, None), None);
        assert_eq!(TimeReadout::measure(3.0, Some(0.0)), None);
        assert_eq!(TimeReadout::measure(3.0, Some(f64::INFINITY)), None);

        let readout = TimeReadout::measure(50.0, Some(200.0)).unwrap();
        assert_eq!(readout.progress, 25.0);
        assert_eq!(readout.total.to_string(), "03:20");
    }
}

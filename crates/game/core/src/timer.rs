//! Round tokens and deferred timer requests.
//!
//! Engines never own a clock. Any transition that has to happen later
//! (hiding a revealed sequence element, flipping back a mismatched pair) is
//! returned to the host as a [`Deferred`] stamped with the engine's current
//! [`RoundToken`]. The host sleeps for `delay` and hands the value back to
//! the engine, which applies it only if the token still matches.
//!
//! Engines bump the token every time they schedule a timer or abandon the
//! current timeline (restart, game over), so at most one deferred value is
//! live at any moment and everything older is reported as [`Fired::Stale`].
use core::fmt;
use core::time::Duration;

/// Monotonic identifier of the engine's current timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundToken(pub u64);

impl RoundToken {
    pub const INITIAL: Self = Self(0);

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RoundToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// One-shot timer request returned by an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deferred<T> {
    pub token: RoundToken,
    pub delay: Duration,
    pub timer: T,
}

impl<T> Deferred<T> {
    pub const fn new(token: RoundToken, delay: Duration, timer: T) -> Self {
        Self {
            token,
            delay,
            timer,
        }
    }
}

/// Timer a host must schedule after an engine call, if any.
pub type Schedule<T> = Option<Deferred<T>>;

/// Result of handing an elapsed timer back to an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fired<T> {
    /// The timer belonged to the live timeline and was applied.
    Applied(Schedule<T>),
    /// The timer was issued for an abandoned timeline; nothing changed.
    Stale,
}

impl<T> Fired<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }

    /// The follow-up timer to schedule, if the fire was applied and chained one.
    pub fn into_schedule(self) -> Schedule<T> {
        match self {
            Self::Applied(next) => next,
            Self::Stale => None,
        }
    }
}

/// Owns the token and stamps new timers with it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Timeline {
    token: RoundToken,
}

impl Timeline {
    pub(crate) fn token(&self) -> RoundToken {
        self.token
    }

    /// Abandons every outstanding timer.
    pub(crate) fn invalidate(&mut self) {
        self.token = self.token.next();
    }

    /// Abandons every outstanding timer and issues a new one.
    pub(crate) fn schedule<T>(&mut self, delay: Duration, timer: T) -> Schedule<T> {
        self.invalidate();
        Some(Deferred::new(self.token, delay, timer))
    }

    pub(crate) fn is_live<T>(&self, deferred: &Deferred<T>) -> bool {
        deferred.token == self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduling_supersedes_older_timers() {
        let mut timeline = Timeline::default();
        let first = timeline.schedule(Duration::from_millis(10), ()).unwrap();
        assert!(timeline.is_live(&first));

        let second = timeline.schedule(Duration::from_millis(10), ()).unwrap();
        assert!(!timeline.is_live(&first));
        assert!(timeline.is_live(&second));

        timeline.invalidate();
        assert!(!timeline.is_live(&second));
    }

    #[test]
    fn stale_fire_has_no_follow_up() {
        let fired: Fired<()> = Fired::Stale;
        assert!(fired.is_stale());
        assert_eq!(fired.into_schedule(), None);
    }
}

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::animation::ReversingScroll;
use crate::models::ShowcaseViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingState {
    Loading,
    Ready,
}

/// State of one showcase mount: starts Loading with an empty view-model and
/// becomes Ready once, whatever the fetch outcome was.
#[derive(Debug)]
pub struct ShowcaseSession {
    state: LoadingState,
    view: ShowcaseViewModel,
    ready_at: Option<Instant>,
    scroll: ReversingScroll,
}

impl Default for ShowcaseSession {
    fn default() -> Self {
        Self::new(ReversingScroll::default())
    }
}

impl ShowcaseSession {
    pub fn new(scroll: ReversingScroll) -> Self {
        Self {
            state: LoadingState::Loading,
            view: ShowcaseViewModel::default(),
            ready_at: None,
            scroll,
        }
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadingState::Ready
    }

    pub fn view(&self) -> &ShowcaseViewModel {
        &self.view
    }

    /// Applies the fetch result. Only the first call has an effect; the
    /// return value says whether this call performed the transition.
    pub fn settle(&mut self, view: ShowcaseViewModel) -> bool {
        self.settle_at(view, Instant::now())
    }

    pub fn settle_at(&mut self, view: ShowcaseViewModel, now: Instant) -> bool {
        if self.is_ready() {
            warn!("showcase already settled, ignoring late catalog result");
            return false;
        }
        info!(
            hero = view.hero.is_some(),
            empty = view.is_empty(),
            "showcase ready"
        );
        self.view = view;
        self.state = LoadingState::Ready;
        self.ready_at = Some(now);
        true
    }

    /// Time the auto-scroll has been running; zero while Loading.
    pub fn animation_elapsed(&self, now: Instant) -> Duration {
        self.ready_at
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or_default()
    }

    /// Current content offset. Stays at 0 until Ready.
    pub fn scroll_offset(&self, now: Instant) -> f32 {
        if !self.is_ready() {
            return 0.0;
        }
        self.scroll.offset_at(self.animation_elapsed(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaSummary;

    #[test]
    fn starts_loading_with_empty_view() {
        let s = ShowcaseSession::default();
        assert_eq!(s.state(), LoadingState::Loading);
        assert!(s.view().is_empty());
        assert_eq!(s.scroll_offset(Instant::now()), 0.0);
    }

    #[test]
    fn settles_exactly_once() {
        let mut s = ShowcaseSession::default();
        let first = ShowcaseViewModel {
            hero: Some(MediaSummary { id: 1, ..Default::default() }),
            ..Default::default()
        };
        assert!(s.settle(first.clone()));
        assert_eq!(s.state(), LoadingState::Ready);

        let late = ShowcaseViewModel {
            trending: vec![MediaSummary { id: 2, ..Default::default() }],
            ..Default::default()
        };
        assert!(!s.settle(late));
        assert_eq!(s.state(), LoadingState::Ready);
        assert_eq!(s.view(), &first);
    }

    #[test]
    fn failed_fetch_still_reaches_ready() {
        let mut s = ShowcaseSession::default();
        assert!(s.settle(ShowcaseViewModel::default()));
        assert!(s.is_ready());
        assert!(s.view().is_empty());
    }

    #[test]
    fn animation_clock_starts_at_ready() {
        let mut s = ShowcaseSession::default();
        let t0 = Instant::now();
        s.settle_at(ShowcaseViewModel::default(), t0);
        assert_eq!(s.animation_elapsed(t0), Duration::ZERO);
        assert_eq!(s.scroll_offset(t0), 0.0);
        let later = t0 + Duration::from_secs(25);
        assert!((s.scroll_offset(later) + 800.0).abs() < 0.5);
    }
}

use std::time::Duration;

pub const SCROLL_DISTANCE: f32 = 800.0;
pub const SCROLL_LEG: Duration = Duration::from_secs(25);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// CSS `ease-in-out`, cubic-bezier(0.42, 0, 0.58, 1).
    InOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }
}

/// Evaluates a unit cubic bezier timing curve at progress `x`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    let bez = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    // Newton first, bisection if the slope flattens out.
    let mut s = x;
    for _ in 0..8 {
        let err = bez(x1, x2, s) - x;
        if err.abs() < 1e-6 {
            return bez(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = x;
    for _ in 0..32 {
        let v = bez(x1, x2, s);
        if (v - x).abs() < 1e-6 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    bez(y1, y2, s)
}

/// Vertical auto-scroll that goes 0 → -distance → 0 forever, one leg per
/// `leg` duration. Purely a function of elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReversingScroll {
    pub distance: f32,
    pub leg: Duration,
    pub ease: Ease,
}

impl Default for ReversingScroll {
    fn default() -> Self {
        Self { distance: SCROLL_DISTANCE, leg: SCROLL_LEG, ease: Ease::InOut }
    }
}

impl ReversingScroll {
    /// Offset in points (0 or negative) after `elapsed` since the start.
    pub fn offset_at(&self, elapsed: Duration) -> f32 {
        let leg = self.leg.as_secs_f64();
        if leg <= 0.0 {
            return 0.0;
        }
        let cycles = elapsed.as_secs_f64() / leg;
        let completed = cycles.floor();
        let mut t = (cycles - completed) as f32;
        if completed as u64 % 2 == 1 {
            t = 1.0 - t;
        }
        -self.distance * self.ease.apply(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.5
    }

    #[test]
    fn ease_endpoints_are_stable() {
        for ease in [Ease::Linear, Ease::InOut] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_and_monotonic() {
        let e = Ease::InOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-3);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-3);
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = e.apply(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
        // slow start
        assert!(e.apply(0.1) < 0.1);
    }

    #[test]
    fn scroll_goes_down_and_back() {
        let s = ReversingScroll::default();
        assert_eq!(s.offset_at(Duration::ZERO), 0.0);
        assert!(close(s.offset_at(Duration::from_millis(12_500)), -400.0));
        assert!(close(s.offset_at(Duration::from_millis(24_999)), -800.0));
        assert!(close(s.offset_at(Duration::from_secs(25)), -800.0));
        assert!(close(s.offset_at(Duration::from_millis(37_500)), -400.0));
        assert!(close(s.offset_at(Duration::from_secs(50)), 0.0));
        assert!(close(s.offset_at(Duration::from_secs(75)), -800.0));
    }

    #[test]
    fn scroll_stays_in_range() {
        let s = ReversingScroll::default();
        for ms in (0..200_000).step_by(317) {
            let y = s.offset_at(Duration::from_millis(ms));
            assert!((-800.0..=0.0).contains(&y), "{ms}ms -> {y}");
        }
    }

    #[test]
    fn zero_length_leg_does_not_move() {
        let s = ReversingScroll { leg: Duration::ZERO, ..Default::default() };
        assert_eq!(s.offset_at(Duration::from_secs(3)), 0.0);
    }
}

//! One-way reveal of page sections as they scroll into view.

/// Minimum visible fraction of a target that reveals it.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// The bottom of the viewport that does not count as visible.
pub const BOTTOM_MARGIN_PX: u32 = 50;

/// Class marker that opts a section into revealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMarker {
    ScrollReveal,
    FadeInUp,
}

impl RevealMarker {
    /// Length of the fade after a reveal.
    pub fn transition_ms(self) -> u64 {
        match self {
            RevealMarker::ScrollReveal => 600,
            RevealMarker::FadeInUp => 1000,
        }
    }
}

/// Vertical extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VSpan {
    pub top: u32,
    pub height: u32,
}

impl VSpan {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Fraction of `target` that lies inside `root`.
pub fn intersection_ratio(target: VSpan, root: VSpan) -> f64 {
    if target.height == 0 {
        let inside = target.top >= root.top && target.top <= root.bottom();
        return if inside { 1.0 } else { 0.0 };
    }
    let top = target.top.max(root.top);
    let bottom = target.bottom().min(root.bottom());
    if bottom <= top {
        0.0
    } else {
        f64::from(bottom - top) / f64::from(target.height)
    }
}

/// Handle to an observed target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetId(usize);

#[derive(Debug, Clone)]
struct Target {
    marker: RevealMarker,
    revealed_at_ms: Option<u64>,
}

/// Tracks which observed targets have been revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealObserver {
    targets: Vec<Target>,
}

impl RevealObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing a target.
    pub fn observe(&mut self, marker: RevealMarker) -> TargetId {
        self.targets.push(Target {
            marker,
            revealed_at_ms: None,
        });
        TargetId(self.targets.len() - 1)
    }

    /// Check `target` against a viewport of `viewport_height` pixels scrolled
    /// to `scroll_y`. Returns true when this call revealed it.
    pub fn check(
        &mut self,
        id: TargetId,
        target: VSpan,
        scroll_y: u32,
        viewport_height: u32,
        now_ms: u64,
    ) -> bool {
        let Some(state) = self.targets.get_mut(id.0) else {
            return false;
        };
        if state.revealed_at_ms.is_some() {
            return false;
        }
        let root = VSpan::new(scroll_y, viewport_height.saturating_sub(BOTTOM_MARGIN_PX));
        if intersection_ratio(target, root) >= REVEAL_THRESHOLD {
            state.revealed_at_ms = Some(now_ms);
            true
        } else {
            false
        }
    }

    pub fn is_revealed(&self, id: TargetId) -> bool {
        self.targets
            .get(id.0)
            .is_some_and(|t| t.revealed_at_ms.is_some())
    }

    /// Progress of the reveal transition, from 0.0 (hidden) to 1.0.
    pub fn progress(&self, id: TargetId, now_ms: u64) -> f32 {
        let Some(target) = self.targets.get(id.0) else {
            return 1.0;
        };
        match target.revealed_at_ms {
            None => 0.0,
            Some(at) => {
                let elapsed = now_ms.saturating_sub(at) as f32;
                (elapsed / target.marker.transition_ms() as f32).min(1.0)
            }
        }
    }
}

//! Scroll tracking for the reading view: progress bar fill and header hide-on-scroll.

use serde::Serialize;

/// The progress bar appears once the reader scrolled past this offset.
const PROGRESS_VISIBLE_AFTER: f64 = 50.0;

/// Offsets below this count as the top of the page.
const AT_TOP_BELOW: f64 = 10.0;

const DEFAULT_DIRECTION_THRESHOLD: f64 = 10.0;

/// Reading progress through the story.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ScrollProgress {
    /// 0..=100
    pub percent: f64,
    pub visible: bool,
}

impl ScrollProgress {
    pub fn compute(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> Self {
        let scrollable = scroll_height - viewport_height;
        let percent = if scrollable > 0.0 {
            (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            percent,
            visible: scroll_top > PROGRESS_VISIBLE_AFTER,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Tracks scroll direction, ignoring movements smaller than a threshold.
#[derive(Debug, Clone)]
pub struct ScrollDirectionTracker {
    threshold: f64,
    last_y: f64,
    direction: Option<ScrollDirection>,
    at_top: bool,
}

impl Default for ScrollDirectionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTION_THRESHOLD)
    }
}

impl ScrollDirectionTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            last_y: 0.0,
            direction: None,
            at_top: true,
        }
    }

    /// Feeds a new scroll offset and returns the current direction.
    pub fn update(&mut self, scroll_y: f64) -> Option<ScrollDirection> {
        self.at_top = scroll_y < AT_TOP_BELOW;

        if (scroll_y - self.last_y).abs() < self.threshold {
            return self.direction;
        }

        self.direction = Some(if scroll_y > self.last_y {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        });
        self.last_y = scroll_y.max(0.0);
        self.direction
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    pub fn is_at_top(&self) -> bool {
        self.at_top
    }

    /// The header hides while scrolling down away from the top.
    pub fn should_hide_header(&self) -> bool {
        !self.at_top && self.direction == Some(ScrollDirection::Down)
    }
}

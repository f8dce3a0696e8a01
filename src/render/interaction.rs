//! Hover state machine for a single country feature.
//!
//! ```text
//!            pointer enter
//!   Normal ----------------> Highlighted
//!      ^                          |
//!      +--------------------------+
//!            pointer leave
//! ```
//!
//! Entering restyles the border and raises the layer above its neighbours.
//! Leaving restores the style computed for the feature at render time.
//! Any other event is ignored.
//!
//! The server never sees pointer events. It renders both styles of the pair
//! via [`FeatureInteraction::style_for`], and the page's `mouseover` and
//! `mouseout` handlers in [`crate::http::page`] replay [`FeatureInteraction::handle`]
//! in the browser. Changes to the transitions here must be made there too.

use super::style::FeatureStyle;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureState {
    Normal,
    Highlighted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
}

/// What the map layer must do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Apply the style and move the layer to the top of the stack.
    RestyleAndRaise(FeatureStyle),
    /// Apply the style in place.
    Restyle(FeatureStyle),
}

#[derive(Debug, Clone)]
pub struct FeatureInteraction {
    base: FeatureStyle,
    highlight: FeatureStyle,
    state: FeatureState,
}

impl FeatureInteraction {
    pub fn new(base: FeatureStyle) -> Self {
        let highlight = base.highlighted();
        Self {
            base,
            highlight,
            state: FeatureState::Normal,
        }
    }

    pub fn state(&self) -> FeatureState {
        self.state
    }

    /// Style the layer shows in `state`.
    pub fn style_for(&self, state: FeatureState) -> &FeatureStyle {
        match state {
            FeatureState::Normal => &self.base,
            FeatureState::Highlighted => &self.highlight,
        }
    }

    pub fn current_style(&self) -> &FeatureStyle {
        self.style_for(self.state)
    }

    /// Feed one pointer event. Returns `None` when the event does not apply to the current state.
    pub fn handle(&mut self, event: PointerEvent) -> Option<Effect> {
        match (self.state, event) {
            (FeatureState::Normal, PointerEvent::Enter) => {
                self.state = FeatureState::Highlighted;
                Some(Effect::RestyleAndRaise(self.highlight.clone()))
            }
            (FeatureState::Highlighted, PointerEvent::Leave) => {
                self.state = FeatureState::Normal;
                Some(Effect::Restyle(self.base.clone()))
            }
            _ => None,
        }
    }
}

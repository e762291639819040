//! Checkout step sequencer.
//!
//! A linear three-step flow: plan selection, buyer details, review. The
//! original flow tracked this as a bare integer; here the states and
//! transitions are explicit so "next from review" is a clamp by
//! construction, not a bounds check scattered through handlers.
//!
//! The sequencer deliberately does no forward validation: a buyer can reach
//! review with required fields still blank, and only the submission gateway
//! complains. Transitions that complete the details step are the route
//! layer's cue to emit a `details_completed` analytics event.

use serde::{Deserialize, Serialize};

/// One step of the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Step 1: pick a tier and add-ons.
    #[default]
    Selection,
    /// Step 2: buyer details and consent.
    Details,
    /// Step 3: read-only review plus submit.
    Review,
}

impl Step {
    /// Advance one step, clamping at [`Step::Review`].
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Selection => Self::Details,
            Self::Details | Self::Review => Self::Review,
        }
    }

    /// Go back one step, clamping at [`Step::Selection`].
    #[must_use]
    pub const fn back(self) -> Self {
        match self {
            Self::Selection | Self::Details => Self::Selection,
            Self::Review => Self::Details,
        }
    }

    /// 1-based step number for display.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Selection => 1,
            Self::Details => 2,
            Self::Review => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_forward_and_clamps() {
        assert_eq!(Step::Selection.next(), Step::Details);
        assert_eq!(Step::Details.next(), Step::Review);
        assert_eq!(Step::Review.next(), Step::Review);
    }

    #[test]
    fn test_back_walks_backward_and_clamps() {
        assert_eq!(Step::Review.back(), Step::Details);
        assert_eq!(Step::Details.back(), Step::Selection);
        assert_eq!(Step::Selection.back(), Step::Selection);
    }

    #[test]
    fn test_initial_step_is_selection() {
        assert_eq!(Step::default(), Step::Selection);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(Step::Selection.number(), 1);
        assert_eq!(Step::Details.number(), 2);
        assert_eq!(Step::Review.number(), 3);
    }
}

//! The review being written on the submission page.
use std::time::Duration;

use crate::models::review::{NewReview, MAX_RATING};

// Local storage keys shared by every open tab.
pub const RATING_KEY: &str = "selectedRating";
pub const TEXT_KEY: &str = "reviewText";
pub const CLOSE_TABS_KEY: &str = "closeAllTabs";

/// Ratings up to this one need an explanation.
pub const LOW_RATING: u8 = 3;
pub const TEXT_SYNC_DELAY: Duration = Duration::from_millis(1000);
pub const REDIRECT_SECONDS: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    rating: u8,
    text: String,
}

impl ReviewDraft {
    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Clicking the selected star again clears the rating.
    pub fn pick_star(&mut self, star: u8) {
        let rating = if self.rating == star { 0 } else { star };
        self.set_rating(rating);
    }

    /// A new rating starts a new comment. Returns true when the rating changed.
    pub fn set_rating(&mut self, rating: u8) -> bool {
        let rating = if rating > MAX_RATING { 0 } else { rating };
        if rating == self.rating {
            return false;
        }
        self.rating = rating;
        self.text.clear();
        true
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn requires_text(&self) -> bool {
        self.rating > 0 && self.rating <= LOW_RATING
    }

    pub fn can_submit(&self) -> bool {
        self.rating > 0 && (!self.requires_text() || !self.text.trim().is_empty())
    }

    /// Rebuilds a draft from what another session left in storage.
    pub fn restore(saved_rating: Option<&str>, saved_text: Option<String>) -> Self {
        let mut draft = Self::default();
        if let Some(rating) = saved_rating.and_then(|raw| raw.trim().parse::<u8>().ok()) {
            draft.set_rating(rating);
        }
        if let Some(text) = saved_text {
            draft.text = text;
        }
        draft
    }

    pub fn to_new_review(&self) -> NewReview {
        NewReview {
            text: (!self.text.is_empty()).then(|| self.text.clone()),
            rating: i64::from(self.rating),
        }
    }
}

/// CSS class of `star` (1-based) for the current rating.
pub fn star_class(star: u8, rating: u8) -> &'static str {
    if star > rating {
        ""
    } else if rating == 1 {
        "active-first"
    } else if rating == MAX_RATING && star == MAX_RATING {
        "active-last"
    } else {
        "active-middle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_same_star_clears() {
        let mut draft = ReviewDraft::default();
        draft.pick_star(4);
        assert_eq!(draft.rating(), 4);
        draft.pick_star(4);
        assert_eq!(draft.rating(), 0);
    }

    #[test]
    fn test_rating_change_clears_text() {
        let mut draft = ReviewDraft::default();
        draft.pick_star(2);
        draft.set_text("cold soup".into());
        assert!(!draft.set_rating(2));
        assert_eq!(draft.text(), "cold soup");
        assert!(draft.set_rating(5));
        assert_eq!(draft.text(), "");
    }

    #[test]
    fn test_low_ratings_need_text() {
        let mut draft = ReviewDraft::default();
        assert!(!draft.can_submit());

        draft.pick_star(5);
        assert!(draft.can_submit());

        draft.pick_star(3);
        assert!(draft.requires_text());
        assert!(!draft.can_submit());
        draft.set_text("   ".into());
        assert!(!draft.can_submit());
        draft.set_text("slow service".into());
        assert!(draft.can_submit());
    }

    #[test]
    fn test_restore() {
        let draft = ReviewDraft::restore(Some("2"), Some("meh".into()));
        assert_eq!(draft.rating(), 2);
        assert_eq!(draft.text(), "meh");

        let draft = ReviewDraft::restore(Some("garbage"), None);
        assert_eq!(draft, ReviewDraft::default());

        let draft = ReviewDraft::restore(Some("9"), None);
        assert_eq!(draft.rating(), 0);
    }

    #[test]
    fn test_to_new_review() {
        let mut draft = ReviewDraft::default();
        draft.pick_star(5);
        assert_eq!(draft.to_new_review(), NewReview { text: None, rating: 5 });
        draft.set_text("great".into());
        assert_eq!(
            draft.to_new_review(),
            NewReview { text: Some("great".into()), rating: 5 }
        );
    }

    #[test]
    fn test_star_classes() {
        assert_eq!(star_class(1, 1), "active-first");
        assert_eq!(star_class(2, 1), "");
        assert_eq!(star_class(3, 4), "active-middle");
        assert_eq!(star_class(5, 5), "active-last");
        assert_eq!(star_class(4, 5), "active-middle");
        assert_eq!(star_class(1, 0), "");
    }
}

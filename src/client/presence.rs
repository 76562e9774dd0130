//! Tab icon and title, swapped while the tab is in the background.
pub const FAVICON_ID: &str = "favicon";
pub const ACTIVE_FAVICON: &str = "/favicon.ico";
pub const HIDDEN_FAVICON: &str = "/assets/favicon_non_active.ico";
pub const ACTIVE_TITLE: &str = "Star Reviews";
pub const HIDDEN_TITLE: &str = "Come back, we miss you! 😭";

/// Favicon href and document title for the given visibility.
pub fn presence(hidden: bool) -> (&'static str, &'static str) {
    if hidden {
        (HIDDEN_FAVICON, HIDDEN_TITLE)
    } else {
        (ACTIVE_FAVICON, ACTIVE_TITLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_swaps_icon_and_title() {
        assert_eq!(presence(false), (ACTIVE_FAVICON, ACTIVE_TITLE));
        assert_eq!(presence(true), (HIDDEN_FAVICON, HIDDEN_TITLE));
    }
}

//! Pure scroll-position bookkeeping.
//!
//! Everything a scroll handler computes that is not styling: which section
//! the viewport is currently in (to highlight the matching nav link), where
//! smooth-scrolling to a section should land given a sticky header, the hero
//! parallax translation, and the show-after-N-pixels predicates behind the
//! header shadow and the back-to-top button. All of it is arithmetic on
//! numbers the host already has, so it lives here where it can be tested
//! without a display surface.

/// A page section registered for nav highlighting.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    /// The section's id, matching the nav link it highlights.
    pub id: String,
    /// Document-coordinate offset of the section's top edge.
    pub top: f64,
}

/// Maps a scroll offset to the active section and scroll targets.
///
/// Sections are kept in document order; the active one is the *last* whose
/// top has been passed, with a bias so the highlight switches a little
/// before the section edge reaches the very top of the viewport.
#[derive(Clone, Debug)]
pub struct ScrollSpy {
    sections: Vec<Section>,
    bias: f64,
    header_offset: f64,
}

impl ScrollSpy {
    /// Highlight switches this many px before a section top is reached.
    pub const DEFAULT_BIAS: f64 = 100.0;

    /// Sticky-header height compensated when scrolling to a section.
    pub const DEFAULT_HEADER_OFFSET: f64 = 80.0;

    /// An empty spy with the default bias and header offset.
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            bias: Self::DEFAULT_BIAS,
            header_offset: Self::DEFAULT_HEADER_OFFSET,
        }
    }

    /// Override the highlight bias.
    pub fn bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    /// Override the sticky-header compensation.
    pub fn header_offset(mut self, header_offset: f64) -> Self {
        self.header_offset = header_offset;
        self
    }

    /// Append a section. Call in document order; layout changes mean
    /// re-registering with fresh offsets.
    pub fn add_section(&mut self, id: impl Into<String>, top: f64) {
        self.sections.push(Section {
            id: id.into(),
            top,
        });
    }

    /// The id of the section the viewport is currently in, if any.
    ///
    /// `None` means the scroll position is above the first section's biased
    /// top, so no nav link should be highlighted.
    pub fn active_section(&self, scroll_y: f64) -> Option<&str> {
        self.sections
            .iter()
            .rev()
            .find(|section| scroll_y >= section.top - self.bias)
            .map(|section| section.id.as_str())
    }

    /// Scroll destination for jumping to `id`, compensating the header.
    pub fn scroll_target(&self, id: &str) -> Option<f64> {
        self.sections
            .iter()
            .find(|section| section.id == id)
            .map(|section| section.top - self.header_offset)
    }
}

impl Default for ScrollSpy {
    fn default() -> Self {
        Self::new()
    }
}

/// Vertical translation for a parallax layer at the given scroll offset.
pub fn parallax_offset(scroll_y: f64, speed: f64) -> f64 {
    scroll_y * speed
}

/// Whether the page has scrolled past `threshold` px.
///
/// Backs binary scroll effects: the stronger header shadow (threshold 100)
/// and the back-to-top button (threshold 500).
pub fn past(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> ScrollSpy {
        let mut spy = ScrollSpy::new();
        spy.add_section("inicio", 0.0);
        spy.add_section("proyectos", 600.0);
        spy.add_section("contacto", 1400.0);
        spy
    }

    #[test]
    fn active_section_is_last_passed_top() {
        let spy = page();

        assert_eq!(spy.active_section(0.0), Some("inicio"));
        assert_eq!(spy.active_section(400.0), Some("inicio"));
        // Bias of 100 switches 100px early.
        assert_eq!(spy.active_section(500.0), Some("proyectos"));
        assert_eq!(spy.active_section(2000.0), Some("contacto"));
    }

    #[test]
    fn above_first_section_highlights_nothing() {
        let mut spy = ScrollSpy::new().bias(0.0);
        spy.add_section("later", 500.0);

        assert_eq!(spy.active_section(100.0), None);
        assert_eq!(spy.active_section(500.0), Some("later"));
    }

    #[test]
    fn scroll_target_compensates_header() {
        let spy = page();

        assert_eq!(spy.scroll_target("proyectos"), Some(520.0));
        assert_eq!(spy.scroll_target("unknown"), None);
    }

    #[test]
    fn parallax_scales_with_scroll() {
        assert_eq!(parallax_offset(0.0, 0.5), 0.0);
        assert_eq!(parallax_offset(400.0, 0.5), 200.0);
    }

    #[test]
    fn past_is_strict() {
        assert!(!past(100.0, 100.0));
        assert!(past(101.0, 100.0));
    }
}

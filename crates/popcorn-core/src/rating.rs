/// Star rating widget state.
///
/// Positions run from 1 to `max_rating`. Hovering previews a rating until a
/// click commits one; clicking the committed position again clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingInput {
    max_rating: u8,
    rating: u8,
    clicked: bool,
}

impl RatingInput {
    pub fn new(max_rating: u8) -> Self {
        Self::with_default(max_rating, 0)
    }

    /// Seed the widget with a previously committed rating (0 means none).
    pub fn with_default(max_rating: u8, default_rating: u8) -> Self {
        let max_rating = max_rating.max(1);
        let rating = default_rating.min(max_rating);
        Self {
            max_rating,
            rating,
            clicked: rating > 0,
        }
    }

    pub fn max_rating(&self) -> u8 {
        self.max_rating
    }

    /// Currently displayed rating, either committed or hover preview.
    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn is_clicked(&self) -> bool {
        self.clicked
    }

    /// Whether the star at `position` renders filled.
    pub fn is_filled(&self, position: u8) -> bool {
        position >= 1 && position <= self.rating
    }

    fn in_range(&self, position: u8) -> bool {
        (1..=self.max_rating).contains(&position)
    }

    pub fn hover(&mut self, position: u8) {
        if !self.clicked && self.in_range(position) {
            self.rating = position;
        }
    }

    pub fn leave(&mut self) {
        if !self.clicked {
            self.rating = 0;
        }
    }

    /// Click a position and return the committed rating to report.
    ///
    /// Returns `None` for positions outside `1..=max_rating`.
    pub fn click(&mut self, position: u8) -> Option<u8> {
        if !self.in_range(position) {
            return None;
        }

        if self.clicked && self.rating == position {
            self.clicked = false;
            self.rating = 0;
        } else {
            self.clicked = true;
            self.rating = position;
        }
        Some(self.rating)
    }
}

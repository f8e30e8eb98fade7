/// The movie currently open in the detail pane, if any.
///
/// Selecting the open movie again closes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn toggle(&mut self, imdb_id: impl Into<String>) -> Option<&str> {
        let imdb_id = imdb_id.into();
        if self.current.as_deref() == Some(imdb_id.as_str()) {
            self.current = None;
        } else {
            self.current = Some(imdb_id);
        }
        self.current()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

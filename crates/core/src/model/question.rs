/// A yes/no question shown over a movie poster.
///
/// Questions are immutable once built; the session controller swaps the whole value
/// when it moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    image: Vec<u8>,
    text: String,
    correct_answer: bool,
}

impl Question {
    #[must_use]
    pub fn new(image: impl Into<Vec<u8>>, text: impl Into<String>, correct_answer: bool) -> Self {
        Self {
            image: image.into(),
            text: text.into(),
            correct_answer,
        }
    }

    /// Raw poster bytes as downloaded. May be empty.
    #[must_use]
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn correct_answer(&self) -> bool {
        self.correct_answer
    }
}

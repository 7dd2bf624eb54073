use unicode_segmentation::UnicodeSegmentation;

const MAX_USERNAME_GRAPHEMES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Returns an instance of `Username` if the input satisfies all
    /// our validation constraints on usernames.
    pub fn parse(s: String) -> Result<Username, String> {
        let is_empty_or_whitespace = s.trim().is_empty();

        // A grapheme is defined by the Unicode standard as a "user-perceived"
        // character: `å` is a single grapheme, but it is composed of two characters.
        let is_too_long = s.graphemes(true).count() > MAX_USERNAME_GRAPHEMES;

        // Usernames travel inside JSON bodies and end up in log fields,
        // so whitespace and control characters are not accepted.
        let contains_forbidden_characters = s.chars().any(|c| c.is_whitespace() || c.is_control());

        if is_empty_or_whitespace || is_too_long || contains_forbidden_characters {
            Err(format!("{} is not a valid username.", s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

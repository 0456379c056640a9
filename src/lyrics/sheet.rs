// @module: Lyric text splitting into screens and lines

/// Lyric text split into screens of non-blank lines.
///
/// Screens are separated by one or more blank lines. Lines are trimmed and
/// blank lines never become entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LyricSheet {
    // @field: Screen blocks, each a list of line texts
    pub screens: Vec<Vec<String>>,
}

impl LyricSheet {
    /// Parse plain lyric text
    pub fn parse(text: &str) -> Self {
        let mut screens = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                if !current.is_empty() {
                    screens.push(std::mem::take(&mut current));
                }
                continue;
            }
            current.push(line.to_string());
        }

        if !current.is_empty() {
            screens.push(current);
        }

        LyricSheet { screens }
    }

    /// Total number of lines across all screens
    pub fn line_count(&self) -> usize {
        self.screens.iter().map(|s| s.len()).sum()
    }

    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Iterate `(screen_index, line_text)` in reading order
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.screens
            .iter()
            .enumerate()
            .flat_map(|(idx, screen)| screen.iter().map(move |line| (idx, line.as_str())))
    }
}

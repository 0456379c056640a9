use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::file_utils::FileManager;
use crate::subtitles::synthesizer::{Event, Style, SubtitleDocument};
use crate::timestamps::format_ass_time;

// @module: Advanced SubStation Alpha serialization

const STYLE_FORMAT: &str = "Name, Alignment, Fontname, Fontsize, PrimaryColour, SecondaryColour, Bold, ScaleX, ScaleY, Spacing, MarginL, MarginR, Encoding";
const EVENT_FORMAT: &str = "Layer, Style, Start, End, MarginV, Text";

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // ASS booleans are -1 / 0
        let bold = if self.bold { -1 } else { 0 };
        write!(
            f,
            "Style: {},{},{},{},{},{},{},100,100,0,10,10,1",
            self.name,
            self.alignment,
            self.font_name,
            self.font_size,
            self.primary_color,
            self.secondary_color,
            bold
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Dialogue: {},{},{},{},{},{}",
            self.layer,
            self.style,
            format_ass_time(self.start_cs),
            format_ass_time(self.end_cs),
            self.margin_v,
            self.text.replace('\n', "\\N")
        )
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "[Script Info]")?;
        writeln!(f, "ScriptType: v4.00+")?;
        writeln!(f, "PlayResX: {}", self.play_res_x)?;
        writeln!(f, "PlayResY: {}", self.play_res_y)?;
        writeln!(f)?;

        writeln!(f, "[V4+ Styles]")?;
        writeln!(f, "Format: {}", STYLE_FORMAT)?;
        for style in &self.styles {
            writeln!(f, "{}", style)?;
        }
        writeln!(f)?;

        writeln!(f, "[Events]")?;
        writeln!(f, "Format: {}", EVENT_FORMAT)?;
        for event in &self.events {
            writeln!(f, "{}", event)?;
        }
        Ok(())
    }
}

impl SubtitleDocument {
    /// Write the document as an `.ass` file
    pub fn write_to_ass<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        FileManager::ensure_parent_dir(path)?;
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        write!(file, "{}", self)
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }
}

/*!
 * Lyrics model: screens of timed lines built from captured events.
 *
 * - `sheet`: splits plain lyric text into screens and lines
 * - `events`: timing markers and their replay onto a sheet
 * - `model`: timed lines/screens, layout and timestamp shifting
 */

pub mod events;
pub mod model;
pub mod sheet;

pub use events::{build_screens, LyricMarker, TimingEvent};
pub use model::{adjust_screens, close_open_lines, LyricLine, LyricScreen};
pub use sheet::LyricSheet;

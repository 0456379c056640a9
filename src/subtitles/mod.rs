/*!
 * Karaoke subtitle generation.
 *
 * - `synthesizer`: typed styles/events computed from timed screens
 * - `ass_writer`: Advanced SubStation Alpha output
 */

pub mod ass_writer;
pub mod synthesizer;

pub use synthesizer::{
    Event, KaraokeTiming, Style, SubtitleDocument, SubtitleSynthesizer, ALIGN_TOP_CENTER,
};

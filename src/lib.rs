/*!
 * # scriptcast - script-to-narration batch tools
 *
 * A Rust library for turning short text scripts into the timed artifacts a
 * narration/compositing pipeline consumes.
 *
 * ## Features
 *
 * - Generate precisely timed, line-wrapped SRT captions from an ordered
 *   sequence of script lines
 * - Concatenate a directory of same-format WAV clips into one continuous
 *   file with configurable silence gaps
 * - Export a script as one flat file per line for external TTS tooling
 * - Configurable timing parameters (rate, gap, lead-in, wrap width)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `script`: Script line collection loading and per-line export
 * - `captions`: Caption cue timing and SRT serialization
 * - `audio_join`: WAV concatenation with silence gaps
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod audio_join;
pub mod captions;
pub mod errors;
pub mod file_utils;
pub mod script;

// Re-export main types for easier usage
pub use app_config::Config;
pub use audio_join::{JoinSummary, join_wav_dir, silence_frames};
pub use captions::{CaptionTrack, Cue, format_timestamp};
pub use errors::{AppError, AudioJoinError, ScriptError};
pub use script::Script;

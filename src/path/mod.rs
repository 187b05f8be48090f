//! # Path data
//!
//! Everything that reads the SVG path-data mini-language:
//!
//! ```text
//! "M12 2a10 10 0 1 1 0 20z"
//!       ↓
//!   [tokenizer]    — commands and numbers
//!       ↓
//!   [interpreter]  — absolute segments, shorthand resolved
//!       ↓
//!   [measure] / [transform] / [flatten]  — one sink per consumer
//! ```

pub mod flatten;
pub mod interpreter;
pub mod measure;
pub mod tokenizer;
pub mod transform;

pub use interpreter::{interpret, InterpreterState, PathSink, Segment};
pub use measure::path_bbox;
pub use transform::{transform_path_data, Affine};

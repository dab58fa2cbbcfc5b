pub mod error;
pub mod known;
pub mod models;
pub mod reader;
pub mod writer;

pub use error::{CueError, CueResult};
pub use models::{Comment, CueFile, CueSheet, Index, Track};
pub use reader::CueReader;
pub use writer::CueWriter;

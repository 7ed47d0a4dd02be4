pub mod error;
pub mod gemini;
pub mod util;

pub use error::{AiError, Result};
pub use gemini::Gemini;
pub use util::truncate_to_char_boundary;

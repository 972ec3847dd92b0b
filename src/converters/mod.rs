pub mod helpers;
pub mod gemini;

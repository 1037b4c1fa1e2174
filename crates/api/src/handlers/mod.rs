pub mod fallback;
pub mod submit;

pub mod console;
pub mod progress;
pub mod validation;

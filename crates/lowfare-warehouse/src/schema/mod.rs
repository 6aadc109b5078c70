/// Common deserializers (used in response normalization)
pub mod common;
pub mod fare;
pub mod providers;
pub mod window;

pub use fare::Fare;
pub use window::DateWindow;

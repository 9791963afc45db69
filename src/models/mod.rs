pub mod instance;
pub mod section;
pub mod speech;

pub use instance::Instance;
pub use section::Section;
pub use speech::Speech;

pub mod theme;
pub mod feedback;
pub mod insight;

pub use theme::*;
pub use feedback::*;
pub use insight::*;

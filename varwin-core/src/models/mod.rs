pub mod variant;
pub mod window;

// re-export for cleaner imports
pub use self::variant::{Strand, Variant};
pub use self::window::WindowGeometry;

pub mod camera;
pub mod highlight;
pub mod picking;
pub mod registry;
pub mod scene_loop;

pub use camera::*;
pub use highlight::*;
pub use picking::*;
pub use registry::*;
pub use scene_loop::*;

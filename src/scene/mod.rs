//! Scene nodes and the scene drawing them.

pub use self::scene::Scene;
pub use self::scene_node::SceneNode;

mod scene;
mod scene_node;

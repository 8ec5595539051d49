/*!
# materia3d

Materials for a small forward renderer.

A material binds a shader program, uploads the uniforms it needs and issues the
draw call of a mesh. This crate provides:

* a [`Material`](resource::Material) trait shared by every material.
* a flat or textured standard material, and its wireframe variant.
* a skybox, showing either a cubemap built from six images or one of three
  HDR environment maps the user can switch between.
* a physically based material with eight texture slots, a point light, and
  image-based lighting from six radiance levels of the environment map the
  skybox currently shows.
* scene nodes and a scene wiring the skybox environment into the PBR
  materials every frame.

Shader compilation, meshes and the render state are provided by the host
through the [`ShaderCompiler`](resource::ShaderCompiler),
[`GpuMesh`](resource::GpuMesh) and [`RenderBackend`](context::RenderBackend)
traits. Textures can be uploaded with the bundled
[`WgpuTextureFactory`](resource::WgpuTextureFactory).

As an example, a helmet lit by an environment-mapped skybox is set up like this:

```no_run
use materia3d::prelude::*;
use std::rc::Rc;

fn helmet_scene(
    resources: &mut Resources,
    cube: Rc<dyn GpuMesh>,
    helmet: Rc<dyn GpuMesh>,
) -> Result<Scene> {
    let mut scene = Scene::new(resources);
    let skybox = SkyboxMaterial::environment_mapped(resources)?;

    let textures = [
        Some("data/helmet/albedo.png"),
        Some("data/helmet/roughness.png"),
        Some("data/helmet/metalness.png"),
        Some("data/brdfLUT.png"),
        Some("data/helmet/normal.png"),
        Some("data/helmet/ao.png"),
        None,
        Some("data/helmet/emissive.png"),
    ];
    let pbr = PbrMaterial::new(textures, false, true, resources, &skybox)?;

    let scale = resources.config.skybox_scale;
    let _ = scene.set_skybox(SceneNode::skybox(cube, skybox, scale));
    let _ = scene.add(SceneNode::new(Some(helmet), Some(pbr.into())).with_name("helmet"));

    Ok(scene)
}
```

Each frame, call [`Scene::update`](scene::Scene::update) then
[`Scene::render`](scene::Scene::render). The update order guarantees the PBR
materials rebuild their radiance levels right after the skybox switched
source.
*/
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

#[macro_use]
extern crate bitflags;
#[cfg(feature = "serde")]
extern crate serde;

#[cfg(feature = "egui")]
pub extern crate egui;

pub use glamx;

pub mod builtin;
pub mod camera;
pub mod color;
pub mod config;
pub mod context;
pub mod editor;
pub mod error;
pub mod light;
pub mod resource;
pub mod scene;

#[cfg(test)]
mod testing;

pub mod prelude {
    pub use crate::builtin::*;
    pub use crate::camera::*;
    pub use crate::color::*;
    pub use crate::config::*;
    pub use crate::context::*;
    pub use crate::editor::*;
    pub use crate::error::*;
    pub use crate::light::*;
    pub use crate::resource::*;
    pub use crate::scene::*;
    pub use glamx::{Mat4, Vec3, Vec4};
}

use crate::builtin::{SceneMaterial, SkyboxMaterial, WireframeMaterial};
use crate::camera::Camera3d;
use crate::context::{Capabilities, RenderContext};
use crate::editor::ParameterEditor;
use crate::resource::{GpuMesh, Material, UpdateContext};
use glamx::{EulerRot, Mat4, Quat, Vec3};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_NODE_ID: AtomicUsize = AtomicUsize::new(0);

/// A mesh drawn at some transform with one material.
///
/// A node holding a [`SkyboxMaterial`] is a skybox node: its depth test is
/// disabled around its draw, it is never drawn as wireframe, and its model
/// transform is not editable.
pub struct SceneNode {
    name: String,
    mesh: Option<Rc<dyn GpuMesh>>,
    transform: Mat4,
    material: Option<SceneMaterial>,
    visible: bool,
}

impl SceneNode {
    /// Creates a visible node named `Node<N>`, `N` being the number of nodes
    /// created so far.
    pub fn new(mesh: Option<Rc<dyn GpuMesh>>, material: Option<SceneMaterial>) -> SceneNode {
        let id = NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed);

        SceneNode {
            name: format!("Node{}", id),
            mesh,
            transform: Mat4::IDENTITY,
            material,
            visible: true,
        }
    }

    /// Creates a skybox node drawing `cube` scaled by `scale`.
    ///
    /// The cube should be centered at the origin.
    pub fn skybox(cube: Rc<dyn GpuMesh>, material: SkyboxMaterial, scale: f32) -> SceneNode {
        let mut node = SceneNode::new(Some(cube), Some(material.into()));
        node.transform = Mat4::from_scale(Vec3::splat(scale));
        node
    }

    /// Sets the name of this node.
    pub fn with_name(mut self, name: impl Into<String>) -> SceneNode {
        self.name = name.into();
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn mesh(&self) -> Option<&Rc<dyn GpuMesh>> {
        self.mesh.as_ref()
    }

    pub fn set_mesh(&mut self, mesh: Option<Rc<dyn GpuMesh>>) {
        self.mesh = mesh;
    }

    /// The model matrix of this node.
    #[inline]
    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    #[inline]
    pub fn material(&self) -> Option<&SceneMaterial> {
        self.material.as_ref()
    }

    #[inline]
    pub fn material_mut(&mut self) -> Option<&mut SceneMaterial> {
        self.material.as_mut()
    }

    pub fn set_material(&mut self, material: Option<SceneMaterial>) {
        self.material = material;
    }

    /// Whether this node is drawn.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether this node holds a skybox material.
    pub fn is_skybox(&self) -> bool {
        self.material
            .as_ref()
            .map_or(false, |m| m.as_skybox().is_some())
    }

    /// Renders this node, if it is visible and has a material.
    pub fn render(&mut self, camera: &dyn Camera3d, context: &mut RenderContext<'_>) {
        if !self.visible {
            return;
        }

        let material = match self.material {
            Some(ref mut material) => material,
            None => return,
        };
        let mesh = self.mesh.as_deref();

        if material.as_skybox().is_none() {
            material.render(mesh, &self.transform, camera, context);
            return;
        }

        if mesh.is_none() || material.shader().is_none() {
            return;
        }

        context.backend.disable(Capabilities::DEPTH_TEST);
        material.render(mesh, &self.transform, camera, context);
        context.backend.enable(Capabilities::DEPTH_TEST);
    }

    /// Renders the triangles of this node as lines, with `wireframe`.
    ///
    /// Skybox nodes are skipped.
    pub fn render_wireframe(
        &self,
        wireframe: &mut WireframeMaterial,
        camera: &dyn Camera3d,
        context: &mut RenderContext<'_>,
    ) {
        if self.is_skybox() {
            return;
        }

        wireframe.render(self.mesh.as_deref(), &self.transform, camera, context);
    }

    /// Exposes the visibility, model transform and material parameters of this node.
    pub fn render_parameter_editor(&mut self, editor: &mut dyn ParameterEditor) {
        let _ = editor.edit_bool("Render node", &mut self.visible);

        if !self.is_skybox() {
            let transform = &mut self.transform;
            editor.section("Model", &mut |editor: &mut dyn ParameterEditor| {
                let (mut scale, rotation, mut translation) =
                    transform.to_scale_rotation_translation();
                // Euler angles in degrees.
                let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
                let mut angles = Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees());

                let moved = editor.edit_vec3("Position", &mut translation);
                let rotated = editor.edit_vec3("Rotation", &mut angles);
                let scaled = editor.edit_vec3("Scale", &mut scale);

                if moved || rotated || scaled {
                    let rotation = Quat::from_euler(
                        EulerRot::XYZ,
                        angles.x.to_radians(),
                        angles.y.to_radians(),
                        angles.z.to_radians(),
                    );
                    *transform = Mat4::from_scale_rotation_translation(scale, rotation, translation);
                }
            });
        }

        if let Some(ref mut material) = self.material {
            editor.section("Material", &mut |editor: &mut dyn ParameterEditor| {
                material.render_parameter_editor(editor)
            });
        }
    }

    /// Forwards the update to the material of this node.
    pub fn update(&mut self, seconds_elapsed: f64, context: &mut UpdateContext<'_>) {
        if let Some(ref mut material) = self.material {
            material.update(seconds_elapsed, context);
        }
    }
}

use crate::builtin::WireframeMaterial;
use crate::camera::Camera3d;
use crate::context::RenderContext;
use crate::editor::ParameterEditor;
use crate::resource::{EnvironmentSource, Material, Resources, UpdateContext};
use crate::scene::SceneNode;

/// The nodes drawn each frame, and the skybox lighting them.
///
/// The skybox is updated before every other node, so a PBR material always
/// observes the environment the skybox settled on during the same frame.
pub struct Scene {
    skybox: Option<SceneNode>,
    nodes: Vec<SceneNode>,
    wireframe: WireframeMaterial,
    show_wireframe: bool,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new(resources: &mut Resources) -> Scene {
        Scene {
            skybox: None,
            nodes: Vec::new(),
            wireframe: WireframeMaterial::new(resources),
            show_wireframe: false,
        }
    }

    /// Sets the skybox node, returning the previous one.
    pub fn set_skybox(&mut self, skybox: SceneNode) -> Option<SceneNode> {
        self.skybox.replace(skybox)
    }

    #[inline]
    pub fn skybox(&self) -> Option<&SceneNode> {
        self.skybox.as_ref()
    }

    #[inline]
    pub fn skybox_mut(&mut self) -> Option<&mut SceneNode> {
        self.skybox.as_mut()
    }

    /// Adds a node to this scene and returns it.
    pub fn add(&mut self, node: SceneNode) -> &mut SceneNode {
        self.nodes.push(node);
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }

    /// Removes the first node named `name`.
    pub fn remove(&mut self, name: &str) -> Option<SceneNode> {
        let i = self.nodes.iter().position(|node| node.name() == name)?;
        Some(self.nodes.remove(i))
    }

    #[inline]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    #[inline]
    pub fn nodes_mut(&mut self) -> &mut [SceneNode] {
        &mut self.nodes
    }

    /// The first node named `name`.
    pub fn node_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|node| node.name() == name)
    }

    /// Whether every node is also drawn as wireframe.
    #[inline]
    pub fn show_wireframe(&self) -> bool {
        self.show_wireframe
    }

    pub fn set_show_wireframe(&mut self, show: bool) {
        self.show_wireframe = show;
    }

    /// The environment map displayed by the skybox, if it is environment-mapped.
    pub fn environment(&self) -> Option<&dyn EnvironmentSource> {
        self.skybox
            .as_ref()
            .and_then(|skybox| skybox.material())
            .and_then(|material| material.environment_source())
    }

    /// Updates the skybox, then every other node against the skybox environment.
    pub fn update(&mut self, seconds_elapsed: f64, resources: &mut Resources) {
        if let Some(ref mut skybox) = self.skybox {
            skybox.update(
                seconds_elapsed,
                &mut UpdateContext {
                    resources: &mut *resources,
                    environment: None,
                },
            );
        }

        let environment = self
            .skybox
            .as_ref()
            .and_then(|skybox| skybox.material())
            .and_then(|material| material.environment_source());

        for node in self.nodes.iter_mut() {
            node.update(
                seconds_elapsed,
                &mut UpdateContext {
                    resources: &mut *resources,
                    environment,
                },
            );
        }
    }

    /// Renders the skybox, then every other node.
    pub fn render(&mut self, camera: &dyn Camera3d, context: &mut RenderContext<'_>) {
        if let Some(ref mut skybox) = self.skybox {
            skybox.render(camera, context);
        }

        for node in self.nodes.iter_mut() {
            node.render(camera, context);
        }

        if self.show_wireframe {
            for node in self.nodes.iter() {
                node.render_wireframe(&mut self.wireframe, camera, context);
            }
        }
    }

    /// Exposes the parameters of the skybox and of every node, one section per node.
    pub fn render_parameter_editor(&mut self, editor: &mut dyn ParameterEditor) {
        let _ = editor.edit_bool("Wireframe", &mut self.show_wireframe);

        for node in self.skybox.iter_mut().chain(self.nodes.iter_mut()) {
            let name = node.name().to_string();
            editor.section(&name, &mut |editor: &mut dyn ParameterEditor| {
                node.render_parameter_editor(editor)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{PbrMaterial, SkyboxMaterial, StandardMaterial};
    use crate::camera::FixedView3d;
    use crate::resource::GpuMesh;
    use crate::testing::{resources, Event, EventLog, RecordingBackend, RecordingEditor, RecordingMesh};
    use std::rc::Rc;

    fn cube(log: &EventLog) -> Rc<dyn GpuMesh> {
        Rc::new(RecordingMesh::new(log.clone()))
    }

    #[test]
    fn test_update_propagates_skybox_switch() {
        let log = EventLog::default();
        let mut resources = resources(&log);
        let mut scene = Scene::new(&mut resources);
        let skybox = SkyboxMaterial::environment_mapped(&mut resources).unwrap();
        let pbr = PbrMaterial::new([None; 8], false, false, &mut resources, &skybox).unwrap();
        let _ = scene.set_skybox(SceneNode::skybox(cube(&log), skybox, 3000.0));
        let _ = scene.add(SceneNode::new(Some(cube(&log)), Some(pbr.into())).with_name("helmet"));

        let _ = scene
            .skybox_mut()
            .and_then(|node| node.material_mut())
            .and_then(|material| material.as_skybox_mut())
            .unwrap()
            .select_source(1)
            .unwrap();
        scene.update(0.016, &mut resources);

        let cached = scene.nodes()[0]
            .material()
            .and_then(|material| material.as_pbr())
            .map(|pbr| pbr.cached_source_name().to_string());
        assert_eq!(cached.as_deref(), Some("data/environments/tv_studio.hdre"));
        assert_eq!(
            scene.environment().and_then(|e| e.active_source_name()),
            Some("data/environments/tv_studio.hdre")
        );
    }

    #[test]
    fn test_skybox_is_drawn_first() {
        let log = EventLog::default();
        let mut resources = resources(&log);
        let mut scene = Scene::new(&mut resources);
        let _ = scene.add(SceneNode::new(
            Some(cube(&log)),
            Some(StandardMaterial::new(&mut resources).into()),
        ));
        let skybox = SkyboxMaterial::environment_mapped(&mut resources).unwrap();
        let _ = scene.set_skybox(SceneNode::skybox(cube(&log), skybox, 3000.0));
        let mut backend = RecordingBackend::new(log.clone());
        log.clear();

        scene.render(&FixedView3d::new(), &mut RenderContext::new(&mut backend, 0.0));

        let shaders: Vec<Event> = log
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::EnableShader(_)))
            .collect();
        assert_eq!(
            shaders,
            vec![
                Event::EnableShader("data/shaders/skybox.fs".to_string()),
                Event::EnableShader("data/shaders/flat.fs".to_string()),
            ]
        );
    }

    #[test]
    fn test_wireframe_overlay() {
        let log = EventLog::default();
        let mut resources = resources(&log);
        let mut scene = Scene::new(&mut resources);
        let _ = scene.add(SceneNode::new(
            Some(cube(&log)),
            Some(StandardMaterial::new(&mut resources).into()),
        ));
        let mut backend = RecordingBackend::new(log.clone());
        let camera = FixedView3d::new();

        scene.render(&camera, &mut RenderContext::new(&mut backend, 0.0));
        assert_eq!(log.draws(), 1);

        let mut editor = RecordingEditor {
            flips: vec!["Wireframe".to_string()],
            ..Default::default()
        };
        scene.render_parameter_editor(&mut editor);
        assert!(scene.show_wireframe());

        scene.render(&camera, &mut RenderContext::new(&mut backend, 0.0));
        assert_eq!(log.draws(), 3);
    }

    #[test]
    fn test_remove_by_name() {
        let log = EventLog::default();
        let mut resources = resources(&log);
        let mut scene = Scene::new(&mut resources);
        let _ = scene.add(SceneNode::new(None, None).with_name("a"));
        let _ = scene.add(SceneNode::new(None, None).with_name("b"));

        assert!(scene.node_mut("b").is_some());
        assert_eq!(scene.remove("a").map(|n| n.name().to_string()), Some("a".to_string()));
        assert!(scene.remove("a").is_none());
        assert_eq!(scene.nodes().len(), 1);
    }
}

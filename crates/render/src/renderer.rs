use std::convert::Infallible;

use gridwalk_kernel::{NodeKind, PerspectiveCamera, Scene};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a camera, then produces output. It never
/// mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;
    type Error;

    /// Render one frame of `scene` as seen through `camera`.
    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<Self::Output, Self::Error>;
}

/// Produces a human-readable dump of the scene instead of pixels.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
    last: String,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Output of the most recent frame.
    pub fn last_frame(&self) -> &str {
        &self.last
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;
    type Error = Infallible;

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<String, Infallible> {
        let mut out = String::new();
        let eye = camera.position();
        let dir = camera.forward();

        out.push_str(&format!(
            "=== Frame {} (clear={}) ===\n",
            self.frames,
            scene.clear_color()
        ));
        out.push_str(&format!("Nodes: {}\n", scene.len()));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) dir=({:.2}, {:.2}, {:.2}) fov={:.0}\n",
            eye.x, eye.y, eye.z, dir.x, dir.y, dir.z, camera.fov_y_degrees
        ));

        for (id, node) in scene.nodes() {
            let p = node.transform.position;
            let kind = match &node.kind {
                NodeKind::Grid(grid) => format!("grid {}x{}", grid.size, grid.divisions),
                NodeKind::Mesh(mesh) => format!(
                    "mesh {}x{}x{} {} {}",
                    mesh.geometry.width,
                    mesh.geometry.height,
                    mesh.geometry.depth,
                    if mesh.material.is_lit() { "phong" } else { "basic" },
                    mesh.material.color()
                ),
                NodeKind::DirectionalLight(light) => {
                    format!("light {} x{}", light.color, light.intensity)
                }
            };
            out.push_str(&format!(
                "  [{}] {} {} pos=({:.2}, {:.2}, {:.2})\n",
                id.0, node.name, kind, p.x, p.y, p.z
            ));
        }

        tracing::trace!(frame = self.frames, bytes = out.len(), "debug frame rendered");
        self.frames += 1;
        self.last.clone_from(&out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_common::Color;
    use gridwalk_kernel::{Game, SceneVariant};

    #[test]
    fn debug_renderer_empty_scene() {
        let mut renderer = DebugTextRenderer::new();
        let output = renderer
            .render(&Scene::default(), &PerspectiveCamera::default())
            .unwrap();

        assert!(output.contains("Frame 0"));
        assert!(output.contains("Nodes: 0"));
        assert!(output.contains("clear=#000000"));
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn debug_renderer_follow_scene() {
        let game = Game::new(SceneVariant::Follow, 1.0);
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(game.scene(), game.camera()).unwrap();

        assert!(output.contains("Nodes: 3"));
        assert!(output.contains("clear=#336699"));
        assert!(output.contains("grid 10x10"));
        assert!(output.contains("player mesh 1x1x1 phong #888888"));
        assert!(output.contains("sun light #ffffff x1"));
        assert!(output.contains("eye=(0.00, 5.00, 5.00)"));
        assert_eq!(renderer.last_frame(), output);
    }

    #[test]
    fn debug_renderer_counts_frames() {
        let game = Game::new(SceneVariant::Spin, 1.0).with_clear_color(Color(0x010203));
        let mut renderer = DebugTextRenderer::new();
        renderer.render(game.scene(), game.camera()).unwrap();
        let second = renderer.render(game.scene(), game.camera()).unwrap();
        assert!(second.starts_with("=== Frame 1 (clear=#010203)"));
        assert!(second.contains("cube mesh 1x1x1 basic #00ff00"));
    }

    #[test]
    fn debug_renderer_writes_header_then_one_line_per_node() {
        let game = Game::new(SceneVariant::Follow, 1.0);
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(game.scene(), game.camera()).unwrap();

        assert!(output.ends_with('\n'));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3 + game.scene().len());
        assert!(lines[3].starts_with("  [0] grid"));
        assert!(lines[5].starts_with("  [2] sun"));
    }
}

use std::time::Instant;

use kiss3d::light::Light;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3};

use self::camera::OrbitCamera;
use self::controller::Controller;
use self::node::MeshNode;
use crate::config::Config;
use crate::model::{system, Material, RenderableBody};

mod camera;
mod controller;
mod node;
mod skybox;
mod utils;

const RING_SEGMENTS: usize = 128;
const RING_COLOR: (f32, f32, f32) = (0.35, 0.35, 0.4);
// Keeps the skybox corners inside the far plane
const SKYBOX_FAR_FRACTION: f32 = 0.45;

/// Everything the render loop needs, built once up front.
pub struct Scene<'a> {
    bodies: Vec<RenderableBody<'a, MeshNode>>,
    // Held so the nodes stay alive for as long as the scene does
    _sun: SceneNode,
    _skybox: Option<SceneNode>,
    camera: OrbitCamera,
    controller: Controller,
    clock: Instant,
    frames: u64,
}

impl<'a> Scene<'a> {
    pub fn new(window: &mut Window, config: &'a Config) -> Self {
        let view = &config.view;
        window.set_light(Light::StickToCamera);
        window.set_background_color(0.0, 0.0, 0.0);
        window.set_framerate_limit(view.framerate_limit);

        let mut root = MeshNode::new(window.scene().clone(), &view.asset_root);

        let sun_spec = &config.system.sun;
        let sun = root.add_sphere(sun_spec.radius, &sun_spec.material);

        let bodies = system::build(&config.system.planets, &mut root);
        tracing::info!(
            planets = bodies.len(),
            bodies = system::count(&bodies),
            "built scene"
        );

        let skybox = config.system.skybox.as_ref().map(|spec| {
            let half_extent = view.camera.zfar * SKYBOX_FAR_FRACTION;
            skybox::add_skybox(root.scene_node(), spec, &view.asset_root, half_extent)
        });

        let camera = OrbitCamera::new(&view.camera, window.width(), window.height());

        Scene {
            bodies,
            _sun: sun,
            _skybox: skybox,
            camera,
            controller: Controller::new(view.show_orbits, view.show_hud),
            clock: Instant::now(),
            frames: 0,
        }
    }

    pub fn draw_loop(mut self, window: &mut Window) {
        while self.render_frame(window) {}
        tracing::info!(frames = self.frames, "window closed");
    }

    /// Runs one frame. Returns false once the window has been closed.
    fn render_frame(&mut self, window: &mut Window) -> bool {
        for event in window.events().iter() {
            self.controller.process_event(&event.value);
        }

        let elapsed = self.clock.elapsed().as_secs_f64();
        for _ in 0..self.controller.take_steps() {
            system::step(elapsed, &mut self.bodies);
        }

        if self.controller.show_orbits {
            self.draw_orbits(window);
        }
        if self.controller.show_hud {
            self.draw_hud(window, elapsed);
        }

        self.frames += 1;
        self.controller.increment_frame_counter();
        window.render_with_camera(&mut self.camera)
    }

    fn draw_orbits(&self, window: &mut Window) {
        system::visit_orbits(&self.bodies, |center, body| {
            let spec = body.spec();
            let color = match spec.material {
                Material::Color(r, g, b) => Point3::new(r, g, b) * 0.5,
                Material::Texture(_) => {
                    let (r, g, b) = RING_COLOR;
                    Point3::new(r, g, b)
                }
            };
            let points = utils::ring_points(*center, spec.distance, RING_SEGMENTS);
            utils::draw_path(window, points, &color);
        });
    }

    fn draw_hud(&self, window: &mut Window, elapsed: f64) {
        let default_font = kiss3d::text::Font::default();
        window.draw_text(
            &hud_text(
                self.frames,
                elapsed,
                self.controller.steps_per_frame(),
                self.controller.fps(),
                self.controller.is_paused(),
            ),
            &Point2::origin(),
            40.0,
            &default_font,
            &Point3::new(1.0, 1.0, 1.0),
        );
    }
}

fn hud_text(frames: u64, elapsed: f64, steps_per_frame: u32, fps: f64, paused: bool) -> String {
    format!(
        "Frame: {}
Elapsed: {:.1} s
Steps/frame: {}{}
FPS: {:.0}
[space] pause  [n] step  [,/.] slower/faster  [o] orbits  [h] hud",
        frames,
        elapsed,
        steps_per_frame,
        if paused { " (paused)" } else { "" },
        fps,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_text() {
        let text = hud_text(120, 2.04, 4, 59.6, false);
        assert!(text.starts_with("Frame: 120\n"));
        assert!(text.contains("Elapsed: 2.0 s"));
        assert!(text.contains("Steps/frame: 4\n"));
        assert!(text.contains("FPS: 60"));

        let paused = hud_text(0, 0.0, 1, 0.0, true);
        assert!(paused.contains("Steps/frame: 1 (paused)"));
    }
}

//! Solar system demo
//!
//! An emissive textured sun at the origin, two textured planets on
//! circular orbits, a starfield skybox, and an orbiting camera capped
//! at 50 units of zoom-out. Planet motion lives in [`orbit`].

mod orbit;

use orbit::OrbitalBody;
use render_engine::prelude::*;

/// Orbit radius of the inner planet
const PLANET1_RADIUS: f32 = 4.0;
/// Orbit radius of the outer planet
const PLANET2_RADIUS: f32 = 6.0;
/// Radians per frame for the inner planet
const PLANET1_SPEED: f32 = 0.01;
/// Radians per frame for the outer planet, orbiting the other way
const PLANET2_SPEED: f32 = -0.01;

struct SolarSystemApp {
    bodies: Vec<OrbitalBody>,
}

impl SolarSystemApp {
    fn new() -> Self {
        Self { bodies: Vec::new() }
    }
}

impl Application for SolarSystemApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        // Camera starts 15 units out; wheel zoom-out is capped at 50.
        engine.set_orbit_camera(
            ArcRotateCamera::new(0.0, 0.0, 15.0, Vec3::zeros()).with_upper_radius_limit(50.0),
        );

        let lighting = engine.lighting_mut();
        lighting.add_light(Light::Hemispheric {
            direction: Vec3::new(0.0, 1.0, 0.0),
            color: Vec3::new(1.0, 1.0, 1.0),
            ground_color: Vec3::new(0.0, 0.0, 1.0),
            intensity: 0.5,
        });
        // The sun's glow: a point light at the origin
        lighting.add_light(Light::point(Vec3::zeros(), 2.0));

        let renderer = engine.renderer_mut();
        let sun_mesh = renderer.create_mesh(&Mesh::sphere(24, 4.0))?;
        let planet_mesh = renderer.create_mesh(&Mesh::sphere(16, 1.0))?;

        let sun_texture = renderer.load_texture("assets/sun.jpg")?;
        let planet_texture = renderer.load_texture("assets/planet1.jpg")?;
        let skybox_texture = renderer.load_cube_texture("assets/skybox", "jpg")?;

        let scene = engine.scene_mut();
        scene.add_node(SceneNode::new(
            "sun",
            sun_mesh,
            Material::emissive_textured(sun_texture),
        ));
        let planet1 = scene.add_node(
            SceneNode::new(
                "planet1",
                planet_mesh,
                Material::textured(planet_texture).with_specular(Vec3::zeros()),
            )
            .with_position(Vec3::new(PLANET1_RADIUS, 0.0, 0.0)),
        );
        let planet2 = scene.add_node(
            SceneNode::new(
                "planet2",
                planet_mesh,
                Material::textured(planet_texture).with_specular(Vec3::zeros()),
            )
            .with_position(Vec3::new(PLANET2_RADIUS, 0.0, 0.0)),
        );
        scene.set_skybox(Skybox::new(skybox_texture));

        self.bodies = vec![
            OrbitalBody::new(planet1, PLANET1_RADIUS, PLANET1_SPEED),
            OrbitalBody::new(planet2, PLANET2_RADIUS, PLANET2_SPEED),
        ];

        log::info!("Solar system ready: {} orbiting bodies", self.bodies.len());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        orbit::advance_orbits(&mut self.bodies, engine.scene_mut());
        Ok(())
    }
}

fn main() -> Result<(), EngineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EngineConfig::new("Solar System").with_window_size(1280, 720);
    let mut app = SolarSystemApp::new();
    Engine::run(config, &mut app)
}

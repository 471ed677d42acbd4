//! Interactive demo: a small scene graph spinning in an SDL2 window.
//!
//! Usage: `softraster [model.obj] [texture.png]`
//!
//! Keys: W/A/S/D move, Left/Right orbit, C culling, V vertex dots,
//! F texture filter, N straddle mode, I clear mode, P screenshot, Esc quit.

use std::error::Error;
use std::rc::Rc;

use softraster::prelude::*;
use softraster::window::{FrameLimiter, Key, Window, WindowEvent, DEFAULT_HEIGHT, DEFAULT_WIDTH};

const MOVE_SPEED: f32 = 1.0;
const ORBIT_SPEED: f32 = 0.05;
const SPIN_PER_MS: f32 = 0.001;

const LANDSCAPE_SEED: u64 = 0x5EED;

/// Bulb over a flared foot, drawn from top to bottom.
fn vase_profile() -> Vec<Vec2> {
    [
        (0.8, 2.0),
        (2.4, 1.2),
        (2.4, -0.8),
        (1.0, -1.2),
        (0.4, -1.4),
        (1.6, -2.0),
        (1.8, -2.4),
    ]
    .map(|(radius, height)| Vec2::new(radius, height))
    .to_vec()
}

/// 8x8 checkerboard used when no texture file is given.
fn checkerboard() -> Result<Texture, softraster::Error> {
    let pixels = (0..64)
        .map(|i| {
            if (i % 8 + i / 8) % 2 == 0 {
                colors::WHITE
            } else {
                0x3050A0
            }
        })
        .collect();
    Texture::from_pixels(8, 8, pixels)
}

fn build_scene(
    obj_path: Option<&str>,
    texture_path: Option<&str>,
) -> Result<GraphSceneManager, Box<dyn Error>> {
    let texture = match texture_path {
        Some(path) => Texture::from_file(path)?,
        None => checkerboard()?,
    };
    let texture = Rc::new(texture);

    let mut children = vec![
        Node::shape(
            Shape::new("cube", Rc::new(primitives::cube()))
                .with_transformation(
                    Transform::new()
                        .with_position(Vec3::new(-8.0, 0.0, 0.0))
                        .rotated_x(0.4)
                        .with_uniform_scale(3.0)
                        .into(),
                ),
        ),
        Node::shape(
            Shape::new("cylinder", Rc::new(primitives::cylinder(24, 6.0, 2.5)))
                .with_material(Material::textured(Rc::clone(&texture)))
                .with_transformation(Mat4::translation(8.0, 0.0, 0.0)),
        ),
        Node::shape(
            Shape::new("torus", Rc::new(primitives::torus(24, 12, 4.0, 1.2)))
                .with_transformation(Mat4::translation(0.0, 8.0, 0.0)),
        ),
        Node::shape(
            Shape::new("house", Rc::new(primitives::house()))
                .with_transformation(Mat4::translation(0.0, -10.0, -10.0) * Mat4::scaling(0.5, 0.5, 0.5)),
        ),
        Node::shape(
            Shape::new("vase", Rc::new(primitives::rotational_surface(&vase_profile(), 16, 24)))
                .with_transformation(Mat4::translation(0.0, -2.0, 6.0)),
        ),
        Node::shape(
            Shape::new("landscape", Rc::new(primitives::fractal_landscape(5, 6.0, LANDSCAPE_SEED)))
                .with_transformation(Mat4::translation(0.0, -24.0, -40.0)),
        ),
    ];

    if let Some(path) = obj_path {
        for (i, data) in VertexData::from_obj(path)?.into_iter().enumerate() {
            log::info!("loaded {} triangles from {path}", data.triangle_count());
            children.push(Node::shape(
                Shape::new(format!("{path}#{i}"), Rc::new(data))
                    .with_material(Material::textured(Rc::clone(&texture))),
            ));
        }
    }

    let mut scene = GraphSceneManager::new();
    scene.set_root(Node::group(Mat4::identity(), children));
    scene.set_culling(true);
    scene
        .frustum_mut()
        .set_aspect_ratio(DEFAULT_WIDTH as f32 / DEFAULT_HEIGHT as f32);
    Ok(scene)
}

fn handle_key(key: Key, scene: &mut GraphSceneManager, engine: &mut Engine, frame_index: u64) {
    let camera = scene.camera_mut();
    match key {
        Key::Forward => camera.move_forward(MOVE_SPEED),
        Key::Back => camera.move_forward(-MOVE_SPEED),
        Key::Left => camera.move_right(-MOVE_SPEED),
        Key::Right => camera.move_right(MOVE_SPEED),
        Key::OrbitLeft => camera.orbit_y(-ORBIT_SPEED),
        Key::OrbitRight => camera.orbit_y(ORBIT_SPEED),
        Key::ToggleCulling => {
            let config = engine.config_mut();
            config.backface_culling = !config.backface_culling;
            log::info!("back-face culling: {}", config.backface_culling);
        }
        Key::ToggleVertices => {
            let config = engine.config_mut();
            config.show_vertices = !config.show_vertices;
        }
        Key::ToggleFilter => {
            let config = engine.config_mut();
            config.texture_filter = match config.texture_filter {
                TextureFilter::Bilinear => TextureFilter::Nearest,
                TextureFilter::Nearest => TextureFilter::Bilinear,
            };
            log::info!("texture filter: {:?}", config.texture_filter);
        }
        Key::ToggleStraddle => {
            let config = engine.config_mut();
            config.straddle = match config.straddle {
                StraddleMode::FullScan => StraddleMode::ClipNear,
                StraddleMode::ClipNear => StraddleMode::FullScan,
            };
            log::info!("straddle mode: {:?}", config.straddle);
        }
        Key::ToggleClearMode => {
            let config = engine.config_mut();
            config.clear_mode = match config.clear_mode {
                ClearMode::PerFrame => ClearMode::PerItem,
                ClearMode::PerItem => ClearMode::PerFrame,
            };
            log::info!("clear mode: {:?}", config.clear_mode);
        }
        Key::Screenshot => {
            let path = format!("frame-{frame_index}.png");
            match engine.frame().save_png(&path) {
                Ok(()) => log::info!("saved {path}"),
                Err(e) => log::error!("screenshot failed: {e}"),
            }
        }
    }
}

/// Spins every shape under the root group about its own Y axis.
fn animate(scene: &mut GraphSceneManager, angle: f32) {
    let Some(children) = scene.root_mut().and_then(Node::children_mut) else {
        return;
    };
    let spin = Mat4::rotation_y(angle);
    for child in children.iter_mut() {
        child.set_transformation(child.transformation() * spin);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut scene = build_scene(
        args.first().map(String::as_str),
        args.get(1).map(String::as_str),
    )?;

    let mut window = Window::new("softraster", DEFAULT_WIDTH, DEFAULT_HEIGHT)?;
    let mut engine = Engine::new(window.width(), window.height(), RasterConfig::default());
    let mut limiter = FrameLimiter::new(&window);
    let mut frame_index: u64 = 0;

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(width, height) => {
                    window.resize(width, height)?;
                    engine.set_viewport_size(width, height);
                    if height > 0 {
                        scene
                            .frustum_mut()
                            .set_aspect_ratio(width as f32 / height as f32);
                    }
                }
                WindowEvent::Key(key) => handle_key(key, &mut scene, &mut engine, frame_index),
            }
        }

        let delta_ms = limiter.wait_and_get_delta(&window);
        animate(&mut scene, delta_ms as f32 * SPIN_PER_MS);

        engine.display(&scene);
        if !engine.frame().is_empty() {
            window.present(engine.frame())?;
        }
        frame_index += 1;
    }

    Ok(())
}

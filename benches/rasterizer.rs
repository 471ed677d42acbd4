use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use softraster::prelude::*;
use softraster::render::{
    EdgeFunctionRasterizer, FlatShader, ScanArea, TextureShader, Triangle, VertexColorShader,
};

const BUFFER_WIDTH: u32 = 320;
const BUFFER_HEIGHT: u32 = 240;

fn create_buffer() -> FrameBuffer {
    FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, colors::BLACK, DepthTest::NearestWins.clear_value())
}

/// Screen-space triangle wound clockwise on screen, all w = 1.
fn screen_triangle(points: [(f32, f32); 3]) -> Triangle {
    Triangle::new(
        points.map(|(x, y)| Vec4::new(x, y, 0.0, 1.0)),
        [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)],
        [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)],
    )
}

fn small_triangle() -> Triangle {
    screen_triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)])
}

fn medium_triangle() -> Triangle {
    screen_triangle([(60.0, 40.0), (200.0, 40.0), (130.0, 180.0)])
}

fn large_triangle() -> Triangle {
    screen_triangle([(10.0, 10.0), (310.0, 30.0), (160.0, 230.0)])
}

fn checkerboard(size: u32) -> Texture {
    let pixels = (0..size * size)
        .map(|i| if (i % size + i / size) % 2 == 0 { colors::WHITE } else { colors::BLUE })
        .collect();
    Texture::from_pixels(size, size, pixels).expect("square texture")
}

fn benchmark_scan_area(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_area");
    let rasterizer = EdgeFunctionRasterizer::new();
    let shader = FlatShader::new(colors::RED);

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        for (area_name, area) in [("bounded", ScanArea::Bounded), ("full_buffer", ScanArea::FullBuffer)] {
            group.bench_with_input(BenchmarkId::new(area_name, name), &triangle, |b, tri| {
                let mut fb = create_buffer();
                b.iter(|| {
                    fb.clear(colors::BLACK, 0.0);
                    rasterizer.rasterize(black_box(tri), area, &mut fb, DepthTest::NearestWins, &shader)
                });
            });
        }
    }

    group.finish();
}

fn benchmark_shaders(c: &mut Criterion) {
    let mut group = c.benchmark_group("shaders");
    let rasterizer = EdgeFunctionRasterizer::new();
    let triangle = medium_triangle();
    let texture = checkerboard(64);

    let vertex_color = VertexColorShader::new(triangle.colors);
    group.bench_function("vertex_color", |b| {
        let mut fb = create_buffer();
        b.iter(|| {
            fb.clear(colors::BLACK, 0.0);
            rasterizer.rasterize(&triangle, ScanArea::Bounded, &mut fb, DepthTest::NearestWins, &vertex_color)
        });
    });

    let [t0, t1, t2] = triangle.texcoords;
    let u = Vec3::new(t0.x, t1.x, t2.x);
    let v = Vec3::new(t0.y, t1.y, t2.y);
    for (name, filter) in [("nearest", TextureFilter::Nearest), ("bilinear", TextureFilter::Bilinear)] {
        let shader = TextureShader::new(&texture, u, v, filter);
        group.bench_function(name, |b| {
            let mut fb = create_buffer();
            b.iter(|| {
                fb.clear(colors::BLACK, 0.0);
                rasterizer.rasterize(&triangle, ScanArea::Bounded, &mut fb, DepthTest::NearestWins, &shader)
            });
        });
    }

    group.finish();
}

fn benchmark_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");

    let texture = Rc::new(checkerboard(32));
    let mut scene = SimpleSceneManager::new();
    scene.add_shape(
        Shape::new("cube", Rc::new(primitives::cube()))
            .with_transformation(Mat4::translation(-8.0, 0.0, 0.0) * Mat4::scaling(3.0, 3.0, 3.0)),
    );
    scene.add_shape(
        Shape::new("cylinder", Rc::new(primitives::cylinder(32, 6.0, 2.5)))
            .with_material(Material::textured(texture))
            .with_transformation(Mat4::translation(8.0, 0.0, 0.0)),
    );
    scene.add_shape(Shape::new("torus", Rc::new(primitives::torus(32, 16, 4.0, 1.2))));
    scene
        .frustum_mut()
        .set_aspect_ratio(BUFFER_WIDTH as f32 / BUFFER_HEIGHT as f32);

    group.bench_function("three_shapes", |b| {
        let mut engine = Engine::new(BUFFER_WIDTH, BUFFER_HEIGHT, RasterConfig::default());
        b.iter(|| engine.display(black_box(&scene)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_scan_area, benchmark_shaders, benchmark_scene);
criterion_main!(benches);

//! The Cornell box, built from quads in its measured coordinates
//! (millimetres, y up, camera looking down +z).

use lumen_math::Vec3;
use lumen_renderer::{
    Camera, Color, ConfigError, DiffuseLight, IntegratorConfig, Lambertian, Mesh, Scene,
    SceneBuilder,
};

const RED: Color = Color::new(0.63, 0.065, 0.05);
const GREEN: Color = Color::new(0.14, 0.45, 0.091);
const WHITE: Color = Color::new(0.725, 0.71, 0.68);

/// Blackbody-like spectrum of the ceiling lamp folded into RGB.
fn light_emission() -> Color {
    8.0 * Color::new(0.747 + 0.058, 0.747 + 0.258, 0.747)
        + 15.6 * Color::new(0.740 + 0.287, 0.740 + 0.160, 0.740)
        + 18.4 * Color::new(0.737 + 0.642, 0.737 + 0.159, 0.737)
}

/// Axis-aligned quad helper for walls.
fn wall(a: [f32; 3], b: [f32; 3], c: [f32; 3], d: [f32; 3], albedo: Color) -> Mesh<Lambertian> {
    Mesh::quad(
        Vec3::from(a),
        Vec3::from(b),
        Vec3::from(c),
        Vec3::from(d),
        Lambertian::new(albedo),
    )
}

/// Prism standing on the floor with the given top face.
fn block(top: [[f32; 3]; 4], albedo: Color) -> Mesh<Lambertian> {
    let mut positions: Vec<Vec3> = top.iter().map(|&p| Vec3::from(p)).collect();
    positions.extend(top.iter().map(|&[x, _, z]| Vec3::new(x, 0.0, z)));

    let mut faces = vec![[0, 1, 2], [0, 2, 3]];
    for i in 0..4u32 {
        let j = (i + 1) % 4;
        faces.push([i, j, j + 4]);
        faces.push([i, j + 4, i + 4]);
    }

    Mesh::new(&positions, &faces, Lambertian::new(albedo))
}

/// Build the scene.
pub fn scene(config: IntegratorConfig) -> Result<Scene, ConfigError> {
    let mut builder = SceneBuilder::new(config);

    builder
        .add(wall(
            [552.8, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 559.2],
            [549.6, 0.0, 559.2],
            WHITE,
        ))
        .add(wall(
            [556.0, 548.8, 0.0],
            [556.0, 548.8, 559.2],
            [0.0, 548.8, 559.2],
            [0.0, 548.8, 0.0],
            WHITE,
        ))
        .add(wall(
            [549.6, 0.0, 559.2],
            [0.0, 0.0, 559.2],
            [0.0, 548.8, 559.2],
            [556.0, 548.8, 559.2],
            WHITE,
        ))
        .add(wall(
            [552.8, 0.0, 0.0],
            [549.6, 0.0, 559.2],
            [556.0, 548.8, 559.2],
            [556.0, 548.8, 0.0],
            RED,
        ))
        .add(wall(
            [0.0, 0.0, 559.2],
            [0.0, 0.0, 0.0],
            [0.0, 548.8, 0.0],
            [0.0, 548.8, 559.2],
            GREEN,
        ))
        .add(block(
            [
                [130.0, 165.0, 65.0],
                [82.0, 165.0, 225.0],
                [240.0, 165.0, 272.0],
                [290.0, 165.0, 114.0],
            ],
            WHITE,
        ))
        .add(block(
            [
                [423.0, 330.0, 247.0],
                [265.0, 330.0, 296.0],
                [314.0, 330.0, 456.0],
                [472.0, 330.0, 406.0],
            ],
            WHITE,
        ))
        // Wound so the lamp faces down into the box
        .add(Mesh::quad(
            Vec3::new(343.0, 548.7, 227.0),
            Vec3::new(343.0, 548.7, 332.0),
            Vec3::new(213.0, 548.7, 332.0),
            Vec3::new(213.0, 548.7, 227.0),
            DiffuseLight::new(light_emission()),
        ));

    builder.build()
}

/// Camera in front of the open side of the box.
pub fn camera(width: u32, height: u32) -> Camera {
    let mut camera = Camera::new()
        .with_resolution(width, height)
        .with_position(
            Vec3::new(278.0, 273.0, -800.0),
            Vec3::new(278.0, 273.0, 0.0),
            Vec3::Y,
        )
        .with_fov(40.0);
    camera.initialize();
    camera
}

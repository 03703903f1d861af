use glam::{Vec2, Vec3, Vec4};
use instgrid_common::{FragmentInterpolants, Vertex};
use instgrid_layout::GridLayout;
use instgrid_shading::{InstanceTransformStage, OutputPolicy, gradient_color, shade_fragment};

#[test]
fn green_channel_strictly_increases_and_stays_in_unit_range() {
    for n in 1..=1000u32 {
        let mut previous = 0.0f32;
        for i in 0..n {
            let g = gradient_color(i, n).y;
            assert!(g > previous, "n={n} i={i} g={g} previous={previous}");
            assert!(g > 0.0 && g <= 1.0, "n={n} i={i} g={g}");
            previous = g;
        }
        assert_eq!(gradient_color(n - 1, n).y, 1.0, "n={n}");
    }
}

#[test]
fn red_and_blue_are_fixed() {
    for i in 0..32 {
        let c = gradient_color(i, 32);
        assert_eq!(c.x, 1.0);
        assert_eq!(c.z, 0.0);
    }
}

#[test]
fn vertex_then_fragment_for_every_instance() {
    let layout = GridLayout::new(25).unwrap();
    let stage = InstanceTransformStage::new(layout).with_policy(OutputPolicy::Untransformed);
    let v = Vertex::new(Vec3::ZERO, Vec3::ONE, Vec2::ZERO);

    for i in 0..25 {
        let out = stage.run(&v, i);
        let cell = layout.cell(i);
        assert_eq!(
            out.clip_position,
            Vec4::new(3.0 * cell.column as f32, 3.0 * cell.row as f32, 0.0, 1.0)
        );
        let rgba = shade_fragment(&out.interpolants);
        assert_eq!(rgba.w, 1.0);
        assert_eq!(rgba.truncate(), out.interpolants.color);
    }
}

#[test]
fn stage_is_deterministic_in_any_order() {
    let layout = GridLayout::new(50).unwrap();
    let stage = InstanceTransformStage::new(layout);
    let v = Vertex::new(Vec3::new(0.5, -0.5, 0.0), Vec3::X, Vec2::X);

    let forward: Vec<_> = (0..50).map(|i| stage.run(&v, i)).collect();
    let mut backward: Vec<_> = (0..50).rev().map(|i| stage.run(&v, i)).collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn fragment_of_interpolated_gradient() {
    let a = FragmentInterpolants {
        color: gradient_color(0, 4),
        tex_coord: Vec2::ZERO,
    };
    let b = FragmentInterpolants {
        color: gradient_color(3, 4),
        tex_coord: Vec2::ONE,
    };
    let mid = FragmentInterpolants::barycentric(&a, &b, &b, Vec3::new(0.5, 0.25, 0.25));
    let rgba = shade_fragment(&mid);
    assert!((rgba - Vec4::new(1.0, 0.625, 0.0, 1.0)).length() < 1e-6);
}

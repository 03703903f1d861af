use glam::Vec4;
use instgrid_common::FragmentInterpolants;

/// Final pixel color: the interpolated color, fully opaque.
pub fn shade_fragment(interpolants: &FragmentInterpolants) -> Vec4 {
    interpolants.color.extend(1.0)
}

/// WGSL source for the instanced grid draw.
///
/// Two vertex entry points share one interstage contract: `vs_transformed`
/// applies `proj * view * model`, `vs_untransformed` emits the grid-placed
/// position directly. `fs_main` serves both.
pub const GRID_SHADER: &str = r#"
struct CameraBlock {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
};

struct InstanceBlock {
    num_instances: u32,
    spacing: f32,
    placement: u32,
    color_source: u32,
};

struct PerDrawTransform {
    model: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraBlock;

@group(0) @binding(1)
var<uniform> instances: InstanceBlock;

@group(0) @binding(2)
var<uniform> per_draw: PerDrawTransform;

const PLACEMENT_STRIP: u32 = 1u;
const COLOR_SOURCE_VERTEX: u32 = 1u;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
    @location(2) tex_coord: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) tex_coord: vec2<f32>,
};

// ceil(sqrt(n)), nudged onto the exact integer answer.
fn grid_columns(n: u32) -> u32 {
    var columns = u32(ceil(sqrt(f32(n))));
    if (columns > 1u && (columns - 1u) * (columns - 1u) >= n) {
        columns = columns - 1u;
    }
    if (columns * columns < n) {
        columns = columns + 1u;
    }
    return columns;
}

fn instance_offset(index: u32) -> vec3<f32> {
    if (instances.placement == PLACEMENT_STRIP) {
        return vec3<f32>(instances.spacing * f32(index), 0.0, 0.0);
    }
    let columns = grid_columns(instances.num_instances);
    let row = index / columns;
    let column = index % columns;
    return vec3<f32>(instances.spacing * f32(column), instances.spacing * f32(row), 0.0);
}

fn instance_color(index: u32, vertex_color: vec3<f32>) -> vec3<f32> {
    if (instances.color_source == COLOR_SOURCE_VERTEX) {
        return vertex_color;
    }
    return vec3<f32>(1.0, (1.0 + f32(index)) / f32(instances.num_instances), 0.0);
}

@vertex
fn vs_transformed(
    vertex: VertexInput,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    let world = vertex.position + instance_offset(instance_index);

    var out: VertexOutput;
    out.clip_position = camera.proj * camera.view * per_draw.model * vec4<f32>(world, 1.0);
    out.color = instance_color(instance_index, vertex.color);
    out.tex_coord = vertex.tex_coord;
    return out;
}

@vertex
fn vs_untransformed(
    vertex: VertexInput,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    let world = vertex.position + instance_offset(instance_index);

    var out: VertexOutput;
    out.clip_position = vec4<f32>(world, 1.0);
    out.color = instance_color(instance_index, vertex.color);
    out.tex_coord = vertex.tex_coord;
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(input.color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse() -> naga::Module {
        naga::front::wgsl::parse_str(GRID_SHADER).unwrap()
    }

    #[test]
    fn shader_validates() {
        let module = parse();
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        );
        validator.validate(&module).unwrap();
    }

    #[test]
    fn entry_points_present() {
        let module = parse();
        let names: Vec<(&str, naga::ShaderStage)> = module
            .entry_points
            .iter()
            .map(|ep| (ep.name.as_str(), ep.stage))
            .collect();
        assert!(names.contains(&("vs_transformed", naga::ShaderStage::Vertex)));
        assert!(names.contains(&("vs_untransformed", naga::ShaderStage::Vertex)));
        assert!(names.contains(&("fs_main", naga::ShaderStage::Fragment)));
    }

    #[test]
    fn uniform_bindings_match_layout() {
        let module = parse();
        let mut bindings: Vec<(u32, &str)> = module
            .global_variables
            .iter()
            .filter_map(|(_, var)| {
                let binding = var.binding.as_ref()?;
                Some((binding.binding, var.name.as_deref()?))
            })
            .collect();
        bindings.sort();
        assert_eq!(
            bindings,
            vec![(0, "camera"), (1, "instances"), (2, "per_draw")]
        );
    }
}

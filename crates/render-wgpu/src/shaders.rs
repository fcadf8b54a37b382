/// WGSL shader for the lit cube.
pub const CUBE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // Two gold directional lights shining down and away from the viewer.
    let light_color = vec3<f32>(1.0, 0.843, 0.0) * 0.7;
    let to_light_a = -normalize(vec3<f32>(1.0, -1.0, -1.0));
    let to_light_b = -normalize(vec3<f32>(-1.0, -1.0, -1.0));
    let lambert = max(dot(in.world_normal, to_light_a), 0.0)
        + max(dot(in.world_normal, to_light_b), 0.0);
    return vec4<f32>(in.color.rgb * light_color * lambert, in.color.a);
}
"#;

/// WGSL shader for the floor lines.
pub const GRID_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct GridVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct GridOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_grid(vertex: GridVertex) -> GridOutput {
    var out: GridOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_grid(in: GridOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_present() {
        assert!(CUBE_SHADER.contains("fn vs_main"));
        assert!(CUBE_SHADER.contains("fn fs_main"));
        assert!(GRID_SHADER.contains("fn vs_grid"));
        assert!(GRID_SHADER.contains("fn fs_grid"));
    }

    #[test]
    fn cube_has_no_ambient_term() {
        assert!(CUBE_SHADER.contains("to_light_a"));
        assert!(CUBE_SHADER.contains("to_light_b"));
        assert!(!CUBE_SHADER.contains("ambient"));
    }
}

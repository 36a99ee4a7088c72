/// WGSL flat-color shader. Each instance carries its full MVP matrix and color.
pub const FLAT_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
};

struct InstanceInput {
    @location(1) mvp_0: vec4<f32>,
    @location(2) mvp_1: vec4<f32>,
    @location(3) mvp_2: vec4<f32>,
    @location(4) mvp_3: vec4<f32>,
    @location(5) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let mvp = mat4x4<f32>(
        instance.mvp_0,
        instance.mvp_1,
        instance.mvp_2,
        instance.mvp_3,
    );

    var out: VertexOutput;
    out.clip_position = mvp * vec4<f32>(vertex.position, 1.0);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

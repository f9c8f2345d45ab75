//! WGSL for the hero compositor.
//!
//! A single fullscreen pass samples the base image, the hidden image and
//! the mask, and mixes the hidden image in wherever the mask is set. Both
//! images are fitted with "cover" semantics: scaled to fill the window,
//! centered, cropped on the long axis.

use bytemuck::{Pod, Zeroable};

/// Uniform block of the compositor shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ComposeParams {
    pub surface_size: [f32; 2],
    pub base_size: [f32; 2],
    pub reveal_size: [f32; 2],
    /// Darkening applied over both images, 0 = none.
    pub overlay: f32,
    pub _padding: f32,
}

pub const COMPOSE_SOURCE: &str = r#"
struct Params {
    surface_size: vec2<f32>,
    base_size: vec2<f32>,
    reveal_size: vec2<f32>,
    overlay: f32,
    _padding: f32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@group(0) @binding(0)
var base_tex: texture_2d<f32>;
@group(0) @binding(1)
var reveal_tex: texture_2d<f32>;
@group(0) @binding(2)
var mask_tex: texture_2d<f32>;
@group(0) @binding(3)
var image_sampler: sampler;
@group(0) @binding(4)
var<uniform> params: Params;

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var positions = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(3.0, -1.0),
        vec2<f32>(-1.0, 3.0),
    );
    var uvs = array<vec2<f32>, 3>(
        vec2<f32>(0.0, 1.0),
        vec2<f32>(2.0, 1.0),
        vec2<f32>(0.0, -1.0),
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(positions[vertex_index], 0.0, 1.0);
    out.uv = uvs[vertex_index];
    return out;
}

fn cover_uv(uv: vec2<f32>, image_size: vec2<f32>) -> vec2<f32> {
    let surface_aspect = params.surface_size.x / max(params.surface_size.y, 1.0);
    let image_aspect = image_size.x / max(image_size.y, 1.0);
    var scale = vec2<f32>(1.0, 1.0);
    if image_aspect > surface_aspect {
        scale.x = surface_aspect / image_aspect;
    } else {
        scale.y = image_aspect / surface_aspect;
    }
    return (uv - vec2<f32>(0.5, 0.5)) * scale + vec2<f32>(0.5, 0.5);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(base_tex, image_sampler, cover_uv(in.uv, params.base_size));
    let reveal = textureSample(reveal_tex, image_sampler, cover_uv(in.uv, params.reveal_size));
    let mask = textureSample(mask_tex, image_sampler, in.uv).r;

    let color = mix(base.rgb, reveal.rgb, mask) * (1.0 - params.overlay);
    return vec4<f32>(color, 1.0);
}
"#;

//! WGSL shader sources for the wgpu backend.
//!
//! [`HUE_REMAP`] mirrors `hueshift_core::color` and `hueshift_core::arc`
//! operation for operation, in f32. Any change to the kernel must be made in
//! both places; the parity tests in `hueshift-tests` catch drift.

/// Uniform block layout, 16 bytes.
///
/// ```text
/// offset 0   start   f32
/// offset 4   end     f32
/// offset 8   output  f32
/// offset 12  _pad    f32
/// ```
pub const UNIFORM_SIZE: u64 = 16;

/// Hue remap: full-screen quad vertex stage + per-fragment remap.
pub const HUE_REMAP: &str = r#"
struct Params {
    start: f32,
    end: f32,
    output: f32,
    _pad: f32,
}

@group(0) @binding(0) var src: texture_2d<f32>;
@group(0) @binding(1) var<uniform> params: Params;

@vertex
fn vs_main(@builtin(vertex_index) vi: u32) -> @builtin(position) vec4<f32> {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );
    return vec4<f32>(corners[vi], 0.0, 1.0);
}

// floor(x + 0.5): ties toward +inf, never to even
fn round_half_up(x: f32) -> f32 {
    return floor(x + 0.5);
}

fn in_range(h: f32, start: f32, end: f32) -> bool {
    if start <= end {
        return start <= h && h <= end;
    }
    return h >= start || h <= end;
}

// rgb in [0,1] -> (hue degrees [0,360), s percent, l percent), rounded
fn rgb_to_hsl(c: vec3<f32>) -> vec3<f32> {
    let cmin = min(min(c.r, c.g), c.b);
    let cmax = max(max(c.r, c.g), c.b);
    let delta = cmax - cmin;

    var sector = 0.0;
    if delta == 0.0 {
        sector = 0.0;
    } else if cmax == c.r {
        // WGSL % on floats truncates, like the CPU kernel
        sector = ((c.g - c.b) / delta) % 6.0;
    } else if cmax == c.g {
        sector = (c.b - c.r) / delta + 2.0;
    } else {
        sector = (c.r - c.g) / delta + 4.0;
    }

    var h = round_half_up(sector * 60.0);
    if h < 0.0 {
        h = h + 360.0;
    }

    let l = (cmax + cmin) / 2.0;
    var s = 0.0;
    if delta != 0.0 {
        s = delta / (1.0 - abs(2.0 * l - 1.0));
    }

    return vec3<f32>(
        h,
        round_half_up(s * 100.0 * 10.0) / 10.0,
        round_half_up(l * 100.0 * 10.0) / 10.0,
    );
}

fn to_channel(v: f32) -> f32 {
    return clamp(round_half_up(v * 255.0), 0.0, 255.0) / 255.0;
}

fn hsl_to_rgb(hsl: vec3<f32>) -> vec3<f32> {
    var h = hsl.x - 360.0 * floor(hsl.x / 360.0);
    if h >= 360.0 {
        h = 0.0;
    }
    let s = hsl.y / 100.0;
    let l = hsl.z / 100.0;

    let c = (1.0 - abs(2.0 * l - 1.0)) * s;
    let x = c * (1.0 - abs((h / 60.0) % 2.0 - 1.0));
    let m = l - c / 2.0;

    var rgb = vec3<f32>(0.0);
    if h < 60.0 {
        rgb = vec3<f32>(c, x, 0.0);
    } else if h < 120.0 {
        rgb = vec3<f32>(x, c, 0.0);
    } else if h < 180.0 {
        rgb = vec3<f32>(0.0, c, x);
    } else if h < 240.0 {
        rgb = vec3<f32>(0.0, x, c);
    } else if h < 300.0 {
        rgb = vec3<f32>(x, 0.0, c);
    } else {
        rgb = vec3<f32>(c, 0.0, x);
    }

    return vec3<f32>(to_channel(rgb.r + m), to_channel(rgb.g + m), to_channel(rgb.b + m));
}

@fragment
fn fs_main(@builtin(position) pos: vec4<f32>) -> @location(0) vec4<f32> {
    let texel = textureLoad(src, vec2<i32>(floor(pos.xy)), 0);
    // snap back to exact byte values before converting
    let rgb = round(texel.rgb * 255.0) / 255.0;

    let hsl = rgb_to_hsl(rgb);
    if !in_range(hsl.x, params.start, params.end) {
        return texel;
    }
    return vec4<f32>(hsl_to_rgb(vec3<f32>(params.output, hsl.y, hsl.z)), texel.a);
}
"#;

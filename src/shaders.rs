//! Shader sources for every pass, each paired with a host-side evaluation of
//! its fragment stage so the passes can also run without a GPU.

use glam::{Vec2, Vec4};

use crate::kernel::Uniforms;

pub const VERTEX_SHADER_SOURCE: &str = r#"#version 300 es
	precision highp float;
	in vec2 position;
	in vec2 uv;
	out vec2 vUv;
	uniform mat4 matrix;
	void main() {
		vUv = uv;
		gl_Position = matrix * vec4(position, 0.0, 1.0);
	}"#;

const CLEAR_SHADER_SOURCE: &str = r#"#version 300 es
	precision highp float;
	out vec4 fragment;
	void main() {
		fragment = vec4(0.0, 0.0, 0.0, 1.0);
	}"#;

const HEAT_SHADER_SOURCE: &str = r#"#version 300 es
	precision highp float;
	in vec2 vUv;
	uniform vec2 mouse;
	uniform float amplitude;
	uniform float falloff;
	uniform sampler2D tex;
	out vec4 fragment;
	void main() {
		float dist = length(mouse - vUv);
		float previous = texture(tex, vUv).r;
		float heat = amplitude * exp(-dist * falloff);
		fragment = vec4(max(heat, previous), vec2(0.0), 1.0);
	}"#;

const INTEGRATOR_SHADER_SOURCE: &str = r#"#version 300 es
	precision highp float;
	in vec2 vUv;
	uniform sampler2D tex;
	uniform float n;
	uniform float diffusivity;
	uniform float uTime;
	out vec4 fragment;
	void main() {
		vec4 center = texture(tex, vUv);
		vec4 left  = texture(tex, vUv - vec2(1.0 / n, 0.0));
		vec4 right = texture(tex, vUv + vec2(1.0 / n, 0.0));
		vec4 up    = texture(tex, vUv + vec2(0.0, 1.0 / n));
		vec4 down  = texture(tex, vUv - vec2(0.0, 1.0 / n));

		vec4 laplacian = (left + right + up + down - 4.0 * center) * diffusivity;
		fragment = center + laplacian * uTime;
	}"#;

const DISPLAY_SHADER_SOURCE: &str = r#"#version 300 es
	precision highp float;
	in vec2 vUv;
	uniform sampler2D tex;
	out vec4 fragment;
	void main() {
		fragment = texture(tex, vUv);
	}"#;

/// Anything a fragment stage can read texels from.
pub trait Sampler {
	/// Filtered lookup at normalised texture coordinates, like GLSL `texture()`.
	fn sample(&self, uv : Vec2) -> Vec4;
}

/// Inputs of one fragment invocation.
pub struct FragmentContext<'a> {
	pub uv : Vec2,
	pub uniforms : &'a Uniforms,
	pub source : Option<&'a dyn Sampler>,
}

impl<'a> FragmentContext<'a> {
	/// Unbound samplers read as transparent black.
	pub fn texture(&self, uv : Vec2) -> Vec4 {
		self.source.map_or(Vec4::ZERO, |source| source.sample(uv))
	}
}

#[derive(Clone, Copy)]
pub struct FragmentShader {
	pub name : &'static str,
	pub source : &'static str,
	pub evaluate : fn(&FragmentContext<'_>) -> Vec4,
}

impl std::fmt::Debug for FragmentShader {
	fn fmt(&self, f : &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FragmentShader").field("name", &self.name).finish()
	}
}

fn clear(_ : &FragmentContext<'_>) -> Vec4 {
	Vec4::new(0.0, 0.0, 0.0, 1.0)
}

fn heat(context : &FragmentContext<'_>) -> Vec4 {
	let mouse = Vec2::from(context.uniforms.vec2("mouse"));
	let dist = (mouse - context.uv).length();
	let previous = context.texture(context.uv).x;
	let heat = context.uniforms.float("amplitude") * (-dist * context.uniforms.float("falloff")).exp();
	Vec4::new(heat.max(previous), 0.0, 0.0, 1.0)
}

fn integrator(context : &FragmentContext<'_>) -> Vec4 {
	let step = 1.0 / context.uniforms.float("n");
	let uv = context.uv;
	let center = context.texture(uv);
	let left   = context.texture(uv - Vec2::new(step, 0.0));
	let right  = context.texture(uv + Vec2::new(step, 0.0));
	let up     = context.texture(uv + Vec2::new(0.0, step));
	let down   = context.texture(uv - Vec2::new(0.0, step));

	let laplacian = (left + right + up + down - 4.0 * center) * context.uniforms.float("diffusivity");
	center + laplacian * context.uniforms.float("uTime")
}

fn display(context : &FragmentContext<'_>) -> Vec4 {
	context.texture(context.uv)
}

/// Resets the field to zero.
pub const CLEAR: FragmentShader = FragmentShader {name: "clear", source: CLEAR_SHADER_SOURCE, evaluate: clear};

/// Stamps a Gaussian-like bump at `mouse`, never lowering existing heat.
pub const HEAT: FragmentShader = FragmentShader {name: "heat", source: HEAT_SHADER_SOURCE, evaluate: heat};

/// One explicit Euler step of the heat equation on the five-point stencil.
pub const INTEGRATOR: FragmentShader = FragmentShader {name: "integrator", source: INTEGRATOR_SHADER_SOURCE, evaluate: integrator};

pub const DISPLAY: FragmentShader = FragmentShader {name: "display", source: DISPLAY_SHADER_SOURCE, evaluate: display};

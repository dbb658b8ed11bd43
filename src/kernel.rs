use crate::camera::QuadScene;
use crate::error::Result;
use crate::render::Renderer;
use crate::shaders::FragmentShader;

/// Name of the uniform that always carries the previous pass's output.
pub const SOURCE_UNIFORM: &str = "tex";

/// Which buffer of a [`RenderTargetPair`](crate::targets::RenderTargetPair) a
/// texture uniform refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSlot(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
	Float(f32),
	Vec2([f32; 2]),
	Texture(TextureSlot),
}

/// A small ordered bag of named shader parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Uniforms {
	values : Vec<(&'static str, UniformValue)>,
}

impl Uniforms {
	pub fn new() -> Uniforms {
		Uniforms::default()
	}

	pub fn with(mut self, name : &'static str, value : UniformValue) -> Uniforms {
		self.set(name, value);
		self
	}

	pub fn set(&mut self, name : &'static str, value : UniformValue) {
		match self.values.iter_mut().find(|(key, _)| *key == name) {
			Some(entry) => entry.1 = value,
			None => self.values.push((name, value)),
		}
	}

	pub fn get(&self, name : &str) -> Option<UniformValue> {
		self.values.iter().find(|(key, _)| *key == name).map(|(_, value)| *value)
	}

	/// Reads a float parameter; unset or mistyped parameters read as zero,
	/// the way GL treats a uniform nobody assigned.
	pub fn float(&self, name : &str) -> f32 {
		match self.get(name) {
			Some(UniformValue::Float(value)) => value,
			_ => 0.0,
		}
	}

	pub fn vec2(&self, name : &str) -> [f32; 2] {
		match self.get(name) {
			Some(UniformValue::Vec2(value)) => value,
			_ => [0.0, 0.0],
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (&'static str, UniformValue)> + '_ {
		self.values.iter().copied()
	}
}

/// One full-screen pass: a compiled fragment stage, its parameters, and an
/// isolated scene whose quad exactly covers the destination.
pub struct Kernel<P> {
	name     : &'static str,
	program  : P,
	uniforms : Uniforms,
	scene    : QuadScene,
}

impl<P> Kernel<P> {
	/// Compiles `shader` and frames its quad with `scene`.
	///
	/// The reserved source uniform is always present; anything in `extra`
	/// is added on top of it.
	pub fn new<R>(renderer : &mut R, shader : &FragmentShader, extra : Uniforms, scene : QuadScene) -> Result<Kernel<P>>
		where R : Renderer<Program = P>
	{
		let program = renderer.compile(shader)?;
		let mut uniforms = Uniforms::new().with(SOURCE_UNIFORM, UniformValue::Texture(TextureSlot(0)));
		for (name, value) in extra.iter() {
			uniforms.set(name, value);
		}
		log::debug!("compiled kernel `{}` ({}x{} quad)", shader.name, scene.quad.width, scene.quad.height);
		Ok(Kernel {name: shader.name, program, uniforms, scene})
	}

	/// Points the source uniform at `slot`. Nothing is drawn until the
	/// kernel is executed.
	pub fn bind_source(&mut self, slot : TextureSlot) {
		self.uniforms.set(SOURCE_UNIFORM, UniformValue::Texture(slot));
	}

	pub fn set_uniform(&mut self, name : &'static str, value : UniformValue) {
		self.uniforms.set(name, value);
	}

	pub fn source(&self) -> Option<TextureSlot> {
		match self.uniforms.get(SOURCE_UNIFORM) {
			Some(UniformValue::Texture(slot)) => Some(slot),
			_ => None,
		}
	}

	pub fn name(&self) -> &'static str { self.name }
	pub fn program(&self) -> &P { &self.program }
	pub fn uniforms(&self) -> &Uniforms { &self.uniforms }
	pub fn scene(&self) -> &QuadScene { &self.scene }
}

use crate::error::Result;
use crate::kernel::Kernel;
use crate::shaders::FragmentShader;

#[cfg(feature = "window")]
pub mod gl;
pub mod software;

/// Where a pass ends up.
pub enum Destination<'a, T> {
	Screen,
	Target(&'a mut T),
}

/// The framebuffer a renderer currently draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
	Screen,
	Offscreen,
}

/// The drawing capabilities the simulation needs from a graphics backend.
pub trait Renderer {
	type Target;
	type Program;

	/// Allocates a zeroed RGBA float buffer usable both as a destination and
	/// as a sampled texture.
	fn create_target(&mut self, width : u32, height : u32) -> Result<Self::Target>;

	/// Links the shared full-screen vertex stage with `shader`.
	fn compile(&mut self, shader : &FragmentShader) -> Result<Self::Program>;

	/// Clears `destination` and draws `kernel`'s scene into it. Every
	/// texture uniform of the kernel samples `source`.
	fn render(&mut self, kernel : &Kernel<Self::Program>, source : Option<&Self::Target>,
		destination : Destination<'_, Self::Target>) -> Result<()>;

	fn restore_default_target(&mut self);

	fn binding(&self) -> Binding;
}

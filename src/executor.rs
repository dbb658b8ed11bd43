use crate::error::Result;
use crate::kernel::Kernel;
use crate::render::{Destination, Renderer};
use crate::targets::RenderTargetPair;

/// Runs one simulation step: draws `kernel` into the write buffer while it
/// samples the read buffer, then swaps the roles.
///
/// Afterwards `pair.read()` holds the freshly computed state and the
/// on-screen framebuffer is current again.
pub fn execute<R : Renderer>(renderer : &mut R, kernel : &mut Kernel<R::Program>, pair : &mut RenderTargetPair<R::Target>) -> Result<()> {
	kernel.bind_source(pair.read_slot());
	{
		let (read, write) = pair.split_mut();
		renderer.render(kernel, Some(read), Destination::Target(write))?;
	}
	pair.swap();
	renderer.restore_default_target();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::camera::QuadScene;
	use crate::config::KERNEL_CAMERA;
	use crate::kernel::{UniformValue, Uniforms};
	use crate::render::software::{Field, SoftwareRenderer};
	use crate::render::Binding;
	use crate::shaders;
	use glam::Vec4;

	#[test]
	fn execute_writes_then_swaps() {
		let mut renderer = SoftwareRenderer::new((4, 4));
		let mut pair = RenderTargetPair::new(Field::filled(8, 8, Vec4::splat(0.5)), Field::new(8, 8));
		let scene = QuadScene::fullscreen(&KERNEL_CAMERA, 1.0, 20.0);
		let uniforms = Uniforms::new()
			.with("n", UniformValue::Float(8.0))
			.with("diffusivity", UniformValue::Float(25.0))
			.with("uTime", UniformValue::Float(0.01));
		let mut kernel = Kernel::new(&mut renderer, &shaders::INTEGRATOR, uniforms, scene).unwrap();

		let previous_read = pair.read_slot();
		execute(&mut renderer, &mut kernel, &mut pair).unwrap();

		assert_eq!(kernel.source(), Some(previous_read));
		assert_eq!(pair.write_slot(), previous_read);
		assert_eq!(renderer.binding(), Binding::Screen);
		for texel in pair.read().texels() {
			assert!((texel.x - 0.5).abs() < 1e-6);
		}
	}

	#[test]
	fn clear_pass_resets_the_field() {
		let mut renderer = SoftwareRenderer::new((4, 4));
		let mut pair = RenderTargetPair::new(Field::filled(4, 4, Vec4::splat(9.0)), Field::filled(4, 4, Vec4::splat(9.0)));
		let scene = QuadScene::fullscreen(&KERNEL_CAMERA, 1.0, 20.0);
		let mut kernel = Kernel::new(&mut renderer, &shaders::CLEAR, Uniforms::new(), scene).unwrap();
		execute(&mut renderer, &mut kernel, &mut pair).unwrap();
		assert!(pair.read().texels().iter().all(|texel| *texel == Vec4::new(0.0, 0.0, 0.0, 1.0)));
		assert_eq!(pair.write().get(0, 0), Vec4::splat(9.0));
	}
}

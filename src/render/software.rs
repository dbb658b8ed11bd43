//! A headless reference backend that evaluates every pass on the CPU.

use glam::{Vec2, Vec4};

use crate::config::check_target_size;
use crate::error::Result;
use crate::kernel::Kernel;
use crate::render::{Binding, Destination, Renderer};
use crate::shaders::{FragmentContext, FragmentShader, Sampler};

/// A grid of RGBA texels. Row 0 is the bottom row, as in GL.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
	width  : u32,
	height : u32,
	texels : Vec<Vec4>,
}

impl Field {
	pub fn new(width : u32, height : u32) -> Field {
		Field::filled(width, height, Vec4::ZERO)
	}

	pub fn filled(width : u32, height : u32, value : Vec4) -> Field {
		Field {width, height, texels: vec![value; (width * height) as usize]}
	}

	pub fn width(&self) -> u32 { self.width }
	pub fn height(&self) -> u32 { self.height }

	fn index(&self, x : u32, y : u32) -> usize {
		(y * self.width + x) as usize
	}

	pub fn get(&self, x : u32, y : u32) -> Vec4 {
		self.texels[self.index(x, y)]
	}

	pub fn set(&mut self, x : u32, y : u32, value : Vec4) {
		let index = self.index(x, y);
		self.texels[index] = value;
	}

	pub fn texels(&self) -> &[Vec4] {
		&self.texels
	}

	pub fn texels_mut(&mut self) -> &mut [Vec4] {
		&mut self.texels
	}

	/// Sum of one channel over the whole field, accumulated in double precision.
	pub fn channel_sum(&self, channel : usize) -> f64 {
		self.texels.iter().map(|texel| texel[channel] as f64).sum()
	}

	/// Normalised coordinates of the centre of texel `(x, y)`.
	pub fn texel_center(&self, x : u32, y : u32) -> Vec2 {
		Vec2::new((x as f32 + 0.5) / self.width as f32, (y as f32 + 0.5) / self.height as f32)
	}

	fn clamped(&self, x : i64, y : i64) -> Vec4 {
		let x = x.max(0).min(self.width as i64 - 1) as u32;
		let y = y.max(0).min(self.height as i64 - 1) as u32;
		self.get(x, y)
	}
}

/// Bilinear filtering with clamp-to-edge wrapping.
impl Sampler for Field {
	fn sample(&self, uv : Vec2) -> Vec4 {
		let x = uv.x * self.width as f32 - 0.5;
		let y = uv.y * self.height as f32 - 0.5;
		let (x0, y0) = (x.floor(), y.floor());
		let (fx, fy) = (x - x0, y - y0);
		let (x0, y0) = (x0 as i64, y0 as i64);

		let bottom = self.clamped(x0, y0).lerp(self.clamped(x0 + 1, y0), fx);
		let top = self.clamped(x0, y0 + 1).lerp(self.clamped(x0 + 1, y0 + 1), fx);
		bottom.lerp(top, fy)
	}
}

pub struct SoftwareRenderer {
	screen : Field,
	binding : Binding,
	frames_presented : u64,
}

impl SoftwareRenderer {
	pub fn new(viewport : (u32, u32)) -> SoftwareRenderer {
		SoftwareRenderer {
			screen: Field::new(viewport.0, viewport.1),
			binding: Binding::Screen,
			frames_presented: 0,
		}
	}

	/// The last image drawn to the screen.
	pub fn screen(&self) -> &Field {
		&self.screen
	}

	pub fn frames_presented(&self) -> u64 {
		self.frames_presented
	}
}

/// Fills every texel whose centre falls inside the projected quad with the
/// fragment stage's output, and clears the rest.
fn rasterize(destination : &mut Field, kernel : &Kernel<FragmentShader>, source : Option<&Field>) {
	let matrix = kernel.scene().model_view_projection();
	let project = |x : f32, y : f32| {
		let clip = matrix * Vec4::new(x, y, 0.0, 1.0);
		if clip.w > 0.0 {Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))} else {None}
	};
	let (origin, far_corner) = match (project(-0.5, -0.5), project(0.5, 0.5)) {
		(Some(origin), Some(far_corner)) => (origin, far_corner),
		_ => {
			destination.texels_mut().iter_mut().for_each(|texel| *texel = Vec4::ZERO);
			return;
		}
	};
	let extent = far_corner - origin;
	let sampler = source.map(|field| field as &dyn Sampler);
	let evaluate = kernel.program().evaluate;

	for y in 0..destination.height() {
		for x in 0..destination.width() {
			let ndc = destination.texel_center(x, y) * 2.0 - Vec2::ONE;
			let uv = (ndc - origin) / extent;
			let inside = uv.x >= 0.0 && uv.x <= 1.0 && uv.y >= 0.0 && uv.y <= 1.0;
			let value = if inside {
				evaluate(&FragmentContext {uv, uniforms: kernel.uniforms(), source: sampler})
			} else {
				Vec4::ZERO
			};
			destination.set(x, y, value);
		}
	}
}

impl Renderer for SoftwareRenderer {
	type Target = Field;
	type Program = FragmentShader;

	fn create_target(&mut self, width : u32, height : u32) -> Result<Field> {
		check_target_size(width, height)?;
		Ok(Field::new(width, height))
	}

	fn compile(&mut self, shader : &FragmentShader) -> Result<FragmentShader> {
		Ok(*shader)
	}

	fn render(&mut self, kernel : &Kernel<FragmentShader>, source : Option<&Field>,
		destination : Destination<'_, Field>) -> Result<()>
	{
		match destination {
			Destination::Screen => {
				self.binding = Binding::Screen;
				self.frames_presented += 1;
				rasterize(&mut self.screen, kernel, source);
			}
			Destination::Target(target) => {
				self.binding = Binding::Offscreen;
				rasterize(target, kernel, source);
			}
		}
		Ok(())
	}

	fn restore_default_target(&mut self) {
		self.binding = Binding::Screen;
	}

	fn binding(&self) -> Binding {
		self.binding
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::camera::{PerspectiveCamera, Quad, QuadScene};
	use crate::config::{SimulationConfig, DISPLAY_CAMERA};
	use crate::error::Error;
	use crate::kernel::Uniforms;
	use crate::shaders;

	#[test]
	fn zero_sized_targets_fail_fast() {
		let mut renderer = SoftwareRenderer::new((8, 8));
		assert!(matches!(renderer.create_target(0, 4), Err(Error::InvalidTargetSize {width: 0, height: 4})));
	}

	#[test]
	fn sampling_at_texel_centres_is_exact() {
		let mut field = Field::new(4, 2);
		field.set(2, 1, Vec4::splat(3.0));
		assert_eq!(field.sample(field.texel_center(2, 1)), Vec4::splat(3.0));
		assert_eq!(field.sample(field.texel_center(1, 1)), Vec4::ZERO);
	}

	#[test]
	fn sampling_interpolates_and_clamps() {
		let mut field = Field::new(2, 1);
		field.set(1, 0, Vec4::splat(1.0));
		assert!((field.sample(Vec2::new(0.5, 0.5)).x - 0.5).abs() < 1e-6);
		assert_eq!(field.sample(Vec2::new(2.0, 0.5)), Vec4::splat(1.0));
		assert_eq!(field.sample(Vec2::new(-1.0, 0.5)), Vec4::ZERO);
	}

	#[test]
	fn fullscreen_kernel_covers_every_texel() {
		let config = SimulationConfig::default();
		let mut renderer = SoftwareRenderer::new((8, 8));
		let scene = QuadScene::fullscreen(&config.kernel_camera, 2.0, 20.0);
		let kernel = Kernel::new(&mut renderer, &shaders::CLEAR, Uniforms::new(), scene).unwrap();
		let mut target = renderer.create_target(16, 8).unwrap();
		renderer.render(&kernel, None, Destination::Target(&mut target)).unwrap();

		assert_eq!(renderer.binding(), Binding::Offscreen);
		assert!(target.texels().iter().all(|texel| *texel == Vec4::new(0.0, 0.0, 0.0, 1.0)));
		renderer.restore_default_target();
		assert_eq!(renderer.binding(), Binding::Screen);
	}

	#[test]
	fn distant_quad_leaves_a_cleared_border() {
		let mut renderer = SoftwareRenderer::new((32, 32));
		let mut camera = PerspectiveCamera::new(&DISPLAY_CAMERA, 1.0);
		camera.position.z = 20.0;
		let scene = QuadScene {quad: Quad {width: 15.0, height: 15.0}, camera};
		let kernel = Kernel::new(&mut renderer, &shaders::DISPLAY, Uniforms::new(), scene).unwrap();
		let source = Field::filled(4, 4, Vec4::ONE);
		renderer.render(&kernel, Some(&source), Destination::Screen).unwrap();

		let screen = renderer.screen();
		assert_eq!(renderer.frames_presented(), 1);
		assert_eq!(screen.get(0, 0), Vec4::ZERO);
		assert_eq!(screen.get(16, 16), Vec4::ONE);
	}
}

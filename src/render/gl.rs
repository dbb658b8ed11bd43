//! OpenGL ES 3.0 backend on top of glium and an SDL2 window.

use glium::{texture, Surface};
use glium::uniforms::{MagnifySamplerFilter, MinifySamplerFilter, SamplerBehavior, SamplerWrapFunction};
use glium_sdl2::Display;

use crate::config::check_target_size;
use crate::error::{Error, Result};
use crate::kernel::{Kernel, UniformValue, Uniforms};
use crate::render::{Binding, Destination, Renderer};
use crate::shaders::{FragmentShader, VERTEX_SHADER_SOURCE};

#[derive(Copy, Clone)]
struct Vertex {
	position: [f32; 2],
	uv: [f32; 2]
}

implement_vertex!(Vertex, position, uv);

fn empty_data(size : (u32, u32)) -> texture::RawImage2d<'static, f32>
{
	let pixels : Vec<f32> = vec![0.0; (size.0 * size.1 * 4) as usize];
	texture::RawImage2d::from_raw_rgba(pixels, size)
}

fn boundary_sampler() -> SamplerBehavior {
	SamplerBehavior {
		wrap_function: (SamplerWrapFunction::Clamp, SamplerWrapFunction::Clamp, SamplerWrapFunction::Clamp),
		minify_filter: MinifySamplerFilter::Linear,
		magnify_filter: MagnifySamplerFilter::Linear,
		.. Default::default()
	}
}

/// Feeds a kernel's parameter bag to glium, resolving every texture
/// parameter to the pass's source texture.
struct PassUniforms<'a> {
	matrix   : [[f32; 4]; 4],
	values   : &'a Uniforms,
	source   : Option<&'a texture::Texture2d>,
}

impl<'a> glium::uniforms::Uniforms for PassUniforms<'a> {
	fn visit_values<'b, F : FnMut(&str, glium::uniforms::UniformValue<'b>)>(&'b self, mut visit : F) {
		use glium::uniforms::UniformValue as Gl;

		visit("matrix", Gl::Mat4(self.matrix));
		for (name, value) in self.values.iter() {
			match value {
				UniformValue::Float(value) => visit(name, Gl::Float(value)),
				UniformValue::Vec2(value) => visit(name, Gl::Vec2(value)),
				UniformValue::Texture(_) => {
					if let Some(texture) = self.source {
						visit(name, Gl::Texture2d(texture, Some(boundary_sampler())));
					}
				}
			}
		}
	}
}

pub struct GliumRenderer {
	display       : Display,
	vertex_buffer : glium::VertexBuffer<Vertex>,
	index_buffer  : glium::IndexBuffer<u16>,
	binding       : Binding,
}

impl GliumRenderer {
	pub fn new(display : Display) -> Result<GliumRenderer> {
		// Unit quad; kernels scale it through their model matrix.
		let vertices = vec![
			Vertex{position: [-0.5, -0.5], uv: [0.0, 0.0]},
			Vertex{position: [ 0.5, -0.5], uv: [1.0, 0.0]},
			Vertex{position: [ 0.5,  0.5], uv: [1.0, 1.0]},
			Vertex{position: [-0.5,  0.5], uv: [0.0, 1.0]}];

		let vertex_buffer = glium::VertexBuffer::new(&display, &vertices)
			.map_err(|e| Error::Buffer(format!("{:?}", e)))?;
		let index_buffer = glium::IndexBuffer::new(&display, glium::index::PrimitiveType::TriangleFan, &[0u16, 1, 2, 3])
			.map_err(|e| Error::Buffer(format!("{:?}", e)))?;

		Ok(GliumRenderer {display, vertex_buffer, index_buffer, binding: Binding::Screen})
	}
}

impl Renderer for GliumRenderer {
	type Target = texture::Texture2d;
	type Program = glium::Program;

	fn create_target(&mut self, width : u32, height : u32) -> Result<texture::Texture2d> {
		check_target_size(width, height)?;
		texture::Texture2d::with_format(&self.display, empty_data((width, height)),
			texture::UncompressedFloatFormat::F32F32F32F32, texture::MipmapsOption::NoMipmap)
			.map_err(|e| Error::TargetCreation(format!("{:?}", e)))
	}

	fn compile(&mut self, shader : &FragmentShader) -> Result<glium::Program> {
		glium::Program::from_source(&self.display, VERTEX_SHADER_SOURCE, shader.source, None)
			.map_err(|e| Error::ShaderCompile {kernel: shader.name, message: format!("{:?}", e)})
	}

	fn render(&mut self, kernel : &Kernel<glium::Program>, source : Option<&texture::Texture2d>,
		destination : Destination<'_, texture::Texture2d>) -> Result<()>
	{
		let uniforms = PassUniforms {
			matrix: kernel.scene().model_view_projection().to_cols_array_2d(),
			values: kernel.uniforms(),
			source,
		};

		match destination {
			Destination::Target(target) => {
				self.binding = Binding::Offscreen;
				let mut surface = target.as_surface();
				surface.clear_color(0.0, 0.0, 0.0, 0.0);
				let drawn = surface.draw(&self.vertex_buffer, &self.index_buffer, kernel.program(), &uniforms, &Default::default());
				drawn.map_err(|e| Error::Draw(format!("{:?}", e)))
			}
			Destination::Screen => {
				self.binding = Binding::Screen;
				let mut frame = self.display.draw();
				frame.clear_color(0.0, 0.0, 0.0, 0.0);
				// The frame has to be finished even when drawing failed.
				let drawn = frame.draw(&self.vertex_buffer, &self.index_buffer, kernel.program(), &uniforms, &Default::default());
				frame.finish().map_err(|e| Error::Draw(format!("{:?}", e)))?;
				drawn.map_err(|e| Error::Draw(format!("{:?}", e)))
			}
		}
	}

	/// glium binds framebuffer objects per draw call, so the default
	/// framebuffer is already current once a texture surface goes away.
	fn restore_default_target(&mut self) {
		self.binding = Binding::Screen;
	}

	fn binding(&self) -> Binding {
		self.binding
	}
}

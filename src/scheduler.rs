use glam::Vec3;

use crate::camera::{PerspectiveCamera, Quad, QuadScene};
use crate::config::{SimulationConfig, DISPLAY_CAMERA_DISTANCE, KERNEL_PLANE_WIDTH};
use crate::error::Result;
use crate::executor::execute;
use crate::input::{InputEvent, InteractionState, Key};
use crate::kernel::{Kernel, UniformValue, Uniforms};
use crate::render::{Destination, Renderer};
use crate::shaders;
use crate::targets::RenderTargetPair;

/// Elapsed simulation time, advanced by a fixed step every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
	elapsed : f32,
	step : f32,
}

impl SimulationClock {
	/// The clock starts one step in.
	pub fn new(step : f32) -> SimulationClock {
		SimulationClock {elapsed: step, step}
	}

	pub fn advance(&mut self) {
		self.elapsed += self.step;
	}

	pub fn elapsed(&self) -> f32 { self.elapsed }
	pub fn step(&self) -> f32 { self.step }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
	pub frame : u64,
	pub heated : bool,
	pub integrated : bool,
}

/// Drives the simulation once per display refresh.
pub struct FrameScheduler<R : Renderer> {
	pair        : RenderTargetPair<R::Target>,
	heat        : Kernel<R::Program>,
	integrator  : Kernel<R::Program>,
	display     : Kernel<R::Program>,
	clock       : SimulationClock,
	interaction : InteractionState,
	running     : bool,
	viewport    : (u32, u32),
	frame       : u64,
}

impl<R : Renderer> FrameScheduler<R> {
	/// Allocates both targets, compiles every kernel and zeroes the field.
	pub fn new(renderer : &mut R, config : &SimulationConfig) -> Result<FrameScheduler<R>> {
		config.validate()?;
		let (width, height) = config.target_size();
		log::info!("allocating two {}x{} render targets", width, height);
		let mut pair = RenderTargetPair::new(
			renderer.create_target(width, height)?,
			renderer.create_target(width, height)?);

		let kernel_scene = QuadScene::fullscreen(&config.kernel_camera, config.target_aspect(), KERNEL_PLANE_WIDTH);

		let mut clear = Kernel::new(renderer, &shaders::CLEAR, Uniforms::new(), kernel_scene)?;
		let heat = Kernel::new(renderer, &shaders::HEAT,
			Uniforms::new()
				.with("mouse", UniformValue::Vec2([0.0, 0.0]))
				.with("amplitude", UniformValue::Float(config.heat_amplitude))
				.with("falloff", UniformValue::Float(config.heat_falloff)),
			kernel_scene)?;
		let integrator = Kernel::new(renderer, &shaders::INTEGRATOR,
			Uniforms::new()
				.with("n", UniformValue::Float(config.grid_resolution))
				.with("diffusivity", UniformValue::Float(config.diffusivity))
				.with("uTime", UniformValue::Float(config.time_step)),
			kernel_scene)?;

		let mut camera = PerspectiveCamera::new(&config.display_camera, config.screen_aspect());
		camera.position = Vec3::new(0.0, 0.0, DISPLAY_CAMERA_DISTANCE);
		let display_scene = QuadScene {
			quad: Quad {width: config.domain_size.0 as f32, height: config.domain_size.1 as f32},
			camera,
		};
		let display = Kernel::new(renderer, &shaders::DISPLAY, Uniforms::new(), display_scene)?;

		execute(renderer, &mut clear, &mut pair)?;
		log::info!("simulation ready; dt = {}, diffusivity = {}", config.time_step, config.diffusivity);

		Ok(FrameScheduler {
			pair,
			heat,
			integrator,
			display,
			clock: SimulationClock::new(config.time_step),
			interaction: InteractionState::default(),
			running: true,
			viewport: config.screen_size,
			frame: 0,
		})
	}

	/// Routes one input event to the pointer state or the toggle.
	pub fn handle(&mut self, event : &InputEvent) {
		match *event {
			InputEvent::KeyDown(Key::ToggleIntegration) => self.toggle_running(),
			_ => {
				self.interaction.apply(event, self.viewport);
			}
		}
	}

	pub fn toggle_running(&mut self) {
		self.running = !self.running;
		log::info!("integration {}", if self.running {"resumed"} else {"paused"});
	}

	/// Advances the clock, applies heat while the pointer is pressed,
	/// integrates while running, then draws the latest field to the screen.
	pub fn tick(&mut self, renderer : &mut R) -> Result<FrameReport> {
		self.clock.advance();

		let heated = self.interaction.pressed;
		if heated {
			self.heat.set_uniform("mouse", UniformValue::Vec2(self.interaction.pointer.into()));
			execute(renderer, &mut self.heat, &mut self.pair)?;
		}

		let integrated = self.running;
		if integrated {
			self.integrator.set_uniform("uTime", UniformValue::Float(self.clock.step()));
			execute(renderer, &mut self.integrator, &mut self.pair)?;
		}

		self.display.bind_source(self.pair.read_slot());
		renderer.render(&self.display, Some(self.pair.read()), Destination::Screen)?;

		self.frame += 1;
		if self.frame % 600 == 0 {
			log::debug!("frame {} (t = {:.2})", self.frame, self.clock.elapsed());
		}
		Ok(FrameReport {frame: self.frame, heated, integrated})
	}

	pub fn running(&self) -> bool { self.running }
	pub fn interaction(&self) -> &InteractionState { &self.interaction }
	pub fn clock(&self) -> &SimulationClock { &self.clock }
	pub fn targets(&self) -> &RenderTargetPair<R::Target> { &self.pair }
	pub fn targets_mut(&mut self) -> &mut RenderTargetPair<R::Target> { &mut self.pair }

	/// The texture the display pass shows: the most recent result.
	pub fn field(&self) -> &R::Target {
		self.pair.read()
	}
}

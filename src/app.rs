use emscripten_main_loop::MainLoopEvent;
use glium_sdl2::DisplayBuild;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::input::{InputEvent, Key};
use crate::render::gl::GliumRenderer;
use crate::scheduler::FrameScheduler;

/// Converts an SDL event into simulation input. Touch positions arrive
/// normalised and are scaled back to window pixels.
pub fn translate_event(event : &Event, viewport : (u32, u32)) -> Option<InputEvent> {
	match *event {
		Event::MouseMotion {x, y, ..} => Some(InputEvent::PointerMoved {x: x as f32, y: y as f32}),
		Event::MouseButtonDown {..} => Some(InputEvent::PointerDown),
		Event::MouseButtonUp {..} => Some(InputEvent::PointerUp),
		Event::FingerMotion {x, y, ..} => Some(InputEvent::TouchMoved {
			x: x * viewport.0 as f32,
			y: y * viewport.1 as f32}),
		Event::FingerDown {..} => Some(InputEvent::TouchStart),
		Event::FingerUp {..} => Some(InputEvent::TouchEnd),
		Event::KeyDown {keycode: Some(Keycode::Space), repeat: false, ..} => Some(InputEvent::KeyDown(Key::ToggleIntegration)),
		_ => None
	}
}

pub struct HeatApp {
	sdl_context : sdl2::Sdl,
	renderer    : GliumRenderer,
	scheduler   : FrameScheduler<GliumRenderer>,
	viewport    : (u32, u32),
}

impl HeatApp {
	pub fn new(config : &SimulationConfig) -> Result<HeatApp> {
		config.validate()?;
		let sdl_context = sdl2::init().map_err(Error::Window)?;
		let video_subsystem = sdl_context.video().map_err(Error::Window)?;
		let gl_attr = video_subsystem.gl_attr();
		gl_attr.set_context_version(3, 0);
		gl_attr.set_context_profile(sdl2::video::GLProfile::GLES);
		let display = video_subsystem.window("Heat diffusion", config.screen_size.0, config.screen_size.1)
			.build_glium()
			.map_err(|e| Error::Window(format!("{:?}", e)))?;
		log::info!("opened {}x{} window", config.screen_size.0, config.screen_size.1);

		let mut renderer = GliumRenderer::new(display)?;
		let scheduler = FrameScheduler::new(&mut renderer, config)?;

		Ok(HeatApp {sdl_context, renderer, scheduler, viewport: config.screen_size})
	}
}

impl emscripten_main_loop::MainLoop for HeatApp
{
	fn main_loop(&mut self) -> MainLoopEvent
	{
		if let Err(error) = self.scheduler.tick(&mut self.renderer) {
			log::error!("{}", error);
			return MainLoopEvent::Terminate;
		}

		let mut event_pump = match self.sdl_context.event_pump() {
			Ok(event_pump) => event_pump,
			Err(error) => {
				log::error!("event pump unavailable: {}", error);
				return MainLoopEvent::Terminate;
			}
		};

		let mut running = MainLoopEvent::Continue;
		for event in event_pump.poll_iter() {
			match event {
				Event::Quit { .. } => {
					running = MainLoopEvent::Terminate;
				},
				Event::KeyDown { keycode: Some(Keycode::Escape), .. } => {
					running = MainLoopEvent::Terminate;
				},
				event => {
					if let Some(input) = translate_event(&event, self.viewport) {
						self.scheduler.handle(&input);
					}
				}
			}
		}
		running
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use sdl2::keyboard::Mod;

	fn key_down(keycode : Keycode, repeat : bool) -> Event {
		Event::KeyDown {timestamp: 0, window_id: 0, keycode: Some(keycode), scancode: None, keymod: Mod::empty(), repeat}
	}

	#[test]
	fn space_toggles_but_auto_repeat_does_not() {
		assert_eq!(translate_event(&key_down(Keycode::Space, false), (10, 10)),
			Some(InputEvent::KeyDown(Key::ToggleIntegration)));
		assert_eq!(translate_event(&key_down(Keycode::Space, true), (10, 10)), None);
		assert_eq!(translate_event(&key_down(Keycode::A, false), (10, 10)), None);
	}

	#[test]
	fn finger_positions_are_scaled_to_pixels() {
		let event = Event::FingerMotion {timestamp: 0, touch_id: 0, finger_id: 0, x: 0.5, y: 0.25, dx: 0.0, dy: 0.0, pressure: 1.0};
		assert_eq!(translate_event(&event, (200, 100)), Some(InputEvent::TouchMoved {x: 100.0, y: 25.0}));
	}
}

use glam::Vec2;

/// Keys the simulation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
	ToggleIntegration,
}

/// Platform-independent input, with positions in device pixels (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
	PointerMoved {x : f32, y : f32},
	PointerDown,
	PointerUp,
	TouchMoved {x : f32, y : f32},
	TouchStart,
	TouchEnd,
	KeyDown(Key),
}

/// Pointer position in normalised surface space (origin bottom-left) and
/// whether it is pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
	pub pointer : Vec2,
	pub pressed : bool,
}

impl Default for InteractionState {
	fn default() -> InteractionState {
		InteractionState {pointer: Vec2::ZERO, pressed: false}
	}
}

/// Maps device pixels in a `viewport`-sized surface onto `[0,1]^2`, flipping
/// the vertical axis.
pub fn normalize(x : f32, y : f32, viewport : (u32, u32)) -> Vec2 {
	Vec2::new(x / viewport.0 as f32, 1.0 - y / viewport.1 as f32)
}

impl InteractionState {
	/// Applies a pointer or touch event. Key events are not pointer state and
	/// are ignored here; the return value tells whether the event was consumed.
	pub fn apply(&mut self, event : &InputEvent, viewport : (u32, u32)) -> bool {
		match *event {
			InputEvent::PointerMoved {x, y} | InputEvent::TouchMoved {x, y} => {
				self.pointer = normalize(x, y, viewport);
			}
			InputEvent::PointerDown | InputEvent::TouchStart => self.pressed = true,
			InputEvent::PointerUp | InputEvent::TouchEnd => self.pressed = false,
			InputEvent::KeyDown(_) => return false,
		}
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn corners_map_with_flipped_y() {
		assert_eq!(normalize(0.0, 0.0, (800, 600)), Vec2::new(0.0, 1.0));
		assert_eq!(normalize(800.0, 600.0, (800, 600)), Vec2::new(1.0, 0.0));
		assert_eq!(normalize(400.0, 150.0, (800, 600)), Vec2::new(0.5, 0.75));
	}

	#[test]
	fn press_and_release() {
		let mut state = InteractionState::default();
		assert!(state.apply(&InputEvent::PointerDown, (10, 10)));
		assert!(state.pressed);
		state.apply(&InputEvent::TouchEnd, (10, 10));
		assert!(!state.pressed);
		state.apply(&InputEvent::TouchStart, (10, 10));
		assert!(state.pressed);
		state.apply(&InputEvent::PointerUp, (10, 10));
		assert!(!state.pressed);
	}

	#[test]
	fn touch_and_mouse_share_the_pointer() {
		let mut state = InteractionState::default();
		state.apply(&InputEvent::TouchMoved {x: 5.0, y: 0.0}, (10, 20));
		assert_eq!(state.pointer, Vec2::new(0.5, 1.0));
		state.apply(&InputEvent::PointerMoved {x: 0.0, y: 20.0}, (10, 20));
		assert_eq!(state.pointer, Vec2::new(0.0, 0.0));
	}

	#[test]
	fn keys_leave_pointer_state_alone() {
		let mut state = InteractionState::default();
		assert!(!state.apply(&InputEvent::KeyDown(Key::ToggleIntegration), (10, 10)));
		assert_eq!(state, InteractionState::default());
	}
}

use crate::kernel::TextureSlot;

/// Two equally sized render targets used as ping-pong buffers.
///
/// The pair owns both buffers for its whole life; `swap` only exchanges
/// which one plays the "read" role and which one is scratch.
pub struct RenderTargetPair<T> {
	targets : [T; 2],
	read    : usize,
}

impl<T> RenderTargetPair<T> {
	/// `first` starts out as the read buffer, `second` as the write buffer.
	pub fn new(first : T, second : T) -> RenderTargetPair<T> {
		RenderTargetPair {targets: [first, second], read: 0}
	}

	pub fn swap(&mut self) {
		self.read ^= 1;
	}

	pub fn read_slot(&self) -> TextureSlot {
		TextureSlot(self.read)
	}

	pub fn write_slot(&self) -> TextureSlot {
		TextureSlot(self.read ^ 1)
	}

	pub fn read(&self) -> &T {
		&self.targets[self.read]
	}

	pub fn write(&self) -> &T {
		&self.targets[self.read ^ 1]
	}

	pub fn read_mut(&mut self) -> &mut T {
		&mut self.targets[self.read]
	}

	pub fn get(&self, slot : TextureSlot) -> &T {
		&self.targets[slot.0]
	}

	/// Borrows the read buffer for sampling and the write buffer for drawing
	/// at the same time.
	pub fn split_mut(&mut self) -> (&T, &mut T) {
		let (first, second) = self.targets.split_at_mut(1);
		if self.read == 0 {
			(&first[0], &mut second[0])
		} else {
			(&second[0], &mut first[0])
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn swap_is_an_involution() {
		let mut pair = RenderTargetPair::new("a", "b");
		assert_eq!((*pair.read(), *pair.write()), ("a", "b"));
		pair.swap();
		assert_eq!((*pair.read(), *pair.write()), ("b", "a"));
		pair.swap();
		assert_eq!((*pair.read(), *pair.write()), ("a", "b"));
	}

	#[test]
	fn slots_follow_the_roles() {
		let mut pair = RenderTargetPair::new(1, 2);
		let read = pair.read_slot();
		pair.swap();
		assert_eq!(pair.write_slot(), read);
		assert_eq!(*pair.get(pair.read_slot()), 2);
		assert_eq!(*pair.get(read), 1);
	}

	#[test]
	fn split_hands_out_read_and_write() {
		let mut pair = RenderTargetPair::new(vec![1.0f32], vec![0.0]);
		pair.swap();
		{
			let (read, write) = pair.split_mut();
			write[0] = read[0] + 5.0;
		}
		assert_eq!(pair.read(), &vec![0.0]);
		assert_eq!(pair.write(), &vec![5.0]);
	}
}

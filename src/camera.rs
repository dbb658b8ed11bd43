use glam::{Mat4, Vec3};

use crate::config::CameraSettings;

/// Axis-aligned bounds of an object in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
	pub min : Vec3,
	pub max : Vec3,
}

impl BoundingBox {
	pub fn size(&self) -> Vec3 {
		self.max - self.min
	}
}

/// Orbit-control limits that the fitting routine can update alongside the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
	pub target : Vec3,
	pub max_distance : f32,
}

/// A perspective camera looking down the negative Z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
	pub fov : f32,
	pub aspect : f32,
	pub near : f32,
	pub far : f32,
	pub position : Vec3,
}

impl PerspectiveCamera {
	pub fn new(settings : &CameraSettings, aspect : f32) -> PerspectiveCamera {
		PerspectiveCamera {
			fov: settings.fov,
			aspect,
			near: settings.near,
			far: settings.far,
			position: Vec3::ZERO,
		}
	}

	pub fn projection(&self) -> Mat4 {
		Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
	}

	pub fn view(&self) -> Mat4 {
		Mat4::from_translation(-self.position)
	}

	/// Moves the camera onto the Z axis so that `bounds` exactly fills the
	/// frame, and pulls the far plane out to cover the object.
	///
	/// A non-zero `offset` scales the resulting distance. When `orbit` is
	/// given it is re-centred on the origin and its zoom distance capped.
	pub fn fit_to_centered_object(&mut self, bounds : &BoundingBox, offset : f32, orbit : Option<&mut OrbitLimits>) {
		let size = bounds.size();
		let fov = self.fov.to_radians();
		let fovh = 2.0 * ((fov / 2.0).tan() * self.aspect).atan();
		let dx = size.z / 2.0 + (size.x / 2.0 / (fovh / 2.0).tan()).abs();
		let dy = size.z / 2.0 + (size.y / 2.0 / (fov / 2.0).tan()).abs();
		let mut camera_z = dx.max(dy);

		if offset != 0.0 {
			camera_z *= offset;
		}
		self.position = Vec3::new(0.0, 0.0, camera_z);

		let min_z = bounds.min.z;
		let to_far_edge = if min_z < 0.0 {-min_z + camera_z} else {camera_z - min_z};
		self.far = to_far_edge * 3.0;

		if let Some(orbit) = orbit {
			orbit.target = Vec3::ZERO;
			orbit.max_distance = to_far_edge * 2.0;
		}
	}
}

/// A flat quad centred on the origin in the XY plane, with UV (0,0) at the
/// bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
	pub width : f32,
	pub height : f32,
}

impl Quad {
	pub fn bounds(&self) -> BoundingBox {
		let half = Vec3::new(self.width / 2.0, self.height / 2.0, 0.0);
		BoundingBox {min: -half, max: half}
	}

	/// Maps the unit quad `[-0.5, 0.5]^2` onto this quad.
	pub fn model(&self) -> Mat4 {
		Mat4::from_scale(Vec3::new(self.width, self.height, 1.0))
	}
}

/// An isolated scene holding a single quad and the camera that views it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadScene {
	pub quad : Quad,
	pub camera : PerspectiveCamera,
}

impl QuadScene {
	/// A quad with the target's aspect ratio, framed so that it covers the
	/// whole viewport of a target with that aspect.
	pub fn fullscreen(settings : &CameraSettings, aspect : f32, width : f32) -> QuadScene {
		let quad = Quad {width, height: width / aspect};
		let mut camera = PerspectiveCamera::new(settings, aspect);
		camera.fit_to_centered_object(&quad.bounds(), 0.0, None);
		QuadScene {quad, camera}
	}

	pub fn model_view_projection(&self) -> Mat4 {
		self.camera.projection() * self.camera.view() * self.quad.model()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use glam::Vec4;

	const EPSILON: f32 = 1e-4;

	fn project(scene : &QuadScene, x : f32, y : f32) -> (f32, f32) {
		let clip = scene.model_view_projection() * Vec4::new(x, y, 0.0, 1.0);
		(clip.x / clip.w, clip.y / clip.w)
	}

	#[test]
	fn fitted_quad_covers_the_viewport() {
		for &aspect in &[1.0f32, 16.0 / 9.0, 0.5] {
			let settings = CameraSettings {fov: 60.0, near: 0.1, far: 500.0};
			let scene = QuadScene::fullscreen(&settings, aspect, 20.0);
			let (left, bottom) = project(&scene, -0.5, -0.5);
			let (right, top) = project(&scene, 0.5, 0.5);
			assert!((left + 1.0).abs() < EPSILON, "left edge at {}", left);
			assert!((bottom + 1.0).abs() < EPSILON, "bottom edge at {}", bottom);
			assert!((right - 1.0).abs() < EPSILON, "right edge at {}", right);
			assert!((top - 1.0).abs() < EPSILON, "top edge at {}", top);
		}
	}

	#[test]
	fn fit_sets_far_plane_and_orbit_limits() {
		let mut camera = PerspectiveCamera::new(&CameraSettings {fov: 90.0, near: 0.1, far: 1.0}, 1.0);
		let bounds = BoundingBox {min: Vec3::new(-1.0, -1.0, -1.0), max: Vec3::new(1.0, 1.0, 1.0)};
		let mut orbit = OrbitLimits {target: Vec3::ONE, max_distance: 0.0};
		camera.fit_to_centered_object(&bounds, 0.0, Some(&mut orbit));

		// tan(45 deg) = 1, so the distance is half the depth plus half the width.
		assert!((camera.position.z - 2.0).abs() < EPSILON);
		assert!((camera.far - 9.0).abs() < EPSILON);
		assert_eq!(orbit.target, Vec3::ZERO);
		assert!((orbit.max_distance - 6.0).abs() < EPSILON);
	}

	#[test]
	fn offset_scales_the_distance() {
		let settings = CameraSettings {fov: 60.0, near: 0.1, far: 500.0};
		let quad = Quad {width: 10.0, height: 10.0};
		let mut plain = PerspectiveCamera::new(&settings, 1.0);
		plain.fit_to_centered_object(&quad.bounds(), 0.0, None);
		let mut offset = PerspectiveCamera::new(&settings, 1.0);
		offset.fit_to_centered_object(&quad.bounds(), 1.5, None);
		assert!((offset.position.z - plain.position.z * 1.5).abs() < EPSILON);
	}
}

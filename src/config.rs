use crate::error::{Error, Result};

pub const SCREEN_SIZE:      (u32, u32) = (1024, 768);
pub const DOMAIN_SIZE:      (u32, u32) = (15, 15);
pub const RESOLUTION_SCALE: u32 = 64;

pub const TIME_STEP:        f32 = 0.01;
pub const DIFFUSIVITY:      f32 = 25.0;
pub const GRID_RESOLUTION:  f32 = 1000.0;
pub const HEAT_AMPLITUDE:   f32 = 2.0;
pub const HEAT_FALLOFF:     f32 = 70.0;

/// Width of the quad every kernel draws; the height follows the target aspect.
pub const KERNEL_PLANE_WIDTH: f32 = 20.0;
pub const DISPLAY_CAMERA_DISTANCE: f32 = 20.0;

pub const MAX_TARGET_DIMENSION: u32 = 16384;

/// Explicit Euler on the five-point stencil stays bounded while
/// `diffusivity * dt` does not exceed this value.
pub const STABILITY_LIMIT: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
	pub fov : f32,
	pub near : f32,
	pub far : f32,
}

pub const KERNEL_CAMERA: CameraSettings = CameraSettings {fov: 60.0, near: 0.1, far: 500.0};
pub const DISPLAY_CAMERA: CameraSettings = CameraSettings {fov: 75.0, near: 0.1, far: 1000.0};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
	pub screen_size      : (u32, u32),
	pub domain_size      : (u32, u32),
	pub resolution_scale : u32,

	pub time_step        : f32,
	pub diffusivity      : f32,
	pub grid_resolution  : f32,
	pub heat_amplitude   : f32,
	pub heat_falloff     : f32,

	pub kernel_camera    : CameraSettings,
	pub display_camera   : CameraSettings,
}

impl Default for SimulationConfig {
	fn default() -> SimulationConfig {
		SimulationConfig {
			screen_size: SCREEN_SIZE,
			domain_size: DOMAIN_SIZE,
			resolution_scale: RESOLUTION_SCALE,
			time_step: TIME_STEP,
			diffusivity: DIFFUSIVITY,
			grid_resolution: GRID_RESOLUTION,
			heat_amplitude: HEAT_AMPLITUDE,
			heat_falloff: HEAT_FALLOFF,
			kernel_camera: KERNEL_CAMERA,
			display_camera: DISPLAY_CAMERA,
		}
	}
}

fn check_positive(field : &'static str, value : f32) -> Result<()> {
	if !value.is_finite() {
		return Err(Error::InvalidConfig {field, reason: "must be finite"});
	}
	if value <= 0.0 {
		return Err(Error::InvalidConfig {field, reason: "must be positive"});
	}
	Ok(())
}

fn check_camera(field : &'static str, camera : &CameraSettings) -> Result<()> {
	check_positive(field, camera.fov)?;
	check_positive(field, camera.near)?;
	check_positive(field, camera.far)?;
	if camera.fov >= 180.0 {
		return Err(Error::InvalidConfig {field, reason: "field of view must be below 180 degrees"});
	}
	if camera.far <= camera.near {
		return Err(Error::InvalidConfig {field, reason: "far plane must lie beyond the near plane"});
	}
	Ok(())
}

/// Rejects sizes no backend can allocate.
pub fn check_target_size(width : u32, height : u32) -> Result<()> {
	if width == 0 || height == 0 || width > MAX_TARGET_DIMENSION || height > MAX_TARGET_DIMENSION {
		return Err(Error::InvalidTargetSize {width, height});
	}
	Ok(())
}

impl SimulationConfig {
	/// Off-screen target dimensions: the domain scaled by the resolution factor.
	pub fn target_size(&self) -> (u32, u32) {
		(self.domain_size.0.saturating_mul(self.resolution_scale),
		 self.domain_size.1.saturating_mul(self.resolution_scale))
	}

	pub fn target_aspect(&self) -> f32 {
		let (width, height) = self.target_size();
		width as f32 / height as f32
	}

	pub fn screen_aspect(&self) -> f32 {
		self.screen_size.0 as f32 / self.screen_size.1 as f32
	}

	pub fn stability_number(&self) -> f32 {
		self.diffusivity * self.time_step
	}

	pub fn validate(&self) -> Result<()> {
		let (width, height) = self.target_size();
		check_target_size(width, height)?;
		if self.screen_size.0 == 0 || self.screen_size.1 == 0 {
			return Err(Error::InvalidConfig {field: "screen_size", reason: "must be non-zero"});
		}
		check_positive("time_step", self.time_step)?;
		check_positive("grid_resolution", self.grid_resolution)?;
		check_positive("heat_falloff", self.heat_falloff)?;
		if !self.diffusivity.is_finite() || self.diffusivity < 0.0 {
			return Err(Error::InvalidConfig {field: "diffusivity", reason: "must be finite and non-negative"});
		}
		if !self.heat_amplitude.is_finite() {
			return Err(Error::InvalidConfig {field: "heat_amplitude", reason: "must be finite"});
		}
		check_camera("kernel_camera", &self.kernel_camera)?;
		check_camera("display_camera", &self.display_camera)?;

		if self.stability_number() > STABILITY_LIMIT {
			log::warn!("diffusivity * time_step = {} exceeds {}; the field may diverge",
				self.stability_number(), STABILITY_LIMIT);
		}
		Ok(())
	}
}

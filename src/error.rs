use thiserror::Error;

/// Everything that can go wrong while setting up or driving the simulation.
///
/// All of these are fatal: they surface during construction (or, for
/// `Draw`, from the GL driver) and end the program with a diagnostic.
#[derive(Error, Debug)]
pub enum Error {
	#[error("invalid render target size {width}x{height}")]
	InvalidTargetSize { width : u32, height : u32 },

	#[error("invalid configuration value for `{field}`: {reason}")]
	InvalidConfig { field : &'static str, reason : &'static str },

	#[error("failed to compile kernel `{kernel}`: {message}")]
	ShaderCompile { kernel : &'static str, message : String },

	#[error("failed to create render target: {0}")]
	TargetCreation(String),

	#[error("failed to create geometry buffer: {0}")]
	Buffer(String),

	#[error("window initialisation failed: {0}")]
	Window(String),

	#[error("draw call failed: {0}")]
	Draw(String),
}

pub type Result<T> = std::result::Result<T, Error>;

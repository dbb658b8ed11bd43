use heat_kernel::app::HeatApp;
use heat_kernel::config::SimulationConfig;

fn main() {
	env_logger::init();

	let config = SimulationConfig::default();
	match HeatApp::new(&config) {
		Ok(app) => emscripten_main_loop::run(app),
		Err(error) => {
			log::error!("{}", error);
			std::process::exit(1);
		}
	}
}

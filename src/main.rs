mod config;
mod driver;
mod error;
mod macros;
mod mode;
mod process;
mod shader;

use log::LevelFilter;
use simple_logger::SimpleLogger;

use config::DriverConfig;
use mode::Mode;
use process::SystemLauncher;

// spark_build [release]
//
// Compiles shaders/<name>.<stage>.<ext> to shaders/bin/<name>.<stage>.spv and then
// runs the project. Any first argument other than `release` gives a debug run.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    let mode = Mode::from_args(std::env::args_os());
    let config = DriverConfig::from_env();

    let exit_code = match driver::run(&mut SystemLauncher, &config, mode) {
        Ok(report) => {
            if !report.succeeded() {
                log::error!(
                    "build failed: {} shader(s) compiled, {} failed, exiting with {}",
                    report.compiled.len(),
                    report.failed.len(),
                    report.exit_code()
                );
            }
            report.exit_code()
        }
        Err(err) => {
            log::error!("{}", err);
            1
        }
    };

    std::process::exit(exit_code);
}

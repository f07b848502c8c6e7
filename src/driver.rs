use std::path::PathBuf;

use crate::{
    config::{DriverConfig, FailurePolicy},
    error::DriverError,
    mode::Mode,
    process::{Invocation, Launcher, Outcome},
    shader::{discover_shaders, filter_and_map, ShaderJob},
};

// Compile a single glsl shader to spir-v
//
// glslangValidator -V shaders/tri.vert.glsl -o shaders/bin/tri.vert.spv
//
pub fn compile_shader<L: Launcher>(
    launcher: &mut L,
    config: &DriverConfig,
    job: &ShaderJob,
) -> Result<(), DriverError> {
    log::info!("compiling {}", job.input.display());

    let invocation = Invocation::new(&config.compiler)
        .arg("-V")
        .arg(&job.input)
        .arg("-o")
        .arg(&job.output);

    let outcome = launcher.launch(&invocation)?;
    if outcome.success() {
        Ok(())
    } else {
        Err(DriverError::CompileFailed {
            shader: job.input.clone(),
            code: outcome.code(),
        })
    }
}

pub fn run_project<L: Launcher>(
    launcher: &mut L,
    config: &DriverConfig,
    mode: Mode,
) -> Result<Outcome, DriverError> {
    let invocation = Invocation::new(&config.toolchain)
        .arg("run")
        .arg(&config.run_target)
        .args(mode.runner_flags());

    log::info!("running {:?} build: {}", mode, invocation);
    launcher.launch(&invocation)
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub compiled: Vec<PathBuf>,
    pub failed: Vec<DriverError>,
    // None when the run step was skipped
    pub run: Option<Outcome>,
}

impl BuildReport {
    pub fn succeeded(&self) -> bool {
        self.exit_code() == 0
    }

    /// The process exit code for this build. A failed run passes its own code
    /// through; shader failures or a run killed by a signal give 1.
    pub fn exit_code(&self) -> i32 {
        match self.run {
            Some(outcome) if !outcome.success() => match outcome.code() {
                Some(code) if code != 0 => code,
                _ => 1,
            },
            _ if !self.failed.is_empty() => 1,
            _ => 0,
        }
    }
}

/// Compiles every shader in the configured directory, then runs the project.
///
/// Shader failures, including an output directory that can't be created, are
/// collected in the returned [`BuildReport`]. Whether the run step still
/// happens after a failure is decided by [`DriverConfig::on_shader_error`].
/// Errors are returned only when the build can't proceed at all: the shader
/// directory is unreadable or the toolchain can't be launched.
pub fn run<L: Launcher>(
    launcher: &mut L,
    config: &DriverConfig,
    mode: Mode,
) -> Result<BuildReport, DriverError> {
    let entries = discover_shaders(&config.shader_dir)?;
    let jobs = filter_and_map(&config.shader_dir, &entries);
    let abort_on_failure = config.on_shader_error == FailurePolicy::Abort;

    let mut report = BuildReport::default();

    // The compiler gets to try anyway and reports its own errors
    if !jobs.is_empty() {
        let output_dir = config.output_dir();
        if let Err(source) = std::fs::create_dir_all(&output_dir) {
            let err = DriverError::OutputDirectory {
                path: output_dir,
                source,
            };
            log::warn!("{}", err);
            report.failed.push(err);
        }
    }

    for job in &jobs {
        if abort_on_failure && !report.failed.is_empty() {
            break;
        }

        match compile_shader(launcher, config, job) {
            Ok(()) => report.compiled.push(job.input.clone()),
            Err(err) => {
                log::warn!("{}", err);
                report.failed.push(err);
            }
        }
    }

    log::info!(
        "shaders: {} compiled, {} failed",
        report.compiled.len(),
        report.failed.len()
    );

    if abort_on_failure && !report.failed.is_empty() {
        log::error!(
            "not running {} because the shader build failed",
            config.run_target.to_string_lossy()
        );
        return Ok(report);
    }

    report.run = Some(run_project(launcher, config, mode)?);
    Ok(report)
}

use std::{
    ffi::{OsStr, OsString},
    path::PathBuf,
    str::FromStr,
};

use crate::shader::SHADER_OUTPUT_SUBDIRECTORY;

const SHADER_SOURCE_DIRECTORY: &str = "shaders";
const SHADER_COMPILER: &str = "glslangValidator";
const TOOLCHAIN: &str = "odin";
const RUN_TARGET: &str = "spark";

const SHADER_DIR_VAR: &str = "SPARK_SHADER_DIR";
const SHADER_COMPILER_VAR: &str = "SPARK_SHADER_COMPILER";
const TOOLCHAIN_VAR: &str = "SPARK_TOOLCHAIN";
const RUN_TARGET_VAR: &str = "SPARK_RUN_TARGET";
const ON_SHADER_ERROR_VAR: &str = "SPARK_ON_SHADER_ERROR";

/// What to do once a shader fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Report the failure, keep compiling the rest and still run the project.
    #[default]
    Continue,
    /// Stop at the first failure and skip the run step.
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(format!(
                "unknown shader failure policy '{}', expected 'continue' or 'abort'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub shader_dir: PathBuf,
    pub compiler: OsString,
    pub toolchain: OsString,
    pub run_target: OsString,
    pub on_shader_error: FailurePolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            shader_dir: PathBuf::from(SHADER_SOURCE_DIRECTORY),
            compiler: OsString::from(SHADER_COMPILER),
            toolchain: OsString::from(TOOLCHAIN),
            run_target: OsString::from(RUN_TARGET),
            on_shader_error: FailurePolicy::default(),
        }
    }
}

impl DriverConfig {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    // Unrelated and empty variables are ignored so a blank override falls back to the default.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: Into<OsString>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let value = value.into();
            if value.is_empty() {
                continue;
            }

            let Some(key) = key.as_ref().to_str() else {
                continue;
            };

            match key {
                SHADER_DIR_VAR => config.shader_dir = PathBuf::from(value),
                SHADER_COMPILER_VAR => config.compiler = value,
                TOOLCHAIN_VAR => config.toolchain = value,
                RUN_TARGET_VAR => config.run_target = value,
                ON_SHADER_ERROR_VAR => match value.to_str().map(FailurePolicy::from_str) {
                    Some(Ok(policy)) => config.on_shader_error = policy,
                    Some(Err(err)) => log::warn!("{}: {}", ON_SHADER_ERROR_VAR, err),
                    None => log::warn!("{} is not valid unicode, ignoring", ON_SHADER_ERROR_VAR),
                },
                _ => (),
            }
        }

        config
    }

    /// Directory the compiled `.spv` files are written to.
    pub fn output_dir(&self) -> PathBuf {
        self.shader_dir.join(SHADER_OUTPUT_SUBDIRECTORY)
    }
}

use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("couldn't read shader directory {}: {source}", .path.display())]
    ShaderDirectory { path: PathBuf, source: io::Error },

    #[error("couldn't create shader output directory {}: {source}", .path.display())]
    OutputDirectory { path: PathBuf, source: io::Error },

    #[error("failed to launch {program}: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("shader {} failed to compile ({})", .shader.display(), describe_code(.code))]
    CompileFailed { shader: PathBuf, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

use std::{
    ffi::{OsStr, OsString},
    fmt,
    process::{Command, ExitStatus, Stdio},
};

use crate::error::DriverError;

/// A program and its ordered arguments, run with the driver's own stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: OsString,
    args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_owned()));
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in self.arguments() {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// How a child process ended. `None` means it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    code: Option<i32>,
}

impl Outcome {
    pub fn from_code(code: Option<i32>) -> Self {
        Self { code }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl From<ExitStatus> for Outcome {
    fn from(status: ExitStatus) -> Self {
        Self::from_code(status.code())
    }
}

pub trait Launcher {
    /// Runs the invocation to completion. Only a failure to start the
    /// process is an error; a non-zero exit is reported through [`Outcome`].
    fn launch(&mut self, invocation: &Invocation) -> Result<Outcome, DriverError>;
}

/// Spawns real child processes and blocks until each one exits.
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&mut self, invocation: &Invocation) -> Result<Outcome, DriverError> {
        log::debug!("running {}", invocation);

        let status = invocation
            .to_command()
            .status()
            .map_err(|source| DriverError::Spawn {
                program: invocation.program().to_string_lossy().into_owned(),
                source,
            })?;

        Ok(status.into())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records every invocation instead of running it. Invocations whose
    /// arguments mention one of the `failing` needles exit with its code.
    #[derive(Debug, Default)]
    pub struct RecordingLauncher {
        pub invocations: Vec<Invocation>,
        failing: Vec<(String, i32)>,
        missing_programs: Vec<OsString>,
    }

    impl RecordingLauncher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_on(mut self, needle: &str, code: i32) -> Self {
            self.failing.push((needle.to_string(), code));
            self
        }

        pub fn missing(mut self, program: &str) -> Self {
            self.missing_programs.push(OsString::from(program));
            self
        }

        pub fn programs(&self) -> Vec<String> {
            self.invocations
                .iter()
                .map(|invocation| invocation.program().to_string_lossy().into_owned())
                .collect()
        }

        pub fn lines(&self) -> Vec<String> {
            self.invocations
                .iter()
                .map(|invocation| invocation.to_string())
                .collect()
        }
    }

    impl Launcher for RecordingLauncher {
        fn launch(&mut self, invocation: &Invocation) -> Result<Outcome, DriverError> {
            self.invocations.push(invocation.clone());

            if self
                .missing_programs
                .iter()
                .any(|program| program.as_os_str() == invocation.program())
            {
                return Err(DriverError::Spawn {
                    program: invocation.program().to_string_lossy().into_owned(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }

            let failure = self.failing.iter().find(|(needle, _)| {
                invocation
                    .arguments()
                    .iter()
                    .any(|arg| arg.to_string_lossy().contains(needle.as_str()))
            });

            Ok(match failure {
                Some((_, code)) => Outcome::from_code(Some(*code)),
                None => Outcome::from_code(Some(0)),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_builder_test() {
        let invocation = Invocation::new("odin")
            .arg("run")
            .arg("spark")
            .args(["-o:none", "-debug"]);

        assert_eq!(invocation.program(), "odin");
        assert_eq!(invocation.arguments(), ["run", "spark", "-o:none", "-debug"]);
        assert_eq!(invocation.to_string(), "odin run spark -o:none -debug");
    }

    #[test]
    fn outcome_test() {
        assert!(Outcome::from_code(Some(0)).success());
        assert!(!Outcome::from_code(Some(1)).success());
        assert!(!Outcome::from_code(None).success());
        assert_eq!(Outcome::from_code(Some(3)).code(), Some(3));
    }

    #[test]
    fn missing_program_test() {
        let invocation = Invocation::new("spark-build-no-such-program-anywhere").arg("-V");
        let err = SystemLauncher.launch(&invocation).unwrap_err();

        match err {
            DriverError::Spawn { program, .. } => {
                assert_eq!(program, "spark-build-no-such-program-anywhere")
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn exit_code_passthrough_test() {
        let ok = SystemLauncher
            .launch(&Invocation::new("sh").args(["-c", "exit 0"]))
            .unwrap();
        assert!(ok.success());

        let failed = SystemLauncher
            .launch(&Invocation::new("sh").args(["-c", "exit 3"]))
            .unwrap();
        assert_eq!(failed.code(), Some(3));
    }
}

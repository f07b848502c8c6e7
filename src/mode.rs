use std::ffi::OsStr;

// Flags handed to the toolchain runner after `run <target>`.
crate::macros::enum_values! {
    (
        Mode,
        [&'static str],
    )
    #[default]
    Debug -> &["-o:none", "-debug"],
    Release -> &["-o:speed"],
}

const RELEASE_ARGUMENT: &str = "release";

impl Mode {
    /// Picks the mode from a full argv (program name first).
    ///
    /// Only a literal `release` in the first position selects [`Mode::Release`];
    /// anything else, including no argument at all, is [`Mode::Debug`].
    /// Arguments after the first are ignored.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        match args.into_iter().nth(1) {
            Some(arg) if arg.as_ref() == OsStr::new(RELEASE_ARGUMENT) => Mode::Release,
            _ => Mode::Debug,
        }
    }

    pub fn runner_flags(self) -> &'static [&'static str] {
        self.value()
    }
}

use crate::bench::{BenchError, Implementation, ParameterSet};
use std::path::PathBuf;
use std::process::Command;

const TIMING_PHRASE: &str = "The computation took ";

/// Extract the self-reported elapsed seconds from a program's output.
pub fn parse_elapsed(output: &str) -> Option<f64> {
    let tail = &output[output.find(TIMING_PHRASE)? + TIMING_PHRASE.len()..];
    tail.split_whitespace().next()?.parse().ok()
}

/// A compiled program timed through its self-reported figure.
///
/// The artifact is built on first use. The harness never times the process
/// itself; the recorded duration excludes startup and argument parsing.
pub struct ExternalProgram {
    name: String,
    artifact: PathBuf,
    extra_args: Vec<String>,
    built: bool,
}

impl ExternalProgram {
    pub fn new(name: &str, extra_args: &[&str]) -> Self {
        ExternalProgram {
            name: name.to_string(),
            artifact: PathBuf::from("target/release/diffusion"),
            extra_args: extra_args.iter().map(|arg| arg.to_string()).collect(),
            built: false,
        }
    }

    fn ensure_built(&mut self) -> Result<(), BenchError> {
        if self.built || self.artifact.exists() {
            self.built = true;
            return Ok(());
        }
        println!("Compiling {} ...", self.name);
        let status = Command::new("cargo")
            .args(["build", "--release", "--bin", "diffusion"])
            .status()?;
        if !status.success() {
            return Err(BenchError::BuildFailed { status });
        }
        self.built = true;
        Ok(())
    }
}

impl Implementation for ExternalProgram {
    fn name(&self) -> &str {
        &self.name
    }

    fn run_trial(&mut self, set: &ParameterSet) -> Result<f64, BenchError> {
        self.ensure_built()?;
        let output = Command::new(&self.artifact)
            .args(set.command_args())
            .args(&self.extra_args)
            .output()?;
        if !output.status.success() {
            return Err(BenchError::ProgramFailed {
                name: self.name.clone(),
                status: output.status,
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_elapsed(&stdout).ok_or_else(|| BenchError::MissingTiming {
            output: stdout.into_owned(),
        })
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn parses_timing_line() {
        let output = "u_max = 4.048E2   @ t=1000\nThe computation took 1.234 s\n";
        assert_approx_eq!(f64, parse_elapsed(output).unwrap(), 1.234);
    }

    #[test]
    fn parses_bare_phrase() {
        assert_approx_eq!(
            f64,
            parse_elapsed("The computation took 0.5 s").unwrap(),
            0.5
        );
    }

    #[test]
    fn rejects_everything_else() {
        assert!(parse_elapsed("").is_none());
        assert!(parse_elapsed("no timing here").is_none());
        assert!(parse_elapsed("The computation took").is_none());
        assert!(parse_elapsed("The computation took fast s").is_none());
        assert!(parse_elapsed("the computation took 1.0 s").is_none());
    }
}

// src/compare/advisor.rs
//! The opaque service that judges a reference/candidate pair.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use anyhow::{bail, Context, Result};
use tracing::debug;

use super::payload::AudioPayload;

/// Fixed instruction sent alongside every comparison request.
pub const COMPARISON_INSTRUCTION: &str = "\
You are a mastering engineer. Compare the candidate mix against the reference track. \
Answer with a single JSON object and nothing else, using exactly these fields: \
\"tonalBalance\" (string), \"dynamicsCompare\" (string), \"stereoDepth\" (string), \
\"correctionBlueprint\" (array of strings, ordered steps to bring the candidate closer \
to the reference).";

/// Something that can turn two tracks and an instruction into a raw response.
pub trait AdviceService: Send + Sync {
    fn request(
        &self,
        reference: &AudioPayload,
        candidate: &AudioPayload,
        instruction: &str,
    ) -> Result<String>;
}

/// Runs an external program: both file paths are appended as arguments and
/// the instruction is written to its stdin. Stdout is the response.
#[derive(Debug, Clone, Default)]
pub struct CommandAdvisor {
    command: Vec<String>,
}

impl CommandAdvisor {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    pub fn is_configured(&self) -> bool {
        !self.command.is_empty()
    }
}

impl AdviceService for CommandAdvisor {
    fn request(
        &self,
        reference: &AudioPayload,
        candidate: &AudioPayload,
        instruction: &str,
    ) -> Result<String> {
        let Some((program, args)) = self.command.split_first() else {
            bail!("no advice service configured");
        };

        debug!(%program, "invoking advice command");
        let mut child = Command::new(program)
            .args(args)
            .arg(&reference.path)
            .arg(&candidate.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to launch {program}"))?;

        // Feed stdin while stdout drains, or a large instruction can block
        // against a full output pipe.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(instruction.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        let output = output.context("advice command did not finish")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{program} exited with {}: {}", output.status, stderr.trim());
        }
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!(%program, "advice command did not read the whole instruction");
            }
            Ok(Err(e)) => return Err(e).context("failed to send instruction"),
            Err(_) => bail!("instruction writer panicked"),
        }
        String::from_utf8(output.stdout).context("advice response is not UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn payload(name: &str) -> AudioPayload {
        AudioPayload {
            path: PathBuf::from(name),
            mime: "audio/x-wav".into(),
            size_bytes: 4,
            properties: None,
        }
    }

    #[test]
    fn unconfigured_advisor_reports_it() {
        let advisor = CommandAdvisor::default();
        assert!(!advisor.is_configured());
        let err = advisor
            .request(&payload("a.wav"), &payload("b.wav"), COMPARISON_INSTRUCTION)
            .unwrap_err();
        assert_eq!(err.to_string(), "no advice service configured");
    }

    #[test]
    fn missing_program_fails_to_launch() {
        let advisor = CommandAdvisor::new(vec!["spectral-lab-no-such-advisor".into()]);
        let err = advisor
            .request(&payload("a.wav"), &payload("b.wav"), "x")
            .unwrap_err();
        assert!(err.to_string().contains("failed to launch"));
    }

    #[cfg(unix)]
    #[test]
    fn command_stdout_is_the_response() {
        let advisor = CommandAdvisor::new(vec![
            "sh".into(),
            "-c".into(),
            "cat >/dev/null; echo \"$0|$1\"".into(),
        ]);
        let out = advisor
            .request(&payload("ref.wav"), &payload("mix.wav"), "instruction")
            .unwrap();
        assert_eq!(out.trim(), "ref.wav|mix.wav");
    }

    #[cfg(unix)]
    #[test]
    fn command_ignoring_stdin_still_answers() {
        let advisor = CommandAdvisor::new(vec!["sh".into(), "-c".into(), "echo '{}'".into()]);
        let instruction = "x".repeat(1 << 20);
        let out = advisor
            .request(&payload("ref.wav"), &payload("mix.wav"), &instruction)
            .unwrap();
        assert_eq!(out.trim(), "{}");
    }

    #[cfg(unix)]
    #[test]
    fn large_instruction_echoed_back_does_not_block() {
        let advisor = CommandAdvisor::new(vec!["sh".into(), "-c".into(), "cat".into()]);
        let instruction = "y".repeat(1 << 20);
        let out = advisor
            .request(&payload("ref.wav"), &payload("mix.wav"), &instruction)
            .unwrap();
        assert_eq!(out.len(), instruction.len());
    }
}

//! Runs a local text-generation program with the prompt on stdin.

use super::ExecutionError;
use crate::core::config::ScoutConfig;
use crate::core::types::TextGenerator;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct ModelCommand {
    program: String,
    args: Vec<String>,
}

impl ModelCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn from_config(config: &ScoutConfig) -> Self {
        Self::new(config.model_program.clone()).args(config.model_args.clone())
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn describe(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for ModelCommand {
    async fn generate(&self, prompt: &str) -> Result<String, ExecutionError> {
        let program = self.describe();
        log::debug!("Running {} with a {} byte prompt", program, prompt.len());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecutionError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        let feed_prompt = async move {
            match stdin {
                // Dropping stdin at the end closes it so the model sees end of input.
                Some(mut stdin) => stdin.write_all(prompt.as_bytes()).await,
                None => Ok(()),
            }
        };

        // Stdout and stderr are drained while the prompt is written, so neither side blocks
        // on a full pipe.
        let (written, output) = tokio::join!(feed_prompt, child.wait_with_output());

        let output = output.map_err(|source| ExecutionError::Io {
            program: program.clone(),
            source,
        })?;

        // A program that exits without reading its input breaks the pipe; its exit status
        // decides the outcome then.
        if let Err(e) = written {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(ExecutionError::Io { program, source: e });
            }
        }

        if !output.status.success() {
            return Err(ExecutionError::Exit {
                program,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prompt_is_piped_and_output_trimmed() {
        let cat = ModelCommand::new("cat");
        let reply = cat.generate("  Acme | Widget | A widget.\n\n").await.unwrap();
        assert_eq!(reply, "Acme | Widget | A widget.");
    }

    #[tokio::test]
    async fn test_prompt_larger_than_pipe_buffer_completes() {
        let prompt = "x".repeat(512 * 1024);
        let reply = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            ModelCommand::new("cat").generate(&prompt),
        )
        .await
        .expect("generate did not finish within 10s")
        .unwrap();
        assert_eq!(reply.len(), prompt.len());
    }

    #[tokio::test]
    async fn test_non_zero_exit_reports_stderr() {
        let failing = ModelCommand::new("sh")
            .arg("-c")
            .arg("cat > /dev/null; echo 'model not found' >&2; exit 3");
        match failing.generate("prompt").await {
            Err(ExecutionError::Exit { code, stderr, .. }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "model not found");
            }
            other => panic!("expected exit error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let missing = ModelCommand::new("definitely-not-a-model-binary-4821");
        assert!(matches!(
            missing.generate("prompt").await,
            Err(ExecutionError::Spawn { .. })
        ));
    }
}

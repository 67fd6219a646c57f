use crate::command::LayoutCommand;
use crate::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{ChildStdin, Command, Stdio};

/// A fully resolved renderer command line: `<program> -T<format> [extra args...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(
        bin_dir: Option<&Path>,
        command: LayoutCommand,
        file_type: &str,
        extra_args: &[String],
    ) -> Self {
        let program = match bin_dir {
            Some(dir) => dir.join(command.as_str()),
            None => PathBuf::from(command.as_str()),
        };
        let mut args = Vec::with_capacity(1 + extra_args.len());
        args.push(format!("-T{file_type}"));
        args.extend(extra_args.iter().cloned());
        Self { program, args }
    }

    /// Program followed by its arguments, as reported in diagnostics.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

/// Turns graph source into image bytes.
///
/// [`GraphvizRenderer`] is the production implementation; tests substitute their own.
pub trait Renderer {
    fn render(&self, invocation: &Invocation, source: &str) -> Result<Vec<u8>>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, invocation: &Invocation, source: &str) -> Result<Vec<u8>> {
        (**self).render(invocation, source)
    }
}

/// Runs the Graphviz executable named by the invocation as a blocking subprocess.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphvizRenderer;

impl Renderer for GraphvizRenderer {
    fn render(&self, invocation: &Invocation, source: &str) -> Result<Vec<u8>> {
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: invocation.program.display().to_string(),
                source,
            })?;

        // Stdin is fed from its own thread while stdout and stderr are drained here; a renderer
        // that reports warnings as it reads would otherwise block on a full stderr pipe.
        let stdin = child.stdin.take();
        let (output, written) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || feed_stdin(stdin, source));
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (output, written)
        });
        let output = output?;
        written?;

        tracing::debug!(
            program = %invocation.program.display(),
            args = ?invocation.args,
            status = ?output.status.code(),
            stdout_len = output.stdout.len(),
            "renderer finished"
        );

        if !output.status.success() {
            return Err(Error::RendererFailed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

/// Writes the graph source and closes the pipe.
///
/// A renderer that rejects its input may exit before reading all of it; its stderr is the
/// diagnostic then, so a broken pipe is not an error.
fn feed_stdin(stdin: Option<ChildStdin>, source: &str) -> std::io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    match stdin.write_all(source.as_bytes()) {
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

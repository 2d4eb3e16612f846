//! Render Pipeline — LaTeX source in, PDF bytes out.
//!
//! Every invocation compiles inside its own temporary directory under the
//! spool dir, so concurrent renders never share a path. The directory guard
//! removes the source file and all compiler byproducts on every exit path
//! (success, compiler failure, timeout, cancellation), and the compiler runs
//! with `kill_on_drop` so a timed-out child does not outlive the request.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};
use uuid::Uuid;

/// Prefix for per-invocation working directories under the spool dir.
/// The janitor sweep keys off the same prefix.
pub const WORKDIR_PREFIX: &str = "vitae-render-";

const TEX_FILE: &str = "resume.tex";
const PDF_FILE: &str = "resume.pdf";

/// How much of the compiler log to keep in the diagnostic. pdflatex logs
/// are long; the failure reason is at the end.
const LOG_TAIL_BYTES: usize = 2048;

/// Internal render failure. Handlers never expose these messages to HTTP
/// callers; `AppError` collapses them to a stable taxonomy kind and the
/// diagnostic goes to the logs.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to prepare render workspace: {0}")]
    Workspace(#[source] std::io::Error),

    #[error("failed to launch compiler '{compiler}': {source}")]
    Spawn {
        compiler: String,
        #[source]
        source: std::io::Error,
    },

    #[error("compiler exited with {status}: {log_tail}")]
    Compiler { status: String, log_tail: String },

    #[error("compiler exceeded {0:?} timeout")]
    Timeout(Duration),

    #[error("compiler exited successfully but produced no output artifact")]
    MissingArtifact,

    #[error("failed to release render workspace: {0}")]
    Cleanup(#[source] std::io::Error),
}

/// Drives the external LaTeX compiler. Constructed once at startup from
/// `Config` and shared via `AppState`; every call is independent.
#[derive(Debug, Clone)]
pub struct RenderPipeline {
    compiler: PathBuf,
    timeout: Duration,
    spool_dir: PathBuf,
}

impl RenderPipeline {
    pub fn new(
        compiler: impl Into<PathBuf>,
        timeout: Duration,
        spool_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            compiler: compiler.into(),
            timeout,
            spool_dir: spool_dir.into(),
        }
    }

    /// Compiles `source` and returns the PDF bytes.
    ///
    /// `resume_id` appears in log lines only; intermediate files use a
    /// generated directory name, never caller-supplied input.
    pub async fn render(&self, source: &str, resume_id: Uuid) -> Result<Vec<u8>, RenderError> {
        let workdir = tempfile::Builder::new()
            .prefix(WORKDIR_PREFIX)
            .tempdir_in(&self.spool_dir)
            .map_err(RenderError::Workspace)?;

        let tex_path = workdir.path().join(TEX_FILE);
        tokio::fs::write(&tex_path, source)
            .await
            .map_err(RenderError::Workspace)?;

        debug!(
            "Compiling resume {resume_id} in {}",
            workdir.path().display()
        );

        let mut command = Command::new(&self.compiler);
        command
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg("-output-directory")
            .arg(workdir.path())
            .arg(&tex_path)
            .current_dir(workdir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|source| RenderError::Spawn {
            compiler: self.compiler.display().to_string(),
            source,
        })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(RenderError::Spawn {
                    compiler: self.compiler.display().to_string(),
                    source,
                })
            }
            Err(_) => {
                // Dropping the in-flight future kills the child (kill_on_drop);
                // the workdir guard removes the partial output.
                warn!(
                    "Render of resume {resume_id} exceeded {:?}, compiler killed",
                    self.timeout
                );
                return Err(RenderError::Timeout(self.timeout));
            }
        };

        if !output.status.success() {
            return Err(RenderError::Compiler {
                status: output.status.to_string(),
                log_tail: log_tail(&output.stdout, &output.stderr),
            });
        }

        let pdf_path = workdir.path().join(PDF_FILE);
        let pdf = match tokio::fs::read(&pdf_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::MissingArtifact)
            }
            Err(e) => return Err(RenderError::Workspace(e)),
        };

        // Explicit release on the success path; failure paths rely on the
        // guard's Drop.
        workdir.close().map_err(RenderError::Cleanup)?;

        debug!("Rendered resume {resume_id}: {} bytes", pdf.len());
        Ok(pdf)
    }
}

/// Last `LOG_TAIL_BYTES` of the combined compiler output, for diagnostics.
fn log_tail(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(stderr));
    if combined.len() <= LOG_TAIL_BYTES {
        return combined;
    }
    let mut start = combined.len() - LOG_TAIL_BYTES;
    while !combined.is_char_boundary(start) {
        start += 1;
    }
    combined[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    /// Stub compiler that copies the .tex source to resume.pdf, so the
    /// "PDF" bytes identify which render produced them.
    const COPY_SOURCE_COMPILER: &str = "#!/bin/sh\n\
prev=\"\"\n\
out=\"\"\n\
tex=\"\"\n\
for arg in \"$@\"; do\n\
  if [ \"$prev\" = \"-output-directory\" ]; then out=\"$arg\"; fi\n\
  prev=\"$arg\"\n\
  tex=\"$arg\"\n\
done\n\
cp \"$tex\" \"$out/resume.pdf\"\n";

    fn write_stub_compiler(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-pdflatex.sh");
        std::fs::write(&path, body).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn spool_entry_count(spool: &Path) -> usize {
        std::fs::read_dir(spool).unwrap().count()
    }

    #[tokio::test]
    async fn test_missing_compiler_is_a_render_failure() {
        let spool = tempfile::tempdir().unwrap();
        let pipeline = RenderPipeline::new(
            "/nonexistent/pdflatex",
            Duration::from_secs(5),
            spool.path(),
        );

        let err = pipeline
            .render("\\documentclass{article}", Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, RenderError::Spawn { .. }));
        assert_eq!(spool_entry_count(spool.path()), 0);
    }

    #[tokio::test]
    async fn test_successful_render_returns_pdf_and_cleans_up() {
        let stub_dir = tempfile::tempdir().unwrap();
        let spool = tempfile::tempdir().unwrap();
        let compiler = write_stub_compiler(stub_dir.path(), COPY_SOURCE_COMPILER);
        let pipeline = RenderPipeline::new(&compiler, Duration::from_secs(5), spool.path());

        let pdf = pipeline.render("hello resume", Uuid::new_v4()).await.unwrap();

        assert_eq!(pdf, b"hello resume");
        assert_eq!(spool_entry_count(spool.path()), 0);
    }

    #[tokio::test]
    async fn test_compiler_failure_surfaces_diagnostic_and_cleans_up() {
        let stub_dir = tempfile::tempdir().unwrap();
        let spool = tempfile::tempdir().unwrap();
        let compiler =
            write_stub_compiler(stub_dir.path(), "#!/bin/sh\necho 'Undefined control sequence'\nexit 1\n");
        let pipeline = RenderPipeline::new(&compiler, Duration::from_secs(5), spool.path());

        let err = pipeline.render("broken", Uuid::new_v4()).await.unwrap_err();

        match err {
            RenderError::Compiler { log_tail, .. } => {
                assert!(log_tail.contains("Undefined control sequence"));
            }
            other => panic!("expected Compiler error, got {other:?}"),
        }
        assert_eq!(spool_entry_count(spool.path()), 0);
    }

    #[tokio::test]
    async fn test_missing_artifact_is_a_render_failure() {
        let stub_dir = tempfile::tempdir().unwrap();
        let spool = tempfile::tempdir().unwrap();
        // Exits 0 without writing resume.pdf.
        let compiler = write_stub_compiler(stub_dir.path(), "#!/bin/sh\nexit 0\n");
        let pipeline = RenderPipeline::new(&compiler, Duration::from_secs(5), spool.path());

        let err = pipeline.render("whatever", Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, RenderError::MissingArtifact));
        assert_eq!(spool_entry_count(spool.path()), 0);
    }

    #[tokio::test]
    async fn test_timeout_kills_compiler_and_cleans_up() {
        let stub_dir = tempfile::tempdir().unwrap();
        let spool = tempfile::tempdir().unwrap();
        let compiler = write_stub_compiler(stub_dir.path(), "#!/bin/sh\nsleep 30\n");
        let pipeline = RenderPipeline::new(&compiler, Duration::from_millis(200), spool.path());

        let err = pipeline.render("slow", Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, RenderError::Timeout(_)));
        assert_eq!(spool_entry_count(spool.path()), 0);
    }

    #[tokio::test]
    async fn test_concurrent_renders_do_not_interfere() {
        let stub_dir = tempfile::tempdir().unwrap();
        let spool = tempfile::tempdir().unwrap();
        let compiler = write_stub_compiler(stub_dir.path(), COPY_SOURCE_COMPILER);
        let pipeline = RenderPipeline::new(&compiler, Duration::from_secs(5), spool.path());

        let (a, b) = tokio::join!(
            pipeline.render("resume of Ada", Uuid::new_v4()),
            pipeline.render("resume of Boole", Uuid::new_v4()),
        );

        assert_eq!(a.unwrap(), b"resume of Ada");
        assert_eq!(b.unwrap(), b"resume of Boole");
        assert_eq!(spool_entry_count(spool.path()), 0);
    }
}

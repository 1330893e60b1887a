//! Launching and supervising a local CoreNLP server.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tracing::{debug, info};

use crate::telemetry;
use crate::{CoreNlpError, Result};

/// Server entry point inside the CoreNLP jars.
const SERVER_CLASS: &str = "edu.stanford.nlp.pipeline.StanfordCoreNLPServer";

/// Working directory for the server's temporary files, relative to the current directory.
pub const TMP_DIR: &str = "tmp";

/// Server-side timeout passed with `-timeout`, in milliseconds.
const SERVER_TIMEOUT_MS: u64 = 150_000;

/// Everything needed to build the server command line.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Directory holding the CoreNLP jars.
    pub dir: PathBuf,
    pub port: u16,
    /// Maximum JVM heap, in gigabytes.
    pub max_memory_gb: u32,
    pub threads: usize,
    /// Runtime executable (default: `java`).
    pub java_bin: String,
}

impl LaunchOptions {
    /// Class path `<absolute dir>/*` covering every jar in the directory.
    pub fn classpath(&self) -> Result<String> {
        let dir = std::path::absolute(&self.dir)?;
        let mut classpath = dir.display().to_string();
        if !classpath.ends_with(std::path::MAIN_SEPARATOR) {
            classpath.push(std::path::MAIN_SEPARATOR);
        }
        classpath.push('*');
        Ok(classpath)
    }

    /// Arguments passed to the runtime, in order.
    pub fn command_args(&self) -> Result<Vec<String>> {
        Ok(vec![
            format!("-Djava.io.tmpdir={TMP_DIR}"),
            format!("-mx{}g", self.max_memory_gb),
            "-cp".to_string(),
            self.classpath()?,
            SERVER_CLASS.to_string(),
            "-threads".to_string(),
            self.threads.to_string(),
            "-port".to_string(),
            self.port.to_string(),
            "-timeout".to_string(),
            SERVER_TIMEOUT_MS.to_string(),
            "-lazy".to_string(),
            "false".to_string(),
        ])
    }
}

/// Fail with [`CoreNlpError::Configuration`] unless `dir` is an existing directory.
pub fn check_server_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(CoreNlpError::Configuration(format!(
            "CoreNLP directory not found: {dir:?}"
        )))
    }
}

/// Fail with [`CoreNlpError::Environment`] unless `java_bin -version` runs successfully.
pub fn check_runtime(java_bin: &str) -> Result<()> {
    let output = Command::new(java_bin)
        .arg("-version")
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            CoreNlpError::Environment(format!(
                "Java is required to launch a CoreNLP server ('{java_bin}' could not be run: {e})"
            ))
        })?;

    if !output.status.success() {
        return Err(CoreNlpError::Environment(format!(
            "'{java_bin} -version' exited with {}",
            output.status
        )));
    }

    // `java -version` reports on stderr
    let version = String::from_utf8_lossy(&output.stderr);
    debug!(
        java_bin,
        version = version.lines().next().unwrap_or_default(),
        "runtime found"
    );
    Ok(())
}

/// A server process owned by a client.
///
/// Dropping the handle kills the process and waits for it to exit.
/// [`ServerProcess::terminate`] does the same explicitly and may be called
/// any number of times.
#[derive(Debug)]
pub struct ServerProcess {
    child: Option<Child>,
    port: u16,
}

impl ServerProcess {
    /// Validate the environment and spawn the server.
    ///
    /// Checks, in order: the jar directory exists, the runtime answers a
    /// version query, the `tmp` directory exists or can be created.
    pub fn launch(options: &LaunchOptions) -> Result<Self> {
        check_server_dir(&options.dir)?;
        check_runtime(&options.java_bin)?;
        fs::create_dir_all(TMP_DIR)?;

        let args = options.command_args()?;
        info!(
            java_bin = %options.java_bin,
            command = %args.join(" "),
            port = options.port,
            "launching CoreNLP server"
        );

        let child = Command::new(&options.java_bin)
            .args(&args)
            .stdin(Stdio::null())
            .spawn()?;
        metrics::counter!(telemetry::SERVER_LAUNCHES_TOTAL).increment(1);

        Ok(Self {
            child: Some(child),
            port: options.port,
        })
    }

    /// OS process id, while the process is owned.
    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether the process is still owned and has not exited.
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// Kill the process and wait for it to exit.
    ///
    /// A process that already exited, or was already terminated through this
    /// handle, is not an error.
    pub fn terminate(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        let pid = child.id();
        if let Err(e) = child.kill() {
            debug!(pid, error = %e, "kill failed, process already exited");
        }
        match child.wait() {
            Ok(status) => info!(pid, %status, "CoreNLP server terminated"),
            Err(e) => debug!(pid, error = %e, "wait failed after kill"),
        }
    }
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        self.terminate();
    }
}

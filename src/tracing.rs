use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Writer that tees every log line to stderr and, when configured, a log file.
#[derive(Clone)]
struct TeeWriter {
    file: Arc<RwLock<Option<std::fs::File>>>,
}

impl TeeWriter {
    fn new(file: Option<std::fs::File>) -> Self {
        Self {
            file: Arc::new(RwLock::new(file)),
        }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for TeeWriter {
    type Writer = TeeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = io::stderr().write(buf)?;
        let mut guard = self.file.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = guard.as_mut() {
            let _ = file.write_all(&buf[..written]);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        let mut guard = self.file.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = guard.as_mut() {
            let _ = file.flush();
        }
        Ok(())
    }
}

fn open_log_file(path: &Path) -> io::Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. `log` records are forwarded into `tracing`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(log_file: Option<&Path>) {
    let _ = tracing_log::LogTracer::init();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let (file, open_error) = match log_file.map(|path| (path, open_log_file(path))) {
        Some((_, Ok(file))) => (Some(file), None),
        Some((path, Err(err))) => (None, Some((path, err))),
        None => (None, None),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(TeeWriter::new(file))
        .try_init();

    if let Some((path, err)) = open_error {
        log::warn!(
            "⚠️ Cannot open log file {}: {}; logging to stderr only",
            path.to_string_lossy(),
            err
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tee_writer_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("films-db.log");
        let mut writer = TeeWriter::new(Some(open_log_file(&path).unwrap()));

        writer.write_all(b"hello log\n").unwrap();
        writer.flush().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "hello log\n");
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let err = open_log_file(&blocker.join("films-db.log")).unwrap_err();
        assert!(!err.to_string().is_empty());

        // Falls back to stderr instead of failing.
        init(Some(&blocker.join("films-db.log")));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(None);
        init(None);
    }
}


use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::fmt;

use chrono::Local;
use strum_macros::Display;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Where a line goes. Debug lines never reach the console.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    ConsoleOnly,
    #[default]
    ConsoleAndFile,
    FileOnly,
}

trait LogSink: Send + Sync {
    fn write_line(&self, level: LogLevel, line: &str);
}

struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Debug => {}
            LogLevel::Info => println!("{line}"),
            LogLevel::Warn | LogLevel::Error => eprintln!("{line}"),
        }
    }
}

/// Keeps every line in memory; used when the caller wants to inspect output.
#[derive(Default)]
struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl LogSink for MemorySink {
    fn write_line(&self, level: LogLevel, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(format!("{level} {line}"));
        }
    }
}

struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    fn open(dir: &Path) -> std::io::Result<(Self, PathBuf)> {
        fs::create_dir_all(dir)?;
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!("stitchplan-{stamp}.log"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok((
            Self {
                file: Mutex::new(file),
            },
            path,
        ))
    }
}

impl LogSink for FileSink {
    fn write_line(&self, _level: LogLevel, line: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }
}

struct FileState {
    sink: Option<Arc<FileSink>>,
    path: Option<PathBuf>,
    attempted: bool,
    dir: PathBuf,
}

impl Default for FileState {
    fn default() -> Self {
        Self {
            sink: None,
            path: None,
            attempted: false,
            dir: PathBuf::from("logs"),
        }
    }
}

/// Console plus lazily opened session file. Cloning shares the same sinks.
#[derive(Clone)]
pub struct Logger {
    console: Arc<dyn LogSink>,
    memory: Option<Arc<MemorySink>>,
    file: Arc<Mutex<FileState>>,
    file_enabled: Arc<AtomicBool>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            console: Arc::new(ConsoleSink),
            memory: None,
            file: Arc::new(Mutex::new(FileState::default())),
            file_enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// A logger that also records every console and file line in memory, with file output off.
    pub fn capturing() -> Self {
        let logger = Self {
            memory: Some(Arc::new(MemorySink::default())),
            ..Self::new()
        };
        logger.set_file_logging_enabled(false);
        logger
    }

    pub fn captured(&self) -> Vec<String> {
        self.memory
            .as_ref()
            .and_then(|m| m.lines.lock().ok().map(|l| l.clone()))
            .unwrap_or_default()
    }

    fn file_sink(&self) -> Option<Arc<FileSink>> {
        let mut state = self.file.lock().ok()?;
        if state.attempted {
            return state.sink.clone();
        }
        state.attempted = true;

        match FileSink::open(&state.dir) {
            Ok((sink, path)) => {
                let sink = Arc::new(sink);
                state.path = Some(path);
                state.sink = Some(sink.clone());
                Some(sink)
            }
            Err(err) => {
                eprintln!("WARN: File logging unavailable; continuing without a log file. ({err})");
                None
            }
        }
    }

    pub fn log(&self, level: LogLevel, message: &str, target: LogTarget) {
        if let Some(memory) = &self.memory {
            memory.write_line(level, message);
        } else if target != LogTarget::FileOnly {
            self.console.write_line(level, message);
        }

        if target != LogTarget::ConsoleOnly && self.file_logging_enabled() {
            if let Some(sink) = self.file_sink() {
                let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
                sink.write_line(level, &format!("[{timestamp}] {level:<5} {message}"));
            }
        }
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message.as_ref(), LogTarget::FileOnly);
    }

    pub fn info(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Info, message.as_ref(), target);
    }

    pub fn warn(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Warn, message.as_ref(), target);
    }

    pub fn error(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Error, message.as_ref(), target);
    }

    pub fn set_file_logging_enabled(&self, enabled: bool) {
        self.file_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn file_logging_enabled(&self) -> bool {
        self.file_enabled.load(Ordering::SeqCst)
    }

    /// Only takes effect before the session file has been opened.
    pub fn set_log_dir(&self, dir: impl AsRef<Path>) {
        if let Ok(mut state) = self.file.lock() {
            if !state.attempted {
                state.dir = dir.as_ref().to_path_buf();
            }
        }
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.file.lock().ok().and_then(|s| s.path.clone())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("log_path", &self.log_path())
            .field("file_enabled", &self.file_logging_enabled())
            .finish()
    }
}

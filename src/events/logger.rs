//! Per-session event log file
//!
//! One `.evlog` per app launch in `logs/`, one compact line per event.

use bevy::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use uuid::Uuid;

use super::format::serialize_event;
use super::types::DraftEvent;

#[derive(Resource, Clone)]
pub struct EventLogConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    pub enabled: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            enabled: true,
        }
    }
}

/// Active event logger with file handle
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    path: Option<PathBuf>,
    session_id: String,
    config: EventLogConfig,
}

impl EventLogger {
    /// Create a new event logger (file is opened by `start_session`)
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            writer: None,
            path: None,
            session_id: String::new(),
            config,
        }
    }

    /// Open `<timestamp>_<uuid8>.evlog` and write the SessionStart line
    pub fn start_session(&mut self, timestamp: &str) {
        if !self.config.enabled {
            return;
        }

        self.session_id = Uuid::new_v4().to_string();

        if let Err(e) = std::fs::create_dir_all(&self.config.log_dir) {
            warn!("Failed to create log directory: {}", e);
            return;
        }

        let filename = format!("{}_{}.evlog", timestamp, &self.session_id[..8]);
        let path = self.config.log_dir.join(filename);

        match OpenOptions::new().create(true).write(true).truncate(true).open(&path) {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                info!("Event logging started: {} (session: {})", path.display(), &self.session_id[..8]);
                self.path = Some(path);

                self.log(0, &DraftEvent::SessionStart {
                    session_id: self.session_id.clone(),
                    timestamp: timestamp.to_string(),
                });
            }
            Err(e) => {
                warn!("Failed to open event log: {}", e);
            }
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Path of the open log file, if any
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Flush and close the current file
    pub fn end_session(&mut self) {
        if let Some(mut writer) = self.writer.take()
            && let Err(e) = writer.flush()
        {
            warn!("Failed to flush event log: {}", e);
        }
    }

    pub fn log(&mut self, time_ms: u32, event: &DraftEvent) {
        let Some(writer) = &mut self.writer else {
            return;
        };

        let line = serialize_event(time_ms, event);
        if let Err(e) = writeln!(writer, "{}", line) {
            warn!("Failed to write event: {}", e);
        }
    }

    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(EventLogConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::parse_event;

    #[test]
    fn test_session_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("draft_evlog_{}", Uuid::new_v4()));
        let mut logger = EventLogger::new(EventLogConfig {
            log_dir: dir.clone(),
            enabled: true,
        });
        logger.start_session("20260101_120000");
        assert!(logger.is_active());
        logger.log(250, &DraftEvent::WelcomeStarted);
        let path = logger.path().cloned().unwrap();
        logger.end_session();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("T:00000|SS|"));
        assert_eq!(parse_event(lines[1]), Some((250, DraftEvent::WelcomeStarted)));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let mut logger = EventLogger::new(EventLogConfig {
            log_dir: std::env::temp_dir().join("draft_evlog_disabled"),
            enabled: false,
        });
        logger.start_session("20260101_120000");
        assert!(!logger.is_active());
        logger.log(0, &DraftEvent::WelcomeStarted);
    }
}

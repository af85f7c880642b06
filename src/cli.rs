//! Command line interface.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::AppConfig;
use crate::domain::source::SourceRegistry;

/// Stream appended lines of files (or stdin) to the browser.
#[derive(Debug, Parser)]
#[command(name = "webtail", version, about)]
pub struct Cli {
    /// Files to offer; with none, standard input is streamed
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Address to bind (overrides WEBTAIL__SERVER__HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides WEBTAIL__SERVER__PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Only stream lines appended after a viewer connects
    #[arg(long)]
    pub from_end: bool,
}

/// Errors found while checking the command line at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Cannot open {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),
}

impl Cli {
    /// Applies flags on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.from_end {
            config.tail.start_at_end = true;
        }
    }

    /// Builds the source registry from the positional files.
    ///
    /// Each file is canonicalized to an absolute path and must be an
    /// openable regular file. No files means standard-input mode.
    ///
    /// # Errors
    ///
    /// Returns `StartupError` for the first file that fails the check.
    pub fn source_registry(&self) -> Result<SourceRegistry, StartupError> {
        if self.files.is_empty() {
            return Ok(SourceRegistry::stdin_only());
        }

        let mut paths = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let unreadable = |source| StartupError::Unreadable {
                path: file.clone(),
                source,
            };
            let path = std::fs::canonicalize(file).map_err(unreadable)?;
            if !std::fs::metadata(&path).map_err(unreadable)?.is_file() {
                return Err(StartupError::NotAFile(file.clone()));
            }
            std::fs::File::open(&path).map_err(unreadable)?;
            paths.push(path);
        }

        Ok(SourceRegistry::new(paths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::source::SourceId;

    #[test]
    fn no_files_means_stdin_mode() {
        let cli = Cli::try_parse_from(["webtail"]).unwrap();
        assert!(cli.source_registry().unwrap().is_stdin_mode());
    }

    #[test]
    fn files_are_canonicalized() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.log");
        std::fs::write(&file, "").unwrap();
        let relative = dir.path().join(".").join("app.log");

        let cli = Cli::try_parse_from(["webtail".into(), relative.into_os_string()]).unwrap();
        let registry = cli.source_registry().unwrap();

        let expected = std::fs::canonicalize(&file).unwrap();
        assert_eq!(registry.sources(), &[SourceId::file(expected)]);
    }

    #[test]
    fn missing_file_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.log");

        let cli = Cli::try_parse_from(["webtail".into(), missing.into_os_string()]).unwrap();
        assert!(matches!(
            cli.source_registry(),
            Err(StartupError::Unreadable { .. })
        ));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cli =
            Cli::try_parse_from(["webtail".into(), dir.path().as_os_str().to_owned()]).unwrap();
        assert!(matches!(cli.source_registry(), Err(StartupError::NotAFile(_))));
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from(["webtail", "--host", "127.0.0.1", "-p", "9000", "--from-end"])
            .unwrap();
        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert!(config.tail.start_at_end);
    }

    #[test]
    fn absent_flags_leave_config_alone() {
        let cli = Cli::try_parse_from(["webtail"]).unwrap();
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.server.port, 8081);
        assert!(!config.tail.start_at_end);
    }
}

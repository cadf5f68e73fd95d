use std::io;
use std::path::PathBuf;

use vmod_config::{ConfigError, DriverName};

/// 进程退出码
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Failure = 1,
}

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("[{command}] could not be started: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("[{command}] failed with error {status}")]
    ModuleLoad { command: String, status: i32 },

    #[error("cannot read module registry {}: {source}", path.display())]
    Registry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("expected exactly one major for driver {driver}, found {majors:?}")]
    Consistency { driver: DriverName, majors: Vec<u32> },

    #[error("[{command}] failed: {source}")]
    NodeCreation {
        command: String,
        #[source]
        source: io::Error,
    },
}

use std::io;
use std::path::PathBuf;

use crate::driver::DriverName;

/// 配置文件处理过程中的错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid XML syntax in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
    #[error("Semantic XML error: {0}")]
    Structural(#[from] StructuralError),
}

/// 文档语法正确，但违反了驱动/模块/载板之间的结构约束
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("exactly one driver per mezzanine: found {count} drivers named {driver}")]
    DuplicateDriver { driver: DriverName, count: usize },

    #[error("all modules in driver {driver} must be of type carrier, found {bus_type:?}")]
    NonCarrierModule { driver: DriverName, bus_type: String },

    #[error("exactly one carrier space per module: module {lun} of driver {driver} has {count}")]
    CarrierCount {
        driver: DriverName,
        lun: String,
        count: usize,
    },

    #[error("<{element}> in driver {driver} has no {attribute} attribute")]
    MissingAttribute {
        driver: DriverName,
        element: &'static str,
        attribute: &'static str,
    },

    #[error("{attribute}={value:?} in driver {driver} is not a non-negative integer")]
    InvalidNumber {
        driver: DriverName,
        attribute: &'static str,
        value: String,
    },

    #[error("logical module number {lun} used more than once in driver {driver}")]
    DuplicateLun { driver: DriverName, lun: u32 },

    #[error("driver {driver} declares {count} modules, at most {max} are supported")]
    TooManyModules {
        driver: DriverName,
        count: usize,
        max: usize,
    },
}

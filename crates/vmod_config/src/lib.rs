//! VMOD 板卡配置解析
//!
//! 从板卡配置XML中读取各个驱动下挂载的mezzanine模块，校验结构约束后，
//! 生成交给 `insmod` 的 `luns=` 参数。

pub mod driver;
pub mod error;
pub mod model;
pub mod parser;

pub use driver::{DriverClass, DriverName, DriverTable};
pub use error::{ConfigError, StructuralError};
pub use model::{BusType, CarrierSlot, InstallRecord, ModuleDescriptor, MAX_BOARDS};
pub use parser::{parse_file, parse_str};

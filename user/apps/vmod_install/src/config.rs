use std::path::PathBuf;

use vmod_config::{DriverName, DriverTable};

pub const DEFAULT_MODULE_DIR: &str = ".";
pub const DEFAULT_REGISTRY: &str = "/proc/devices";
pub const DEFAULT_DEV_DIR: &str = "/dev";

/// # InstallConfig结构体
/// 一次安装所需的全部参数
#[derive(Debug, Clone)]
pub struct InstallConfig {
    pub xml_file: PathBuf,
    /// 按安装顺序排列
    pub drivers: Vec<DriverName>,
    /// `<driver>.ko` 所在目录
    pub module_dir: PathBuf,
    /// 已注册字符设备列表，通常是 `/proc/devices`
    pub registry: PathBuf,
    /// 设备节点创建在此目录下
    pub dev_dir: PathBuf,
    pub dry_run: bool,
    pub table: DriverTable,
}

impl InstallConfig {
    pub fn new(xml_file: impl Into<PathBuf>, drivers: Vec<DriverName>) -> Self {
        Self {
            xml_file: xml_file.into(),
            drivers,
            module_dir: PathBuf::from(DEFAULT_MODULE_DIR),
            registry: PathBuf::from(DEFAULT_REGISTRY),
            dev_dir: PathBuf::from(DEFAULT_DEV_DIR),
            dry_run: false,
            table: DriverTable::VMOD,
        }
    }

    pub fn module_path(&self, driver: &DriverName) -> PathBuf {
        self.module_dir.join(format!("{}.ko", driver))
    }

    pub fn node_path(&self, driver: &DriverName) -> PathBuf {
        self.dev_dir.join(driver.as_str())
    }
}

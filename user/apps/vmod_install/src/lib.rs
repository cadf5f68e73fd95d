//! 根据板卡配置文件安装 VMOD 驱动：insmod 驱动模块，
//! 从 `/proc/devices` 取得主设备号，再创建 `/dev` 下的设备节点。

pub mod args;
pub mod config;
pub mod device_number;
pub mod error;
pub mod installer;
pub mod registry;
pub mod system;

pub use config::InstallConfig;
pub use error::{ExitStatus, InstallError};
pub use installer::{InstalledDriver, Installer};
pub use system::{DeviceNode, LinuxSystem, ModuleLoad, SystemOps};

/// 解析配置文件并依次安装 `config.drivers` 中的驱动
pub fn run<S: SystemOps>(
    config: &InstallConfig,
    system: &mut S,
) -> Result<Vec<InstalledDriver>, InstallError> {
    let records = vmod_config::parse_file(&config.xml_file, &config.drivers, &config.table)?;
    for record in &records {
        log::debug!("install record {}", record);
    }
    Installer::new(config, system).install(&records)
}

use std::path::PathBuf;

use vmod_config::{DriverName, InstallRecord};

use crate::config::InstallConfig;
use crate::device_number::{DeviceNumber, Major};
use crate::error::InstallError;
use crate::registry::CharDeviceRegistry;
use crate::system::{DeviceNode, ModuleLoad, SystemOps};

/// 一个安装成功的驱动
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledDriver {
    pub driver: DriverName,
    pub major: Major,
    pub node: PathBuf,
}

/// 按顺序安装驱动，遇到第一个错误立即停止，不回滚已安装的驱动
pub struct Installer<'a, S: SystemOps> {
    config: &'a InstallConfig,
    system: &'a mut S,
}

impl<'a, S: SystemOps> Installer<'a, S> {
    pub fn new(config: &'a InstallConfig, system: &'a mut S) -> Self {
        Self { config, system }
    }

    pub fn install(
        &mut self,
        records: &[InstallRecord],
    ) -> Result<Vec<InstalledDriver>, InstallError> {
        let mut installed = Vec::with_capacity(records.len());
        for record in records {
            if let Some(driver) = self.install_one(record)? {
                installed.push(driver);
            }
        }
        Ok(installed)
    }

    /// dry run 时返回 `None`
    fn install_one(
        &mut self,
        record: &InstallRecord,
    ) -> Result<Option<InstalledDriver>, InstallError> {
        let driver = &record.driver;
        let load = ModuleLoad {
            module: self.config.module_path(driver),
            luns: record.luns(),
        };

        if self.config.dry_run {
            log::info!("Would run [{}]", load);
            log::info!(
                "Would create {} for the major registered by {}",
                self.config.node_path(driver).display(),
                driver
            );
            return Ok(None);
        }

        log::info!("Trying [{}]", load);
        let status = self
            .system
            .load_module(&load)
            .map_err(|source| InstallError::Spawn {
                command: load.to_string(),
                source,
            })?;
        if status != 0 {
            return Err(InstallError::ModuleLoad {
                command: load.to_string(),
                status,
            });
        }

        let major = self.lookup_major(driver)?;
        let node = DeviceNode {
            path: self.config.node_path(driver),
            number: DeviceNumber::new(major, 0),
        };
        log::info!("Trying [{}]", node);
        self.system
            .make_node(&node)
            .map_err(|source| InstallError::NodeCreation {
                command: node.to_string(),
                source,
            })?;

        log::info!("Device {} created", node.path.display());
        log::info!("Driver {} installed, major number {}", driver, major);
        Ok(Some(InstalledDriver {
            driver: driver.clone(),
            major,
            node: node.path,
        }))
    }

    /// 刚加载的驱动在注册表中必须恰好出现一次
    fn lookup_major(&mut self, driver: &DriverName) -> Result<Major, InstallError> {
        let text = self
            .system
            .read_registry(&self.config.registry)
            .map_err(|source| InstallError::Registry {
                path: self.config.registry.clone(),
                source,
            })?;
        let majors = CharDeviceRegistry::parse(&text).majors_of(driver);
        match majors.as_slice() {
            [major] => Ok(*major),
            _ => Err(InstallError::Consistency {
                driver: driver.clone(),
                majors: majors.iter().map(Major::data).collect(),
            }),
        }
    }
}

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use vmod_config::DriverName;

use crate::config::{InstallConfig, DEFAULT_DEV_DIR, DEFAULT_MODULE_DIR, DEFAULT_REGISTRY};

/// # Args结构体
/// 使用clap解析命令行，产生安装配置
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Board configuration XML file
    xmlfile: PathBuf,

    /// Drivers to install, in this order
    #[arg(required = true, value_parser = parse_driver_name)]
    drivers: Vec<DriverName>,

    /// Directory holding the <driver>.ko files
    #[arg(short, long, default_value = DEFAULT_MODULE_DIR)]
    module_dir: PathBuf,

    /// Registry of loaded character device drivers
    #[arg(long, default_value = DEFAULT_REGISTRY)]
    devices: PathBuf,

    /// Directory where device nodes are created
    #[arg(long, default_value = DEFAULT_DEV_DIR)]
    dev_dir: PathBuf,

    /// Print the commands without running them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Log level
    #[arg(short, long, default_value_t = String::from("info"))]
    log: String,
}

fn parse_driver_name(s: &str) -> Result<DriverName, String> {
    s.parse()
}

impl Args {
    /// # 将Args结构体转换为InstallConfig结构体
    pub fn as_config(&self) -> InstallConfig {
        let mut config = InstallConfig::new(self.xmlfile.clone(), self.drivers.clone());
        config.module_dir = self.module_dir.clone();
        config.registry = self.devices.clone();
        config.dev_dir = self.dev_dir.clone();
        config.dry_run = self.dry_run;
        config
    }

    pub fn log_level(&self) -> LevelFilter {
        parse_log_level(&self.log)
    }
}

fn parse_log_level(level_str: &str) -> LevelFilter {
    match level_str.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

use core::fmt;
use std::fs;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use nix::sys::stat::{mknod, Mode, SFlag};

use crate::device_number::DeviceNumber;

/// 加载一个驱动模块：`insmod <module> luns=<luns>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLoad {
    pub module: PathBuf,
    pub luns: String,
}

impl ModuleLoad {
    pub fn luns_arg(&self) -> String {
        format!("luns={}", self.luns)
    }
}

impl fmt::Display for ModuleLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "insmod {} {}", self.module.display(), self.luns_arg())
    }
}

/// 字符设备节点：`mknod <path> c <major> <minor>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceNode {
    pub path: PathBuf,
    pub number: DeviceNumber,
}

impl fmt::Display for DeviceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mknod {} c {} {}",
            self.path.display(),
            self.number.major(),
            self.number.minor()
        )
    }
}

/// 安装过程用到的操作系统接口
pub trait SystemOps {
    /// 运行模块加载命令，返回其退出状态
    fn load_module(&mut self, load: &ModuleLoad) -> io::Result<i32>;

    /// 读取已注册字符设备列表的原始文本
    fn read_registry(&mut self, path: &Path) -> io::Result<String>;

    fn make_node(&mut self, node: &DeviceNode) -> io::Result<()>;
}

/// 真正调用 insmod / mknod 的实现
#[derive(Debug, Default)]
pub struct LinuxSystem;

/// 新建节点的权限，实际权限还要再经过 umask
const NODE_MODE: libc::mode_t = 0o666;

impl SystemOps for LinuxSystem {
    fn load_module(&mut self, load: &ModuleLoad) -> io::Result<i32> {
        let status = Command::new("insmod")
            .arg(&load.module)
            .arg(load.luns_arg())
            .status()?;
        // 被信号杀死时按shell的惯例报告 128+signo
        Ok(status
            .code()
            .unwrap_or_else(|| 128 + status.signal().unwrap_or(0)))
    }

    fn read_registry(&mut self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn make_node(&mut self, node: &DeviceNode) -> io::Result<()> {
        mknod(
            node.path.as_path(),
            SFlag::S_IFCHR,
            Mode::from_bits_truncate(NODE_MODE),
            node.number.dev_t(),
        )
        .map_err(io::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_number::Major;

    #[test]
    fn commands_render_like_shell() {
        let load = ModuleLoad {
            module: PathBuf::from("./vmod12a2.ko"),
            luns: "1,vmodio,0,1".to_string(),
        };
        assert_eq!(load.to_string(), "insmod ./vmod12a2.ko luns=1,vmodio,0,1");

        let node = DeviceNode {
            path: PathBuf::from("/dev/vmod12a2"),
            number: DeviceNumber::new(Major::new(245), 0),
        };
        assert_eq!(node.to_string(), "mknod /dev/vmod12a2 c 245 0");
    }

    #[test]
    fn read_registry_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devices");
        fs::write(&path, "Character devices:\n245 vmodttl\n").unwrap();

        let text = LinuxSystem.read_registry(&path).unwrap();
        assert!(text.contains("vmodttl"));
        assert!(LinuxSystem.read_registry(&dir.path().join("none")).is_err());
    }
}

use core::fmt;

use nix::sys::stat::makedev;

/// 主设备号，由内核在加载驱动时分配
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Major(u32);

impl Major {
    pub const fn new(x: u32) -> Self {
        Major(x)
    }

    pub const fn data(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Major {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DeviceNumber {
    major: Major,
    minor: u32,
}

impl DeviceNumber {
    pub const fn new(major: Major, minor: u32) -> Self {
        Self { major, minor }
    }

    pub const fn major(&self) -> Major {
        self.major
    }

    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// 转换为 mknod(2) 使用的 `dev_t`
    pub fn dev_t(&self) -> libc::dev_t {
        makedev(self.major.data() as u64, self.minor as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_t_matches_libc_split() {
        let number = DeviceNumber::new(Major::new(245), 0);
        let dev = number.dev_t();
        assert_eq!(nix::sys::stat::major(dev), 245);
        assert_eq!(nix::sys::stat::minor(dev), 0);
    }

    #[test]
    fn large_major() {
        let number = DeviceNumber::new(Major::new(511), 3);
        let dev = number.dev_t();
        assert_eq!(nix::sys::stat::major(dev), 511);
        assert_eq!(nix::sys::stat::minor(dev), 3);
    }
}

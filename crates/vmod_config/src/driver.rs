use core::fmt;
use core::str::FromStr;

/// 驱动名
///
/// 构造时统一去除首尾空白并转换为小写，之后所有的比较都直接使用该规范形式。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverName(String);

impl DriverName {
    /// 创建规范化的驱动名，空名字返回 `None`
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self(name.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DriverName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or_else(|| "driver name must not be empty".to_string())
    }
}

impl fmt::Display for DriverName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DriverClass {
    /// 载板驱动（VME/PCI 载板本身）
    Carrier,
    /// 插在载板上的mezzanine模块驱动
    Mezzanine,
}

/// 已知驱动的静态表
///
/// 解析器通过参数拿到这张表，而不是依赖全局常量。
#[derive(Debug, Clone, Copy)]
pub struct DriverTable {
    carriers: &'static [&'static str],
    mezzanines: &'static [&'static str],
}

impl DriverTable {
    /// VMOD 系列的驱动
    pub const VMOD: Self = Self::new(
        &["vmodio", "mod-pci"],
        &["vmod12a2", "vmod16a2", "vmod12e16", "vmodttl", "vmoddor"],
    );

    /// 表中的名字必须已经是小写
    pub const fn new(
        carriers: &'static [&'static str],
        mezzanines: &'static [&'static str],
    ) -> Self {
        Self {
            carriers,
            mezzanines,
        }
    }

    pub fn classify(&self, name: &DriverName) -> Option<DriverClass> {
        if self.carriers.contains(&name.as_str()) {
            Some(DriverClass::Carrier)
        } else if self.mezzanines.contains(&name.as_str()) {
            Some(DriverClass::Mezzanine)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_canonicalized() {
        let name = DriverName::new("  VMOD12A2 ").unwrap();
        assert_eq!(name.as_str(), "vmod12a2");
        assert_eq!(name, "vmod12a2".parse::<DriverName>().unwrap());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(DriverName::new("   ").is_none());
        assert!("".parse::<DriverName>().is_err());
    }

    #[test]
    fn classify_vmod_drivers() {
        let table = DriverTable::VMOD;
        let name = |s: &str| DriverName::new(s).unwrap();

        assert_eq!(table.classify(&name("VMODIO")), Some(DriverClass::Carrier));
        assert_eq!(table.classify(&name("mod-pci")), Some(DriverClass::Carrier));
        assert_eq!(
            table.classify(&name("vmodttl")),
            Some(DriverClass::Mezzanine)
        );
        assert_eq!(table.classify(&name("sis3300")), None);
    }
}

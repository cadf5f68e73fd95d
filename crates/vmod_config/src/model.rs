use core::fmt;

use crate::driver::DriverName;

/// 驱动参数数组的容量（VMOD_MAX_BOARDS），装满的数组会被驱动拒绝
pub const MAX_BOARDS: usize = 64;

/// 模块的总线挂载类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusType {
    /// 插在载板上
    Carrier,
    /// 其他类型（PCI、VME...），保留原始写法用于报错
    Other(String),
}

impl BusType {
    /// 不区分大小写，旧配置文件中的缩写 `car` 视为 `carrier`
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "carrier" | "car" => BusType::Carrier,
            _ => BusType::Other(raw.to_string()),
        }
    }

    pub fn is_carrier(&self) -> bool {
        matches!(self, BusType::Carrier)
    }
}

/// 模块在哪块载板的哪个位置上
///
/// 字段保留配置文件中的原始写法，原样传给驱动。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierSlot {
    pub carrier_name: String,
    pub board_number: String,
    pub board_position: String,
}

/// 一块mezzanine模块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// logical module number
    pub lun: String,
    pub carrier: CarrierSlot,
}

impl ModuleDescriptor {
    /// 展开成 `luns=` 参数里的4个字段
    pub fn flatten(&self) -> [&str; 4] {
        [
            &self.lun,
            &self.carrier.carrier_name,
            &self.carrier.board_number,
            &self.carrier.board_position,
        ]
    }
}

/// 一次 `insmod` 所需的全部信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRecord {
    pub driver: DriverName,
    /// 按文档顺序排列
    pub modules: Vec<ModuleDescriptor>,
}

impl InstallRecord {
    /// 逗号连接的参数串，例如 `1,vmodio,0,1,2,vmodio,0,2`
    pub fn luns(&self) -> String {
        self.modules
            .iter()
            .flat_map(|m| m.flatten())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for InstallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.driver, self.luns())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(lun: &str, board_number: &str, board_position: &str) -> ModuleDescriptor {
        ModuleDescriptor {
            lun: lun.to_string(),
            carrier: CarrierSlot {
                carrier_name: "vmodio".to_string(),
                board_number: board_number.to_string(),
                board_position: board_position.to_string(),
            },
        }
    }

    #[test]
    fn bus_type_aliases() {
        assert!(BusType::parse("carrier").is_carrier());
        assert!(BusType::parse("CARRIER").is_carrier());
        assert!(BusType::parse("CAR").is_carrier());
        assert_eq!(BusType::parse("PCI"), BusType::Other("PCI".to_string()));
    }

    #[test]
    fn luns_joins_in_order() {
        let record = InstallRecord {
            driver: DriverName::new("vmod12a2").unwrap(),
            modules: vec![module("1", "0", "1"), module("2", "0", "2")],
        };
        assert_eq!(record.luns(), "1,vmodio,0,1,2,vmodio,0,2");
        assert_eq!(record.to_string(), "(vmod12a2, 1,vmodio,0,1,2,vmodio,0,2)");
    }

    #[test]
    fn no_modules_gives_empty_luns() {
        let record = InstallRecord {
            driver: DriverName::new("vmodttl").unwrap(),
            modules: Vec::new(),
        };
        assert_eq!(record.luns(), "");
    }
}

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::driver::{DriverClass, DriverName, DriverTable};
use crate::error::{ConfigError, StructuralError};
use crate::model::{BusType, CarrierSlot, InstallRecord, ModuleDescriptor, MAX_BOARDS};

const DRIVER_TAG: &str = "driver";
const MODULE_TAG: &str = "module";
const CARRIER_TAG: &str = "carrier";

/// 读取并解析板卡配置文件
///
/// ## 参数
///
/// - `path`: XML文件路径
/// - `requested`: 需要安装的驱动，结果按此顺序排列
/// - `table`: 已知驱动表
///
/// ## 返回值
///
/// 每个在文档中出现的驱动对应一条 [`InstallRecord`]，文档中没有的驱动被跳过。
pub fn parse_file(
    path: &Path,
    requested: &[DriverName],
    table: &DriverTable,
) -> Result<Vec<InstallRecord>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text, path, requested, table)
}

/// 与 [`parse_file`] 相同，但直接解析内存中的文档
pub fn parse_str(
    xml: &str,
    requested: &[DriverName],
    table: &DriverTable,
) -> Result<Vec<InstallRecord>, ConfigError> {
    parse_document(xml, Path::new("<input>"), requested, table)
}

fn parse_document(
    text: &str,
    origin: &Path,
    requested: &[DriverName],
    table: &DriverTable,
) -> Result<Vec<InstallRecord>, ConfigError> {
    let doc = Document::parse(text).map_err(|source| ConfigError::Malformed {
        path: origin.to_path_buf(),
        source,
    })?;

    let drivers: Vec<Node> = doc
        .descendants()
        .filter(|n| n.has_tag_name(DRIVER_TAG))
        .collect();

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for name in requested {
        if !seen.insert(name) {
            log::debug!("driver {} requested more than once, ignoring repeat", name);
            continue;
        }
        if table.classify(name).is_none() {
            log::warn!("{} is not a known VMOD driver", name);
        }

        let matched: Vec<Node> = drivers
            .iter()
            .copied()
            .filter(|d| name_attribute(d).as_ref() == Some(name))
            .collect();
        log::info!("Got {} driver(s) of type {}", matched.len(), name);

        match matched.as_slice() {
            [] => continue,
            [driver] => records.push(InstallRecord {
                driver: name.clone(),
                modules: parse_modules(name, *driver, table)?,
            }),
            _ => {
                return Err(StructuralError::DuplicateDriver {
                    driver: name.clone(),
                    count: matched.len(),
                }
                .into())
            }
        }
    }
    Ok(records)
}

fn name_attribute(driver: &Node) -> Option<DriverName> {
    driver.attribute("name").and_then(DriverName::new)
}

/// 一个驱动下的模块要么全部有效，要么整体失败
fn parse_modules(
    driver: &DriverName,
    node: Node,
    table: &DriverTable,
) -> Result<Vec<ModuleDescriptor>, StructuralError> {
    let modules: Vec<Node> = node
        .descendants()
        .filter(|n| n.has_tag_name(MODULE_TAG))
        .collect();

    for module in &modules {
        let bus_type = BusType::parse(module.attribute("bus_type").unwrap_or(""));
        if let BusType::Other(bus_type) = bus_type {
            return Err(StructuralError::NonCarrierModule {
                driver: driver.clone(),
                bus_type,
            });
        }
    }

    if modules.len() >= MAX_BOARDS {
        return Err(StructuralError::TooManyModules {
            driver: driver.clone(),
            count: modules.len(),
            max: MAX_BOARDS - 1,
        });
    }

    let mut luns = HashSet::new();
    let mut result = Vec::with_capacity(modules.len());
    for module in modules {
        let (lun, descriptor) = parse_module(driver, module)?;
        if !luns.insert(lun) {
            return Err(StructuralError::DuplicateLun {
                driver: driver.clone(),
                lun,
            });
        }
        let carrier = DriverName::new(&descriptor.carrier.carrier_name);
        if carrier.and_then(|c| table.classify(&c)) != Some(DriverClass::Carrier) {
            log::warn!(
                "module {} of {} sits on unknown carrier {}",
                descriptor.lun,
                driver,
                descriptor.carrier.carrier_name
            );
        }
        result.push(descriptor);
    }
    Ok(result)
}

/// 校验一个模块，返回其数值形式的 lun 和保留原始写法的描述
fn parse_module(
    driver: &DriverName,
    module: Node,
) -> Result<(u32, ModuleDescriptor), StructuralError> {
    let raw_lun = required(driver, module, "logical_module_number")?;

    let carriers: Vec<Node> = module
        .descendants()
        .filter(|n| n.has_tag_name(CARRIER_TAG))
        .collect();
    let carrier = match carriers.as_slice() {
        [carrier] => *carrier,
        _ => {
            return Err(StructuralError::CarrierCount {
                driver: driver.clone(),
                lun: raw_lun.to_string(),
                count: carriers.len(),
            })
        }
    };

    let carrier_name = required(driver, carrier, "carrier_name")?;
    if carrier_name.trim().is_empty() {
        return Err(StructuralError::MissingAttribute {
            driver: driver.clone(),
            element: CARRIER_TAG,
            attribute: "carrier_name",
        });
    }
    let board_number = required(driver, carrier, "board_number")?;
    let board_position = required(driver, carrier, "board_position")?;

    let lun = number(driver, "logical_module_number", raw_lun)?;
    number(driver, "board_number", board_number)?;
    number(driver, "board_position", board_position)?;

    Ok((
        lun,
        ModuleDescriptor {
            lun: raw_lun.to_string(),
            carrier: CarrierSlot {
                carrier_name: carrier_name.to_string(),
                board_number: board_number.to_string(),
                board_position: board_position.to_string(),
            },
        },
    ))
}

fn required<'a>(
    driver: &DriverName,
    node: Node<'a, '_>,
    attribute: &'static str,
) -> Result<&'a str, StructuralError> {
    node.attribute(attribute)
        .ok_or_else(|| StructuralError::MissingAttribute {
            driver: driver.clone(),
            element: if node.has_tag_name(CARRIER_TAG) {
                CARRIER_TAG
            } else {
                MODULE_TAG
            },
            attribute,
        })
}

/// 只接受十进制数字串，不允许空白和符号
fn number(
    driver: &DriverName,
    attribute: &'static str,
    raw: &str,
) -> Result<u32, StructuralError> {
    let invalid = || StructuralError::InvalidNumber {
        driver: driver.clone(),
        attribute,
        value: raw.to_string(),
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u32>().map_err(|_| invalid())
}

//! `/proc/devices` 的解析
//!
//! 文件格式：
//!
//! ```text
//! Character devices:
//!   1 mem
//!   4 /dev/vc/0
//! 245 vmod12a2
//!
//! Block devices:
//!   8 sd
//! ```

use vmod_config::DriverName;

use crate::device_number::Major;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Section {
    Character,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub major: Major,
    pub name: String,
}

/// 已注册的字符设备驱动
#[derive(Debug, Default, Clone)]
pub struct CharDeviceRegistry {
    entries: Vec<RegistryEntry>,
}

impl CharDeviceRegistry {
    /// 只保留 "Character devices:" 段中的条目，无法识别的行被忽略。
    /// 没有段标题的内容按字符设备处理。
    pub fn parse(text: &str) -> Self {
        let mut section = Section::Character;
        let mut entries = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(title) = line.strip_suffix(':') {
                section = if title.eq_ignore_ascii_case("character devices") {
                    Section::Character
                } else {
                    Section::Block
                };
                continue;
            }
            if section != Section::Character {
                continue;
            }

            let mut fields = line.splitn(2, char::is_whitespace);
            let (Some(major), Some(name)) = (fields.next(), fields.next()) else {
                log::debug!("skipping registry line {:?}", line);
                continue;
            };
            match major.parse::<u32>() {
                Ok(major) => entries.push(RegistryEntry {
                    major: Major::new(major),
                    name: name.trim().to_string(),
                }),
                Err(_) => log::debug!("skipping registry line {:?}", line),
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// 名字与驱动名相同（不区分大小写）的所有条目的主设备号
    pub fn majors_of(&self, driver: &DriverName) -> Vec<Major> {
        self.entries
            .iter()
            .filter(|e| DriverName::new(&e.name).as_ref() == Some(driver))
            .map(|e| e.major)
            .collect()
    }
}

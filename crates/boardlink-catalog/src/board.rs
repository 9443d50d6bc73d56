//! Typed board parameter records
//!
//! The catalog stores every attribute as a string leaf; these structs give
//! flashing logic a typed view of a board's sub-record, with parse helpers
//! for the handful of numeric and boolean settings.

use serde::{Deserialize, Serialize};

/// USB vendor/product ids for a board: a single id or an indexed set for
/// boards with several usb identities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UsbIdSet {
    Single(String),
    Indexed(serde_json::Map<String, serde_json::Value>),
}

impl UsbIdSet {
    /// All ids in the set. The indexed form keeps the catalog document's
    /// order (index keys like "10" would sort before "2" lexically);
    /// non-string entries are skipped.
    pub fn ids(&self) -> Vec<&str> {
        match self {
            UsbIdSet::Single(id) => vec![id.as_str()],
            UsbIdSet::Indexed(map) => map.values().filter_map(|v| v.as_str()).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids().contains(&id)
    }
}

/// Upload settings for a board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadParams {
    pub protocol: Option<String>,
    pub tool: Option<String>,
    pub speed: Option<String>,
    pub maximum_size: Option<String>,
    pub maximum_data_size: Option<String>,
    pub disable_flushing: Option<String>,
    pub use_1200bps_touch: Option<String>,
    pub wait_for_upload_port: Option<String>,
}

impl UploadParams {
    /// Baud rate as a number, when present and parseable.
    pub fn speed_bps(&self) -> Option<u32> {
        self.speed.as_deref().and_then(|s| s.parse().ok())
    }

    /// Whether the 1200bps-touch reset dance is required.
    pub fn needs_1200bps_touch(&self) -> bool {
        self.use_1200bps_touch.as_deref() == Some("true")
    }
}

/// Build settings for a board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildParams {
    pub mcu: Option<String>,
    pub f_cpu: Option<String>,
    pub core: Option<String>,
    pub variant: Option<String>,
    pub board: Option<String>,
    pub vid: Option<String>,
    pub pid: Option<String>,
    pub usb_product: Option<String>,
    pub extra_flags: Option<String>,
}

/// Bootloader settings for a board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BootloaderParams {
    pub tool: Option<String>,
    pub file: Option<String>,
    pub low_fuses: Option<String>,
    pub high_fuses: Option<String>,
    pub extended_fuses: Option<String>,
    pub lock_bits: Option<String>,
    pub unlock_bits: Option<String>,
}

/// The full parameter record for one board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardParams {
    pub name: Option<String>,
    pub vid: Option<UsbIdSet>,
    pub pid: Option<UsbIdSet>,
    pub upload: Option<UploadParams>,
    pub build: Option<BuildParams>,
    pub bootloader: Option<BootloaderParams>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_record() {
        let record = json!({
            "name": "Arduino Uno",
            "vid": "0x2341",
            "pid": { "0": "0x0043", "1": "0x0001" },
            "upload": {
                "protocol": "arduino",
                "tool": "avrdude",
                "speed": "115200",
                "maximum_size": "32256",
                "use_1200bps_touch": "false"
            },
            "build": {
                "mcu": "atmega328p",
                "f_cpu": "16000000L",
                "core": "arduino",
                "variant": "standard"
            },
            "bootloader": {
                "tool": "avrdude",
                "file": "optiboot/optiboot_atmega328.hex",
                "low_fuses": "0xFF",
                "high_fuses": "0xDE"
            }
        });

        let params: BoardParams = serde_json::from_value(record).unwrap();
        assert_eq!(params.name.as_deref(), Some("Arduino Uno"));

        let pid = params.pid.unwrap();
        assert!(pid.contains("0x0043"));
        assert!(pid.contains("0x0001"));
        assert_eq!(params.vid.unwrap().ids(), vec!["0x2341"]);

        let upload = params.upload.unwrap();
        assert_eq!(upload.speed_bps(), Some(115200));
        assert!(!upload.needs_1200bps_touch());

        assert_eq!(params.build.unwrap().mcu.as_deref(), Some("atmega328p"));
        assert_eq!(
            params.bootloader.unwrap().low_fuses.as_deref(),
            Some("0xFF")
        );
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let record = json!({ "name": "Bare Board" });
        let params: BoardParams = serde_json::from_value(record).unwrap();
        assert_eq!(params.name.as_deref(), Some("Bare Board"));
        assert!(params.upload.is_none());
        assert!(params.bootloader.is_none());
    }

    #[test]
    fn test_indexed_ids_keep_document_order() {
        let record = json!({
            "pid": {
                "9": "0x0009",
                "10": "0x0010",
                "11": "0x0011",
                "2": "0x0002"
            }
        });
        let params: BoardParams = serde_json::from_value(record).unwrap();
        // Document order, not lexical key order ("10" must not jump ahead
        // of "9").
        assert_eq!(
            params.pid.unwrap().ids(),
            vec!["0x0009", "0x0010", "0x0011", "0x0002"]
        );
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let record = json!({
            "name": "Odd Board",
            "some_vendor_extension": "whatever",
            "upload": { "protocol": "sam-ba", "not_a_field": "x" }
        });
        let params: BoardParams = serde_json::from_value(record).unwrap();
        assert_eq!(
            params.upload.unwrap().protocol.as_deref(),
            Some("sam-ba")
        );
    }
}

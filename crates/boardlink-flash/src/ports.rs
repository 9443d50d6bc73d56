//! Serial port records and USB id normalization

use serde::{Deserialize, Serialize};

/// A serial port as reported by the OS-level enumerator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialPortInfo {
    /// Device name (e.g., "/dev/ttyACM0", "COM3")
    pub name: String,
    /// USB vendor id, when the port is USB-backed
    pub usb_vid: Option<u16>,
    /// USB product id, when the port is USB-backed
    pub usb_pid: Option<u16>,
}

impl SerialPortInfo {
    /// Product id in the catalog's string form, when present.
    pub fn catalog_pid(&self) -> Option<String> {
        self.usb_pid.map(format_usb_id)
    }

    /// Vendor id in the catalog's string form, when present.
    pub fn catalog_vid(&self) -> Option<String> {
        self.usb_vid.map(format_usb_id)
    }
}

/// Render a numeric USB id in the catalog's string form: lowercase hex,
/// zero-padded to four digits, "0x" prefixed.
pub fn format_usb_id(id: u16) -> String {
    format!("0x{id:04x}")
}

/// Ports that satisfy the predicate, in input order.
pub fn filter_ports<F>(ports: &[SerialPortInfo], predicate: F) -> Vec<SerialPortInfo>
where
    F: Fn(&SerialPortInfo) -> bool,
{
    ports.iter().filter(|p| predicate(p)).cloned().collect()
}

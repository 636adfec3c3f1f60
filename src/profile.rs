//! Device profiles: the named I/O vocabulary each device family exposes.
//!
//! The engine treats every tag name the same way. Profiles only decide
//! which names an editor offers and which tags a session can pre-create.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Family of connected device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceKind {
    /// Microcontroller board
    Arduino,
    /// Programmable logic controller
    #[default]
    Plc,
    /// Variable-frequency drive
    Vfd,
}

impl DeviceKind {
    /// Keyword used by the interchange format.
    pub fn keyword(self) -> &'static str {
        match self {
            DeviceKind::Arduino => "ARDUINO",
            DeviceKind::Plc => "PLC",
            DeviceKind::Vfd => "VFD",
        }
    }

    /// The I/O vocabulary of this device family.
    pub fn profile(self) -> &'static DeviceProfile {
        match self {
            DeviceKind::Arduino => &ARDUINO,
            DeviceKind::Plc => &PLC,
            DeviceKind::Vfd => &VFD,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ARDUINO" => Ok(DeviceKind::Arduino),
            "PLC" => Ok(DeviceKind::Plc),
            "VFD" => Ok(DeviceKind::Vfd),
            other => Err(format!("unknown device type '{}'", other)),
        }
    }
}

/// Named inputs, outputs and analog channels of a device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceProfile {
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub analogs: &'static [&'static str],
}

impl DeviceProfile {
    /// Digital tags (inputs then outputs).
    pub fn digital(&self) -> impl Iterator<Item = &'static str> {
        self.inputs.iter().chain(self.outputs.iter()).copied()
    }
}

static ARDUINO: DeviceProfile = DeviceProfile {
    inputs: &["D2", "D3", "D4", "D5", "D6", "D7"],
    outputs: &["D8", "D9", "D10", "D11", "D12", "D13"],
    analogs: &["A0", "A1", "A2", "A3"],
};

static PLC: DeviceProfile = DeviceProfile {
    inputs: &["I0.0", "I0.1", "I0.2", "I0.3", "I0.4", "I0.5", "I0.6", "I0.7"],
    outputs: &["Q0.0", "Q0.1", "Q0.2", "Q0.3", "Q0.4", "Q0.5", "Q0.6", "Q0.7"],
    analogs: &["IW64", "IW66", "QW64"],
};

static VFD: DeviceProfile = DeviceProfile {
    inputs: &["DI1", "DI2", "DI3", "DI4", "FWD", "REV"],
    outputs: &["RO1", "RO2", "DO1"],
    analogs: &["AI1", "AI2", "AO1"],
};

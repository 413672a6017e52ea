//! Gate domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::shared::DomainError;

/// Direction of traffic a gate handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateFlow {
    Entry,
    Exit,
    #[default]
    Both,
}

impl GateFlow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
            Self::Both => "both",
        }
    }

    pub fn allows_entry(&self) -> bool {
        matches!(self, Self::Entry | Self::Both)
    }

    pub fn allows_exit(&self) -> bool {
        matches!(self, Self::Exit | Self::Both)
    }
}

impl fmt::Display for GateFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GateFlow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entry" | "in" => Ok(Self::Entry),
            "exit" | "out" => Ok(Self::Exit),
            "both" => Ok(Self::Both),
            other => Err(DomainError::Validation(format!("Unknown gate flow: {}", other))),
        }
    }
}

/// Camera mounted at a gate (plate recognition)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraInfo {
    pub camera_id: Option<String>,
    pub camera_type: Option<String>,
    pub model: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub manufacturer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Gate {
    pub gate_id: i32,
    pub customer_id: String,
    /// Unique within the tenant, e.g. `SouthGate`
    pub name: String,
    pub flow: GateFlow,
    pub description: Option<String>,
    pub cashier_name: Option<String>,
    pub camera: CameraInfo,
    pub created_at: DateTime<Utc>,
}

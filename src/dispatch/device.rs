use std::fmt;

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    HostParallel,
    HostSerial,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComputeDevice {
    pub name: String,
    pub kind: DeviceKind,
    pub compute_units: usize,
}

impl ComputeDevice {
    pub fn create_pool(&self) -> Result<ThreadPool, RenderError> {
        let name = self.name.clone();
        ThreadPoolBuilder::new()
            .num_threads(self.compute_units)
            .thread_name(move |i| format!("{}-{}", name, i))
            .build()
            .map_err(|e| RenderError::DeviceInit {
                device: self.name.clone(),
                reason: e.to_string(),
            })
    }
}

pub fn enumerate_devices() -> Vec<ComputeDevice> {
    let devices = vec![
        ComputeDevice {
            name: String::from("host-parallel"),
            kind: DeviceKind::HostParallel,
            compute_units: num_cpus::get().max(1),
        },
        ComputeDevice {
            name: String::from("host-serial"),
            kind: DeviceKind::HostSerial,
            compute_units: 1,
        },
    ];
    debug!("enumerated {} compute devices: {:?}", devices.len(), devices);
    devices
}

// Which enumerated device the dispatcher runs on. The first device satisfying the policy wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceSelector {
    First,
    Index(usize),
    MinComputeUnits(usize),
    NameContains(String),
}

impl Default for DeviceSelector {
    fn default() -> Self {
        DeviceSelector::First
    }
}

impl DeviceSelector {
    pub fn matches(&self, index: usize, device: &ComputeDevice) -> bool {
        match self {
            DeviceSelector::First => true,
            DeviceSelector::Index(i) => *i == index,
            DeviceSelector::MinComputeUnits(n) => device.compute_units >= *n,
            DeviceSelector::NameContains(s) => device.name.contains(s.as_str()),
        }
    }

    pub fn select<'a>(&self, devices: &'a [ComputeDevice]) -> Result<&'a ComputeDevice, RenderError> {
        devices
            .iter()
            .enumerate()
            .find(|(i, device)| self.matches(*i, device))
            .map(|(_, device)| device)
            .ok_or_else(|| RenderError::NoDevice(self.to_string()))
    }
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceSelector::First => write!(f, "first available device"),
            DeviceSelector::Index(i) => write!(f, "device index {}", i),
            DeviceSelector::MinComputeUnits(n) => write!(f, "at least {} compute units", n),
            DeviceSelector::NameContains(s) => write!(f, "device name containing {:?}", s),
        }
    }
}

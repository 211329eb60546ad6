//! Report output model for headless simulation runs.

use anyhow::{bail, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Component, Path};

/// Values of both feedback elements at one frame. Fields are `None` once
/// the element has been unmounted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSample {
    pub frame: u64,
    pub elapsed_ms: f64,
    pub press_scale: Option<f32>,
    pub like_scale: Option<f32>,
    pub like_rotation: Option<f32>,
    pub press_transform: Option<String>,
    pub like_transform: Option<String>,
}

/// Machine-readable result of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub frame_rate: u32,
    pub elapsed_frames: u64,
    pub elapsed_ms: f64,
    /// Whether every mounted value had come to rest by the last frame
    pub settled: bool,
    pub samples: Vec<FrameSample>,
    pub final_state: FrameSample,
}

impl SimulationReport {
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

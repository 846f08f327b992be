//! Status Tool
//!
//! Provides runtime status information about the calculator service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage instructions for AI assistants
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# Body Calculator Instructions

Three calculators: BMI, body fat (U.S. Navy method) and ideal weight.

## One-off calculations

Use `calculate_bmi`, `calculate_body_fat` or `calculate_ideal_weight` with the
values exactly as the user gave them. Numbers are passed as text.

| Calculator | Height units | Other length units | Weight units |
|------------|--------------|--------------------|--------------|
| BMI | cm, ft (+ height_inch) | - | kg, lb |
| Body fat | cm, in | cm, in | kg, lb |
| Ideal weight | cm, ft (+ height_inch) | - | - |

A response with `available: false` means the inputs could not produce a
result (missing, non-numeric, zero or negative values, or body fat
measurements where the waist is not larger than the neck). It is not an
error; ask the user to check the measurements.

## Forms (remembered inputs)

1. `open_form` with `bmi`, `body_fat` or `ideal_weight` restores the last
   values the user entered.
2. `edit_field` changes one field. The value is saved immediately.
   - BMI fields: height, heightInch, weight, heightUnit, weightUnit
   - Body fat fields: age, gender, weight, weightUnit, height, heightUnit,
     waistCircumference(Unit), neckCircumference(Unit), hipCircumference(Unit)
   - Ideal weight fields: height, heightInch, heightUnit, gender
3. BMI and ideal weight results update on every edit. Body fat needs
   `run_body_fat` once `can_calculate` is true. Age is required but does not
   change the result. Hip is required for women only.

The BMI and body fat forms share the height and weight fields.

## Notes

- The BMI "to gain / to lose" figure is always in kilograms even when the
  label says lbs.
- Ideal weight uses BMI 22.0 for men and 21.4 for women.
"#;

/// Runtime status of the calculator service
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> CalculatorStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        CalculatorStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

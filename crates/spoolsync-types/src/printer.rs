//! Printer machine records

use crate::field::Scalar;
use serde::{Deserialize, Serialize};

/// How retraction is performed on the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RetractionMode {
    /// The firmware performs retraction (G10/G11)
    Firmware,
    /// The slicer emits explicit retraction moves
    #[default]
    Software,
}

/// A named machine configuration owned by the cloud datastore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Printer {
    /// Opaque record id, assigned by the datastore on creation
    pub id: String,
    /// Machine display name
    pub name: String,
    /// Machine model string
    pub model: String,
    /// Nozzle diameter in millimeters
    pub nozzle_diameter: Option<Scalar>,
    /// Bed size along X, millimeters
    #[serde(rename = "bedSizeX")]
    pub bed_size_x: Option<Scalar>,
    /// Bed size along Y, millimeters
    #[serde(rename = "bedSizeY")]
    pub bed_size_y: Option<Scalar>,
    /// Maximum printable height, millimeters
    pub max_print_height: Option<Scalar>,
    /// Retraction length, millimeters
    pub retraction_length: Option<Scalar>,
    /// Retraction speed, mm/s
    pub retraction_speed: Option<Scalar>,
    /// Deretraction speed, mm/s
    pub deretraction_speed: Option<Scalar>,
    /// Retraction mode
    #[serde(rename = "retractionType")]
    pub retraction_mode: RetractionMode,
    /// Z-hop height, millimeters
    pub zhop_height: Option<Scalar>,
    /// Z-hop lift style; the sentinel "None" means no override
    pub zhop_type: Option<String>,
    /// Maximum print speed, mm/s
    pub max_print_speed: Option<Scalar>,
    /// Maximum travel speed, mm/s
    pub max_travel_speed: Option<Scalar>,
    /// Maximum acceleration along X, mm/s²
    #[serde(rename = "maxAccelerationX")]
    pub max_acceleration_x: Option<Scalar>,
    /// Maximum acceleration along Y, mm/s²
    #[serde(rename = "maxAccelerationY")]
    pub max_acceleration_y: Option<Scalar>,
    /// Maximum acceleration along Z, mm/s²
    #[serde(rename = "maxAccelerationZ")]
    pub max_acceleration_z: Option<Scalar>,
    /// Maximum extruder acceleration, mm/s²
    #[serde(rename = "maxAccelerationE")]
    pub max_acceleration_e: Option<Scalar>,
    /// G-code dialect tag, e.g. "klipper" or "marlin"
    pub gcode_flavor: Option<String>,
    /// Custom start G-code block
    pub start_gcode: Option<String>,
    /// Custom end G-code block
    pub end_gcode: Option<String>,
    /// Whether the machine has an auxiliary part-cooling fan
    pub auxiliary_fan: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            model: String::new(),
            nozzle_diameter: None,
            bed_size_x: None,
            bed_size_y: None,
            max_print_height: None,
            retraction_length: None,
            retraction_speed: None,
            deretraction_speed: None,
            retraction_mode: RetractionMode::Software,
            zhop_height: None,
            zhop_type: None,
            max_print_speed: None,
            max_travel_speed: None,
            max_acceleration_x: None,
            max_acceleration_y: None,
            max_acceleration_z: None,
            max_acceleration_e: None,
            gcode_flavor: None,
            start_gcode: None,
            end_gcode: None,
            auxiliary_fan: false,
        }
    }
}

impl Printer {
    /// Create the fixed default bundle used when the user adds a new machine
    pub fn new_record() -> Self {
        Self {
            name: "New Printer".to_string(),
            model: "Generic Klipper Printer".to_string(),
            nozzle_diameter: Some(Scalar::Number(0.4)),
            bed_size_x: Some(Scalar::Number(250.0)),
            bed_size_y: Some(Scalar::Number(250.0)),
            max_print_height: Some(Scalar::Number(250.0)),
            retraction_length: Some(Scalar::Number(0.8)),
            retraction_speed: Some(Scalar::Number(40.0)),
            deretraction_speed: Some(Scalar::Number(40.0)),
            retraction_mode: RetractionMode::Software,
            max_print_speed: Some(Scalar::Number(300.0)),
            max_travel_speed: Some(Scalar::Number(500.0)),
            max_acceleration_x: Some(Scalar::Number(5000.0)),
            max_acceleration_y: Some(Scalar::Number(5000.0)),
            max_acceleration_z: Some(Scalar::Number(500.0)),
            max_acceleration_e: Some(Scalar::Number(5000.0)),
            gcode_flavor: Some("klipper".to_string()),
            start_gcode: Some("; Start G-code".to_string()),
            end_gcode: Some("; End G-code".to_string()),
            auxiliary_fan: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retraction_mode_wire_names() {
        let printer: Printer =
            serde_json::from_str(r#"{"id": "p1", "name": "Voron", "retractionType": "firmware"}"#)
                .unwrap();
        assert_eq!(printer.retraction_mode, RetractionMode::Firmware);

        // Absent mode falls back to software retraction
        let printer: Printer = serde_json::from_str(r#"{"id": "p2", "name": "Ender"}"#).unwrap();
        assert_eq!(printer.retraction_mode, RetractionMode::Software);
    }

    #[test]
    fn test_new_record_bundle() {
        let printer = Printer::new_record();
        assert_eq!(printer.model, "Generic Klipper Printer");
        assert_eq!(printer.gcode_flavor.as_deref(), Some("klipper"));
        assert_eq!(printer.bed_size_x, Some(Scalar::Number(250.0)));
        assert!(printer.zhop_type.is_none());
    }
}

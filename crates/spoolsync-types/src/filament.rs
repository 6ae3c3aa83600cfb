//! Filament profile records
//!
//! The canonical typed shape of a filament document in the cloud datastore.
//! Field names mirror the datastore's camelCase keys; numeric fields are held
//! as loose [`Scalar`]s and only coerced at the encoder boundary.

use crate::field::Scalar;
use serde::{Deserialize, Serialize};

/// A named material configuration owned by the cloud datastore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilamentProfile {
    /// Opaque record id, assigned by the datastore on creation
    pub id: String,
    /// Id of the associated printer record, if any
    pub printer_id: Option<String>,
    /// Display name of the associated printer, if any
    pub printer_name: Option<String>,
    /// Filament vendor / brand name
    pub brand: String,
    /// Material type, e.g. "PLA", "PETG", "ABS"
    #[serde(rename = "type")]
    pub material: String,
    /// Display color, hex code or name
    pub color: String,
    /// Cost per kilogram
    pub cost_per_kg: Option<Scalar>,
    /// Whether this material is used for support structures
    pub is_support_material: bool,
    /// Filament diameter in millimeters
    pub diameter: Option<Scalar>,
    /// Material density in g/cm³
    pub density: Option<Scalar>,
    /// Shrinkage compensation in the XY plane, percent
    #[serde(rename = "shrinkageXY")]
    pub shrinkage_xy: Option<Scalar>,
    /// Shrinkage compensation along Z, percent
    #[serde(rename = "shrinkageZ")]
    pub shrinkage_z: Option<Scalar>,
    /// Lower bound of the workable nozzle temperature range
    pub nozzle_temp_range_low: Option<Scalar>,
    /// Upper bound of the workable nozzle temperature range
    pub nozzle_temp_range_high: Option<Scalar>,
    /// Extrusion flow ratio
    pub flow_ratio: Option<Scalar>,
    /// Pressure advance toggle; absent means enabled
    pub enable_pressure_advance: Option<bool>,
    /// Pressure advance value
    pub pressure_advance: Option<Scalar>,
    /// Chamber temperature
    pub chamber_temp: Option<Scalar>,
    /// Whether active chamber temperature control is on
    pub chamber_temp_control: bool,
    /// Nozzle temperature for the initial layer
    pub initial_nozzle_temp: Option<Scalar>,
    /// Nozzle temperature for subsequent layers
    pub nozzle_temp: Option<Scalar>,
    /// Bed temperature for the initial layer
    pub initial_bed_temp: Option<Scalar>,
    /// Bed temperature for subsequent layers
    pub bed_temp: Option<Scalar>,
    /// Minimum part-cooling fan speed, percent
    pub fan_speed_min: Option<Scalar>,
    /// Maximum part-cooling fan speed, percent
    pub fan_speed_max: Option<Scalar>,
    /// Layer-time threshold below which the fan runs at full speed
    pub min_fan_speed_layer_time: Option<Scalar>,
    /// Gate for the retraction-length override
    pub enable_retraction: bool,
    /// Retraction length override, millimeters
    pub retraction_length: Option<Scalar>,
    /// Z-hop height override, millimeters
    pub zhop_height: Option<Scalar>,
    /// Z-hop lift style; the sentinel "None" means no override
    pub zhop_type: Option<String>,
    /// Gate for the lift-above override
    pub enable_retraction_lift_above: bool,
    /// Only lift above this height, millimeters
    pub retract_lift_above: Option<Scalar>,
    /// Gate for the lift-below override
    pub enable_retraction_lift_below: bool,
    /// Only lift below this height, millimeters
    pub retract_lift_below: Option<Scalar>,
}

impl Default for FilamentProfile {
    fn default() -> Self {
        Self {
            id: String::new(),
            printer_id: None,
            printer_name: None,
            brand: String::new(),
            material: String::new(),
            color: String::new(),
            cost_per_kg: None,
            is_support_material: false,
            diameter: None,
            density: None,
            shrinkage_xy: None,
            shrinkage_z: None,
            nozzle_temp_range_low: None,
            nozzle_temp_range_high: None,
            flow_ratio: None,
            enable_pressure_advance: None,
            pressure_advance: None,
            chamber_temp: None,
            chamber_temp_control: false,
            initial_nozzle_temp: None,
            nozzle_temp: None,
            initial_bed_temp: None,
            bed_temp: None,
            fan_speed_min: None,
            fan_speed_max: None,
            min_fan_speed_layer_time: None,
            enable_retraction: false,
            retraction_length: None,
            zhop_height: None,
            zhop_type: None,
            enable_retraction_lift_above: false,
            retract_lift_above: None,
            enable_retraction_lift_below: false,
            retract_lift_below: None,
        }
    }
}

impl FilamentProfile {
    /// Create the fixed default bundle used when the user adds a new record
    pub fn new_record() -> Self {
        Self {
            brand: "New Brand".to_string(),
            material: "PLA".to_string(),
            color: "#FFFFFF".to_string(),
            cost_per_kg: Some(Scalar::from("0")),
            is_support_material: false,
            diameter: Some(Scalar::from("1.75")),
            density: Some(Scalar::from("1.24")),
            shrinkage_xy: Some(Scalar::from("0")),
            shrinkage_z: Some(Scalar::from("0")),
            nozzle_temp_range_low: Some(Scalar::from("190")),
            nozzle_temp_range_high: Some(Scalar::from("230")),
            flow_ratio: Some(Scalar::from("1.0")),
            enable_pressure_advance: Some(false),
            pressure_advance: Some(Scalar::from("0")),
            chamber_temp: Some(Scalar::from("0")),
            chamber_temp_control: false,
            initial_nozzle_temp: Some(Scalar::from("210")),
            nozzle_temp: Some(Scalar::from("210")),
            initial_bed_temp: Some(Scalar::from("60")),
            bed_temp: Some(Scalar::from("60")),
            fan_speed_min: Some(Scalar::from("35")),
            fan_speed_max: Some(Scalar::from("100")),
            min_fan_speed_layer_time: Some(Scalar::from("10")),
            retraction_length: Some(Scalar::from("0.5")),
            zhop_height: Some(Scalar::from("0.2")),
            zhop_type: Some("Normal Lift".to_string()),
            retract_lift_above: Some(Scalar::from("0")),
            retract_lift_below: Some(Scalar::from("0")),
            ..Self::default()
        }
    }

    /// Human-readable display name, also used as the vendor document's
    /// `name` and settings id
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand.trim(), self.material.trim())
    }
}

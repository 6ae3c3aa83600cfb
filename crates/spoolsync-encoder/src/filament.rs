//! Filament profile encoding
//!
//! Field-by-field mapping from a [`FilamentProfile`] record to the vendor
//! document, with the documented default substituted wherever the stored
//! value is unusable. Override keys (retraction length, z-hop type, lift
//! above/below) are present only when their enable flag is set; the
//! consuming application treats key presence itself as the override signal.

use crate::document::ProfileDocument;
use spoolsync_types::{field, FilamentProfile};

/// Documented defaults for filament output fields
mod defaults {
    pub const COST_PER_KG: &str = "0";
    pub const DIAMETER: &str = "1.75";
    pub const DENSITY: &str = "1.24";
    pub const SHRINKAGE_XY: &str = "100";
    pub const SHRINKAGE_Z: &str = "100";
    pub const NOZZLE_TEMP_RANGE_LOW: &str = "190";
    pub const NOZZLE_TEMP_RANGE_HIGH: &str = "240";
    pub const FLOW_RATIO: &str = "1";
    pub const PRESSURE_ADVANCE: &str = "0.03";
    pub const CHAMBER_TEMP: &str = "0";
    pub const NOZZLE_TEMP: &str = "220";
    pub const BED_TEMP: &str = "60";
    pub const FAN_COOLING_LAYER_TIME: &str = "60";
    pub const FAN_SPEED: &str = "100";
    // Historical literal the consuming application receives when the
    // retraction override is enabled without a usable length
    pub const RETRACTION_LENGTH: &str = "nil";
    pub const RETRACT_LIFT: &str = "0";
}

/// Z-hop sentinel meaning "no override"
const ZHOP_NONE: &str = "None";

/// Resolve a z-hop type field to its effective override value
///
/// Absent, empty, and sentinel values all mean the override is off and the
/// key must be omitted.
pub(crate) fn effective_zhop(zhop_type: Option<&str>) -> Option<String> {
    let value = zhop_type?.trim();
    if value.is_empty() || value == ZHOP_NONE {
        None
    } else {
        Some(value.to_string())
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Encode a filament record as a vendor profile document
pub fn encode_filament(profile: &FilamentProfile) -> ProfileDocument {
    let mut doc = ProfileDocument::new();
    let display_name = profile.display_name();

    // Basic
    doc.push_value(
        "compatible_printers",
        profile.printer_name.clone().unwrap_or_default(),
    );
    doc.push_value("filament_type", profile.material.clone());
    doc.push_value("filament_vendor", profile.brand.clone());
    doc.push_value(
        "filament_cost",
        field::numeric_or(profile.cost_per_kg.as_ref(), defaults::COST_PER_KG),
    );
    doc.push_value("filament_soluble", "0");
    doc.push_value("filament_is_support", flag(profile.is_support_material));
    doc.push_value("default_filament_colour", profile.color.clone());
    doc.push_value(
        "filament_diameter",
        field::numeric_or(profile.diameter.as_ref(), defaults::DIAMETER),
    );
    doc.push_value(
        "filament_density",
        field::numeric_or(profile.density.as_ref(), defaults::DENSITY),
    );
    doc.push_value(
        "filament_shrink",
        field::numeric_or(profile.shrinkage_xy.as_ref(), defaults::SHRINKAGE_XY),
    );
    doc.push_value(
        "filament_shrinkage_compensation_z",
        field::numeric_or(profile.shrinkage_z.as_ref(), defaults::SHRINKAGE_Z),
    );
    doc.push_value("idle_temperature", "0");
    doc.push_value(
        "nozzle_temperature_range_low",
        field::numeric_or(
            profile.nozzle_temp_range_low.as_ref(),
            defaults::NOZZLE_TEMP_RANGE_LOW,
        ),
    );
    doc.push_value(
        "nozzle_temperature_range_high",
        field::numeric_or(
            profile.nozzle_temp_range_high.as_ref(),
            defaults::NOZZLE_TEMP_RANGE_HIGH,
        ),
    );

    // Flow and pressure advance
    doc.push_value(
        "filament_flow_ratio",
        field::numeric_or(profile.flow_ratio.as_ref(), defaults::FLOW_RATIO),
    );
    doc.push_value(
        "enable_pressure_advance",
        profile.enable_pressure_advance.unwrap_or(true).to_string(),
    );
    doc.push_value(
        "pressure_advance",
        field::numeric_or(profile.pressure_advance.as_ref(), defaults::PRESSURE_ADVANCE),
    );

    // Chamber temperature
    doc.push_value(
        "chamber_temperature",
        field::numeric_or(profile.chamber_temp.as_ref(), defaults::CHAMBER_TEMP),
    );
    doc.push_value(
        "activate_chamber_temp_control",
        flag(profile.chamber_temp_control),
    );

    // Print temperature
    doc.push_value(
        "nozzle_temperature_initial_layer",
        field::numeric_or(profile.initial_nozzle_temp.as_ref(), defaults::NOZZLE_TEMP),
    );
    doc.push_value(
        "nozzle_temperature",
        field::numeric_or(profile.nozzle_temp.as_ref(), defaults::NOZZLE_TEMP),
    );

    // Bed temperature
    doc.push_value(
        "bed_temperature_initial_layer",
        field::numeric_or(profile.initial_bed_temp.as_ref(), defaults::BED_TEMP),
    );
    doc.push_value(
        "bed_temperature",
        field::numeric_or(profile.bed_temp.as_ref(), defaults::BED_TEMP),
    );

    // Bookkeeping the consuming application reads as plain strings
    doc.push_value("filament_settings_id", display_name.clone());
    doc.push_plain("from", "User");
    doc.push_plain("inherits", format!("Generic {} @System", profile.material));
    doc.push_plain("is_custom_defined", "1");
    doc.push_plain("name", display_name);
    doc.push_plain("version", "2.3.1.0");

    // Cooling
    doc.push_value(
        "fan_cooling_layer_time",
        field::numeric_or(
            profile.min_fan_speed_layer_time.as_ref(),
            defaults::FAN_COOLING_LAYER_TIME,
        ),
    );
    doc.push_value(
        "fan_min_speed",
        field::numeric_or(profile.fan_speed_min.as_ref(), defaults::FAN_SPEED),
    );
    doc.push_value(
        "fan_max_speed",
        field::numeric_or(profile.fan_speed_max.as_ref(), defaults::FAN_SPEED),
    );

    // Overrides: key presence is the signal, so disabled overrides are
    // omitted rather than written as zero
    if profile.enable_retraction {
        doc.push_value(
            "filament_retraction_length",
            field::numeric_or(profile.retraction_length.as_ref(), defaults::RETRACTION_LENGTH),
        );
    }
    if let Some(zhop) = effective_zhop(profile.zhop_type.as_deref()) {
        doc.push_value("filament_z_hop_types", zhop);
    }
    if profile.enable_retraction_lift_above {
        doc.push_value(
            "filament_retract_lift_above",
            field::numeric_or(profile.retract_lift_above.as_ref(), defaults::RETRACT_LIFT),
        );
    }
    if profile.enable_retraction_lift_below {
        doc.push_value(
            "filament_retract_lift_below",
            field::numeric_or(profile.retract_lift_below.as_ref(), defaults::RETRACT_LIFT),
        );
    }

    doc
}

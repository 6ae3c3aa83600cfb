//! Machine profile encoding
//!
//! Same discipline as the filament side: documented defaults at the
//! coercion boundary, z-hop keys gated on the sentinel, and the
//! single-element list wrapping the consuming application expects.
//! `printable_area` is the one multi-element list: the four bed corners
//! derived from the bed dimensions.

use crate::document::ProfileDocument;
use crate::filament::effective_zhop;
use spoolsync_types::{field, Printer, RetractionMode};

/// Documented defaults for machine output fields
mod defaults {
    pub const NOZZLE_DIAMETER: &str = "0.4";
    pub const BED_SIZE: &str = "250";
    pub const MAX_PRINT_HEIGHT: &str = "250";
    pub const RETRACTION_LENGTH: &str = "0.8";
    pub const RETRACTION_SPEED: &str = "40";
    pub const MAX_ACCELERATION: &str = "5000";
    pub const MAX_ACCELERATION_Z: &str = "500";
    pub const MAX_TRAVEL_SPEED: &str = "500";
    // Safe conservative caps the vendor ships for Z and E axes
    pub const MAX_SPEED_Z: &str = "12";
    pub const MAX_SPEED_E: &str = "120";
    pub const GCODE_FLAVOR: &str = "klipper";
    pub const START_GCODE: &str = "; Start G-code";
    pub const END_GCODE: &str = "; End G-code";
}

/// Encode a printer record as a vendor machine profile document
pub fn encode_machine(printer: &Printer) -> ProfileDocument {
    let mut doc = ProfileDocument::new();

    // Basic
    doc.push_value("printer_model", printer.model.clone());
    doc.push_value(
        "nozzle_diameter",
        field::numeric_or(printer.nozzle_diameter.as_ref(), defaults::NOZZLE_DIAMETER),
    );

    // Machine limits
    let bed_x = field::numeric_or(printer.bed_size_x.as_ref(), defaults::BED_SIZE);
    let bed_y = field::numeric_or(printer.bed_size_y.as_ref(), defaults::BED_SIZE);
    doc.push_list(
        "printable_area",
        [
            "0x0".to_string(),
            format!("{bed_x}x0"),
            format!("{bed_x}x{bed_y}"),
            format!("0x{bed_y}"),
        ],
    );
    doc.push_value(
        "printable_height",
        field::numeric_or(printer.max_print_height.as_ref(), defaults::MAX_PRINT_HEIGHT),
    );

    // Extruder
    doc.push_value(
        "retraction_length",
        field::numeric_or(printer.retraction_length.as_ref(), defaults::RETRACTION_LENGTH),
    );
    doc.push_value(
        "retraction_speed",
        field::numeric_or(printer.retraction_speed.as_ref(), defaults::RETRACTION_SPEED),
    );
    doc.push_value(
        "deretraction_speed",
        field::numeric_or(printer.deretraction_speed.as_ref(), defaults::RETRACTION_SPEED),
    );
    doc.push_value("retract_before_wipe", "0%");

    // Speed / acceleration
    doc.push_value(
        "machine_max_acceleration_x",
        field::numeric_or(printer.max_acceleration_x.as_ref(), defaults::MAX_ACCELERATION),
    );
    doc.push_value(
        "machine_max_acceleration_y",
        field::numeric_or(printer.max_acceleration_y.as_ref(), defaults::MAX_ACCELERATION),
    );
    doc.push_value(
        "machine_max_acceleration_z",
        field::numeric_or(printer.max_acceleration_z.as_ref(), defaults::MAX_ACCELERATION_Z),
    );
    doc.push_value(
        "machine_max_acceleration_e",
        field::numeric_or(printer.max_acceleration_e.as_ref(), defaults::MAX_ACCELERATION),
    );
    // Travel speed caps both planar axes
    let travel = field::numeric_or(printer.max_travel_speed.as_ref(), defaults::MAX_TRAVEL_SPEED);
    doc.push_value("machine_max_speed_x", travel.clone());
    doc.push_value("machine_max_speed_y", travel);
    doc.push_value("machine_max_speed_z", defaults::MAX_SPEED_Z);
    doc.push_value("machine_max_speed_e", defaults::MAX_SPEED_E);

    // G-code
    doc.push_value(
        "gcode_flavor",
        printer
            .gcode_flavor
            .clone()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| defaults::GCODE_FLAVOR.to_string()),
    );
    doc.push_value(
        "machine_start_gcode",
        printer
            .start_gcode
            .clone()
            .unwrap_or_else(|| defaults::START_GCODE.to_string()),
    );
    doc.push_value(
        "machine_end_gcode",
        printer
            .end_gcode
            .clone()
            .unwrap_or_else(|| defaults::END_GCODE.to_string()),
    );

    // Cooling
    doc.push_value("auxiliary_fan", if printer.auxiliary_fan { "1" } else { "0" });

    // Bookkeeping the consuming application reads as plain strings
    doc.push_plain("from", "User");
    doc.push_plain("inherits", "Generic Klipper Printer @System");
    doc.push_plain("is_custom_defined", "1");
    doc.push_plain("name", printer.name.clone());
    doc.push_plain("version", "2.0.0.0");

    // Retraction mode
    doc.push_value(
        "use_firmware_retraction",
        match printer.retraction_mode {
            RetractionMode::Firmware => "1",
            RetractionMode::Software => "0",
        },
    );

    // Z-hop overrides follow the filament gating discipline
    if let Some(zhop) = effective_zhop(printer.zhop_type.as_deref()) {
        doc.push_value("z_hop_types", zhop);
    }
    if let Some(height) = printer.zhop_height.as_ref().and_then(|h| h.as_numeric_string()) {
        doc.push_value("z_hop", height);
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use spoolsync_types::Scalar;

    fn printer(name: &str) -> Printer {
        let mut printer = Printer::new_record();
        printer.name = name.to_string();
        printer
    }

    #[test]
    fn test_printable_area_corners() {
        let mut p = printer("Voron");
        p.bed_size_x = Some(Scalar::Number(300.0));
        p.bed_size_y = Some(Scalar::Number(250.0));
        let doc = encode_machine(&p);
        assert_eq!(
            doc.get("printable_area").unwrap(),
            &json!(["0x0", "300x0", "300x250", "0x250"])
        );
    }

    #[test]
    fn test_bare_record_defaults_every_numeric_field() {
        let doc = encode_machine(&Printer::default());
        assert_eq!(doc.get("nozzle_diameter").unwrap(), &json!(["0.4"]));
        assert_eq!(doc.get("printable_height").unwrap(), &json!(["250"]));
        assert_eq!(doc.get("machine_max_acceleration_z").unwrap(), &json!(["500"]));
        assert_eq!(doc.get("machine_max_speed_z").unwrap(), &json!(["12"]));
        assert_eq!(doc.get("machine_max_speed_e").unwrap(), &json!(["120"]));
        assert_eq!(doc.get("gcode_flavor").unwrap(), &json!(["klipper"]));
    }

    #[test]
    fn test_travel_speed_caps_both_planar_axes() {
        let mut p = printer("Voron");
        p.max_travel_speed = Some(Scalar::Number(650.0));
        let doc = encode_machine(&p);
        assert_eq!(doc.get("machine_max_speed_x").unwrap(), &json!(["650"]));
        assert_eq!(doc.get("machine_max_speed_y").unwrap(), &json!(["650"]));
    }

    #[test]
    fn test_firmware_retraction_flag() {
        let mut p = printer("Voron");
        p.retraction_mode = RetractionMode::Firmware;
        let doc = encode_machine(&p);
        assert_eq!(doc.get("use_firmware_retraction").unwrap(), &json!(["1"]));

        p.retraction_mode = RetractionMode::Software;
        let doc = encode_machine(&p);
        assert_eq!(doc.get("use_firmware_retraction").unwrap(), &json!(["0"]));
    }

    #[test]
    fn test_zhop_keys_gated_on_sentinel_and_height() {
        let doc = encode_machine(&printer("Voron"));
        assert!(!doc.contains_key("z_hop_types"));
        assert!(!doc.contains_key("z_hop"));

        let mut p = printer("Voron");
        p.zhop_type = Some("Spiral Lift".to_string());
        p.zhop_height = Some(Scalar::from("0.4"));
        let doc = encode_machine(&p);
        assert_eq!(doc.get("z_hop_types").unwrap(), &json!(["Spiral Lift"]));
        assert_eq!(doc.get("z_hop").unwrap(), &json!(["0.4"]));

        // "None" sentinel suppresses the type key but not a configured height
        let mut p = printer("Voron");
        p.zhop_type = Some("None".to_string());
        p.zhop_height = Some(Scalar::from("0.4"));
        let doc = encode_machine(&p);
        assert!(!doc.contains_key("z_hop_types"));
        assert!(doc.contains_key("z_hop"));
    }

    #[test]
    fn test_name_is_plain_string() {
        let doc = encode_machine(&printer("Voron 2.4"));
        assert_eq!(doc.get("name").unwrap(), &json!("Voron 2.4"));
        assert_eq!(doc.get("inherits").unwrap(), &json!("Generic Klipper Printer @System"));
    }
}

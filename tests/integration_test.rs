use std::collections::HashMap;

use mavcodec::loader::XmlSource;
use mavcodec::protocol::{FieldValue, Value};
use mavcodec::{compile, CompileError, CompileOptions};

const MINIMAL_XML: &str = r#"<mavlink file="minimal.xml">
    <version>3</version>
    <dialect>0</dialect>
    <enums>
        <enum name="MAV_AUTOPILOT">
            <description>Autopilot type.</description>
            <entry name="MAV_AUTOPILOT_GENERIC" value="0"/>
            <entry name="MAV_AUTOPILOT_PX4" value="12"/>
        </enum>
    </enums>
    <messages>
        <message id="0" name="HEARTBEAT">
            <description>The heartbeat message.</description>
            <field type="uint8_t" name="type">Type of the system.</field>
            <field type="uint8_t" name="autopilot" enum="MAV_AUTOPILOT">Autopilot type.</field>
            <field type="uint32_t" name="custom_mode">A bitfield.</field>
            <field type="uint8_t" name="base_mode">System mode bitmask.</field>
            <field type="uint8_t" name="system_status">System status flag.</field>
        </message>
        <message id="300" name="PROTOCOL_VERSION">
            <description>Version and capability of protocol version.</description>
            <field type="uint16_t" name="version">Currently active version.</field>
            <field type="uint16_t" name="min_version">Minimum version supported.</field>
            <field type="uint16_t" name="max_version">Maximum version supported.</field>
            <field type="uint8_t[8]" name="spec_version_hash">SHA256 hash.</field>
            <field type="uint8_t[8]" name="library_version_hash">SHA256 hash.</field>
        </message>
    </messages>
</mavlink>"#;

const EXTRA_XML: &str = r#"<mavlink file="extra.xml">
    <include>minimal.xml</include>
    <messages>
        <message id="54000" name="CUSTOM_STATUS">
            <description>A dialect-specific status message.</description>
            <field type="uint8_t" name="severity">How severe the status is.</field>
            <extensions/>
            <field type="float" name="altitude" instance="true">Altitude extension field.</field>
        </message>
    </messages>
</mavlink>"#;

fn load(xml: &str) -> XmlSource {
    XmlSource::parse(xml, None).unwrap()
}

#[test]
fn naming_collisions_are_rejected() {
    let a = XmlSource::parse(
        r#"<mavlink file="a.xml"><messages><message id="1" name="SAME"/></messages></mavlink>"#,
        None,
    )
    .unwrap();
    let b = XmlSource::parse(
        r#"<mavlink file="b.xml"><include>a.xml</include><messages><message id="2" name="SAME"/></messages></mavlink>"#,
        None,
    )
    .unwrap();

    let err = compile("b", &[a, b], CompileOptions::default());
    assert!(matches!(err, Err(CompileError::MergeConflict { .. })));
}

#[test]
fn missing_includes_do_not_panic() {
    let root = XmlSource::parse(
        r#"<mavlink file="root.xml"><include>nonexistent.xml</include><messages/></mavlink>"#,
        None,
    )
    .unwrap();

    let err = compile("root", &[root], CompileOptions::default());
    assert!(matches!(err, Err(CompileError::MissingInclude { .. })));
}

#[test]
fn minimal_dialect_is_compiled_correctly() {
    let minimal = load(MINIMAL_XML);
    let dialect = compile("minimal", &[minimal], CompileOptions::default()).unwrap();

    assert!(dialect.enums().get("mav-autopilot").is_some());

    let heartbeat = dialect.messages().get(&0u32).unwrap();
    assert_eq!(heartbeat.name(), "HEARTBEAT");

    let protocol_version = dialect.messages().get(&300u32).unwrap();
    assert_eq!(protocol_version.name(), "PROTOCOL_VERSION");
    assert_eq!(protocol_version.payload_size_v2(), 2 + 2 + 2 + 8 + 8);
}

#[test]
fn extra_dialect_inherits_included_messages() {
    let minimal = load(MINIMAL_XML);
    let extra = load(EXTRA_XML);
    let dialect = compile("extra", &[minimal, extra], CompileOptions::default()).unwrap();

    assert!(dialect.messages().get(&0u32).is_some(), "`extra` should inherit HEARTBEAT");
    assert!(dialect.messages().get(&54000u32).is_some());

    let custom = dialect.message_by_name("custom-status").unwrap();
    assert_eq!(custom.payload_size_v1(), 1);
    assert_eq!(custom.payload_size_v2(), 5);
}

#[test]
fn heartbeat_round_trips_through_encode_and_decode() {
    let minimal = load(MINIMAL_XML);
    let dialect = compile("minimal", &[minimal], CompileOptions::default()).unwrap();
    let heartbeat = dialect.messages().get(&0u32).unwrap();

    let mut record = HashMap::new();
    record.insert("type".to_string(), Value::Scalar(FieldValue::UInt8(2)));
    record.insert("autopilot".to_string(), Value::Scalar(FieldValue::UInt8(12)));
    record.insert("custom-mode".to_string(), Value::Scalar(FieldValue::UInt32(1)));
    record.insert("base-mode".to_string(), Value::Scalar(FieldValue::UInt8(81)));
    record.insert("system-status".to_string(), Value::Scalar(FieldValue::UInt8(4)));

    let payload = heartbeat.encode(&record);
    assert_eq!(payload.len(), heartbeat.payload_size_v2());

    let decoded = heartbeat.decode(&payload, dialect.enums());
    match decoded.get("autopilot").unwrap() {
        Value::Symbol { name, .. } => assert_eq!(name, "mav-autopilot-px4"),
        other => panic!("expected symbol, got {other:?}"),
    }
    assert_eq!(decoded.get("type"), Some(&Value::Scalar(FieldValue::UInt8(2))));
}

#[test]
fn descriptions_are_collected_across_the_include_chain() {
    let minimal = load(MINIMAL_XML);
    let extra = load(EXTRA_XML);
    let options = CompileOptions { descriptions: true };
    let dialect = compile("extra", &[minimal, extra], options).unwrap();

    let descriptions = dialect.descriptions().unwrap();
    assert_eq!(
        descriptions.messages().get("heartbeat").unwrap(),
        "The heartbeat message."
    );
    assert_eq!(
        descriptions.messages().get("custom-status").unwrap(),
        "A dialect-specific status message."
    );
}

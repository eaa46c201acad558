use mavcodec::loader::XmlSource;
use mavcodec::protocol::{FieldValue, Value};
use mavcodec::{compile, CompileOptions};

const COMMON_XML: &str = r#"<mavlink file="common.xml">
    <enums>
        <enum name="MAV_STATE">
            <description>State of the system.</description>
            <entry name="MAV_STATE_UNINIT"><description>Uninitialized.</description></entry>
            <entry name="MAV_STATE_ACTIVE"><description>Active.</description></entry>
        </enum>
    </enums>
    <messages>
        <message id="0" name="HEARTBEAT">
            <description>The heartbeat message.</description>
            <field type="uint8_t" name="type">Type of the system.</field>
            <field type="uint32_t" name="custom_mode">A bitfield for use for autopilot-specific flags.</field>
            <field type="uint8_t" name="system_status" enum="MAV_STATE">System status flag.</field>
        </message>
    </messages>
</mavlink>"#;

const CRAZYFLIGHT_XML: &str = r#"<mavlink file="crazyflight.xml">
    <include>common.xml</include>
    <messages>
        <message id="54000" name="CRAZYFLIGHT_OUTCRY">
            <description>A custom status message.</description>
            <field type="uint8_t" name="severity">How loud the outcry is.</field>
            <field type="char[16]" name="reason">Why the outcry happened.</field>
        </message>
    </messages>
</mavlink>"#;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module(env!("CARGO_PKG_NAME"), log::LevelFilter::Trace)
        .init();

    let common = XmlSource::parse(COMMON_XML, None).unwrap();
    let crazyflight = XmlSource::parse(CRAZYFLIGHT_XML, None).unwrap();

    let options = CompileOptions { descriptions: true };
    let dialect = compile("crazyflight", &[common, crazyflight], options).unwrap();

    let outcry = dialect.message_by_name("crazyflight-outcry").unwrap();
    assert_eq!(outcry.name(), "CRAZYFLIGHT_OUTCRY");
    log::info!("`CRAZYFLIGHT_OUTCRY` message: {outcry:#?}");

    // HEARTBEAT is inherited from the included `common.xml` dialect.
    let heartbeat = dialect.message_by_name("heartbeat").unwrap();
    assert_eq!(heartbeat.name(), "HEARTBEAT");

    let mut record = std::collections::HashMap::new();
    record.insert("type".to_string(), Value::Scalar(FieldValue::UInt8(2)));
    record.insert("custom-mode".to_string(), Value::Scalar(FieldValue::UInt32(0)));
    record.insert(
        "system-status".to_string(),
        Value::Scalar(FieldValue::UInt8(2)),
    );

    let payload = heartbeat.encode(&record);
    let decoded = heartbeat.decode(&payload, dialect.enums());
    match decoded.get("system-status").unwrap() {
        Value::Symbol { name, .. } => assert_eq!(name, "mav-state-active"),
        other => panic!("expected symbol, got {other:?}"),
    }

    log::warn!("decoded HEARTBEAT payload: {decoded:#?}");
}

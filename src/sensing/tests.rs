use super::mock::{MockChannelReader, MockFailure};
use super::*;
use crate::config::{ConfigurationError, SensorSpec};
use std::sync::Arc;
use strum::IntoEnumIterator;

fn registry(unique_colors: bool) -> Arc<SensorRegistry> {
    Arc::new(SensorRegistry::new((0..=6).map(Channel::new), unique_colors))
}

fn photoresistor(
    idx: u8,
    vector: Axis,
    registry: &Arc<SensorRegistry>,
    reader: &Arc<MockChannelReader>,
) -> Photoresistor {
    let reader: Arc<dyn ChannelReader> = reader.clone();
    Photoresistor::new(
        Channel::new(idx),
        Some("white"),
        vector,
        AdcScale::default(),
        Arc::clone(registry),
        reader,
    )
    .unwrap()
}

#[test]
fn test_channel_parse() {
    assert_eq!(Channel::parse("AIN0").unwrap(), Channel::new(0));
    assert_eq!(Channel::parse(" AIN5 ").unwrap().index(), 5);
    assert_eq!(Channel::new(3).to_string(), "AIN3");
    for bad in ["AIN", "ain1", "P9_33", "AIN-1", "AIN123"] {
        assert_eq!(Channel::parse(bad), Err(ConfigurationError::InvalidChannel(bad.to_string())));
    }
}

#[test]
fn test_axis_vectors() {
    for axis in Axis::iter() {
        assert_eq!(Axis::try_from(axis.components()).unwrap(), axis);
        assert_eq!(axis.opposite().opposite(), axis);
        assert_ne!(axis.is_positive(), axis.opposite().is_positive());
        assert_eq!(axis.dimension(), axis.opposite().dimension());
    }
    assert_eq!(Axis::NegY.components(), [0, -1, 0]);
    assert_eq!(Axis::PosZ.to_string(), "+Z");
    assert_eq!(
        Axis::try_from([1, 1, 0]),
        Err(ConfigurationError::InvalidMountVector([1, 1, 0]))
    );
}

#[test]
fn test_rejected_validation_leaves_registry_unchanged() {
    let reg = registry(true);
    reg.validate(Channel::new(0), Axis::PosX, Some("white")).unwrap();
    reg.validate(Channel::new(1), Axis::NegY, Some("green")).unwrap();
    let before = reg.snapshot();

    let rejected = [
        (Channel::new(9), Axis::PosZ, Some("orange")),
        (Channel::new(0), Axis::PosZ, Some("orange")),
        (Channel::new(2), Axis::PosX, Some("orange")),
        (Channel::new(2), Axis::PosZ, Some("green")),
    ];
    for (channel, vector, color) in rejected {
        assert!(reg.validate(channel, vector, color).is_err());
        assert_eq!(reg.snapshot(), before);
    }
    assert!(!reg.snapshot().vectors.contains(&Axis::PosZ));
    assert!(!reg.snapshot().channels.contains(&Channel::new(2)));
}

#[test]
fn test_validation_errors() {
    let reg = registry(false);
    reg.validate(Channel::new(2), Axis::PosZ, Some("orange")).unwrap();
    assert_eq!(
        reg.validate(Channel::new(7), Axis::NegZ, None),
        Err(ConfigurationError::InvalidChannel("AIN7".into()))
    );
    assert_eq!(
        reg.validate(Channel::new(2), Axis::NegZ, None),
        Err(ConfigurationError::DuplicateChannel("AIN2".into()))
    );
    assert_eq!(
        reg.validate(Channel::new(3), Axis::PosZ, None),
        Err(ConfigurationError::DuplicateMountVector("+Z".into()))
    );
    // colors are only a diagnostic tag unless uniqueness is requested
    assert!(reg.validate(Channel::new(3), Axis::NegZ, Some("orange")).is_ok());

    let strict = registry(true);
    strict.validate(Channel::new(2), Axis::PosZ, Some("orange")).unwrap();
    assert_eq!(
        strict.validate(Channel::new(3), Axis::NegZ, Some("orange")),
        Err(ConfigurationError::DuplicateColor("orange".into()))
    );
}

#[test]
fn test_unregister_is_idempotent() {
    let reg = registry(true);
    reg.validate(Channel::new(4), Axis::NegX, Some("brown")).unwrap();
    reg.unregister(Channel::new(4), Axis::NegX, Some("brown"));
    let after_first = reg.snapshot();
    assert_eq!(after_first, RegistrySnapshot::default());
    reg.unregister(Channel::new(4), Axis::NegX, Some("brown"));
    reg.unregister(Channel::new(6), Axis::PosY, None);
    assert_eq!(reg.snapshot(), after_first);
    assert!(reg.validate(Channel::new(4), Axis::NegX, Some("brown")).is_ok());
}

#[test]
fn test_from_labels_rejects_garbage() {
    assert!(SensorRegistry::from_labels(&["AIN0", "AIN1"], false).is_ok());
    assert!(SensorRegistry::from_labels(&["AIN0", "ADC1"], false).is_err());
}

#[test]
fn test_photoresistor_construction_registers_and_drop_releases() {
    let reg = registry(false);
    let reader = Arc::new(MockChannelReader::default());
    let sensor = photoresistor(0, Axis::PosX, &reg, &reader);
    assert!(reg.snapshot().channels.contains(&Channel::new(0)));

    let dyn_reader: Arc<dyn ChannelReader> = reader.clone();
    let dup = Photoresistor::new(
        Channel::new(0),
        None,
        Axis::NegX,
        AdcScale::default(),
        Arc::clone(&reg),
        Arc::clone(&dyn_reader),
    );
    assert_eq!(dup.unwrap_err(), ConfigurationError::DuplicateChannel("AIN0".into()));

    drop(sensor);
    assert_eq!(reg.snapshot(), RegistrySnapshot::default());
}

#[test]
fn test_release_does_not_touch_successor() {
    let reg = registry(false);
    let reader = Arc::new(MockChannelReader::default());
    let mut first = photoresistor(4, Axis::PosZ, &reg, &reader);
    first.release();
    first.release();
    assert_eq!(reg.snapshot(), RegistrySnapshot::default());

    let _second = photoresistor(4, Axis::PosZ, &reg, &reader);
    drop(first);
    assert!(reg.snapshot().channels.contains(&Channel::new(4)));
    assert!(reg.snapshot().vectors.contains(&Axis::PosZ));
}

#[test]
fn test_from_spec() {
    let reg = registry(false);
    let reader: Arc<dyn ChannelReader> = Arc::new(MockChannelReader::default());
    let spec = SensorSpec::new("AIN5", "yellow", [0, 1, 0]);
    let sensor =
        Photoresistor::from_spec(&spec, AdcScale::default(), Arc::clone(&reg), Arc::clone(&reader))
            .unwrap();
    assert_eq!(sensor.channel(), Channel::new(5));
    assert_eq!(sensor.vector(), Axis::PosY);
    assert_eq!(sensor.color(), Some("yellow"));
    assert_eq!(sensor.describe().label(), "AIN5_yellow");

    let skewed = SensorSpec::new("AIN6", "red", [1, 0, 1]);
    assert!(Photoresistor::from_spec(&skewed, AdcScale::default(), reg, reader).is_err());
}

#[test]
fn test_normalized_value_is_clamped() {
    let reg = registry(false);
    let reader = Arc::new(MockChannelReader::default());
    let mut sensor = photoresistor(1, Axis::NegY, &reg, &reader);
    assert!(sensor.normalized_value().abs() < f64::EPSILON);

    sensor.store_raw(0);
    assert!(sensor.normalized_value().abs() < f64::EPSILON);
    sensor.store_raw(4095);
    assert!((sensor.normalized_value() - 1.0).abs() < f64::EPSILON);
    assert!((sensor.voltage() - 1.8).abs() < 1e-12);

    sensor.store_raw(5000);
    assert_eq!(sensor.raw_code(), 4095);
    assert!((sensor.normalized_value() - 1.0).abs() < f64::EPSILON);
    sensor.store_raw(-12);
    assert_eq!(sensor.raw_code(), 0);
    assert!(sensor.normalized_value().abs() < f64::EPSILON);

    for code in (0..=4095).step_by(117) {
        sensor.store_raw(code);
        let v = sensor.normalized_value();
        assert!((0.0..=1.0).contains(&v));
    }
}

#[tokio::test]
async fn test_failed_read_keeps_stale_value() {
    let reg = registry(false);
    let reader = Arc::new(MockChannelReader::with_codes(&[(3, 2048)]));
    let mut sensor = photoresistor(3, Axis::NegX, &reg, &reader);

    assert_eq!(sensor.read_raw().await.unwrap(), 2048);
    let fresh = sensor.normalized_value();

    for failure in [MockFailure::NotFound, MockFailure::Malformed, MockFailure::Io] {
        reader.fail(3, failure);
        let err = sensor.read().await.unwrap_err();
        assert_eq!(err.channel(), Channel::new(3));
        assert_eq!(sensor.raw_code(), 2048);
        assert!((sensor.describe().value - fresh).abs() < f64::EPSILON);
    }

    reader.set_code(3, -7);
    assert_eq!(sensor.read_raw().await.unwrap(), 0);
    assert_eq!(sensor.raw_code(), 0);
    assert!(sensor.normalized_value().abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_iio_reader_maps_errors() {
    let dir = std::env::temp_dir().join(format!("adcs_iio_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let template = dir.join("in_voltage{channel}_raw").to_string_lossy().into_owned();
    let reader = IioChannelReader::new(&template);

    std::fs::write(reader.path_for(Channel::new(0)), "1234\n").unwrap();
    std::fs::write(reader.path_for(Channel::new(1)), "garbage").unwrap();

    assert_eq!(reader.read(Channel::new(0)).await.unwrap(), 1234);
    assert!(matches!(
        reader.read(Channel::new(1)).await,
        Err(SensorReadError::Malformed { .. })
    ));
    assert!(matches!(
        reader.read(Channel::new(2)).await,
        Err(SensorReadError::NotFound { .. })
    ));
    std::fs::remove_dir_all(dir).unwrap();
}

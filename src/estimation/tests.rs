use super::calibration::{CalibrationError, CalibrationTable, angular_error_deg, average_direction};
use super::*;
use crate::sensing::Axis;
use rand::Rng;
use strum::IntoEnumIterator;

const TOL: f64 = 1e-9;

fn assert_vec_eq(actual: Vec3D<f64>, expected: Vec3D<f64>) {
    assert!(
        (actual - expected).abs() < TOL,
        "expected {expected}, got {actual}"
    );
}

fn full_snapshot(values: [f64; 6]) -> ReadingSnapshot {
    Axis::iter().zip(values).collect()
}

#[test]
fn test_differential_single_axis() {
    let snapshot = full_snapshot([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let est = differential_normalize(&snapshot).unwrap();
    assert_vec_eq(est.vector(), Vec3D::new(1.0, 0.0, 0.0));
}

#[test]
fn test_differential_unit_magnitude() {
    let mut rng = rand::rng();
    for _ in 0..1000 {
        let mut values = [0.0; 6];
        for v in &mut values {
            *v = if rng.random_bool(0.3) { 0.0 } else { rng.random_range(0.0..=1.0) };
        }
        values[rng.random_range(0..6)] = rng.random_range(0.01..=1.0);
        let snapshot = full_snapshot(values);
        match differential_normalize(&snapshot) {
            Ok(est) => {
                assert!((est.vector().abs() - 1.0).abs() < TOL);
                assert!(est.vector().is_finite());
            }
            Err(e) => assert_eq!(e, DegenerateReadingError::Balanced),
        }
    }
}

#[test]
fn test_all_dark_is_degenerate() {
    let snapshot = full_snapshot([0.0; 6]);
    for strategy in EstimationStrategy::iter() {
        assert_eq!(strategy.estimate(&snapshot), Err(DegenerateReadingError::AllDark));
    }
    assert_eq!(
        differential_normalize(&ReadingSnapshot::new()),
        Err(DegenerateReadingError::AllDark)
    );
}

#[test]
fn test_balanced_light_never_yields_nan() {
    let snapshot = full_snapshot([0.5, 0.5, 0.3, 0.3, 0.9, 0.9]);
    assert_eq!(differential_normalize(&snapshot), Err(DegenerateReadingError::Balanced));
    // the sign-select estimator still sees light on every axis
    let alt = max_intensity_sign_select(&snapshot).unwrap();
    assert!((alt.vector().abs() - 1.0).abs() < TOL);
}

#[test]
fn test_max_intensity_sign_select_ties_favor_positive() {
    let snapshot = full_snapshot([0.8, 0.2, 0.5, 0.5, 0.0, 1.0]);
    let est = max_intensity_sign_select(&snapshot).unwrap();
    let raw = Vec3D::new(0.8, 0.5, -1.0);
    assert_vec_eq(est.vector(), raw / raw.abs());
}

#[test]
fn test_strategies_disagree() {
    let snapshot = full_snapshot([0.8, 0.2, 0.5, 0.5, 0.0, 1.0]);
    let a = EstimationStrategy::SYSTEM_OF_RECORD.estimate(&snapshot).unwrap();
    let b = EstimationStrategy::CALIBRATION_ALTERNATE.estimate(&snapshot).unwrap();
    let raw_a = Vec3D::new(0.6, 0.0, -1.0);
    assert_vec_eq(a.vector(), raw_a / raw_a.abs());
    assert!((a.vector() - b.vector()).abs() > 0.1);
    assert_eq!(EstimationStrategy::SYSTEM_OF_RECORD.to_string(), "differential-normalize");
}

#[test]
fn test_missing_sensor_reads_dark() {
    // default harness has no -Z photodiode
    let snapshot = ReadingSnapshot::new()
        .with(Axis::PosX, 0.2)
        .with(Axis::NegX, 0.0)
        .with(Axis::PosY, 0.0)
        .with(Axis::NegY, 0.0)
        .with(Axis::PosZ, 0.2);
    assert!(!snapshot.has_sensor(Axis::NegZ));
    let est = differential_normalize(&snapshot).unwrap();
    let expected = Vec3D::new(1.0, 0.0, 1.0);
    assert_vec_eq(est.vector(), expected / expected.abs());
}

#[test]
fn test_snapshot_clamps_readings() {
    let snapshot = ReadingSnapshot::new().with(Axis::PosX, 3.0).with(Axis::NegX, f64::NAN);
    assert!((snapshot.get(Axis::PosX) - 1.0).abs() < f64::EPSILON);
    assert!(snapshot.get(Axis::NegX).abs() < f64::EPSILON);
    assert!(snapshot.get(Axis::PosY).abs() < f64::EPSILON);
}

#[test]
fn test_generalized_matches_differential_on_canonical_geometry() {
    let mounts: Vec<Vec3D<f64>> = Axis::iter().map(Axis::unit_vector).collect();
    let estimator = GeneralizedEstimator::new(&mounts).unwrap();
    let mut rng = rand::rng();
    for _ in 0..200 {
        let values: [f64; 6] = std::array::from_fn(|_| rng.random_range(0.0..=1.0));
        let a = differential_normalize(&full_snapshot(values));
        let g = estimator.estimate(&values);
        match (a, g) {
            (Ok(a), Ok(g)) => assert!((a.vector() - g.vector()).abs() < 1e-6),
            (a, g) => assert_eq!(a.is_err(), g.is_err()),
        }
    }
}

#[test]
fn test_generalized_skewed_geometry() {
    let s = 0.5_f64.sqrt();
    let mounts = [
        Vec3D::new(s, s, 0.0),
        Vec3D::new(s, -s, 0.0),
        Vec3D::new(0.0, s, s),
        Vec3D::new(0.0, 0.0, 1.0),
    ];
    let estimator = GeneralizedEstimator::new(&mounts).unwrap();
    let sun = Vec3D::new(0.6, 0.0, 0.8);
    let readings: Vec<f64> = estimator.mounts().iter().map(|m| m.dot(sun)).collect();
    assert!(readings.iter().all(|r| (0.0..=1.0).contains(r)));
    let est = estimator.estimate(&readings).unwrap();
    assert_vec_eq(est.vector(), sun);

    let planar = [Vec3D::new(1.0, 0.0, 0.0), Vec3D::new(0.0, 1.0, 0.0), Vec3D::new(-1.0, 0.0, 0.0)];
    assert_eq!(
        GeneralizedEstimator::new(&planar).unwrap_err(),
        DegenerateReadingError::SingularGeometry
    );
    assert_eq!(
        GeneralizedEstimator::new(&[Vec3D::zero(), Vec3D::new(1.0, 0.0, 0.0)]).unwrap_err(),
        DegenerateReadingError::SingularGeometry
    );
    assert_eq!(estimator.estimate(&[0.0; 4]), Err(DegenerateReadingError::AllDark));
}

#[test]
fn test_matrix_inverse() {
    let m: Matrix<f64, 3, 3> = Matrix::new([[0.0, 2.0, 1.0], [1.0, 0.0, 0.0], [3.0, 1.0, 4.0]]);
    let inv = m.try_inverse(1e-12).unwrap();
    let id = m * inv;
    for i in 0..3 {
        for j in 0..3 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((id.get(i, j) - expected).abs() < 1e-12);
        }
    }
    let singular: Matrix<f64, 3, 3> = Matrix::new([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
    assert!(singular.try_inverse(1e-12).is_none());
}

#[test]
fn test_vec3d_normalize_guards() {
    assert!(Vec3D::<f64>::zero().try_normalize().is_none());
    assert!(Vec3D::new(f64::NAN, 1.0, 0.0).try_normalize().is_none());
    assert!(Vec3D::new(f64::INFINITY, 1.0, 0.0).try_normalize().is_none());
    let n = Vec3D::new(0.0, 3.0, 4.0).try_normalize().unwrap();
    assert_vec_eq(n, Vec3D::new(0.0, 0.6, 0.8));
    assert_eq!(format!("{:.1}", Vec3D::new(1.0, -0.5, 0.26)), "[1.0, -0.5, 0.3]");
}

#[test]
fn test_calibration_table() {
    let mut table = CalibrationTable::with_step(90);
    assert_eq!(table.records().len(), 4);
    assert_eq!(table.pending().count(), 4);
    assert!(matches!(
        table.compute_errors(),
        Err(CalibrationError::MissingMeasurement { angle_deg: 0 })
    ));

    let measurements = [
        Vec3D::new(1.0, 0.0, 0.0),
        Vec3D::new(0.0, 1.0, 0.0),
        Vec3D::new(-1.0, 0.1, 0.0),
        Vec3D::new(0.1, -1.0, 0.0),
    ];
    for (idx, m) in measurements.into_iter().enumerate() {
        table.record(idx, Some(m));
    }
    assert_eq!(table.pending().count(), 0);
    table.compute_errors().unwrap();
    let errors: Vec<f64> = table.records().iter().map(|r| r.error_deg.unwrap()).collect();
    assert!(errors[0] < 1e-6 && errors[1] < 1e-6);
    let skew = 0.1_f64.atan().to_degrees();
    assert!((errors[2] - skew).abs() < 1e-6);
    assert!((errors[3] - skew).abs() < 1e-6);

    let mut out = Vec::new();
    table.write_csv(&mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "angle_deg,x_expected,y_expected,x_measured,y_measured,error_deg"
    );
    assert_eq!(lines.count(), 4);
}

#[test]
fn test_angular_error_and_average() {
    let e = angular_error_deg(Vec3D::new(1.0, 0.0, 0.0), Vec3D::new(0.0, 2.0, 0.0)).unwrap();
    assert!((e - 90.0).abs() < 1e-9);
    assert!(angular_error_deg(Vec3D::new(1.0, 0.0, 0.0), Vec3D::zero()).is_none());

    let samples = [
        SunVector::from_unnormalized(Vec3D::new(1.0, 0.0, 0.0)).unwrap(),
        SunVector::from_unnormalized(Vec3D::new(0.0, 1.0, 0.0)).unwrap(),
    ];
    let avg = average_direction(&samples).unwrap();
    let s = 0.5_f64.sqrt();
    assert_vec_eq(avg, Vec3D::new(s, s, 0.0));
    assert!(average_direction(&[]).is_none());
}

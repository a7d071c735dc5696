use stelltor_core::{
    AngularGrid, AngularTransform, RealSpaceForces, SymmetryMode, TolerancePolicy, TransformError,
};

fn axisymmetric_transform() -> AngularTransform {
    // m_pol = 2, n_tor = 0, 3 reduced rows, single toroidal plane: the
    // poloidal reflection maps 0->0, 1->3, 2->2, 3->1 on the 4 full rows.
    let grid =
        AngularGrid::new(2, 0, 3, 1, 1, SymmetryMode::Asymmetric).expect("grid should validate");
    AngularTransform::new(grid)
}

#[test]
fn hand_computed_axisymmetric_split() {
    let transform = axisymmetric_transform();
    let mut forces = RealSpaceForces::zeros(4, 1);
    for (i, value) in [1.0, 2.0, 3.0, 4.0].into_iter().enumerate() {
        forces.f_r.set(i, 0, value);
        forces.f_z.set(i, 0, value);
        forces.f_lambda.set(i, 0, -value);
    }

    let split = transform
        .symmetrize_forces(&forces)
        .expect("symmetrization should succeed");

    // Even components: half-sum on the primary rows, even extension.
    assert_eq!(split.symmetric.f_r.at(0, 0), 1.0);
    assert_eq!(split.symmetric.f_r.at(1, 0), 3.0);
    assert_eq!(split.symmetric.f_r.at(2, 0), 3.0);
    assert_eq!(split.symmetric.f_r.at(3, 0), 3.0);
    assert_eq!(split.antisymmetric.f_r.at(0, 0), 0.0);
    assert_eq!(split.antisymmetric.f_r.at(1, 0), -1.0);
    assert_eq!(split.antisymmetric.f_r.at(2, 0), 0.0);
    assert_eq!(split.antisymmetric.f_r.at(3, 0), 1.0);

    // Odd component: half-difference, odd extension.
    assert_eq!(split.symmetric.f_z.at(0, 0), 0.0);
    assert_eq!(split.symmetric.f_z.at(1, 0), -1.0);
    assert_eq!(split.symmetric.f_z.at(2, 0), 0.0);
    assert_eq!(split.symmetric.f_z.at(3, 0), 1.0);
    assert_eq!(split.antisymmetric.f_z.at(1, 0), 3.0);
    assert_eq!(split.antisymmetric.f_z.at(3, 0), 3.0);

    // F_lambda shares the even parity of F_R.
    assert_eq!(split.symmetric.f_lambda.at(1, 0), -3.0);
    assert_eq!(split.antisymmetric.f_lambda.at(1, 0), 1.0);
    assert_eq!(split.antisymmetric.f_lambda.at(3, 0), -1.0);
}

#[test]
fn reflection_parity_holds_bitwise_under_the_policy_band() {
    let grid =
        AngularGrid::new(3, 1, 5, 4, 2, SymmetryMode::Asymmetric).expect("grid should validate");
    let transform = AngularTransform::new(grid);
    let n_full = transform.grid().n_theta_full();
    let n_zeta = transform.grid().n_zeta();

    let mut forces = RealSpaceForces::zeros(n_full, n_zeta);
    for i in 0..n_full {
        for k in 0..n_zeta {
            let x = (i * n_zeta + k) as f64;
            forces.f_r.set(i, k, (0.37 * x).sin() + 0.2 * x);
            forces.f_z.set(i, k, (0.53 * x).cos() - 0.1 * x);
            forces.f_lambda.set(i, k, 0.02 * x * x - 0.3);
        }
    }

    let split = transform
        .symmetrize_forces(&forces)
        .expect("symmetrization should succeed");

    let band = TolerancePolicy::default()
        .band_for("symmetry.reflection")
        .expect("default policy carries the reflection band");
    assert_eq!(band.abs_tol, 0.0);

    for i in 0..n_full {
        let ir = transform.reflection().poloidal(i);
        for k in 0..n_zeta {
            let kr = transform.reflection().toroidal(k);
            assert!(band.accepts(split.symmetric.f_r.at(ir, kr), split.symmetric.f_r.at(i, k)));
            assert!(band.accepts(-split.symmetric.f_z.at(ir, kr), split.symmetric.f_z.at(i, k)));
            assert!(band.accepts(
                split.symmetric.f_lambda.at(ir, kr),
                split.symmetric.f_lambda.at(i, k)
            ));
            assert!(band.accepts(
                -split.antisymmetric.f_r.at(ir, kr),
                split.antisymmetric.f_r.at(i, k)
            ));
            assert!(band.accepts(
                split.antisymmetric.f_z.at(ir, kr),
                split.antisymmetric.f_z.at(i, k)
            ));
            assert!(band.accepts(
                -split.antisymmetric.f_lambda.at(ir, kr),
                split.antisymmetric.f_lambda.at(i, k)
            ));
        }
    }
}

#[test]
fn symmetrization_is_idempotent_on_its_own_output() {
    let grid =
        AngularGrid::new(3, 1, 5, 4, 1, SymmetryMode::Asymmetric).expect("grid should validate");
    let transform = AngularTransform::new(grid);
    let n_full = transform.grid().n_theta_full();
    let n_zeta = transform.grid().n_zeta();

    let mut forces = RealSpaceForces::zeros(n_full, n_zeta);
    for i in 0..n_full {
        for k in 0..n_zeta {
            let x = (i * n_zeta + k) as f64;
            forces.f_r.set(i, k, 1.0 + 0.1 * x);
            forces.f_z.set(i, k, 0.2 * x - 0.5);
            forces.f_lambda.set(i, k, 0.03 * x);
        }
    }

    // The symmetric part already respects the reflection at every point, so
    // a second split must return it unchanged with nothing left over.
    let first = transform
        .symmetrize_forces(&forces)
        .expect("symmetrization should succeed");
    let second = transform
        .symmetrize_forces(&first.symmetric)
        .expect("second symmetrization should succeed");

    assert_eq!(second.symmetric.f_r.as_slice(), first.symmetric.f_r.as_slice());
    assert_eq!(second.symmetric.f_z.as_slice(), first.symmetric.f_z.as_slice());
    assert_eq!(
        second.symmetric.f_lambda.as_slice(),
        first.symmetric.f_lambda.as_slice()
    );
    assert!(second.antisymmetric.f_r.as_slice().iter().all(|&v| v == 0.0));
    assert!(second.antisymmetric.f_z.as_slice().iter().all(|&v| v == 0.0));
    assert!(
        second
            .antisymmetric
            .f_lambda
            .as_slice()
            .iter()
            .all(|&v| v == 0.0)
    );
}

#[test]
fn wrong_extent_and_non_finite_inputs_are_rejected() {
    let transform = axisymmetric_transform();

    // Primary-half extent on an asymmetric grid is a layout error.
    let short = RealSpaceForces::zeros(3, 1);
    let err = transform
        .symmetrize_forces(&short)
        .expect_err("reduced-extent forces should fail on an asymmetric grid");
    assert!(matches!(err, TransformError::LayoutMismatch { field: "f_r", .. }));

    let mut forces = RealSpaceForces::zeros(4, 1);
    forces.f_z.set(2, 0, f64::NAN);
    let err = transform
        .symmetrize_forces(&forces)
        .expect_err("NaN force residual should fail");
    assert!(matches!(
        err,
        TransformError::NonFiniteGeometry { field: "f_z", index: 2, .. }
    ));
}

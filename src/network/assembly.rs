use tracing::{debug, debug_span};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::ImpedanceMatrix;
use crate::constants::COPPER_CONDUCTIVITY;
use crate::errors::Result;
use crate::fields::partial_inductance;
use crate::geometry::{Conductor, Mesh};
use crate::math::{try_zeroed, CMatrix, CScalar, Scalar};

/// Which conductor's substrate supplies the dielectric loss of a signal filament.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LossAttribution {
    /// The conductor that owns the filament.
    #[default]
    Owner,
    /// Always the first signal conductor, regardless of ownership. Matches
    /// legacy results bit for bit; only differs from `Owner` when N > 1.
    FirstSignal,
}

/// Dielectric series loss (Ω/m) of conductor `c` at `omega`, zero without a substrate.
fn conductor_loss(c: &Conductor, omega: Scalar) -> Scalar {
    if c.substrate.is_present() {
        c.substrate.series_loss(omega, c.width)
    } else {
        0.0
    }
}

/// Builds the M x M complex impedance matrix of the filament mesh, referenced
/// to the mesh's return filament.
///
/// For every pair `i <= j`:
///
/// ```text
/// Z[i][j] = r00 + jω (Lp(0,0) - Lp(0,i) - Lp(0,j) + Lp(i,j))
/// r00     = 1 / (σ A0) + dielectric loss of the return conductor
/// ```
///
/// and each signal filament's diagonal additionally carries its own DC
/// resistance plus the dielectric loss selected by `attribution`. Each pair is
/// evaluated once and mirrored, so `Z` is exactly symmetric.
pub fn assemble_impedance(
    mesh: &Mesh,
    conductors: &[Conductor],
    omega: Scalar,
    attribution: LossAttribution,
) -> Result<ImpedanceMatrix> {
    let m = mesh.len();
    let _span = debug_span!("assemble", filaments = m).entered();

    let e0 = &mesh.return_filament;
    let ground = &conductors[0];
    let ground_loss = conductor_loss(ground, omega);
    if ground.substrate.is_present() {
        debug!(
            effective_permittivity = ground.substrate.effective_permittivity(ground.width),
            dielectric_loss = ground_loss,
            "ground plane substrate"
        );
    }

    let r00 = e0.dc_resistance(COPPER_CONDUCTIVITY) + ground_loss;
    let l00 = partial_inductance(e0, e0);
    let to_return: Vec<Scalar> = mesh
        .filaments
        .iter()
        .map(|f| partial_inductance(e0, f))
        .collect();

    let mut data = try_zeroed(m, m, CScalar::new(0.0, 0.0))?;
    let fill_column = |j: usize, column: &mut [CScalar]| {
        let fj = &mesh.filaments[j];
        for i in j..m {
            let loop_l = l00 - to_return[i] - to_return[j] + partial_inductance(&mesh.filaments[i], fj);
            column[i] = CScalar::new(r00, omega * loop_l);
        }
    };
    if m > 0 {
        #[cfg(feature = "parallel")]
        data.par_chunks_mut(m)
            .enumerate()
            .for_each(|(j, column)| fill_column(j, column));
        #[cfg(not(feature = "parallel"))]
        data.chunks_mut(m)
            .enumerate()
            .for_each(|(j, column)| fill_column(j, column));
    }

    let mut z = CMatrix::from_vec(m, m, data);
    for j in 0..m {
        for i in j + 1..m {
            z[(j, i)] = z[(i, j)];
        }
    }

    let losses: Vec<Scalar> = conductors.iter().map(|c| conductor_loss(c, omega)).collect();
    for i in mesh.return_offset..m {
        let owner = match attribution {
            LossAttribution::Owner => mesh.owners[i],
            LossAttribution::FirstSignal => 1,
        };
        z[(i, i)].re += mesh.filaments[i].dc_resistance(COPPER_CONDUCTIVITY) + losses[owner];
    }

    Ok(z)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::angular_frequency;
    use crate::geometry::build_mesh;
    use crate::materials::Substrate;

    fn layout(second: Substrate) -> Vec<Conductor> {
        vec![
            Conductor::new(1000.0e-6, 2.0e-6, 0.0, 0.0)
                .with_mesh(6, 1)
                .with_substrate(Substrate::fr4(100.0e-6)),
            Conductor::new(100.0e-6, 2.0e-6, 300.0e-6, 100.0e-6)
                .with_mesh(4, 2)
                .with_substrate(Substrate::fr4(100.0e-6)),
            Conductor::new(100.0e-6, 2.0e-6, 600.0e-6, 100.0e-6)
                .with_mesh(4, 2)
                .with_substrate(second),
        ]
    }

    #[test]
    fn impedance_matrix_is_exactly_symmetric() {
        let conductors = layout(Substrate::fr4(100.0e-6));
        let mesh = build_mesh(&conductors).unwrap();
        let z = assemble_impedance(&mesh, &conductors, angular_frequency(1.0e8), LossAttribution::Owner).unwrap();
        assert_eq!(z.shape(), (mesh.len(), mesh.len()));
        assert_eq!(z, z.transpose());
    }

    #[test]
    fn entries_follow_return_referenced_superposition() {
        let conductors = layout(Substrate::air());
        let mesh = build_mesh(&conductors).unwrap();
        let omega = angular_frequency(3.0e7);
        let z = assemble_impedance(&mesh, &conductors, omega, LossAttribution::Owner).unwrap();

        let e0 = &mesh.return_filament;
        let ground_loss = Substrate::fr4(100.0e-6).series_loss(omega, 1000.0e-6);
        let r00 = e0.dc_resistance(COPPER_CONDUCTIVITY) + ground_loss;
        let (i, j) = (2, 9);
        let (fi, fj) = (&mesh.filaments[i], &mesh.filaments[j]);
        let expected = omega
            * (partial_inductance(e0, e0) - partial_inductance(e0, fi) - partial_inductance(e0, fj)
                + partial_inductance(fi, fj));
        assert_relative_eq!(z[(i, j)].im, expected, max_relative = 1.0e-12);
        assert_eq!(z[(i, j)].re, r00);
        // Return-conductor filaments carry only the shared return resistance.
        assert_eq!(z[(0, 0)].re, r00);
        assert!(z[(mesh.return_offset, mesh.return_offset)].re > r00);
    }

    #[test]
    fn signal_loss_follows_filament_owner() {
        let conductors = layout(Substrate::air());
        let mesh = build_mesh(&conductors).unwrap();
        let omega = angular_frequency(1.0e9);
        let owner = assemble_impedance(&mesh, &conductors, omega, LossAttribution::Owner).unwrap();
        let legacy = assemble_impedance(&mesh, &conductors, omega, LossAttribution::FirstSignal).unwrap();

        let first = mesh.signal_range(1);
        let second = mesh.signal_range(2);
        for i in first {
            assert_eq!(owner[(i, i)], legacy[(i, i)]);
        }
        let loss = Substrate::fr4(100.0e-6).series_loss(omega, 100.0e-6);
        for i in second {
            assert_relative_eq!(legacy[(i, i)].re - owner[(i, i)].re, loss, max_relative = 1.0e-6);
        }
    }
}

//! Plane element kernels: membrane and bending stiffness blocks
//!
//! Membranes use the constant-strain triangle and the bilinear isoparametric
//! quadrilateral (2x2 Gauss). Bending uses Mindlin blocks with selective
//! integration (full bending, one-point shear) so thin plates do not lock.
//! All functions return `None` for degenerate geometry; the assembler maps
//! that to a Geometry error carrying the element id.

use nalgebra::{Matrix2, Matrix3, SMatrix, SVector};

pub type Mat3 = Matrix3<f64>;

/// Constitutive law for in-plane membrane behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembraneLaw {
    PlaneStress,
    PlaneStrain,
}

/// Shear correction factor for Mindlin bending
const SHEAR_CORRECTION: f64 = 5.0 / 6.0;

/// Gauss point location for 2x2 quadrature
const GP: f64 = 0.577_350_269_189_625_8;

/// Membrane constitutive matrix [D] for an isotropic material
pub fn membrane_constitutive(e: f64, nu: f64, law: MembraneLaw) -> Mat3 {
    match law {
        MembraneLaw::PlaneStress => {
            let f = e / (1.0 - nu * nu);
            Mat3::new(
                f,
                f * nu,
                0.0,
                f * nu,
                f,
                0.0,
                0.0,
                0.0,
                f * (1.0 - nu) / 2.0,
            )
        }
        MembraneLaw::PlaneStrain => {
            let f = e / ((1.0 + nu) * (1.0 - 2.0 * nu));
            Mat3::new(
                f * (1.0 - nu),
                f * nu,
                0.0,
                f * nu,
                f * (1.0 - nu),
                0.0,
                0.0,
                0.0,
                f * (1.0 - 2.0 * nu) / 2.0,
            )
        }
    }
}

/// Bending constitutive matrix [D_b] = t³/12 · plane-stress [D]
fn bending_constitutive(e: f64, nu: f64, t: f64) -> Mat3 {
    membrane_constitutive(e, nu, MembraneLaw::PlaneStress) * (t.powi(3) / 12.0)
}

/// Strain-displacement matrix and signed area of a 3-node triangle
///
/// DOF order: u1, v1, u2, v2, u3, v3. Returns `None` for collinear corners.
pub fn cst_b_matrix(coords: &[[f64; 2]; 3]) -> Option<(SMatrix<f64, 3, 6>, f64)> {
    let [p1, p2, p3] = *coords;
    let two_a = (p2[0] - p1[0]) * (p3[1] - p1[1]) - (p3[0] - p1[0]) * (p2[1] - p1[1]);
    if two_a.abs() < 1e-12 {
        return None;
    }

    let b = [p2[1] - p3[1], p3[1] - p1[1], p1[1] - p2[1]];
    let c = [p3[0] - p2[0], p1[0] - p3[0], p2[0] - p1[0]];

    let inv = 1.0 / two_a;
    let mut bm = SMatrix::<f64, 3, 6>::zeros();
    for i in 0..3 {
        bm[(0, 2 * i)] = b[i] * inv;
        bm[(1, 2 * i + 1)] = c[i] * inv;
        bm[(2, 2 * i)] = c[i] * inv;
        bm[(2, 2 * i + 1)] = b[i] * inv;
    }
    Some((bm, two_a / 2.0))
}

/// Membrane stiffness of a constant-strain triangle: k = t·A·Bᵀ·D·B
pub fn cst_stiffness(coords: &[[f64; 2]; 3], t: f64, d: &Mat3) -> Option<SMatrix<f64, 6, 6>> {
    let (b, area) = cst_b_matrix(coords)?;
    Some(b.transpose() * d * b * (t * area.abs()))
}

/// Equivalent nodal forces of a uniform initial strain ε₀·[1, 1, 0] on a
/// constant-strain triangle: f = t·A·Bᵀ·D·ε₀
pub fn cst_initial_strain_forces(
    coords: &[[f64; 2]; 3],
    t: f64,
    d: &Mat3,
    strain: f64,
) -> Option<SVector<f64, 6>> {
    let (b, area) = cst_b_matrix(coords)?;
    let e0 = SVector::<f64, 3>::new(strain, strain, 0.0);
    Some(b.transpose() * d * e0 * (t * area.abs()))
}

/// Bilinear shape functions and their natural derivatives at (r, s)
fn quad_shape(r: f64, s: f64) -> ([f64; 4], [f64; 4], [f64; 4]) {
    let n = [
        (1.0 - r) * (1.0 - s) / 4.0,
        (1.0 + r) * (1.0 - s) / 4.0,
        (1.0 + r) * (1.0 + s) / 4.0,
        (1.0 - r) * (1.0 + s) / 4.0,
    ];
    let dn_dr = [
        -(1.0 - s) / 4.0,
        (1.0 - s) / 4.0,
        (1.0 + s) / 4.0,
        -(1.0 + s) / 4.0,
    ];
    let dn_ds = [
        -(1.0 - r) / 4.0,
        -(1.0 + r) / 4.0,
        (1.0 + r) / 4.0,
        (1.0 - r) / 4.0,
    ];
    (n, dn_dr, dn_ds)
}

/// Cartesian shape-function derivatives and Jacobian determinant at (r, s)
fn quad_derivs(coords: &[[f64; 2]; 4], r: f64, s: f64) -> Option<([f64; 4], [f64; 4], f64)> {
    let (_, dn_dr, dn_ds) = quad_shape(r, s);

    let mut j = Matrix2::<f64>::zeros();
    for i in 0..4 {
        j[(0, 0)] += dn_dr[i] * coords[i][0];
        j[(0, 1)] += dn_dr[i] * coords[i][1];
        j[(1, 0)] += dn_ds[i] * coords[i][0];
        j[(1, 1)] += dn_ds[i] * coords[i][1];
    }

    let det = j[(0, 0)] * j[(1, 1)] - j[(0, 1)] * j[(1, 0)];
    if det <= 1e-12 {
        return None;
    }
    let j_inv = j.try_inverse()?;

    let mut dn_dx = [0.0; 4];
    let mut dn_dy = [0.0; 4];
    for i in 0..4 {
        dn_dx[i] = j_inv[(0, 0)] * dn_dr[i] + j_inv[(0, 1)] * dn_ds[i];
        dn_dy[i] = j_inv[(1, 0)] * dn_dr[i] + j_inv[(1, 1)] * dn_ds[i];
    }
    Some((dn_dx, dn_dy, det))
}

/// Membrane stiffness of a bilinear quadrilateral, 2x2 Gauss
///
/// DOF order: u1, v1, ..., u4, v4. Corners must be counter-clockwise.
pub fn quad_membrane_stiffness(
    coords: &[[f64; 2]; 4],
    t: f64,
    d: &Mat3,
) -> Option<SMatrix<f64, 8, 8>> {
    let mut k = SMatrix::<f64, 8, 8>::zeros();

    for &(r, s) in &[(-GP, -GP), (GP, -GP), (GP, GP), (-GP, GP)] {
        let (dn_dx, dn_dy, det) = quad_derivs(coords, r, s)?;

        let mut b = SMatrix::<f64, 3, 8>::zeros();
        for i in 0..4 {
            b[(0, 2 * i)] = dn_dx[i];
            b[(1, 2 * i + 1)] = dn_dy[i];
            b[(2, 2 * i)] = dn_dy[i];
            b[(2, 2 * i + 1)] = dn_dx[i];
        }

        k += b.transpose() * d * b * (t * det);
    }
    Some(k)
}

/// Bending stiffness of a 3-node Mindlin plate
///
/// DOF order per node: w, φx, φy with shear strains γ = ∇w − φ. Constant
/// curvature from the linear rotation field; one-point shear.
pub fn tri_bending_stiffness(
    coords: &[[f64; 2]; 3],
    t: f64,
    e: f64,
    nu: f64,
) -> Option<SMatrix<f64, 9, 9>> {
    let (bm, area) = cst_b_matrix(coords)?;
    let area = area.abs();
    let db = bending_constitutive(e, nu, t);

    // Reuse the CST derivative layout: bm[(0, 2i)] = dNi/dx, bm[(1, 2i+1)] = dNi/dy
    let dn_dx = [bm[(0, 0)], bm[(0, 2)], bm[(0, 4)]];
    let dn_dy = [bm[(1, 1)], bm[(1, 3)], bm[(1, 5)]];

    let mut b_b = SMatrix::<f64, 3, 9>::zeros();
    for i in 0..3 {
        b_b[(0, 3 * i + 1)] = dn_dx[i];
        b_b[(1, 3 * i + 2)] = dn_dy[i];
        b_b[(2, 3 * i + 1)] = dn_dy[i];
        b_b[(2, 3 * i + 2)] = dn_dx[i];
    }

    let mut b_s = SMatrix::<f64, 2, 9>::zeros();
    for i in 0..3 {
        b_s[(0, 3 * i)] = dn_dx[i];
        b_s[(0, 3 * i + 1)] = -1.0 / 3.0;
        b_s[(1, 3 * i)] = dn_dy[i];
        b_s[(1, 3 * i + 2)] = -1.0 / 3.0;
    }

    let g = e / (2.0 * (1.0 + nu));
    let shear = SHEAR_CORRECTION * g * t * area;

    Some(b_b.transpose() * db * b_b * area + b_s.transpose() * b_s * shear)
}

/// Bending stiffness of a 4-node Mindlin plate, 2x2 bending + 1-point shear
///
/// DOF order per node: w, φx, φy.
pub fn quad_bending_stiffness(
    coords: &[[f64; 2]; 4],
    t: f64,
    e: f64,
    nu: f64,
) -> Option<SMatrix<f64, 12, 12>> {
    let db = bending_constitutive(e, nu, t);
    let mut k = SMatrix::<f64, 12, 12>::zeros();

    for &(r, s) in &[(-GP, -GP), (GP, -GP), (GP, GP), (-GP, GP)] {
        let (dn_dx, dn_dy, det) = quad_derivs(coords, r, s)?;

        let mut b_b = SMatrix::<f64, 3, 12>::zeros();
        for i in 0..4 {
            b_b[(0, 3 * i + 1)] = dn_dx[i];
            b_b[(1, 3 * i + 2)] = dn_dy[i];
            b_b[(2, 3 * i + 1)] = dn_dy[i];
            b_b[(2, 3 * i + 2)] = dn_dx[i];
        }

        k += b_b.transpose() * db * b_b * det;
    }

    // One-point shear keeps the thin limit usable
    let (n, _, _) = quad_shape(0.0, 0.0);
    let (dn_dx, dn_dy, det) = quad_derivs(coords, 0.0, 0.0)?;

    let mut b_s = SMatrix::<f64, 2, 12>::zeros();
    for i in 0..4 {
        b_s[(0, 3 * i)] = dn_dx[i];
        b_s[(0, 3 * i + 1)] = -n[i];
        b_s[(1, 3 * i)] = dn_dy[i];
        b_s[(1, 3 * i + 2)] = -n[i];
    }

    let g = e / (2.0 * (1.0 + nu));
    let shear = SHEAR_CORRECTION * g * t * det * 4.0;
    k += b_s.transpose() * b_s * shear;

    Some(k)
}

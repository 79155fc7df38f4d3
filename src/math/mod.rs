//! Mathematical kernels for the analysis pipeline

pub mod plate;

use nalgebra::{DMatrix, DVector, SMatrix, SVector};

use crate::loads::{SpanLine, SpanPoint};

pub type Mat = DMatrix<f64>;
pub type DVec = DVector<f64>;

/// 6x6 matrix for 2D beam stiffness
pub type Mat6 = SMatrix<f64, 6, 6>;
/// 6-element vector for beam end forces/displacements
pub type Vec6 = SVector<f64, 6>;

/// 3-point Gauss-Legendre rule on [-1, 1]; exact through degree 5, enough for
/// cubic Hermite shape functions against a linear load
const GAUSS3: [(f64, f64); 3] = [
    (-0.774_596_669_241_483_4, 0.555_555_555_555_555_6),
    (0.0, 0.888_888_888_888_888_9),
    (0.774_596_669_241_483_4, 0.555_555_555_555_555_6),
];

/// Local stiffness matrix for a 2D frame element
///
/// DOF order: u1, v1, r1, u2, v2, r2 (axial, transverse, rotation at each end).
pub fn beam_local_stiffness(e: f64, a: f64, i: f64, length: f64) -> Mat6 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = e * a / l;
    let ei_l = e * i / l;
    let ei_l2 = e * i / l2;
    let ei_l3 = e * i / l3;

    #[rustfmt::skip]
    let data = [
        // Row 0: axial at start
        ea_l,   0.0,           0.0,          -ea_l,  0.0,           0.0,
        // Row 1: shear at start
        0.0,    12.0*ei_l3,    6.0*ei_l2,    0.0,    -12.0*ei_l3,   6.0*ei_l2,
        // Row 2: moment at start
        0.0,    6.0*ei_l2,     4.0*ei_l,     0.0,    -6.0*ei_l2,    2.0*ei_l,
        // Row 3: axial at end
        -ea_l,  0.0,           0.0,          ea_l,   0.0,           0.0,
        // Row 4: shear at end
        0.0,    -12.0*ei_l3,   -6.0*ei_l2,   0.0,    12.0*ei_l3,    -6.0*ei_l2,
        // Row 5: moment at end
        0.0,    6.0*ei_l2,     2.0*ei_l,     0.0,    -6.0*ei_l2,    4.0*ei_l,
    ];

    Mat6::from_row_slice(&data)
}

/// Consistent Winkler foundation matrix for a beam on grade
///
/// `k` is the foundation modulus in N/m per metre of span; the cubic Hermite
/// interpolation gives the classical kL/420 coefficient pattern on the
/// transverse/rotational DOFs.
pub fn beam_foundation_stiffness(k: f64, length: f64) -> Mat6 {
    let l = length;
    let l2 = l * l;
    let c = k * l / 420.0;

    let mut m = Mat6::zeros();
    let idx = [1usize, 2, 4, 5]; // v1, r1, v2, r2
    #[rustfmt::skip]
    let block = [
        156.0,      22.0 * l,   54.0,       -13.0 * l,
        22.0 * l,   4.0 * l2,   13.0 * l,   -3.0 * l2,
        54.0,       13.0 * l,   156.0,      -22.0 * l,
        -13.0 * l,  -3.0 * l2,  -22.0 * l,  4.0 * l2,
    ];
    for (bi, &i) in idx.iter().enumerate() {
        for (bj, &j) in idx.iter().enumerate() {
            m[(i, j)] = c * block[bi * 4 + bj];
        }
    }
    m
}

/// Transformation matrix from global to beam-local coordinates
///
/// `angle` is the beam inclination; rotations are unchanged in 2D.
pub fn beam_transformation(angle: f64) -> Mat6 {
    let (s, c) = angle.sin_cos();

    #[rustfmt::skip]
    let data = [
        c,    s,    0.0,  0.0,  0.0,  0.0,
        -s,   c,    0.0,  0.0,  0.0,  0.0,
        0.0,  0.0,  1.0,  0.0,  0.0,  0.0,
        0.0,  0.0,  0.0,  c,    s,    0.0,
        0.0,  0.0,  0.0,  -s,   c,    0.0,
        0.0,  0.0,  0.0,  0.0,  0.0,  1.0,
    ];

    Mat6::from_row_slice(&data)
}

fn split_released(released: &[bool; 6]) -> (Vec<usize>, Vec<usize>) {
    let kept = released
        .iter()
        .enumerate()
        .filter_map(|(i, &r)| (!r).then_some(i))
        .collect();
    let freed = released
        .iter()
        .enumerate()
        .filter_map(|(i, &r)| r.then_some(i))
        .collect();
    (kept, freed)
}

/// Condense released end connections out of a local stiffness matrix
///
/// Each released DOF is an internal member-end DOF coupled to its node
/// through a connection spring of the given stiffness (0 = plain hinge).
/// With S = (k_rr + K_s)⁻¹ the condensed blocks are
///   k_uu − k_ur S k_ru,  k_ur S K_s,  K_s S k_ru,  K_s S k_rr.
/// A plain hinge reduces this to the familiar static condensation with
/// zeroed released rows/columns.
pub fn condense_connections(k: &Mat6, released: &[bool; 6], springs: &[f64; 6]) -> Mat6 {
    let (kept, freed) = split_released(released);
    if freed.is_empty() {
        return *k;
    }

    let n1 = kept.len();
    let n2 = freed.len();

    let mut k_uu = DMatrix::zeros(n1, n1);
    let mut k_ur = DMatrix::zeros(n1, n2);
    let mut k_rr = DMatrix::zeros(n2, n2);
    let mut ks = DMatrix::zeros(n2, n2);

    for (i, &ui) in kept.iter().enumerate() {
        for (j, &uj) in kept.iter().enumerate() {
            k_uu[(i, j)] = k[(ui, uj)];
        }
        for (j, &rj) in freed.iter().enumerate() {
            k_ur[(i, j)] = k[(ui, rj)];
        }
    }
    for (i, &ri) in freed.iter().enumerate() {
        for (j, &rj) in freed.iter().enumerate() {
            k_rr[(i, j)] = k[(ri, rj)];
        }
        ks[(i, i)] = springs[ri];
    }

    let s = match (&k_rr + &ks).try_inverse() {
        Some(inv) => inv,
        None => return *k,
    };

    let k_ru = k_ur.transpose();
    let uu = &k_uu - &k_ur * &s * &k_ru;
    let ur = &k_ur * &s * &ks;
    let rr = &ks * &s * &k_rr;

    let mut result = Mat6::zeros();
    for (i, &ui) in kept.iter().enumerate() {
        for (j, &uj) in kept.iter().enumerate() {
            result[(ui, uj)] = uu[(i, j)];
        }
        for (j, &rj) in freed.iter().enumerate() {
            result[(ui, rj)] = ur[(i, j)];
            result[(rj, ui)] = ur[(i, j)];
        }
    }
    for (i, &ri) in freed.iter().enumerate() {
        for (j, &rj) in freed.iter().enumerate() {
            result[(ri, rj)] = rr[(i, j)];
        }
    }

    result
}

/// Condense a fixed-end force vector consistently with [`condense_connections`]
pub fn condense_fixed_end_forces(
    fef: &Vec6,
    k: &Mat6,
    released: &[bool; 6],
    springs: &[f64; 6],
) -> Vec6 {
    let (kept, freed) = split_released(released);
    if freed.is_empty() {
        return *fef;
    }

    let n1 = kept.len();
    let n2 = freed.len();

    let mut k_ur = DMatrix::zeros(n1, n2);
    let mut k_rr = DMatrix::zeros(n2, n2);
    let mut ks = DMatrix::zeros(n2, n2);
    let mut fef_u = DVector::zeros(n1);
    let mut fef_r = DVector::zeros(n2);

    for (i, &ui) in kept.iter().enumerate() {
        for (j, &rj) in freed.iter().enumerate() {
            k_ur[(i, j)] = k[(ui, rj)];
        }
        fef_u[i] = fef[ui];
    }
    for (i, &ri) in freed.iter().enumerate() {
        for (j, &rj) in freed.iter().enumerate() {
            k_rr[(i, j)] = k[(ri, rj)];
        }
        ks[(i, i)] = springs[ri];
        fef_r[i] = fef[ri];
    }

    let s = match (&k_rr + &ks).try_inverse() {
        Some(inv) => inv,
        None => return *fef,
    };

    let cond_u = &fef_u - &k_ur * &s * &fef_r;
    let cond_r = &ks * &s * &fef_r;

    let mut result = Vec6::zeros();
    for (i, &ui) in kept.iter().enumerate() {
        result[ui] = cond_u[i];
    }
    for (i, &ri) in freed.iter().enumerate() {
        result[ri] = cond_r[i];
    }
    result
}

/// Hermite transverse shape functions and linear axial shape functions at x
fn shape_functions(x: f64, l: f64) -> [f64; 6] {
    let xi = x / l;
    let xi2 = xi * xi;
    let xi3 = xi2 * xi;
    [
        1.0 - xi,                       // axial at start
        1.0 - 3.0 * xi2 + 2.0 * xi3,    // transverse at start
        l * (xi - 2.0 * xi2 + xi3),     // rotation at start
        xi,                             // axial at end
        3.0 * xi2 - 2.0 * xi3,          // transverse at end
        l * (xi3 - xi2),                // rotation at end
    ]
}

/// Fixed-end forces for a (possibly partial, possibly trapezoidal) line load
///
/// Integrates the load against the beam shape functions over the loaded
/// range with Gauss quadrature; the full-span uniform case reproduces the
/// classical qL/2 and qL²/12 values. The returned vector holds the end
/// forces acting ON the element, so the equivalent nodal loads are its
/// negation.
pub fn fef_line_load(line: &SpanLine, length: f64) -> Vec6 {
    let a = line.start_t * length;
    let b = line.end_t * length;
    let half = (b - a) / 2.0;
    if half <= 0.0 {
        return Vec6::zeros();
    }
    let mid = (a + b) / 2.0;

    let mut eq = Vec6::zeros();
    for &(point, weight) in &GAUSS3 {
        let x = mid + half * point;
        let t = (x - a) / (b - a);
        let qx = line.qx1 + (line.qx2 - line.qx1) * t;
        let qy = line.qy1 + (line.qy2 - line.qy1) * t;
        let n = shape_functions(x, length);
        let w = weight * half;
        eq[0] += w * qx * n[0];
        eq[1] += w * qy * n[1];
        eq[2] += w * qy * n[2];
        eq[3] += w * qx * n[3];
        eq[4] += w * qy * n[4];
        eq[5] += w * qy * n[5];
    }

    -eq
}

/// Fixed-end forces for a concentrated load inside the span
///
/// Transverse component via the classical fixed-fixed closed forms
/// R1 = P b²(3a+b)/L³, M1 = P a b²/L², R2 = P a²(a+3b)/L³, M2 = −P a² b/L²;
/// axial and concentrated-moment components split (1−t)/t.
pub fn fef_point_load(point: &SpanPoint, length: f64) -> Vec6 {
    let l = length;
    let a = point.t * l;
    let b = l - a;
    let l2 = l * l;
    let l3 = l2 * l;

    let mut eq = Vec6::zeros();
    eq[0] = point.px * (1.0 - point.t);
    eq[3] = point.px * point.t;

    eq[1] = point.py * b * b * (3.0 * a + b) / l3;
    eq[2] = point.py * a * b * b / l2;
    eq[4] = point.py * a * a * (a + 3.0 * b) / l3;
    eq[5] = -point.py * a * a * b / l2;

    eq[2] += point.mz * (1.0 - point.t);
    eq[5] += point.mz * point.t;

    -eq
}

/// Fixed-end forces for restrained thermal expansion/curvature
///
/// `n0` = E·A·α·ΔT, `m0` = E·I·α·(T_top − T_bottom)/h.
pub fn fef_thermal(n0: f64, m0: f64) -> Vec6 {
    Vec6::from_column_slice(&[n0, 0.0, m0, -n0, 0.0, -m0])
}

/// Solve the reduced system by dense LU with partial pivoting
///
/// Rejects singular or numerically negligible pivots instead of returning a
/// polluted solution; the offending pivot index is reported when available.
pub fn solve_dense(k: &Mat, f: &DVec, pivot_tolerance: f64) -> Result<DVec, Option<usize>> {
    let lu = k.clone().lu();
    let u = lu.u();

    let mut max_pivot = 0.0_f64;
    for i in 0..u.nrows() {
        max_pivot = max_pivot.max(u[(i, i)].abs());
    }
    if max_pivot == 0.0 {
        return Err(Some(0));
    }
    for i in 0..u.nrows() {
        if u[(i, i)].abs() <= pivot_tolerance * max_pivot {
            return Err(Some(i));
        }
    }

    lu.solve(f).ok_or(None)
}

//! Material properties

use serde::{Deserialize, Serialize};

/// Material properties for structural analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Coefficient of thermal expansion in 1/K
    pub alpha: f64,
    /// Density in kg/m³
    pub rho: f64,
}

impl Material {
    /// Create a new material with given properties
    pub fn new(e: f64, nu: f64, alpha: f64, rho: f64) -> Self {
        Self { e, nu, alpha, rho }
    }

    /// Shear modulus, G = E / (2 (1 + nu))
    pub fn g(&self) -> f64 {
        self.e / (2.0 * (1.0 + self.nu))
    }

    /// Structural steel (S235/S355 family)
    pub fn steel() -> Self {
        Self {
            e: 210e9,
            nu: 0.3,
            alpha: 1.2e-5,
            rho: 7850.0,
        }
    }

    /// Normal-weight concrete from cylinder strength fck (Pa)
    pub fn concrete(fck: f64) -> Self {
        // Eurocode 2 secant modulus: Ecm = 22 (fcm/10)^0.3 GPa, fcm in MPa
        let fcm_mpa = fck / 1e6 + 8.0;
        let e = 22e9 * (fcm_mpa / 10.0).powf(0.3);
        Self {
            e,
            nu: 0.2,
            alpha: 1.0e-5,
            rho: 2400.0,
        }
    }

    /// Softwood timber (C24-like)
    pub fn timber() -> Self {
        Self {
            e: 11e9,
            nu: 0.3,
            alpha: 5.0e-6,
            rho: 420.0,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shear_modulus() {
        let mat = Material::steel();
        let expected_g = 210e9 / (2.0 * 1.3);
        assert!((mat.g() - expected_g).abs() < 1.0);
    }

    #[test]
    fn test_concrete_modulus_grows_with_strength() {
        let c20 = Material::concrete(20e6);
        let c40 = Material::concrete(40e6);
        assert!(c40.e > c20.e);
    }
}

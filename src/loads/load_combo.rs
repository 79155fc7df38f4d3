//! Load combinations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::CaseId;

/// Limit-state classification of a combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombinationKind {
    /// Ultimate limit state
    #[default]
    Uls,
    /// Serviceability, characteristic
    SlsCharacteristic,
    /// Serviceability, quasi-permanent
    SlsQuasiPermanent,
}

/// A factored combination of load cases
///
/// A case id absent from `factors` contributes factor 0; a factor of exactly
/// 0 skips the case entirely during staging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Combination {
    /// Name of the combination, e.g. "1.35G + 1.50Q"
    pub name: String,
    /// Limit-state tag
    pub kind: CombinationKind,
    /// Factor per load case id
    pub factors: BTreeMap<CaseId, f64>,
}

impl Combination {
    /// Create an empty combination
    pub fn new(name: &str, kind: CombinationKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            factors: BTreeMap::new(),
        }
    }

    /// Ultimate limit state combination
    pub fn uls(name: &str) -> Self {
        Self::new(name, CombinationKind::Uls)
    }

    /// Characteristic serviceability combination
    pub fn sls_characteristic(name: &str) -> Self {
        Self::new(name, CombinationKind::SlsCharacteristic)
    }

    /// Combination with a single case at factor 1.0
    pub fn single(name: &str, case: CaseId) -> Self {
        Self::uls(name).with_case(case, 1.0)
    }

    /// Eurocode fundamental ULS: 1.35 on the permanent case, 1.50 on the
    /// leading variable case
    pub fn uls_fundamental(name: &str, permanent: CaseId, variable: CaseId) -> Self {
        Self::uls(name).with_case(permanent, 1.35).with_case(variable, 1.5)
    }

    /// Characteristic SLS: unit factors on both cases
    pub fn sls_rare(name: &str, permanent: CaseId, variable: CaseId) -> Self {
        Self::sls_characteristic(name)
            .with_case(permanent, 1.0)
            .with_case(variable, 1.0)
    }

    /// Add a load case with a factor
    pub fn with_case(mut self, case: CaseId, factor: f64) -> Self {
        self.factors.insert(case, factor);
        self
    }

    /// Factor for a load case (0 when absent)
    pub fn factor(&self, case: CaseId) -> f64 {
        self.factors.get(&case).copied().unwrap_or(0.0)
    }

    /// Case ids that actually contribute (non-zero factor)
    pub fn active_cases(&self) -> impl Iterator<Item = (CaseId, f64)> + '_ {
        self.factors
            .iter()
            .filter(|(_, &f)| f != 0.0)
            .map(|(&id, &f)| (id, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_case_has_zero_factor() {
        let combo = Combination::single("test", CaseId(1));
        assert_eq!(combo.factor(CaseId(1)), 1.0);
        assert_eq!(combo.factor(CaseId(2)), 0.0);
    }

    #[test]
    fn test_zero_factor_case_is_not_active() {
        let combo = Combination::uls("test")
            .with_case(CaseId(1), 1.35)
            .with_case(CaseId(2), 0.0);
        let active: Vec<_> = combo.active_cases().collect();
        assert_eq!(active, vec![(CaseId(1), 1.35)]);
    }
}

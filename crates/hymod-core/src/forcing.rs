/// Forcing data for the hymod model.
///
/// The core never reads forcing itself: `ForcingConfig` is the opaque
/// handle a realization carries for the external forcing provider, and
/// `ForcingData` is a validated in-memory series for the convenience
/// series-run path and the benchmarks.
use crate::TimeStep;

/// Temporal resolution of forcing data. Ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Resolution {
    Hourly,
    Daily,
    Monthly,
    Annual,
}

/// Opaque forcing-provider configuration owned by a realization.
///
/// The realization stores and clones this handle but never interprets it;
/// the external provider decides what `source` means.
#[derive(Debug, Clone)]
pub struct ForcingConfig {
    pub source: String,
    pub resolution: Resolution,
    pub start: TimeStep,
    pub end: TimeStep,
}

impl ForcingConfig {
    pub fn new(
        source: impl Into<String>,
        resolution: Resolution,
        start: TimeStep,
        end: TimeStep,
    ) -> Result<Self, String> {
        if end < start {
            return Err(format!("forcing window ends ({end}) before it starts ({start})"));
        }
        Ok(Self {
            source: source.into(),
            resolution,
            start,
            end,
        })
    }
}

/// One forcing series must be non-empty and fully finite.
fn check_series(name: &str, values: &[f64]) -> Result<(), String> {
    if values.is_empty() {
        return Err(format!("{name} series is empty"));
    }
    if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
        return Err(format!("{name}[{idx}] = {} is not finite", values[idx]));
    }
    Ok(())
}

/// Validated forcing series: precipitation depths and potential ET
/// demands, step-aligned.
#[derive(Debug, Clone)]
pub struct ForcingData {
    pub precip: Vec<f64>,
    pub pet: Vec<f64>,
    pub resolution: Resolution,
}

impl ForcingData {
    pub fn new(precip: Vec<f64>, pet: Vec<f64>, resolution: Resolution) -> Result<Self, String> {
        check_series("precip", &precip)?;
        check_series("pet", &pet)?;
        if precip.len() != pet.len() {
            return Err(format!(
                "precip length {} does not match pet length {}",
                precip.len(),
                pet.len()
            ));
        }
        Ok(Self {
            precip,
            pet,
            resolution,
        })
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.precip.len()
    }

    /// Returns `true` if there are no timesteps.
    pub fn is_empty(&self) -> bool {
        self.precip.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_ordering() {
        assert!(Resolution::Hourly < Resolution::Daily);
        assert!(Resolution::Daily < Resolution::Monthly);
        assert!(Resolution::Monthly < Resolution::Annual);
    }

    #[test]
    fn config_validates_window() {
        assert!(ForcingConfig::new("gauge.csv", Resolution::Hourly, 0, 100).is_ok());
        assert!(ForcingConfig::new("gauge.csv", Resolution::Hourly, 100, 0).is_err());
    }

    #[test]
    fn valid_forcing_data() {
        let fd = ForcingData::new(
            vec![8.0, 7.0, 6.0],
            vec![2.0, 2.5, 3.0],
            Resolution::Daily,
        );
        assert!(fd.is_ok());
        assert_eq!(fd.unwrap().len(), 3);
    }

    #[test]
    fn rejects_length_mismatch() {
        let fd = ForcingData::new(vec![8.0, 7.0], vec![2.0], Resolution::Daily);
        assert!(fd.is_err());
        assert!(fd.unwrap_err().contains("does not match"));
    }

    #[test]
    fn rejects_empty_arrays() {
        let fd = ForcingData::new(vec![], vec![], Resolution::Daily);
        assert!(fd.unwrap_err().contains("empty"));
    }

    #[test]
    fn rejects_non_finite_values() {
        let fd = ForcingData::new(
            vec![1.0, f64::NAN],
            vec![0.5, 0.5],
            Resolution::Daily,
        );
        assert!(fd.unwrap_err().contains("precip[1]"));
        let fd = ForcingData::new(
            vec![1.0, 2.0],
            vec![0.5, f64::INFINITY],
            Resolution::Daily,
        );
        assert!(fd.unwrap_err().contains("pet[1]"));
    }
}

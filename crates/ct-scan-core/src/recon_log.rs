// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Append-only log of sparse (angle, coarse attenuation) samples.

/// One logged sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconstructionSample {
    /// Unrounded scan angle at the time of the append.
    pub angle_deg: f64,
    /// Coarse 10-position average attenuation.
    pub avg_attenuation: f64,
}

/// Ordered samples for the current scan. No dedupe, no cap.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconstructionLog {
    samples: Vec<ReconstructionSample>,
}

impl ReconstructionLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample and returns it.
    pub fn append(&mut self, angle_deg: f64, avg_attenuation: f64) -> ReconstructionSample {
        let sample = ReconstructionSample {
            angle_deg,
            avg_attenuation,
        };
        self.samples.push(sample);
        sample
    }

    /// Drops every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples in append order.
    pub fn samples(&self) -> &[ReconstructionSample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` when empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_order_and_duplicates() {
        let mut log = ReconstructionLog::new();
        log.append(10.0, 0.2);
        log.append(10.0, 0.2);
        log.append(20.0, 0.1);
        let angles: Vec<f64> = log.samples().iter().map(|s| s.angle_deg).collect();
        assert_eq!(angles, vec![10.0, 10.0, 20.0]);
        log.clear();
        assert!(log.is_empty());
    }
}

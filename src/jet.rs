use std::f64::consts::{PI, TAU};

use particle_id::ParticleID;
use serde::{Deserialize, Serialize};

/// A particle clustered into a generator-level jet
#[derive(Copy, Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct Constituent {
    pub id: ParticleID,
    pub energy: f64,
    pub eta: f64,
}

impl Constituent {
    pub fn new(id: ParticleID, energy: f64, eta: f64) -> Self {
        Self { id, energy, eta }
    }
}

/// A reconstructed or generator-level jet
///
/// Jets are immutable once an event has been read. Within an event a
/// jet is identified by its position in the jet list, never by value.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct Jet {
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
    /// Stored energy, if the event record provides one
    #[serde(rename = "energy", default, skip_serializing_if = "Option::is_none")]
    pub stored_energy: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constituents: Vec<Constituent>,
}

impl Jet {
    pub fn new(pt: f64, eta: f64, phi: f64) -> Self {
        Self {
            pt,
            eta,
            phi,
            stored_energy: None,
            constituents: Vec::new(),
        }
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.stored_energy = Some(energy);
        self
    }

    pub fn with_constituents(mut self, constituents: Vec<Constituent>) -> Self {
        self.constituents = constituents;
        self
    }

    /// The stored energy, or pt cosh(η) for a massless jet
    pub fn energy(&self) -> f64 {
        self.stored_energy.unwrap_or_else(|| energy(self.pt, self.eta))
    }

    /// Angular distance ΔR = sqrt(Δη² + Δφ²) to another jet
    pub fn delta_r(&self, other: &Jet) -> f64 {
        delta_r((self.eta, self.phi), (other.eta, other.phi))
    }
}

pub fn energy(pt: f64, eta: f64) -> f64 {
    pt * eta.cosh()
}

pub fn delta_r(a: (f64, f64), b: (f64, f64)) -> f64 {
    let deta = a.0 - b.0;
    let dphi = delta_phi(a.1, b.1);
    (deta * deta + dphi * dphi).sqrt()
}

/// Azimuthal difference φ₁ - φ₂ mapped into (-π, π]
pub fn delta_phi(phi1: f64, phi2: f64) -> f64 {
    let dphi = (phi1 - phi2) % TAU;
    if dphi > PI {
        dphi - TAU
    } else if dphi <= -PI {
        dphi + TAU
    } else {
        dphi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn delta_phi_wraps() {
        assert!((delta_phi(0.1, -0.1) - 0.2).abs() < EPS);
        assert!((delta_phi(PI - 0.1, -PI + 0.1) + 0.2).abs() < EPS);
        assert!((delta_phi(-PI + 0.1, PI - 0.1) - 0.2).abs() < EPS);
        assert!((delta_phi(3. * TAU + 0.5, 0.) - 0.5).abs() < EPS);
        assert_eq!(delta_phi(PI, 0.), PI);
        assert_eq!(delta_phi(0., PI), PI);
    }

    #[test]
    fn delta_r_is_symmetric() {
        let a = Jet::new(10., 1.2, 3.0);
        let b = Jet::new(20., -0.4, -3.0);
        assert_eq!(a.delta_r(&b), b.delta_r(&a));
        assert_eq!(a.delta_r(&a), 0.);
        let expected = (1.6f64.powi(2) + (TAU - 6.0).powi(2)).sqrt();
        assert!((a.delta_r(&b) - expected).abs() < EPS);
    }

    #[test]
    fn derived_energy() {
        let jet = Jet::new(10., 0., 0.);
        assert_eq!(jet.energy(), 10.);
        let jet = Jet::new(10., 1., 0.);
        assert!((jet.energy() - 10. * 1f64.cosh()).abs() < EPS);
        let jet = jet.with_energy(42.);
        assert_eq!(jet.energy(), 42.);
    }

    #[test]
    fn jet_record() {
        let jet: Jet = serde_json::from_str(
            r#"{"pt": 5.0, "eta": 0.5, "phi": 1.0, "constituents": [{"id": 11, "energy": 3.0, "eta": 0.4}]}"#,
        )
        .unwrap();
        assert_eq!(jet.stored_energy, None);
        assert_eq!(jet.constituents.len(), 1);
        assert_eq!(jet.constituents[0].id, ParticleID::new(11));
        assert_eq!(jet.constituents[0].energy, 3.0);
    }
}

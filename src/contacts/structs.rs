//! Shared contact types.
use core::fmt;
use serde::Serialize;
use std::str::FromStr;

/// Interaction types reported by Arpeggio.
///
/// Labels that do not map onto the known vocabulary are kept verbatim in
/// [`InteractionType::Unrecognized`].
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub enum InteractionType {
    /// Hydrogen bond (`hbond`)
    HydrogenBond,
    /// C-H...O hydrogen bond (`weak_hbond`)
    WeakHydrogenBond,
    /// Van der Waals contact (`vdw`)
    VanDerWaals,
    /// Van der Waals clash (`vdw_clash`)
    VanDerWaalsClash,
    /// Steric clash (`clash`)
    StericClash,
    /// Ionic interaction
    Ionic,
    /// Aromatic ring interaction
    Aromatic,
    /// Hydrophobic contact
    Hydrophobic,
    /// Carbonyl interaction
    Carbonyl,
    /// Halogen bond (`xbond`)
    HalogenBond,
    /// Metal coordination (`metal_complex`)
    MetalCoordination,
    /// Covalent bond
    Covalent,
    /// Atoms within range without a more specific classification
    Proximal,
    /// Any other label, kept as found in the input
    Unrecognized(String),
}

impl InteractionType {
    /// Every known interaction type, in vocabulary order.
    pub const KNOWN: [InteractionType; 13] = [
        InteractionType::HydrogenBond,
        InteractionType::WeakHydrogenBond,
        InteractionType::VanDerWaals,
        InteractionType::VanDerWaalsClash,
        InteractionType::StericClash,
        InteractionType::Ionic,
        InteractionType::Aromatic,
        InteractionType::Hydrophobic,
        InteractionType::Carbonyl,
        InteractionType::HalogenBond,
        InteractionType::MetalCoordination,
        InteractionType::Covalent,
        InteractionType::Proximal,
    ];

    /// Label used when a contact carries no `type` field.
    pub const MISSING_LABEL: &'static str = "unknown";

    /// Parse a label, falling back to [`InteractionType::Unrecognized`].
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "hbond" | "h_bond" | "hydrogen_bond" | "hydrogenbond" => Self::HydrogenBond,
            "weak_hbond" | "weak_hydrogen_bond" | "weakhydrogenbond" => Self::WeakHydrogenBond,
            "vdw" | "van_der_waals" | "vanderwaals" => Self::VanDerWaals,
            "vdw_clash" | "van_der_waals_clash" | "vanderwaalsclash" => Self::VanDerWaalsClash,
            "clash" | "steric_clash" | "stericclash" => Self::StericClash,
            "ionic" => Self::Ionic,
            "aromatic" => Self::Aromatic,
            "hydrophobic" => Self::Hydrophobic,
            "carbonyl" => Self::Carbonyl,
            "xbond" | "halogen_bond" | "halogenbond" => Self::HalogenBond,
            "metal_complex" | "metal" | "metal_coordination" => Self::MetalCoordination,
            "covalent" => Self::Covalent,
            "proximal" => Self::Proximal,
            _ => Self::Unrecognized(label.trim().to_string()),
        }
    }

    /// Whether this contact indicates overlapping atoms.
    pub fn is_clash(&self) -> bool {
        matches!(self, Self::StericClash | Self::VanDerWaalsClash)
    }
}

impl FromStr for InteractionType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::HydrogenBond => "hbond",
            Self::WeakHydrogenBond => "weak_hbond",
            Self::VanDerWaals => "vdw",
            Self::VanDerWaalsClash => "vdw_clash",
            Self::StericClash => "clash",
            Self::Ionic => "ionic",
            Self::Aromatic => "aromatic",
            Self::Hydrophobic => "hydrophobic",
            Self::Carbonyl => "carbonyl",
            Self::HalogenBond => "xbond",
            Self::MetalCoordination => "metal_complex",
            Self::Covalent => "covalent",
            Self::Proximal => "proximal",
            Self::Unrecognized(label) => label,
        };
        f.write_str(label)
    }
}

impl Serialize for InteractionType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fully specified identity of one atom, as written in Arpeggio atom paths.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Serialize)]
pub struct AtomPath {
    /// Chain identifier
    pub chain: String,
    /// Residue number, kept verbatim so insertion codes survive
    pub resi: String,
    /// Residue name
    pub resn: String,
    /// Atom name
    pub atomn: String,
}

/// The struct for a residue identifier
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Serialize)]
pub struct ResidueId {
    /// Chain identifier
    pub chain: String,
    /// Residue name
    pub resn: String,
    /// Residue number
    pub resi: String,
}

impl AtomPath {
    /// Create an atom path from its four components.
    pub fn new(
        chain: impl Into<String>,
        resi: impl Into<String>,
        resn: impl Into<String>,
        atomn: impl Into<String>,
    ) -> Self {
        Self {
            chain: chain.into(),
            resi: resi.into(),
            resn: resn.into(),
            atomn: atomn.into(),
        }
    }

    /// The residue this atom belongs to.
    pub fn residue(&self) -> ResidueId {
        ResidueId {
            chain: self.chain.clone(),
            resn: self.resn.clone(),
            resi: self.resi.clone(),
        }
    }
}

impl fmt::Display for AtomPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/{chain}/{resi}/{resn}/{atomn}/",
            chain = self.chain,
            resi = self.resi,
            resn = self.resn,
            atomn = self.atomn
        )
    }
}

impl fmt::Display for ResidueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.chain, self.resn, self.resi)
    }
}

/// One atom-atom contact as reported by Arpeggio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactRecord {
    /// Atom owning the contact entry
    pub subject: AtomPath,
    /// The `bgn_atom` of the contact
    pub partner: AtomPath,
    /// Interaction type
    pub interaction: InteractionType,
    /// Distance in Ångströms; `0.0` when unspecified
    pub distance: f64,
}

impl ContactRecord {
    /// Create a contact record.
    pub fn new(
        subject: AtomPath,
        partner: AtomPath,
        interaction: InteractionType,
        distance: f64,
    ) -> Self {
        Self {
            subject,
            partner,
            interaction,
            distance,
        }
    }

    /// Whether the input carried a usable distance.
    pub fn has_distance(&self) -> bool {
        self.distance > 0.0
    }

    /// The same contact seen from the partner atom.
    pub fn reversed(&self) -> Self {
        Self {
            subject: self.partner.clone(),
            partner: self.subject.clone(),
            interaction: self.interaction.clone(),
            distance: self.distance,
        }
    }
}

impl fmt::Display for ContactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{subject}] has {intxn} with [{partner}] at {dist:.2} Å",
            subject = self.subject,
            intxn = self.interaction,
            partner = self.partner,
            dist = self.distance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_labels() {
        assert_eq!(
            InteractionType::from_label("hbond"),
            InteractionType::HydrogenBond
        );
        assert_eq!(
            InteractionType::from_label("Steric-Clash"),
            InteractionType::StericClash
        );
        assert_eq!(
            InteractionType::from_label("HydrogenBond"),
            InteractionType::HydrogenBond
        );
        assert_eq!(
            InteractionType::from_label("metal_complex").to_string(),
            "metal_complex"
        );

        let polar = InteractionType::from_label("polar");
        assert_eq!(polar, InteractionType::Unrecognized("polar".to_string()));
        assert_eq!(polar.to_string(), "polar");
    }

    #[test]
    fn test_known_labels_round_trip_through_display() {
        for t in InteractionType::KNOWN.iter() {
            assert_eq!(
                &InteractionType::from_label(&t.to_string()),
                t,
                "Display label of {t:?} does not parse back"
            );
        }
    }

    #[test]
    fn test_residue_display() {
        let atom = AtomPath::new("A", "10", "LEU", "CA");
        assert_eq!(atom.residue().to_string(), "A:LEU10");
        assert_eq!(atom.to_string(), "/A/10/LEU/CA/");
    }
}

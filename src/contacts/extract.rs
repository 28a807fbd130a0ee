//! Decoding of the atom-keyed contact JSON into flat records.
use super::{AtomPath, ContactRecord, InteractionType};
use crate::error::{Error, Result};
use rayon::prelude::*;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, trace};

/// The `contact` field of an atom entry holds either one descriptor or many.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContactField {
    Many(Vec<Value>),
    Single(Value),
}

impl ContactField {
    fn into_descriptors(self) -> Vec<Value> {
        match self {
            ContactField::Many(v) => v,
            ContactField::Single(v) => vec![v],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContactDescriptor {
    #[serde(default)]
    bgn_atom: String,
    #[serde(rename = "type", default)]
    interaction: Option<String>,
    #[serde(default)]
    distance: Option<Distance>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Distance {
    Number(f64),
    Text(String),
    Other(Value),
}

impl Distance {
    /// Unusable distances collapse to `0.0`, i.e. unspecified.
    fn value(&self) -> f64 {
        let d = match self {
            Distance::Number(d) => *d,
            Distance::Text(s) => s.trim().parse().unwrap_or(0.0),
            Distance::Other(_) => 0.0,
        };
        if d.is_finite() && d > 0.0 {
            d
        } else {
            0.0
        }
    }
}

/// Options for decoding a contact file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Fail on the first malformed record instead of skipping it
    pub strict: bool,
}

/// Flat contact records decoded from one file.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Contacts in input order
    pub records: Vec<ContactRecord>,
    /// Number of malformed keys or descriptors that were dropped
    pub skipped: usize,
}

struct EntryContacts {
    records: Vec<ContactRecord>,
    skipped: usize,
}

/// Read and decode an Arpeggio contact file.
pub fn load_contacts(path: &Path, options: &ExtractOptions) -> Result<Extraction> {
    let data = read_contact_file(path)?;
    let extraction = extract_contacts(&data, options)?;
    debug!(
        "Extracted {} contacts from {} ({} malformed skipped)",
        extraction.records.len(),
        path.display(),
        extraction.skipped
    );
    Ok(extraction)
}

/// Read a file into a JSON value without interpreting it.
pub fn read_contact_file(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Flatten an atom-keyed contact structure into [`ContactRecord`]s.
///
/// Entries are decoded independently on the current rayon pool; the output
/// keeps the order of the keys in the input and of the descriptors under each key.
pub fn extract_contacts(data: &Value, options: &ExtractOptions) -> Result<Extraction> {
    let atoms = as_atom_map(data)?;
    let entries: Vec<(&String, &Value)> = atoms.iter().collect();

    let per_entry = entries
        .par_iter()
        .map(|(key, value)| extract_entry(key, value, options.strict))
        .collect::<Result<Vec<EntryContacts>>>()?;

    let mut extraction = Extraction::default();
    for entry in per_entry {
        extraction.records.extend(entry.records);
        extraction.skipped += entry.skipped;
    }
    Ok(extraction)
}

fn as_atom_map(data: &Value) -> Result<&Map<String, Value>> {
    let found = match data {
        Value::Object(map) => return Ok(map),
        Value::Array(_) => "an array",
        Value::String(_) => "a string",
        Value::Number(_) => "a number",
        Value::Bool(_) => "a boolean",
        Value::Null => "null",
    };
    Err(Error::NotAnAtomMap { found })
}

fn extract_entry(key: &str, value: &Value, strict: bool) -> Result<EntryContacts> {
    let mut entry = EntryContacts {
        records: Vec::new(),
        skipped: 0,
    };

    // Entries without contacts carry other per-atom annotations
    let Some(contact) = value.as_object().and_then(|obj| obj.get("contact")) else {
        return Ok(entry);
    };
    let field = match Option::<ContactField>::deserialize(contact) {
        Ok(Some(field)) => field,
        Ok(None) => return Ok(entry),
        Err(e) => return skip_or_fail(entry, key, e, strict),
    };

    let subject: AtomPath = match key.parse() {
        Ok(atom) => atom,
        Err(e) => {
            let n = field.into_descriptors().len();
            if strict {
                return Err(Error::malformed(key, e));
            }
            trace!("Skipping {n} contact(s) under malformed key: {e}");
            entry.skipped += n;
            return Ok(entry);
        }
    };

    for descriptor in field.into_descriptors() {
        let descriptor = match ContactDescriptor::deserialize(&descriptor) {
            Ok(d) => d,
            Err(e) => {
                entry = skip_or_fail(entry, key, e, strict)?;
                continue;
            }
        };
        let partner: AtomPath = match descriptor.bgn_atom.parse() {
            Ok(atom) => atom,
            Err(e) => {
                entry = skip_or_fail(entry, key, e, strict)?;
                continue;
            }
        };
        let interaction = InteractionType::from_label(
            descriptor
                .interaction
                .as_deref()
                .unwrap_or(InteractionType::MISSING_LABEL),
        );
        let distance = descriptor.distance.as_ref().map_or(0.0, Distance::value);
        entry.records.push(ContactRecord::new(
            subject.clone(),
            partner,
            interaction,
            distance,
        ));
    }
    Ok(entry)
}

fn skip_or_fail(
    mut entry: EntryContacts,
    key: &str,
    reason: impl ToString,
    strict: bool,
) -> Result<EntryContacts> {
    let reason = reason.to_string();
    if strict {
        return Err(Error::malformed(key, reason));
    }
    trace!("Skipping malformed contact under {key}: {reason}");
    entry.skipped += 1;
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(data: Value) -> Extraction {
        extract_contacts(&data, &ExtractOptions::default()).unwrap()
    }

    #[test]
    fn test_single_descriptor() {
        let res = extract(json!({
            "/A/10/LEU/CA/": {
                "contact": {"bgn_atom": "/B/5/NUX/C1/", "type": "hbond", "distance": 2.9}
            }
        }));
        assert_eq!(res.records.len(), 1);
        assert_eq!(res.skipped, 0);

        let record = &res.records[0];
        assert_eq!(record.subject, AtomPath::new("A", "10", "LEU", "CA"));
        assert_eq!(record.partner, AtomPath::new("B", "5", "NUX", "C1"));
        assert_eq!(record.interaction, InteractionType::HydrogenBond);
        assert_eq!(record.distance, 2.9);
    }

    #[test]
    fn test_order_is_preserved() {
        let res = extract(json!({
            "/B/2/GLY/N/": {"contact": [
                {"bgn_atom": "/A/1/ALA/O/", "type": "hbond", "distance": 3.0},
                {"bgn_atom": "/A/1/ALA/CB/", "type": "vdw", "distance": 3.8}
            ]},
            "/A/1/ALA/O/": {"contact": [
                {"bgn_atom": "/B/2/GLY/N/", "type": "hbond", "distance": 3.0}
            ]}
        }));
        let types: Vec<String> = res
            .records
            .iter()
            .map(|r| format!("{}-{}", r.subject.chain, r.interaction))
            .collect();
        assert_eq!(types, ["B-hbond", "B-vdw", "A-hbond"]);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let res = extract(json!({
            "/A/10/LEU/": {"contact": [{"bgn_atom": "/B/5/NUX/C1/", "type": "hbond"}]},
            "/A/11/SER/OG/": {"contact": [
                {"bgn_atom": "/B/5/NUX/", "type": "hbond"},
                "not a contact",
                {"bgn_atom": "/B/5/NUX/O2/", "type": "hbond", "distance": 3.1}
            ]},
            "/A/12/GLY/N/": {"sasa": 12.0},
            "/A/13/GLY/N/": 42
        }));
        assert_eq!(res.records.len(), 1);
        assert_eq!(res.records[0].partner.atomn, "O2");
        assert_eq!(res.skipped, 3);
        assert!(
            res.records
                .iter()
                .all(|r| r.subject.resn != "LEU" && r.partner.atomn != ""),
            "Malformed paths leaked into the output"
        );
    }

    #[test]
    fn test_strict_mode_rejects_malformed() {
        let data = json!({
            "/A/11/SER/OG/": {"contact": [{"bgn_atom": "/B/5/", "type": "hbond"}]}
        });
        let err = extract_contacts(&data, &ExtractOptions { strict: true }).unwrap_err();
        assert!(
            matches!(err, Error::MalformedRecord { ref key, .. } if key == "/A/11/SER/OG/"),
            "Unexpected error {err}"
        );
    }

    #[test]
    fn test_missing_fields_and_odd_distances() {
        let res = extract(json!({
            "/A/1/ALA/CB/": {"contact": [
                {"bgn_atom": "/B/1/ALA/CB/"},
                {"bgn_atom": "/B/1/ALA/CA/", "type": "vdw", "distance": "3.75"},
                {"bgn_atom": "/B/1/ALA/N/", "type": "vdw", "distance": null},
                {"bgn_atom": "/B/1/ALA/C/", "type": "vdw", "distance": -1.0}
            ]},
            "/A/2/ALA/CB/": {"contact": null}
        }));
        assert_eq!(res.records.len(), 4);
        assert_eq!(
            res.records[0].interaction,
            InteractionType::Unrecognized("unknown".to_string())
        );
        assert_eq!(res.records[0].distance, 0.0);
        assert_eq!(res.records[1].distance, 3.75);
        assert!(!res.records[2].has_distance());
        assert!(!res.records[3].has_distance());
    }

    #[test]
    fn test_top_level_must_be_an_object() {
        let err = extract_contacts(&json!([1, 2]), &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NotAnAtomMap { found: "an array" }));
    }

    #[test]
    fn test_missing_file() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = Path::new(root).join("test-data/does-not-exist.json");
        let err = load_contacts(&path, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InputNotFound { .. }));
    }

    #[test]
    fn test_load_fixture() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = Path::new(root).join("test-data/predicted.json");
        let res = load_contacts(&path, &ExtractOptions::default()).unwrap();
        assert_eq!(res.records.len(), 9);
        assert_eq!(res.skipped, 1);
    }
}

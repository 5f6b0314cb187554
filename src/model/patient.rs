//! Patient entity.

use std::collections::BTreeMap;

use crate::timestamp::Timestamp;

use super::study::Study;

/// One patient within a decode session.
///
/// Identity is the vendor-assigned integer id; all other attributes are
/// filled in by whichever container files reference the patient. Setters are
/// idempotent — re-applying the same file's data is safe.
#[derive(Debug)]
pub struct Patient {
    id: u32,
    forename: String,
    surname: String,
    title: String,
    external_id: String,
    birthdate: Timestamp,
    studies: BTreeMap<u32, Study>,
}

impl Patient {
    pub(crate) fn new(id: u32) -> Self {
        Patient {
            id,
            forename: String::new(),
            surname: String::new(),
            title: String::new(),
            external_id: String::new(),
            birthdate: Timestamp::undecoded(),
            studies: BTreeMap::new(),
        }
    }

    /// Vendor-assigned patient id (the identity key).
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn forename(&self) -> &str {
        &self.forename
    }

    pub fn set_forename(&mut self, forename: impl Into<String>) {
        self.forename = forename.into();
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn set_surname(&mut self, surname: impl Into<String>) {
        self.surname = surname.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// External (hospital-side) patient identifier string.
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn set_external_id(&mut self, external_id: impl Into<String>) {
        self.external_id = external_id.into();
    }

    /// Date of birth; may be undecoded.
    pub fn birthdate(&self) -> &Timestamp {
        &self.birthdate
    }

    pub fn set_birthdate(&mut self, birthdate: Timestamp) {
        self.birthdate = birthdate;
    }

    /// Get or create the study with the given id within this patient.
    pub fn study_mut(&mut self, id: u32) -> &mut Study {
        self.studies.entry(id).or_insert_with(|| Study::new(id))
    }

    /// Look up a study without creating it.
    pub fn study(&self, id: u32) -> Option<&Study> {
        self.studies.get(&id)
    }

    /// Iterate studies in id order.
    pub fn studies(&self) -> impl Iterator<Item = &Study> {
        self.studies.values()
    }

    pub fn study_count(&self) -> usize {
        self.studies.len()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient_has_default_attributes() {
        let patient = Patient::new(42);
        assert_eq!(patient.id(), 42);
        assert_eq!(patient.forename(), "");
        assert_eq!(patient.external_id(), "");
        assert!(!patient.birthdate().is_decoded());
        assert_eq!(patient.study_count(), 0);
    }

    #[test]
    fn test_setters_are_idempotent() {
        let mut patient = Patient::new(1);
        patient.set_external_id("PAT-0099");
        patient.set_external_id("PAT-0099");
        assert_eq!(patient.external_id(), "PAT-0099");
    }

    #[test]
    fn test_study_get_or_create() {
        let mut patient = Patient::new(1);
        patient.study_mut(5).set_study_date(Timestamp::from_unix(0, 0));
        patient.study_mut(5);

        assert_eq!(patient.study_count(), 1);
        assert!(patient.study(5).unwrap().study_date().is_decoded());
    }
}

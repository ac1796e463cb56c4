//! SSRF XML importer
//!
//! Reads an `SSRF` root element and the top-level entities beneath it.
//! Field errors are collected (or abort the import in strict mode); unknown
//! elements are skipped with a warning.

use tracing::{info, warn};

use super::fields::FieldReader;
use super::{ImportError, ImportResult};
use crate::config::SsrfConfig;
use crate::format::FormatRegistry;
use crate::models::assignment::codes as assignment_codes;
use crate::models::contact::codes as contact_codes;
use crate::models::{
    Assignment, Common, Contact, Document, EntityKind, Location, Note, Organisation, Receiver,
    Role, Transmitter, common, location, note,
};
use crate::reference::Serial;
use crate::xml::{XmlNode, tags};

/// SSRF Importer
///
/// Imports SSRF XML content into a [`Document`]. References come back
/// unresolved; run the resolution pass (or use
/// [`DocumentLoader`](crate::model::DocumentLoader)) to link them.
#[derive(Debug, Clone)]
pub struct SsrfImporter<'r> {
    config: SsrfConfig,
    registry: &'r FormatRegistry,
}

impl Default for SsrfImporter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl SsrfImporter<'static> {
    /// Create an importer with the default config and the standard registry
    pub fn new() -> Self {
        Self::with_config(SsrfConfig::default())
    }

    pub fn with_config(config: SsrfConfig) -> Self {
        Self {
            config,
            registry: FormatRegistry::global(),
        }
    }
}

impl<'r> SsrfImporter<'r> {
    /// Use a custom format registry
    pub fn with_registry<'s>(self, registry: &'s FormatRegistry) -> SsrfImporter<'s> {
        SsrfImporter {
            config: self.config,
            registry,
        }
    }

    pub fn config(&self) -> &SsrfConfig {
        &self.config
    }

    /// Import SSRF XML content.
    ///
    /// Fails on malformed XML, a wrong root element, or (in strict mode) the
    /// first field error.
    pub fn import(&self, xml_content: &str) -> Result<ImportResult, ImportError> {
        let root = XmlNode::parse(xml_content).map_err(|e| ImportError::ParseError(e.to_string()))?;
        if root.name != tags::ROOT {
            return Err(ImportError::ValidationError(format!(
                "Invalid SSRF: expected root element '{}', found '{}'",
                tags::ROOT,
                root.name
            )));
        }

        let mut reader = FieldReader::new(self.registry, &self.config);
        self.check_namespace(&root, &mut reader)?;

        let mut document = Document::new();
        reader.enter(tags::ROOT);
        document.classification = reader.marking(&root, tags::ROOT)?;

        for child in &root.children {
            let Some(kind) = EntityKind::from_element_name(&child.name) else {
                warn!("Skipping unknown element <{}>", child.name);
                continue;
            };
            match kind {
                EntityKind::Note => {
                    document.add(self.read_note(&mut reader, child)?);
                }
                EntityKind::Contact => {
                    document.add(self.read_contact(&mut reader, child)?);
                }
                EntityKind::Organisation => {
                    document.add(self.read_organisation(&mut reader, child)?);
                }
                EntityKind::Role => {
                    document.add(self.read_role(&mut reader, child)?);
                }
                EntityKind::Location => {
                    document.add(self.read_location(&mut reader, child)?);
                }
                EntityKind::Assignment => {
                    document.add(self.read_assignment(&mut reader, child)?);
                }
            }
        }

        info!(
            "Imported {} entities with {} errors",
            document.len(),
            reader.errors.len()
        );
        Ok(ImportResult {
            document,
            errors: reader.errors,
        })
    }

    fn check_namespace(
        &self,
        root: &XmlNode,
        reader: &mut FieldReader<'_>,
    ) -> Result<(), ImportError> {
        let declared: Vec<&str> = root
            .attributes
            .iter()
            .filter(|(key, _)| key == "xmlns" || key.starts_with("xmlns:"))
            .map(|(_, value)| value.as_str())
            .collect();
        if declared.iter().any(|ns| *ns == self.config.namespace) {
            return Ok(());
        }
        reader.report(ImportError::ValidationError(format!(
            "Invalid SSRF: missing namespace declaration (expected {})",
            self.config.namespace
        )))
    }

    /// Common block; also sets the diagnostic context to `Kind[serial]`
    fn read_common(
        &self,
        reader: &mut FieldReader<'_>,
        node: &XmlNode,
    ) -> Result<Common, ImportError> {
        reader.enter(node.name.as_str());
        let classification = reader.marking(node, &node.name)?;
        let serial = reader.scalar::<Serial>(node, tags::SERIAL, &common::SERIAL)?;
        if let Some(serial) = serial.value() {
            reader.enter(format!("{}[{}]", node.name, serial));
        }

        Ok(Common {
            serial,
            classification,
            entry_date_time: reader.scalar(node, tags::ENTRY_DATE_TIME, &common::ENTRY_DATE_TIME)?,
            last_change_date_time: reader.scalar(
                node,
                tags::LAST_CHANGE_DATE_TIME,
                &common::LAST_CHANGE_DATE_TIME,
            )?,
            note_refs: reader.references(node, tags::NOTE_REF)?,
        })
    }

    fn read_note(&self, reader: &mut FieldReader<'_>, node: &XmlNode) -> Result<Note, ImportError> {
        Ok(Note {
            common: self.read_common(reader, node)?,
            subject: reader.scalar(node, tags::SUBJECT, &note::SUBJECT)?,
            text: reader.scalar(node, tags::TEXT, &note::TEXT)?,
        })
    }

    fn read_contact(
        &self,
        reader: &mut FieldReader<'_>,
        node: &XmlNode,
    ) -> Result<Contact, ImportError> {
        Ok(Contact {
            common: self.read_common(reader, node)?,
            name: reader.scalar(node, tags::NAME, &contact_codes::NAME)?,
            phone: reader.scalar(node, tags::PHONE, &contact_codes::PHONE)?,
            email: reader.scalar(node, tags::EMAIL, &contact_codes::EMAIL)?,
            organisation_ref: reader.reference(node, tags::ORGANISATION_REF)?,
        })
    }

    fn read_organisation(
        &self,
        reader: &mut FieldReader<'_>,
        node: &XmlNode,
    ) -> Result<Organisation, ImportError> {
        Ok(Organisation {
            common: self.read_common(reader, node)?,
            name: reader.scalar(node, tags::NAME, &contact_codes::ORGANISATION_NAME)?,
            abbreviated_name: reader.scalar(
                node,
                tags::ABBREVIATED_NAME,
                &contact_codes::ABBREVIATION,
            )?,
            country: reader.scalar(node, tags::COUNTRY, &contact_codes::COUNTRY)?,
            parent_ref: reader.reference(node, tags::PARENT_REF)?,
            poc_refs: reader.references(node, tags::POC_REF)?,
        })
    }

    fn read_role(&self, reader: &mut FieldReader<'_>, node: &XmlNode) -> Result<Role, ImportError> {
        Ok(Role {
            common: self.read_common(reader, node)?,
            name: reader.scalar(node, tags::NAME, &contact_codes::NAME)?,
            organisation_ref: reader.reference(node, tags::ORGANISATION_REF)?,
        })
    }

    fn read_location(
        &self,
        reader: &mut FieldReader<'_>,
        node: &XmlNode,
    ) -> Result<Location, ImportError> {
        Ok(Location {
            common: self.read_common(reader, node)?,
            name: reader.scalar(node, tags::NAME, &location::NAME)?,
            latitude: reader.scalar(node, tags::LATITUDE, &location::LATITUDE)?,
            longitude: reader.scalar(node, tags::LONGITUDE, &location::LONGITUDE)?,
            altitude: reader.scalar(node, tags::ALTITUDE, &location::ALTITUDE)?,
        })
    }

    fn read_assignment(
        &self,
        reader: &mut FieldReader<'_>,
        node: &XmlNode,
    ) -> Result<Assignment, ImportError> {
        let common = self.read_common(reader, node)?;
        let context = reader.context().to_string();

        let mut transmitters = Vec::new();
        for (i, tx) in node.children_named(tags::TRANSMITTER).enumerate() {
            reader.enter(format!("{}/{}[{}]", context, tags::TRANSMITTER, i));
            transmitters.push(Transmitter {
                power: reader.scalar(tx, tags::POWER, &assignment_codes::POWER)?,
                azimuth: reader.scalar(tx, tags::AZIMUTH, &assignment_codes::AZIMUTH)?,
                polarisation: reader.scalar(
                    tx,
                    tags::POLARISATION,
                    &assignment_codes::POLARISATION,
                )?,
                location_ref: reader.reference(tx, tags::LOCATION_REF)?,
            });
        }

        let mut receivers = Vec::new();
        for (i, rx) in node.children_named(tags::RECEIVER).enumerate() {
            reader.enter(format!("{}/{}[{}]", context, tags::RECEIVER, i));
            receivers.push(Receiver {
                sensitivity: reader.scalar(rx, tags::SENSITIVITY, &assignment_codes::POWER)?,
                location_ref: reader.reference(rx, tags::LOCATION_REF)?,
            });
        }
        reader.enter(context);

        Ok(Assignment {
            common,
            title: reader.scalar(node, tags::TITLE, &assignment_codes::TITLE)?,
            status: reader.scalar(node, tags::STATUS, &assignment_codes::STATUS)?,
            frequency_min: reader.scalar(node, tags::FREQ_MIN, &assignment_codes::FREQUENCY)?,
            frequency_max: reader.scalar(node, tags::FREQ_MAX, &assignment_codes::FREQUENCY)?,
            period_start: reader.scalar(node, tags::PERIOD_START, &assignment_codes::PERIOD)?,
            period_end: reader.scalar(node, tags::PERIOD_END, &assignment_codes::PERIOD)?,
            poc_ref: reader.reference(node, tags::POC_REF)?,
            transmitters,
            receivers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatError;
    use crate::scalar::Classification;

    const NS: &str = "urn:us:gov:dod:standard:ssrf:3.1.0";

    fn wrap(body: &str) -> String {
        format!(r#"<SSRF xmlns="{}" cls="U">{}</SSRF>"#, NS, body)
    }

    #[test]
    fn test_import_reads_scalars_with_markings() {
        let xml = wrap(
            r#"<Note cls="U">
                 <Serial cls="U">N1</Serial>
                 <Subject cls="R" remarks="1 3" qualityFlag="A">Siting</Subject>
                 <Text cls="U">Mast shared with coastguard</Text>
               </Note>"#,
        );
        let result = SsrfImporter::new().import(&xml).unwrap();
        assert!(result.is_clean(), "{:?}", result.errors);

        let note = result.document.notes[0].borrow();
        assert_eq!(note.common.serial.value().map(Serial::as_str), Some("N1"));
        assert_eq!(note.common.classification, Some(Classification::Unclassified));
        assert_eq!(note.subject.value().map(String::as_str), Some("Siting"));
        assert_eq!(note.subject.classification(), Some(Classification::Restricted));
        assert_eq!(note.subject.meta.remarks, vec![1, 3]);
        assert_eq!(note.subject.meta.quality_flag.as_deref(), Some("A"));
    }

    #[test]
    fn test_invalid_value_is_collected_and_left_unset() {
        let xml = wrap(
            r#"<Location cls="U">
                 <Serial cls="U">L1</Serial>
                 <Latitude cls="U">91.5</Latitude>
                 <Longitude cls="U">-1.25</Longitude>
               </Location>"#,
        );
        let result = SsrfImporter::new().import(&xml).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            &result.errors[0],
            ImportError::FormatError { path, source: FormatError::OutOfRange { .. } }
                if path == "Location[L1]/Latitude"
        ));

        let location = result.document.locations[0].borrow();
        assert!(!location.latitude.is_set());
        assert_eq!(location.latitude.classification(), Some(Classification::Unclassified));
        assert!(location.longitude.is_set());
    }

    #[test]
    fn test_strict_mode_aborts_on_first_error() {
        let xml = wrap(r#"<Note cls="U"><Serial cls="U">N1</Serial><Subject>x</Subject></Note>"#);
        let importer = SsrfImporter::with_config(SsrfConfig::builder().strict(true).build());
        assert_eq!(
            importer.import(&xml).unwrap_err(),
            ImportError::MissingClassification("Note[N1]/Subject".to_string())
        );
    }

    #[test]
    fn test_missing_classification_allowed_when_not_required() {
        let xml = format!(r#"<SSRF xmlns="{}"><Note><Serial>N1</Serial></Note></SSRF>"#, NS);
        let config = SsrfConfig::builder().require_classification(false).build();
        let result = SsrfImporter::with_config(config).import(&xml).unwrap();
        assert!(result.is_clean());
        assert_eq!(result.document.len(), 1);
    }

    #[test]
    fn test_wrong_root_is_rejected() {
        let err = SsrfImporter::new().import("<Other/>").unwrap_err();
        assert!(matches!(err, ImportError::ValidationError(_)));
        let err = SsrfImporter::new().import("<SSRF>").unwrap_err();
        assert!(matches!(err, ImportError::ParseError(_)));
    }

    #[test]
    fn test_missing_namespace_is_reported() {
        let result = SsrfImporter::new().import(r#"<SSRF cls="U"/>"#).unwrap();
        assert!(matches!(result.errors[..], [ImportError::ValidationError(_)]));
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let xml = wrap(r#"<Station cls="U"><Serial cls="U">S1</Serial></Station>"#);
        let result = SsrfImporter::new().import(&xml).unwrap();
        assert!(result.document.is_empty());
        assert!(result.is_clean());
    }

    #[test]
    fn test_assignment_sub_structures() {
        let xml = wrap(
            r#"<Assignment cls="U">
                 <Serial cls="U">A1</Serial>
                 <FreqMin cls="U">225</FreqMin>
                 <FreqMax cls="U">400.5</FreqMax>
                 <POCRef cls="U">R1</POCRef>
                 <Transmitter>
                   <Power cls="U">17</Power><LocationRef cls="U">L1</LocationRef>
                 </Transmitter>
                 <Transmitter><Azimuth cls="U">360</Azimuth></Transmitter>
                 <Receiver><Sensitivity cls="U">-120.5</Sensitivity></Receiver>
               </Assignment>"#,
        );
        let result = SsrfImporter::new().import(&xml).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            &result.errors[0],
            ImportError::FormatError { path, .. } if path == "Assignment[A1]/Transmitter[1]/Azimuth"
        ));

        let assignment = result.document.assignments[0].borrow();
        assert_eq!(assignment.transmitters.len(), 2);
        assert_eq!(assignment.receivers.len(), 1);
        assert_eq!(
            assignment.transmitters[0].location_ref.raw().map(Serial::as_str),
            Some("L1")
        );
        assert_eq!(assignment.poc_ref.raw().map(Serial::as_str), Some("R1"));
        assert!(!assignment.poc_ref.is_resolved());
    }
}

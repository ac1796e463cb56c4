//! SSRF XML exporter

use tracing::info;

use super::fields::FieldWriter;
use super::{ExportError, ExportResult};
use crate::config::SsrfConfig;
use crate::format::FormatRegistry;
use crate::models::assignment::codes as assignment_codes;
use crate::models::contact::codes as contact_codes;
use crate::models::{
    Assignment, Common, Contact, Document, Location, Note, Organisation, Role, common, location,
    note,
};
use crate::xml::{XmlNode, tags};

/// SSRF Exporter
///
/// Writes entities in kind order (notes first, assignments last), each
/// collection in insertion order. Scalars are validated and rendered through
/// the format registry; unset scalars and references without a Serial are
/// omitted.
#[derive(Debug, Clone)]
pub struct SsrfExporter<'r> {
    config: SsrfConfig,
    registry: &'r FormatRegistry,
}

impl Default for SsrfExporter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl SsrfExporter<'static> {
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

impl<'r> SsrfExporter<'r> {
    /// Use a custom format registry
    pub fn with_registry<'s>(self, registry: &'s FormatRegistry) -> SsrfExporter<'s> {
        SsrfExporter {
            config: self.config,
            registry,
        }
    }

    pub fn config(&self) -> &SsrfConfig {
        &self.config
    }

    /// Export a document to SSRF XML
    pub fn export(&self, document: &Document) -> Result<ExportResult, ExportError> {
        let root = self.to_tree(document)?;
        let content = root
            .to_xml(self.config.indent)
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        info!("Exported {} entities", document.len());
        Ok(ExportResult {
            content,
            format: "ssrf-xml".to_string(),
        })
    }

    /// Build the element tree without serializing it
    pub fn to_tree(&self, document: &Document) -> Result<XmlNode, ExportError> {
        let mut writer = FieldWriter::new(self.registry, &self.config);
        let mut root = writer.element(tags::ROOT, document.classification)?;
        root.attributes
            .insert(0, ("xmlns".to_string(), self.config.namespace.clone()));

        for note in &document.notes {
            root.push(self.write_note(&mut writer, &note.borrow())?);
        }
        for contact in &document.contacts {
            root.push(self.write_contact(&mut writer, &contact.borrow())?);
        }
        for organisation in &document.organisations {
            root.push(self.write_organisation(&mut writer, &organisation.borrow())?);
        }
        for role in &document.roles {
            root.push(self.write_role(&mut writer, &role.borrow())?);
        }
        for location in &document.locations {
            root.push(self.write_location(&mut writer, &location.borrow())?);
        }
        for assignment in &document.assignments {
            root.push(self.write_assignment(&mut writer, &assignment.borrow())?);
        }
        Ok(root)
    }

    fn write_common(
        &self,
        writer: &mut FieldWriter<'_>,
        name: &str,
        common: &Common,
    ) -> Result<XmlNode, ExportError> {
        match common.serial.value() {
            Some(serial) => writer.enter(format!("{}[{}]", name, serial)),
            None => writer.enter(name),
        }
        let mut node = writer.element(name, common.classification)?;
        writer.scalar(&mut node, tags::SERIAL, &common::SERIAL, &common.serial)?;
        writer.scalar(
            &mut node,
            tags::ENTRY_DATE_TIME,
            &common::ENTRY_DATE_TIME,
            &common.entry_date_time,
        )?;
        writer.scalar(
            &mut node,
            tags::LAST_CHANGE_DATE_TIME,
            &common::LAST_CHANGE_DATE_TIME,
            &common.last_change_date_time,
        )?;
        writer.references(&mut node, tags::NOTE_REF, &common.note_refs)?;
        Ok(node)
    }

    fn write_note(
        &self,
        writer: &mut FieldWriter<'_>,
        note: &Note,
    ) -> Result<XmlNode, ExportError> {
        let mut node = self.write_common(writer, "Note", &note.common)?;
        writer.scalar(&mut node, tags::SUBJECT, &note::SUBJECT, &note.subject)?;
        writer.scalar(&mut node, tags::TEXT, &note::TEXT, &note.text)?;
        Ok(node)
    }

    fn write_contact(
        &self,
        writer: &mut FieldWriter<'_>,
        contact: &Contact,
    ) -> Result<XmlNode, ExportError> {
        let mut node = self.write_common(writer, "Contact", &contact.common)?;
        writer.scalar(&mut node, tags::NAME, &contact_codes::NAME, &contact.name)?;
        writer.scalar(&mut node, tags::PHONE, &contact_codes::PHONE, &contact.phone)?;
        writer.scalar(&mut node, tags::EMAIL, &contact_codes::EMAIL, &contact.email)?;
        writer.reference(&mut node, tags::ORGANISATION_REF, &contact.organisation_ref)?;
        Ok(node)
    }

    fn write_organisation(
        &self,
        writer: &mut FieldWriter<'_>,
        organisation: &Organisation,
    ) -> Result<XmlNode, ExportError> {
        let mut node = self.write_common(writer, "Organisation", &organisation.common)?;
        writer.scalar(
            &mut node,
            tags::NAME,
            &contact_codes::ORGANISATION_NAME,
            &organisation.name,
        )?;
        writer.scalar(
            &mut node,
            tags::ABBREVIATED_NAME,
            &contact_codes::ABBREVIATION,
            &organisation.abbreviated_name,
        )?;
        writer.scalar(&mut node, tags::COUNTRY, &contact_codes::COUNTRY, &organisation.country)?;
        writer.reference(&mut node, tags::PARENT_REF, &organisation.parent_ref)?;
        writer.references(&mut node, tags::POC_REF, &organisation.poc_refs)?;
        Ok(node)
    }

    fn write_role(
        &self,
        writer: &mut FieldWriter<'_>,
        role: &Role,
    ) -> Result<XmlNode, ExportError> {
        let mut node = self.write_common(writer, "Role", &role.common)?;
        writer.scalar(&mut node, tags::NAME, &contact_codes::NAME, &role.name)?;
        writer.reference(&mut node, tags::ORGANISATION_REF, &role.organisation_ref)?;
        Ok(node)
    }

    fn write_location(
        &self,
        writer: &mut FieldWriter<'_>,
        location: &Location,
    ) -> Result<XmlNode, ExportError> {
        let mut node = self.write_common(writer, "Location", &location.common)?;
        writer.scalar(&mut node, tags::NAME, &location::NAME, &location.name)?;
        writer.scalar(&mut node, tags::LATITUDE, &location::LATITUDE, &location.latitude)?;
        writer.scalar(&mut node, tags::LONGITUDE, &location::LONGITUDE, &location.longitude)?;
        writer.scalar(&mut node, tags::ALTITUDE, &location::ALTITUDE, &location.altitude)?;
        Ok(node)
    }

    fn write_assignment(
        &self,
        writer: &mut FieldWriter<'_>,
        assignment: &Assignment,
    ) -> Result<XmlNode, ExportError> {
        let mut node = self.write_common(writer, "Assignment", &assignment.common)?;
        writer.scalar(&mut node, tags::TITLE, &assignment_codes::TITLE, &assignment.title)?;
        writer.scalar(&mut node, tags::STATUS, &assignment_codes::STATUS, &assignment.status)?;
        writer.scalar(
            &mut node,
            tags::FREQ_MIN,
            &assignment_codes::FREQUENCY,
            &assignment.frequency_min,
        )?;
        writer.scalar(
            &mut node,
            tags::FREQ_MAX,
            &assignment_codes::FREQUENCY,
            &assignment.frequency_max,
        )?;
        writer.scalar(
            &mut node,
            tags::PERIOD_START,
            &assignment_codes::PERIOD,
            &assignment.period_start,
        )?;
        writer.scalar(
            &mut node,
            tags::PERIOD_END,
            &assignment_codes::PERIOD,
            &assignment.period_end,
        )?;
        writer.reference(&mut node, tags::POC_REF, &assignment.poc_ref)?;

        let context = writer.context().to_string();
        for (i, tx) in assignment.transmitters.iter().enumerate() {
            writer.enter(format!("{}/{}[{}]", context, tags::TRANSMITTER, i));
            let mut child = XmlNode::new(tags::TRANSMITTER);
            writer.scalar(&mut child, tags::POWER, &assignment_codes::POWER, &tx.power)?;
            writer.scalar(&mut child, tags::AZIMUTH, &assignment_codes::AZIMUTH, &tx.azimuth)?;
            writer.scalar(
                &mut child,
                tags::POLARISATION,
                &assignment_codes::POLARISATION,
                &tx.polarisation,
            )?;
            writer.reference(&mut child, tags::LOCATION_REF, &tx.location_ref)?;
            node.push(child);
        }
        for (i, rx) in assignment.receivers.iter().enumerate() {
            writer.enter(format!("{}/{}[{}]", context, tags::RECEIVER, i));
            let mut child = XmlNode::new(tags::RECEIVER);
            writer.scalar(
                &mut child,
                tags::SENSITIVITY,
                &assignment_codes::POWER,
                &rx.sensitivity,
            )?;
            writer.reference(&mut child, tags::LOCATION_REF, &rx.location_ref)?;
            node.push(child);
        }
        writer.enter(context);
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Serial;
    use crate::scalar::Classification;
    use rust_decimal::Decimal;

    fn serial(s: &str) -> Serial {
        Serial::parse(s).unwrap()
    }

    fn unclassified() -> SsrfConfig {
        SsrfConfig::builder()
            .default_classification(Classification::Unclassified)
            .build()
    }

    #[test]
    fn test_export_renders_canonical_values() {
        let mut doc = Document::new();
        doc.add(
            Location::new(serial("L1"))
                .with_position(Decimal::new(515, 1), Decimal::new(-125, 2))
                .unwrap(),
        );

        let tree = SsrfExporter::with_config(unclassified()).to_tree(&doc).unwrap();
        assert_eq!(tree.name, "SSRF");
        assert_eq!(tree.attr("xmlns"), Some("urn:us:gov:dod:standard:ssrf:3.1.0"));
        let location = tree.child("Location").unwrap();
        assert_eq!(location.attr("cls"), Some("U"));
        assert_eq!(location.child("Latitude").unwrap().text(), "51.500000");
        assert_eq!(location.child("Longitude").unwrap().text(), "-1.250000");
        assert!(location.child("Altitude").is_none());
    }

    #[test]
    fn test_missing_classification_fails_without_default() {
        let mut doc = Document::new();
        let mut note = Note::new(serial("N1"));
        note.common.classification = Some(Classification::Unclassified);
        doc.add(note);

        let err = SsrfExporter::new().to_tree(&doc).unwrap_err();
        assert_eq!(err, ExportError::MissingClassification("SSRF".to_string()));

        doc.classification = Some(Classification::Unclassified);
        let err = SsrfExporter::new().to_tree(&doc).unwrap_err();
        assert_eq!(
            err,
            ExportError::MissingClassification("Note[N1]/Serial".to_string())
        );
    }

    #[test]
    fn test_invalid_builder_free_value_is_rejected() {
        let mut doc = Document::new();
        let mut location = Location::new(serial("L1"));
        location.altitude = Decimal::new(500001, 1).into();
        doc.add(location);

        let err = SsrfExporter::with_config(unclassified()).to_tree(&doc).unwrap_err();
        assert!(matches!(
            err,
            ExportError::FormatError { path, .. } if path == "Location[L1]/Altitude"
        ));
    }

    #[test]
    fn test_metadata_attributes_are_written() {
        let mut doc = Document::new();
        let mut note = Note::new(serial("N1")).with_text("hello").unwrap();
        note.text.meta.remarks = vec![2, 5];
        note.text.meta.availability = Some("Y".to_string());
        doc.add(note);

        let tree = SsrfExporter::with_config(unclassified()).to_tree(&doc).unwrap();
        let text = tree.child("Note").unwrap().child("Text").unwrap();
        assert_eq!(text.attr("remarks"), Some("2 5"));
        assert_eq!(text.attr("availability"), Some("Y"));
        assert_eq!(text.attr("cls"), Some("U"));
    }
}

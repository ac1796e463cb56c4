//! Import and export tests
use rust_decimal::Decimal;
use ssrf_model::format::FormatError;
use ssrf_model::import::{ImportError, SsrfImporter};
use ssrf_model::models::{Document, Note, PocTarget};
use ssrf_model::reference::Serial;
use ssrf_model::scalar::Classification;
use ssrf_model::validation::{ReferenceValidator, audit};
use ssrf_model::{DocumentLoader, DocumentSaver, SsrfConfig};
use std::rc::Rc;

const NS: &str = "urn:us:gov:dod:standard:ssrf:3.1.0";

fn wrap(body: &str) -> String {
    format!(r#"<SSRF xmlns="{}" cls="U">{}</SSRF>"#, NS, body)
}

fn serial(s: &str) -> Serial {
    Serial::parse(s).unwrap()
}

fn assignment_document() -> String {
    wrap(
        r#"
        <Note cls="U">
          <Serial cls="U">N1</Serial>
          <Subject cls="U">Siting</Subject>
          <Text cls="R" remarks="1">Mast shared with coastguard</Text>
        </Note>
        <Organisation cls="U">
          <Serial cls="U">GBR:ORG:1</Serial>
          <Name cls="U">Spectrum Office</Name>
          <Country cls="U">GBR</Country>
          <POCRef cls="U">C1</POCRef>
        </Organisation>
        <Contact cls="U">
          <Serial cls="U">C1</Serial>
          <Name cls="U">Duty officer</Name>
          <OrganisationRef cls="U">GBR:ORG:1</OrganisationRef>
        </Contact>
        <Location cls="U">
          <Serial cls="U">L1</Serial>
          <Name cls="U">Hilltop</Name>
          <Latitude cls="U">51.5</Latitude>
          <Longitude cls="U">-1.25</Longitude>
        </Location>
        <Assignment cls="R">
          <Serial cls="U">A1</Serial>
          <NoteRef cls="U">N1</NoteRef>
          <Title cls="U">Range link</Title>
          <Status cls="U">Approved</Status>
          <FreqMin cls="R">225</FreqMin>
          <FreqMax cls="R">225.5</FreqMax>
          <PeriodStart cls="U">2024-03-01T12:00:00+02:00</PeriodStart>
          <POCRef cls="U">C1</POCRef>
          <Transmitter>
            <Power cls="U">-3</Power>
            <Azimuth cls="U">90.5</Azimuth>
            <Polarisation cls="U">V</Polarisation>
            <LocationRef cls="U">L1</LocationRef>
          </Transmitter>
          <Receiver>
            <Sensitivity cls="U">-120</Sensitivity>
            <LocationRef cls="U">L1</LocationRef>
          </Receiver>
        </Assignment>"#,
    )
}

mod round_trip_tests {
    use super::*;

    #[test]
    fn test_load_links_every_reference() {
        let loaded = DocumentLoader::new().load_str(&assignment_document()).unwrap();
        assert!(loaded.is_clean(), "{:?}", loaded.import_errors);
        assert_eq!(loaded.document.len(), 5);
        assert_eq!(loaded.resolution.resolved, 6);

        let doc = &loaded.document;
        let assignment = doc.assignments[0].borrow();
        assert_eq!(assignment.common.classification, Some(Classification::Restricted));
        assert_eq!(assignment.frequency_min.value(), Some(&Decimal::from(225)));
        assert_eq!(
            assignment.frequency_max.classification(),
            Some(Classification::Restricted)
        );
        assert!(Rc::ptr_eq(
            assignment.transmitters[0].location_ref.target().unwrap(),
            &doc.locations[0]
        ));
        assert!(Rc::ptr_eq(
            assignment.receivers[0].location_ref.target().unwrap(),
            &doc.locations[0]
        ));
        assert!(matches!(
            assignment.poc_ref.target(),
            Some(PocTarget::Contact(found)) if Rc::ptr_eq(found, &doc.contacts[0])
        ));

        assert!(audit(doc).is_valid());
    }

    #[test]
    fn test_save_writes_canonical_text() {
        let loaded = DocumentLoader::new().load_str(&assignment_document()).unwrap();
        let saved = DocumentSaver::new().save_string(&loaded.document).unwrap();

        assert!(saved.content.contains(">225.000000000</FreqMin>"));
        assert!(saved.content.contains(">-3.000</Power>"));
        assert!(saved.content.contains(">90.50</Azimuth>"));
        assert!(saved.content.contains(">51.500000</Latitude>"));
        assert!(saved.content.contains(">2024-03-01T10:00:00Z</PeriodStart>"));
        assert!(saved.content.contains(r#"<Text cls="R" remarks="1">"#));
        assert_eq!(saved.build.rebuilt, 6);
    }

    #[test]
    fn test_save_load_save_is_stable() {
        let loaded = DocumentLoader::new().load_str(&assignment_document()).unwrap();
        let first = DocumentSaver::new().save_string(&loaded.document).unwrap();

        let reloaded = DocumentLoader::new().load_str(&first.content).unwrap();
        assert!(reloaded.is_clean(), "{:?}", reloaded.import_errors);
        let second = DocumentSaver::new().save_string(&reloaded.document).unwrap();
        assert_eq!(first.content, second.content);
    }

    #[test]
    fn test_builder_text_survives_save_and_load() {
        assert!(matches!(
            Note::new(serial("N1")).with_text("  indented"),
            Err(FormatError::PatternMismatch { .. })
        ));

        let mut doc = Document::new();
        doc.add(Note::new(serial("N1")).with_text("two  spaced  words").unwrap());
        let config = SsrfConfig::builder()
            .default_classification(Classification::Unclassified)
            .build();
        let saved = DocumentSaver::with_config(config).save_string(&doc).unwrap();

        let loaded = DocumentLoader::new().load_str(&saved.content).unwrap();
        assert!(loaded.is_clean(), "{:?}", loaded.import_errors);
        let note = loaded.document.notes[0].borrow();
        assert_eq!(note.text.value().map(String::as_str), Some("two  spaced  words"));
    }

    #[test]
    fn test_load_and_save_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.xml");
        let output = dir.path().join("output.xml");
        std::fs::write(&input, assignment_document()).unwrap();

        let loaded = DocumentLoader::new().load_path(&input).unwrap();
        let build = DocumentSaver::new().save_path(&loaded.document, &output).unwrap();
        assert!(build.unaddressable.is_empty());

        let reloaded = DocumentLoader::new().load_path(&output).unwrap();
        assert_eq!(reloaded.document.len(), loaded.document.len());
    }

    #[test]
    fn test_load_path_reports_file_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        std::fs::write(&path, "<SSRF><Note>").unwrap();

        let err = DocumentLoader::new().load_path(&path).unwrap_err();
        assert!(err.to_string().contains("broken.xml"));

        let missing = DocumentLoader::new().load_path(dir.path().join("missing.xml"));
        assert!(missing.is_err());
    }
}

mod diagnostics_tests {
    use super::*;

    #[test]
    fn test_field_errors_are_collected_with_paths() {
        let xml = wrap(
            r#"<Assignment cls="U">
                 <Serial cls="U">A1</Serial>
                 <Status cls="U">approved</Status>
                 <Transmitter>
                   <Azimuth cls="U">360</Azimuth>
                 </Transmitter>
               </Assignment>"#,
        );
        let result = SsrfImporter::new().import(&xml).unwrap();
        let paths: Vec<String> = result
            .errors
            .iter()
            .filter_map(|e| match e {
                ImportError::FormatError { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            paths,
            vec![
                "Assignment[A1]/Transmitter[0]/Azimuth".to_string(),
                "Assignment[A1]/Status".to_string(),
            ]
        );
        assert_eq!(result.document.len(), 1);
    }

    #[test]
    fn test_missing_namespace_is_reported() {
        let xml = r#"<SSRF cls="U"><Note cls="U"><Serial cls="U">N1</Serial></Note></SSRF>"#;
        let result = SsrfImporter::new().import(xml).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0], ImportError::ValidationError(_)));
        assert_eq!(result.document.len(), 1);
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let xml = wrap(r#"<Antenna cls="U"/><Note cls="U"><Serial cls="U">N1</Serial></Note>"#);
        let result = SsrfImporter::new().import(&xml).unwrap();
        assert!(result.is_clean());
        assert_eq!(result.document.len(), 1);
    }

    #[test]
    fn test_strict_loader_fails_on_field_error() {
        let xml = wrap(
            r#"<Location cls="U">
                 <Serial cls="U">L1</Serial>
                 <Latitude cls="U">91</Latitude>
               </Location>"#,
        );
        let config = SsrfConfig::builder().strict(true).build();
        let err = DocumentLoader::with_config(config).load_str(&xml).unwrap_err();
        assert!(err.to_string().contains("Location[L1]/Latitude"));
    }
}

mod audit_tests {
    use super::*;

    #[test]
    fn test_hierarchy_cycle_is_found() {
        let xml = wrap(
            r#"<Organisation cls="U">
                 <Serial cls="U">O1</Serial><ParentRef cls="U">O2</ParentRef>
               </Organisation>
               <Organisation cls="U">
                 <Serial cls="U">O2</Serial><ParentRef cls="U">O1</ParentRef>
               </Organisation>
               <Organisation cls="U">
                 <Serial cls="U">O3</Serial><ParentRef cls="U">O1</ParentRef>
               </Organisation>"#,
        );
        let loaded = DocumentLoader::new().load_str(&xml).unwrap();
        assert!(loaded.is_clean());

        let cycles = ReferenceValidator::new().hierarchy_cycles(&loaded.document);
        assert_eq!(cycles, vec![vec![Some(serial("O1")), Some(serial("O2"))]]);
    }

    #[test]
    fn test_duplicate_and_dangling_are_counted() {
        let xml = wrap(
            r#"<Note cls="U"><Serial cls="U">N1</Serial></Note>
               <Note cls="U"><Serial cls="U">N1</Serial></Note>
               <Role cls="U">
                 <Serial cls="U">R1</Serial><OrganisationRef cls="U">O9</OrganisationRef>
               </Role>
               <Note cls="U"><Subject cls="U">No serial</Subject></Note>"#,
        );
        let config = SsrfConfig::builder().require_classification(true).build();
        let loaded = DocumentLoader::with_config(config).load_str(&xml).unwrap();

        let result = audit(&loaded.document);
        assert_eq!(result.duplicate_serials.len(), 1);
        assert_eq!(result.dangling.len(), 1);
        assert_eq!(result.unidentified, 1);
        assert_eq!(result.issue_count(), 2);
        assert!(!result.is_valid());
    }
}

//! Element and attribute names of the SSRF wire format

pub const ROOT: &str = "SSRF";

pub const CLS: &str = "cls";
pub const REMARKS: &str = "remarks";
pub const EXT_REFERENCES: &str = "extReferences";
pub const LEGACY_RELEASABILITY: &str = "legacyReleasability";
pub const QUALITY_FLAG: &str = "qualityFlag";
pub const RECOMMENDED_VALUE: &str = "recommendedValue";
pub const AVAILABILITY: &str = "availability";

pub const SERIAL: &str = "Serial";
pub const ENTRY_DATE_TIME: &str = "EntryDateTime";
pub const LAST_CHANGE_DATE_TIME: &str = "LastChangeDateTime";
pub const NOTE_REF: &str = "NoteRef";

pub const SUBJECT: &str = "Subject";
pub const TEXT: &str = "Text";

pub const NAME: &str = "Name";
pub const PHONE: &str = "Phone";
pub const EMAIL: &str = "Email";
pub const ORGANISATION_REF: &str = "OrganisationRef";
pub const ABBREVIATED_NAME: &str = "AbbreviatedName";
pub const COUNTRY: &str = "Country";
pub const PARENT_REF: &str = "ParentRef";
pub const POC_REF: &str = "POCRef";

pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const ALTITUDE: &str = "Altitude";

pub const TITLE: &str = "Title";
pub const STATUS: &str = "Status";
pub const FREQ_MIN: &str = "FreqMin";
pub const FREQ_MAX: &str = "FreqMax";
pub const PERIOD_START: &str = "PeriodStart";
pub const PERIOD_END: &str = "PeriodEnd";
pub const TRANSMITTER: &str = "Transmitter";
pub const RECEIVER: &str = "Receiver";
pub const POWER: &str = "Power";
pub const AZIMUTH: &str = "Azimuth";
pub const POLARISATION: &str = "Polarisation";
pub const SENSITIVITY: &str = "Sensitivity";
pub const LOCATION_REF: &str = "LocationRef";

//! Format adapter set
//!
//! One validator/formatter per data-format code of the standard:
//! - Bounded integers (`UN<n>`, `SN<n>`) and decimals (`UN(i,f)`, `SN(i,f)`)
//! - Named physical quantities carrying a unit and an explicit range
//! - Length-bounded strings (`S<n>`) and closed code lists (`L:<list>`)
//! - Dates, timestamps and serial identifiers
//!
//! Every adapter guarantees `parse(render(v)) == v` for the values it accepts.

pub mod code;
pub mod codelist;
pub mod error;
pub mod numeric;
pub mod registry;
pub mod temporal;
pub mod text;

pub use code::{FormatCode, Quantity, Unit};
pub use codelist::{CodeListFormat, CodeListId};
pub use error::{FormatError, FormatResult};
pub use numeric::{DecimalFormat, IntegerFormat};
pub use registry::{Format, FormatRegistry};
pub use temporal::{DateFormat, DateTimeFormat};
pub use text::{SerialFormat, TextFormat};

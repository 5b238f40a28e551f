//! pokereports-client
//!
//! HTTP boundary to the report API. Thin wrapper around `reqwest`:
//! list, create and delete report jobs, and probe a report's download
//! link before handing it off.

pub mod directory;
pub mod download;
pub mod error;
pub mod reports;

pub use crate::directory::{BoxFuture, ReportDirectory};
pub use crate::download::{HttpLinkProbe, LinkProbe, is_storage_auth_failure};
pub use crate::error::{ClientError, ProbeError};
pub use crate::reports::ReportApi;

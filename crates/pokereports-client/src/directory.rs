use std::future::Future;
use std::pin::Pin;

use pokereports_core::{Report, ReportId};

use crate::error::ClientError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The three remote operations the dashboard needs from the report API.
///
/// Implemented by [`crate::ReportApi`] over HTTP; the dashboard holds it as
/// a trait object so it can be driven by in-memory fakes.
///
/// Methods return boxed futures for dyn compatibility.
pub trait ReportDirectory: Send + Sync {
    /// Fetch and normalize every report the API currently knows about.
    fn list_reports(&self) -> BoxFuture<'_, Result<Vec<Report>, ClientError>>;

    /// Queue a new report for a Pokémon type. Returns the response body
    /// as sent; its shape is not validated.
    fn create_report<'a>(
        &'a self,
        pokemon_type: &'a str,
    ) -> BoxFuture<'a, Result<serde_json::Value, ClientError>>;

    /// Ask the API to delete a report. Completion only means the request
    /// was accepted; the report may still appear in the next listing.
    fn delete_report<'a>(
        &'a self,
        id: &'a ReportId,
    ) -> BoxFuture<'a, Result<serde_json::Value, ClientError>>;
}

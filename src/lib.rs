//! JSON front end of the transport catalogue: a build phase that turns a
//! network description into a binary index, and a serve phase that answers
//! stat requests from that index.

use std::io::{Read, Write};

use tracing::info;
use transport_core::prelude::*;

pub mod error;
pub mod handler;
pub mod logging;
pub mod requests;
pub mod responses;

pub use error::AppError;
pub use handler::RequestHandler;
pub use requests::{BaseDocument, StatDocument, StatRequest};
pub use responses::{Response, RouteItem};

/// Builds the catalogue and router from a build document and writes the
/// index to `serialization_settings.file`
///
/// # Errors
///
/// Fails on a malformed document, an inconsistent network or an index that
/// cannot be written
pub fn make_base<R: Read>(input: R) -> Result<TransportModel, AppError> {
    let document: BaseDocument = serde_json::from_reader(input)?;
    let model = create_transport_model(&document.network(), &document.config())?;
    model.save(&document.serialization_settings.file)?;
    info!(
        stops = model.stop_count(),
        buses = model.bus_count(),
        file = %document.serialization_settings.file.display(),
        "Base created"
    );
    Ok(model)
}

/// Loads the index named by a serve document and writes one response per
/// stat request as a JSON array
///
/// Nothing is written to `output` unless every request was answered.
///
/// # Errors
///
/// Fails on a malformed document, a missing or corrupt index, or a write error
pub fn process_requests<R: Read, W: Write>(input: R, mut output: W) -> Result<(), AppError> {
    let document: StatDocument = serde_json::from_reader(input)?;
    let model = TransportModel::load(&document.serialization_settings.file)?;

    let responses = RequestHandler::new(&model).answer_all(&document.stat_requests)?;
    info!(count = responses.len(), "Requests answered");

    let body = serde_json::to_vec_pretty(&responses)?;
    output.write_all(&body)?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}

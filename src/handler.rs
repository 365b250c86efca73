use tracing::debug;
use transport_core::prelude::*;

use crate::requests::StatRequest;
use crate::responses::Response;

/// Answers stat requests against a loaded model
pub struct RequestHandler<'a> {
    model: &'a TransportModel,
}

impl<'a> RequestHandler<'a> {
    pub fn new(model: &'a TransportModel) -> Self {
        Self { model }
    }

    /// Unknown buses, stops and unreachable destinations are answered with
    /// a not-found record.
    ///
    /// # Errors
    ///
    /// Fails only if bus statistics cannot be computed from the model
    pub fn answer(&self, request: &StatRequest) -> Result<Response, Error> {
        debug!(?request, "Answering request");
        let id = request.id();
        let response = match request {
            StatRequest::Bus { name, .. } => self
                .model
                .bus_stats(name)?
                .map_or_else(|| Response::not_found(id), |stats| Response::bus(id, &stats)),
            StatRequest::Stop { name, .. } => self
                .model
                .catalogue
                .buses_for_stop(name)
                .map_or_else(|| Response::not_found(id), |buses| Response::stop(id, buses)),
            StatRequest::Map { .. } => Response::Map {
                request_id: id,
                map: self.model.render_map(),
            },
            StatRequest::Route { from, to, .. } => self
                .model
                .find_route(from, to)
                .map_or_else(|| Response::not_found(id), |route| Response::route(id, route)),
        };
        Ok(response)
    }

    /// # Errors
    ///
    /// Returns the first error raised by [`RequestHandler::answer`]
    pub fn answer_all(&self, requests: &[StatRequest]) -> Result<Vec<Response>, Error> {
        requests.iter().map(|request| self.answer(request)).collect()
    }
}

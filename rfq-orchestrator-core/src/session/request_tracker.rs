use crate::types::PageQuery;

/// Handle for one in-flight catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTicket {
    resource: &'static str,
    generation: u64,
    query: PageQuery,
}

impl PageTicket {
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The (already clamped) query this ticket was issued for.
    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    pub fn into_query(self) -> PageQuery {
        self.query
    }
}

/// Latest-request-wins bookkeeping for one catalog.
///
/// Each issued ticket gets a strictly increasing generation; only the ticket
/// with the latest generation may apply its response.
#[derive(Debug, Clone)]
pub struct RequestTracker {
    resource: &'static str,
    latest: u64,
}

impl RequestTracker {
    #[must_use]
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            latest: 0,
        }
    }

    /// Issue a ticket, superseding every earlier one.
    pub fn issue(&mut self, query: PageQuery) -> PageTicket {
        self.latest += 1;
        PageTicket {
            resource: self.resource,
            generation: self.latest,
            query,
        }
    }

    pub fn is_current(&self, ticket: &PageTicket) -> bool {
        ticket.resource == self.resource && ticket.generation == self.latest
    }

    /// Supersede every outstanding ticket without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

//! Service boundary: ports and mock adapters.
//!
//! The application core never talks to a backend directly. It posts requests
//! to the worker, which dispatches through the port traits defined in
//! [`ports`]. The only adapters in this prototype are the mocks in [`mock`];
//! swapping in real HTTP adapters is an implementation of the same traits.

pub mod mock;
pub mod ports;

pub use mock::{MockAssistantService, MockAuthService, MockCatalogService, MOCK_TOTAL_PAGES};
pub use ports::{
    AssistantService, AuthService, CatalogService, ServiceError, ServiceResult,
};

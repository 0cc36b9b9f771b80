// Adapters layer: concrete implementations of the domain ports.

pub mod console;
pub mod http;
pub mod mock;

pub use console::ConsoleNotifier;
pub use http::RemoteAnalysisClient;
pub use mock::MockAnalysisService;

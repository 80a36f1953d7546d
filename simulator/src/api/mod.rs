pub mod server;
pub mod store;

pub use server::AnalysisServer;
pub use store::InspectionStore;

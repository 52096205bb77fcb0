pub mod deadline;
pub mod endpoint;

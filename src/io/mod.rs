pub mod snapshot;

pub use snapshot::load_snapshot;

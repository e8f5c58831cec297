mod local;

pub use local::LocalObjectStore;

pub use directory::{InMemoryPlayerDirectory, PlayerDirectory, PlayerEntry};

mod directory;

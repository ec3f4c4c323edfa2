// Shared decoding helpers
pub mod encoding;
pub mod io;

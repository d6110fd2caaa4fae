//! Infrastructure Layer
//!
//! Client storage backends and external service integrations.

pub mod clock;
pub mod file_storage;
pub mod memory;
pub mod supabase;

pub use clock::SystemClock;
pub use file_storage::FileStorage;
pub use memory::MemoryStorage;
pub use supabase::SupabaseAuthenticator;

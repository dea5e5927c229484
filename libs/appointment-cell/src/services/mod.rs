pub mod booking;
pub mod clock;
pub mod memory;
pub mod repository;
pub mod supabase_store;
pub mod validation;

pub use booking::AppointmentService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use memory::{InMemoryActorDirectory, InMemoryAppointmentStore};
pub use repository::{ActorDirectory, AppointmentRepository};
pub use supabase_store::{SupabaseActorDirectory, SupabaseAppointmentStore};
pub use validation::{start_of_hour, validate_booking};

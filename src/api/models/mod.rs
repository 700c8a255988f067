// Models module - contains the Pet record, its create/update inputs, and enums

pub mod de;
pub mod enums;
pub mod pet;

pub use enums::PetStatus;
pub use pet::{NewPet, Pet, PetChanges, PetStats};

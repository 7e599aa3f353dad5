pub mod disease;
pub mod enums;
pub mod family;
pub mod genomic;
pub mod profile;
pub mod sample;

pub use disease::DiseaseType;
pub use enums::{AlcoholUse, DietType, Gender, Relationship};
pub use family::FamilyMember;
pub use genomic::{GenomicDiseaseRisk, GenomicSummary};
pub use profile::{HormonalFactors, Lifestyle, UserProfile};
pub use sample::HealthSample;

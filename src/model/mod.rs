//! Resume content model.
//!
//! Types mirror the JSON Resume schema: a `basics` block plus ordered
//! section lists. Schema validation happens upstream; these types only
//! carry the data, so every leaf is optional. Top-level keys outside the
//! core schema are retained, in encounter order, for the extra-sections
//! pass of the context builder.

mod resume;

pub use resume::{
    Basics, EducationEntry, Location, Profile, ProjectEntry, ResumeContent, SkillEntry, WorkEntry,
};
